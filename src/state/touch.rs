// Two-finger pinch session, snapshotted when the second touch lands.
use super::camera::{Camera, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    /// Distance between the two touches at pinch start, in CSS pixels.
    pub initial_distance: f64,
    pub initial_cell_size: f64,
    /// World point that was under the midpoint at pinch start.
    pub initial_world_mid: Point,
}

impl PinchSession {
    pub fn begin(a: Point, b: Point, camera: &Camera) -> Self {
        Self {
            initial_distance: a.distance(b),
            initial_cell_size: camera.cell_size,
            initial_world_mid: camera.to_world(a.midpoint(b)),
        }
    }

    /// Scale for the current finger separation, or None for a degenerate session.
    pub fn cell_size_for(&self, distance: f64) -> Option<f64> {
        if !(self.initial_distance > 0.0) || !distance.is_finite() {
            return None;
        }
        let ratio = distance / self.initial_distance;
        let cell_size = self.initial_cell_size * ratio;
        (cell_size.is_finite() && cell_size > 0.0).then_some(cell_size)
    }

    /// Keeps the initial pinch-centre world point under the current midpoint.
    pub fn apply(&self, a: Point, b: Point, camera: &mut Camera) -> bool {
        let Some(cell_size) = self.cell_size_for(a.distance(b)) else {
            return false;
        };
        camera.zoom_anchored(self.initial_world_mid, a.midpoint(b), cell_size);
        true
    }
}
