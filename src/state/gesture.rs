// Pointer/touch/wheel gesture state machine. Mutates the camera; never draws.
use super::camera::{Camera, Point};
use super::touch::PinchSession;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Last pointer position seen; each move pans by the delta since this point.
    Dragging { last: Point },
    Pinching(PinchSession),
}

/// Zoom limits applied by the wheel. Defaults leave the scale unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureController {
    pub phase: GesturePhase,
    pub limits: ZoomLimits,
}

impl GestureController {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            phase: GesturePhase::Idle,
            limits,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.phase, GesturePhase::Pinching(_))
    }

    pub fn mouse_down(&mut self, button: i16, at: Point) {
        if button == 0 && !self.is_pinching() {
            self.phase = GesturePhase::Dragging { last: at };
        }
    }

    pub fn mouse_move(&mut self, at: Point, camera: &mut Camera) -> bool {
        self.drag_to(at, camera)
    }

    /// Release and pointer-leave both end a mouse drag.
    pub fn mouse_up(&mut self) {
        if self.is_dragging() {
            self.phase = GesturePhase::Idle;
        }
    }

    pub fn touch_start(&mut self, touches: &[Point], camera: &Camera) {
        match touches {
            [] => self.phase = GesturePhase::Idle,
            [only] => self.phase = GesturePhase::Dragging { last: *only },
            [a, b] => self.phase = GesturePhase::Pinching(PinchSession::begin(*a, *b, camera)),
            // three or more fingers: no gesture until the count drops back
            _ => self.phase = GesturePhase::Idle,
        }
    }

    pub fn touch_move(&mut self, touches: &[Point], camera: &mut Camera) -> bool {
        match (touches, self.phase) {
            ([only], GesturePhase::Dragging { .. }) => self.drag_to(*only, camera),
            ([a, b], GesturePhase::Pinching(session)) => session.apply(*a, *b, camera),
            _ => false,
        }
    }

    /// `remaining` are the touches still down after the end/cancel event.
    /// Whatever is left is re-snapshotted so the camera does not jump.
    pub fn touch_end(&mut self, remaining: &[Point], camera: &Camera) {
        self.touch_start(remaining, camera);
    }

    /// One discrete wheel step anchored at the cursor. Independent of the touch phase.
    pub fn wheel(&self, at: Point, delta_y: f64, factor: f64, camera: &mut Camera) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let ratio = if delta_y < 0.0 { factor } else { 1.0 / factor };
        camera.zoom_by_ratio(at, ratio, self.limits.min, self.limits.max)
    }

    fn drag_to(&mut self, at: Point, camera: &mut Camera) -> bool {
        let GesturePhase::Dragging { last } = self.phase else {
            return false;
        };
        camera.pan_by(at.x - last.x, at.y - last.y);
        self.phase = GesturePhase::Dragging { last: at };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_accumulates_deltas() {
        let mut cam = Camera::new(40.0);
        let mut g = GestureController::default();
        g.mouse_down(0, Point::new(100.0, 100.0));
        assert!(g.mouse_move(Point::new(105.0, 100.0), &mut cam));
        assert!(g.mouse_move(Point::new(105.0, 105.0), &mut cam));
        assert!(g.mouse_move(Point::new(103.0, 103.0), &mut cam));
        assert_eq!(cam.offset, Point::new(-3.0, -3.0));
        g.mouse_up();
        assert!(!g.mouse_move(Point::new(0.0, 0.0), &mut cam));
        assert_eq!(cam.offset, Point::new(-3.0, -3.0));
    }

    #[test]
    fn secondary_button_does_not_drag() {
        let mut g = GestureController::default();
        g.mouse_down(2, Point::new(1.0, 1.0));
        assert_eq!(g.phase, GesturePhase::Idle);
    }

    #[test]
    fn single_touch_pans() {
        let mut cam = Camera::new(40.0);
        let mut g = GestureController::default();
        g.touch_start(&[Point::new(10.0, 10.0)], &cam);
        assert!(g.touch_move(&[Point::new(30.0, 5.0)], &mut cam));
        assert_eq!(cam.offset, Point::new(-20.0, 5.0));
    }

    #[test]
    fn pinch_session_lives_only_with_two_touches() {
        let mut cam = Camera::new(40.0);
        let mut g = GestureController::default();
        g.touch_start(&[Point::new(10.0, 10.0)], &cam);
        g.touch_start(&[Point::new(10.0, 10.0), Point::new(110.0, 10.0)], &cam);
        assert!(g.is_pinching());
        assert!(g.touch_move(&[Point::new(0.0, 10.0), Point::new(200.0, 10.0)], &mut cam));
        assert!((cam.cell_size - 80.0).abs() < 1e-9);

        g.touch_end(&[Point::new(200.0, 10.0)], &cam);
        assert!(!g.is_pinching());
        assert!(g.is_dragging());
        let before = cam.offset;
        assert!(g.touch_move(&[Point::new(201.0, 10.0)], &mut cam));
        assert_eq!(cam.offset, Point::new(before.x - 1.0, before.y));

        g.touch_end(&[], &cam);
        assert_eq!(g.phase, GesturePhase::Idle);
    }

    #[test]
    fn third_finger_ends_pinch_and_lifting_it_starts_a_fresh_one() {
        let mut cam = Camera::new(40.0);
        let mut g = GestureController::default();
        let a = Point::new(100.0, 100.0);
        let b = Point::new(110.0, 100.0);
        let c = Point::new(400.0, 100.0);
        g.touch_start(&[a, b], &cam);
        assert!(g.is_pinching());

        g.touch_start(&[a, b, c], &cam);
        assert_eq!(g.phase, GesturePhase::Idle);
        assert!(!g.touch_move(&[a, b, c], &mut cam));

        // b lifts; the a-c pair becomes the new pinch baseline
        g.touch_end(&[a, c], &cam);
        assert!(g.is_pinching());
        assert!(g.touch_move(&[a, c], &mut cam));
        assert!((cam.cell_size - 40.0).abs() < 1e-9);
        assert_eq!(cam.offset, Point::new(0.0, 0.0));
    }

    #[test]
    fn pinch_with_ratio_one_keeps_scale() {
        let mut cam = Camera::new(40.0);
        let mut g = GestureController::default();
        let pts = [Point::new(0.0, 0.0), Point::new(60.0, 80.0)];
        g.touch_start(&pts, &cam);
        g.touch_move(&pts, &mut cam);
        assert!((cam.cell_size - 40.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_pinch_is_ignored() {
        let mut cam = Camera::new(40.0);
        let mut g = GestureController::default();
        let p = Point::new(50.0, 50.0);
        g.touch_start(&[p, p], &cam);
        assert!(!g.touch_move(&[Point::new(0.0, 0.0), Point::new(90.0, 0.0)], &mut cam));
        assert_eq!(cam.cell_size, 40.0);
    }

    #[test]
    fn wheel_zooms_in_and_out_at_cursor() {
        let mut cam = Camera::new(40.0);
        let g = GestureController::default();
        let at = Point::new(250.0, 120.0);
        let anchor = cam.to_world(at);
        assert!(g.wheel(at, -100.0, 1.05, &mut cam));
        assert!((cam.cell_size - 42.0).abs() < 1e-9);
        let w = cam.to_world(at);
        assert!((w.x - anchor.x).abs() < 1e-9 && (w.y - anchor.y).abs() < 1e-9);
        assert!(g.wheel(at, 100.0, 1.05, &mut cam));
        assert!((cam.cell_size - 40.0).abs() < 1e-9);
    }
}
