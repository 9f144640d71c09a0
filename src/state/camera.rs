// Camera state: pixel offset of the world origin plus a single scale value.

/// A continuous point, either in world grid units or in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn distance(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Pixel offset of the world origin from the canvas top-left, at the current scale.
    pub offset: Point,
    /// Pixels per grid unit. Shared by grid cells and sprites.
    pub cell_size: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Point::default(),
            cell_size: 40.0,
        }
    }
}

impl Camera {
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            Self::default().cell_size
        };
        Self {
            offset: Point::default(),
            cell_size,
        }
    }

    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.cell_size - self.offset.x,
            world.y * self.cell_size - self.offset.y,
        )
    }

    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x + self.offset.x) / self.cell_size,
            (screen.y + self.offset.y) / self.cell_size,
        )
    }

    /// Changes the scale while keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, new_cell_size: f64) {
        let anchor = self.to_world(screen);
        self.zoom_anchored(anchor, screen, new_cell_size);
    }

    /// Places `world_anchor` under `screen` at `new_cell_size`.
    /// Non-positive or non-finite scales are ignored.
    pub fn zoom_anchored(&mut self, world_anchor: Point, screen: Point, new_cell_size: f64) {
        if !(new_cell_size.is_finite() && new_cell_size > 0.0) {
            return;
        }
        let offset = Point::new(
            world_anchor.x * new_cell_size - screen.x,
            world_anchor.y * new_cell_size - screen.y,
        );
        if !offset.is_finite() {
            return;
        }
        self.cell_size = new_cell_size;
        self.offset = offset;
    }

    /// Multiplies the scale by `ratio` around `screen`, optionally clamped to `[min, max]`.
    pub fn zoom_by_ratio(&mut self, screen: Point, ratio: f64, min: f64, max: f64) -> bool {
        if !(ratio.is_finite() && ratio > 0.0) {
            return false;
        }
        let raw = self.cell_size * ratio;
        let lo = min.max(f64::MIN_POSITIVE);
        let target = if lo <= max { raw.clamp(lo, max) } else { raw };
        if target == self.cell_size {
            return false;
        }
        self.zoom_at(screen, target);
        true
    }

    /// Drag moves the world opposite to the pointer: `offset -= delta`.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.offset.x -= dx;
        self.offset.y -= dy;
    }

    /// Centres `mean_world` inside a viewport of the given CSS size.
    pub fn center_on(&mut self, mean_world: Point, viewport_width: f64, viewport_height: f64) {
        let offset = Point::new(
            mean_world.x * self.cell_size - viewport_width / 2.0,
            mean_world.y * self.cell_size - viewport_height / 2.0,
        );
        if offset.is_finite() {
            self.offset = offset;
        }
    }

    /// Centres the arithmetic mean of `cells`. Returns false when there is nothing to locate.
    pub fn locate(
        &mut self,
        cells: &[crate::model::Position],
        viewport_width: f64,
        viewport_height: f64,
    ) -> bool {
        match crate::model::mean_position(cells) {
            Some(mean) => {
                self.center_on(mean, viewport_width, viewport_height);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn screen_world_round_trip() {
        let cam = Camera {
            offset: Point::new(-123.5, 987.25),
            cell_size: 17.3,
        };
        for w in [Point::new(0.0, 0.0), Point::new(3.0, -7.0), Point::new(-1.25, 42.5)] {
            assert!(close(cam.to_world(cam.to_screen(w)), w));
        }
    }

    #[test]
    fn to_screen_subtracts_offset() {
        let cam = Camera {
            offset: Point::new(10.0, 20.0),
            cell_size: 40.0,
        };
        assert_eq!(cam.to_screen(Point::new(2.0, 3.0)), Point::new(70.0, 100.0));
    }

    #[test]
    fn zoom_at_keeps_point_under_cursor() {
        let mut cam = Camera {
            offset: Point::new(35.0, -12.0),
            cell_size: 40.0,
        };
        let p = Point::new(311.0, 207.0);
        let before = cam.to_world(p);
        cam.zoom_at(p, 40.0 * 1.05);
        assert!(close(cam.to_world(p), before));
        cam.zoom_at(p, 13.0);
        assert!(close(cam.to_world(p), before));
    }

    #[test]
    fn zoom_rejects_degenerate_scale() {
        let mut cam = Camera::default();
        let before = cam;
        cam.zoom_at(Point::new(5.0, 5.0), 0.0);
        cam.zoom_at(Point::new(5.0, 5.0), -3.0);
        cam.zoom_at(Point::new(5.0, 5.0), f64::NAN);
        assert_eq!(cam, before);
        assert!(!cam.zoom_by_ratio(Point::default(), 0.0, 0.0, f64::INFINITY));
    }

    #[test]
    fn zoom_by_ratio_respects_clamp() {
        let mut cam = Camera::new(40.0);
        assert!(cam.zoom_by_ratio(Point::default(), 10.0, 1.0, 100.0));
        assert_eq!(cam.cell_size, 100.0);
        assert!(!cam.zoom_by_ratio(Point::default(), 2.0, 1.0, 100.0));
    }

    #[test]
    fn locate_centres_mean_of_snake() {
        let mut cam = Camera::new(40.0);
        let snake = [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)];
        assert!(cam.locate(&snake, 800.0, 600.0));
        assert!(close(cam.to_screen(Point::new(1.0, 0.0)), Point::new(400.0, 300.0)));
    }

    #[test]
    fn locate_empty_is_noop() {
        let mut cam = Camera::new(40.0);
        cam.offset = Point::new(7.0, 8.0);
        assert!(!cam.locate(&[], 800.0, 600.0));
        assert_eq!(cam.offset, Point::new(7.0, 8.0));
    }
}
