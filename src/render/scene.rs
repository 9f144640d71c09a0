//! One full redraw: background, labelled grid, apple, snake.
//!
//! Drawing goes through [`Surface`] so the frame logic can be exercised
//! without a browser; [`super::surface::CanvasSurface`] is the canvas backend.

use crate::model::SnakeState;
use crate::render::sprites::SpriteSheet;
use crate::state::orientation::{self, SpriteRole};
use crate::state::{Camera, Point};

pub const BACKGROUND: &str = "#ffffff";

/// Below this spacing in CSS pixels the grid is a solid wash and is not drawn.
pub const MIN_LINE_SPACING: f64 = 2.0;

/// Drawing primitives needed by the scene, in CSS pixels.
pub trait Surface {
    type Image;

    fn clear(&mut self, width: f64, height: f64);
    fn fill_background(&mut self, width: f64, height: f64, color: &str);
    fn begin_grid(&mut self);
    fn line(&mut self, from: Point, to: Point);
    fn label(&mut self, text: &str, at: Point);
    /// Draws `image` as a `size`×`size` square centred on `center`, rotated
    /// clockwise about that centre. Rotation must not persist past this call.
    fn draw_sprite(&mut self, image: &Self::Image, center: Point, size: f64, rotation_degrees: u16);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    /// Pixel coordinate along the axis.
    pub pos: f64,
    /// World grid index of the line.
    pub index: i64,
    pub labelled: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    pub vertical: Vec<GridLine>,
    pub horizontal: Vec<GridLine>,
}

pub fn label_interval(cell_size: f64, reference_size: f64) -> i64 {
    ((reference_size / cell_size).floor() as i64).max(1)
}

fn axis_lines(offset: f64, cell: f64, extent: f64, interval: i64) -> Vec<GridLine> {
    let first = (offset / cell).floor();
    let start = first * cell - offset;
    let max_count = (extent / MIN_LINE_SPACING).ceil() + 2.0;
    let count = ((extent - start) / cell).ceil().clamp(0.0, max_count) as usize;
    (0..count)
        .map(|k| {
            let index = first as i64 + k as i64;
            GridLine {
                pos: start + k as f64 * cell,
                index,
                labelled: index.rem_euclid(interval) == 0,
            }
        })
        .filter(|l| l.pos < extent)
        .collect()
}

/// Camera-aligned grid lines covering a `width`×`height` viewport.
pub fn grid_lines(camera: &Camera, width: f64, height: f64, label_reference: f64) -> GridLines {
    let cell = camera.cell_size;
    let visible = |v: f64| v.is_finite() && v > 0.0;
    if !(cell >= MIN_LINE_SPACING && visible(width) && visible(height)) {
        return GridLines::default();
    }
    let interval = label_interval(cell, label_reference);
    GridLines {
        vertical: axis_lines(camera.offset.x, cell, width, interval),
        horizontal: axis_lines(camera.offset.y, cell, height, interval),
    }
}

pub struct Frame<'a, I> {
    pub camera: &'a Camera,
    pub width: f64,
    pub height: f64,
    pub world: Option<&'a SnakeState>,
    pub sprites: &'a SpriteSheet<I>,
    pub label_reference: f64,
    pub apple_scale: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub sprites_drawn: usize,
    /// Draws skipped because the sprite has not loaded.
    pub skipped: usize,
    /// Segments drawn with the fallback sprite.
    pub degraded: usize,
}

pub fn render_scene<S: Surface>(surface: &mut S, frame: &Frame<'_, S::Image>) -> RenderStats {
    let mut stats = RenderStats::default();
    surface.clear(frame.width, frame.height);
    surface.fill_background(frame.width, frame.height, BACKGROUND);

    let grid = grid_lines(frame.camera, frame.width, frame.height, frame.label_reference);
    surface.begin_grid();
    for l in &grid.vertical {
        surface.line(Point::new(l.pos, 0.0), Point::new(l.pos, frame.height));
        if l.labelled {
            surface.label(&l.index.to_string(), Point::new(l.pos + 2.0, 10.0));
        }
    }
    for l in &grid.horizontal {
        surface.line(Point::new(0.0, l.pos), Point::new(frame.width, l.pos));
        if l.labelled {
            surface.label(&l.index.to_string(), Point::new(2.0, l.pos - 2.0));
        }
    }

    let Some(world) = frame.world else {
        return stats;
    };
    let cell = frame.camera.cell_size;

    let apple_role = if world.is_golden_apple {
        SpriteRole::GoldenApple
    } else {
        SpriteRole::Apple
    };
    let apple_at = frame.camera.to_screen(world.apple.to_point());
    match frame.sprites.get(apple_role) {
        Some(img) => {
            surface.draw_sprite(img, apple_at, cell * frame.apple_scale, 0);
            stats.sprites_drawn += 1;
        }
        None => stats.skipped += 1,
    }

    for i in 0..world.snake.len() {
        let Some(seg) = orientation::resolve(&world.snake, i) else {
            continue;
        };
        if seg.degraded {
            stats.degraded += 1;
        }
        let at = frame.camera.to_screen(world.snake[i].to_point());
        match frame.sprites.get(seg.role) {
            Some(img) => {
                surface.draw_sprite(img, at, cell, seg.rotation_degrees);
                stats.sprites_drawn += 1;
            }
            None => stats.skipped += 1,
        }
    }
    stats
}
