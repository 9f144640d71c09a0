// CanvasRenderingContext2d backend for the scene.
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::ViewError;
use crate::render::scene::Surface;
use crate::state::Point;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, ViewError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(ViewError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewError::NoContext)?;
        Ok(Self::new(ctx))
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_background(&mut self, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn begin_grid(&mut self) {
        self.ctx.set_stroke_style_str("rgba(200, 200, 200, 0.5)");
        self.ctx.set_line_width(0.5);
        self.ctx.set_font("10px Arial");
        self.ctx.set_fill_style_str("#000");
    }

    fn line(&mut self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn label(&mut self, text: &str, at: Point) {
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }

    fn draw_sprite(&mut self, image: &HtmlImageElement, center: Point, size: f64, rotation_degrees: u16) {
        self.ctx.save();
        if rotation_degrees != 0 {
            let _ = self.ctx.translate(center.x, center.y);
            let _ = self.ctx.rotate(f64::from(rotation_degrees).to_radians());
            let _ = self.ctx.translate(-center.x, -center.y);
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            center.x - size / 2.0,
            center.y - size / 2.0,
            size,
            size,
        );
        self.ctx.restore();
    }
}
