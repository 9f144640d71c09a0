// Keeps the canvas backing buffer at container size × device pixel ratio.
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use crate::error::ViewError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackingSize {
    /// Visible size in CSS pixels; the scene draws in these units.
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub dpr: f64,
}

impl BackingSize {
    pub fn compute(container_width: f64, container_height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let css = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let css_width = css(container_width);
        let css_height = css(container_height);
        Self {
            css_width,
            css_height,
            pixel_width: (css_width * dpr).round() as u32,
            pixel_height: (css_height * dpr).round() as u32,
            dpr,
        }
    }

    /// Measures the canvas's parent element (falls back to the canvas itself).
    pub fn measure(canvas: &HtmlCanvasElement) -> Self {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let (w, h) = match canvas
            .parent_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(parent) => (parent.client_width() as f64, parent.client_height() as f64),
            None => (canvas.client_width() as f64, canvas.client_height() as f64),
        };
        Self::compute(w, h, dpr)
    }
}

/// Resizes the buffer and resets the context transform to `dpr`.
pub fn apply_backing_size(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    size: BackingSize,
) -> Result<(), ViewError> {
    canvas.set_width(size.pixel_width);
    canvas.set_height(size.pixel_height);
    let style = canvas.style();
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    ctx.set_transform(size.dpr, 0.0, 0.0, size.dpr, 0.0, 0.0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_device_pixel_ratio() {
        let s = BackingSize::compute(800.0, 600.0, 2.0);
        assert_eq!((s.pixel_width, s.pixel_height), (1600, 1200));
        assert_eq!((s.css_width, s.css_height), (800.0, 600.0));
        let frac = BackingSize::compute(333.0, 100.0, 1.5);
        assert_eq!(frac.pixel_width, 500);
    }

    #[test]
    fn bad_ratio_falls_back_to_one() {
        assert_eq!(BackingSize::compute(10.0, 10.0, 0.0).dpr, 1.0);
        assert_eq!(BackingSize::compute(10.0, 10.0, f64::NAN).dpr, 1.0);
        assert_eq!(BackingSize::compute(-5.0, 10.0, 1.0).pixel_width, 0);
    }
}
