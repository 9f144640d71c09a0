pub mod resize;
pub mod scene;
pub mod sprites;
pub mod surface;

pub use resize::{BackingSize, apply_backing_size};
pub use scene::{Frame, render_scene};
pub use sprites::{SpriteSheet, load_sprites};
pub use surface::CanvasSurface;
