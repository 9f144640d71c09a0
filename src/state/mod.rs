pub mod camera;
pub mod gesture;
pub mod orientation;
pub mod touch;

pub use camera::{Camera, Point};
pub use gesture::{GestureController, ZoomLimits};
pub use orientation::SpriteRole;
