pub mod camera;
pub mod color;
pub mod draw_list;
pub mod traits;

pub use camera::Camera2D;
pub use color::Color;
pub use draw_list::{DrawCommand, DrawList};
pub use traits::DrawTarget;
