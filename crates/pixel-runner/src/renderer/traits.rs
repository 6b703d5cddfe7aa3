//! Drawing contract between the simulation and whatever actually paints pixels.
//!
//! The core never touches a canvas. Entities describe themselves through `DrawTarget`,
//! and the host picks an implementation: `DrawList` records commands for a Canvas 2D
//! replayer, `VectorState` (feature `vectors`) tessellates them into triangles.

use glam::Vec2;

use super::color::Color;

pub trait DrawTarget {
    /// Fill the whole surface (screen space).
    fn clear(&mut self, color: Color);

    /// Translation applied to every following primitive. The camera transform is
    /// `-camera_pos`; `Vec2::ZERO` draws in screen space.
    fn set_offset(&mut self, offset: Vec2);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, line_width: f32, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Text anchored at its center.
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color);

    /// Draw a named image. Returns false when the image isn't loaded yet, in which case
    /// the caller draws its placeholder shapes instead.
    fn sprite(&mut self, _name: &str, _pos: Vec2, _size: Vec2, _alpha: f32) -> bool {
        false
    }
}
