//! Lyon tessellation backend for `DrawTarget`.
//!
//! Shapes are tessellated on the CPU into a flat triangle list (6 floats per vertex:
//! x, y, r, g, b, a) that a host-side WebGL/WebGPU pass uploads as-is. Positions are
//! already in screen space: the current offset is applied here.
//!
//! Text and sprites are left to the host; the canvas records text labels so a 2D overlay
//! can draw them on top of the triangles.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::renderer::{Color, DrawTarget};

const TOLERANCE: f32 = 0.5;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self {
            x,
            y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

/// A text label the triangle pass cannot draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub pos: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color,
}

/// Per-frame triangle canvas. `DrawTarget::clear` starts a new frame.
pub struct VectorCanvas {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    labels: Vec<TextLabel>,
    offset: Vec2,
    clear_color: Color,
}

impl VectorCanvas {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
            labels: Vec::new(),
            offset: Vec2::ZERO,
            clear_color: Color::BLACK,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer, for the host to read out of linear memory.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Background color from the most recent `clear`.
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn polygon(&self, points: &[Vec2]) -> Path {
        let mut builder = Path::builder();
        let first = points[0] + self.offset;
        builder.begin(point(first.x, first.y));
        for p in &points[1..] {
            let p = *p + self.offset;
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        builder.build()
    }

    fn rect_points(pos: Vec2, size: Vec2) -> [Vec2; 4] {
        [
            pos,
            Vec2::new(pos.x + size.x, pos.y),
            pos + size,
            Vec2::new(pos.x, pos.y + size.y),
        ]
    }

    /// Fill a closed polygon given in world coordinates.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let path = self.polygon(points);
        self.fill_path(&path, color);
    }

    pub fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("fill tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("stroke tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for VectorCanvas {
    fn clear(&mut self, color: Color) {
        self.buffer.clear();
        self.labels.clear();
        self.clear_color = color;
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        self.fill_polygon(&Self::rect_points(pos, size), color);
    }

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, line_width: f32, color: Color) {
        if line_width <= 0.0 {
            return;
        }
        let path = self.polygon(&Self::rect_points(pos, size));
        self.stroke_path(&path, line_width, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let c = center + self.offset;
        let mut builder = Path::builder();
        builder.add_circle(point(c.x, c.y), radius, Winding::Positive);
        let path = builder.build();
        self.fill_path(&path, color);
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        self.labels.push(TextLabel {
            pos: pos + self.offset,
            text: text.to_string(),
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn vertex_layout() {
        assert_eq!(size_of::<VectorVertex>(), VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut canvas = VectorCanvas::new();
        canvas.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), Color::WHITE);
        assert_eq!(canvas.vertex_count(), 6);
    }

    #[test]
    fn offset_shifts_vertices() {
        let mut canvas = VectorCanvas::new();
        canvas.set_offset(Vec2::new(-50.0, 10.0));
        canvas.fill_rect(Vec2::new(60.0, 0.0), Vec2::new(10.0, 10.0), Color::WHITE);
        let xs: Vec<f32> = canvas.vertices().chunks(VectorVertex::FLOATS).map(|v| v[0]).collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min - 10.0).abs() < 1e-3);
        assert!((max - 20.0).abs() < 1e-3);
    }

    #[test]
    fn clear_starts_new_frame() {
        let mut canvas = VectorCanvas::new();
        canvas.fill_circle(Vec2::new(50.0, 50.0), 25.0, Color::WHITE);
        canvas.text(Vec2::ZERO, "GUN x3", 12.0, Color::WHITE);
        assert!(canvas.vertex_count() > 0);
        assert_eq!(canvas.labels().len(), 1);

        canvas.clear(Color::SKY);
        assert_eq!(canvas.vertex_count(), 0);
        assert!(canvas.labels().is_empty());
        assert_eq!(canvas.clear_color(), Color::SKY);
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut canvas = VectorCanvas::new();
        canvas.fill_rect(Vec2::ZERO, Vec2::new(0.0, 10.0), Color::WHITE);
        canvas.fill_circle(Vec2::ZERO, 0.0, Color::WHITE);
        canvas.fill_polygon(&[Vec2::ZERO, Vec2::ONE], Color::WHITE);
        assert_eq!(canvas.vertex_count(), 0);
        assert!(!canvas.sprite("player_right", Vec2::ZERO, Vec2::ONE, 1.0));
    }

    #[test]
    fn stroke_rect_produces_geometry() {
        let mut canvas = VectorCanvas::new();
        canvas.stroke_rect(Vec2::ZERO, Vec2::new(40.0, 40.0), 2.0, Color::BLACK);
        assert!(canvas.vertex_count() > 0);
    }
}
