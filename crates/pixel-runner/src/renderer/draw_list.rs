//! Serialisable draw commands for the Canvas 2D host.
//!
//! The host replays the list in order each frame: `offset` maps to `setTransform`, and
//! `sprite` to `drawImage` with the image the manifest registered under `name`.

use glam::Vec2;
use serde::Serialize;

use super::color::Color;
use super::traits::DrawTarget;
use crate::assets::registry::AssetRegistry;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Clear { color: Color },
    Offset { x: f32, y: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Color },
    #[serde(rename_all = "camelCase")]
    StrokeRect { x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color },
    FillCircle { x: f32, y: f32, r: f32, color: Color },
    Text { x: f32, y: f32, text: String, size: f32, color: Color },
    Sprite { name: String, x: f32, y: f32, w: f32, h: f32, alpha: f32 },
}

#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    assets: AssetRegistry,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: AssetRegistry) -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            assets,
        }
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    pub fn set_assets(&mut self, assets: AssetRegistry) {
        self.assets = assets;
    }

    /// Drop last frame's commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.commands)
    }
}

impl DrawTarget for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Offset {
            x: offset.x,
            y: offset.y,
        });
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
            color,
        });
    }

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, line_width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
            line_width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::FillCircle {
            x: center.x,
            y: center.y,
            r: radius,
            color,
        });
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            x: pos.x,
            y: pos.y,
            text: text.to_string(),
            size,
            color,
        });
    }

    fn sprite(&mut self, name: &str, pos: Vec2, size: Vec2, alpha: f32) -> bool {
        if !self.assets.is_ready(name) {
            return false;
        }
        self.commands.push(DrawCommand::Sprite {
            name: name.to_string(),
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
            alpha,
        });
        true
    }
}
