use glam::Vec2;

use crate::core::collision::{Aabb, Bounded};
use crate::renderer::{Color, DrawTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Ground,
    Wood,
    Brick,
}

/// Static collision block. Never moves once generated.
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Aabb,
    pub kind: PlatformKind,
}

const GRASS: Color = Color::hex(0x228B22);
const GRASS_TUFT: Color = Color::hex(0x32CD32);
const WOOD: Color = Color::hex(0x8B4513);
const WOOD_GRAIN: Color = Color::hex(0x654321);
const BRICK: Color = Color::hex(0xCD853F);
const MORTAR: Color = Color::hex(0x8B4513);

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            rect: Aabb::new(x, y, width, height),
            kind,
        }
    }

    pub fn x(&self) -> f32 {
        self.rect.pos.x
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let Aabb { pos, size } = self.rect;
        match self.kind {
            PlatformKind::Ground => {
                target.fill_rect(pos, size, GRASS);
                let mut i = 0.0;
                while i < size.x {
                    target.fill_rect(Vec2::new(pos.x + i, pos.y), Vec2::new(4.0, 8.0), GRASS_TUFT);
                    i += 8.0;
                }
            }
            PlatformKind::Wood => {
                target.fill_rect(pos, size, WOOD);
                let mut i = 0.0;
                while i < size.x {
                    target.fill_rect(Vec2::new(pos.x + i - 1.0, pos.y), Vec2::new(2.0, size.y), WOOD_GRAIN);
                    i += 32.0;
                }
            }
            PlatformKind::Brick => {
                target.fill_rect(pos, size, BRICK);
                let (bw, bh) = (16.0, 8.0);
                let rows = (size.y / bh).ceil() as u32;
                for row in 0..rows {
                    let offset = if row % 2 == 0 { 0.0 } else { bw / 2.0 };
                    let y = pos.y + row as f32 * bh;
                    let mut x = pos.x + offset;
                    while x < pos.x + size.x {
                        let w = bw.min(pos.x + size.x - x);
                        target.stroke_rect(Vec2::new(x, y), Vec2::new(w, bh), 2.0, MORTAR);
                        x += bw;
                    }
                }
            }
        }
        target.stroke_rect(pos, size, 2.0, Color::BLACK);
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Aabb {
        self.rect
    }
}
