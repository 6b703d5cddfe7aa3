//! The endless level: entity lists, chunk bookkeeping, difficulty and the camera.

use std::collections::BTreeSet;

use glam::Vec2;

use super::generator::{generate_chunk, ChunkContent};
use crate::api::config::WorldTuning;
use crate::components::coin::Coin;
use crate::components::decoration::{Cloud, Decoration};
use crate::components::enemy::Enemy;
use crate::components::heart::Heart;
use crate::components::mystery_box::MysteryBox;
use crate::components::platform::Platform;
use crate::components::power_up::PowerUp;
use crate::core::rng::{streams, Rng};
use crate::renderer::{Camera2D, Color, DrawTarget};

const CLOUD_COUNT: usize = 6;
/// Bands used to approximate the sky gradient.
const SKY_BANDS: u32 = 8;

pub struct Level {
    tuning: WorldTuning,
    seed: u64,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub hearts: Vec<Heart>,
    pub mystery_boxes: Vec<MysteryBox>,
    pub decorations: Vec<Decoration>,
    clouds: Vec<Cloud>,
    generated: BTreeSet<i32>,
    difficulty: f32,
    camera: Camera2D,
}

impl Level {
    pub fn new(tuning: WorldTuning, seed: u64, viewport: Vec2) -> Self {
        let camera = Camera2D::new(viewport.x, viewport.y).with_vertical_limits(
            tuning.camera_vertical_offset,
            tuning.camera_min_y,
            tuning.camera_max_y,
        );
        let mut level = Self {
            tuning,
            seed,
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            hearts: Vec::new(),
            mystery_boxes: Vec::new(),
            decorations: Vec::new(),
            clouds: Vec::new(),
            generated: BTreeSet::new(),
            difficulty: 0.0,
            camera,
        };
        level.reset();
        level
    }

    /// Drop everything and rebuild the opening chunks.
    pub fn reset(&mut self) {
        self.platforms.clear();
        self.coins.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.hearts.clear();
        self.mystery_boxes.clear();
        self.decorations.clear();
        self.generated.clear();
        self.difficulty = 0.0;
        self.camera.reset();
        let mut rng = Rng::for_stream(self.seed, streams::CLOUDS);
        self.clouds = Cloud::scatter(CLOUD_COUNT, self.camera.width, &mut rng);
        self.ensure_chunks();
    }

    /// Raise difficulty to track `score`. Never lowers it.
    pub fn update_difficulty(&mut self, score: u64) {
        let target =
            (score as f32 / self.tuning.difficulty_score_step).min(self.tuning.max_difficulty);
        self.difficulty = self.difficulty.max(target);
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.camera.resize(viewport.x, viewport.y);
        self.ensure_chunks();
    }

    pub fn chunk_of(&self, x: f32) -> i32 {
        (x / self.tuning.chunk_size).floor() as i32
    }

    pub fn is_generated(&self, index: i32) -> bool {
        self.generated.contains(&index)
    }

    /// Right-most chunk that must exist for the current camera.
    pub fn required_chunk(&self) -> i32 {
        self.chunk_of(self.camera.right()) + self.tuning.lookahead_chunks as i32
    }

    /// Generate chunk `index` unless it already exists. Returns true if content was added.
    pub fn generate_chunk(&mut self, index: i32) -> bool {
        if index < 0 || !self.generated.insert(index) {
            return false;
        }
        let content = generate_chunk(index, self.difficulty, &self.tuning, self.seed);
        self.absorb(content);
        true
    }

    fn absorb(&mut self, content: ChunkContent) {
        let ChunkContent {
            platforms,
            coins,
            enemies,
            power_ups,
            hearts,
            mystery_boxes,
            decorations,
        } = content;
        self.platforms.extend(platforms);
        self.coins.extend(coins);
        self.enemies.extend(enemies);
        self.power_ups.extend(power_ups);
        self.hearts.extend(hearts);
        self.mystery_boxes.extend(mystery_boxes);
        self.decorations.extend(decorations);
    }

    fn ensure_chunks(&mut self) {
        let first = self.chunk_of(self.camera.x).max(0);
        for index in first..=self.required_chunk() {
            self.generate_chunk(index);
        }
    }

    /// Track the player, generate ahead and purge behind.
    pub fn update_camera(&mut self, target: Vec2) {
        self.camera.follow(target);
        self.ensure_chunks();
        self.cleanup();
    }

    pub fn update_clouds(&mut self, dt: f32) {
        for cloud in &mut self.clouds {
            cloud.update(dt);
        }
    }

    /// Remove finished entities and anything further than the cleanup distance behind the camera.
    pub fn cleanup(&mut self) {
        let limit = self.camera.x - self.tuning.cleanup_distance;
        let before = self.entity_count();

        self.platforms.retain(|p| p.rect.left() >= limit);
        self.coins.retain(|c| !c.collected && c.rect.left() >= limit);
        self.enemies.retain(|e| e.active && e.rect.left() >= limit);
        self.power_ups.retain(|p| !p.collected && p.rect.left() >= limit);
        self.hearts.retain(|h| !h.collected && h.rect.left() >= limit);
        self.mystery_boxes.retain(|b| b.active && b.rect.left() >= limit);
        self.decorations.retain(|d| d.pos.x >= limit);

        let removed = before - self.entity_count();
        if removed > 0 {
            log::debug!("cleanup removed {} entities behind x={:.0}", removed, limit);
        }
    }

    pub fn entity_count(&self) -> usize {
        self.platforms.len()
            + self.coins.len()
            + self.enemies.len()
            + self.power_ups.len()
            + self.hearts.len()
            + self.mystery_boxes.len()
            + self.decorations.len()
    }

    /// Background in screen space, then the world with the camera transform left applied.
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let cam = &self.camera;
        target.set_offset(Vec2::ZERO);
        let band = cam.height / SKY_BANDS as f32;
        for i in 0..SKY_BANDS {
            let t = i as f32 / (SKY_BANDS - 1) as f32;
            let color = lerp(Color::SKY_TOP, Color::SKY, t);
            target.fill_rect(Vec2::new(0.0, i as f32 * band), Vec2::new(cam.width, band + 1.0), color);
        }
        for cloud in &self.clouds {
            cloud.draw(target, cam.x, cam.width);
        }

        target.set_offset(cam.transform());
        // Props overhang their anchor, so test with a margin.
        for d in self.decorations.iter().filter(|d| d.pos.x > cam.x - 100.0 && d.pos.x < cam.right() + 100.0) {
            d.draw(target);
        }
        for p in self.platforms.iter().filter(|p| cam.is_rect_visible(&p.rect)) {
            p.draw(target);
        }
        for c in self.coins.iter().filter(|c| cam.is_rect_visible(&c.rect)) {
            c.draw(target);
        }
        for p in self.power_ups.iter().filter(|p| cam.is_rect_visible(&p.rect)) {
            p.draw(target);
        }
        for h in self.hearts.iter().filter(|h| cam.is_rect_visible(&h.rect)) {
            h.draw(target);
        }
        for b in self.mystery_boxes.iter().filter(|b| cam.is_rect_visible(&b.rect)) {
            b.draw(target);
        }
        for e in self.enemies.iter().filter(|e| cam.is_rect_visible(&e.rect)) {
            e.draw(target);
        }
    }
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
