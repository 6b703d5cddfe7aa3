//! Procedural chunk generation.
//!
//! The world is cut into fixed-width chunks. Each chunk is built from its own RNG stream
//! (`Rng::for_chunk`), so the same seed, index and difficulty always produce the same content.
//! Placement that can't find a free spot within `PLACEMENT_ATTEMPTS` is skipped.

use glam::Vec2;

use crate::api::config::WorldTuning;
use crate::components::coin::{Coin, CoinTier};
use crate::components::decoration::{Decoration, DecorationKind};
use crate::components::enemy::{Enemy, EnemyKind};
use crate::components::heart::Heart;
use crate::components::mystery_box::MysteryBox;
use crate::components::platform::{Platform, PlatformKind};
use crate::components::power_up::PowerUp;
use crate::components::weapon::WeaponKind;
use crate::core::collision::{check_collision, Aabb};
use crate::core::rng::Rng;

const PLACEMENT_ATTEMPTS: u32 = 10;
/// Minimum vertical gap between stacked platforms sharing an x-range.
const PLATFORM_CLEARANCE: f32 = 36.0;
const FLOATING_HEIGHT: f32 = 32.0;
const FLOATING_TOP_MIN: f32 = 180.0;
/// Free space kept between the ground line and a floating platform's underside: a standing
/// player (48) plus the stacking clearance, so a jump is never capped by a low ceiling.
const GROUND_HEADROOM: f32 = 48.0 + PLATFORM_CLEARANCE;
const GROUND_MIN: f32 = 200.0;
const GROUND_MAX: f32 = 500.0;
const GAP_MIN: f32 = 60.0;
const GAP_CAP: f32 = 200.0;
/// Width of the ground segment guaranteed under the spawn point.
const SPAWN_GROUND: f32 = 400.0;
/// Enemy-free run-up at the start of the world.
const SAFE_START: f32 = 600.0;
/// Nothing floats over the spawn column in the first chunk.
const SPAWN_CLEARANCE: f32 = 300.0;

/// Everything one chunk contributes to the level.
#[derive(Debug, Default)]
pub struct ChunkContent {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub hearts: Vec<Heart>,
    pub mystery_boxes: Vec<MysteryBox>,
    pub decorations: Vec<Decoration>,
}

pub fn gap_chance(difficulty: f32) -> f32 {
    (0.10 + 0.05 * difficulty).min(0.40)
}

pub fn max_gap(difficulty: f32) -> f32 {
    (100.0 + 10.0 * difficulty).min(GAP_CAP)
}

pub fn floating_platform_count(difficulty: f32) -> u32 {
    3 + (2.0 * difficulty).floor() as u32
}

pub fn coin_count(difficulty: f32) -> u32 {
    5 + difficulty.floor() as u32
}

pub fn enemy_count(difficulty: f32) -> u32 {
    (1.0 + 0.8 * difficulty).floor() as u32
}

fn brick_chance(difficulty: f32) -> f32 {
    (0.3 + 0.02 * difficulty).min(0.6)
}

fn power_up_chance(difficulty: f32) -> f32 {
    (0.10 + 0.02 * difficulty).min(1.0)
}

const HEART_CHANCE: f32 = 0.015;
const MYSTERY_BOX_CHANCE: f32 = 0.5;
const TREE_CHANCE: f32 = 0.5;

struct ChunkBuilder<'a> {
    tuning: &'a WorldTuning,
    rng: Rng,
    index: i32,
    start: f32,
    end: f32,
    difficulty: f32,
    out: ChunkContent,
    /// Indices into `out.platforms` of the ground segments.
    ground: Vec<usize>,
}

/// Build chunk `index` at `difficulty`.
pub fn generate_chunk(index: i32, difficulty: f32, tuning: &WorldTuning, seed: u64) -> ChunkContent {
    let start = index as f32 * tuning.chunk_size;
    let mut builder = ChunkBuilder {
        tuning,
        rng: Rng::for_chunk(seed, index),
        index,
        start,
        end: start + tuning.chunk_size,
        difficulty,
        out: ChunkContent::default(),
        ground: Vec::new(),
    };

    builder.ground();
    builder.floating_platforms();
    builder.coins();
    builder.power_up();
    builder.heart();
    builder.mystery_box();
    builder.enemies();
    builder.trees();

    let out = builder.out;
    log::debug!(
        "chunk {} (difficulty {:.2}): {} platforms, {} coins, {} enemies",
        index,
        difficulty,
        out.platforms.len(),
        out.coins.len(),
        out.enemies.len()
    );
    out
}

impl ChunkBuilder<'_> {
    fn ground_segment(&mut self, x: f32, width: f32) {
        self.ground.push(self.out.platforms.len());
        self.out.platforms.push(Platform::new(
            x,
            self.tuning.ground_y,
            width,
            self.tuning.ground_height,
            PlatformKind::Ground,
        ));
    }

    fn ground(&mut self) {
        let mut x = self.start;
        let mut after_gap = true;
        while x < self.end {
            let remaining = self.end - x;
            if !after_gap && self.rng.chance(gap_chance(self.difficulty)) {
                if let Some(len) = self.gap_length(remaining) {
                    x += len;
                    after_gap = true;
                    continue;
                }
            }

            let mut width = if self.index == 0 && x == self.start {
                SPAWN_GROUND
            } else {
                self.rng.range(GROUND_MIN, GROUND_MAX)
            };
            // Don't leave a sliver too narrow to be either a gap or a platform.
            if remaining - width < GAP_MIN {
                width = remaining;
            }
            self.ground_segment(x, width.min(remaining));
            x += width;
            after_gap = false;
        }
    }

    /// Length of a gap starting `remaining` units before the chunk edge, or `None` when no
    /// legal gap fits. Never leaves a strip of ground narrower than `GAP_MIN` behind it.
    fn gap_length(&mut self, remaining: f32) -> Option<f32> {
        let max = max_gap(self.difficulty).max(GAP_MIN);
        if remaining <= max {
            let len = self.rng.range(GAP_MIN, max);
            // Run to the chunk edge instead.
            return Some(if remaining - len < GAP_MIN { remaining } else { len });
        }
        let upper = max.min(remaining - GAP_MIN);
        if upper < GAP_MIN {
            return None;
        }
        Some(self.rng.range(GAP_MIN, upper))
    }

    /// Lowest top edge a floating platform may have.
    fn floating_top_max(&self) -> f32 {
        (self.tuning.ground_y - GROUND_HEADROOM - FLOATING_HEIGHT).max(FLOATING_TOP_MIN)
    }

    /// Left bound for airborne content.
    fn air_start(&self) -> f32 {
        if self.index == 0 {
            self.start + SPAWN_CLEARANCE
        } else {
            self.start
        }
    }

    fn floating_platforms(&mut self) {
        let min_x = self.air_start();
        let top_max = self.floating_top_max();
        for _ in 0..floating_platform_count(self.difficulty) {
            let placed = (0..PLACEMENT_ATTEMPTS).find_map(|_| {
                let width = 64.0 + 32.0 * self.rng.next_int(5) as f32;
                let x = self.rng.range(min_x, self.end - width);
                let y = self.rng.range(FLOATING_TOP_MIN, top_max);
                let kind = if self.rng.chance(brick_chance(self.difficulty)) {
                    PlatformKind::Brick
                } else {
                    PlatformKind::Wood
                };
                let candidate = Platform::new(x, y, width, FLOATING_HEIGHT, kind);
                self.has_clearance(&candidate.rect).then_some(candidate)
            });
            match placed {
                Some(platform) => self.out.platforms.push(platform),
                None => log::trace!("chunk {}: floating platform skipped", self.index),
            }
        }
    }

    fn has_clearance(&self, candidate: &Aabb) -> bool {
        self.out.platforms.iter().all(|p| {
            if !candidate.overlaps_x(&p.rect) {
                return true;
            }
            let gap = (p.rect.top() - candidate.bottom()).max(candidate.top() - p.rect.bottom());
            gap >= PLATFORM_CLEARANCE
        })
    }

    fn coins(&mut self) {
        if self.out.platforms.is_empty() {
            return;
        }
        for _ in 0..coin_count(self.difficulty) {
            let pick = self.rng.next_int(self.out.platforms.len() as u32) as usize;
            let rect = self.out.platforms[pick].rect;
            let x = self.rng.range(rect.left(), (rect.right() - Coin::SIZE).max(rect.left()));
            let y = rect.top() - Coin::SIZE - self.rng.range(8.0, 48.0);
            let tier = CoinTier::random(&mut self.rng);
            self.out.coins.push(Coin::new(x, y, tier));
        }
    }

    fn power_up(&mut self) {
        if self.rng.chance(power_up_chance(self.difficulty)) {
            let x = self.rng.range(self.air_start().max(self.start + 100.0), self.end - 100.0);
            let y = self.rng.range(250.0, 420.0);
            let multiplier = PowerUp::random_multiplier(&mut self.rng);
            self.out.power_ups.push(PowerUp::new(x, y, multiplier));
        }
    }

    fn heart(&mut self) {
        if self.rng.chance(HEART_CHANCE) {
            let x = self.rng.range(self.start, self.end - 20.0);
            let y = self.rng.range(40.0, 120.0);
            self.out.hearts.push(Heart::new(x, y));
        }
    }

    fn mystery_box(&mut self) {
        if !self.rng.chance(MYSTERY_BOX_CHANCE) {
            return;
        }
        let weapon = WeaponKind::random(&mut self.rng);
        let min_x = self.air_start();
        let placed = (0..PLACEMENT_ATTEMPTS).find_map(|_| {
            let x = self.rng.range(min_x, self.end - MysteryBox::SIZE);
            let y = self.rng.range(250.0, 400.0);
            let candidate = Aabb::new(x, y, MysteryBox::SIZE, MysteryBox::SIZE);
            let blocked = self
                .out
                .platforms
                .iter()
                .any(|p| p.kind != PlatformKind::Ground && check_collision(&candidate, &p.rect));
            (!blocked).then_some(candidate.pos)
        });
        match placed {
            Some(pos) => self.out.mystery_boxes.push(MysteryBox::new(pos.x, pos.y, weapon)),
            None => log::trace!("chunk {}: mystery box skipped", self.index),
        }
    }

    fn enemies(&mut self) {
        let min_x = if self.index == 0 { self.start + SAFE_START } else { self.start };
        for _ in 0..enemy_count(self.difficulty) {
            let kind = EnemyKind::random(&mut self.rng);
            let size = kind.size();
            let x = self.rng.range(min_x, self.end - size.x);
            let pos = if kind.flies() {
                Some(Vec2::new(x, self.rng.range(250.0, 400.0)))
            } else {
                self.ground_spot(x, size.x, min_x)
                    .map(|x| Vec2::new(x, self.tuning.ground_y - size.y))
            };
            if let Some(pos) = pos {
                self.out.enemies.push(Enemy::new(pos.x, pos.y, kind));
            }
        }
    }

    /// `x` if it lies on a ground segment, otherwise a spot on a random segment right of `min_x`.
    fn ground_spot(&mut self, x: f32, width: f32, min_x: f32) -> Option<f32> {
        let segments: Vec<Aabb> = self
            .ground
            .iter()
            .map(|&i| self.out.platforms[i].rect)
            .filter(|r| r.size.x >= width && r.right() - width > min_x)
            .collect();
        if segments.iter().any(|r| x >= r.left() && x + width <= r.right()) {
            return Some(x);
        }
        if segments.is_empty() {
            return None;
        }
        let seg = segments[self.rng.next_int(segments.len() as u32) as usize];
        let lo = seg.left().max(min_x);
        Some(self.rng.range(lo, seg.right() - width))
    }

    fn trees(&mut self) {
        for i in 0..self.ground.len() {
            if !self.rng.chance(TREE_CHANCE) {
                continue;
            }
            let seg = self.out.platforms[self.ground[i]].rect;
            let kind = DecorationKind::ALL[self.rng.weighted(&[60.0, 15.0, 15.0, 10.0])];
            let x = self.rng.range(seg.left() + 20.0, seg.right() - 20.0);
            let size = self.rng.range(0.8, 1.3);
            self.out
                .decorations
                .push(Decoration::on_ground(x, seg.top(), kind, size));
        }
    }
}
