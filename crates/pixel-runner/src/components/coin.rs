use glam::Vec2;

use super::animation::{Bob, FrameCycle};
use crate::core::collision::{check_collision, Aabb, Bounded};
use crate::core::rng::Rng;
use crate::renderer::{Color, DrawTarget};

/// Coin rarity. The 1000-point `Bagor` coin has its own jingle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinTier {
    Regular,
    Gold,
    Silver,
    Bagor,
}

impl CoinTier {
    const ALL: [CoinTier; 4] = [CoinTier::Regular, CoinTier::Gold, CoinTier::Silver, CoinTier::Bagor];
    const WEIGHTS: [f32; 4] = [80.0, 10.0, 9.0, 1.0];

    pub fn value(self) -> u64 {
        match self {
            CoinTier::Regular => 30,
            CoinTier::Gold => 100,
            CoinTier::Silver => 50,
            CoinTier::Bagor => 1000,
        }
    }

    pub fn random(rng: &mut Rng) -> Self {
        Self::ALL[rng.weighted(&Self::WEIGHTS)]
    }

    fn colors(self) -> (Color, Color) {
        match self {
            CoinTier::Regular => (Color::hex(0xFCDC00), Color::hex(0xFFD700)),
            CoinTier::Gold => (Color::hex(0xFFB300), Color::hex(0xFFC83D)),
            CoinTier::Silver => (Color::hex(0xA8A9AD), Color::hex(0xD9D9D9)),
            CoinTier::Bagor => (Color::hex(0x8A2BE2), Color::hex(0xDA70D6)),
        }
    }

    fn sprite(self) -> &'static str {
        match self {
            CoinTier::Regular => "coin",
            CoinTier::Gold => "coin_gold",
            CoinTier::Silver => "coin_silver",
            CoinTier::Bagor => "coin_bagor",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Coin {
    pub rect: Aabb,
    pub tier: CoinTier,
    pub collected: bool,
    anim: FrameCycle,
    bob: Bob,
}

impl Coin {
    pub const SIZE: f32 = 16.0;

    pub fn new(x: f32, y: f32, tier: CoinTier) -> Self {
        Self {
            rect: Aabb::new(x, y, Self::SIZE, Self::SIZE),
            tier,
            collected: false,
            anim: FrameCycle::new(0.15, 8),
            bob: Bob::new(3.0, 3.0),
        }
    }

    /// Returns true on the tick the player picks it up.
    pub fn update(&mut self, dt: f32, player: &Aabb) -> bool {
        if self.collected {
            return false;
        }
        self.anim.tick(dt);
        self.bob.tick(dt);
        if check_collision(&self.rect, player) {
            self.collected = true;
            return true;
        }
        false
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if self.collected {
            return;
        }
        let pos = self.rect.pos + Vec2::new(0.0, self.bob.offset());
        if target.sprite(self.tier.sprite(), pos, self.rect.size, 1.0) {
            return;
        }

        // Spin: squash horizontally with the frame phase.
        let phase = self.anim.frame() as f32 / 8.0;
        let scale_x = (phase * std::f32::consts::TAU).cos().abs();
        let width = Self::SIZE * scale_x;
        let center = pos + Vec2::splat(Self::SIZE / 2.0);
        let (outer, inner) = self.tier.colors();

        let origin = Vec2::new(center.x - width / 2.0, pos.y);
        target.fill_rect(origin, Vec2::new(width, Self::SIZE), outer);
        if width > 4.0 {
            target.fill_rect(origin + Vec2::splat(2.0), Vec2::new(width - 4.0, Self::SIZE - 4.0), inner);
        }
        if scale_x > 0.3 {
            target.fill_rect(center - Vec2::new(2.0 * scale_x, 6.0), Vec2::new(4.0 * scale_x, 12.0), outer);
            target.fill_rect(center - Vec2::new(6.0 * scale_x, 2.0), Vec2::new(12.0 * scale_x, 4.0), outer);
        }
        target.stroke_rect(origin, Vec2::new(width, Self::SIZE), 1.0, Color::BLACK);
    }
}

impl Bounded for Coin {
    fn bounds(&self) -> Aabb {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_values() {
        assert_eq!(CoinTier::Regular.value(), 30);
        assert_eq!(CoinTier::Silver.value(), 50);
        assert_eq!(CoinTier::Gold.value(), 100);
        assert_eq!(CoinTier::Bagor.value(), 1000);
    }

    #[test]
    fn regular_coins_dominate() {
        let mut rng = Rng::new(42);
        let regular = (0..10_000)
            .filter(|_| CoinTier::random(&mut rng) == CoinTier::Regular)
            .count();
        assert!((7_500..8_500).contains(&regular), "regular = {}", regular);
    }

    #[test]
    fn collected_once() {
        let mut coin = Coin::new(10.0, 10.0, CoinTier::Regular);
        let player = Aabb::new(0.0, 0.0, 32.0, 48.0);
        assert!(coin.update(0.016, &player));
        assert!(coin.collected);
        assert!(!coin.update(0.016, &player));
    }
}
