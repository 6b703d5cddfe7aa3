//! The simulation orchestrator.
//!
//! `GameEngine` owns the player, the level and the transient projectile/explosion lists, and
//! reports outcomes to a `ScoreStore`. The host drives it: `frame(now_ms)` once per animation
//! frame, then `draw` into whatever `DrawTarget` it renders from.

use glam::Vec2;

use super::collision::Aabb;
use super::freeze::FreezeDebuff;
use super::rng::{streams, Rng};
use super::time::FrameClock;
use crate::api::config::GameConfig;
use crate::api::snapshot::HudSnapshot;
use crate::api::store::{GameState, ScoreStore, SCORE_CEILING};
use crate::api::types::{AudioSink, SoundEvent};
use crate::components::coin::CoinTier;
use crate::components::explosion::Explosion;
use crate::components::player::{Facing, Player};
use crate::components::projectile::Projectile;
use crate::input::queue::{InputEvent, InputQueue};
use crate::input::state::InputState;
use crate::renderer::{Color, DrawTarget};
use crate::world::level::Level;

pub struct GameEngine<S: ScoreStore> {
    config: GameConfig,
    player: Player,
    level: Level,
    projectiles: Vec<Projectile>,
    explosions: Vec<Explosion>,
    store: S,
    input: InputQueue,
    input_state: InputState,
    rng: Rng,
    sounds: Vec<SoundEvent>,
    freeze: FreezeDebuff,
    clock: FrameClock,
    running: bool,
    shoot_was_down: bool,
}

/// Add `points`, keeping the total at or under the ceiling.
fn award<S: ScoreStore>(store: &mut S, points: u64) {
    let score = store.score();
    let capped = score.saturating_add(points).min(SCORE_CEILING);
    store.add_score(capped.saturating_sub(score));
}

impl<S: ScoreStore> GameEngine<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        let viewport = Vec2::new(config.viewport_width, config.viewport_height);
        Self {
            player: Player::new(config.player.clone()),
            level: Level::new(config.world.clone(), config.seed, viewport),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            store,
            input: InputQueue::new(),
            input_state: InputState::new(),
            rng: Rng::for_stream(config.seed, streams::ENTITIES),
            sounds: Vec::new(),
            freeze: FreezeDebuff::new(),
            clock: FrameClock::new(config.max_dt),
            running: false,
            shoot_was_down: false,
            config,
        }
    }

    // ---- Lifecycle ----

    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.clock.anchor(now_ms);
        log::info!("Game engine started");
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.clock.release();
        log::info!("Game engine stopped");
    }

    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            self.clock.release();
            log::info!("Game engine paused");
        }
    }

    /// Resume ticking. The elapsed-time baseline restarts at `now_ms`.
    pub fn resume(&mut self, now_ms: f64) {
        if !self.running {
            self.running = true;
            self.clock.anchor(now_ms);
            log::info!("Game engine resumed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rebuild the world for a new run. The store is reset by its owner.
    pub fn restart(&mut self) {
        self.freeze.clear(&mut self.player);
        self.player.hard_reset();
        self.level.reset();
        self.projectiles.clear();
        self.explosions.clear();
        self.input_state.clear();
        self.shoot_was_down = false;
        self.sounds.clear();
        log::info!("Game restarted");
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.level.resize(Vec2::new(width, height));
    }

    // ---- Input ----

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn input_state_mut(&mut self) -> &mut InputState {
        &mut self.input_state
    }

    // ---- Simulation ----

    /// One animation frame. Returns false while stopped or paused.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        let dt = self.clock.tick(now_ms);
        self.update(dt);
        true
    }

    /// Advance the simulation by `dt` seconds. Does nothing outside `GameState::Playing`.
    pub fn update(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.input_state.apply(&event);
        }
        if self.store.state() != GameState::Playing {
            return;
        }

        self.freeze.tick(dt, &mut self.player);
        self.store.update_game_time(dt);
        self.input_state.tick(dt);
        self.level.update_difficulty(self.store.score());

        if let Some(kind) = self.input_state.take_weapon_request() {
            self.player.switch_weapon(kind);
        }

        let events = self.player.update(
            dt,
            &self.input_state,
            &self.level.platforms,
            self.config.viewport_height,
        );
        if events.jumped {
            self.sounds.play(SoundEvent::Jump);
        }

        if !self.player.alive {
            self.store.lose_life();
            self.sounds.play(SoundEvent::Dead);
            if self.store.lives() == 0 {
                self.end_run();
                return;
            }
            self.freeze.clear(&mut self.player);
            self.player.reset();
        }

        if self.update_entities(dt) {
            return;
        }

        self.update_projectiles(dt);

        for explosion in &mut self.explosions {
            explosion.update(dt);
        }
        self.explosions.retain(|e| e.active);

        self.level.update_camera(self.player.position());
        self.level.update_clouds(dt);

        let shoot_down = self.input_state.shoot();
        if shoot_down && !self.shoot_was_down {
            self.player_shoot();
        }
        self.shoot_was_down = shoot_down;
    }

    fn end_run(&mut self) {
        self.store.game_over();
        log::info!("Game over with score {}", self.store.score());
    }

    /// Pickups and enemies against the player, in list order. Returns true if the run ended.
    fn update_entities(&mut self, dt: f32) -> bool {
        let player_box = self.player.rect;
        let camera_x = self.level.camera().x;

        for coin in &mut self.level.coins {
            if coin.update(dt, &player_box) {
                award(&mut self.store, coin.tier.value());
                let sound = if coin.tier == CoinTier::Bagor {
                    SoundEvent::Bagor
                } else {
                    SoundEvent::Success
                };
                self.sounds.play(sound);
            }
        }

        for enemy in &mut self.level.enemies {
            if !enemy.update(dt, &player_box, camera_x, &mut self.rng) {
                continue;
            }
            if !self.player.take_damage() {
                continue;
            }
            self.store.lose_life();
            self.sounds.play(SoundEvent::Hit);
            if enemy.kind.freezes() {
                self.freeze.trigger(&mut self.player);
            }
            if self.store.lives() == 0 {
                self.sounds.play(SoundEvent::Dead);
                self.end_run();
                return true;
            }
        }

        for power_up in &mut self.level.power_ups {
            if power_up.update(dt, &player_box, camera_x) {
                award(&mut self.store, power_up.score());
                self.sounds.play(SoundEvent::Success);
            }
        }

        for heart in &mut self.level.hearts {
            if heart.update(dt, &player_box) {
                self.store.gain_life();
                self.sounds.play(SoundEvent::Success);
            }
        }

        for mystery_box in &mut self.level.mystery_boxes {
            if let Some(weapon) = mystery_box.update(dt, &player_box) {
                let amount = self.player.obtain_weapon(weapon, &mut self.rng);
                log::debug!("mystery box: +{} {}", amount, weapon.label());
                self.sounds.play(SoundEvent::Success);
            }
        }
        false
    }

    /// Region outside which projectiles are dropped.
    fn projectile_bounds(&self) -> Aabb {
        let cam = self.level.camera();
        let reach = self.config.world.cleanup_distance;
        Aabb::new(
            cam.x - reach,
            cam.y - cam.height,
            cam.width + 2.0 * reach,
            2.0 * cam.height + self.config.player.fall_margin,
        )
    }

    fn update_projectiles(&mut self, dt: f32) {
        let bounds = self.projectile_bounds();
        let ground_y = self.config.world.ground_y;
        for projectile in &mut self.projectiles {
            let detonation =
                projectile.update(dt, &mut self.level.enemies, &mut self.sounds, ground_y, &bounds);
            if let Some(at) = detonation {
                let (blast, kills) = Explosion::detonate(at, &mut self.level.enemies, &mut self.sounds);
                self.sounds.play(SoundEvent::Explosion);
                self.explosions.push(blast);
                if kills > 0 {
                    log::debug!("blast at ({:.0}, {:.0}) killed {}", at.x, at.y, kills);
                }
            }
        }
        self.projectiles.retain(|p| p.active);
    }

    /// Fire the armed weapon toward the facing direction. No-op without ammo.
    pub fn player_shoot(&mut self) -> bool {
        let Some(kind) = self.player.current_weapon() else {
            return false;
        };
        if !self.player.use_weapon() {
            return false;
        }

        let rect = self.player.rect;
        let facing = self.player.facing();
        let muzzle_x = match facing {
            Facing::Right => rect.right(),
            Facing::Left => rect.left(),
        };
        self.projectiles.push(Projectile::new(
            Vec2::new(muzzle_x, rect.center().y),
            facing.sign(),
            kind,
        ));
        self.sounds.play(SoundEvent::Shoot);
        self.player.settle_weapon();
        true
    }

    // ---- Output ----

    /// Render the current state back to front.
    pub fn draw(&self, target: &mut dyn DrawTarget, width: f32, height: f32) {
        target.set_offset(Vec2::ZERO);
        target.clear(Color::SKY);

        self.level.draw(target);
        self.player.draw(target);
        if let Some(kind) = self.player.current_weapon() {
            let rect = self.player.rect;
            let label = format!("{} x{}", kind.label(), self.player.inventory().count(kind));
            target.text(
                Vec2::new(rect.center().x, rect.top() - 10.0),
                &label,
                12.0,
                Color::WHITE,
            );
        }
        for projectile in &self.projectiles {
            projectile.draw(target);
        }
        for explosion in &self.explosions {
            explosion.draw(target);
        }

        if self.freeze.is_active() {
            target.set_offset(Vec2::ZERO);
            target.fill_rect(Vec2::ZERO, Vec2::new(width, height), Color::FREEZE_TINT);
        }
    }

    /// Sound events raised since the last call, in order.
    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }

    pub fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    pub fn snapshot(&self) -> HudSnapshot {
        let inventory = self.player.inventory();
        HudSnapshot {
            state: self.store.state(),
            score: self.store.score(),
            lives: self.store.lives(),
            high_score: self.store.high_score(),
            game_time: self.store.game_time(),
            current_weapon: self.player.current_weapon(),
            gun_ammo: inventory.gun,
            bomb_ammo: inventory.bomb,
            frozen: self.freeze.is_active(),
            difficulty: self.level.difficulty(),
        }
    }

    // ---- Accessors ----

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn freeze(&self) -> &FreezeDebuff {
        &self.freeze
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::store::SessionStore;
    use crate::components::coin::Coin;
    use crate::components::enemy::{Enemy, EnemyKind};
    use crate::components::heart::Heart;
    use crate::components::mystery_box::MysteryBox;
    use crate::components::power_up::PowerUp;
    use crate::components::weapon::WeaponKind;
    use crate::input::state::Action;
    use crate::renderer::{DrawCommand, DrawList};

    const DT: f32 = 0.016;

    fn engine() -> GameEngine<SessionStore> {
        engine_with_lives(3)
    }

    fn engine_with_lives(lives: u32) -> GameEngine<SessionStore> {
        let mut store = SessionStore::new(lives);
        store.start_game();
        GameEngine::new(GameConfig::default(), store)
    }

    /// Engine with only terrain left in the world.
    fn quiet_engine() -> GameEngine<SessionStore> {
        clear_entities(engine())
    }

    fn clear_entities(mut engine: GameEngine<SessionStore>) -> GameEngine<SessionStore> {
        let level = engine.level_mut();
        level.coins.clear();
        level.enemies.clear();
        level.power_ups.clear();
        level.hearts.clear();
        level.mystery_boxes.clear();
        engine
    }

    fn landed(mut engine: GameEngine<SessionStore>) -> GameEngine<SessionStore> {
        for _ in 0..63 {
            engine.update(DT);
        }
        assert!(engine.player().grounded);
        engine
    }

    #[test]
    fn falls_onto_spawn_ground() {
        let mut engine = engine();
        let start_y = engine.player().position().y;
        for _ in 0..63 {
            engine.update(DT);
        }
        let player = engine.player();
        assert!(player.position().y > start_y);
        assert!(player.grounded);
        assert_eq!(player.vel.y, 0.0);
        assert!((player.rect.bottom() - 500.0).abs() < 1e-3);
    }

    #[test]
    fn shoot_without_ammo_is_noop() {
        let mut engine = quiet_engine();
        engine.player_mut().inventory_mut().add(WeaponKind::Bomb, 2);
        engine.player_mut().set_current_weapon(Some(WeaponKind::Gun));

        assert!(!engine.player_shoot());
        assert!(engine.projectiles().is_empty());
        assert_eq!(engine.player().inventory().gun, 0);
        assert_eq!(engine.player().inventory().bomb, 2);
        assert!(engine.sounds().is_empty());
    }

    #[test]
    fn last_round_switches_weapon() {
        let mut engine = quiet_engine();
        engine.player_mut().inventory_mut().add(WeaponKind::Gun, 1);
        engine.player_mut().inventory_mut().add(WeaponKind::Bomb, 1);
        engine.player_mut().set_current_weapon(Some(WeaponKind::Gun));

        assert!(engine.player_shoot());
        assert_eq!(engine.projectiles().len(), 1);
        assert_eq!(engine.player().current_weapon(), Some(WeaponKind::Bomb));
        assert!(engine.player_shoot());
        assert_eq!(engine.player().current_weapon(), None);
        assert_eq!(engine.sounds(), &[SoundEvent::Shoot, SoundEvent::Shoot]);
    }

    #[test]
    fn shoot_input_is_edge_triggered() {
        let mut engine = landed(quiet_engine());
        engine.player_mut().inventory_mut().add(WeaponKind::Gun, 5);
        engine.player_mut().set_current_weapon(Some(WeaponKind::Gun));

        engine.input_state_mut().set(Action::Shoot, true);
        for _ in 0..5 {
            engine.update(DT);
        }
        assert_eq!(engine.player().inventory().gun, 4);

        engine.input_state_mut().set(Action::Shoot, false);
        engine.update(DT);
        engine.input_state_mut().set(Action::Shoot, true);
        engine.update(DT);
        assert_eq!(engine.player().inventory().gun, 3);
    }

    #[test]
    fn bagor_coin_awards_exactly_1000() {
        let mut engine = landed(quiet_engine());
        let pos = engine.player().position();
        let before = engine.store().score();
        engine.level_mut().coins.push(Coin::new(pos.x, pos.y, CoinTier::Bagor));
        engine.drain_sounds();

        engine.update(DT);
        assert_eq!(engine.store().score(), before + 1000);
        assert_eq!(engine.sounds(), &[SoundEvent::Bagor]);
    }

    #[test]
    fn coin_award_respects_ceiling() {
        let mut engine = landed(quiet_engine());
        engine.store_mut().add_score(SCORE_CEILING - 10);
        let pos = engine.player().position();
        engine.level_mut().coins.push(Coin::new(pos.x, pos.y, CoinTier::Bagor));
        engine.update(DT);
        assert_eq!(engine.store().score(), SCORE_CEILING);
    }

    #[test]
    fn penguin_hit_freezes_for_two_seconds() {
        let mut engine = landed(quiet_engine());
        let pos = engine.player().position();
        engine
            .level_mut()
            .enemies
            .push(Enemy::new(pos.x + 4.0, pos.y + 20.0, EnemyKind::Penguin));
        engine.drain_sounds();

        engine.update(DT);
        assert_eq!(engine.store().lives(), 2);
        assert_eq!(engine.sounds(), &[SoundEvent::Hit]);
        assert_eq!(engine.player().speed(), 150.0);
        assert!(engine.snapshot().frozen);

        for _ in 0..124 {
            engine.update(DT);
            assert_eq!(engine.player().speed(), 150.0);
        }
        engine.update(DT);
        assert_eq!(engine.player().speed(), 300.0);
        assert!(!engine.freeze().is_active());
    }

    #[test]
    fn heart_grants_a_life() {
        let mut engine = landed(quiet_engine());
        let pos = engine.player().position();
        engine.level_mut().hearts.push(Heart::new(pos.x, pos.y));
        engine.drain_sounds();

        engine.update(DT);
        assert_eq!(engine.store().lives(), 4);
        assert_eq!(engine.sounds(), &[SoundEvent::Success]);

        engine.update(DT);
        assert_eq!(engine.store().lives(), 4);
        assert!(engine.level().hearts.is_empty());
    }

    #[test]
    fn power_up_awards_multiplied_score() {
        let mut engine = landed(quiet_engine());
        let pos = engine.player().position();
        let before = engine.store().score();
        engine.level_mut().power_ups.push(PowerUp::new(pos.x, pos.y, 3));
        engine.drain_sounds();

        engine.update(DT);
        assert_eq!(engine.store().score(), before + 1500);
        assert_eq!(engine.sounds(), &[SoundEvent::Success]);
    }

    #[test]
    fn power_up_award_respects_ceiling() {
        let mut engine = landed(quiet_engine());
        engine.store_mut().add_score(SCORE_CEILING - 100);
        let pos = engine.player().position();
        engine.level_mut().power_ups.push(PowerUp::new(pos.x, pos.y, 10));
        engine.update(DT);
        assert_eq!(engine.store().score(), SCORE_CEILING);
    }

    #[test]
    fn mystery_box_arms_its_weapon() {
        let mut engine = landed(quiet_engine());
        engine.player_mut().inventory_mut().add(WeaponKind::Gun, 3);
        engine.player_mut().set_current_weapon(Some(WeaponKind::Gun));
        let pos = engine.player().position();
        engine
            .level_mut()
            .mystery_boxes
            .push(MysteryBox::new(pos.x, pos.y, WeaponKind::Bomb));
        engine.drain_sounds();

        engine.update(DT);
        let bombs = engine.player().inventory().bomb;
        assert!((1..=5).contains(&bombs), "granted {}", bombs);
        assert_eq!(engine.player().inventory().gun, 3);
        assert_eq!(engine.player().current_weapon(), Some(WeaponKind::Bomb));
        assert_eq!(engine.sounds(), &[SoundEvent::Success]);
        assert_eq!(engine.snapshot().bomb_ammo, bombs);
    }

    #[test]
    fn coin_counts_before_a_fatal_hit() {
        let mut engine = landed(clear_entities(engine_with_lives(1)));
        let pos = engine.player().position();
        engine.level_mut().coins.push(Coin::new(pos.x, pos.y, CoinTier::Regular));
        engine
            .level_mut()
            .enemies
            .push(Enemy::new(pos.x + 4.0, pos.y + 32.0, EnemyKind::Snail));
        engine.drain_sounds();

        engine.update(DT);
        assert_eq!(engine.store().score(), 30);
        assert_eq!(engine.store().lives(), 0);
        assert_eq!(engine.store().state(), GameState::GameOver);
        assert_eq!(
            engine.sounds(),
            &[SoundEvent::Success, SoundEvent::Hit, SoundEvent::Dead]
        );
    }

    #[test]
    fn snail_hit_costs_life_without_freeze() {
        let mut engine = landed(quiet_engine());
        let pos = engine.player().position();
        engine
            .level_mut()
            .enemies
            .push(Enemy::new(pos.x + 4.0, pos.y + 32.0, EnemyKind::Snail));
        engine.update(DT);
        assert_eq!(engine.store().lives(), 2);
        assert!(!engine.freeze().is_active());
        assert_eq!(engine.player().speed(), 300.0);
    }

    #[test]
    fn falling_costs_lives_until_game_over() {
        let mut engine = quiet_engine();
        engine.level_mut().platforms.clear();
        let mut deaths = 0;
        for _ in 0..2000 {
            engine.update(DT);
            deaths += engine
                .drain_sounds()
                .iter()
                .filter(|s| **s == SoundEvent::Dead)
                .count();
            if engine.store().state() == GameState::GameOver {
                break;
            }
        }
        assert_eq!(deaths, 3);
        assert_eq!(engine.store().lives(), 0);
        assert_eq!(engine.store().state(), GameState::GameOver);

        // Frozen in place once the run is over.
        let pos = engine.player().position();
        engine.update(DT);
        assert_eq!(engine.player().position(), pos);
    }

    #[test]
    fn bomb_clears_nearby_enemies() {
        let mut engine = landed(quiet_engine());
        engine.player_mut().inventory_mut().add(WeaponKind::Bomb, 1);
        engine.player_mut().set_current_weapon(Some(WeaponKind::Bomb));
        let pos = engine.player().position();
        // Sits where the bomb comes down.
        engine
            .level_mut()
            .enemies
            .push(Enemy::new(pos.x + 190.0, 484.0, EnemyKind::Snail));

        assert!(engine.player_shoot());
        engine.drain_sounds();
        for _ in 0..120 {
            engine.update(DT);
        }
        assert!(engine.projectiles().is_empty());
        let sounds = engine.sounds();
        assert!(sounds.contains(&SoundEvent::Explosion));
        assert!(sounds.contains(&SoundEvent::DeadMinion));
        assert!(engine.level().enemies.is_empty());
    }

    #[test]
    fn ignores_updates_outside_playing() {
        let mut engine = quiet_engine();
        engine.store_mut().pause_game();
        let pos = engine.player().position();
        engine.update(DT);
        assert_eq!(engine.player().position(), pos);
    }

    #[test]
    fn resume_does_not_jump_time() {
        let mut engine = quiet_engine();
        assert!(!engine.frame(0.0));
        engine.start(0.0);
        assert!(engine.frame(16.0));
        engine.pause();
        assert!(!engine.frame(5_000.0));
        engine.resume(10_000.0);
        engine.frame(10_016.0);
        assert!((engine.store().game_time() - 0.032).abs() < 1e-4);

        // Long stalls are capped.
        engine.frame(20_000.0);
        assert!((engine.store().game_time() - 0.048).abs() < 1e-4);
    }

    #[test]
    fn freeze_tint_drawn_last() {
        let mut engine = landed(quiet_engine());
        let mut list = DrawList::new();
        engine.draw(&mut list, 800.0, 600.0);
        assert!(!matches!(list.commands().last(), Some(DrawCommand::FillRect { color, .. }) if *color == Color::FREEZE_TINT));

        let pos = engine.player().position();
        engine
            .level_mut()
            .enemies
            .push(Enemy::new(pos.x + 4.0, pos.y + 20.0, EnemyKind::Turtle));
        engine.update(DT);
        list.reset();
        engine.draw(&mut list, 800.0, 600.0);
        assert!(matches!(
            list.commands().last(),
            Some(DrawCommand::FillRect { color, w, h, .. }) if *color == Color::FREEZE_TINT && *w == 800.0 && *h == 600.0
        ));
    }

    #[test]
    fn restart_rebuilds_world() {
        let mut engine = landed(quiet_engine());
        engine.player_mut().inventory_mut().add(WeaponKind::Gun, 3);
        engine.restart();
        assert_eq!(engine.player().position(), Vec2::new(100.0, 300.0));
        assert_eq!(engine.player().inventory().gun, 0);
        assert!(engine.level().is_generated(0));
        assert!(!engine.level().enemies.is_empty() || !engine.level().coins.is_empty());
    }
}
