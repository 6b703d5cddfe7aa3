//! Score/life bookkeeping the engine reports into.
//!
//! The engine only ever talks to `ScoreStore`; `SessionStore` is the in-memory implementation
//! the web runner uses. Durable persistence of the high score is left to the host.

use serde::Serialize;

/// Maximum score a run can reach.
pub const SCORE_CEILING: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

pub trait ScoreStore {
    fn score(&self) -> u64;
    fn lives(&self) -> u32;
    fn state(&self) -> GameState;

    /// Add to the score. The total saturates at `SCORE_CEILING`.
    fn add_score(&mut self, delta: u64);
    fn lose_life(&mut self);
    fn gain_life(&mut self);
    fn game_over(&mut self);
    fn update_game_time(&mut self, dt: f32);

    /// Best score seen so far, for display.
    fn high_score(&self) -> u64 {
        self.score()
    }

    /// Seconds of play in the current run.
    fn game_time(&self) -> f32 {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    score: u64,
    lives: u32,
    starting_lives: u32,
    state: GameState,
    high_score: u64,
    game_time: f32,
}

impl SessionStore {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            starting_lives,
            state: GameState::Menu,
            high_score: 0,
            game_time: 0.0,
        }
    }

    /// Seed the high score loaded by the host from durable storage.
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score.min(SCORE_CEILING);
        self
    }

    fn reset_run(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.game_time = 0.0;
    }

    pub fn start_game(&mut self) {
        self.reset_run();
        self.state = GameState::Playing;
    }

    pub fn pause_game(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
        }
    }

    pub fn resume_game(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
        }
    }

    pub fn restart_game(&mut self) {
        self.start_game();
    }

    pub fn go_to_menu(&mut self) {
        self.reset_run();
        self.state = GameState::Menu;
    }

    /// Raise the high score to a value loaded after construction.
    pub fn set_high_score(&mut self, high_score: u64) {
        self.high_score = self.high_score.max(high_score.min(SCORE_CEILING));
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ScoreStore for SessionStore {
    fn score(&self) -> u64 {
        self.score
    }

    fn lives(&self) -> u32 {
        self.lives
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn add_score(&mut self, delta: u64) {
        self.score = self.score.saturating_add(delta).min(SCORE_CEILING);
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    fn gain_life(&mut self) {
        self.lives = self.lives.saturating_add(1);
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("new high score {}", self.high_score);
        }
    }

    fn update_game_time(&mut self, dt: f32) {
        if self.state == GameState::Playing {
            self.game_time += dt;
        }
    }

    fn high_score(&self) -> u64 {
        self.high_score
    }

    fn game_time(&self) -> f32 {
        self.game_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_never_exceeds_ceiling() {
        let mut store = SessionStore::default();
        store.add_score(SCORE_CEILING - 10);
        store.add_score(1000);
        assert_eq!(store.score(), SCORE_CEILING);
        store.add_score(u64::MAX);
        assert_eq!(store.score(), SCORE_CEILING);
    }

    #[test]
    fn lives_floor_at_zero() {
        let mut store = SessionStore::new(1);
        store.lose_life();
        store.lose_life();
        assert_eq!(store.lives(), 0);
        store.gain_life();
        assert_eq!(store.lives(), 1);
    }

    #[test]
    fn state_machine() {
        let mut store = SessionStore::default();
        assert_eq!(store.state(), GameState::Menu);
        store.pause_game();
        assert_eq!(store.state(), GameState::Menu);

        store.start_game();
        assert_eq!(store.state(), GameState::Playing);
        store.pause_game();
        assert_eq!(store.state(), GameState::Paused);
        store.resume_game();
        assert_eq!(store.state(), GameState::Playing);

        store.add_score(500);
        store.game_over();
        assert_eq!(store.state(), GameState::GameOver);
        assert_eq!(store.high_score(), 500);

        store.restart_game();
        assert_eq!(store.state(), GameState::Playing);
        assert_eq!(store.score(), 0);
        assert_eq!(store.lives(), 3);
        assert_eq!(store.high_score(), 500);
    }

    #[test]
    fn lower_score_keeps_high_score() {
        let mut store = SessionStore::default().with_high_score(2000);
        store.start_game();
        store.add_score(100);
        store.game_over();
        assert_eq!(store.high_score(), 2000);
    }

    #[test]
    fn game_time_only_advances_while_playing() {
        let mut store = SessionStore::default();
        store.update_game_time(1.0);
        assert_eq!(store.game_time(), 0.0);
        store.start_game();
        store.update_game_time(0.5);
        store.update_game_time(0.25);
        assert!((store.game_time() - 0.75).abs() < 1e-6);
    }
}
