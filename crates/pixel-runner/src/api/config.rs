use serde::{Deserialize, Serialize};

/// Engine configuration. Every field has a default, so a host can send a partial JSON
/// object containing only the values it wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible width in world units.
    pub viewport_width: f32,
    /// Visible height in world units.
    pub viewport_height: f32,
    /// Upper bound for a single frame's dt, in seconds.
    pub max_dt: f32,
    /// Seed for world generation and entity behaviour.
    pub seed: u64,
    /// Lives a fresh run starts with.
    pub starting_lives: u32,
    pub player: PlayerTuning,
    pub world: WorldTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_dt: 0.016,
            seed: 0x5EED_2024,
            starting_lives: 3,
            player: PlayerTuning::default(),
            world: WorldTuning::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Player movement constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal run speed (units/s).
    pub speed: f32,
    /// Initial upward velocity of a grounded jump.
    pub jump_power: f32,
    /// Air jump strength relative to `jump_power`.
    pub double_jump_multiplier: f32,
    pub gravity: f32,
    /// Per-tick horizontal decay while grounded without input.
    pub friction: f32,
    /// Horizontal speed below which friction snaps to zero.
    pub friction_cutoff: f32,
    pub max_jumps: u8,
    pub invincibility_secs: f32,
    /// How close (px) the feet must be to a platform top to count as standing on it.
    pub foot_tolerance: f32,
    /// Distance below the viewport after which a falling player dies.
    pub fall_margin: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn_x: 100.0,
            spawn_y: 300.0,
            width: 32.0,
            height: 48.0,
            speed: 300.0,
            jump_power: 600.0,
            double_jump_multiplier: 1.2,
            gravity: 1500.0,
            friction: 0.8,
            friction_cutoff: 10.0,
            max_jumps: 2,
            invincibility_secs: 2.0,
            foot_tolerance: 4.0,
            fall_margin: 100.0,
        }
    }
}

/// Endless world generation and camera constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub chunk_size: f32,
    /// Chunks kept generated past the camera's right edge.
    pub lookahead_chunks: u32,
    /// Objects further than this behind the camera are purged.
    pub cleanup_distance: f32,
    /// Top surface of ground segments.
    pub ground_y: f32,
    pub ground_height: f32,
    pub camera_vertical_offset: f32,
    pub camera_min_y: f32,
    pub camera_max_y: f32,
    /// Score needed per difficulty level.
    pub difficulty_score_step: f32,
    pub max_difficulty: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            chunk_size: 800.0,
            lookahead_chunks: 3,
            cleanup_distance: 2000.0,
            ground_y: 500.0,
            ground_height: 100.0,
            camera_vertical_offset: 50.0,
            camera_min_y: -200.0,
            camera_max_y: 200.0,
            difficulty_score_step: 50_000.0,
            max_difficulty: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "player": { "speed": 250.0 } }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.player.speed, 250.0);
        assert_eq!(config.player.jump_power, 600.0);
        assert_eq!(config.world.chunk_size, 800.0);
        assert_eq!(config.viewport_height, 600.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }
}
