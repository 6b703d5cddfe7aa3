pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod world;

// Re-export key types at crate root for convenience
pub use api::config::{GameConfig, PlayerTuning, WorldTuning};
pub use api::leaderboard::{HighScores, LeaderboardEntry};
pub use api::snapshot::HudSnapshot;
pub use api::store::{GameState, ScoreStore, SessionStore, SCORE_CEILING};
pub use api::types::{AudioSink, SoundEvent};
pub use assets::manifest::AssetManifest;
pub use assets::registry::AssetRegistry;
pub use components::weapon::{Inventory, WeaponKind};
pub use core::engine::GameEngine;
pub use input::queue::{InputEvent, InputQueue};
pub use input::state::{Action, InputState};
pub use renderer::{Camera2D, Color, DrawCommand, DrawList, DrawTarget};
pub use world::level::Level;

#[cfg(feature = "vectors")]
pub use systems::vector::{TextLabel, VectorCanvas, VectorVertex};
