use serde::Serialize;

use super::store::GameState;
use crate::components::weapon::WeaponKind;

/// Read-only view of the run for the UI, taken between ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudSnapshot {
    pub state: GameState,
    pub score: u64,
    pub lives: u32,
    pub high_score: u64,
    pub game_time: f32,
    pub current_weapon: Option<WeaponKind>,
    pub gun_ammo: u32,
    pub bomb_ammo: u32,
    pub frozen: bool,
    pub difficulty: f32,
}

impl HudSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
