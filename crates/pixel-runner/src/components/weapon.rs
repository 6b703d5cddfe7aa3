use serde::Serialize;

use crate::core::rng::Rng;

/// Weapon kinds the player can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Gun,
    Bomb,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 2] = [WeaponKind::Gun, WeaponKind::Bomb];

    /// The other weapon, used for auto-switching when one runs dry.
    pub fn other(self) -> Self {
        match self {
            WeaponKind::Gun => WeaponKind::Bomb,
            WeaponKind::Bomb => WeaponKind::Gun,
        }
    }

    /// Weapon bound to a 1-based selection slot.
    pub fn from_slot(slot: u32) -> Option<Self> {
        match slot {
            1 => Some(WeaponKind::Gun),
            2 => Some(WeaponKind::Bomb),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeaponKind::Gun => "GUN",
            WeaponKind::Bomb => "BOMB",
        }
    }

    pub fn random(rng: &mut Rng) -> Self {
        if rng.chance(0.5) {
            WeaponKind::Gun
        } else {
            WeaponKind::Bomb
        }
    }
}

/// Ammunition per weapon kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Inventory {
    pub gun: u32,
    pub bomb: u32,
}

impl Inventory {
    pub fn count(&self, kind: WeaponKind) -> u32 {
        match kind {
            WeaponKind::Gun => self.gun,
            WeaponKind::Bomb => self.bomb,
        }
    }

    pub fn add(&mut self, kind: WeaponKind, amount: u32) {
        match kind {
            WeaponKind::Gun => self.gun = self.gun.saturating_add(amount),
            WeaponKind::Bomb => self.bomb = self.bomb.saturating_add(amount),
        }
    }

    /// Remove one unit. Returns false when the slot is empty.
    pub fn take_one(&mut self, kind: WeaponKind) -> bool {
        let slot = match kind {
            WeaponKind::Gun => &mut self.gun,
            WeaponKind::Bomb => &mut self.bomb,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_one_refuses_empty_slot() {
        let mut inv = Inventory { gun: 1, bomb: 0 };
        assert!(inv.take_one(WeaponKind::Gun));
        assert!(!inv.take_one(WeaponKind::Gun));
        assert!(!inv.take_one(WeaponKind::Bomb));
        assert_eq!(inv, Inventory::default());
    }

    #[test]
    fn slots_map_to_weapons() {
        assert_eq!(WeaponKind::from_slot(1), Some(WeaponKind::Gun));
        assert_eq!(WeaponKind::from_slot(2), Some(WeaponKind::Bomb));
        assert_eq!(WeaponKind::from_slot(3), None);
        assert_eq!(WeaponKind::Gun.other(), WeaponKind::Bomb);
    }
}
