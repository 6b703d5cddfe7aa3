pub mod animation;
pub mod coin;
pub mod decoration;
pub mod enemy;
pub mod explosion;
pub mod heart;
pub mod mystery_box;
pub mod platform;
pub mod player;
pub mod power_up;
pub mod projectile;
pub mod weapon;
