pub mod collision;
pub mod engine;
pub mod freeze;
pub mod rng;
pub mod time;
