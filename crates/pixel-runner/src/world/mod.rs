pub mod generator;
pub mod level;
