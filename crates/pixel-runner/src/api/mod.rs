pub mod config;
pub mod leaderboard;
pub mod snapshot;
pub mod store;
pub mod types;
