//! Data boundary: validated roster loading and random squad generation.

pub mod generator;
pub mod loader;

pub use generator::{
    generate_map_pool, generate_player, generate_team, tier_economy, PlayerIdentity,
};
pub use loader::{load_teams, DataError};
