use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Map metadata consumed by the round resolver.
///
/// `ct_bias` is the defender-favorability scalar in `[0, 1]`; 0.5 is neutral.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapInfo {
    pub id: String,
    pub display_name: String,
    pub ct_bias: f32,
}

impl MapInfo {
    fn new(id: &str, display_name: &str, ct_bias: f32) -> Self {
        Self { id: id.to_string(), display_name: display_name.to_string(), ct_bias }
    }

    /// Neutral stand-in for ids the pool does not know.
    pub fn neutral(id: &str) -> Self {
        Self::new(id, "Unknown Map", NEUTRAL_CT_BIAS)
    }
}

pub const NEUTRAL_CT_BIAS: f32 = 0.5;

/// The active-duty pool. Bias values follow the community's CT/T-sided
/// reading of each map.
static MAP_POOL: Lazy<Vec<MapInfo>> = Lazy::new(|| {
    vec![
        MapInfo::new("mirage", "Mirage", 0.52),
        MapInfo::new("inferno", "Inferno", 0.54),
        MapInfo::new("nuke", "Nuke", 0.58),
        MapInfo::new("ancient", "Ancient", 0.53),
        MapInfo::new("anubis", "Anubis", 0.48),
        MapInfo::new("vertigo", "Vertigo", 0.51),
        MapInfo::new("dust2", "Dust II", 0.47),
    ]
});

/// Look up a map by id, falling back to a neutral map for unknown ids.
pub fn lookup(map_id: &str) -> MapInfo {
    match MAP_POOL.iter().find(|m| m.id == map_id) {
        Some(map) => map.clone(),
        None => {
            debug!("Unknown map id '{}', using neutral fallback", map_id);
            MapInfo::neutral(map_id)
        }
    }
}

/// Ids of every map in the active pool, in pool order.
pub fn pool_ids() -> Vec<&'static str> {
    MAP_POOL.iter().map(|m| m.id.as_str()).collect()
}
