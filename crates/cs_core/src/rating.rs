//! Elo helpers for the orchestrator's ranking-point updates.

/// Expected score of A against B under standard Elo.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Updated rating after a result (`score` is 1.0 for a win, 0.0 for a loss).
pub fn update_rating(rating: f64, expected: f64, score: f64, k: f64) -> i32 {
    (rating + k * (score - expected)).round() as i32
}

pub const DEFAULT_K: f64 = 32.0;
