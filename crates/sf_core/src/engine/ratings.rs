//! Team rating derivation.
//!
//! Ratings are computed once per team at match start and never
//! recomputed mid-match; in-play effects go through the modifier
//! ledger instead.

use serde::{Deserialize, Serialize};

use crate::models::{Role, StatAxis, Team};

pub const RATING_MIN: f64 = 4.0;
pub const RATING_MAX: f64 = 20.0;

/// Aggregate team ratings, each clamped to `[RATING_MIN, RATING_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamRatings {
    pub attack: f64,
    pub defense: f64,
    pub goalkeeping: f64,
}

/// Derive ratings from a roster. Pure and deterministic.
///
/// - Goalkeeping: first listed keeper's stat, 8 with no keeper.
/// - Defense: 0.7 x defender average + 0.3 x midfielder average.
/// - Attack: 0.7 x attacker average + 0.3 x midfielder average.
///
/// The average of an empty group is 0; the 9.0 fallback applies only
/// when both groups of a line are empty.
pub fn compute_ratings(team: &Team) -> TeamRatings {
    let goalkeeping = team
        .in_role(Role::Goalkeeper)
        .next()
        .map(|gk| gk.stat(StatAxis::Goalkeeping, 10.0))
        .unwrap_or(8.0)
        .clamp(RATING_MIN, RATING_MAX);

    let defense = line_rating(
        team.in_role(Role::Defender).map(|p| p.stat(StatAxis::Defense, 10.0)),
        team.in_role(Role::Midfielder).map(|p| p.stat(StatAxis::Defense, 10.0)),
    );

    let attack = line_rating(
        team.in_role(Role::Attacker).map(|p| p.stat(StatAxis::Attack, 10.0)),
        team.in_role(Role::Midfielder).map(|p| p.stat(StatAxis::Attack, 10.0)),
    );

    TeamRatings { attack, defense, goalkeeping }
}

fn line_rating(
    primary: impl Iterator<Item = f64>,
    support: impl Iterator<Item = f64>,
) -> f64 {
    let primary: Vec<f64> = primary.collect();
    let support: Vec<f64> = support.collect();
    if primary.is_empty() && support.is_empty() {
        return 9.0;
    }
    (avg(&primary) * 0.7 + avg(&support) * 0.3).clamp(RATING_MIN, RATING_MAX)
}

fn avg(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
