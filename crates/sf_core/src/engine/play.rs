//! Per-play stochastic resolution.
//!
//! One play is at most one scoring attempt: pick the attacking side by
//! relative weight, roll for a chance, and if one occurs roll for the
//! conversion. Every Bernoulli test consumes its own RNG draw.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::modifiers::{ModifierLedger, Side};
use super::ratings::TeamRatings;

pub const EFFECTIVE_DEFENSE_MIN: f64 = 2.0;
pub const EFFECTIVE_DEFENSE_MAX: f64 = 24.0;
pub const CHANCE_PROB_MIN: f64 = 0.15;
pub const CHANCE_PROB_MAX: f64 = 0.85;
pub const CONVERSION_PROB_MIN: f64 = 0.06;
pub const CONVERSION_PROB_MAX: f64 = 0.52;

/// Converts the small per-event defensive drift (e.g. -0.12) into a
/// rating-scale effect (about -2.4).
const DEFENSE_ADJUST_SCALE: f64 = 20.0;

/// Running score, home then away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    fn add(&mut self, side: Side) {
        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayResult {
    Goal,
    MissedChance,
    NoDanger,
}

/// What a single resolved play produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub attacker: Side,
    pub result: PlayResult,
    pub log_line: String,
}

pub fn effective_defense(rating: f64, adjustment: f64) -> f64 {
    (rating + adjustment * DEFENSE_ADJUST_SCALE)
        .clamp(EFFECTIVE_DEFENSE_MIN, EFFECTIVE_DEFENSE_MAX)
}

pub fn chance_probability(attack: f64, opponent_effective_defense: f64) -> f64 {
    (0.50 + 0.30 * (attack - opponent_effective_defense) / 20.0)
        .clamp(CHANCE_PROB_MIN, CHANCE_PROB_MAX)
}

/// Conversion probability for the attacking side. The home baseline is
/// slightly higher (0.28 vs 0.26); a strong opposing keeper drags the
/// probability down.
pub fn conversion_probability(attacker: Side, opponent_goalkeeping: f64, bonus: f64) -> f64 {
    let base = match attacker {
        Side::Home => 0.28,
        Side::Away => 0.26,
    };
    let gk_penalty = -0.20 * (opponent_goalkeeping - 10.0) / 10.0;
    (base + gk_penalty + bonus).clamp(CONVERSION_PROB_MIN, CONVERSION_PROB_MAX)
}

/// Resolve one play, mutating score and ledger. The attacking side's
/// next-chance bonus is consumed whenever its conversion probability is
/// computed, goal or miss.
pub fn resolve_play<R: Rng>(
    play_index: u32,
    home: &TeamRatings,
    away: &TeamRatings,
    ledger: &mut ModifierLedger,
    score: &mut Score,
    rng: &mut R,
) -> PlayOutcome {
    let def_home = effective_defense(home.defense, ledger.defense_adjustment(Side::Home));
    let def_away = effective_defense(away.defense, ledger.defense_adjustment(Side::Away));
    let p_home = chance_probability(home.attack, def_away);
    let p_away = chance_probability(away.attack, def_home);

    // Single relative-weight draw, not two independent coin flips.
    let attacker = if rng.gen::<f64>() < p_home / (p_home + p_away) {
        Side::Home
    } else {
        Side::Away
    };
    let (opponent_ratings, p_chance) = match attacker {
        Side::Home => (away, p_home),
        Side::Away => (home, p_away),
    };

    let mut line = format!("▶️ Play {play_index}: {} attack", attacker.tag());
    let result = if rng.gen::<f64>() < p_chance {
        let bonus = ledger.consume_next_chance_bonus(attacker);
        let p_convert = conversion_probability(attacker, opponent_ratings.goalkeeping, bonus);
        if rng.gen::<f64>() < p_convert {
            score.add(attacker);
            line.push_str(&format!(
                " — ⚽ Goal {}! ({}-{})",
                attacker.tag(),
                score.home,
                score.away
            ));
            PlayResult::Goal
        } else {
            line.push_str(&format!(" — ❌ Chance missed ({})", attacker.tag()));
            PlayResult::MissedChance
        }
    } else {
        line.push_str(" — ⛔ No danger");
        PlayResult::NoDanger
    };

    PlayOutcome { attacker, result, log_line: line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat(rating: f64) -> TeamRatings {
        TeamRatings { attack: rating, defense: rating, goalkeeping: rating }
    }

    #[test]
    fn defense_scaling_matches_event_magnitudes() {
        // -0.12 of permanent drift is worth about -2.4 rating points.
        assert!((effective_defense(10.0, -0.12) - 7.6).abs() < 1e-9);
        assert_eq!(effective_defense(4.0, -1.0), EFFECTIVE_DEFENSE_MIN);
        assert_eq!(effective_defense(20.0, 1.0), EFFECTIVE_DEFENSE_MAX);
    }

    #[test]
    fn even_teams_attack_at_even_odds() {
        let p = chance_probability(10.0, 10.0);
        assert!((p - 0.50).abs() < 1e-9);
    }

    #[test]
    fn conversion_baseline_favors_home() {
        let home = conversion_probability(Side::Home, 10.0, 0.0);
        let away = conversion_probability(Side::Away, 10.0, 0.0);
        assert!((home - 0.28).abs() < 1e-9);
        assert!((away - 0.26).abs() < 1e-9);
    }

    #[test]
    fn strong_keeper_drags_conversion_down() {
        let soft = conversion_probability(Side::Home, 4.0, 0.0);
        let tight = conversion_probability(Side::Home, 20.0, 0.0);
        assert!(soft > 0.28 && tight < 0.28);
        assert!((tight - 0.08).abs() < 1e-9);
    }

    #[test]
    fn resolve_consumes_the_attacker_bonus_on_a_chance() {
        let home = flat(20.0);
        let away = TeamRatings { attack: 4.0, defense: 4.0, goalkeeping: 4.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ledger = ModifierLedger::new();
        let mut score = Score::default();

        for side in Side::BOTH {
            ledger.add_next_chance_bonus(side, 0.10);
        }

        // Home is heavily favored; within a handful of plays it gets a
        // chance and its bonus is gone, hit or miss.
        for i in 1..=50 {
            let outcome = resolve_play(i, &home, &away, &mut ledger, &mut score, &mut rng);
            if outcome.attacker == Side::Home && outcome.result != PlayResult::NoDanger {
                assert_eq!(ledger.next_chance_bonus(Side::Home), 0.0);
                return;
            }
        }
        panic!("no home chance in 50 plays with these ratings");
    }

    #[test]
    fn log_line_names_the_play_and_attacker() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ledger = ModifierLedger::new();
        let mut score = Score::default();
        let outcome = resolve_play(7, &flat(10.0), &flat(10.0), &mut ledger, &mut score, &mut rng);
        assert!(outcome.log_line.starts_with("▶️ Play 7: "));
        assert!(outcome.log_line.contains(outcome.attacker.tag()));
    }

    #[test]
    fn goal_increments_only_the_scorer() {
        let home = flat(20.0);
        let away = TeamRatings { attack: 4.0, defense: 4.0, goalkeeping: 4.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ledger = ModifierLedger::new();
        let mut score = Score::default();

        for i in 1..=200 {
            let before = score;
            let outcome = resolve_play(i, &home, &away, &mut ledger, &mut score, &mut rng);
            match outcome.result {
                PlayResult::Goal => {
                    let scored = match outcome.attacker {
                        Side::Home => score.home == before.home + 1 && score.away == before.away,
                        Side::Away => score.away == before.away + 1 && score.home == before.home,
                    };
                    assert!(scored, "score moved for the wrong side");
                }
                _ => assert_eq!(score, before),
            }
        }
        assert!(score.home + score.away > 0, "expected at least one goal in 200 plays");
    }

    proptest! {
        #[test]
        fn probability_bounds_hold(
            rating in -50.0f64..50.0,
            adjustment in -3.0f64..3.0,
            attack in -50.0f64..50.0,
            goalkeeping in -50.0f64..50.0,
            bonus in -2.0f64..2.0,
        ) {
            let eff = effective_defense(rating, adjustment);
            prop_assert!((EFFECTIVE_DEFENSE_MIN..=EFFECTIVE_DEFENSE_MAX).contains(&eff));

            let p_chance = chance_probability(attack, eff);
            prop_assert!((CHANCE_PROB_MIN..=CHANCE_PROB_MAX).contains(&p_chance));

            for side in Side::BOTH {
                let p_convert = conversion_probability(side, goalkeeping, bonus);
                prop_assert!((CONVERSION_PROB_MIN..=CONVERSION_PROB_MAX).contains(&p_convert));
            }
        }
    }
}
