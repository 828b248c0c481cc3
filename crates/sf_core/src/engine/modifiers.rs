//! Per-side modifier ledger.
//!
//! Two kinds of adjustment flow through here: a permanent defensive
//! drift that accumulates for the whole match, and a single-use bonus
//! that the next conversion-probability computation consumes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Short tag used in match-log lines.
    pub fn tag(self) -> &'static str {
        match self {
            Side::Home => "HOME",
            Side::Away => "AWAY",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct SideModifiers {
    defense_adjustment: f64,
    next_chance_bonus: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierLedger {
    home: SideModifiers,
    away: SideModifiers,
}

impl ModifierLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: Side) -> &SideModifiers {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideModifiers {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Permanent additive adjustment; bounding happens downstream when
    /// combined with the raw defense rating.
    pub fn add_defense(&mut self, side: Side, delta: f64) {
        self.side_mut(side).defense_adjustment += delta;
    }

    pub fn defense_adjustment(&self, side: Side) -> f64 {
        self.side(side).defense_adjustment
    }

    /// Additive; repeated calls before consumption accumulate.
    pub fn add_next_chance_bonus(&mut self, side: Side, delta: f64) {
        self.side_mut(side).next_chance_bonus += delta;
    }

    /// Read-only peek, mainly for drivers and tests.
    pub fn next_chance_bonus(&self, side: Side) -> f64 {
        self.side(side).next_chance_bonus
    }

    /// Returns the accumulated bonus and zeroes it. Called exactly once
    /// per conversion-probability computation, hit or miss.
    pub fn consume_next_chance_bonus(&mut self, side: Side) -> f64 {
        std::mem::take(&mut self.side_mut(side).next_chance_bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips() {
        assert_eq!(Side::Home.opponent(), Side::Away);
        assert_eq!(Side::Away.opponent(), Side::Home);
    }

    #[test]
    fn defense_adjustment_is_permanent_and_additive() {
        let mut ledger = ModifierLedger::new();
        ledger.add_defense(Side::Home, -0.12);
        ledger.add_defense(Side::Home, 0.06);
        assert!((ledger.defense_adjustment(Side::Home) - (-0.06)).abs() < 1e-12);
        assert_eq!(ledger.defense_adjustment(Side::Away), 0.0);
    }

    #[test]
    fn next_chance_bonus_accumulates_then_consumes_once() {
        let mut ledger = ModifierLedger::new();
        ledger.add_next_chance_bonus(Side::Away, 0.10);
        ledger.add_next_chance_bonus(Side::Away, 0.04);

        assert!((ledger.consume_next_chance_bonus(Side::Away) - 0.14).abs() < 1e-12);
        assert_eq!(ledger.consume_next_chance_bonus(Side::Away), 0.0);
        assert_eq!(ledger.next_chance_bonus(Side::Away), 0.0);
    }

    #[test]
    fn sides_do_not_leak_into_each_other() {
        let mut ledger = ModifierLedger::new();
        ledger.add_next_chance_bonus(Side::Home, 0.10);
        assert_eq!(ledger.next_chance_bonus(Side::Away), 0.0);
        assert_eq!(ledger.consume_next_chance_bonus(Side::Away), 0.0);
        assert!((ledger.next_chance_bonus(Side::Home) - 0.10).abs() < 1e-12);
    }
}
