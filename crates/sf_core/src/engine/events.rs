//! Pre-match event deck.
//!
//! A deck is an ordered catalog of named probabilistic effects. The
//! seeding pass runs exactly once, before the first play, and models
//! randomness of circumstance: each side draws one event (two with
//! probability 0.35, without replacement), rolls each against its own
//! trigger chance, and applies the winners to the modifier ledger.
//!
//! Effects are plain data, not callbacks, so a deck can be inspected,
//! serialized, and tested case by case. Application returns a result
//! per invocation; a bad definition is logged and skipped without
//! aborting the rest of the pass.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::modifiers::{ModifierLedger, Side};

/// Which side's ledger a next-chance effect lands on, relative to the
/// side that drew the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectTarget {
    Own,
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventEffect {
    /// Permanent defensive drift for the drawing side.
    AdjustDefense { delta: f64 },
    /// One-shot conversion bonus for the targeted side's next chance.
    NextChanceBonus { target: EffectTarget, delta: f64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("event '{name}' has a non-finite delta")]
    NonFiniteDelta { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    pub name: String,
    /// Trigger probability in (0, 1].
    pub chance: f64,
    pub effect: EventEffect,
    /// Match-log template; `{side}` expands to the drawing side's tag.
    pub log: String,
}

impl EventDef {
    /// Apply this event for `side`, returning the rendered log line.
    pub fn apply(&self, side: Side, ledger: &mut ModifierLedger) -> Result<String, EventError> {
        match self.effect {
            EventEffect::AdjustDefense { delta } => {
                self.check_delta(delta)?;
                ledger.add_defense(side, delta);
            }
            EventEffect::NextChanceBonus { target, delta } => {
                self.check_delta(delta)?;
                let hit = match target {
                    EffectTarget::Own => side,
                    EffectTarget::Opponent => side.opponent(),
                };
                ledger.add_next_chance_bonus(hit, delta);
            }
        }
        Ok(self.log.replace("{side}", side.tag()))
    }

    fn check_delta(&self, delta: f64) -> Result<(), EventError> {
        if delta.is_finite() {
            Ok(())
        } else {
            Err(EventError::NonFiniteDelta { name: self.name.clone() })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDeck {
    defs: Vec<EventDef>,
}

impl EventDeck {
    /// Probability the seeding pass draws a second event for a side.
    const SECOND_DRAW_CHANCE: f64 = 0.35;

    pub fn new(defs: Vec<EventDef>) -> Self {
        Self { defs }
    }

    pub fn defs(&self) -> &[EventDef] {
        &self.defs
    }

    /// Run the pre-match seeding pass for both sides, appending one
    /// match-log line per applied effect. At most two effects trigger
    /// per side.
    pub fn seed<R: Rng>(
        &self,
        ledger: &mut ModifierLedger,
        log: &mut Vec<String>,
        rng: &mut R,
    ) {
        for side in Side::BOTH {
            let mut pool: Vec<&EventDef> = self.defs.iter().collect();
            let draws = if rng.gen::<f64>() < Self::SECOND_DRAW_CHANCE { 2 } else { 1 };
            for _ in 0..draws {
                if pool.is_empty() {
                    break;
                }
                let idx = rng.gen_range(0..pool.len());
                let def = pool.swap_remove(idx);
                if rng.gen::<f64>() < def.chance {
                    match def.apply(side, ledger) {
                        Ok(line) => log.push(line),
                        Err(err) => log::warn!("seeding skipped an event: {err}"),
                    }
                }
            }
        }
    }
}

/// The built-in neighborhood catalog.
impl Default for EventDeck {
    fn default() -> Self {
        Self::new(vec![
            EventDef {
                name: "arrest".to_string(),
                chance: 0.10,
                effect: EventEffect::AdjustDefense { delta: -0.12 },
                log: "🚨 ({side}) The police take away a defender (-DEF)".to_string(),
            },
            EventDef {
                name: "hungover".to_string(),
                chance: 0.15,
                effect: EventEffect::NextChanceBonus { target: EffectTarget::Own, delta: -0.12 },
                log: "🥴 ({side}) Hungover: next chance with less aim".to_string(),
            },
            EventDef {
                name: "cat_keeper".to_string(),
                chance: 0.12,
                effect: EventEffect::NextChanceBonus {
                    target: EffectTarget::Opponent,
                    delta: -0.10,
                },
                log: "🐈 ({side}) Cat-like keeper: the rival's next one will cost them"
                    .to_string(),
            },
            EventDef {
                name: "sly_fox".to_string(),
                chance: 0.10,
                effect: EventEffect::NextChanceBonus { target: EffectTarget::Own, delta: 0.10 },
                log: "🦊 ({side}) Streetwise: next chance comes clearer".to_string(),
            },
        ])
    }
}
