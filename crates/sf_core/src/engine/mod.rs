//! Match engine: lifecycle, the decision gate, and the step API.
//!
//! The engine is externally driven and fully synchronous. A driver
//! builds a [`MatchEngine`] from a [`MatchPlan`], then calls
//! [`MatchEngine::next_play`] on its own cadence until the feed reports
//! `finished`. When the scripted decision gate fires, the feed carries
//! a [`PendingChoice`] instead of a resolved play and the engine stays
//! inert until [`MatchEngine::apply_choice`] answers it. There is no
//! internal pacing, scheduling, or locking; one driver owns the engine
//! at a time.

pub mod events;
pub mod modifiers;
pub mod play;
pub mod ratings;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::models::Team;
use events::EventDeck;
use modifiers::{ModifierLedger, Side};
use play::{resolve_play, Score};
use ratings::{compute_ratings, TeamRatings};

/// Deterministic ledger mutation an answered choice performs for the
/// owning side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChoiceEffect {
    /// Permanent defensive adjustment.
    AddDefense { delta: f64 },
    /// One-shot bonus for the side's next scoring chance.
    AddNextChanceBonus { delta: f64 },
}

/// One selectable answer inside a [`PendingChoice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub effects: Vec<ChoiceEffect>,
}

/// Suspension descriptor handed to the driver instead of a resolved
/// play. The engine keeps the active one until it is answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingChoice {
    pub id: String,
    pub side: Side,
    pub title: String,
    pub description: String,
    pub options: Vec<ChoiceOption>,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Advancing,
    AwaitingDecision(PendingChoice),
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Total plays in the match.
    pub match_length: u32,
    /// Event catalog for the pre-match seeding pass.
    pub deck: EventDeck,
    /// RNG seed; a match is fully determined by (rosters, config, seed).
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { match_length: 12, deck: EventDeck::default(), seed: 0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchPlan {
    pub home_team: Team,
    pub away_team: Team,
    pub config: MatchConfig,
}

/// Per-step feed handed back to the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayFeed {
    pub log_line: String,
    pub score: Score,
    pub finished: bool,
    pub pending_choice: Option<PendingChoice>,
}

#[derive(Debug, Clone)]
pub struct MatchEngine {
    match_length: u32,
    play_index: u32,
    home_team: Team,
    away_team: Team,
    home_ratings: TeamRatings,
    away_ratings: TeamRatings,
    ledger: ModifierLedger,
    score: Score,
    log: Vec<String>,
    phase: Phase,
    decision_fired: bool,
    rng: ChaCha8Rng,
}

impl MatchEngine {
    /// Validate the plan, derive ratings, run the event-deck seeding
    /// pass, and enter the advancing state.
    pub fn new(plan: MatchPlan) -> Result<Self, MatchError> {
        if plan.config.match_length == 0 {
            return Err(MatchError::InvalidMatchLength(plan.config.match_length));
        }
        plan.home_team.validate()?;
        plan.away_team.validate()?;

        let home_ratings = compute_ratings(&plan.home_team);
        let away_ratings = compute_ratings(&plan.away_team);
        let mut rng = ChaCha8Rng::seed_from_u64(plan.config.seed);
        let mut ledger = ModifierLedger::new();
        let mut log = vec![format!(
            "📊 Ratings — HOME A:{:.1} D:{:.1} GK:{:.1} | AWAY A:{:.1} D:{:.1} GK:{:.1}",
            home_ratings.attack,
            home_ratings.defense,
            home_ratings.goalkeeping,
            away_ratings.attack,
            away_ratings.defense,
            away_ratings.goalkeeping,
        )];
        plan.config.deck.seed(&mut ledger, &mut log, &mut rng);
        log::debug!(
            "match start: {} vs {}, {} plays, seed {}",
            plan.home_team.name,
            plan.away_team.name,
            plan.config.match_length,
            plan.config.seed
        );

        Ok(Self {
            match_length: plan.config.match_length,
            play_index: 0,
            home_team: plan.home_team,
            away_team: plan.away_team,
            home_ratings,
            away_ratings,
            ledger,
            score: Score::default(),
            log,
            phase: Phase::Advancing,
            decision_fired: false,
            rng,
        })
    }

    /// Advance the match by one step.
    ///
    /// After the match finishes this is idempotent: the same terminal
    /// feed comes back and nothing mutates. While a decision is
    /// pending the same [`PendingChoice`] comes back and the play
    /// counter does not move.
    pub fn next_play(&mut self) -> PlayFeed {
        match &self.phase {
            Phase::Finished => PlayFeed {
                log_line: "Match finished.".to_string(),
                score: self.score,
                finished: true,
                pending_choice: None,
            },
            Phase::AwaitingDecision(choice) => PlayFeed {
                log_line: choice.title.clone(),
                score: self.score,
                finished: false,
                pending_choice: Some(choice.clone()),
            },
            Phase::Advancing => {
                self.play_index += 1;

                // The gate consumes this step's turn; no play resolves
                // for this index and the increment stands.
                if !self.decision_fired && self.play_index == self.decision_play_index() {
                    self.decision_fired = true;
                    let choice = touchline_call();
                    self.phase = Phase::AwaitingDecision(choice.clone());
                    return PlayFeed {
                        log_line: choice.title.clone(),
                        score: self.score,
                        finished: false,
                        pending_choice: Some(choice),
                    };
                }

                let outcome = resolve_play(
                    self.play_index,
                    &self.home_ratings,
                    &self.away_ratings,
                    &mut self.ledger,
                    &mut self.score,
                    &mut self.rng,
                );
                self.log.push(outcome.log_line.clone());
                if self.play_index >= self.match_length {
                    self.phase = Phase::Finished;
                    log::debug!(
                        "match finished {}-{} after {} plays",
                        self.score.home,
                        self.score.away,
                        self.play_index
                    );
                }
                PlayFeed {
                    log_line: outcome.log_line,
                    score: self.score,
                    finished: matches!(self.phase, Phase::Finished),
                    pending_choice: None,
                }
            }
        }
    }

    /// Answer the pending decision. Errors when no decision is pending
    /// or when `choice_id` is not among the offered options; a silent
    /// no-op would hide driver bugs.
    pub fn apply_choice(&mut self, choice_id: &str) -> Result<(), MatchError> {
        let (side, label, effects) = {
            let Phase::AwaitingDecision(choice) = &self.phase else {
                return Err(MatchError::NotAwaitingDecision);
            };
            let Some(option) = choice.options.iter().find(|o| o.id == choice_id) else {
                return Err(MatchError::UnknownChoice { id: choice_id.to_string() });
            };
            (choice.side, option.label.clone(), option.effects.clone())
        };

        for effect in effects {
            match effect {
                ChoiceEffect::AddDefense { delta } => self.ledger.add_defense(side, delta),
                ChoiceEffect::AddNextChanceBonus { delta } => {
                    self.ledger.add_next_chance_bonus(side, delta)
                }
            }
        }
        self.log.push(format!("🗳️ Decision ({}): {}", side.tag(), label));
        self.phase = Phase::Advancing;
        Ok(())
    }

    /// Play index of the scripted decision gate.
    fn decision_play_index(&self) -> u32 {
        self.match_length.div_ceil(2)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Current play index, 0 before the first step, up to the match length.
    pub fn play_index(&self) -> u32 {
        self.play_index
    }

    pub fn match_length(&self) -> u32 {
        self.match_length
    }

    pub fn finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    pub fn pending_choice(&self) -> Option<&PendingChoice> {
        match &self.phase {
            Phase::AwaitingDecision(choice) => Some(choice),
            _ => None,
        }
    }

    /// Full human-readable match log, ratings summary first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn ratings(&self, side: Side) -> &TeamRatings {
        match side {
            Side::Home => &self.home_ratings,
            Side::Away => &self.away_ratings,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn modifiers(&self) -> &ModifierLedger {
        &self.ledger
    }
}

/// The built-in decision gate: the home side's touchline call at the
/// halfway point. Every option maps to fixed ledger adjustments.
fn touchline_call() -> PendingChoice {
    PendingChoice {
        id: "touchline_call".to_string(),
        side: Side::Home,
        title: "Touchline call".to_string(),
        description: "Halfway through. Shout something at the lads.".to_string(),
        options: vec![
            ChoiceOption {
                id: "all_out_attack".to_string(),
                label: "All-out attack".to_string(),
                effects: vec![ChoiceEffect::AddNextChanceBonus { delta: 0.10 }],
            },
            ChoiceOption {
                id: "park_the_bus".to_string(),
                label: "Park the bus".to_string(),
                effects: vec![ChoiceEffect::AddDefense { delta: 0.06 }],
            },
            ChoiceOption {
                id: "steady_on".to_string(),
                label: "Steady on".to_string(),
                effects: vec![
                    ChoiceEffect::AddDefense { delta: 0.03 },
                    ChoiceEffect::AddNextChanceBonus { delta: 0.04 },
                ],
            },
        ],
    }
}
