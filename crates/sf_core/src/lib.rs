//! # sf_core - Play-by-play street football match engine
//!
//! Simulates a match as a sequence of discrete plays, producing an
//! incremental human-readable log and a running score. The engine is
//! fully deterministic for a given `(rosters, config, seed)` and is
//! driven entirely from the outside: a driver asks for one play at a
//! time and supplies the answer when the engine suspends for a
//! decision.
//!
//! ```
//! use sf_core::{MatchConfig, MatchEngine, MatchPlan, Team};
//!
//! let empty = |name: &str| Team { name: name.to_string(), players: Vec::new() };
//! let plan = MatchPlan {
//!     home_team: empty("La Charca"),
//!     away_team: empty("El Poligono"),
//!     config: MatchConfig::default(),
//! };
//! let mut engine = MatchEngine::new(plan).unwrap();
//! loop {
//!     let feed = engine.next_play();
//!     if let Some(choice) = feed.pending_choice {
//!         engine.apply_choice(&choice.options[0].id).unwrap();
//!     }
//!     if feed.finished {
//!         break;
//!     }
//! }
//! assert!(engine.score().home + engine.score().away <= 12);
//! ```

pub mod engine;
pub mod error;
pub mod models;

pub use engine::events::{EffectTarget, EventDeck, EventDef, EventEffect, EventError};
pub use engine::modifiers::{ModifierLedger, Side};
pub use engine::play::{PlayOutcome, PlayResult, Score};
pub use engine::ratings::{compute_ratings, TeamRatings};
pub use engine::{
    ChoiceEffect, ChoiceOption, MatchConfig, MatchEngine, MatchPlan, PendingChoice, PlayFeed,
};
pub use error::{MatchError, Result};
pub use models::{Player, Role, Team};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
