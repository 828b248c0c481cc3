use serde::{Deserialize, Serialize};

use super::player::{Player, Role};
use crate::error::MatchError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    /// Fail-fast roster check, run once by the engine constructor.
    /// An empty roster is legal; every rating axis has a fallback.
    pub fn validate(&self) -> Result<(), MatchError> {
        for player in &self.players {
            player.validate()?;
        }
        Ok(())
    }

    pub(crate) fn in_role(&self, role: Role) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.role == role)
    }
}
