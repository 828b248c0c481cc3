use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Position group a player covers in the street lineup.
///
/// Wire spellings match the roster records produced by the draft layer
/// (`"GK"`, `"DEF"`, `"MID"`, `"ATK"`); anything else is rejected at
/// deserialization time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "ATK")]
    Attacker,
}

/// Stat axis a rating formula reads from a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatAxis {
    Goalkeeping,
    Defense,
    Attack,
}

/// One roster entry. Immutable once a match starts.
///
/// Explicit stats win over the coarse `tier` band; a player with
/// neither gets the flat default for the axis being read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub role: Role,

    #[serde(rename = "gk", default, skip_serializing_if = "Option::is_none")]
    pub goalkeeping: Option<f64>,

    #[serde(rename = "def", default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<f64>,

    #[serde(rename = "atk", default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<f64>,

    /// Coarse quality band (1 and up), used when an explicit stat is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<u8>,
}

impl Player {
    /// Resolve the stat for one axis: explicit value, else tier-derived
    /// `clamp(6 + (tier-1)*2, 4, 18)`, else `default`.
    pub(crate) fn stat(&self, axis: StatAxis, default: f64) -> f64 {
        let explicit = match axis {
            StatAxis::Goalkeeping => self.goalkeeping,
            StatAxis::Defense => self.defense,
            StatAxis::Attack => self.attack,
        };
        if let Some(value) = explicit {
            return value;
        }
        if let Some(tier) = self.tier {
            return (6.0 + (f64::from(tier) - 1.0) * 2.0).clamp(4.0, 18.0);
        }
        default
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        for (label, value) in
            [("gk", self.goalkeeping), ("def", self.defense), ("atk", self.attack)]
        {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(MatchError::InvalidRoster(format!(
                        "player '{}' has a non-finite {} stat",
                        self.name, label
                    )));
                }
            }
        }
        if self.tier == Some(0) {
            return Err(MatchError::InvalidRoster(format!(
                "player '{}' has tier 0, tiers start at 1",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(role: Role) -> Player {
        Player {
            name: "Test".to_string(),
            role,
            goalkeeping: None,
            defense: None,
            attack: None,
            tier: None,
        }
    }

    #[test]
    fn explicit_stat_wins_over_tier() {
        let mut p = player(Role::Attacker);
        p.attack = Some(17.0);
        p.tier = Some(1);
        assert_eq!(p.stat(StatAxis::Attack, 10.0), 17.0);
    }

    #[test]
    fn tier_derivation_is_clamped() {
        let mut p = player(Role::Defender);
        p.tier = Some(3);
        assert_eq!(p.stat(StatAxis::Defense, 10.0), 10.0); // 6 + 2*2

        p.tier = Some(9);
        assert_eq!(p.stat(StatAxis::Defense, 10.0), 18.0); // capped
    }

    #[test]
    fn missing_everything_uses_default() {
        let p = player(Role::Midfielder);
        assert_eq!(p.stat(StatAxis::Attack, 10.0), 10.0);
        assert_eq!(p.stat(StatAxis::Goalkeeping, 8.0), 8.0);
    }

    #[test]
    fn unknown_role_is_rejected_on_the_wire() {
        let json = r#"{"name": "Imposter", "role": "COACH"}"#;
        assert!(serde_json::from_str::<Player>(json).is_err());
    }

    #[test]
    fn wire_format_deserializes() {
        let json = r#"{"name": "Paco", "role": "GK", "gk": 14.0, "tier": 2}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.role, Role::Goalkeeper);
        assert_eq!(p.goalkeeping, Some(14.0));
        assert_eq!(p.tier, Some(2));
    }

    #[test]
    fn non_finite_stat_fails_validation() {
        let mut p = player(Role::Attacker);
        p.attack = Some(f64::NAN);
        assert!(p.validate().is_err());
    }

    #[test]
    fn tier_zero_fails_validation() {
        let mut p = player(Role::Attacker);
        p.tier = Some(0);
        assert!(p.validate().is_err());
    }
}
