use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("match length must be at least 1, got {0}")]
    InvalidMatchLength(u32),

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("no decision is pending")]
    NotAwaitingDecision,

    #[error("unknown choice id: {id}")]
    UnknownChoice { id: String },
}

pub type Result<T> = std::result::Result<T, MatchError>;
