use thiserror::Error;

use crate::core::types::{Chips, MatchId};

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Insufficient funds: {needed} needed, {held} held")]
    InsufficientFunds { needed: Chips, held: Chips },

    #[error("Invalid wager: {0}")]
    InvalidWager(String),

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Unknown or already settled match: {0}")]
    UnknownMatch(MatchId),

    #[error("Settlement failure: {0}")]
    SettlementFailure(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
