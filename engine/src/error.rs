use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("A round needs between 2 and 10 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("Invalid deck contents: {0}")]
    InvalidDeckContents(String),
    #[error("Not enough cards left to deal")]
    DeckExhausted,
    #[error("Illegal move")]
    IllegalMove,
    #[error("A color must be named for wild cards and only for wild cards")]
    IllegalColorChoice,
    #[error("The round has already ended")]
    RoundEnded,
    #[error("Player index {0} is out of bounds")]
    InvalidPlayerIndex(usize),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("Invalid game configuration: {0}")]
    InvalidGameConfig(String),
    #[error("The match is over")]
    MatchEnded,
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
