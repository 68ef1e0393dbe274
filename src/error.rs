use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Card;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("game is already over")]
    GameOver,
    #[error("draw pile is exhausted and no discards can be recycled")]
    DeckExhausted,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of invalid caller intents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("{0} is not legal to play on the current discard")]
    IllegalCard(Card),
    #[error("a wild card needs a declared color")]
    MissingWildColor,
    #[error("only wild cards take a declared color")]
    UnexpectedWildColor,
    #[error("action is not expected now: {0}")]
    NotExpected(&'static str),
    #[error("cannot swap hands with yourself")]
    SwapWithSelf,
}
