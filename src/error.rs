//! Error types for the duel engine.

use thiserror::Error;

use crate::cards::{CardId, ProgressToken, WonderId};
use crate::core::{ActionKind, Phase, PlayerId};

/// An action the engine refused. The state is unchanged and the same
/// player must act again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("the game is over")]
    GameOver,

    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("{action} is not allowed during {phase}")]
    WrongPhase { phase: Phase, action: ActionKind },

    #[error("{0} is not in the draft pool")]
    WonderNotInPool(WonderId),

    #[error("{0} is not available in the pyramid")]
    CardNotAvailable(CardId),

    #[error("costs {needed} coins but only {available} are available")]
    InsufficientCoins { needed: u32, available: u32 },

    #[error("{0} was not drafted by the acting player")]
    WonderNotOwned(WonderId),

    #[error("{0} has already been built")]
    WonderAlreadyBuilt(WonderId),

    #[error("the limit of {0} built wonders has been reached")]
    WonderLimitReached(usize),

    #[error("{0} is not on offer")]
    TokenNotOffered(ProgressToken),

    #[error("{0} cannot be destroyed")]
    InvalidDestructionTarget(CardId),

    #[error("{0} is not in the discard pile")]
    NotInDiscardPile(CardId),

    #[error("{0} is not a seat in this duel")]
    UnknownPlayer(PlayerId),

    /// The decision source gave no answer.
    #[error("no decision was made")]
    NoDecision,
}

/// Fatal problems detected before the first turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("invalid catalog: {0}")]
    Catalog(String),

    #[error("malformed pyramid for age {age}: {reason}")]
    MalformedPyramid { age: u8, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuelError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),

    /// A referenced id does not exist where the engine expects it. Always a bug.
    #[error("structural inconsistency: {0}")]
    StructuralInconsistency(String),

    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("{player} had {attempts} consecutive actions rejected")]
    RetriesExhausted { player: PlayerId, attempts: u32 },

    #[error("replay encoding failed: {0}")]
    Replay(String),
}

impl DuelError {
    /// True when the error is an ordinary rejected action the decision
    /// source may retry.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, DuelError::InvalidAction(_))
    }
}

pub type Result<T> = std::result::Result<T, DuelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = DuelError::from(InvalidAction::InsufficientCoins { needed: 5, available: 2 });
        assert_eq!(err.to_string(), "invalid action: costs 5 coins but only 2 are available");
        assert!(err.is_rejection());

        let err = DuelError::from(SetupError::MalformedPyramid {
            age: 2,
            reason: "19 cards for 20 slots".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "setup failed: malformed pyramid for age 2: 19 cards for 20 slots"
        );
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_wrong_phase_message() {
        let err = InvalidAction::WrongPhase {
            phase: Phase::WaitingForDestruction,
            action: ActionKind::BuildCard,
        };
        assert_eq!(err.to_string(), "BuildCard is not allowed during WaitingForDestruction");
    }
}
