//! Game phases.
//!
//! The duel moves through the two wonder draft phases, then three ages of
//! `AgePlay`. Effects can push the game into an interrupt phase in the middle
//! of a turn; the same player resolves it before the turn finishes.

use serde::{Deserialize, Serialize};

/// Why a progress token is being chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSelection {
    /// A science symbol pair was completed; choose from the board tokens.
    Pair,
    /// A library effect drew tokens from the box; choose one of them.
    Library,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    WonderDraft1,
    WonderDraft2,
    AgePlay,
    WaitingForTokenSelection(TokenSelection),
    WaitingForDestruction,
    WaitingForDiscardRebuild,
    WaitingForStartPlayerChoice,
    GameOver,
}

impl Phase {
    #[must_use]
    pub fn is_draft(self) -> bool {
        matches!(self, Phase::WonderDraft1 | Phase::WonderDraft2)
    }

    /// True for the mid-turn phases entered by effects.
    #[must_use]
    pub fn is_interrupt(self) -> bool {
        matches!(
            self,
            Phase::WaitingForTokenSelection(_)
                | Phase::WaitingForDestruction
                | Phase::WaitingForDiscardRebuild
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Phase::GameOver
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::WaitingForTokenSelection(TokenSelection::Pair) => {
                write!(f, "WaitingForTokenSelection(Pair)")
            }
            Phase::WaitingForTokenSelection(TokenSelection::Library) => {
                write!(f, "WaitingForTokenSelection(Library)")
            }
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_classification() {
        assert!(Phase::WonderDraft2.is_draft());
        assert!(!Phase::AgePlay.is_draft());
        assert!(Phase::WaitingForDestruction.is_interrupt());
        assert!(Phase::WaitingForTokenSelection(TokenSelection::Library).is_interrupt());
        assert!(!Phase::WaitingForStartPlayerChoice.is_interrupt());
        assert!(Phase::GameOver.is_terminal());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::AgePlay.to_string(), "AgePlay");
        assert_eq!(
            Phase::WaitingForTokenSelection(TokenSelection::Pair).to_string(),
            "WaitingForTokenSelection(Pair)"
        );
    }
}
