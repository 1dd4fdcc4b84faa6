//! Player actions.
//!
//! An `Action` is a plain value: the player's decision for the current
//! phase. It is validated against the state, applied once, and recorded in
//! the history as an `ActionRecord`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, ProgressToken, WonderId};

use super::player::PlayerId;

/// A complete player decision.
///
/// ## Example
///
/// ```
/// use wonders_duel::cards::{CardId, WonderId};
/// use wonders_duel::core::{Action, ActionKind};
///
/// let build = Action::BuildWonder { wonder: WonderId(3), tuck: CardId(17) };
/// assert_eq!(build.kind(), ActionKind::BuildWonder);
/// assert!(build.is_age_action());
/// assert!(!Action::DestroyCard(CardId(2)).is_age_action());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take a wonder from the current draft pool.
    DraftWonder(WonderId),
    /// Pay for and build an available pyramid card.
    BuildCard(CardId),
    /// Discard an available pyramid card for coins.
    DiscardCard(CardId),
    /// Build one of your wonders, tucking an available pyramid card under it.
    BuildWonder { wonder: WonderId, tuck: CardId },
    /// Take a progress token from the current offer.
    SelectToken(ProgressToken),
    /// Send one of the opponent's cards to the discard pile.
    DestroyCard(CardId),
    /// Build a card from the discard pile for free.
    RebuildFromDiscard(CardId),
    /// Name the player who starts the next age.
    ChooseStartingPlayer(PlayerId),
}

/// Discriminant of an `Action`, used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    DraftWonder,
    BuildCard,
    DiscardCard,
    BuildWonder,
    SelectToken,
    DestroyCard,
    RebuildFromDiscard,
    ChooseStartingPlayer,
}

impl Action {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::DraftWonder(_) => ActionKind::DraftWonder,
            Action::BuildCard(_) => ActionKind::BuildCard,
            Action::DiscardCard(_) => ActionKind::DiscardCard,
            Action::BuildWonder { .. } => ActionKind::BuildWonder,
            Action::SelectToken(_) => ActionKind::SelectToken,
            Action::DestroyCard(_) => ActionKind::DestroyCard,
            Action::RebuildFromDiscard(_) => ActionKind::RebuildFromDiscard,
            Action::ChooseStartingPlayer(_) => ActionKind::ChooseStartingPlayer,
        }
    }

    /// True for the three regular turn actions taken from the pyramid.
    #[must_use]
    pub fn is_age_action(&self) -> bool {
        matches!(
            self,
            Action::BuildCard(_) | Action::DiscardCard(_) | Action::BuildWonder { .. }
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// An accepted action with metadata for history tracking.
///
/// Used for replays and for debugging a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Position of the action within the turn (interrupt choices follow the
    /// turn action).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
