//! Decision sources.
//!
//! A `DecisionSource` makes every choice for one seat: regular turn actions
//! and draft picks through `choose_action`, plus one method per interrupt.
//! Sources only ever see `&Duel`; the `Match` driver turns their answers
//! into actions and feeds rejections back through `on_rejected`.
//!
//! ## Built-in sources
//!
//! - `RandomAgent`: Uniform over legal actions, seeded
//! - `GreedyAgent`: One-ply lookahead on the score differential
//! - `ScriptedAgent`: Plays a fixed queue, then falls back to the first legal action

mod greedy;
mod random;
mod scripted;

pub use greedy::GreedyAgent;
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;

use crate::cards::{CardId, ProgressToken};
use crate::core::{Action, PlayerId};
use crate::error::InvalidAction;
use crate::game::Duel;

/// Makes the decisions for one seat.
///
/// Each method is called only in the matching phase, with the acting
/// player's options already computed. Returning `None` gives up; the driver
/// reports that as a rejection and asks again.
pub trait DecisionSource {
    /// Draft pick or regular turn action.
    fn choose_action(&mut self, duel: &Duel, player: PlayerId) -> Option<Action>;

    /// Pick a progress token from `offer` (board tokens or a library draw).
    fn choose_token(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        offer: &[ProgressToken],
    ) -> Option<ProgressToken>;

    /// Pick an opponent card to destroy.
    fn choose_destruction(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        targets: &[CardId],
    ) -> Option<CardId>;

    /// Pick a discarded card to build for free.
    fn choose_rebuild(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        discard: &[CardId],
    ) -> Option<CardId>;

    /// Name the player who starts the next age.
    fn choose_start_player(&mut self, duel: &Duel, player: PlayerId) -> PlayerId;

    /// The last answer was refused.
    fn on_rejected(&mut self, _action: Option<Action>, _reason: &InvalidAction) {}
}

impl<D: DecisionSource + ?Sized> DecisionSource for Box<D> {
    fn choose_action(&mut self, duel: &Duel, player: PlayerId) -> Option<Action> {
        (**self).choose_action(duel, player)
    }

    fn choose_token(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        offer: &[ProgressToken],
    ) -> Option<ProgressToken> {
        (**self).choose_token(duel, player, offer)
    }

    fn choose_destruction(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        targets: &[CardId],
    ) -> Option<CardId> {
        (**self).choose_destruction(duel, player, targets)
    }

    fn choose_rebuild(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        discard: &[CardId],
    ) -> Option<CardId> {
        (**self).choose_rebuild(duel, player, discard)
    }

    fn choose_start_player(&mut self, duel: &Duel, player: PlayerId) -> PlayerId {
        (**self).choose_start_player(duel, player)
    }

    fn on_rejected(&mut self, action: Option<Action>, reason: &InvalidAction) {
        (**self).on_rejected(action, reason);
    }
}
