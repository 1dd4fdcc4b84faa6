use crate::cards::{CardId, ProgressToken};
use crate::core::{Action, PlayerId};
use crate::game::Duel;

use super::DecisionSource;

/// One-ply lookahead: applies each option to a clone of the duel and keeps
/// the one with the best score differential. A winning option always beats
/// a non-winning one. Ties keep the earliest option.
#[derive(Clone, Debug, Default)]
pub struct GreedyAgent;

impl GreedyAgent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn evaluate(duel: &Duel, player: PlayerId, action: Action) -> Option<i64> {
        let mut trial = duel.clone();
        trial.process(player, action).ok()?;

        if let Some(outcome) = trial.outcome() {
            if outcome.is_winner(player) {
                return Some(i64::MAX);
            }
            if outcome.is_winner(player.opponent()) {
                return Some(i64::MIN);
            }
        }
        let scores = trial.scores();
        Some(i64::from(scores[player].total()) - i64::from(scores[player.opponent()].total()))
    }

    fn best(
        duel: &Duel,
        player: PlayerId,
        options: impl IntoIterator<Item = Action>,
    ) -> Option<Action> {
        let mut best: Option<(Action, i64)> = None;
        for action in options {
            let Some(value) = Self::evaluate(duel, player, action) else {
                continue;
            };
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((action, value));
            }
        }
        best.map(|(action, _)| action)
    }
}

impl DecisionSource for GreedyAgent {
    fn choose_action(&mut self, duel: &Duel, player: PlayerId) -> Option<Action> {
        Self::best(duel, player, duel.legal_actions())
    }

    fn choose_token(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        offer: &[ProgressToken],
    ) -> Option<ProgressToken> {
        match Self::best(duel, player, offer.iter().map(|&t| Action::SelectToken(t)))? {
            Action::SelectToken(token) => Some(token),
            _ => None,
        }
    }

    fn choose_destruction(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        targets: &[CardId],
    ) -> Option<CardId> {
        match Self::best(duel, player, targets.iter().map(|&c| Action::DestroyCard(c)))? {
            Action::DestroyCard(card) => Some(card),
            _ => None,
        }
    }

    fn choose_rebuild(
        &mut self,
        duel: &Duel,
        player: PlayerId,
        discard: &[CardId],
    ) -> Option<CardId> {
        match Self::best(duel, player, discard.iter().map(|&c| Action::RebuildFromDiscard(c)))? {
            Action::RebuildFromDiscard(card) => Some(card),
            _ => None,
        }
    }

    fn choose_start_player(&mut self, _duel: &Duel, player: PlayerId) -> PlayerId {
        player
    }
}
