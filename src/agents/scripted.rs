use std::collections::VecDeque;

use crate::cards::{CardId, ProgressToken};
use crate::core::{Action, PlayerId};
use crate::error::InvalidAction;
use crate::game::Duel;

use super::DecisionSource;

/// Plays queued actions in order.
///
/// Each request pops the next queued action; interrupt methods unwrap it if
/// it has the matching kind. Once the queue is empty the agent falls back to
/// the first legal option. Rejections are counted, not retried.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    queue: VecDeque<Action>,
    rejections: u32,
}

impl ScriptedAgent {
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
            rejections: 0,
        }
    }

    /// Queued actions not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn rejections(&self) -> u32 {
        self.rejections
    }
}

impl DecisionSource for ScriptedAgent {
    fn choose_action(&mut self, duel: &Duel, _player: PlayerId) -> Option<Action> {
        self.queue
            .pop_front()
            .or_else(|| duel.legal_actions().first().copied())
    }

    fn choose_token(
        &mut self,
        _duel: &Duel,
        _player: PlayerId,
        offer: &[ProgressToken],
    ) -> Option<ProgressToken> {
        match self.queue.pop_front() {
            Some(Action::SelectToken(token)) => Some(token),
            Some(_) => None,
            None => offer.first().copied(),
        }
    }

    fn choose_destruction(
        &mut self,
        _duel: &Duel,
        _player: PlayerId,
        targets: &[CardId],
    ) -> Option<CardId> {
        match self.queue.pop_front() {
            Some(Action::DestroyCard(card)) => Some(card),
            Some(_) => None,
            None => targets.first().copied(),
        }
    }

    fn choose_rebuild(
        &mut self,
        _duel: &Duel,
        _player: PlayerId,
        discard: &[CardId],
    ) -> Option<CardId> {
        match self.queue.pop_front() {
            Some(Action::RebuildFromDiscard(card)) => Some(card),
            Some(_) => None,
            None => discard.first().copied(),
        }
    }

    fn choose_start_player(&mut self, _duel: &Duel, player: PlayerId) -> PlayerId {
        match self.queue.pop_front() {
            Some(Action::ChooseStartingPlayer(chosen)) => chosen,
            _ => player,
        }
    }

    fn on_rejected(&mut self, _action: Option<Action>, _reason: &InvalidAction) {
        self.rejections += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DuelConfig;

    #[test]
    fn test_plays_queue_then_falls_back() {
        let duel = Duel::standard(DuelConfig::new(1)).unwrap();
        let pool = duel.state().draft_pool().clone();
        let mut agent = ScriptedAgent::new([Action::DraftWonder(pool[2])]);

        assert_eq!(
            agent.choose_action(&duel, PlayerId::FIRST),
            Some(Action::DraftWonder(pool[2]))
        );
        assert_eq!(agent.remaining(), 0);
        assert_eq!(
            agent.choose_action(&duel, PlayerId::FIRST),
            Some(Action::DraftWonder(pool[0]))
        );
    }

    #[test]
    fn test_mismatched_interrupt_answer() {
        let duel = Duel::standard(DuelConfig::new(1)).unwrap();
        let mut agent = ScriptedAgent::new([Action::DestroyCard(CardId(3))]);
        assert_eq!(
            agent.choose_token(&duel, PlayerId::FIRST, &[ProgressToken::Law]),
            None
        );
        agent.on_rejected(None, &InvalidAction::TokenNotOffered(ProgressToken::Law));
        assert_eq!(agent.rejections(), 1);
    }
}
