use crate::cards::{CardId, ProgressToken};
use crate::core::{Action, GameRng, PlayerId};
use crate::game::Duel;

use super::DecisionSource;

/// Picks uniformly among legal options with its own seeded generator.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl DecisionSource for RandomAgent {
    fn choose_action(&mut self, duel: &Duel, _player: PlayerId) -> Option<Action> {
        let actions = duel.legal_actions();
        self.rng.choose(&actions).copied()
    }

    fn choose_token(
        &mut self,
        _duel: &Duel,
        _player: PlayerId,
        offer: &[ProgressToken],
    ) -> Option<ProgressToken> {
        self.rng.choose(offer).copied()
    }

    fn choose_destruction(
        &mut self,
        _duel: &Duel,
        _player: PlayerId,
        targets: &[CardId],
    ) -> Option<CardId> {
        self.rng.choose(targets).copied()
    }

    fn choose_rebuild(
        &mut self,
        _duel: &Duel,
        _player: PlayerId,
        discard: &[CardId],
    ) -> Option<CardId> {
        self.rng.choose(discard).copied()
    }

    fn choose_start_player(&mut self, _duel: &Duel, _player: PlayerId) -> PlayerId {
        self.rng
            .choose(&PlayerId::BOTH)
            .copied()
            .unwrap_or(PlayerId::FIRST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DuelConfig;

    #[test]
    fn test_random_agent_proposes_legal_actions() {
        let duel = Duel::standard(DuelConfig::new(2)).unwrap();
        let mut agent = RandomAgent::new(9);
        for _ in 0..10 {
            let action = agent.choose_action(&duel, PlayerId::FIRST).unwrap();
            assert!(duel.check(PlayerId::FIRST, &action).is_ok());
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let duel = Duel::standard(DuelConfig::new(2)).unwrap();
        let mut a = RandomAgent::new(4);
        let mut b = RandomAgent::new(4);
        for _ in 0..5 {
            assert_eq!(
                a.choose_action(&duel, PlayerId::FIRST),
                b.choose_action(&duel, PlayerId::FIRST)
            );
        }
    }
}
