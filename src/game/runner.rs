//! Match driver.
//!
//! `Match` polls the duel's phase, asks the deciding seat's source for the
//! matching choice, processes it, and reports every produced event to the
//! observers. A rejected or missing answer goes back to the source through
//! `on_rejected` and the same seat is asked again, up to the retry limit.

use crate::agents::DecisionSource;
use crate::core::{Action, GameEvent, GameState, Phase, PlayerId, PlayerMap};
use crate::error::{DuelError, InvalidAction, Result};
use crate::rules::GameOutcome;

use super::duel::Duel;

/// Consecutive rejections tolerated per decision before giving up.
pub const DEFAULT_RETRY_LIMIT: u32 = 8;

/// Read-only listener notified of every event.
///
/// Events are delivered once the whole action has been applied, so `state`
/// is the state after the action for every event it produced. An observer
/// that needs the state at an intermediate transition (for instance the
/// moment `AgeStarted` fires) has to rebuild it from the events.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent, state: &GameState);
}

/// Keeps every event it sees.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    pub events: Vec<GameEvent>,
}

impl GameObserver for EventRecorder {
    fn on_event(&mut self, event: &GameEvent, _state: &GameState) {
        self.events.push(event.clone());
    }
}

pub struct Match {
    duel: Duel,
    sources: PlayerMap<Box<dyn DecisionSource>>,
    observers: Vec<Box<dyn GameObserver>>,
    retry_limit: u32,
}

impl Match {
    #[must_use]
    pub fn new(
        duel: Duel,
        first: Box<dyn DecisionSource>,
        second: Box<dyn DecisionSource>,
    ) -> Self {
        Self {
            duel,
            sources: PlayerMap::from_pair(first, second),
            observers: Vec::new(),
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    #[must_use]
    pub fn with_retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = limit;
        self
    }

    #[must_use]
    pub fn duel(&self) -> &Duel {
        &self.duel
    }

    #[must_use]
    pub fn into_duel(self) -> Duel {
        self.duel
    }

    #[must_use]
    pub fn observers(&self) -> &[Box<dyn GameObserver>] {
        &self.observers
    }

    /// Ask the deciding seat for its answer to the current phase.
    fn propose(&mut self, player: PlayerId) -> Option<Action> {
        let duel = &self.duel;
        let source = &mut self.sources[player];
        match duel.phase() {
            Phase::WonderDraft1 | Phase::WonderDraft2 | Phase::AgePlay => {
                source.choose_action(duel, player)
            }
            Phase::WaitingForTokenSelection(_) => {
                let offer = duel.state().token_offer();
                source.choose_token(duel, player, &offer).map(Action::SelectToken)
            }
            Phase::WaitingForDestruction => {
                let targets = duel.state().destruction_targets(duel.catalog());
                source
                    .choose_destruction(duel, player, &targets)
                    .map(Action::DestroyCard)
            }
            Phase::WaitingForDiscardRebuild => {
                let discard: Vec<_> = duel.state().discard_pile().iter().copied().collect();
                source
                    .choose_rebuild(duel, player, &discard)
                    .map(Action::RebuildFromDiscard)
            }
            Phase::WaitingForStartPlayerChoice => Some(Action::ChooseStartingPlayer(
                source.choose_start_player(duel, player),
            )),
            Phase::GameOver => None,
        }
    }

    /// Play one decision. Returns the events it produced.
    pub fn step(&mut self) -> Result<Vec<GameEvent>> {
        if self.duel.is_over() {
            return Err(InvalidAction::GameOver.into());
        }

        let player = self.duel.current_player();
        let mut attempts = 0;
        loop {
            let proposal = self.propose(player);
            let result = match proposal {
                Some(action) => self.duel.process(player, action),
                None => Err(InvalidAction::NoDecision.into()),
            };

            match result {
                Ok(events) => {
                    for event in &events {
                        for observer in &mut self.observers {
                            observer.on_event(event, self.duel.state());
                        }
                    }
                    return Ok(events);
                }
                Err(DuelError::InvalidAction(reason)) => {
                    self.sources[player].on_rejected(proposal, &reason);
                    attempts += 1;
                    if attempts > self.retry_limit {
                        return Err(DuelError::RetriesExhausted { player, attempts });
                    }
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Play until the game ends.
    pub fn run(&mut self) -> Result<GameOutcome> {
        while !self.duel.is_over() {
            self.step()?;
        }
        self.duel.outcome().cloned().ok_or_else(|| {
            DuelError::StructuralInconsistency("game over without an outcome".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{RandomAgent, ScriptedAgent};
    use crate::cards::WonderId;
    use crate::core::DuelConfig;

    #[test]
    fn test_step_advances_the_draft() {
        let duel = Duel::standard(DuelConfig::new(12)).unwrap();
        let mut game = Match::new(
            duel,
            Box::new(RandomAgent::new(1)),
            Box::new(RandomAgent::new(2)),
        );

        let events = game.step().unwrap();
        assert!(matches!(events[0], GameEvent::WonderDrafted { player: PlayerId::FIRST, .. }));
        assert_eq!(game.duel().current_player(), PlayerId::SECOND);
    }

    struct LogLengths(std::rc::Rc<std::cell::RefCell<Vec<usize>>>);

    impl GameObserver for LogLengths {
        fn on_event(&mut self, _event: &GameEvent, state: &GameState) {
            self.0.borrow_mut().push(state.log().len());
        }
    }

    #[test]
    fn test_observers_see_the_state_after_the_action() {
        let duel = Duel::standard(DuelConfig::new(12)).unwrap();
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut game = Match::new(
            duel,
            Box::new(RandomAgent::new(1)),
            Box::new(RandomAgent::new(2)),
        )
        .with_observer(Box::new(LogLengths(std::rc::Rc::clone(&seen))));

        for _ in 0..7 {
            game.step().unwrap();
        }
        seen.borrow_mut().clear();
        // The eighth pick also starts age 1.
        let events = game.step().unwrap();

        assert!(events.iter().any(|e| matches!(e, GameEvent::AgeStarted { .. })));
        assert_eq!(seen.borrow().len(), events.len());
        let final_len = game.duel().state().log().len();
        assert!(seen.borrow().iter().all(|&n| n == final_len));
    }

    #[test]
    fn test_retries_exhausted() {
        let duel = Duel::standard(DuelConfig::new(12)).unwrap();
        let bogus = Action::DraftWonder(WonderId(999));
        let script = ScriptedAgent::new(std::iter::repeat(bogus).take(10));
        let mut game = Match::new(duel, Box::new(script), Box::new(RandomAgent::new(2)))
            .with_retry_limit(3);

        let err = game.step().unwrap_err();
        assert_eq!(
            err,
            DuelError::RetriesExhausted {
                player: PlayerId::FIRST,
                attempts: 4
            }
        );
        assert!(game.duel().state().history().is_empty());
    }
}
