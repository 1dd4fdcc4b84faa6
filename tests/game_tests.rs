//! Full games on the standard set: termination, determinism, replays, and
//! observers.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use wonders_duel::agents::{GreedyAgent, RandomAgent, ScriptedAgent};
use wonders_duel::cards::Catalog;
use wonders_duel::core::{DuelConfig, GameEvent, GameState, Phase, PlayerId};
use wonders_duel::game::{Duel, GameObserver, Match, Replay};
use wonders_duel::rules::{GameOutcome, VictoryType};

fn standard() -> Arc<Catalog> {
    Arc::new(Catalog::standard().unwrap())
}

fn random_match(catalog: &Arc<Catalog>, seed: u64) -> Match {
    let duel = Duel::new(Arc::clone(catalog), DuelConfig::new(seed)).unwrap();
    Match::new(
        duel,
        Box::new(RandomAgent::new(seed.wrapping_mul(31))),
        Box::new(RandomAgent::new(seed.wrapping_mul(17) + 1)),
    )
}

// =============================================================================
// Termination
// =============================================================================

#[test]
fn test_random_games_always_finish() {
    let catalog = standard();
    let mut victories = Vec::new();

    for seed in 0..40 {
        let mut game = random_match(&catalog, seed);
        let outcome = game.run().unwrap();

        assert_eq!(game.duel().phase(), Phase::GameOver);
        assert!(game.duel().legal_actions().is_empty());
        assert!(matches!(
            game.duel().state().log().last(),
            Some(GameEvent::GameEnded { .. })
        ));
        if outcome.victory == VictoryType::Civilian {
            assert_eq!(game.duel().state().age(), 3);
            assert!(game.duel().state().pyramid().is_cleared());
        }
        victories.push(outcome.victory);
    }

    assert_eq!(victories.len(), 40);
}

#[test]
fn test_history_is_ordered_and_wonders_bounded() {
    let catalog = standard();
    let mut game = random_match(&catalog, 77);
    game.run().unwrap();

    let state = game.duel().state();
    let mut last_turn = 0;
    for record in state.history().iter() {
        assert!(record.turn >= last_turn);
        last_turn = record.turn;
    }
    for (_, ledger) in state.players().iter() {
        assert!(ledger.built_wonder_count() <= 4);
    }
    assert!(state.wonders_built() <= 7);
}

#[test]
fn test_greedy_finishes_against_random() {
    let catalog = standard();
    let duel = Duel::new(Arc::clone(&catalog), DuelConfig::new(5)).unwrap();
    let mut game = Match::new(duel, Box::new(GreedyAgent::new()), Box::new(RandomAgent::new(3)));

    let outcome = game.run().unwrap();
    assert!(game.duel().is_over());
    assert_eq!(Some(&outcome), game.duel().outcome());
}

// =============================================================================
// Determinism and replay
// =============================================================================

#[test]
fn test_same_seed_same_game() {
    let catalog = standard();
    let mut a = random_match(&catalog, 2024);
    let mut b = random_match(&catalog, 2024);

    let outcome_a = a.run().unwrap();
    let outcome_b = b.run().unwrap();

    assert_eq!(outcome_a, outcome_b);
    assert_eq!(a.duel().state().log(), b.duel().state().log());
    assert_eq!(a.duel().state().history(), b.duel().state().history());
}

#[test]
fn test_different_seeds_deal_differently() {
    let a = Duel::standard(DuelConfig::new(1)).unwrap();
    let b = Duel::standard(DuelConfig::new(2)).unwrap();
    assert!(
        a.state().draft_pool() != b.state().draft_pool()
            || a.state().board_tokens() != b.state().board_tokens()
    );
}

#[test]
fn test_replay_round_trip() {
    let catalog = standard();
    let mut game = random_match(&catalog, 99);
    let outcome = game.run().unwrap();

    let replay = Replay::from_duel(game.duel());
    let bytes = replay.encode().unwrap();
    let decoded = Replay::decode(&bytes).unwrap();
    assert_eq!(decoded, replay);

    let rebuilt = decoded.replay(Arc::clone(&catalog)).unwrap();
    assert_eq!(rebuilt.outcome(), Some(&outcome));
    assert_eq!(rebuilt.state().log(), game.duel().state().log());
}

#[test]
fn test_scripted_agents_reproduce_a_game() {
    let catalog = standard();
    let mut original = random_match(&catalog, 31);
    let outcome = original.run().unwrap();

    let mut scripts = [Vec::new(), Vec::new()];
    for record in original.duel().state().history().iter() {
        scripts[record.player.index()].push(record.action);
    }
    let [first, second] = scripts;

    let duel = Duel::new(Arc::clone(&catalog), DuelConfig::new(31)).unwrap();
    let mut replayed = Match::new(
        duel,
        Box::new(ScriptedAgent::new(first)),
        Box::new(ScriptedAgent::new(second)),
    );
    assert_eq!(replayed.run().unwrap(), outcome);
}

#[test]
fn test_outcome_serializes_to_json() {
    let catalog = standard();
    let mut game = random_match(&catalog, 8);
    let outcome = game.run().unwrap();

    let json = serde_json::to_string(&outcome).unwrap();
    let back: GameOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outcome);

    let config = DuelConfig::new(8).with_wonder_build_limit(6);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<DuelConfig>(&json).unwrap(), config);
}

// =============================================================================
// Observers
// =============================================================================

struct Counter {
    events: Rc<RefCell<usize>>,
    turns: Rc<RefCell<Vec<PlayerId>>>,
}

impl GameObserver for Counter {
    fn on_event(&mut self, event: &GameEvent, _state: &GameState) {
        *self.events.borrow_mut() += 1;
        if let GameEvent::TurnStarted { player, .. } = event {
            self.turns.borrow_mut().push(*player);
        }
    }
}

#[test]
fn test_observers_see_every_event() {
    let catalog = standard();
    let events = Rc::new(RefCell::new(0));
    let turns = Rc::new(RefCell::new(Vec::new()));
    let counter = Counter {
        events: Rc::clone(&events),
        turns: Rc::clone(&turns),
    };

    let mut game = random_match(&catalog, 4).with_observer(Box::new(counter));
    game.run().unwrap();

    // DraftOpened is emitted during setup, before any observer is attached.
    assert_eq!(*events.borrow(), game.duel().state().log().len() - 1);
    assert_eq!(
        &turns.borrow()[..3],
        &[PlayerId::SECOND, PlayerId::SECOND, PlayerId::FIRST]
    );
}
