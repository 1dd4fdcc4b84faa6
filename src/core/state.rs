//! Complete duel state.
//!
//! `GameState` holds everything that changes during a game. Collections are
//! `im` persistent structures, so cloning a state for speculative evaluation
//! is cheap and leaves the original untouched.
//!
//! Outside the crate the state is read-only: observers and decision sources
//! get `&GameState`, and all mutation goes through the rules engine.

use im::Vector;

use crate::board::{MilitaryTrack, Pyramid};
use crate::cards::{CardColor, CardId, Catalog, ProgressToken, WonderId};
use crate::rules::GameOutcome;

use super::action::ActionRecord;
use super::events::GameEvent;
use super::ledger::PlayerLedger;
use super::phase::{Phase, TokenSelection};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;

/// A mid-turn choice requested by an effect, waiting to be entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    SciencePair,
    Library,
    Destroy(CardColor),
    Rebuild,
}

#[derive(Clone, Debug)]
pub struct GameState {
    // === Progression ===
    pub(crate) phase: Phase,

    /// Current age, 0 during the wonder draft.
    pub(crate) age: u8,

    pub(crate) current_player: PlayerId,

    /// Turn counter, incremented whenever a player starts a turn.
    pub(crate) turn_number: u32,

    /// Actions recorded in the current turn.
    pub(crate) action_sequence: u32,

    // === Board ===
    pub(crate) players: PlayerMap<PlayerLedger>,
    pub(crate) pyramid: Pyramid,
    pub(crate) military: MilitaryTrack,
    pub(crate) discard_pile: Vector<CardId>,

    // === Progress tokens ===
    pub(crate) board_tokens: Vector<ProgressToken>,
    pub(crate) token_box: Vector<ProgressToken>,
    pub(crate) library_offer: Vector<ProgressToken>,

    // === Wonder draft ===
    pub(crate) draft_pool: Vector<WonderId>,
    pub(crate) draft_reserve: Vector<WonderId>,
    pub(crate) draft_picks: usize,
    pub(crate) removed_wonders: Vector<WonderId>,

    // === Turn-local ===
    pub(crate) pending: Vector<Interrupt>,
    pub(crate) destruction_color: Option<CardColor>,
    pub(crate) extra_turn: bool,

    pub(crate) outcome: Option<GameOutcome>,

    // === Trace ===
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) log: Vector<GameEvent>,

    pub(crate) rng: GameRng,
}

impl GameState {
    /// An empty state before setup: draft phase, no cards dealt.
    #[must_use]
    pub fn new(seed: u64, starting_coins: u32) -> Self {
        Self {
            phase: Phase::WonderDraft1,
            age: 0,
            current_player: PlayerId::FIRST,
            turn_number: 1,
            action_sequence: 0,
            players: PlayerMap::new(|p| PlayerLedger::new(p, starting_coins)),
            pyramid: Pyramid::default(),
            military: MilitaryTrack::new(),
            discard_pile: Vector::new(),
            board_tokens: Vector::new(),
            token_box: Vector::new(),
            library_offer: Vector::new(),
            draft_pool: Vector::new(),
            draft_reserve: Vector::new(),
            draft_picks: 0,
            removed_wonders: Vector::new(),
            pending: Vector::new(),
            destruction_color: None,
            extra_turn: false,
            outcome: None,
            history: Vector::new(),
            log: Vector::new(),
            rng: GameRng::new(seed),
        }
    }

    // === Progression ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// An extra turn is waiting for the end of the current turn.
    #[must_use]
    pub fn extra_turn_pending(&self) -> bool {
        self.extra_turn
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerLedger {
        &self.players[player]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerLedger> {
        &self.players
    }

    /// Wonders built by both players together.
    #[must_use]
    pub fn wonders_built(&self) -> usize {
        self.players.iter().map(|(_, l)| l.built_wonder_count()).sum()
    }

    // === Board ===

    #[must_use]
    pub fn pyramid(&self) -> &Pyramid {
        &self.pyramid
    }

    #[must_use]
    pub fn military(&self) -> &MilitaryTrack {
        &self.military
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardId> {
        &self.discard_pile
    }

    // === Tokens ===

    #[must_use]
    pub fn board_tokens(&self) -> &Vector<ProgressToken> {
        &self.board_tokens
    }

    /// Tokens still in the box. Hidden information in the physical game.
    #[must_use]
    pub fn token_box(&self) -> &Vector<ProgressToken> {
        &self.token_box
    }

    /// Tokens the acting player may pick from in the current phase.
    #[must_use]
    pub fn token_offer(&self) -> Vec<ProgressToken> {
        match self.phase {
            Phase::WaitingForTokenSelection(TokenSelection::Pair) => {
                self.board_tokens.iter().copied().collect()
            }
            Phase::WaitingForTokenSelection(TokenSelection::Library) => {
                self.library_offer.iter().copied().collect()
            }
            _ => Vec::new(),
        }
    }

    // === Wonders ===

    /// Wonders on offer in the current draft phase.
    #[must_use]
    pub fn draft_pool(&self) -> &Vector<WonderId> {
        &self.draft_pool
    }

    /// Wonders that left the game unbuilt.
    #[must_use]
    pub fn removed_wonders(&self) -> &Vector<WonderId> {
        &self.removed_wonders
    }

    // === Interrupts ===

    /// Color the acting player must destroy, while destruction is pending.
    #[must_use]
    pub fn destruction_color(&self) -> Option<CardColor> {
        self.destruction_color
    }

    /// Opponent cards the acting player may destroy.
    #[must_use]
    pub fn destruction_targets(&self, catalog: &Catalog) -> Vec<CardId> {
        match (self.phase, self.destruction_color) {
            (Phase::WaitingForDestruction, Some(color)) => {
                self.cards_of_color(catalog, self.current_player.opponent(), color)
            }
            _ => Vec::new(),
        }
    }

    pub(crate) fn cards_of_color(
        &self,
        catalog: &Catalog,
        owner: PlayerId,
        color: CardColor,
    ) -> Vec<CardId> {
        self.players[owner]
            .built_cards()
            .iter()
            .copied()
            .filter(|id| catalog.card(*id).is_some_and(|c| c.color == color))
            .collect()
    }

    // === Trace ===

    /// Every accepted action, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Every event emitted so far, in order.
    #[must_use]
    pub fn log(&self) -> &Vector<GameEvent> {
        &self.log
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.log.push_back(event);
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: crate::core::Action) {
        let record = ActionRecord::new(player, action, self.turn_number, self.action_sequence);
        self.action_sequence += 1;
        self.history.push_back(record);
    }

    /// Hand the turn to `player`.
    pub(crate) fn begin_turn(&mut self, player: PlayerId) {
        self.current_player = player;
        self.turn_number += 1;
        self.action_sequence = 0;
        self.emit(GameEvent::TurnStarted {
            player,
            turn: self.turn_number,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(5, 7);
        assert_eq!(state.phase(), Phase::WonderDraft1);
        assert_eq!(state.age(), 0);
        assert_eq!(state.current_player(), PlayerId::FIRST);
        assert_eq!(state.player(PlayerId::SECOND).coins(), 7);
        assert!(state.outcome().is_none());
        assert!(state.log().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = GameState::new(5, 7);
        let snapshot = state.clone();

        state.players[PlayerId::FIRST].gain_coins(3);
        state.emit(GameEvent::ExtraTurnGranted { player: PlayerId::FIRST });

        assert_eq!(snapshot.player(PlayerId::FIRST).coins(), 7);
        assert!(snapshot.log().is_empty());
        assert_eq!(state.log().len(), 1);
    }

    #[test]
    fn test_begin_turn_resets_sequence() {
        let mut state = GameState::new(0, 7);
        state.record(PlayerId::FIRST, crate::core::Action::ChooseStartingPlayer(PlayerId::FIRST));
        assert_eq!(state.history()[0].sequence, 0);
        state.record(PlayerId::FIRST, crate::core::Action::ChooseStartingPlayer(PlayerId::FIRST));
        assert_eq!(state.history()[1].sequence, 1);

        state.begin_turn(PlayerId::SECOND);
        assert_eq!(state.turn_number(), 2);
        assert_eq!(state.current_player(), PlayerId::SECOND);
        state.record(PlayerId::SECOND, crate::core::Action::ChooseStartingPlayer(PlayerId::SECOND));
        assert_eq!(state.history()[2].sequence, 0);
        assert_eq!(state.history()[2].turn, 2);
    }
}
