//! A single game instance.
//!
//! `Duel` pairs the rules with one `GameState` and is the only way to change
//! that state from outside the crate. `process` is atomic: an action is
//! either rejected with the state untouched, or fully applied.

use std::sync::Arc;

use crate::cards::{CardId, Catalog, WonderId};
use crate::core::{
    Action, DuelConfig, GameEvent, GameState, Phase, PlayerId, PlayerLedger, PlayerMap,
    PLAYER_COUNT,
};
use crate::error::Result;
use crate::rules::{
    card_cost, score_all, wonder_cost, DuelRules, GameOutcome, Price, RulesEngine, ScoreSheet,
};

#[derive(Clone, Debug)]
pub struct Duel {
    rules: DuelRules,
    state: GameState,
}

impl Duel {
    /// Validate the configuration and catalog, shuffle, and open the draft.
    pub fn new(catalog: Arc<Catalog>, config: DuelConfig) -> Result<Self> {
        let rules = DuelRules::new(catalog, config);
        let state = rules.setup()?;
        Ok(Self { rules, state })
    }

    /// A duel on the built-in card set.
    pub fn standard(config: DuelConfig) -> Result<Self> {
        Self::new(Arc::new(Catalog::standard()?), config)
    }

    /// Validate and apply one action. Returns the events it produced.
    pub fn process(&mut self, player: PlayerId, action: Action) -> Result<Vec<GameEvent>> {
        self.rules.validate(&self.state, player, &action)?;

        let before = self.state.log().len();
        let mut next = self.state.clone();
        self.rules.apply_action(&mut next, player, action)?;
        self.state = next;

        Ok(self.state.log().iter().skip(before).cloned().collect())
    }

    /// Check an action without applying it.
    pub fn check(&self, player: PlayerId, action: &Action) -> Result<()> {
        self.rules.validate(&self.state, player, action)?;
        Ok(())
    }

    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.rules.legal_actions(&self.state)
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.rules.catalog()
    }

    #[must_use]
    pub fn shared_catalog(&self) -> &Arc<Catalog> {
        self.rules.shared_catalog()
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The player who must decide next, interrupts and start-player choice
    /// included.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.rules.is_terminal(&self.state)
    }

    /// Score sheets as if the game ended now.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<ScoreSheet> {
        score_all(self.catalog(), &self.state)
    }

    /// What `player` would pay for a card right now. `None` for unknown ids.
    #[must_use]
    pub fn card_price(&self, player: PlayerId, card: CardId) -> Option<Price> {
        let (buyer, opponent) = self.seats(player)?;
        let definition = self.catalog().card(card)?;
        Some(card_cost(self.catalog(), definition, buyer, opponent))
    }

    /// What `player` would pay for a wonder right now. `None` for unknown ids.
    #[must_use]
    pub fn wonder_price(&self, player: PlayerId, wonder: WonderId) -> Option<Price> {
        let (buyer, opponent) = self.seats(player)?;
        let definition = self.catalog().wonder(wonder)?;
        Some(wonder_cost(self.catalog(), definition, buyer, opponent))
    }

    /// Ledgers of `player` and the opponent, if `player` is seated.
    fn seats(&self, player: PlayerId) -> Option<(&PlayerLedger, &PlayerLedger)> {
        if player.index() >= PLAYER_COUNT {
            return None;
        }
        Some((self.state.player(player), self.state.player(player.opponent())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DuelError, InvalidAction};

    #[test]
    fn test_prices_for_unseated_player() {
        let duel = Duel::standard(DuelConfig::new(8)).unwrap();
        let wonder = duel.state().draft_pool()[0];

        assert!(duel.card_price(PlayerId(2), CardId(0)).is_none());
        assert!(duel.wonder_price(PlayerId(2), wonder).is_none());
        assert!(duel.wonder_price(PlayerId::FIRST, wonder).is_some());
        assert!(duel.card_price(PlayerId::SECOND, CardId(u32::MAX)).is_none());
    }

    #[test]
    fn test_process_returns_new_events() {
        let mut duel = Duel::standard(DuelConfig::new(8)).unwrap();
        let wonder = duel.state().draft_pool()[0];

        let events = duel.process(PlayerId::FIRST, Action::DraftWonder(wonder)).unwrap();
        assert_eq!(
            events[0],
            GameEvent::WonderDrafted {
                player: PlayerId::FIRST,
                wonder
            }
        );
        assert!(matches!(
            events.last(),
            Some(GameEvent::TurnStarted {
                player: PlayerId::SECOND,
                ..
            })
        ));
        assert_eq!(duel.state().history().len(), 1);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut duel = Duel::standard(DuelConfig::new(8)).unwrap();
        let log_len = duel.state().log().len();
        let wonder = duel.state().draft_pool()[0];

        let err = duel.process(PlayerId::SECOND, Action::DraftWonder(wonder)).unwrap_err();
        assert!(matches!(
            err,
            DuelError::InvalidAction(InvalidAction::NotYourTurn { .. })
        ));
        assert_eq!(duel.state().log().len(), log_len);
        assert!(duel.state().history().is_empty());
        assert_eq!(duel.current_player(), PlayerId::FIRST);
    }

    #[test]
    fn test_invalid_config_aborts_setup() {
        let err = Duel::standard(DuelConfig::new(1).with_library_draw(0)).unwrap_err();
        assert!(matches!(err, DuelError::Setup(_)));
    }
}
