//! Rules engine trait and the duel implementation.
//!
//! `RulesEngine` separates checking an action from applying it:
//! - `validate`: Side-effect-free; safe to call speculatively
//! - `apply_action`: Assumes a validated action and mutates the state
//! - `legal_actions`: Every candidate that passes `validate`
//! - `is_terminal`: The outcome once the game is over

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::Catalog;
use crate::core::{Action, DuelConfig, GameState, PlayerId, PlayerMap};
use crate::error::{DuelError, InvalidAction, SetupError};

use super::machine;
use super::scoring::ScoreSheet;
use super::validate;

/// How the game was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryType {
    /// The marker reached a capital.
    Military,
    /// A player collected enough different science symbols.
    Science,
    /// Points after age 3.
    Civilian,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub victory: VictoryType,
    /// `None` only for a civilian draw.
    pub winner: Option<PlayerId>,
    /// Final score sheets, computed for every kind of victory.
    pub scores: PlayerMap<ScoreSheet>,
}

impl GameOutcome {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == Some(player)
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate` must not mutate anything, so `legal_actions` can call it for
///   every candidate.
/// - `apply_action` must be deterministic: the same state and action always
///   produce the same successor state.
pub trait RulesEngine {
    fn config(&self) -> &DuelConfig;

    fn catalog(&self) -> &Catalog;

    /// Check an action without changing the state.
    fn validate(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), InvalidAction>;

    /// Apply a validated action.
    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<(), DuelError>;

    /// `Some(outcome)` once the game has ended.
    fn is_terminal<'s>(&self, state: &'s GameState) -> Option<&'s GameOutcome>;

    /// Every action worth checking in the current phase, legal or not.
    fn candidate_actions(&self, state: &GameState) -> Vec<Action>;

    // === Convenience Methods ===

    /// All legal actions for the player whose decision it is.
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let player = state.current_player();
        self.candidate_actions(state)
            .into_iter()
            .filter(|a| self.validate(state, player, a).is_ok())
            .collect()
    }
}

/// The duel rules over a shared catalog.
#[derive(Clone, Debug)]
pub struct DuelRules {
    catalog: Arc<Catalog>,
    config: DuelConfig,
}

impl DuelRules {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: DuelConfig) -> Self {
        Self { catalog, config }
    }

    /// Shuffle tokens and wonders and open the draft.
    pub fn setup(&self) -> Result<GameState, SetupError> {
        machine::setup(&self.catalog, &self.config)
    }

    #[must_use]
    pub fn shared_catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

impl RulesEngine for DuelRules {
    fn config(&self) -> &DuelConfig {
        &self.config
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn validate(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), InvalidAction> {
        validate::validate(&self.catalog, &self.config, state, player, action)
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<(), DuelError> {
        machine::apply(&self.catalog, &self.config, state, player, action)
    }

    fn is_terminal<'s>(&self, state: &'s GameState) -> Option<&'s GameOutcome> {
        state.outcome()
    }

    fn candidate_actions(&self, state: &GameState) -> Vec<Action> {
        validate::candidates(&self.catalog, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_outcome_is_winner() {
        let outcome = GameOutcome {
            victory: VictoryType::Science,
            winner: Some(PlayerId::SECOND),
            scores: PlayerMap::default(),
        };
        assert!(outcome.is_winner(PlayerId::SECOND));
        assert!(!outcome.is_winner(PlayerId::FIRST));
        assert!(!outcome.is_draw());

        let draw = GameOutcome {
            victory: VictoryType::Civilian,
            winner: None,
            scores: PlayerMap::default(),
        };
        assert!(draw.is_draw());
        assert!(!draw.is_winner(PlayerId::FIRST));
    }

    #[test]
    fn test_rules_open_the_draft() {
        let rules = DuelRules::new(Arc::new(Catalog::standard().unwrap()), DuelConfig::new(3));
        let state = rules.setup().unwrap();
        assert!(rules.is_terminal(&state).is_none());

        let legal = rules.legal_actions(&state);
        assert_eq!(legal.len(), 4);
        assert!(legal.iter().all(|a| matches!(a, Action::DraftWonder(_))));
    }
}
