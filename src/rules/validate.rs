//! Action validation and candidate enumeration.
//!
//! Nothing here mutates state. `validate` checks, in order: the game is not
//! over, the actor is a seat and holds the turn, the action kind fits the
//! phase, and finally the action-specific conditions (availability,
//! ownership, affordability).

use crate::cards::Catalog;
use crate::core::{
    Action, ActionKind, DuelConfig, GameState, Phase, PlayerId, TokenSelection, PLAYER_COUNT,
};
use crate::error::InvalidAction;

use super::cost::{card_cost, wonder_cost};

/// Whether an action kind may be taken in a phase at all.
#[must_use]
pub fn phase_allows(phase: Phase, kind: ActionKind) -> bool {
    match phase {
        Phase::WonderDraft1 | Phase::WonderDraft2 => kind == ActionKind::DraftWonder,
        Phase::AgePlay => matches!(
            kind,
            ActionKind::BuildCard | ActionKind::DiscardCard | ActionKind::BuildWonder
        ),
        Phase::WaitingForTokenSelection(_) => kind == ActionKind::SelectToken,
        Phase::WaitingForDestruction => kind == ActionKind::DestroyCard,
        Phase::WaitingForDiscardRebuild => kind == ActionKind::RebuildFromDiscard,
        Phase::WaitingForStartPlayerChoice => kind == ActionKind::ChooseStartingPlayer,
        Phase::GameOver => false,
    }
}

/// Check whether `player` may take `action` now.
pub fn validate(
    catalog: &Catalog,
    config: &DuelConfig,
    state: &GameState,
    player: PlayerId,
    action: &Action,
) -> Result<(), InvalidAction> {
    if state.is_over() {
        return Err(InvalidAction::GameOver);
    }
    if player.index() >= PLAYER_COUNT {
        return Err(InvalidAction::UnknownPlayer(player));
    }
    if player != state.current_player() {
        return Err(InvalidAction::NotYourTurn {
            expected: state.current_player(),
            actual: player,
        });
    }
    if !phase_allows(state.phase(), action.kind()) {
        return Err(InvalidAction::WrongPhase {
            phase: state.phase(),
            action: action.kind(),
        });
    }

    let me = state.player(player);
    let opponent = state.player(player.opponent());

    match *action {
        Action::DraftWonder(wonder) => {
            if !state.draft_pool().contains(&wonder) {
                return Err(InvalidAction::WonderNotInPool(wonder));
            }
        }

        Action::BuildCard(card) => {
            if !state.pyramid().is_card_selectable(card) {
                return Err(InvalidAction::CardNotAvailable(card));
            }
            let definition = catalog.card(card).ok_or(InvalidAction::CardNotAvailable(card))?;
            let price = card_cost(catalog, definition, me, opponent);
            check_funds(price.total(), me.coins())?;
        }

        Action::DiscardCard(card) => {
            if !state.pyramid().is_card_selectable(card) {
                return Err(InvalidAction::CardNotAvailable(card));
            }
        }

        Action::BuildWonder { wonder, tuck } => {
            if !state.pyramid().is_card_selectable(tuck) {
                return Err(InvalidAction::CardNotAvailable(tuck));
            }
            let Some(slot) = me.wonders().iter().find(|s| s.wonder == wonder) else {
                return Err(InvalidAction::WonderNotOwned(wonder));
            };
            if slot.is_built() {
                return Err(InvalidAction::WonderAlreadyBuilt(wonder));
            }
            if state.wonders_built() >= config.wonder_build_limit {
                return Err(InvalidAction::WonderLimitReached(config.wonder_build_limit));
            }
            let definition = catalog.wonder(wonder).ok_or(InvalidAction::WonderNotOwned(wonder))?;
            let price = wonder_cost(catalog, definition, me, opponent);
            check_funds(price.total(), me.coins())?;
        }

        Action::SelectToken(token) => {
            let offered = match state.phase() {
                Phase::WaitingForTokenSelection(TokenSelection::Pair) => {
                    state.board_tokens().contains(&token)
                }
                Phase::WaitingForTokenSelection(TokenSelection::Library) => {
                    state.token_offer().contains(&token)
                }
                _ => false,
            };
            if !offered {
                return Err(InvalidAction::TokenNotOffered(token));
            }
        }

        Action::DestroyCard(card) => {
            if !state.destruction_targets(catalog).contains(&card) {
                return Err(InvalidAction::InvalidDestructionTarget(card));
            }
        }

        Action::RebuildFromDiscard(card) => {
            if !state.discard_pile().contains(&card) {
                return Err(InvalidAction::NotInDiscardPile(card));
            }
        }

        Action::ChooseStartingPlayer(chosen) => {
            if chosen.index() >= PLAYER_COUNT {
                return Err(InvalidAction::UnknownPlayer(chosen));
            }
        }
    }
    Ok(())
}

fn check_funds(needed: u32, available: u32) -> Result<(), InvalidAction> {
    if needed > available {
        Err(InvalidAction::InsufficientCoins { needed, available })
    } else {
        Ok(())
    }
}

/// Every action of the right kind for the current phase, before the
/// action-specific checks.
#[must_use]
pub fn candidates(catalog: &Catalog, state: &GameState) -> Vec<Action> {
    match state.phase() {
        Phase::WonderDraft1 | Phase::WonderDraft2 => {
            state.draft_pool().iter().map(|&w| Action::DraftWonder(w)).collect()
        }
        Phase::AgePlay => {
            let available = state.pyramid().available_cards();
            let wonders: Vec<_> = state.player(state.current_player()).unbuilt_wonders().collect();
            let mut actions = Vec::with_capacity(available.len() * (2 + wonders.len()));
            for &card in &available {
                actions.push(Action::BuildCard(card));
                actions.push(Action::DiscardCard(card));
                for &wonder in &wonders {
                    actions.push(Action::BuildWonder { wonder, tuck: card });
                }
            }
            actions
        }
        Phase::WaitingForTokenSelection(_) => {
            state.token_offer().into_iter().map(Action::SelectToken).collect()
        }
        Phase::WaitingForDestruction => state
            .destruction_targets(catalog)
            .into_iter()
            .map(Action::DestroyCard)
            .collect(),
        Phase::WaitingForDiscardRebuild => state
            .discard_pile()
            .iter()
            .map(|&c| Action::RebuildFromDiscard(c))
            .collect(),
        Phase::WaitingForStartPlayerChoice => PlayerId::BOTH
            .into_iter()
            .map(Action::ChooseStartingPlayer)
            .collect(),
        Phase::GameOver => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_table() {
        assert!(phase_allows(Phase::WonderDraft2, ActionKind::DraftWonder));
        assert!(phase_allows(Phase::AgePlay, ActionKind::BuildWonder));
        assert!(!phase_allows(Phase::AgePlay, ActionKind::SelectToken));
        assert!(!phase_allows(
            Phase::WaitingForTokenSelection(TokenSelection::Pair),
            ActionKind::BuildCard
        ));
        assert!(phase_allows(Phase::WaitingForDiscardRebuild, ActionKind::RebuildFromDiscard));
        assert!(!phase_allows(Phase::GameOver, ActionKind::ChooseStartingPlayer));
    }

    #[test]
    fn test_precedence_turn_before_phase() {
        let catalog = Catalog::standard().unwrap();
        let config = DuelConfig::default();
        let state = super::super::machine::setup(&catalog, &config).unwrap();

        let err = validate(
            &catalog,
            &config,
            &state,
            PlayerId::SECOND,
            &Action::BuildCard(crate::cards::CardId(0)),
        )
        .unwrap_err();
        assert!(matches!(err, InvalidAction::NotYourTurn { .. }));

        let err = validate(
            &catalog,
            &config,
            &state,
            PlayerId::FIRST,
            &Action::BuildCard(crate::cards::CardId(0)),
        )
        .unwrap_err();
        assert!(matches!(err, InvalidAction::WrongPhase { phase: Phase::WonderDraft1, .. }));

        let draft = Action::DraftWonder(crate::cards::WonderId(0));
        let err = validate(&catalog, &config, &state, PlayerId(7), &draft).unwrap_err();
        assert_eq!(err, InvalidAction::UnknownPlayer(PlayerId(7)));
    }
}
