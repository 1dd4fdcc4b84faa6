//! Effect resolution - applying a built card's or wonder's effects.
//!
//! Effects resolve in declared order. An effect may change a ledger, move the
//! military marker, queue an interrupt, or set the pending extra turn.
//! Reaching military supremacy stops the cascade: later effects of the same
//! source are not applied.

use crate::cards::{CardId, Catalog, ProgressToken, WonderId};
use crate::core::{GameEvent, GameState, Interrupt, PlayerId};
use crate::error::DuelError;

use super::Effect;

/// What is being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectSource {
    Card(CardId),
    Wonder(WonderId),
}

/// Whether resolution ran to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Completed,
    /// The marker reached a capital. The remaining effects were skipped.
    Supremacy(PlayerId),
}

/// Mutable context one effect applies against.
pub struct EffectContext<'a> {
    pub state: &'a mut GameState,
    pub catalog: &'a Catalog,
    pub owner: PlayerId,
    pub source: EffectSource,
}

impl Effect {
    /// Apply this effect once.
    pub fn apply(&self, ctx: &mut EffectContext<'_>) -> Resolution {
        let owner = ctx.owner;
        let state = &mut *ctx.state;

        match self {
            Effect::Production(_) | Effect::VictoryPoints(_) => {}

            Effect::Military(printed) => {
                let bonus = matches!(ctx.source, EffectSource::Card(_))
                    && state.players[owner].has_token(ProgressToken::Strategy);
                let shields = printed + u8::from(bonus);

                let (_, opponent) = state.players.pair_mut(owner);
                let loot = state.military.apply_shields(shields, owner, opponent);
                let position = state.military.position();
                state.emit(GameEvent::MilitaryMoved {
                    player: owner,
                    shields,
                    position,
                });
                for l in loot {
                    state.emit(GameEvent::Looted {
                        victim: owner.opponent(),
                        threshold: l.threshold,
                        lost: l.lost,
                    });
                }
                if let Some(winner) = state.military.supremacy() {
                    return Resolution::Supremacy(winner);
                }
            }

            Effect::Science(symbol) => {
                if state.players[owner].add_science(*symbol) {
                    state.emit(GameEvent::SciencePairCompleted {
                        player: owner,
                        symbol: *symbol,
                    });
                    state.pending.push_back(Interrupt::SciencePair);
                }
            }

            Effect::Coins(amount) => {
                state.players[owner].gain_coins(*amount);
                state.emit(GameEvent::CoinsGained {
                    player: owner,
                    amount: *amount,
                });
            }

            Effect::CoinLoss(amount) => {
                let victim = owner.opponent();
                let lost = state.players[victim].lose_coins(*amount);
                state.emit(GameEvent::CoinsLost {
                    player: victim,
                    amount: lost,
                });
            }

            Effect::Guild {
                basis,
                coins_per_item,
                ..
            } => {
                let count = basis.best_count(
                    ctx.catalog,
                    &state.players[owner],
                    &state.players[owner.opponent()],
                );
                let amount = count * coins_per_item;
                if amount > 0 {
                    state.players[owner].gain_coins(amount);
                    state.emit(GameEvent::CoinsGained {
                        player: owner,
                        amount,
                    });
                }
            }

            Effect::Destruction(color) => {
                state.pending.push_back(Interrupt::Destroy(*color));
            }

            Effect::LibraryChoice => {
                state.pending.push_back(Interrupt::Library);
            }

            Effect::Resurrect => {
                state.pending.push_back(Interrupt::Rebuild);
            }

            Effect::ExtraTurn => {
                state.extra_turn = true;
                state.emit(GameEvent::ExtraTurnGranted { player: owner });
            }
        }
        Resolution::Completed
    }
}

/// Resolves all effects of a card or wonder.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply every effect of `source` for `owner`, in declared order.
    pub fn resolve(
        state: &mut GameState,
        catalog: &Catalog,
        owner: PlayerId,
        source: EffectSource,
    ) -> Result<Resolution, DuelError> {
        let effects = match source {
            EffectSource::Card(id) => &catalog.card_checked(id)?.effects,
            EffectSource::Wonder(id) => &catalog.wonder_checked(id)?.effects,
        };

        let mut ctx = EffectContext {
            state,
            catalog,
            owner,
            source,
        };
        for effect in effects {
            if let Resolution::Supremacy(winner) = effect.apply(&mut ctx) {
                return Ok(Resolution::Supremacy(winner));
            }
        }
        Ok(Resolution::Completed)
    }
}
