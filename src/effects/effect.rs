//! Effect definitions.
//!
//! Every card and wonder carries an ordered list of `Effect`s. The set is
//! closed: resolution and scoring are an exhaustive `match`, so adding a
//! variant forces every consumer to handle it.
//!
//! ## Immediate effects
//!
//! Applied once when the card or wonder is built (see `EffectResolver`):
//! - `Military`, `Science`, `Coins`, `CoinLoss`
//! - `Guild` pays its coins immediately
//! - `Destruction`, `LibraryChoice`, `Resurrect` queue an interrupt
//! - `ExtraTurn` sets the pending extra-turn flag
//!
//! ## Passive effects
//!
//! - `Production` is never applied; it is read live by the cost calculator
//! - `VictoryPoints` and `Guild` score at game end

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardColor, Catalog, ResourceBundle, ScienceSymbol};
use crate::core::PlayerLedger;

/// What a guild counts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuildBasis {
    /// Built wonders.
    Wonders,
    /// Built cards of any of the listed colors, counted together.
    Colors(SmallVec<[CardColor; 2]>),
    /// One item per 3 coins.
    Coins,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Resources produced every turn.
    Production(ResourceBundle),

    /// Shields that push the military marker.
    Military(u8),

    Science(ScienceSymbol),

    /// Coins gained by the owner.
    Coins(u32),

    /// Coins the opponent loses, clamped at zero.
    CoinLoss(u32),

    VictoryPoints(u32),

    /// Pays and scores per item in the city that has the most of them.
    Guild {
        basis: GuildBasis,
        points_per_item: u32,
        coins_per_item: u32,
    },

    /// Destroy an opponent card of the given color.
    Destruction(CardColor),

    /// Choose a progress token from a random draw out of the box.
    LibraryChoice,

    /// Build a card from the discard pile for free.
    Resurrect,

    /// Play again after this turn.
    ExtraTurn,
}

/// Read-only view used by end-of-game scoring.
#[derive(Clone, Copy)]
pub struct ScoreContext<'a> {
    pub catalog: &'a Catalog,
    pub owner: &'a PlayerLedger,
    pub opponent: &'a PlayerLedger,
}

impl GuildBasis {
    /// Items one city holds.
    #[must_use]
    pub fn count_for(&self, catalog: &Catalog, ledger: &PlayerLedger) -> u32 {
        match self {
            GuildBasis::Wonders => ledger.built_wonder_count() as u32,
            GuildBasis::Colors(colors) => colors
                .iter()
                .map(|&color| ledger.count_color(catalog, color))
                .sum(),
            GuildBasis::Coins => ledger.coins() / 3,
        }
    }

    /// max(own count, opponent count).
    #[must_use]
    pub fn best_count(
        &self,
        catalog: &Catalog,
        owner: &PlayerLedger,
        opponent: &PlayerLedger,
    ) -> u32 {
        self.count_for(catalog, owner)
            .max(self.count_for(catalog, opponent))
    }
}

impl Effect {
    /// Victory points this effect is worth at game end. Pure.
    #[must_use]
    pub fn score_at_game_end(&self, ctx: &ScoreContext<'_>) -> u32 {
        match self {
            Effect::VictoryPoints(points) => *points,
            Effect::Guild {
                basis,
                points_per_item,
                ..
            } => basis.best_count(ctx.catalog, ctx.owner, ctx.opponent) * points_per_item,
            Effect::Production(_)
            | Effect::Military(_)
            | Effect::Science(_)
            | Effect::Coins(_)
            | Effect::CoinLoss(_)
            | Effect::Destruction(_)
            | Effect::LibraryChoice
            | Effect::Resurrect
            | Effect::ExtraTurn => 0,
        }
    }
}
