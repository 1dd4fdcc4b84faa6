//! Cost calculation with chains, discounts, and trading.
//!
//! For each resource a card or wonder requires:
//! 1. Knock 2 off the requirement when a discount applies (Masonry for blue
//!    cards, Architecture for wonders), never going below zero.
//! 2. Subtract what the buyer produces.
//! 3. Buy the shortfall from the bank at `2 + opponent's production` coins
//!    per unit.
//!
//! A card whose chain tag the buyer already holds is free.
//!
//! All functions here are pure.

use smallvec::SmallVec;

use crate::cards::{Card, CardColor, Catalog, ProgressToken, Resource, ResourceCost, Wonder};
use crate::core::PlayerLedger;

/// Reduction per resource type granted by Masonry and Architecture.
pub const DISCOUNT_PER_RESOURCE: u8 = 2;

/// Base trading price before the opponent's production is added.
pub const BASE_TRADE_PRICE: u32 = 2;

/// One resource bought from the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeLine {
    pub resource: Resource,
    pub units: u32,
    pub unit_price: u32,
}

/// What an acquisition costs the buyer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Price {
    /// Printed coin cost.
    pub base: u32,
    /// Coins paid for missing resources.
    pub trade: u32,
    /// Obtained for free through a chain tag.
    pub chained: bool,
    pub lines: SmallVec<[TradeLine; 5]>,
}

impl Price {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.base + self.trade
    }

    #[must_use]
    pub fn free_by_chain() -> Self {
        Self {
            chained: true,
            ..Self::default()
        }
    }
}

/// Price of a pyramid card for `buyer`.
///
/// ```
/// use wonders_duel::cards::{Card, CardColor, CatalogBuilder, Resource};
/// use wonders_duel::core::{PlayerId, PlayerLedger};
/// use wonders_duel::rules::cost::card_cost;
///
/// let catalog = CatalogBuilder::new().build().unwrap();
/// let card = Card::new("Stable", 1, CardColor::Red)
///     .with_coins(2)
///     .with_resource(Resource::Wood, 1);
/// let buyer = PlayerLedger::new(PlayerId::FIRST, 7);
/// let opponent = PlayerLedger::new(PlayerId::SECOND, 7);
///
/// let price = card_cost(&catalog, &card, &buyer, &opponent);
/// assert_eq!(price.total(), 4);
/// ```
#[must_use]
pub fn card_cost(
    catalog: &Catalog,
    card: &Card,
    buyer: &PlayerLedger,
    opponent: &PlayerLedger,
) -> Price {
    if card.chain_in.as_ref().is_some_and(|tag| buyer.has_chain(tag)) {
        return Price::free_by_chain();
    }
    let discounted = card.color == CardColor::Blue && buyer.has_token(ProgressToken::Masonry);
    resource_price(catalog, &card.cost, discounted, buyer, opponent)
}

/// Price of a wonder for `buyer`.
#[must_use]
pub fn wonder_cost(
    catalog: &Catalog,
    wonder: &Wonder,
    buyer: &PlayerLedger,
    opponent: &PlayerLedger,
) -> Price {
    let discounted = buyer.has_token(ProgressToken::Architecture);
    resource_price(catalog, &wonder.cost, discounted, buyer, opponent)
}

fn resource_price(
    catalog: &Catalog,
    cost: &ResourceCost,
    discounted: bool,
    buyer: &PlayerLedger,
    opponent: &PlayerLedger,
) -> Price {
    let mut price = Price {
        base: cost.coins,
        ..Price::default()
    };

    for (resource, required) in cost.resources.iter() {
        let required = if discounted {
            required.saturating_sub(DISCOUNT_PER_RESOURCE)
        } else {
            required
        };
        let shortfall = u32::from(required).saturating_sub(buyer.produced(catalog, resource));
        if shortfall == 0 {
            continue;
        }
        let unit_price = BASE_TRADE_PRICE + opponent.produced(catalog, resource);
        price.trade += shortfall * unit_price;
        price.lines.push(TradeLine {
            resource,
            units: shortfall,
            unit_price,
        });
    }
    price
}
