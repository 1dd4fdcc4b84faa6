//! Per-player resource ledger.
//!
//! The ledger owns everything a player has accumulated: coins, built cards,
//! drafted wonders, science symbols, chain tags, and progress tokens.
//!
//! ## Invariants
//!
//! - Coins never go negative. Payments are checked by `pay` before any coin
//!   moves; losses inflicted by the opponent clamp at zero.
//! - Resource production is never cached. `produced` sums the Production
//!   effects of built cards and built wonders on every call, so destroying a
//!   card immediately changes the total.
//! - A science pair is claimed at most once per symbol, even if the count
//!   drops and rises again.

use im::{HashSet as ImHashSet, OrdSet, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{
    Card, CardColor, CardId, Catalog, ChainTag, ProgressToken, Resource, ScienceSymbol, WonderId,
};
use crate::error::InvalidAction;

use super::player::PlayerId;

/// A drafted wonder. Built iff a card is tucked under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WonderSlot {
    pub wonder: WonderId,
    pub tucked: Option<CardId>,
}

impl WonderSlot {
    #[must_use]
    pub fn new(wonder: WonderId) -> Self {
        Self { wonder, tucked: None }
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.tucked.is_some()
    }
}

/// Everything one player owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    id: PlayerId,
    coins: u32,
    built_cards: Vector<CardId>,
    wonders: Vector<WonderSlot>,
    science: [u8; 7],
    claimed_pairs: [bool; 7],
    chain_tags: ImHashSet<ChainTag>,
    tokens: OrdSet<ProgressToken>,
}

impl PlayerLedger {
    #[must_use]
    pub fn new(id: PlayerId, coins: u32) -> Self {
        Self {
            id,
            coins,
            built_cards: Vector::new(),
            wonders: Vector::new(),
            science: [0; 7],
            claimed_pairs: [false; 7],
            chain_tags: ImHashSet::new(),
            tokens: OrdSet::new(),
        }
    }

    // === Coins ===

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn gain_coins(&mut self, amount: u32) {
        self.coins += amount;
    }

    /// Spend coins. Fails without touching the balance if it is too low.
    pub fn pay(&mut self, amount: u32) -> Result<(), InvalidAction> {
        if amount > self.coins {
            return Err(InvalidAction::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Lose up to `amount` coins. Returns how many were actually lost.
    pub fn lose_coins(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.coins);
        self.coins -= lost;
        lost
    }

    // === Cards ===

    #[must_use]
    pub fn built_cards(&self) -> &Vector<CardId> {
        &self.built_cards
    }

    #[must_use]
    pub fn owns_card(&self, card: CardId) -> bool {
        self.built_cards.contains(&card)
    }

    /// Record a built card and the chain tag it grants.
    ///
    /// Science symbols are not added here; the effect resolver does that so
    /// it can react to a completed pair.
    pub fn add_card(&mut self, card: &Card) {
        self.built_cards.push_back(card.id);
        if let Some(tag) = &card.chain_out {
            self.chain_tags.insert(tag.clone());
        }
    }

    /// Remove a destroyed card.
    ///
    /// Chain tags are rebuilt from the remaining cards and the card's science
    /// symbol is taken back. Returns false if the card was not owned.
    pub fn remove_card(&mut self, catalog: &Catalog, card: &Card) -> bool {
        let Some(pos) = self.built_cards.index_of(&card.id) else {
            return false;
        };
        self.built_cards.remove(pos);

        for effect in &card.effects {
            if let crate::effects::Effect::Science(symbol) = effect {
                let count = &mut self.science[symbol.index()];
                *count = count.saturating_sub(1);
            }
        }

        self.chain_tags = self
            .built_cards
            .iter()
            .filter_map(|id| catalog.card(*id))
            .filter_map(|c| c.chain_out.clone())
            .collect();
        true
    }

    #[must_use]
    pub fn has_chain(&self, tag: &ChainTag) -> bool {
        self.chain_tags.contains(tag)
    }

    #[must_use]
    pub fn chain_tags(&self) -> &ImHashSet<ChainTag> {
        &self.chain_tags
    }

    /// Built cards of the given color.
    #[must_use]
    pub fn count_color(&self, catalog: &Catalog, color: CardColor) -> u32 {
        self.built_cards
            .iter()
            .filter_map(|id| catalog.card(*id))
            .filter(|c| c.color == color)
            .count() as u32
    }

    /// Live production of a resource across built cards and built wonders.
    #[must_use]
    pub fn produced(&self, catalog: &Catalog, resource: Resource) -> u32 {
        let from_cards: u32 = self
            .built_cards
            .iter()
            .filter_map(|id| catalog.card(*id))
            .map(|c| u32::from(c.production(resource)))
            .sum();
        let from_wonders: u32 = self
            .wonders
            .iter()
            .filter(|slot| slot.is_built())
            .filter_map(|slot| catalog.wonder(slot.wonder))
            .map(|w| u32::from(w.production(resource)))
            .sum();
        from_cards + from_wonders
    }

    // === Wonders ===

    #[must_use]
    pub fn wonders(&self) -> &Vector<WonderSlot> {
        &self.wonders
    }

    pub fn add_wonder(&mut self, wonder: WonderId) {
        self.wonders.push_back(WonderSlot::new(wonder));
    }

    /// Unbuilt drafted wonders, in draft order.
    pub fn unbuilt_wonders(&self) -> impl Iterator<Item = WonderId> + '_ {
        self.wonders.iter().filter(|s| !s.is_built()).map(|s| s.wonder)
    }

    #[must_use]
    pub fn built_wonder_count(&self) -> usize {
        self.wonders.iter().filter(|s| s.is_built()).count()
    }

    /// Mark a wonder built. Returns false if it is not an unbuilt wonder of
    /// this player.
    pub fn tuck(&mut self, wonder: WonderId, card: CardId) -> bool {
        let Some(pos) = self
            .wonders
            .iter()
            .position(|s| s.wonder == wonder && !s.is_built())
        else {
            return false;
        };
        self.wonders.set(pos, WonderSlot { wonder, tucked: Some(card) });
        true
    }

    /// Drop every unbuilt wonder. Returns the removed ids.
    pub fn discard_unbuilt_wonders(&mut self) -> Vec<WonderId> {
        let removed: Vec<WonderId> = self.unbuilt_wonders().collect();
        self.wonders.retain(|s| s.is_built());
        removed
    }

    // === Science ===

    #[must_use]
    pub fn science_count(&self, symbol: ScienceSymbol) -> u8 {
        self.science[symbol.index()]
    }

    /// Add one science symbol. Returns true when this completes a pair that
    /// has not been claimed before; the pair is claimed.
    pub fn add_science(&mut self, symbol: ScienceSymbol) -> bool {
        let i = symbol.index();
        self.science[i] += 1;
        if self.science[i] >= 2 && !self.claimed_pairs[i] {
            self.claimed_pairs[i] = true;
            true
        } else {
            false
        }
    }

    /// Number of different science symbols held.
    #[must_use]
    pub fn distinct_science(&self) -> usize {
        self.science.iter().filter(|&&n| n > 0).count()
    }

    // === Progress tokens ===

    #[must_use]
    pub fn tokens(&self) -> &OrdSet<ProgressToken> {
        &self.tokens
    }

    #[must_use]
    pub fn has_token(&self, token: ProgressToken) -> bool {
        self.tokens.contains(&token)
    }

    pub fn add_token(&mut self, token: ProgressToken) {
        self.tokens.insert(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CatalogBuilder, ResourceBundle};
    use crate::effects::Effect;

    fn catalog() -> Catalog {
        let mut builder = CatalogBuilder::new();
        builder.add_card(
            Card::new("Lumber", 1, CardColor::Brown)
                .with_effect(Effect::Production(ResourceBundle::single(Resource::Wood, 1))),
        );
        builder.add_card(
            Card::new("Sawmill", 2, CardColor::Brown)
                .with_effect(Effect::Production(ResourceBundle::single(Resource::Wood, 2))),
        );
        builder.add_card(
            Card::new("Scriptorium", 1, CardColor::Green)
                .with_chain_out("Book")
                .with_effect(Effect::Science(ScienceSymbol::Quill)),
        );
        builder.add_card(Card::new("Stable", 1, CardColor::Red).with_chain_out("Book"));
        builder.build().unwrap()
    }

    fn build(ledger: &mut PlayerLedger, catalog: &Catalog, id: u32) {
        ledger.add_card(catalog.card(CardId(id)).unwrap());
    }

    #[test]
    fn test_pay_is_validated() {
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, 3);
        assert_eq!(
            ledger.pay(4),
            Err(InvalidAction::InsufficientCoins { needed: 4, available: 3 })
        );
        assert_eq!(ledger.coins(), 3);
        assert!(ledger.pay(3).is_ok());
        assert_eq!(ledger.coins(), 0);
    }

    #[test]
    fn test_losses_clamp_at_zero() {
        let mut ledger = PlayerLedger::new(PlayerId::SECOND, 3);
        assert_eq!(ledger.lose_coins(5), 3);
        assert_eq!(ledger.coins(), 0);
        assert_eq!(ledger.lose_coins(2), 0);
    }

    #[test]
    fn test_production_is_live() {
        let catalog = catalog();
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, 0);
        build(&mut ledger, &catalog, 0);
        build(&mut ledger, &catalog, 1);
        assert_eq!(ledger.produced(&catalog, Resource::Wood), 3);

        ledger.remove_card(&catalog, catalog.card(CardId(1)).unwrap());
        assert_eq!(ledger.produced(&catalog, Resource::Wood), 1);
        assert_eq!(ledger.count_color(&catalog, CardColor::Brown), 1);
    }

    #[test]
    fn test_destruction_recomputes_chains_and_science() {
        let catalog = catalog();
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, 0);
        let book = ChainTag::new("Book");

        build(&mut ledger, &catalog, 2);
        ledger.add_science(ScienceSymbol::Quill);
        build(&mut ledger, &catalog, 3);
        assert!(ledger.has_chain(&book));

        ledger.remove_card(&catalog, catalog.card(CardId(2)).unwrap());
        assert!(ledger.has_chain(&book), "Stable still grants the tag");
        assert_eq!(ledger.science_count(ScienceSymbol::Quill), 0);

        ledger.remove_card(&catalog, catalog.card(CardId(3)).unwrap());
        assert!(!ledger.has_chain(&book));
        assert!(!ledger.remove_card(&catalog, catalog.card(CardId(3)).unwrap()));
    }

    #[test]
    fn test_science_pair_claimed_once() {
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, 0);
        assert!(!ledger.add_science(ScienceSymbol::Wheel));
        assert!(ledger.add_science(ScienceSymbol::Wheel));
        assert!(!ledger.add_science(ScienceSymbol::Wheel));
        assert_eq!(ledger.distinct_science(), 1);
        ledger.add_science(ScienceSymbol::Law);
        assert_eq!(ledger.distinct_science(), 2);
    }

    #[test]
    fn test_wonder_slots() {
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, 0);
        ledger.add_wonder(WonderId(4));
        ledger.add_wonder(WonderId(7));

        assert!(ledger.tuck(WonderId(7), CardId(1)));
        assert!(!ledger.tuck(WonderId(7), CardId(2)), "already built");
        assert!(!ledger.tuck(WonderId(9), CardId(2)), "not drafted");
        assert_eq!(ledger.built_wonder_count(), 1);
        assert_eq!(ledger.unbuilt_wonders().collect::<Vec<_>>(), vec![WonderId(4)]);

        assert_eq!(ledger.discard_unbuilt_wonders(), vec![WonderId(4)]);
        assert_eq!(ledger.wonders().len(), 1);
    }
}
