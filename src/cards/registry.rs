//! Catalog of card, wonder, and progress-token definitions.
//!
//! The `Catalog` is an arena: cards and wonders are stored in registration
//! order and `CardId` / `WonderId` are their indices. It is built once,
//! validated, and then shared read-only (behind an `Arc`) by every duel and
//! every speculative clone of a duel.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{DuelError, SetupError};

use super::definition::{Card, CardColor, CardId, Wonder, WonderId};
use super::loader::DataLoader;
use super::tokens::ProgressToken;

/// Immutable definitions for one game.
///
/// ## Example
///
/// ```
/// use wonders_duel::cards::{Card, CardColor, CatalogBuilder, ProgressToken, Wonder};
///
/// let mut builder = CatalogBuilder::new();
/// let quarry = builder.add_card(Card::new("Quarry", 1, CardColor::Brown));
/// builder.add_wonder(Wonder::new("Sphinx"));
/// builder.add_token(ProgressToken::Law);
/// let catalog = builder.build().unwrap();
///
/// assert_eq!(catalog.card(quarry).unwrap().name, "Quarry");
/// assert_eq!(catalog.card_by_name("Quarry"), Some(quarry));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<Card>,
    wonders: Vec<Wonder>,
    tokens: Vec<ProgressToken>,
    card_names: FxHashMap<String, CardId>,
    wonder_names: FxHashMap<String, WonderId>,
}

impl Catalog {
    /// Build a catalog from an external data source.
    pub fn load(loader: &dyn DataLoader) -> Result<Self, SetupError> {
        let mut builder = CatalogBuilder::new();
        for card in loader.cards() {
            builder.add_card(card);
        }
        for wonder in loader.wonders() {
            builder.add_wonder(wonder);
        }
        for token in loader.progress_tokens() {
            builder.add_token(token);
        }
        builder.build()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    #[must_use]
    pub fn wonder(&self, id: WonderId) -> Option<&Wonder> {
        self.wonders.get(id.index())
    }

    /// Look up a card the engine already holds a reference to.
    ///
    /// A miss means the state refers to a card that was never registered.
    pub fn card_checked(&self, id: CardId) -> Result<&Card, DuelError> {
        self.card(id).ok_or_else(|| {
            DuelError::StructuralInconsistency(format!("{id} is not in the catalog"))
        })
    }

    pub fn wonder_checked(&self, id: WonderId) -> Result<&Wonder, DuelError> {
        self.wonder(id).ok_or_else(|| {
            DuelError::StructuralInconsistency(format!("{id} is not in the catalog"))
        })
    }

    #[must_use]
    pub fn card_by_name(&self, name: &str) -> Option<CardId> {
        self.card_names.get(name).copied()
    }

    #[must_use]
    pub fn wonder_by_name(&self, name: &str) -> Option<WonderId> {
        self.wonder_names.get(name).copied()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn wonders(&self) -> impl Iterator<Item = &Wonder> {
        self.wonders.iter()
    }

    #[must_use]
    pub fn progress_tokens(&self) -> &[ProgressToken] {
        &self.tokens
    }

    /// Non-guild cards of an age, in catalog order.
    #[must_use]
    pub fn age_cards(&self, age: u8) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| c.age == age && !c.is_guild())
            .map(|c| c.id)
            .collect()
    }

    #[must_use]
    pub fn guilds(&self) -> Vec<CardId> {
        self.cards.iter().filter(|c| c.is_guild()).map(|c| c.id).collect()
    }

    #[must_use]
    pub fn wonder_ids(&self) -> Vec<WonderId> {
        self.wonders.iter().map(|w| w.id).collect()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn wonder_count(&self) -> usize {
        self.wonders.len()
    }
}

/// Incremental catalog construction. Ids are assigned in insertion order.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    cards: Vec<Card>,
    wonders: Vec<Wonder>,
    tokens: Vec<ProgressToken>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card, overwriting its id with the arena index.
    pub fn add_card(&mut self, mut card: Card) -> CardId {
        let id = CardId(self.cards.len() as u32);
        card.id = id;
        self.cards.push(card);
        id
    }

    pub fn add_wonder(&mut self, mut wonder: Wonder) -> WonderId {
        let id = WonderId(self.wonders.len() as u32);
        wonder.id = id;
        self.wonders.push(wonder);
        id
    }

    pub fn add_token(&mut self, token: ProgressToken) {
        self.tokens.push(token);
    }

    /// Register all ten progress tokens.
    #[must_use]
    pub fn with_all_tokens(mut self) -> Self {
        self.tokens = ProgressToken::ALL.to_vec();
        self
    }

    /// Validate and freeze the catalog.
    pub fn build(self) -> Result<Catalog, SetupError> {
        let mut card_names = FxHashMap::default();
        for card in &self.cards {
            if !(1..=3).contains(&card.age) {
                return Err(SetupError::Catalog(format!(
                    "{} has age {}, expected 1 to 3",
                    card.name, card.age
                )));
            }
            if card.color == CardColor::Purple && card.age != 3 {
                return Err(SetupError::Catalog(format!("guild {} must be age 3", card.name)));
            }
            if card_names.insert(card.name.clone(), card.id).is_some() {
                return Err(SetupError::Catalog(format!("duplicate card name {}", card.name)));
            }
        }

        let mut wonder_names = FxHashMap::default();
        for wonder in &self.wonders {
            if wonder_names.insert(wonder.name.clone(), wonder.id).is_some() {
                return Err(SetupError::Catalog(format!("duplicate wonder name {}", wonder.name)));
            }
        }

        let mut seen = FxHashSet::default();
        for token in &self.tokens {
            if !seen.insert(*token) {
                return Err(SetupError::Catalog(format!("duplicate progress token {token}")));
            }
        }

        Ok(Catalog {
            cards: self.cards,
            wonders: self.wonders,
            tokens: self.tokens,
            card_names,
            wonder_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::loader::StaticLoader;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut builder = CatalogBuilder::new();
        let a = builder.add_card(Card::new("A", 1, CardColor::Blue));
        let b = builder.add_card(Card::new("B", 2, CardColor::Red));
        let w = builder.add_wonder(Wonder::new("W"));
        let catalog = builder.build().unwrap();

        assert_eq!(a, CardId(0));
        assert_eq!(b, CardId(1));
        assert_eq!(w, WonderId(0));
        assert_eq!(catalog.card(b).unwrap().id, b);
        assert!(catalog.card(CardId(2)).is_none());
    }

    #[test]
    fn test_checked_lookup_reports_inconsistency() {
        let catalog = CatalogBuilder::new().build().unwrap();
        let err = catalog.card_checked(CardId(9)).unwrap_err();
        assert!(matches!(err, DuelError::StructuralInconsistency(_)));
    }

    #[test]
    fn test_age_cards_exclude_guilds() {
        let mut builder = CatalogBuilder::new();
        builder.add_card(Card::new("Senate", 3, CardColor::Blue));
        let guild = builder.add_card(Card::new("Guild", 3, CardColor::Purple));
        builder.add_card(Card::new("Baths", 1, CardColor::Blue));
        let catalog = builder.build().unwrap();

        assert_eq!(catalog.age_cards(3), vec![CardId(0)]);
        assert_eq!(catalog.guilds(), vec![guild]);
        assert_eq!(catalog.age_cards(1), vec![CardId(2)]);
    }

    #[test]
    fn test_rejects_duplicates_and_bad_ages() {
        let mut builder = CatalogBuilder::new();
        builder.add_card(Card::new("Same", 1, CardColor::Blue));
        builder.add_card(Card::new("Same", 2, CardColor::Blue));
        assert!(matches!(builder.build(), Err(SetupError::Catalog(_))));

        let mut builder = CatalogBuilder::new();
        builder.add_card(Card::new("Old", 4, CardColor::Blue));
        assert!(builder.build().is_err());

        let mut builder = CatalogBuilder::new();
        builder.add_card(Card::new("Early Guild", 2, CardColor::Purple));
        assert!(builder.build().is_err());

        let mut builder = CatalogBuilder::new();
        builder.add_token(ProgressToken::Law);
        builder.add_token(ProgressToken::Law);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_load_from_loader() {
        let loader = StaticLoader::new(
            vec![Card::new("Tavern", 1, CardColor::Yellow)],
            vec![Wonder::new("Piraeus")],
            vec![ProgressToken::Economy],
        );
        let catalog = Catalog::load(&loader).unwrap();
        assert_eq!(catalog.card_count(), 1);
        assert_eq!(catalog.wonder_by_name("Piraeus"), Some(WonderId(0)));
        assert_eq!(catalog.progress_tokens(), &[ProgressToken::Economy]);
    }
}
