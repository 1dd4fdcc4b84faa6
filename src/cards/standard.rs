//! The built-in base set: 23 age I cards, 23 age II cards, 20 age III cards,
//! 7 guilds, 12 wonders and the 10 progress tokens.
//!
//! Cards whose retail text has no counterpart in the effect model (fixed
//! trading rates, production choices, per-card coin payouts) are expressed
//! with the nearest plain effect.

use smallvec::smallvec;

use crate::effects::{Effect, GuildBasis};
use crate::error::SetupError;

use super::definition::{Card, CardColor, Resource, ResourceBundle, ScienceSymbol, Wonder};
use super::loader::DataLoader;
use super::registry::Catalog;
use super::tokens::ProgressToken;

use CardColor::{Blue, Brown, Green, Grey, Purple, Red, Yellow};
use Resource::{Clay, Glass, Papyrus, Stone, Wood};

/// `DataLoader` over the base set.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardSet;

impl Catalog {
    /// Catalog holding the base set.
    pub fn standard() -> Result<Self, SetupError> {
        Catalog::load(&StandardSet)
    }
}

fn produces(resource: Resource, amount: u8) -> Effect {
    Effect::Production(ResourceBundle::single(resource, amount))
}

fn raw(name: &str, age: u8, coins: u32, resource: Resource, amount: u8) -> Card {
    Card::new(name, age, Brown)
        .with_coins(coins)
        .with_effect(produces(resource, amount))
}

fn manufactured(name: &str, age: u8, coins: u32, resource: Resource) -> Card {
    Card::new(name, age, Grey)
        .with_coins(coins)
        .with_effect(produces(resource, 1))
}

fn civilian(name: &str, age: u8, points: u32) -> Card {
    Card::new(name, age, Blue).with_effect(Effect::VictoryPoints(points))
}

fn science(name: &str, age: u8, symbol: ScienceSymbol, points: u32) -> Card {
    let card = Card::new(name, age, Green).with_effect(Effect::Science(symbol));
    if points > 0 {
        card.with_effect(Effect::VictoryPoints(points))
    } else {
        card
    }
}

fn military(name: &str, age: u8, shields: u8) -> Card {
    Card::new(name, age, Red).with_effect(Effect::Military(shields))
}

fn guild(name: &str, basis: GuildBasis, points: u32, coins: u32) -> Card {
    Card::new(name, 3, Purple).with_effect(Effect::Guild {
        basis,
        points_per_item: points,
        coins_per_item: coins,
    })
}

fn age_one() -> Vec<Card> {
    vec![
        raw("Lumber Yard", 1, 0, Wood, 1),
        raw("Logging Camp", 1, 1, Wood, 1),
        raw("Clay Pool", 1, 0, Clay, 1),
        raw("Clay Pit", 1, 1, Clay, 1),
        raw("Quarry", 1, 0, Stone, 1),
        raw("Stone Pit", 1, 1, Stone, 1),
        manufactured("Glassworks", 1, 1, Glass),
        manufactured("Press", 1, 1, Papyrus),
        military("Guard Tower", 1, 1),
        military("Stable", 1, 1)
            .with_resource(Wood, 1)
            .with_chain_out("Horseshoe"),
        military("Garrison", 1, 1)
            .with_resource(Clay, 1)
            .with_chain_out("Sword"),
        military("Palisade", 1, 1).with_coins(2).with_chain_out("Tower"),
        science("Workshop", 1, ScienceSymbol::Compass, 1).with_resource(Papyrus, 1),
        science("Apothecary", 1, ScienceSymbol::Wheel, 1).with_resource(Glass, 1),
        science("Scriptorium", 1, ScienceSymbol::Quill, 0)
            .with_coins(2)
            .with_chain_out("Book"),
        science("Pharmacist", 1, ScienceSymbol::Mortar, 0)
            .with_coins(2)
            .with_chain_out("Gear"),
        civilian("Theater", 1, 3).with_chain_out("Mask"),
        civilian("Altar", 1, 3).with_chain_out("Moon"),
        civilian("Baths", 1, 3)
            .with_resource(Stone, 1)
            .with_chain_out("Drop"),
        Card::new("Tavern", 1, Yellow)
            .with_effect(Effect::Coins(4))
            .with_chain_out("Jug"),
        Card::new("Stone Reserve", 1, Yellow)
            .with_coins(3)
            .with_effect(produces(Stone, 1)),
        Card::new("Clay Reserve", 1, Yellow)
            .with_coins(3)
            .with_effect(produces(Clay, 1)),
        Card::new("Wood Reserve", 1, Yellow)
            .with_coins(3)
            .with_effect(produces(Wood, 1)),
    ]
}

fn age_two() -> Vec<Card> {
    vec![
        raw("Sawmill", 2, 2, Wood, 2),
        raw("Brickyard", 2, 2, Clay, 2),
        raw("Shelf Quarry", 2, 2, Stone, 2),
        manufactured("Glass-Blower", 2, 0, Glass),
        manufactured("Drying Room", 2, 0, Papyrus),
        civilian("Courthouse", 2, 5)
            .with_resource(Wood, 2)
            .with_resource(Glass, 1),
        civilian("Statue", 2, 4)
            .with_resource(Clay, 2)
            .with_chain_in("Mask")
            .with_chain_out("Column"),
        civilian("Temple", 2, 4)
            .with_resource(Wood, 1)
            .with_resource(Papyrus, 1)
            .with_chain_in("Moon")
            .with_chain_out("Sun"),
        civilian("Aqueduct", 2, 5)
            .with_resource(Stone, 3)
            .with_chain_in("Drop"),
        civilian("Rostrum", 2, 4)
            .with_resource(Stone, 1)
            .with_resource(Wood, 1)
            .with_chain_out("Bank"),
        science("Library", 2, ScienceSymbol::Quill, 2)
            .with_resource(Stone, 1)
            .with_resource(Wood, 1)
            .with_resource(Glass, 1)
            .with_chain_in("Book"),
        science("Dispensary", 2, ScienceSymbol::Mortar, 2)
            .with_resource(Clay, 2)
            .with_resource(Stone, 1)
            .with_chain_in("Gear"),
        science("School", 2, ScienceSymbol::Wheel, 1)
            .with_resource(Wood, 1)
            .with_resource(Papyrus, 2)
            .with_chain_out("Harp"),
        science("Laboratory", 2, ScienceSymbol::Compass, 1)
            .with_resource(Wood, 1)
            .with_resource(Glass, 2)
            .with_chain_out("Lamp"),
        military("Horse Breeders", 2, 1)
            .with_resource(Clay, 1)
            .with_resource(Wood, 1)
            .with_chain_in("Horseshoe"),
        military("Barracks", 2, 1).with_coins(3).with_chain_in("Sword"),
        military("Archery Range", 2, 2)
            .with_resource(Stone, 1)
            .with_resource(Wood, 1)
            .with_resource(Papyrus, 1)
            .with_chain_out("Target"),
        military("Parade Ground", 2, 2)
            .with_resource(Clay, 2)
            .with_resource(Glass, 1)
            .with_chain_out("Helmet"),
        military("Walls", 2, 2).with_resource(Stone, 2),
        Card::new("Forum", 2, Yellow)
            .with_coins(3)
            .with_resource(Clay, 1)
            .with_effect(produces(Papyrus, 1)),
        Card::new("Caravansery", 2, Yellow)
            .with_coins(2)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1)
            .with_effect(produces(Wood, 1)),
        Card::new("Customs House", 2, Yellow)
            .with_coins(4)
            .with_effect(Effect::Coins(4)),
        Card::new("Brewery", 2, Yellow)
            .with_effect(Effect::Coins(6))
            .with_chain_out("Barrel"),
    ]
}

fn age_three() -> Vec<Card> {
    vec![
        civilian("Senate", 3, 5)
            .with_resource(Clay, 2)
            .with_resource(Stone, 1)
            .with_resource(Papyrus, 1)
            .with_chain_in("Bank"),
        civilian("Obelisk", 3, 5)
            .with_resource(Stone, 2)
            .with_resource(Glass, 1),
        civilian("Gardens", 3, 6)
            .with_resource(Clay, 2)
            .with_resource(Wood, 2)
            .with_chain_in("Column"),
        civilian("Town Hall", 3, 7)
            .with_resource(Stone, 3)
            .with_resource(Wood, 2),
        civilian("Pantheon", 3, 6)
            .with_resource(Clay, 1)
            .with_resource(Wood, 1)
            .with_resource(Papyrus, 2)
            .with_chain_in("Sun"),
        civilian("Palace", 3, 7)
            .with_resource(Clay, 1)
            .with_resource(Stone, 1)
            .with_resource(Wood, 1)
            .with_resource(Glass, 2),
        science("Academy", 3, ScienceSymbol::Globe, 3)
            .with_resource(Stone, 1)
            .with_resource(Wood, 1)
            .with_resource(Glass, 2),
        science("Study", 3, ScienceSymbol::Globe, 3)
            .with_resource(Wood, 2)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1),
        science("University", 3, ScienceSymbol::Tablet, 2)
            .with_resource(Clay, 1)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1)
            .with_chain_in("Harp"),
        science("Observatory", 3, ScienceSymbol::Tablet, 2)
            .with_resource(Stone, 1)
            .with_resource(Papyrus, 2)
            .with_chain_in("Lamp"),
        military("Arsenal", 3, 3)
            .with_resource(Clay, 3)
            .with_resource(Wood, 2),
        military("Pretorium", 3, 3).with_coins(8),
        military("Fortifications", 3, 2)
            .with_resource(Stone, 2)
            .with_resource(Clay, 1)
            .with_resource(Papyrus, 1)
            .with_chain_in("Tower"),
        military("Siege Workshop", 3, 2)
            .with_resource(Wood, 3)
            .with_resource(Glass, 1)
            .with_chain_in("Target"),
        military("Circus", 3, 2)
            .with_resource(Clay, 2)
            .with_resource(Stone, 2)
            .with_chain_in("Helmet"),
        Card::new("Chamber of Commerce", 3, Yellow)
            .with_resource(Papyrus, 2)
            .with_effect(Effect::Coins(6))
            .with_effect(Effect::VictoryPoints(3)),
        Card::new("Port", 3, Yellow)
            .with_resource(Wood, 1)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1)
            .with_effect(Effect::Coins(4))
            .with_effect(Effect::VictoryPoints(3)),
        Card::new("Armory", 3, Yellow)
            .with_resource(Stone, 2)
            .with_resource(Glass, 1)
            .with_effect(Effect::Coins(4))
            .with_effect(Effect::VictoryPoints(3)),
        Card::new("Lighthouse", 3, Yellow)
            .with_resource(Clay, 2)
            .with_resource(Glass, 1)
            .with_chain_in("Jug")
            .with_effect(Effect::Coins(3))
            .with_effect(Effect::VictoryPoints(3)),
        Card::new("Arena", 3, Yellow)
            .with_resource(Clay, 1)
            .with_resource(Stone, 1)
            .with_resource(Wood, 1)
            .with_chain_in("Barrel")
            .with_effect(Effect::Coins(4))
            .with_effect(Effect::VictoryPoints(3)),
    ]
}

fn guilds() -> Vec<Card> {
    vec![
        guild("Builders Guild", GuildBasis::Wonders, 2, 0)
            .with_resource(Stone, 2)
            .with_resource(Clay, 1)
            .with_resource(Wood, 1)
            .with_resource(Glass, 1),
        guild("Moneylenders Guild", GuildBasis::Coins, 1, 0)
            .with_resource(Stone, 2)
            .with_resource(Wood, 2),
        guild("Scientists Guild", GuildBasis::Colors(smallvec![Green]), 1, 1)
            .with_resource(Clay, 2)
            .with_resource(Wood, 2),
        guild("Shipowners Guild", GuildBasis::Colors(smallvec![Brown, Grey]), 1, 1)
            .with_resource(Clay, 1)
            .with_resource(Stone, 1)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1),
        guild("Traders Guild", GuildBasis::Colors(smallvec![Yellow]), 1, 1)
            .with_resource(Clay, 1)
            .with_resource(Wood, 1)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1),
        guild("Magistrates Guild", GuildBasis::Colors(smallvec![Blue]), 1, 1)
            .with_resource(Wood, 2)
            .with_resource(Clay, 1)
            .with_resource(Papyrus, 1),
        guild("Tacticians Guild", GuildBasis::Colors(smallvec![Red]), 1, 1)
            .with_resource(Stone, 2)
            .with_resource(Clay, 1)
            .with_resource(Papyrus, 1),
    ]
}

fn wonders() -> Vec<Wonder> {
    vec![
        Wonder::new("The Appian Way")
            .with_resource(Papyrus, 1)
            .with_resource(Clay, 2)
            .with_resource(Stone, 2)
            .with_effect(Effect::Coins(3))
            .with_effect(Effect::CoinLoss(3))
            .with_effect(Effect::ExtraTurn)
            .with_effect(Effect::VictoryPoints(3)),
        Wonder::new("Circus Maximus")
            .with_resource(Stone, 2)
            .with_resource(Wood, 1)
            .with_resource(Glass, 1)
            .with_effect(Effect::Destruction(Grey))
            .with_effect(Effect::Military(1))
            .with_effect(Effect::VictoryPoints(3)),
        Wonder::new("The Colossus")
            .with_resource(Clay, 3)
            .with_resource(Glass, 1)
            .with_effect(Effect::Military(2))
            .with_effect(Effect::VictoryPoints(3)),
        Wonder::new("The Great Library")
            .with_resource(Wood, 3)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1)
            .with_effect(Effect::LibraryChoice)
            .with_effect(Effect::VictoryPoints(4)),
        Wonder::new("The Great Lighthouse")
            .with_resource(Wood, 1)
            .with_resource(Stone, 1)
            .with_resource(Papyrus, 2)
            .with_effect(produces(Clay, 1))
            .with_effect(Effect::VictoryPoints(4)),
        Wonder::new("The Hanging Gardens")
            .with_resource(Wood, 2)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1)
            .with_effect(Effect::Coins(6))
            .with_effect(Effect::ExtraTurn)
            .with_effect(Effect::VictoryPoints(3)),
        Wonder::new("The Mausoleum")
            .with_resource(Clay, 2)
            .with_resource(Glass, 2)
            .with_resource(Papyrus, 1)
            .with_effect(Effect::Resurrect)
            .with_effect(Effect::VictoryPoints(2)),
        Wonder::new("Piraeus")
            .with_resource(Wood, 2)
            .with_resource(Stone, 1)
            .with_resource(Clay, 1)
            .with_effect(produces(Papyrus, 1))
            .with_effect(Effect::ExtraTurn)
            .with_effect(Effect::VictoryPoints(2)),
        Wonder::new("The Pyramids")
            .with_resource(Stone, 3)
            .with_resource(Papyrus, 1)
            .with_effect(Effect::VictoryPoints(9)),
        Wonder::new("The Sphinx")
            .with_resource(Stone, 1)
            .with_resource(Clay, 1)
            .with_resource(Glass, 2)
            .with_effect(Effect::ExtraTurn)
            .with_effect(Effect::VictoryPoints(6)),
        Wonder::new("The Statue of Zeus")
            .with_resource(Stone, 1)
            .with_resource(Wood, 1)
            .with_resource(Clay, 1)
            .with_resource(Papyrus, 2)
            .with_effect(Effect::Destruction(Brown))
            .with_effect(Effect::Military(1))
            .with_effect(Effect::VictoryPoints(3)),
        Wonder::new("The Temple of Artemis")
            .with_resource(Wood, 1)
            .with_resource(Stone, 1)
            .with_resource(Glass, 1)
            .with_resource(Papyrus, 1)
            .with_effect(Effect::Coins(12))
            .with_effect(Effect::ExtraTurn),
    ]
}

impl DataLoader for StandardSet {
    fn cards(&self) -> Vec<Card> {
        let mut cards = age_one();
        cards.extend(age_two());
        cards.extend(age_three());
        cards.extend(guilds());
        cards
    }

    fn wonders(&self) -> Vec<Wonder> {
        wonders()
    }

    fn progress_tokens(&self) -> Vec<ProgressToken> {
        ProgressToken::ALL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_standard_counts() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.age_cards(1).len(), 23);
        assert_eq!(catalog.age_cards(2).len(), 23);
        assert_eq!(catalog.age_cards(3).len(), 20);
        assert_eq!(catalog.guilds().len(), 7);
        assert_eq!(catalog.wonder_count(), 12);
        assert_eq!(catalog.progress_tokens().len(), 10);
    }

    #[test]
    fn test_every_chain_in_has_a_source() {
        let catalog = Catalog::standard().unwrap();
        let granted: FxHashSet<_> = catalog.cards().filter_map(|c| c.chain_out.clone()).collect();

        for card in catalog.cards() {
            if let Some(tag) = &card.chain_in {
                assert!(granted.contains(tag), "{} requires unknown chain {}", card.name, tag);
                let source = catalog
                    .cards()
                    .find(|c| c.chain_out.as_ref() == Some(tag))
                    .unwrap();
                assert!(source.age < card.age, "{} chains from a later age", card.name);
            }
        }
    }

    #[test]
    fn test_every_science_symbol_but_law_appears() {
        let catalog = Catalog::standard().unwrap();
        let symbols: FxHashSet<_> = catalog.cards().filter_map(|c| c.science_symbol()).collect();
        assert_eq!(symbols.len(), 6);
        assert!(!symbols.contains(&ScienceSymbol::Law));
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = Catalog::standard().unwrap();
        let id = catalog.card_by_name("Lumber Yard").unwrap();
        assert_eq!(catalog.card(id).unwrap().production(Wood), 1);
        assert!(catalog.wonder_by_name("The Pyramids").is_some());
    }
}
