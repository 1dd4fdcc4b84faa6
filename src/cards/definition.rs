//! Card and wonder definitions - static data.
//!
//! A `Card` or `Wonder` is immutable once registered in the `Catalog`; the
//! game state only ever refers to them by `CardId` / `WonderId`. Who owns a
//! card, which wonder a card is tucked under, and which pyramid slot it sits
//! in are all tracked elsewhere.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;

/// Index of a card in the catalog arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Index of a wonder in the catalog arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WonderId(pub u32);

impl WonderId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for WonderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wonder({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Stone,
    Clay,
    Papyrus,
    Glass,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Stone,
        Resource::Clay,
        Resource::Papyrus,
        Resource::Glass,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Amount of each resource, used both for production and for costs.
///
/// ```
/// use wonders_duel::cards::{Resource, ResourceBundle};
///
/// let bundle = ResourceBundle::single(Resource::Wood, 2).with(Resource::Glass, 1);
/// assert_eq!(bundle.get(Resource::Wood), 2);
/// assert_eq!(bundle.get(Resource::Stone), 0);
/// assert_eq!(bundle.total(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBundle(pub [u8; 5]);

impl ResourceBundle {
    #[must_use]
    pub const fn empty() -> Self {
        Self([0; 5])
    }

    #[must_use]
    pub fn single(resource: Resource, amount: u8) -> Self {
        Self::empty().with(resource, amount)
    }

    /// Add `amount` of `resource` (builder pattern).
    #[must_use]
    pub fn with(mut self, resource: Resource, amount: u8) -> Self {
        self.0[resource.index()] += amount;
        self
    }

    #[must_use]
    pub fn get(&self, resource: Resource) -> u8 {
        self.0[resource.index()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&n| u32::from(n)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Non-zero entries in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u8)> + '_ {
        Resource::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .filter(|&(_, n)| n > 0)
    }
}

/// What a card or wonder costs before chains, discounts, and trading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceCost {
    pub coins: u32,
    pub resources: ResourceBundle,
}

impl ResourceCost {
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.coins == 0 && self.resources.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardColor {
    /// Raw materials.
    Brown,
    /// Manufactured goods.
    Grey,
    /// Civilian buildings.
    Blue,
    /// Scientific buildings.
    Green,
    /// Commercial buildings.
    Yellow,
    /// Military buildings.
    Red,
    /// Guilds.
    Purple,
}

impl CardColor {
    pub const ALL: [CardColor; 7] = [
        CardColor::Brown,
        CardColor::Grey,
        CardColor::Blue,
        CardColor::Green,
        CardColor::Yellow,
        CardColor::Red,
        CardColor::Purple,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScienceSymbol {
    Globe,
    Tablet,
    Mortar,
    Compass,
    Wheel,
    Quill,
    /// Only granted by the Law progress token.
    Law,
}

impl ScienceSymbol {
    pub const ALL: [ScienceSymbol; 7] = [
        ScienceSymbol::Globe,
        ScienceSymbol::Tablet,
        ScienceSymbol::Mortar,
        ScienceSymbol::Compass,
        ScienceSymbol::Wheel,
        ScienceSymbol::Quill,
        ScienceSymbol::Law,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Chain symbol: a card granting it makes cards requiring it free.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainTag(pub String);

impl ChainTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChainTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use wonders_duel::cards::{Card, CardColor, Resource, ScienceSymbol};
/// use wonders_duel::effects::Effect;
///
/// let pharmacist = Card::new("Pharmacist", 1, CardColor::Green)
///     .with_coins(2)
///     .with_chain_out("Gear")
///     .with_effect(Effect::Science(ScienceSymbol::Mortar));
///
/// assert_eq!(pharmacist.science_symbol(), Some(ScienceSymbol::Mortar));
/// assert_eq!(pharmacist.production(Resource::Wood), 0);
/// assert!(pharmacist.chain_in.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Arena index. Assigned by the catalog on registration.
    pub id: CardId,

    pub name: String,

    /// Age 1 to 3. Guilds are age 3.
    pub age: u8,

    pub color: CardColor,

    pub cost: ResourceCost,

    /// Holding this tag makes the card free.
    pub chain_in: Option<ChainTag>,

    /// Tag granted to the owner once the card is built.
    pub chain_out: Option<ChainTag>,

    /// Effects in resolution order.
    pub effects: Vec<Effect>,
}

impl Card {
    #[must_use]
    pub fn new(name: impl Into<String>, age: u8, color: CardColor) -> Self {
        Self {
            id: CardId(0),
            name: name.into(),
            age,
            color,
            cost: ResourceCost::free(),
            chain_in: None,
            chain_out: None,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_coins(mut self, coins: u32) -> Self {
        self.cost.coins = coins;
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Resource, amount: u8) -> Self {
        self.cost.resources = self.cost.resources.with(resource, amount);
        self
    }

    #[must_use]
    pub fn with_chain_in(mut self, tag: impl Into<String>) -> Self {
        self.chain_in = Some(ChainTag::new(tag));
        self
    }

    #[must_use]
    pub fn with_chain_out(mut self, tag: impl Into<String>) -> Self {
        self.chain_out = Some(ChainTag::new(tag));
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Units of `resource` this card produces, summed over its effects.
    #[must_use]
    pub fn production(&self, resource: Resource) -> u8 {
        self.effects
            .iter()
            .map(|e| match e {
                Effect::Production(bundle) => bundle.get(resource),
                _ => 0,
            })
            .sum()
    }

    /// The first science symbol this card grants.
    #[must_use]
    pub fn science_symbol(&self) -> Option<ScienceSymbol> {
        self.effects.iter().find_map(|e| match e {
            Effect::Science(symbol) => Some(*symbol),
            _ => None,
        })
    }

    /// Printed shields, before any Strategy bonus.
    #[must_use]
    pub fn shields(&self) -> u8 {
        self.effects
            .iter()
            .map(|e| match e {
                Effect::Military(n) => *n,
                _ => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn is_guild(&self) -> bool {
        self.color == CardColor::Purple
    }
}

/// Static wonder definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wonder {
    /// Arena index. Assigned by the catalog on registration.
    pub id: WonderId,

    pub name: String,

    pub cost: ResourceCost,

    pub effects: Vec<Effect>,
}

impl Wonder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: WonderId(0),
            name: name.into(),
            cost: ResourceCost::free(),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_coins(mut self, coins: u32) -> Self {
        self.cost.coins = coins;
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Resource, amount: u8) -> Self {
        self.cost.resources = self.cost.resources.with(resource, amount);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn production(&self, resource: Resource) -> u8 {
        self.effects
            .iter()
            .map(|e| match e {
                Effect::Production(bundle) => bundle.get(resource),
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display() {
        assert_eq!(format!("{}", CardId::new(5)), "Card(5)");
        assert_eq!(format!("{}", WonderId::new(2)), "Wonder(2)");
        assert_eq!(CardId::new(7).index(), 7);
    }

    #[test]
    fn test_bundle_iter_skips_zero() {
        let bundle = ResourceBundle::empty()
            .with(Resource::Stone, 2)
            .with(Resource::Papyrus, 1);
        let entries: Vec<_> = bundle.iter().collect();
        assert_eq!(entries, vec![(Resource::Stone, 2), (Resource::Papyrus, 1)]);
        assert!(!bundle.is_empty());
        assert!(ResourceBundle::empty().is_empty());
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new("Aqueduct", 2, CardColor::Blue)
            .with_resource(Resource::Stone, 3)
            .with_chain_in("Drop")
            .with_effect(Effect::VictoryPoints(5));

        assert_eq!(card.age, 2);
        assert_eq!(card.cost.resources.get(Resource::Stone), 3);
        assert_eq!(card.chain_in, Some(ChainTag::new("Drop")));
        assert!(!card.cost.is_free());
        assert_eq!(card.shields(), 0);
    }

    #[test]
    fn test_production_sums_all_variants() {
        let card = Card::new("Double", 1, CardColor::Brown)
            .with_effect(Effect::Production(ResourceBundle::single(Resource::Wood, 1)))
            .with_effect(Effect::Production(ResourceBundle::single(Resource::Wood, 2)));
        assert_eq!(card.production(Resource::Wood), 3);
        assert_eq!(card.production(Resource::Clay), 0);
    }

    #[test]
    fn test_wonder_builder() {
        let wonder = Wonder::new("Colossus")
            .with_resource(Resource::Clay, 3)
            .with_resource(Resource::Glass, 1)
            .with_effect(Effect::Military(2));
        assert_eq!(wonder.cost.resources.total(), 4);
        assert_eq!(wonder.effects.len(), 1);
        assert_eq!(wonder.production(Resource::Clay), 0);
    }
}
