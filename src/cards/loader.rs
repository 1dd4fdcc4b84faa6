//! Data source contract for catalogs.
//!
//! Reading card data from disk is left to the embedding application; it only
//! has to hand the definitions over through `DataLoader`.

use super::definition::{Card, Wonder};
use super::tokens::ProgressToken;

/// Supplies the definitions a `Catalog` is built from.
///
/// Ids on the returned definitions are ignored; the catalog assigns them.
pub trait DataLoader {
    fn cards(&self) -> Vec<Card>;

    fn wonders(&self) -> Vec<Wonder>;

    fn progress_tokens(&self) -> Vec<ProgressToken>;
}

/// In-memory loader over prepared definition lists.
#[derive(Clone, Debug, Default)]
pub struct StaticLoader {
    cards: Vec<Card>,
    wonders: Vec<Wonder>,
    tokens: Vec<ProgressToken>,
}

impl StaticLoader {
    #[must_use]
    pub fn new(cards: Vec<Card>, wonders: Vec<Wonder>, tokens: Vec<ProgressToken>) -> Self {
        Self {
            cards,
            wonders,
            tokens,
        }
    }
}

impl DataLoader for StaticLoader {
    fn cards(&self) -> Vec<Card> {
        self.cards.clone()
    }

    fn wonders(&self) -> Vec<Wonder> {
        self.wonders.clone()
    }

    fn progress_tokens(&self) -> Vec<ProgressToken> {
        self.tokens.clone()
    }
}
