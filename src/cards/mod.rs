//! Card system: definitions, progress tokens, and the catalog.
//!
//! ## Key Types
//!
//! - `Card` / `Wonder`: Static definitions, arena-indexed by `CardId` / `WonderId`
//! - `ProgressToken`: The ten progress tokens
//! - `Catalog`: Validated, immutable definition lookup
//! - `DataLoader`: Contract for supplying definitions from outside the crate
//!
//! `Catalog::standard()` provides the built-in base set.

pub mod definition;
pub mod loader;
pub mod registry;
pub mod standard;
pub mod tokens;

pub use definition::{
    Card, CardColor, CardId, ChainTag, Resource, ResourceBundle, ResourceCost, ScienceSymbol,
    Wonder, WonderId,
};
pub use loader::{DataLoader, StaticLoader};
pub use registry::{Catalog, CatalogBuilder};
pub use standard::StandardSet;
pub use tokens::ProgressToken;
