//! Running games.
//!
//! - `Duel`: One game instance; validates and applies actions atomically
//! - `Match`: Drives a duel with one `DecisionSource` per seat and observers
//! - `Replay`: Config plus accepted actions, encodable with bincode

pub mod duel;
pub mod replay;
pub mod runner;

pub use duel::Duel;
pub use replay::Replay;
pub use runner::{EventRecorder, GameObserver, Match, DEFAULT_RETRY_LIMIT};
