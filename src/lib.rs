//! # wonders-duel
//!
//! Rules engine for a two-player card-drafting civilization duel.
//!
//! ## Design Principles
//!
//! 1. **Rules Only**: The engine validates and applies actions. Rendering,
//!    input parsing, and strategy live behind the `DecisionSource` and
//!    `GameObserver` traits.
//!
//! 2. **Explicit Interrupts**: Mid-turn choices (progress tokens, destruction,
//!    rebuilding from the discard pile, the next age's starter) are phases of
//!    their own, answered with ordinary `Action`s.
//!
//! 3. **Deterministic**: One seeded ChaCha8 generator drives every shuffle, so
//!    a seed plus the accepted actions reproduces a game exactly.
//!
//! ## Architecture
//!
//! - **Arena Catalog**: Cards and wonders are immutable definitions indexed by
//!   `CardId` / `WonderId`. State refers to them by id only.
//!
//! - **Persistent Data Structures**: `GameState` clones in O(1) via `im-rs`,
//!   which makes atomic action processing and speculative lookahead cheap.
//!
//! - **Typed Event Log**: Every transition appends a `GameEvent`; every
//!   accepted action appends an `ActionRecord`.
//!
//! ## Modules
//!
//! - `core`: Players, ledgers, state, actions, phases, events, RNG, configuration
//! - `cards`: Card and wonder definitions, progress tokens, the catalog
//! - `board`: Card pyramid and military track
//! - `effects`: Effect variants and their resolution
//! - `rules`: Costs, validation, the state machine, and scoring
//! - `game`: `Duel`, the `Match` driver, and replays
//! - `agents`: Decision sources
//!
//! ## Example
//!
//! ```
//! use wonders_duel::agents::RandomAgent;
//! use wonders_duel::core::DuelConfig;
//! use wonders_duel::game::{Duel, Match};
//!
//! let duel = Duel::standard(DuelConfig::new(7)).unwrap();
//! let mut game = Match::new(duel, Box::new(RandomAgent::new(1)), Box::new(RandomAgent::new(2)));
//! let outcome = game.run().unwrap();
//! assert!(game.duel().is_over());
//! assert_eq!(outcome.scores.iter().count(), 2);
//! ```

pub mod agents;
pub mod board;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, DuelConfig, GameEvent, GameRng, GameState, Phase, PlayerId,
    PlayerLedger, PlayerMap, TokenSelection,
};

pub use crate::cards::{
    Card, CardColor, CardId, Catalog, DataLoader, ProgressToken, Resource, ScienceSymbol, Wonder,
    WonderId,
};

pub use crate::board::{MilitaryTrack, Pyramid, PyramidLayout};

pub use crate::effects::{Effect, EffectResolver};

pub use crate::rules::{DuelRules, GameOutcome, Price, RulesEngine, ScoreSheet, VictoryType};

pub use crate::game::{Duel, GameObserver, Match, Replay};

pub use crate::agents::{DecisionSource, GreedyAgent, RandomAgent, ScriptedAgent};

pub use crate::error::{DuelError, InvalidAction, Result, SetupError};
