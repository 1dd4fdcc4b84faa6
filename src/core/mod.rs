//! Core engine types: players, ledgers, state, actions, phases, events, RNG,
//! configuration.

pub mod action;
pub mod config;
pub mod events;
pub mod ledger;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord};
pub use config::DuelConfig;
pub use events::GameEvent;
pub use ledger::{PlayerLedger, WonderSlot};
pub use phase::{Phase, TokenSelection};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::{GameState, Interrupt};
