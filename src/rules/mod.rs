//! Duel rules.
//!
//! - `cost`: Prices with chains, discounts, and trading
//! - `validate`: Side-effect-free legality checks
//! - `machine`: Setup, action application, and phase transitions
//! - `scoring`: End-of-game score sheets and the civilian tie-break
//! - `engine`: `RulesEngine` trait tying the above together
//!
//! The rules never choose anything on a player's behalf. Every choice,
//! including interrupts and the next age's starting player, arrives as an
//! `Action` from whoever holds the decision.

pub mod cost;
pub mod engine;
pub mod machine;
pub mod scoring;
pub mod validate;

pub use cost::{card_cost, wonder_cost, Price, TradeLine};
pub use engine::{DuelRules, GameOutcome, RulesEngine, VictoryType};
pub use scoring::{civilian_winner, score_all, score_player, ScoreSheet};
