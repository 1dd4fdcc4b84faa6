//! Effect system for cards and wonders.
//!
//! - `Effect`: Closed set of effect variants, with end-of-game scoring
//! - `EffectResolver`: Applies a built card's or wonder's effects in order
//!
//! Effects never validate anything. By the time they resolve, the rules
//! engine has already accepted and paid for the action.

mod effect;
mod resolver;

pub use effect::{Effect, GuildBasis, ScoreContext};
pub use resolver::{EffectContext, EffectResolver, EffectSource, Resolution};
