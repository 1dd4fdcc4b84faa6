//! Duel configuration.
//!
//! `DuelConfig` carries the seed and the numeric rule constants. The defaults
//! are the standard rules; tests and variants override individual values via
//! the `with_*` builders.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Complete duel configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Seed for every shuffle in the game.
    pub seed: u64,

    /// Coins each player starts with.
    pub starting_coins: u32,

    /// Progress tokens placed face-up on the board at setup.
    pub board_tokens: usize,

    /// Tokens drawn from the box by a library effect.
    pub library_draw: usize,

    /// Age cards removed from each shuffled age deck.
    pub removed_per_age: usize,

    /// Guilds shuffled into the age 3 deck.
    pub guilds_per_game: usize,

    /// Wonders that may be built across both players.
    pub wonder_build_limit: usize,

    /// Distinct science symbols for a scientific victory.
    pub science_victory_symbols: usize,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_coins: 7,
            board_tokens: 5,
            library_draw: 3,
            removed_per_age: 3,
            guilds_per_game: 3,
            wonder_build_limit: 7,
            science_victory_symbols: 6,
        }
    }
}

impl DuelConfig {
    /// Standard rules with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_starting_coins(mut self, coins: u32) -> Self {
        self.starting_coins = coins;
        self
    }

    #[must_use]
    pub fn with_board_tokens(mut self, count: usize) -> Self {
        self.board_tokens = count;
        self
    }

    #[must_use]
    pub fn with_library_draw(mut self, count: usize) -> Self {
        self.library_draw = count;
        self
    }

    #[must_use]
    pub fn with_removed_per_age(mut self, count: usize) -> Self {
        self.removed_per_age = count;
        self
    }

    #[must_use]
    pub fn with_guilds_per_game(mut self, count: usize) -> Self {
        self.guilds_per_game = count;
        self
    }

    #[must_use]
    pub fn with_wonder_build_limit(mut self, limit: usize) -> Self {
        self.wonder_build_limit = limit;
        self
    }

    #[must_use]
    pub fn with_science_victory_symbols(mut self, count: usize) -> Self {
        self.science_victory_symbols = count;
        self
    }

    /// Check the values for internal consistency.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.library_draw == 0 {
            return Err(SetupError::Config("library draw size must be positive".into()));
        }
        if self.wonder_build_limit == 0 {
            return Err(SetupError::Config("wonder build limit must be positive".into()));
        }
        if !(1..=7).contains(&self.science_victory_symbols) {
            return Err(SetupError::Config(format!(
                "science victory needs between 1 and 7 symbols, got {}",
                self.science_victory_symbols
            )));
        }
        Ok(())
    }
}
