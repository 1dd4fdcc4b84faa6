//! Progress tokens.

use serde::{Deserialize, Serialize};

/// A progress token. Ten exist; five are on the board at the start of the
/// game and the rest stay in the box for library effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProgressToken {
    /// +6 coins on acquisition, 4 victory points.
    Agriculture,
    /// +6 coins on acquisition, +4 coins for each chained build.
    Urbanism,
    /// +1 shield for every military card built afterwards.
    Strategy,
    /// Every wonder built afterwards grants an extra turn.
    Theology,
    /// Coins the opponent spends on trading go to the holder.
    Economy,
    /// Blue cards cost 2 fewer of each resource.
    Masonry,
    /// Wonders cost 2 fewer of each resource.
    Architecture,
    /// Grants the Law science symbol.
    Law,
    /// 3 victory points per progress token held, itself included.
    Mathematics,
    /// 7 victory points.
    Philosophy,
}

impl ProgressToken {
    pub const ALL: [ProgressToken; 10] = [
        ProgressToken::Agriculture,
        ProgressToken::Urbanism,
        ProgressToken::Strategy,
        ProgressToken::Theology,
        ProgressToken::Economy,
        ProgressToken::Masonry,
        ProgressToken::Architecture,
        ProgressToken::Law,
        ProgressToken::Mathematics,
        ProgressToken::Philosophy,
    ];

    /// Coins granted when the token is taken.
    #[must_use]
    pub fn coins_on_acquire(self) -> u32 {
        match self {
            ProgressToken::Agriculture | ProgressToken::Urbanism => 6,
            _ => 0,
        }
    }

    /// Flat victory points at game end. Mathematics is scored separately.
    #[must_use]
    pub fn flat_points(self) -> u32 {
        match self {
            ProgressToken::Agriculture => 4,
            ProgressToken::Philosophy => 7,
            _ => 0,
        }
    }
}

impl std::fmt::Display for ProgressToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_coins() {
        assert_eq!(ProgressToken::Agriculture.coins_on_acquire(), 6);
        assert_eq!(ProgressToken::Urbanism.coins_on_acquire(), 6);
        assert_eq!(ProgressToken::Law.coins_on_acquire(), 0);
    }

    #[test]
    fn test_flat_points() {
        let total: u32 = ProgressToken::ALL.iter().map(|t| t.flat_points()).sum();
        assert_eq!(total, 11);
    }
}
