//! End-of-game scoring.
//!
//! Each player's total is the sum of:
//! - `score_at_game_end` of every built card, split by color
//! - `score_at_game_end` of every built wonder
//! - military points for the player the marker favors
//! - one point per 3 coins
//! - progress tokens: Agriculture 4, Philosophy 7, Mathematics 3 per token held
//!
//! The higher total wins; a tie goes to the player with more blue-card
//! points, and a tie on that is a draw.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{CardColor, Catalog, ProgressToken};
use crate::core::{GameState, PlayerId, PlayerLedger, PlayerMap};
use crate::effects::ScoreContext;

/// Points per category for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreSheet {
    /// Blue cards.
    pub civilian: u32,
    /// Green cards.
    pub science: u32,
    /// Yellow cards.
    pub commercial: u32,
    /// Purple cards.
    pub guilds: u32,
    /// Cards of any other color.
    pub other_cards: u32,
    pub wonders: u32,
    pub military: u32,
    pub treasury: u32,
    pub progress: u32,
}

impl ScoreSheet {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.civilian
            + self.science
            + self.commercial
            + self.guilds
            + self.other_cards
            + self.wonders
            + self.military
            + self.treasury
            + self.progress
    }
}

/// Score one player. Pure.
#[must_use]
pub fn score_player(catalog: &Catalog, state: &GameState, player: PlayerId) -> ScoreSheet {
    let owner = state.player(player);
    let opponent = state.player(player.opponent());
    let ctx = ScoreContext {
        catalog,
        owner,
        opponent,
    };

    let mut sheet = ScoreSheet::default();
    for card in owner.built_cards().iter().filter_map(|id| catalog.card(*id)) {
        let points: u32 = card.effects.iter().map(|e| e.score_at_game_end(&ctx)).sum();
        match card.color {
            CardColor::Blue => sheet.civilian += points,
            CardColor::Green => sheet.science += points,
            CardColor::Yellow => sheet.commercial += points,
            CardColor::Purple => sheet.guilds += points,
            CardColor::Brown | CardColor::Grey | CardColor::Red => sheet.other_cards += points,
        }
    }

    sheet.wonders = owner
        .wonders()
        .iter()
        .filter(|slot| slot.is_built())
        .filter_map(|slot| catalog.wonder(slot.wonder))
        .flat_map(|w| w.effects.iter())
        .map(|e| e.score_at_game_end(&ctx))
        .sum();

    sheet.military = state.military().points_for(player);
    sheet.treasury = owner.coins() / 3;
    sheet.progress = progress_points(owner);
    sheet
}

fn progress_points(ledger: &PlayerLedger) -> u32 {
    let flat: u32 = ledger.tokens().iter().map(|t| t.flat_points()).sum();
    let mathematics = if ledger.has_token(ProgressToken::Mathematics) {
        3 * ledger.tokens().len() as u32
    } else {
        0
    };
    flat + mathematics
}

/// Score both players.
#[must_use]
pub fn score_all(catalog: &Catalog, state: &GameState) -> PlayerMap<ScoreSheet> {
    PlayerMap::new(|p| score_player(catalog, state, p))
}

/// Civilian winner: higher total, then more blue points, else a draw.
#[must_use]
pub fn civilian_winner(scores: &PlayerMap<ScoreSheet>) -> Option<PlayerId> {
    let (a, b) = (scores[PlayerId::FIRST], scores[PlayerId::SECOND]);
    let ordering = a
        .total()
        .cmp(&b.total())
        .then(a.civilian.cmp(&b.civilian));
    match ordering {
        Ordering::Greater => Some(PlayerId::FIRST),
        Ordering::Less => Some(PlayerId::SECOND),
        Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(civilian: u32, other: u32) -> ScoreSheet {
        ScoreSheet {
            civilian,
            wonders: other,
            ..ScoreSheet::default()
        }
    }

    #[test]
    fn test_total_sums_categories() {
        let s = ScoreSheet {
            civilian: 1,
            science: 2,
            commercial: 3,
            guilds: 4,
            other_cards: 5,
            wonders: 6,
            military: 7,
            treasury: 8,
            progress: 9,
        };
        assert_eq!(s.total(), 45);
    }

    #[test]
    fn test_tie_cascade() {
        let scores = PlayerMap::from_pair(sheet(3, 10), sheet(1, 11));
        assert_eq!(civilian_winner(&scores), Some(PlayerId::FIRST));

        let higher = PlayerMap::from_pair(sheet(0, 20), sheet(5, 10));
        assert_eq!(civilian_winner(&higher), Some(PlayerId::FIRST));

        let blue_breaks_tie = PlayerMap::from_pair(sheet(2, 10), sheet(4, 8));
        assert_eq!(civilian_winner(&blue_breaks_tie), Some(PlayerId::SECOND));

        let draw = PlayerMap::with_value(sheet(4, 4));
        assert_eq!(civilian_winner(&draw), None);
    }

    #[test]
    fn test_progress_points() {
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, 0);
        ledger.add_token(ProgressToken::Agriculture);
        ledger.add_token(ProgressToken::Philosophy);
        assert_eq!(progress_points(&ledger), 11);
        ledger.add_token(ProgressToken::Mathematics);
        assert_eq!(progress_points(&ledger), 11 + 9);
    }
}
