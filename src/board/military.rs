//! The military conflict track.
//!
//! A single marker between -9 and 9. Player 0 pushes it towards +9, player 1
//! towards -9. Four loot zones sit at -5, -2, +2 and +5; the first time the
//! marker moves past one in the advancing player's direction, the opponent
//! loses coins. Reaching either end is military supremacy.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerLedger};

/// Track end. Reaching it wins the game.
pub const SUPREMACY: i8 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct LootZone {
    threshold: i8,
    amount: u32,
    claimed: bool,
}

/// A loot zone that fired during one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub threshold: i8,
    /// Coins the zone charges.
    pub amount: u32,
    /// Coins the opponent actually lost after clamping.
    pub lost: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilitaryTrack {
    position: i8,
    zones: [LootZone; 4],
}

impl Default for MilitaryTrack {
    fn default() -> Self {
        let zone = |threshold: i8, amount| LootZone {
            threshold,
            amount,
            claimed: false,
        };
        Self {
            position: 0,
            zones: [zone(-5, 5), zone(-2, 2), zone(2, 2), zone(5, 5)],
        }
    }
}

impl MilitaryTrack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current marker position, positive towards player 1's capital.
    #[must_use]
    pub fn position(&self) -> i8 {
        self.position
    }

    /// Move the marker `shields` steps for `active` and charge loot to
    /// `opponent`.
    ///
    /// ```
    /// use wonders_duel::board::MilitaryTrack;
    /// use wonders_duel::core::{PlayerId, PlayerLedger};
    ///
    /// let mut track = MilitaryTrack::new();
    /// let mut opponent = PlayerLedger::new(PlayerId::SECOND, 7);
    ///
    /// let loot = track.apply_shields(3, PlayerId::FIRST, &mut opponent);
    /// assert_eq!(track.position(), 3);
    /// assert_eq!(loot.len(), 1);
    /// assert_eq!(opponent.coins(), 5);
    /// ```
    pub fn apply_shields(
        &mut self,
        shields: u8,
        active: PlayerId,
        opponent: &mut PlayerLedger,
    ) -> SmallVec<[Loot; 2]> {
        let dir = active.military_direction();
        let from = self.position;
        let to = (i16::from(from) + i16::from(dir) * i16::from(shields))
            .clamp(-i16::from(SUPREMACY), i16::from(SUPREMACY)) as i8;
        self.position = to;

        let mut loot = SmallVec::new();
        for zone in &mut self.zones {
            if zone.claimed || zone.threshold.signum() != dir {
                continue;
            }
            let crossed = from * dir <= zone.threshold * dir && to * dir > zone.threshold * dir;
            if crossed {
                zone.claimed = true;
                let lost = opponent.lose_coins(zone.amount);
                loot.push(Loot {
                    threshold: zone.threshold,
                    amount: zone.amount,
                    lost,
                });
            }
        }
        loot
    }

    /// The player who has reached the opponent's capital, if any.
    #[must_use]
    pub fn supremacy(&self) -> Option<PlayerId> {
        match self.position {
            SUPREMACY => Some(PlayerId::FIRST),
            p if p == -SUPREMACY => Some(PlayerId::SECOND),
            _ => None,
        }
    }

    /// The player the marker favors, if it is off center.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        match self.position.signum() {
            1 => Some(PlayerId::FIRST),
            -1 => Some(PlayerId::SECOND),
            _ => None,
        }
    }

    /// The player the marker works against, if it is off center.
    #[must_use]
    pub fn trailing(&self) -> Option<PlayerId> {
        self.leader().map(PlayerId::opponent)
    }

    /// Victory points the leading player scores at game end.
    #[must_use]
    pub fn victory_points(&self) -> u32 {
        match self.position.unsigned_abs() {
            0 => 0,
            1..=2 => 2,
            3..=5 => 5,
            _ => 10,
        }
    }

    /// Points `player` scores from the track.
    #[must_use]
    pub fn points_for(&self, player: PlayerId) -> u32 {
        if self.leader() == Some(player) {
            self.victory_points()
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(player: PlayerId, coins: u32) -> PlayerLedger {
        PlayerLedger::new(player, coins)
    }

    #[test]
    fn test_loot_fires_once() {
        let mut track = MilitaryTrack::new();
        let mut p1 = ledger(PlayerId::SECOND, 7);

        track.apply_shields(1, PlayerId::FIRST, &mut p1);
        let loot = track.apply_shields(2, PlayerId::FIRST, &mut p1);
        assert_eq!(track.position(), 3);
        assert_eq!(loot.as_slice(), &[Loot { threshold: 2, amount: 2, lost: 2 }]);
        assert_eq!(p1.coins(), 5);

        // Pushed back and forward again across +2: no second loot.
        let mut p0 = ledger(PlayerId::FIRST, 7);
        track.apply_shields(2, PlayerId::SECOND, &mut p0);
        assert_eq!(track.position(), 1);
        assert!(track.apply_shields(2, PlayerId::FIRST, &mut p1).is_empty());
        assert_eq!(p1.coins(), 5);
    }

    #[test]
    fn test_stopping_on_threshold_does_not_loot() {
        let mut track = MilitaryTrack::new();
        let mut p1 = ledger(PlayerId::SECOND, 7);
        assert!(track.apply_shields(2, PlayerId::FIRST, &mut p1).is_empty());
        assert_eq!(track.position(), 2);
        assert_eq!(track.apply_shields(1, PlayerId::FIRST, &mut p1).len(), 1);
    }

    #[test]
    fn test_big_push_crosses_two_zones_with_clamping() {
        let mut track = MilitaryTrack::new();
        let mut p0 = ledger(PlayerId::FIRST, 4);
        let loot = track.apply_shields(6, PlayerId::SECOND, &mut p0);
        assert_eq!(track.position(), -6);
        assert_eq!(loot.len(), 2);
        assert_eq!(loot[0], Loot { threshold: -5, amount: 5, lost: 4 });
        assert_eq!(loot[1], Loot { threshold: -2, amount: 2, lost: 0 });
        assert_eq!(p0.coins(), 0);
    }

    #[test]
    fn test_position_clamps_and_supremacy() {
        let mut track = MilitaryTrack::new();
        let mut p1 = ledger(PlayerId::SECOND, 0);
        track.apply_shields(20, PlayerId::FIRST, &mut p1);
        assert_eq!(track.position(), 9);
        assert_eq!(track.supremacy(), Some(PlayerId::FIRST));
    }

    #[test]
    fn test_victory_point_bands() {
        let mut track = MilitaryTrack::new();
        let mut p0 = ledger(PlayerId::FIRST, 0);
        assert_eq!(track.victory_points(), 0);
        assert_eq!(track.leader(), None);

        track.apply_shields(2, PlayerId::SECOND, &mut p0);
        assert_eq!(track.victory_points(), 2);
        assert_eq!(track.points_for(PlayerId::SECOND), 2);
        assert_eq!(track.points_for(PlayerId::FIRST), 0);
        assert_eq!(track.trailing(), Some(PlayerId::FIRST));

        track.apply_shields(3, PlayerId::SECOND, &mut p0);
        assert_eq!(track.victory_points(), 5);
        track.apply_shields(1, PlayerId::SECOND, &mut p0);
        assert_eq!(track.victory_points(), 10);
    }
}
