//! The card dependency graph for one age.
//!
//! Each slot holds one card and knows which slots it covers and which slots
//! cover it. A card can be taken only when nothing still on the board covers
//! it; taking a card may reveal the face-down cards beneath it.
//!
//! ## Invariants
//!
//! - The shape (slot count and edges) is fixed at construction.
//! - A slot that starts face-down turns face-up exactly when every slot
//!   covering it has been removed, and never turns back.
//! - A slot with no coverers is face-up.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::error::SetupError;

use super::layout::PyramidLayout;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidSlot {
    pub card: CardId,
    pub row: u8,
    pub face_up: bool,
    pub removed: bool,
    /// Slots this one overlaps (further back).
    pub covers: SmallVec<[usize; 2]>,
    /// Slots overlapping this one (further front).
    pub covered_by: SmallVec<[usize; 2]>,
}

/// Card availability for one age.
///
/// ## Example
///
/// ```
/// use wonders_duel::board::Pyramid;
/// use wonders_duel::cards::CardId;
///
/// // Slot 2 covers slots 0 and 1.
/// let slots = [(CardId(10), false), (CardId(11), false), (CardId(12), true)];
/// let mut pyramid = Pyramid::from_edges(&slots, &[(2, 0), (2, 1)]).unwrap();
///
/// assert_eq!(pyramid.available_cards(), vec![CardId(12)]);
/// assert!(pyramid.remove(CardId(12)));
/// assert_eq!(pyramid.available_cards(), vec![CardId(10), CardId(11)]);
/// assert!(!pyramid.remove(CardId(12)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pyramid {
    slots: Vector<PyramidSlot>,
}

impl Pyramid {
    /// Deal `cards` into a layout, back row first, left to right.
    pub fn from_layout(
        layout: &PyramidLayout,
        cards: &[CardId],
        age: u8,
    ) -> Result<Self, SetupError> {
        if cards.len() != layout.slot_count() {
            return Err(SetupError::MalformedPyramid {
                age,
                reason: format!("{} cards for {} slots", cards.len(), layout.slot_count()),
            });
        }

        let mut slots: Vec<PyramidSlot> = Vec::with_capacity(cards.len());
        let mut row_starts = Vec::with_capacity(layout.rows().len());
        let mut cards = cards.iter();

        for (r, row) in layout.rows().iter().enumerate() {
            row_starts.push(slots.len());
            for _ in &row.positions {
                let Some(&card) = cards.next() else {
                    return Err(SetupError::MalformedPyramid {
                        age,
                        reason: "ran out of cards while dealing".into(),
                    });
                };
                slots.push(PyramidSlot {
                    card,
                    row: r as u8,
                    face_up: row.face_up,
                    removed: false,
                    covers: SmallVec::new(),
                    covered_by: SmallVec::new(),
                });
            }
        }

        for r in 1..layout.rows().len() {
            let upper = &layout.rows()[r];
            let lower = &layout.rows()[r - 1];
            for (i, &ux) in upper.positions.iter().enumerate() {
                for (j, &lx) in lower.positions.iter().enumerate() {
                    if ux.abs_diff(lx) == 1 {
                        let u = row_starts[r] + i;
                        let l = row_starts[r - 1] + j;
                        slots[u].covers.push(l);
                        slots[l].covered_by.push(u);
                    }
                }
            }
        }

        Ok(Self::normalized(slots))
    }

    /// Build an arbitrary graph. `slots` gives each slot's card and initial
    /// face-up flag; each edge `(upper, lower)` means `upper` covers `lower`.
    pub fn from_edges(
        slots: &[(CardId, bool)],
        edges: &[(usize, usize)],
    ) -> Result<Self, SetupError> {
        let mut built: Vec<PyramidSlot> = slots
            .iter()
            .map(|&(card, face_up)| PyramidSlot {
                card,
                row: 0,
                face_up,
                removed: false,
                covers: SmallVec::new(),
                covered_by: SmallVec::new(),
            })
            .collect();

        for &(upper, lower) in edges {
            if upper >= built.len() || lower >= built.len() {
                return Err(SetupError::MalformedPyramid {
                    age: 0,
                    reason: format!(
                        "edge ({upper}, {lower}) out of range for {} slots",
                        built.len()
                    ),
                });
            }
            if upper == lower {
                return Err(SetupError::MalformedPyramid {
                    age: 0,
                    reason: format!("slot {upper} covers itself"),
                });
            }
            if !built[upper].covers.contains(&lower) {
                built[upper].covers.push(lower);
                built[lower].covered_by.push(upper);
            }
        }

        if let Some(slot) = first_cycle(&built) {
            return Err(SetupError::MalformedPyramid {
                age: 0,
                reason: format!("cycle through slot {slot}"),
            });
        }

        Ok(Self::normalized(built))
    }

    fn normalized(mut slots: Vec<PyramidSlot>) -> Self {
        for slot in &mut slots {
            if slot.covered_by.is_empty() {
                slot.face_up = true;
            }
        }
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&PyramidSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> impl Iterator<Item = &PyramidSlot> {
        self.slots.iter()
    }

    fn slot_of(&self, card: CardId) -> Option<usize> {
        self.slots.iter().position(|s| s.card == card)
    }

    /// Face-up, still on the board, and not covered by a remaining slot.
    #[must_use]
    pub fn is_selectable(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| {
            slot.face_up
                && !slot.removed
                && slot
                    .covered_by
                    .iter()
                    .all(|&c| self.slots.get(c).map_or(true, |s| s.removed))
        })
    }

    #[must_use]
    pub fn is_card_selectable(&self, card: CardId) -> bool {
        self.slot_of(card).is_some_and(|i| self.is_selectable(i))
    }

    /// Remove a card. Returns false if it is absent or already removed.
    pub fn remove(&mut self, card: CardId) -> bool {
        self.take(card).is_some()
    }

    /// Remove a card and return the cards this revealed, or `None` if the
    /// card is absent or already removed.
    pub fn take(&mut self, card: CardId) -> Option<SmallVec<[CardId; 2]>> {
        let index = self.slot_of(card)?;
        let covers = {
            let slot = self.slots.get_mut(index)?;
            if slot.removed {
                return None;
            }
            slot.removed = true;
            slot.covers.clone()
        };

        let mut revealed = SmallVec::new();
        for lower in covers {
            let uncovered = self.slots.get(lower).is_some_and(|s| {
                !s.face_up
                    && s
                        .covered_by
                        .iter()
                        .all(|&c| self.slots.get(c).map_or(true, |u| u.removed))
            });
            if uncovered {
                if let Some(slot) = self.slots.get_mut(lower) {
                    slot.face_up = true;
                    revealed.push(slot.card);
                }
            }
        }
        Some(revealed)
    }

    /// Cards that can be taken right now, in slot order.
    #[must_use]
    pub fn available_cards(&self) -> Vec<CardId> {
        (0..self.slots.len())
            .filter(|&i| self.is_selectable(i))
            .filter_map(|i| self.slots.get(i).map(|s| s.card))
            .collect()
    }

    /// The card in a slot if it can be seen: face-up and not yet removed.
    #[must_use]
    pub fn visible_card(&self, index: usize) -> Option<CardId> {
        self.slots
            .get(index)
            .filter(|s| s.face_up && !s.removed)
            .map(|s| s.card)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| !s.removed).count()
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.slots.iter().all(|s| s.removed)
    }
}

impl Default for Pyramid {
    fn default() -> Self {
        Self { slots: Vector::new() }
    }
}

/// Kahn's algorithm over the cover edges. Returns a slot left on a cycle.
fn first_cycle(slots: &[PyramidSlot]) -> Option<usize> {
    let mut pending: Vec<usize> = slots.iter().map(|s| s.covered_by.len()).collect();
    let mut ready: Vec<usize> = (0..slots.len()).filter(|&i| pending[i] == 0).collect();
    let mut visited = 0;

    while let Some(i) = ready.pop() {
        visited += 1;
        for &lower in &slots[i].covers {
            pending[lower] -= 1;
            if pending[lower] == 0 {
                ready.push(lower);
            }
        }
    }

    if visited == slots.len() {
        None
    } else {
        pending.iter().position(|&n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(age: u8) -> Pyramid {
        let layout = PyramidLayout::for_age(age).unwrap();
        let cards: Vec<CardId> = (0..20).map(CardId).collect();
        Pyramid::from_layout(&layout, &cards, age).unwrap()
    }

    #[test]
    fn test_age_one_front_row_available() {
        let pyramid = deal(1);
        // Front row is the last six slots.
        assert_eq!(pyramid.available_cards(), (14..20).map(CardId).collect::<Vec<_>>());
        assert!(pyramid.visible_card(0).is_some(), "back row is face-up");
        assert!(pyramid.visible_card(2).is_none(), "second row is face-down");
        assert!(!pyramid.is_selectable(0));
    }

    #[test]
    fn test_age_two_starts_with_two_cards() {
        let pyramid = deal(2);
        assert_eq!(pyramid.available_cards(), vec![CardId(18), CardId(19)]);
        // Back slot 0 (x=0) is covered only by slot 6 (x=1).
        assert_eq!(pyramid.slot(0).unwrap().covered_by.as_slice(), &[6]);
    }

    #[test]
    fn test_age_three_gap_row() {
        let pyramid = deal(3);
        // Row 3 (slots 9, 10) sits at x = 3 and 7.
        let left = pyramid.slot(9).unwrap();
        assert_eq!(left.covers.as_slice(), &[5, 6]);
        assert_eq!(left.covered_by.as_slice(), &[11, 12]);
        let right = pyramid.slot(10).unwrap();
        assert_eq!(right.covers.as_slice(), &[7, 8]);
    }

    #[test]
    fn test_reveal_needs_every_coverer_removed() {
        let mut pyramid = deal(1);
        // Slot 9 (row 3, x=1) is covered by slots 14 (x=0) and 15 (x=2).
        assert!(!pyramid.slot(9).unwrap().face_up);
        assert!(pyramid.remove(CardId(14)));
        assert!(!pyramid.slot(9).unwrap().face_up);

        let revealed = pyramid.take(CardId(15)).unwrap();
        assert!(revealed.contains(&CardId(9)));
        assert!(pyramid.is_card_selectable(CardId(9)));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut pyramid = deal(1);
        assert!(pyramid.remove(CardId(19)));
        assert!(!pyramid.remove(CardId(19)));
        assert!(!pyramid.remove(CardId(999)));
        assert_eq!(pyramid.remaining(), 19);
    }

    #[test]
    fn test_wrong_deck_size_is_malformed() {
        let layout = PyramidLayout::for_age(1).unwrap();
        let cards: Vec<CardId> = (0..19).map(CardId).collect();
        let err = Pyramid::from_layout(&layout, &cards, 1).unwrap_err();
        assert!(matches!(err, SetupError::MalformedPyramid { age: 1, .. }));
    }

    #[test]
    fn test_bad_edges_rejected() {
        let slots = [(CardId(0), true), (CardId(1), true)];
        assert!(Pyramid::from_edges(&slots, &[(0, 2)]).is_err());
        assert!(Pyramid::from_edges(&slots, &[(1, 1)]).is_err());
    }

    #[test]
    fn test_cyclic_edges_rejected() {
        let slots = [(CardId(0), false), (CardId(1), false), (CardId(2), true)];
        assert!(matches!(
            Pyramid::from_edges(&slots[..2], &[(0, 1), (1, 0)]),
            Err(SetupError::MalformedPyramid { .. })
        ));
        assert!(Pyramid::from_edges(&slots, &[(2, 1), (1, 0), (0, 1)]).is_err());
        assert!(Pyramid::from_edges(&slots, &[(2, 1), (1, 0), (2, 0)]).is_ok());
    }

    #[test]
    fn test_clearing() {
        let mut pyramid = deal(2);
        let mut taken = 0;
        while let Some(&card) = pyramid.available_cards().first() {
            assert!(pyramid.remove(card));
            taken += 1;
        }
        assert_eq!(taken, 20);
        assert!(pyramid.is_cleared());
    }
}
