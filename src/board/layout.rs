//! Pyramid layouts for the three ages.
//!
//! A layout lists rows from back to front. Each card in a row has a
//! horizontal position in half-card units; a card in row `r + 1` overlaps
//! (covers) a card in row `r` iff their positions differ by exactly one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One row of a layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpec {
    /// Cards in this row are dealt face-up.
    pub face_up: bool,
    /// Horizontal positions in half-card units, left to right.
    pub positions: SmallVec<[u8; 8]>,
}

impl RowSpec {
    #[must_use]
    pub fn new(face_up: bool, positions: &[u8]) -> Self {
        Self {
            face_up,
            positions: SmallVec::from_slice(positions),
        }
    }

    /// A centered row of `width` cards, in a pyramid at most six cards wide.
    #[must_use]
    pub fn centered(face_up: bool, width: u8) -> Self {
        let start = 6 - width;
        let positions: SmallVec<[u8; 8]> = (0..width).map(|k| start + 2 * k).collect();
        Self { face_up, positions }
    }
}

/// The geometry of an age's card pyramid.
///
/// ```
/// use wonders_duel::board::PyramidLayout;
///
/// for age in 1..=3 {
///     assert_eq!(PyramidLayout::for_age(age).unwrap().slot_count(), 20);
/// }
/// assert!(PyramidLayout::for_age(4).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidLayout {
    rows: Vec<RowSpec>,
}

impl PyramidLayout {
    #[must_use]
    pub fn new(rows: Vec<RowSpec>) -> Self {
        Self { rows }
    }

    /// Standard layout for an age: a pyramid for age 1, an inverted pyramid
    /// for age 2, and the split hexagon for age 3.
    #[must_use]
    pub fn for_age(age: u8) -> Option<Self> {
        let rows = match age {
            1 => [2, 3, 4, 5, 6]
                .iter()
                .enumerate()
                .map(|(r, &w)| RowSpec::centered(r % 2 == 0, w))
                .collect(),
            2 => [6, 5, 4, 3, 2]
                .iter()
                .enumerate()
                .map(|(r, &w)| RowSpec::centered(r % 2 == 0, w))
                .collect(),
            3 => vec![
                RowSpec::centered(true, 2),
                RowSpec::centered(false, 3),
                RowSpec::centered(true, 4),
                RowSpec::new(false, &[3, 7]),
                RowSpec::centered(true, 4),
                RowSpec::centered(false, 3),
                RowSpec::centered(true, 2),
            ],
            _ => return None,
        };
        Some(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[RowSpec] {
        &self.rows
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.rows.iter().map(|r| r.positions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_positions() {
        assert_eq!(RowSpec::centered(true, 2).positions.as_slice(), &[4, 6]);
        assert_eq!(RowSpec::centered(true, 3).positions.as_slice(), &[3, 5, 7]);
        assert_eq!(RowSpec::centered(true, 6).positions.as_slice(), &[0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_row_widths() {
        let widths = |age| -> Vec<usize> {
            PyramidLayout::for_age(age)
                .unwrap()
                .rows()
                .iter()
                .map(|r| r.positions.len())
                .collect()
        };
        assert_eq!(widths(1), vec![2, 3, 4, 5, 6]);
        assert_eq!(widths(2), vec![6, 5, 4, 3, 2]);
        assert_eq!(widths(3), vec![2, 3, 4, 2, 4, 3, 2]);
    }

    #[test]
    fn test_face_up_rows_alternate() {
        let layout = PyramidLayout::for_age(3).unwrap();
        let flags: Vec<bool> = layout.rows().iter().map(|r| r.face_up).collect();
        assert_eq!(flags, vec![true, false, true, false, true, false, true]);
    }
}
