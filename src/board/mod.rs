//! Shared board: the card pyramid of the current age and the military track.

pub mod layout;
pub mod military;
pub mod pyramid;

pub use layout::{PyramidLayout, RowSpec};
pub use military::{Loot, MilitaryTrack, SUPREMACY};
pub use pyramid::{Pyramid, PyramidSlot};
