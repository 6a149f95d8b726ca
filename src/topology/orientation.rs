//! Sign relating a face's natural normal to the outward direction of a cell.

use core::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

/// Orientation of a face with respect to one of its cells.
///
/// `Outward` (+1) means the face's natural normal already points out of the
/// cell; `Inward` (−1) means it must be flipped.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Outward,
    Inward,
}

impl Debug for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Orientation").field(&self.as_i8()).finish()
    }
}

impl Orientation {
    /// `Outward` iff the cell is the face's first adjacent cell.
    #[inline]
    pub fn for_cell(first_cell: usize, cell: usize) -> Self {
        if first_cell == cell {
            Orientation::Outward
        } else {
            Orientation::Inward
        }
    }

    /// `+1` or `−1`.
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Orientation::Outward => 1,
            Orientation::Inward => -1,
        }
    }

    /// `+1.0` or `−1.0`, for scaling vectors.
    #[inline]
    pub fn sign(self) -> f64 {
        f64::from(self.as_i8())
    }

    /// The opposite orientation.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Orientation::Outward => Orientation::Inward,
            Orientation::Inward => Orientation::Outward,
        }
    }

    /// Orient `v` with this sign.
    #[inline]
    pub fn apply(self, v: [f64; 3]) -> [f64; 3] {
        let s = self.sign();
        [s * v[0], s * v[1], s * v[2]]
    }
}
