//! Fixed-width tables with an explicit "absent" marker per slot.
//!
//! Cell→face and face→vertex connectivity is ragged: a triangle has three
//! faces, a quadrilateral four. `PaddedArray` stores such data as `rows ×
//! width` slots of `Option<T>`, where `width` is the longest row and `None`
//! marks a slot with no value.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;

/// Row-major `rows × width` table of optional values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaddedSlots<T>")]
pub struct PaddedArray<T> {
    width: usize,
    slots: Vec<Option<T>>,
}

/// Unchecked wire form of [`PaddedArray`].
#[derive(Deserialize)]
struct PaddedSlots<T> {
    width: usize,
    slots: Vec<Option<T>>,
}

impl<T> TryFrom<PaddedSlots<T>> for PaddedArray<T> {
    type Error = MeshError;

    fn try_from(raw: PaddedSlots<T>) -> Result<Self, Self::Error> {
        Self::from_slots(raw.width, raw.slots)
    }
}

/// Padded table of entity IDs.
pub type PaddedIds = PaddedArray<usize>;

impl<T> Default for PaddedArray<T> {
    fn default() -> Self {
        Self {
            width: 0,
            slots: Vec::new(),
        }
    }
}

impl<T: Clone> PaddedArray<T> {
    /// Build from ragged rows; the width is the length of the longest row.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        Self::from_rows_with_width(rows, width)
    }

    /// Build from ragged rows padded to at least `width` slots.
    pub fn from_rows_with_width<R: AsRef<[T]>>(rows: &[R], width: usize) -> Self {
        let width = rows
            .iter()
            .map(|r| r.as_ref().len())
            .max()
            .unwrap_or(0)
            .max(width);
        let mut slots = Vec::with_capacity(rows.len() * width);
        for row in rows {
            let row = row.as_ref();
            slots.extend(row.iter().cloned().map(Some));
            slots.extend(std::iter::repeat_n(None, width - row.len()));
        }
        Self { width, slots }
    }
}

impl<T> PaddedArray<T> {
    /// Build from already padded slots; `slots.len()` must be a multiple of
    /// `width`.
    pub fn from_slots(width: usize, slots: Vec<Option<T>>) -> Result<Self, MeshError> {
        let whole_rows = if width == 0 {
            slots.is_empty()
        } else {
            slots.len() % width == 0
        };
        if !whole_rows {
            return Err(MeshError::SlotCount {
                slots: slots.len(),
                width,
            });
        }
        Ok(Self { width, slots })
    }

    /// Number of slots per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.slots.len() / self.width
        }
    }

    /// `true` when the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots of `row`, absent entries included.
    #[inline]
    pub fn row(&self, row: usize) -> &[Option<T>] {
        &self.slots[row * self.width..(row + 1) * self.width]
    }

    /// The value in `(row, slot)`, or `None` when absent or out of range.
    #[inline]
    pub fn get(&self, row: usize, slot: usize) -> Option<&T> {
        if slot >= self.width {
            return None;
        }
        self.slots.get(row * self.width + slot)?.as_ref()
    }

    /// Present entries of `row` paired with their slot index.
    pub fn valid(&self, row: usize) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.row(row)
            .iter()
            .enumerate()
            .filter_map(|(slot, v)| v.as_ref().map(|v| (slot, v)))
    }

    /// Number of present entries in `row`.
    pub fn count(&self, row: usize) -> usize {
        self.row(row).iter().filter(|v| v.is_some()).count()
    }

    /// Iterator over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<T>]> + '_ {
        self.slots.chunks(self.width.max(1))
    }

    /// Apply `f` to every present entry, keeping the mask.
    pub fn map<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> PaddedArray<U> {
        let width = self.width;
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, v)| v.as_ref().map(|v| f(i / width, i % width, v)))
            .collect();
        PaddedArray { width, slots }
    }

    /// Apply `f` to every slot, present or not.
    pub fn map_slots<U>(
        &self,
        mut f: impl FnMut(usize, usize, Option<&T>) -> Option<U>,
    ) -> PaddedArray<U> {
        let width = self.width;
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, v)| f(i / width, i % width, v.as_ref()))
            .collect();
        PaddedArray { width, slots }
    }

    /// Copy with every absent slot replaced by `fill(row)`; the result has no
    /// absent entries.
    pub fn fill_absent(&self, fill: impl Fn(usize) -> T) -> PaddedArray<T>
    where
        T: Clone,
    {
        self.map_slots(|row, _, v| Some(v.cloned().unwrap_or_else(|| fill(row))))
    }

    /// Present entries of `row` collected into a vector.
    pub fn row_values(&self, row: usize) -> Vec<T>
    where
        T: Clone,
    {
        self.valid(row).map(|(_, v)| v.clone()).collect()
    }

    /// Largest present entry, if any.
    pub fn max_value(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.slots.iter().flatten().max()
    }
}

impl<T: Ord> PaddedArray<T> {
    /// Sort each row ascending; absent slots move to the end of the row.
    pub fn sort_rows(&mut self) {
        if self.width == 0 {
            return;
        }
        for row in self.slots.chunks_mut(self.width) {
            row.sort_by(|a, b| match (a, b) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
    }
}
