//! Connectivity-only mesh structure.
//!
//! Everything here is derived from the cell→face table alone and is
//! independent of coordinates and units:
//! - face→cell adjacency (the transpose of `cellFaceIDs`)
//! - interior/exterior classification of faces and cells
//! - per cell-face orientation signs
//! - cell→cell adjacency, with and without self-filled boundary slots

pub mod orientation;

pub use orientation::Orientation;

use crate::data::padded::{PaddedArray, PaddedIds};
use crate::debug_invariants::{DebugInvariants, ensure};
use crate::mesh_error::MeshError;

/// The (one or two) cells adjacent to a face.
///
/// `first` is always the lowest adjacent cell ID; `second` is `None` on the
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceCells {
    pub first: usize,
    pub second: Option<usize>,
}

impl FaceCells {
    /// A boundary face has a single adjacent cell.
    #[inline]
    pub fn is_exterior(&self) -> bool {
        self.second.is_none()
    }

    /// The neighbour of `cell` across this face, if there is one.
    #[inline]
    pub fn other(&self, cell: usize) -> Option<usize> {
        if self.first == cell {
            self.second
        } else {
            Some(self.first)
        }
    }

    /// Adjacent cells in ascending order.
    pub fn cells(&self) -> impl Iterator<Item = usize> {
        std::iter::once(self.first).chain(self.second)
    }
}

/// Derived connectivity of a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    face_cells: Vec<FaceCells>,
    interior_faces: Vec<usize>,
    exterior_faces: Vec<usize>,
    interior_cells: Vec<usize>,
    exterior_cells: Vec<usize>,
    cell_to_face_orientations: PaddedArray<Orientation>,
    cell_to_cell_ids: PaddedIds,
    cell_to_cell_ids_filled: PaddedIds,
}

/// Derive the full [`Topology`] of a mesh with `num_faces` faces.
///
/// Fails if a face is bounded by no cell, by more than two cells, or twice by
/// the same cell.
pub fn build_topology(num_faces: usize, cell_face_ids: &PaddedIds) -> Result<Topology, MeshError> {
    let face_cells = compute_face_cells(num_faces, cell_face_ids)?;

    let (exterior_faces, interior_faces): (Vec<usize>, Vec<usize>) =
        (0..num_faces).partition(|&f| face_cells[f].is_exterior());

    let (exterior_cells, interior_cells): (Vec<usize>, Vec<usize>) = (0..cell_face_ids.rows())
        .partition(|&c| {
            cell_face_ids
                .valid(c)
                .any(|(_, &f)| face_cells[f].is_exterior())
        });

    let cell_to_face_orientations =
        cell_face_ids.map(|cell, _, &f| Orientation::for_cell(face_cells[f].first, cell));

    let cell_to_cell_ids =
        cell_face_ids.map_slots(|cell, _, f| f.and_then(|&f| face_cells[f].other(cell)));
    let cell_to_cell_ids_filled = cell_to_cell_ids.fill_absent(|cell| cell);

    log::trace!(
        "topology: {} faces ({} exterior), {} cells ({} exterior)",
        num_faces,
        exterior_faces.len(),
        cell_face_ids.rows(),
        exterior_cells.len()
    );

    Ok(Topology {
        face_cells,
        interior_faces,
        exterior_faces,
        interior_cells,
        exterior_cells,
        cell_to_face_orientations,
        cell_to_cell_ids,
        cell_to_cell_ids_filled,
    })
}

/// Invert `cellFaceIDs`: visit cells in ascending order and append each to
/// the adjacency list of its faces.
pub fn compute_face_cells(
    num_faces: usize,
    cell_face_ids: &PaddedIds,
) -> Result<Vec<FaceCells>, MeshError> {
    let mut adjacency: Vec<(Option<usize>, Option<usize>)> = vec![(None, None); num_faces];
    for cell in 0..cell_face_ids.rows() {
        for (_, &face) in cell_face_ids.valid(cell) {
            let slot = adjacency.get_mut(face).ok_or(MeshError::DanglingFace {
                cell,
                face,
                face_count: num_faces,
            })?;
            match (slot.0, slot.1) {
                (None, _) => slot.0 = Some(cell),
                (Some(first), second) if first == cell || second == Some(cell) => {
                    return Err(MeshError::DuplicateCellFace { cell, face });
                }
                (Some(_), None) => slot.1 = Some(cell),
                (Some(_), Some(_)) => {
                    let count = 3 + cell_face_ids
                        .iter_rows()
                        .skip(cell + 1)
                        .filter(|row| row.contains(&Some(face)))
                        .count();
                    return Err(MeshError::TooManyAdjacentCells { face, count });
                }
            }
        }
    }
    adjacency
        .into_iter()
        .enumerate()
        .map(|(face, cells)| match cells {
            (Some(first), second) => Ok(FaceCells { first, second }),
            (None, _) => Err(MeshError::OrphanFace { face }),
        })
        .collect()
}

impl Topology {
    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.face_cells.len()
    }

    /// Number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cell_to_cell_ids.rows()
    }

    /// Per face, its adjacent cells.
    #[inline]
    pub fn face_cells(&self) -> &[FaceCells] {
        &self.face_cells
    }

    /// Faces with two adjacent cells, ascending.
    #[inline]
    pub fn interior_faces(&self) -> &[usize] {
        &self.interior_faces
    }

    /// Faces with one adjacent cell, ascending.
    #[inline]
    pub fn exterior_faces(&self) -> &[usize] {
        &self.exterior_faces
    }

    /// Cells with no boundary face, ascending.
    #[inline]
    pub fn interior_cells(&self) -> &[usize] {
        &self.interior_cells
    }

    /// Cells touching at least one boundary face, ascending.
    #[inline]
    pub fn exterior_cells(&self) -> &[usize] {
        &self.exterior_cells
    }

    /// Per (cell, face slot), whether the face normal points out of the cell.
    #[inline]
    pub fn cell_to_face_orientations(&self) -> &PaddedArray<Orientation> {
        &self.cell_to_face_orientations
    }

    /// Per (cell, face slot), the neighbouring cell; absent on the boundary.
    #[inline]
    pub fn cell_to_cell_ids(&self) -> &PaddedIds {
        &self.cell_to_cell_ids
    }

    /// Like [`Self::cell_to_cell_ids`] with every absent slot holding the
    /// owning cell's own ID.
    #[inline]
    pub fn cell_to_cell_ids_filled(&self) -> &PaddedIds {
        &self.cell_to_cell_ids_filled
    }
}

impl DebugInvariants for Topology {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "topology");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (face, cells) in self.face_cells.iter().enumerate() {
            if let Some(second) = cells.second {
                ensure(cells.first < second, || {
                    format!("face {face} cells out of order: {} >= {second}", cells.first)
                })?;
            }
        }
        ensure(
            self.interior_faces.len() + self.exterior_faces.len() == self.num_faces(),
            || "interior and exterior faces do not partition the faces".into(),
        )?;
        ensure(
            self.interior_cells.len() + self.exterior_cells.len() == self.num_cells(),
            || "interior and exterior cells do not partition the cells".into(),
        )?;
        for cell in 0..self.num_cells() {
            for slot in 0..self.cell_to_cell_ids.width() {
                let filled = self.cell_to_cell_ids_filled.get(cell, slot).copied();
                let expected = self.cell_to_cell_ids.get(cell, slot).copied().unwrap_or(cell);
                ensure(filled == Some(expected), || {
                    format!("cell {cell} slot {slot}: filled {filled:?}, expected {expected}")
                })?;
            }
        }
        Ok(())
    }
}
