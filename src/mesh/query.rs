//! Boundary-face selectors and nearest-cell lookup.

use crate::geometry::try_map_indices;
use crate::geometry::vector::distance_squared;
use crate::mesh::Mesh;
use crate::mesh_error::MeshError;

/// Which end of an axis a face selector picks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

impl Mesh {
    /// Faces whose centre coordinate along `axis` equals the minimum or
    /// maximum over all face centres. Comparison is exact.
    pub fn faces_at(&self, axis: usize, extremum: Extremum) -> Result<Vec<usize>, MeshError> {
        if axis >= self.dimension() {
            return Err(MeshError::MissingAxis {
                axis,
                dimension: self.dimension(),
            });
        }
        let centers = &self.geometry().face_centers;
        let values = centers.iter().map(|c| c[axis]);
        let target = match extremum {
            Extremum::Min => values.fold(f64::INFINITY, f64::min),
            Extremum::Max => values.fold(f64::NEG_INFINITY, f64::max),
        };
        Ok(centers
            .iter()
            .enumerate()
            .filter(|(_, c)| c[axis] == target)
            .map(|(f, _)| f)
            .collect())
    }

    /// Faces with the smallest x.
    pub fn faces_left(&self) -> Vec<usize> {
        self.planar_faces(0, Extremum::Min)
    }

    /// Faces with the largest x.
    pub fn faces_right(&self) -> Vec<usize> {
        self.planar_faces(0, Extremum::Max)
    }

    /// Faces with the smallest y.
    pub fn faces_bottom(&self) -> Vec<usize> {
        self.planar_faces(1, Extremum::Min)
    }

    /// Faces with the largest y.
    pub fn faces_top(&self) -> Vec<usize> {
        self.planar_faces(1, Extremum::Max)
    }

    /// Faces with the smallest z; 3-D meshes only.
    pub fn faces_front(&self) -> Result<Vec<usize>, MeshError> {
        self.faces_at(2, Extremum::Min)
    }

    /// Faces with the largest z; 3-D meshes only.
    pub fn faces_back(&self) -> Result<Vec<usize>, MeshError> {
        self.faces_at(2, Extremum::Max)
    }

    // x and y exist on every supported mesh
    fn planar_faces(&self, axis: usize, extremum: Extremum) -> Vec<usize> {
        self.faces_at(axis, extremum).unwrap_or_default()
    }

    /// The cell whose (scaled) centre is closest to `point`; ties go to the
    /// lowest cell ID.
    pub fn nearest_cell_id(&self, point: &[f64]) -> Result<usize, MeshError> {
        let p = self.query_point(point)?;
        let mut best = (0, f64::INFINITY);
        for (cell, &c) in self.cell_centers().iter().enumerate() {
            let d = distance_squared(c, p);
            if d < best.1 {
                best = (cell, d);
            }
        }
        Ok(best.0)
    }

    /// [`Self::nearest_cell_id`] for each point independently.
    pub fn nearest_cell_ids<P>(&self, points: &[P]) -> Result<Vec<usize>, MeshError>
    where
        P: AsRef<[f64]> + Sync,
    {
        try_map_indices(points.len(), |i| self.nearest_cell_id(points[i].as_ref()))
    }

    fn query_point(&self, point: &[f64]) -> Result<[f64; 3], MeshError> {
        let dim = self.dimension();
        if point.len() != dim {
            return Err(MeshError::DimensionMismatch {
                expected: dim,
                found: point.len(),
            });
        }
        let mut p = [0.0; 3];
        p[..dim].copy_from_slice(point);
        Ok(p)
    }
}
