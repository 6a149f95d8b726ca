//! Mesh algebra: translation, dilation and concatenation.
//!
//! Every operation builds a new [`Mesh`] through the regular assembly
//! pipeline and never touches its operands. Results inherit the scale of the
//! left operand.
//!
//! Concatenation glues two meshes along the boundary faces they share. Only
//! vertices on exterior faces take part in the matching; two vertices
//! coincide when their squared raw distance is below
//! [`AlignmentOptions::tolerance`].

use std::ops::{Add, Mul};

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::padded::PaddedIds;
use crate::data::coordinates::Coordinates;
use crate::geometry::vector::{distance_squared, dot};
use crate::mesh::{Mesh, RawMesh};
use crate::mesh_error::{AdditionFailure, MeshError};

/// Options controlling how two meshes are glued together.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentOptions {
    /// Squared-distance threshold below which two vertices are the same.
    pub tolerance: f64,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        Self { tolerance: 1e-15 }
    }
}

impl Mesh {
    /// Shift every vertex by `offset` (one component per dimension).
    pub fn translate(&self, offset: &[f64]) -> Result<Mesh, MeshError> {
        let coords = self.raw().vertex_coords.translate(offset)?;
        self.with_coordinates(coords)
    }

    /// Scale every vertex by `factor` along all axes.
    pub fn dilate(&self, factor: f64) -> Result<Mesh, MeshError> {
        let factors = vec![factor; self.dimension()];
        self.dilate_by(&factors)
    }

    /// Scale every vertex component-wise by `factors`.
    ///
    /// An odd number of negative factors mirrors every cell, which inverts
    /// it; assembly then fails with [`MeshError::NonPositiveVolume`].
    pub fn dilate_by(&self, factors: &[f64]) -> Result<Mesh, MeshError> {
        let coords = self.raw().vertex_coords.dilate(factors)?;
        self.with_coordinates(coords)
    }

    /// Glue `other` onto this mesh with the default [`AlignmentOptions`].
    pub fn concatenate(&self, other: &Mesh) -> Result<Mesh, MeshError> {
        self.concatenate_with(other, AlignmentOptions::default())
    }

    /// Glue `other` onto this mesh.
    ///
    /// The exterior faces spanned only by coincident vertices must be the
    /// same on both sides. Coincident vertices are shared, and so is every
    /// such face whose two cells lie on opposite sides of it; everything else
    /// of `other` is appended after the entities of `self`. Overlapping cells
    /// are not merged.
    pub fn concatenate_with(
        &self,
        other: &Mesh,
        options: AlignmentOptions,
    ) -> Result<Mesh, MeshError> {
        if self.dimension() != other.dimension() {
            return Err(AdditionFailure::DimensionsDoNotMatch.into());
        }
        let left_points = self.raw().vertex_coords.points();
        let right_points = other.raw().vertex_coords.points();

        let vertex_map: HashMap<usize, usize> = correlate(
            &tagged(exterior_vertices(self), left_points),
            &tagged(exterior_vertices(other), right_points),
            options.tolerance,
        )
        .into_iter()
        .collect();
        if vertex_map.is_empty() {
            return Err(AdditionFailure::VerticesNotAligned.into());
        }
        let shared: HashSet<usize> = vertex_map.values().copied().collect();

        let left_faces = boundary_faces(self, |v| shared.contains(&v).then_some(v));
        let right_faces = boundary_faces(other, |v| vertex_map.get(&v).copied());
        if left_faces.is_empty()
            || left_faces.len() != right_faces.len()
            || !right_faces.keys().all(|k| left_faces.contains_key(k))
        {
            return Err(AdditionFailure::FacesNotAligned.into());
        }
        // exterior normals point out of their only cell, so a shared face
        // needs opposed normals; otherwise the operands overlap there
        let left_normals = &self.geometry().face_normals;
        let right_normals = &other.geometry().face_normals;
        let face_map: HashMap<usize, usize> = right_faces
            .iter()
            .map(|(key, &right)| (right, left_faces[key]))
            .filter(|&(right, left)| dot(left_normals[left], right_normals[right]) < 0.0)
            .collect();

        let mut coords = self.raw().vertex_coords.clone();
        let (new_vertex, appended) =
            renumber(other.num_vertices(), self.num_vertices(), &vertex_map);
        coords.extend_from(appended.iter().map(|&v| right_points[v]));

        let left_fv = &self.raw().face_vertex_ids;
        let right_fv = &other.raw().face_vertex_ids;
        let (new_face, appended_faces) = renumber(other.num_faces(), self.num_faces(), &face_map);
        let face_rows: Vec<Vec<usize>> = (0..self.num_faces())
            .map(|f| left_fv.row_values(f))
            .chain(appended_faces.iter().map(|&f| {
                right_fv
                    .valid(f)
                    .map(|(_, &v)| new_vertex[v])
                    .collect()
            }))
            .collect();

        let left_cf = &self.raw().cell_face_ids;
        let right_cf = &other.raw().cell_face_ids;
        let cell_rows: Vec<Vec<usize>> = (0..self.num_cells())
            .map(|c| left_cf.row_values(c))
            .chain((0..other.num_cells()).map(|c| {
                right_cf
                    .valid(c)
                    .map(|(_, &f)| new_face[f])
                    .collect()
            }))
            .collect();

        let overlapping = correlate(
            &tagged(0..self.num_cells(), &self.geometry().cell_centers),
            &tagged(0..other.num_cells(), &other.geometry().cell_centers),
            options.tolerance,
        );
        if !overlapping.is_empty() {
            log::warn!(
                "concatenated meshes overlap: {} cells of the right operand coincide with existing cells",
                overlapping.len()
            );
        }
        log::trace!(
            "concatenation shares {} vertices and {} of {} matched faces",
            vertex_map.len(),
            face_map.len(),
            right_faces.len()
        );

        let raw = RawMesh::new(
            coords,
            PaddedIds::from_rows(&face_rows),
            PaddedIds::from_rows(&cell_rows),
        );
        Mesh::from_raw(raw)?.with_scale(self.scale().length)
    }

    fn with_coordinates(&self, coords: Coordinates) -> Result<Mesh, MeshError> {
        let raw = RawMesh::new(
            coords,
            self.raw().face_vertex_ids.clone(),
            self.raw().cell_face_ids.clone(),
        );
        Mesh::from_raw(raw)?.with_scale(self.scale().length)
    }
}

/// Vertices of exterior faces, ascending.
fn exterior_vertices(mesh: &Mesh) -> Vec<usize> {
    let fv = &mesh.raw().face_vertex_ids;
    mesh.exterior_faces()
        .iter()
        .flat_map(|&f| fv.valid(f).map(|(_, &v)| v))
        .sorted_unstable()
        .dedup()
        .collect()
}

fn tagged<I>(ids: I, points: &[[f64; 3]]) -> Vec<(usize, [f64; 3])>
where
    I: IntoIterator<Item = usize>,
{
    ids.into_iter().map(|i| (i, points[i])).collect()
}

/// Exterior faces all of whose vertices map through `lookup`, keyed by the
/// sorted mapped vertex IDs.
fn boundary_faces(
    mesh: &Mesh,
    lookup: impl Fn(usize) -> Option<usize>,
) -> HashMap<Vec<usize>, usize> {
    let fv = &mesh.raw().face_vertex_ids;
    mesh.exterior_faces()
        .iter()
        .filter_map(|&f| {
            let key: Option<Vec<usize>> = fv.valid(f).map(|(_, &v)| lookup(v)).collect();
            key.map(|mut key| {
                key.sort_unstable();
                (key, f)
            })
        })
        .collect()
}

/// Pair every right point with the closest left point strictly within
/// `tolerance` (squared distance), lowest left ID on ties.
fn correlate(
    left: &[(usize, [f64; 3])],
    right: &[(usize, [f64; 3])],
    tolerance: f64,
) -> Vec<(usize, usize)> {
    let mut sorted = left.to_vec();
    sorted.sort_by(|a, b| a.1[0].total_cmp(&b.1[0]).then(a.0.cmp(&b.0)));
    let reach = tolerance.max(0.0).sqrt();
    right
        .iter()
        .filter_map(|&(r, p)| {
            let start = sorted.partition_point(|(_, q)| q[0] < p[0] - reach);
            sorted[start..]
                .iter()
                .take_while(|(_, q)| q[0] <= p[0] + reach)
                .map(|&(l, q)| (l, distance_squared(q, p)))
                .filter(|&(_, d)| d < tolerance)
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
                .map(|(l, _)| (r, l))
        })
        .collect()
}

/// New IDs for `count` right-hand entities: shared ones take their mapped ID,
/// the rest are numbered from `offset` in order. Also returns the appended
/// entities.
fn renumber(
    count: usize,
    offset: usize,
    shared: &HashMap<usize, usize>,
) -> (Vec<usize>, Vec<usize>) {
    let mut appended = Vec::new();
    let ids = (0..count)
        .map(|i| match shared.get(&i) {
            Some(&existing) => existing,
            None => {
                appended.push(i);
                offset + appended.len() - 1
            }
        })
        .collect();
    (ids, appended)
}

impl Add<&Mesh> for &Mesh {
    type Output = Result<Mesh, MeshError>;

    fn add(self, rhs: &Mesh) -> Self::Output {
        self.concatenate(rhs)
    }
}

impl Add<&[f64]> for &Mesh {
    type Output = Result<Mesh, MeshError>;

    fn add(self, rhs: &[f64]) -> Self::Output {
        self.translate(rhs)
    }
}

impl<const N: usize> Add<[f64; N]> for &Mesh {
    type Output = Result<Mesh, MeshError>;

    fn add(self, rhs: [f64; N]) -> Self::Output {
        self.translate(&rhs)
    }
}

impl Mul<f64> for &Mesh {
    type Output = Result<Mesh, MeshError>;

    fn mul(self, rhs: f64) -> Self::Output {
        self.dilate(rhs)
    }
}

impl<const N: usize> Mul<[f64; N]> for &Mesh {
    type Output = Result<Mesh, MeshError>;

    fn mul(self, rhs: [f64; N]) -> Self::Output {
        self.dilate_by(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::assemble;

    fn unit_square() -> Mesh {
        let raw = RawMesh::from_rows(
            2,
            &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
            &[[1, 0], [2, 3], [0, 2], [3, 1]],
            &[[0, 1, 2, 3]],
        )
        .unwrap();
        assemble(&raw).unwrap()
    }

    #[test]
    fn correlate_picks_closest_within_tolerance() {
        let left = [(0, [0.0, 0.0, 0.0]), (1, [1.0, 0.0, 0.0]), (2, [1.0, 1e-9, 0.0])];
        let right = [(5, [1.0, 0.0, 0.0]), (6, [3.0, 0.0, 0.0])];
        assert_eq!(correlate(&left, &right, 1e-15), vec![(5, 1)]);
        assert_eq!(correlate(&left, &right, 0.0), vec![]);
    }

    #[test]
    fn renumber_appends_unshared() {
        let shared: HashMap<usize, usize> = [(1, 0)].into_iter().collect();
        let (ids, appended) = renumber(3, 10, &shared);
        assert_eq!(ids, vec![10, 0, 11]);
        assert_eq!(appended, vec![0, 2]);
    }

    #[test]
    fn side_by_side_squares_share_one_face() {
        let a = unit_square();
        let b = (&a + [1.0, 0.0]).unwrap();
        let joined = (&a + &b).unwrap();
        assert_eq!(joined.num_cells(), 2);
        assert_eq!(joined.num_vertices(), 6);
        assert_eq!(joined.num_faces(), 7);
        assert_eq!(joined.interior_faces(), &[3]);
        assert!((joined.cell_centers()[1][0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn results_inherit_left_scale() {
        let a = unit_square().with_scale(2.0).unwrap();
        let moved = a.translate(&[3.0, 0.0]).unwrap();
        assert_eq!(moved.scale(), a.scale());
        let grown = (&a * 3.0).unwrap();
        assert!((grown.geometry().cell_volumes[0] - 9.0).abs() < 1e-12);
        assert!((grown.cell_volumes()[0] - 36.0).abs() < 1e-12);
    }
}
