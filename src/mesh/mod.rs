//! The finite-volume mesh.
//!
//! A [`Mesh`] is assembled once from three raw arrays (vertex coordinates,
//! face→vertex IDs and cell→face IDs). Assembly validates the arrays, derives
//! the [`Topology`], computes the raw [`Geometry`] and applies the identity
//! [`Scale`]. The result is immutable apart from [`Mesh::set_scale`], which
//! only rebuilds the scaled views.
//!
//! Anything that can hand out the three arrays can be assembled: implement
//! [`TopologyProvider`] and [`GeometryProvider`] and call [`assemble`].

pub mod algebra;
pub mod query;
pub mod scale;

pub use algebra::AlignmentOptions;
pub use query::Extremum;
pub use scale::{Scale, ScaledGeometry};

use serde::{Deserialize, Serialize};

use crate::data::coordinates::Coordinates;
use crate::data::padded::{PaddedArray, PaddedIds};
use crate::debug_invariants::{DebugInvariants, INVARIANT_TOLERANCE, ensure};
use crate::geometry::vector::norm;
use crate::geometry::{Geometry, compute_geometry};
use crate::mesh_error::MeshError;
use crate::topology::{FaceCells, Orientation, Topology, build_topology};

/// Source of mesh connectivity.
pub trait TopologyProvider {
    /// Ordered vertex IDs of every face.
    fn face_vertex_ids(&self) -> &PaddedIds;
    /// Face IDs of every cell, padded to the widest cell.
    fn cell_face_ids(&self) -> &PaddedIds;
}

/// Source of vertex positions.
pub trait GeometryProvider {
    fn vertex_coords(&self) -> &Coordinates;
}

/// Validate, derive topology, compute geometry: the one construction
/// pipeline shared by every mesh source.
pub fn assemble<P>(provider: &P) -> Result<Mesh, MeshError>
where
    P: TopologyProvider + GeometryProvider + ?Sized,
{
    Mesh::from_raw(RawMesh {
        vertex_coords: provider.vertex_coords().clone(),
        face_vertex_ids: provider.face_vertex_ids().clone(),
        cell_face_ids: provider.cell_face_ids().clone(),
    })
}

/// The constructor arrays of a mesh. Everything else is derived from these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawMesh {
    pub vertex_coords: Coordinates,
    pub face_vertex_ids: PaddedIds,
    pub cell_face_ids: PaddedIds,
}

impl RawMesh {
    pub fn new(vertex_coords: Coordinates, face_vertex_ids: PaddedIds, cell_face_ids: PaddedIds) -> Self {
        Self {
            vertex_coords,
            face_vertex_ids,
            cell_face_ids,
        }
    }

    /// Build from plain rows: one coordinate row per vertex, one vertex-ID
    /// row per face, one face-ID row per cell. Short rows are padded.
    pub fn from_rows<C, F, L>(
        dimension: usize,
        vertex_coords: &[C],
        face_vertex_ids: &[F],
        cell_face_ids: &[L],
    ) -> Result<Self, MeshError>
    where
        C: AsRef<[f64]>,
        F: AsRef<[usize]>,
        L: AsRef<[usize]>,
    {
        Ok(Self {
            vertex_coords: Coordinates::try_new(dimension, vertex_coords)?,
            face_vertex_ids: PaddedIds::from_rows(face_vertex_ids),
            cell_face_ids: PaddedIds::from_rows(cell_face_ids),
        })
    }

    /// Check ID ranges and entity arities.
    pub fn validate(&self) -> Result<(), MeshError> {
        let dim = self.vertex_coords.dimension();
        if !(2..=3).contains(&dim) {
            return Err(MeshError::UnsupportedDimension(dim));
        }
        let num_vertices = self.vertex_coords.len();
        let num_faces = self.face_vertex_ids.rows();

        for face in 0..num_faces {
            for (_, &vertex) in self.face_vertex_ids.valid(face) {
                if vertex >= num_vertices {
                    return Err(MeshError::DanglingVertex {
                        face,
                        vertex,
                        vertex_count: num_vertices,
                    });
                }
            }
            let found = self.face_vertex_ids.count(face);
            match dim {
                2 if found != 2 => {
                    return Err(MeshError::FaceVertexCount {
                        face,
                        expected: "expected exactly 2 in 2-D",
                        found,
                    });
                }
                3 if found < 3 => {
                    return Err(MeshError::FaceVertexCount {
                        face,
                        expected: "expected at least 3 in 3-D",
                        found,
                    });
                }
                _ => {}
            }
        }

        if self.cell_face_ids.rows() == 0 {
            return Err(MeshError::EmptyMesh);
        }
        for cell in 0..self.cell_face_ids.rows() {
            for (_, &face) in self.cell_face_ids.valid(cell) {
                if face >= num_faces {
                    return Err(MeshError::DanglingFace {
                        cell,
                        face,
                        face_count: num_faces,
                    });
                }
            }
            let found = self.cell_face_ids.count(cell);
            if found < dim + 1 {
                return Err(MeshError::CellFaceCount {
                    cell,
                    minimum: dim + 1,
                    found,
                });
            }
        }
        Ok(())
    }
}

impl TopologyProvider for RawMesh {
    fn face_vertex_ids(&self) -> &PaddedIds {
        &self.face_vertex_ids
    }

    fn cell_face_ids(&self) -> &PaddedIds {
        &self.cell_face_ids
    }
}

impl GeometryProvider for RawMesh {
    fn vertex_coords(&self) -> &Coordinates {
        &self.vertex_coords
    }
}

/// An assembled finite-volume mesh.
///
/// Geometric accessors without a `raw_` prefix return values in physical
/// units (see [`Mesh::set_scale`]); [`Mesh::geometry`] exposes the unscaled
/// values.
#[derive(Clone, Debug)]
pub struct Mesh {
    raw: RawMesh,
    topology: Topology,
    geometry: Geometry,
    scale: Scale,
    scaled: ScaledGeometry,
}

static_assertions::assert_impl_all!(Mesh: Send, Sync);

impl Mesh {
    /// Assemble a mesh from its constructor arrays.
    pub fn new(
        vertex_coords: Coordinates,
        face_vertex_ids: PaddedIds,
        cell_face_ids: PaddedIds,
    ) -> Result<Self, MeshError> {
        Self::from_raw(RawMesh::new(vertex_coords, face_vertex_ids, cell_face_ids))
    }

    /// Assemble a mesh, taking ownership of the raw arrays.
    pub fn from_raw(raw: RawMesh) -> Result<Self, MeshError> {
        raw.validate()?;
        let topology = build_topology(raw.face_vertex_ids.rows(), &raw.cell_face_ids)?;
        topology.debug_assert_invariants();
        let geometry = compute_geometry(
            &raw.vertex_coords,
            &raw.face_vertex_ids,
            &raw.cell_face_ids,
            &topology,
        )?;
        let scale = Scale::default();
        let scaled = ScaledGeometry::compute(
            raw.vertex_coords.points(),
            &geometry,
            &raw.cell_face_ids,
            scale,
        );
        let mesh = Self {
            raw,
            topology,
            geometry,
            scale,
            scaled,
        };
        log::debug!(
            "assembled {}-D mesh: {} vertices, {} faces ({} exterior), {} cells",
            mesh.dimension(),
            mesh.num_vertices(),
            mesh.num_faces(),
            mesh.topology.exterior_faces().len(),
            mesh.num_cells()
        );
        mesh.debug_assert_invariants();
        Ok(mesh)
    }

    /// Set the physical length of one raw coordinate unit.
    ///
    /// Only the scaled views are recomputed.
    pub fn set_scale(&mut self, length: f64) -> Result<(), MeshError> {
        let scale = Scale::for_length(self.dimension(), length)?;
        self.scale = scale;
        self.scaled = ScaledGeometry::compute(
            self.raw.vertex_coords.points(),
            &self.geometry,
            &self.raw.cell_face_ids,
            scale,
        );
        Ok(())
    }

    /// Builder form of [`Self::set_scale`].
    pub fn with_scale(mut self, length: f64) -> Result<Self, MeshError> {
        self.set_scale(length)?;
        Ok(self)
    }

    #[inline]
    pub fn scale(&self) -> Scale {
        self.scale
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.raw.vertex_coords.dimension()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.raw.vertex_coords.len()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.topology.num_faces()
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.topology.num_cells()
    }

    /// The constructor arrays; enough to rebuild the mesh.
    #[inline]
    pub fn raw(&self) -> &RawMesh {
        &self.raw
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Unscaled geometry.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn scaled(&self) -> &ScaledGeometry {
        &self.scaled
    }

    /// Number of faces of every cell.
    pub fn number_of_faces_per_cell(&self) -> Vec<usize> {
        (0..self.num_cells())
            .map(|c| self.raw.cell_face_ids.count(c))
            .collect()
    }

    /// Width of the cell→face table.
    #[inline]
    pub fn max_faces_per_cell(&self) -> usize {
        self.raw.cell_face_ids.width()
    }

    /// Generic meshes make no orthogonality promise.
    pub fn is_orthogonal(&self) -> bool {
        false
    }

    // --- topology ---------------------------------------------------------

    pub fn face_cell_ids(&self) -> &[FaceCells] {
        self.topology.face_cells()
    }

    pub fn interior_faces(&self) -> &[usize] {
        self.topology.interior_faces()
    }

    pub fn exterior_faces(&self) -> &[usize] {
        self.topology.exterior_faces()
    }

    pub fn interior_cells(&self) -> &[usize] {
        self.topology.interior_cells()
    }

    pub fn exterior_cells(&self) -> &[usize] {
        self.topology.exterior_cells()
    }

    pub fn cell_to_face_orientations(&self) -> &PaddedArray<Orientation> {
        self.topology.cell_to_face_orientations()
    }

    pub fn cell_to_cell_ids(&self) -> &PaddedIds {
        self.topology.cell_to_cell_ids()
    }

    pub fn cell_to_cell_ids_filled(&self) -> &PaddedIds {
        self.topology.cell_to_cell_ids_filled()
    }

    // --- scaled geometry --------------------------------------------------

    pub fn vertex_coords(&self) -> &[[f64; 3]] {
        &self.scaled.vertex_coords
    }

    pub fn face_areas(&self) -> &[f64] {
        &self.scaled.face_areas
    }

    pub fn face_centers(&self) -> &[[f64; 3]] {
        &self.scaled.face_centers
    }

    pub fn cell_volumes(&self) -> &[f64] {
        &self.scaled.cell_volumes
    }

    pub fn cell_centers(&self) -> &[[f64; 3]] {
        &self.scaled.cell_centers
    }

    pub fn face_to_cell_distances(&self) -> &PaddedArray<f64> {
        &self.scaled.face_to_cell_distances
    }

    pub fn cell_distances(&self) -> &[f64] {
        &self.scaled.cell_distances
    }

    pub fn cell_to_cell_distances(&self) -> &PaddedArray<f64> {
        &self.scaled.cell_to_cell_distances
    }

    pub fn area_projections(&self) -> &[[f64; 3]] {
        &self.scaled.area_projections
    }

    pub fn face_to_cell_distance_ratio(&self) -> &[f64] {
        &self.scaled.face_to_cell_distance_ratio
    }

    pub fn face_aspect_ratios(&self) -> &[f64] {
        &self.scaled.face_aspect_ratios
    }

    pub fn cell_areas(&self) -> &PaddedArray<f64> {
        &self.scaled.cell_areas
    }

    pub fn cell_area_projections(&self) -> &PaddedArray<[f64; 3]> {
        &self.scaled.cell_area_projections
    }

    // --- dimensionless geometry -------------------------------------------

    pub fn face_normals(&self) -> &[[f64; 3]] {
        &self.geometry.face_normals
    }

    pub fn face_tangents1(&self) -> &[[f64; 3]] {
        &self.geometry.face_tangents1
    }

    pub fn face_tangents2(&self) -> &[[f64; 3]] {
        &self.geometry.face_tangents2
    }

    /// Outward face normal per (cell, face slot).
    pub fn cell_normals(&self) -> &PaddedArray<[f64; 3]> {
        &self.geometry.cell_normals
    }

    pub fn face_cell_to_cell_normals(&self) -> &[[f64; 3]] {
        &self.geometry.face_cell_to_cell_normals
    }
}

impl TopologyProvider for Mesh {
    fn face_vertex_ids(&self) -> &PaddedIds {
        &self.raw.face_vertex_ids
    }

    fn cell_face_ids(&self) -> &PaddedIds {
        &self.raw.cell_face_ids
    }
}

impl GeometryProvider for Mesh {
    fn vertex_coords(&self) -> &Coordinates {
        &self.raw.vertex_coords
    }
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "mesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        self.topology.validate_invariants()?;
        for &face in self.interior_faces() {
            ensure(self.face_cell_ids()[face].second.is_some(), || {
                format!("interior face {face} has a single cell")
            })?;
        }
        for (face, n) in self.geometry.face_normals.iter().enumerate() {
            let len = norm(*n);
            ensure((len - 1.0).abs() <= INVARIANT_TOLERANCE, || {
                format!("face {face} normal has length {len}")
            })?;
        }
        for (cell, &v) in self.geometry.cell_volumes.iter().enumerate() {
            if !(v > 0.0) {
                return Err(MeshError::NonPositiveVolume { cell, volume: v });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit square split along its diagonal into two triangles.
    fn two_triangles() -> RawMesh {
        RawMesh::from_rows(
            2,
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            &[[1, 0], [2, 1], [0, 2], [3, 2], [0, 3]],
            &[[0, 1, 2], [2, 3, 4]],
        )
        .unwrap()
    }

    #[test]
    fn assembles_two_triangles() {
        let mesh = assemble(&two_triangles()).unwrap();
        assert_eq!(mesh.dimension(), 2);
        assert_eq!((mesh.num_vertices(), mesh.num_faces(), mesh.num_cells()), (4, 5, 2));
        assert_eq!(mesh.interior_faces(), &[2]);
        for v in mesh.cell_volumes() {
            assert!((v - 0.5).abs() < 1e-12);
        }
        assert_eq!(mesh.number_of_faces_per_cell(), vec![3, 3]);
        assert_eq!(mesh.cell_to_face_orientations().get(1, 0), Some(&Orientation::Inward));
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn set_scale_rescales_views_only() {
        let mut mesh = assemble(&two_triangles()).unwrap();
        mesh.set_scale(2.0).unwrap();
        assert!((mesh.cell_volumes()[0] - 2.0).abs() < 1e-12);
        assert!((mesh.face_areas()[0] - 2.0).abs() < 1e-12);
        assert!((mesh.geometry().cell_volumes[0] - 0.5).abs() < 1e-12);
        assert!(mesh.set_scale(0.0).is_err());
        assert_eq!(mesh.scale().length, 2.0);
    }

    #[test]
    fn validation_rejects_malformed_arrays() {
        let mut raw = two_triangles();
        raw.face_vertex_ids = PaddedIds::from_rows(&[[1, 0], [2, 1], [0, 2], [3, 2], [0, 7]]);
        assert!(matches!(
            Mesh::from_raw(raw).unwrap_err(),
            MeshError::DanglingVertex { face: 4, vertex: 7, .. }
        ));

        let mut raw = two_triangles();
        raw.cell_face_ids = PaddedIds::from_rows(&[vec![0, 1, 2], vec![2, 3]]);
        assert_eq!(
            Mesh::from_raw(raw).unwrap_err(),
            MeshError::CellFaceCount {
                cell: 1,
                minimum: 3,
                found: 2
            }
        );
    }
}
