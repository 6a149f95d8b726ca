//! Structured mesh generators.
//!
//! Generators only do index bookkeeping: they lay out vertex coordinates,
//! face→vertex and cell→face arrays and hand them to [`crate::mesh::assemble`].
//! Parameters are validated before anything is allocated.
//!
//! Face vertices are ordered so that every natural normal points out of the
//! domain on the boundary and toward the higher cell ID inside it.

pub mod grid2d;
pub mod grid3d;
pub mod tri2d;

pub use grid2d::{Grid2D, Grid2DParams};
pub use grid3d::{Grid3D, Grid3DParams};
pub use tri2d::{Tri2D, Tri2DParams};

use crate::mesh_error::MeshError;

pub(crate) fn check_count(axis: char, value: usize) -> Result<(), MeshError> {
    if value == 0 {
        return Err(MeshError::InvalidCount { axis, value });
    }
    Ok(())
}

pub(crate) fn check_spacing(axis: char, value: f64) -> Result<(), MeshError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(MeshError::InvalidSpacing { axis, value });
    }
    Ok(())
}

/// Validate a list of cell widths along `axis`.
pub(crate) fn check_spacings(axis: char, spacings: &[f64]) -> Result<(), MeshError> {
    check_count(axis, spacings.len())?;
    spacings.iter().try_for_each(|&d| check_spacing(axis, d))
}

/// Node positions `0, d0, d0 + d1, ..` for cell widths `spacings`.
pub(crate) fn node_positions(spacings: &[f64]) -> Vec<f64> {
    std::iter::once(0.0)
        .chain(spacings.iter().scan(0.0, |x, &d| {
            *x += d;
            Some(*x)
        }))
        .collect()
}

/// Horizontal then vertical edges of an `nx × ny` box lattice whose corner
/// vertices are numbered row by row.
///
/// Horizontal edges run left to right except on the bottom row; vertical
/// edges run top to bottom except on the left column.
pub(crate) fn lattice_edges(nx: usize, ny: usize) -> Vec<[usize; 2]> {
    let stride = nx + 1;
    let mut faces = Vec::with_capacity(nx * (ny + 1) + stride * ny);
    for j in 0..=ny {
        for i in 0..nx {
            let v = j * stride + i;
            faces.push(if j == 0 { [v + 1, v] } else { [v, v + 1] });
        }
    }
    for v in 0..stride * ny {
        faces.push(if v % stride == 0 {
            [v, v + stride]
        } else {
            [v + stride, v]
        });
    }
    faces
}

/// Implement the mesh provider traits for a generator holding a `mesh` field.
macro_rules! impl_mesh_providers {
    ($ty:ty) => {
        impl $crate::mesh::TopologyProvider for $ty {
            fn face_vertex_ids(&self) -> &$crate::data::padded::PaddedIds {
                $crate::mesh::TopologyProvider::face_vertex_ids(&self.mesh)
            }

            fn cell_face_ids(&self) -> &$crate::data::padded::PaddedIds {
                $crate::mesh::TopologyProvider::cell_face_ids(&self.mesh)
            }
        }

        impl $crate::mesh::GeometryProvider for $ty {
            fn vertex_coords(&self) -> &$crate::data::coordinates::Coordinates {
                $crate::mesh::GeometryProvider::vertex_coords(&self.mesh)
            }
        }

        impl AsRef<$crate::mesh::Mesh> for $ty {
            fn as_ref(&self) -> &$crate::mesh::Mesh {
                &self.mesh
            }
        }
    };
}

pub(crate) use impl_mesh_providers;
