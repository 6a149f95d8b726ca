#![cfg_attr(docsrs, feature(doc_cfg))]
//! # fv-mesh
//!
//! fv-mesh is the mesh topology and geometry core of a finite-volume PDE
//! library. It turns raw connectivity (vertex coordinates, face→vertex IDs,
//! cell→face IDs) into the quantities a finite-volume discretization needs:
//! face areas, normals and tangents, cell volumes and centroids, and the
//! distances between neighbouring cells.
//!
//! ## Features
//! - Flat, padded ID tables for ragged connectivity ([`data::PaddedArray`])
//! - Topology derivation: face→cell adjacency, interior/exterior sets,
//!   orientation signs, cell→cell adjacency
//! - Geometry kernels for 2-D (segment faces) and 3-D (polygon faces) meshes
//! - Length scaling, translation, dilation and concatenation of meshes
//! - Generators for triangulated and rectilinear 2-D grids and 3-D grids
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! fv-mesh = "0.1"
//! # Optional features:
//! # features = ["rayon", "check-invariants"]
//! ```
//!
//! ```
//! use fv_mesh::prelude::*;
//!
//! let tri = Tri2D::new(0.5, 2.0, 3, 2)?;
//! let mesh = tri.mesh();
//! assert_eq!(mesh.num_cells(), 24);
//! assert!(mesh.cell_volumes().iter().all(|v| (v - 0.25).abs() < 1e-10));
//! # Ok::<(), fv_mesh::mesh_error::MeshError>(())
//! ```
//!
//! ## Determinism
//!
//! Every kernel produces the same result with or without the `rayon` feature;
//! parallel loops only write their own output slot and errors are reported
//! for the lowest failing index.

pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::coordinates::Coordinates;
    pub use crate::data::padded::{PaddedArray, PaddedIds};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh::{
        AlignmentOptions, Extremum, GeometryProvider, Mesh, RawMesh, Scale, TopologyProvider,
        assemble,
    };
    pub use crate::mesh_error::{AdditionFailure, MeshError, MeshErrorKind};
    pub use crate::mesh_generation::{Grid2D, Grid2DParams, Grid3D, Grid3DParams, Tri2D, Tri2DParams};
    pub use crate::topology::{FaceCells, Orientation, Topology};
}
