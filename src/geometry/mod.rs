//! Raw (unscaled) mesh geometry.
//!
//! [`compute_geometry`] runs the kernels in [`metrics`] in a fixed order:
//! face frames, cell centre estimates, outward cell normals, volumes, weighted
//! cell centres, then distances and tangents. With the `rayon` feature the
//! per-face and per-cell loops run in parallel; results do not depend on it.

pub mod metrics;
pub(crate) mod vector;

use crate::data::coordinates::Coordinates;
use crate::data::padded::{PaddedArray, PaddedIds};
use crate::mesh_error::MeshError;
use crate::topology::Topology;

/// Every geometric quantity of a mesh, in raw coordinate units.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub face_areas: Vec<f64>,
    pub face_centers: Vec<[f64; 3]>,
    pub face_normals: Vec<[f64; 3]>,
    pub face_tangents1: Vec<[f64; 3]>,
    pub face_tangents2: Vec<[f64; 3]>,
    pub cell_volumes: Vec<f64>,
    pub cell_centers: Vec<[f64; 3]>,
    /// Outward normal per (cell, face slot).
    pub cell_normals: PaddedArray<[f64; 3]>,
    /// Per face, cell centre → face centre for the first and second cell.
    pub cell_to_face_distance_vectors: PaddedArray<[f64; 3]>,
    pub face_to_cell_distances: PaddedArray<f64>,
    pub cell_distance_vectors: Vec<[f64; 3]>,
    pub cell_distances: Vec<f64>,
    pub cell_to_cell_distances: PaddedArray<f64>,
    pub face_cell_to_cell_normals: Vec<[f64; 3]>,
}

/// Compute the raw geometry of a validated mesh.
pub fn compute_geometry(
    coords: &Coordinates,
    face_vertex_ids: &PaddedIds,
    cell_face_ids: &PaddedIds,
    topology: &Topology,
) -> Result<Geometry, MeshError> {
    let dim = coords.dimension();
    let frames = metrics::face_frames(coords, face_vertex_ids)?;
    let face_areas: Vec<f64> = frames.iter().map(|f| f.area).collect();
    let face_centers: Vec<[f64; 3]> = frames.iter().map(|f| f.center).collect();
    let face_normals: Vec<[f64; 3]> = frames.iter().map(|f| f.normal).collect();

    let cell_normals = metrics::oriented_face_normals(
        &face_normals,
        cell_face_ids,
        topology.cell_to_face_orientations(),
    );
    let estimates = metrics::cell_center_estimates(&face_centers, cell_face_ids);
    let cell_volumes = metrics::cell_volumes(
        dim,
        &face_areas,
        &face_centers,
        &cell_normals,
        &estimates,
        cell_face_ids,
    )?;
    let cell_centers = metrics::cell_centers(
        dim,
        &face_areas,
        &face_centers,
        &cell_normals,
        &estimates,
        cell_face_ids,
    );

    let face_cells = topology.face_cells();
    let cell_to_face_distance_vectors =
        metrics::cell_to_face_distance_vectors(&face_centers, face_cells, &cell_centers);
    let face_to_cell_distances = metrics::face_to_cell_distances(&cell_to_face_distance_vectors);
    let cell_distance_vectors =
        metrics::cell_distance_vectors(&face_centers, face_cells, &cell_centers);
    let cell_distances = metrics::cell_distances(&cell_distance_vectors);
    let cell_to_cell_distances = metrics::cell_to_cell_distances(&cell_distances, cell_face_ids);
    let face_cell_to_cell_normals =
        metrics::face_cell_to_cell_normals(&cell_distance_vectors, &face_normals);
    let (face_tangents1, face_tangents2) =
        metrics::face_tangents(coords, face_vertex_ids, &face_centers, &face_normals);

    Ok(Geometry {
        face_areas,
        face_centers,
        face_normals,
        face_tangents1,
        face_tangents2,
        cell_volumes,
        cell_centers,
        cell_normals,
        cell_to_face_distance_vectors,
        face_to_cell_distances,
        cell_distance_vectors,
        cell_distances,
        cell_to_cell_distances,
        face_cell_to_cell_normals,
    })
}

/// `(0..n).map(f)`, in parallel with the `rayon` feature.
pub(crate) fn map_indices<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        (0..n).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        (0..n).map(f).collect()
    }
}

/// Fallible [`map_indices`]; the error reported is always the one with the
/// lowest index.
pub(crate) fn try_map_indices<T, E, F>(n: usize, f: F) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    F: Fn(usize) -> Result<T, E> + Sync + Send,
{
    map_indices(n, f).into_iter().collect()
}
