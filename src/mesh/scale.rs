//! Length/area/volume scaling of raw mesh geometry.
//!
//! Raw geometry is computed once from the vertex coordinates. A [`Scale`]
//! turns it into physical units: lengths are multiplied by `length`, face
//! measures by `length^(D-1)` and cell measures by `length^D`. Changing the
//! scale only rebuilds the [`ScaledGeometry`] views.

use serde::{Deserialize, Serialize};

use crate::data::padded::{PaddedArray, PaddedIds};
use crate::geometry::Geometry;
use crate::geometry::vector::scale as scale_vec;
use crate::mesh_error::MeshError;

/// Scale factors of a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub length: f64,
    pub area: f64,
    pub volume: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            length: 1.0,
            area: 1.0,
            volume: 1.0,
        }
    }
}

impl Scale {
    /// Factors for a `dimension`-D mesh whose unit length is `length`.
    pub fn for_length(dimension: usize, length: f64) -> Result<Self, MeshError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(MeshError::InvalidScale(length));
        }
        let d = dimension as i32;
        Ok(Self {
            length,
            area: length.powi(d - 1),
            volume: length.powi(d),
        })
    }
}

/// Geometry in physical units.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledGeometry {
    pub vertex_coords: Vec<[f64; 3]>,
    pub face_areas: Vec<f64>,
    pub face_centers: Vec<[f64; 3]>,
    pub cell_volumes: Vec<f64>,
    pub cell_centers: Vec<[f64; 3]>,
    pub face_to_cell_distances: PaddedArray<f64>,
    pub cell_distances: Vec<f64>,
    pub cell_to_cell_distances: PaddedArray<f64>,
    /// Face normal times face area.
    pub area_projections: Vec<[f64; 3]>,
    /// Distance from the first cell to the face over the cell distance.
    pub face_to_cell_distance_ratio: Vec<f64>,
    /// Face area over cell distance.
    pub face_aspect_ratios: Vec<f64>,
    /// Face area per (cell, face slot).
    pub cell_areas: PaddedArray<f64>,
    /// Outward normal times face area per (cell, face slot).
    pub cell_area_projections: PaddedArray<[f64; 3]>,
}

impl ScaledGeometry {
    pub fn compute(
        vertex_coords: &[[f64; 3]],
        geometry: &Geometry,
        cell_face_ids: &PaddedIds,
        scale: Scale,
    ) -> Self {
        let lengths = |v: &[f64]| v.iter().map(|x| x * scale.length).collect::<Vec<_>>();
        let points = |v: &[[f64; 3]]| {
            v.iter()
                .map(|&p| scale_vec(p, scale.length))
                .collect::<Vec<_>>()
        };

        let face_areas: Vec<f64> = geometry.face_areas.iter().map(|a| a * scale.area).collect();
        let cell_distances = lengths(&geometry.cell_distances[..]);
        let area_projections = geometry
            .face_normals
            .iter()
            .zip(&face_areas)
            .map(|(&n, &a)| scale_vec(n, a))
            .collect();
        let face_to_cell_distance_ratio = (0..geometry.cell_distances.len())
            .map(|f| {
                let first = geometry
                    .face_to_cell_distances
                    .get(f, 0)
                    .copied()
                    .unwrap_or(0.0);
                ratio(first, geometry.cell_distances[f])
            })
            .collect();
        let face_aspect_ratios = face_areas
            .iter()
            .zip(&cell_distances)
            .map(|(&a, &d)| ratio(a, d))
            .collect();
        let cell_areas = cell_face_ids.map(|_, _, &f| face_areas[f]);
        let cell_area_projections = geometry
            .cell_normals
            .map(|c, s, &n| scale_vec(n, cell_areas.get(c, s).copied().unwrap_or(0.0)));

        Self {
            vertex_coords: points(vertex_coords),
            face_centers: points(&geometry.face_centers[..]),
            cell_volumes: geometry
                .cell_volumes
                .iter()
                .map(|v| v * scale.volume)
                .collect(),
            cell_centers: points(&geometry.cell_centers[..]),
            face_to_cell_distances: geometry
                .face_to_cell_distances
                .map(|_, _, &d| d * scale.length),
            cell_to_cell_distances: geometry
                .cell_to_cell_distances
                .map(|_, _, &d| d * scale.length),
            face_areas,
            cell_distances,
            area_projections,
            face_to_cell_distance_ratio,
            face_aspect_ratios,
            cell_areas,
            cell_area_projections,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
