//! Geometry kernels: pure functions from connectivity and vertex coordinates
//! to metric quantities.
//!
//! Conventions:
//! - A 2-D face is a segment `[v0, v1]`. Its natural normal is the tangent
//!   `v1 − v0` rotated a quarter turn counter-clockwise.
//! - A 3-D face is a polygon `[v0, v1, ..]`, fan-triangulated from `v0`. Its
//!   natural normal follows the right-hand rule over the vertex order.
//! - Per (cell, face slot) results are [`PaddedArray`]s shaped like
//!   `cellFaceIDs`; per-face two-sided results are padded arrays with one row
//!   per face and width 2 (first cell, second cell).
//!
//! Every function is total over connectivity that passed mesh validation and
//! writes nothing but its return value.

use crate::data::coordinates::Coordinates;
use crate::data::padded::{PaddedArray, PaddedIds};
use crate::geometry::vector::{
    Z_AXIS, ZERO, add, axpy, cross, dot, norm, scale, sub, unit_or_zero,
};
use crate::geometry::{map_indices, try_map_indices};
use crate::mesh_error::MeshError;
use crate::topology::{FaceCells, Orientation};

/// A cell whose volume is at most this fraction of its gross sub-volume is
/// treated as degenerate.
pub const VOLUME_RELATIVE_TOLERANCE: f64 = 1e-12;

/// Area, centre and unit normal of one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceFrame {
    pub area: f64,
    pub center: [f64; 3],
    pub normal: [f64; 3],
}

fn face_points(coords: &Coordinates, face_vertex_ids: &PaddedIds, face: usize) -> Vec<[f64; 3]> {
    let points = coords.points();
    face_vertex_ids
        .valid(face)
        .map(|(_, &v)| points[v])
        .collect()
}

/// Area, centre and natural normal of `face`.
pub fn face_frame(
    coords: &Coordinates,
    face_vertex_ids: &PaddedIds,
    face: usize,
) -> Result<FaceFrame, MeshError> {
    let pts = face_points(coords, face_vertex_ids, face);
    if coords.dimension() == 2 {
        segment_frame(face, &pts)
    } else {
        polygon_frame(face, &pts)
    }
}

fn segment_frame(face: usize, pts: &[[f64; 3]]) -> Result<FaceFrame, MeshError> {
    let (a, b) = match pts {
        [a, b] => (*a, *b),
        _ => {
            return Err(MeshError::FaceVertexCount {
                face,
                expected: "expected exactly 2 in 2-D",
                found: pts.len(),
            });
        }
    };
    let t = sub(b, a);
    let area = norm(t);
    if !(area > 0.0) {
        return Err(MeshError::DegenerateFace { face });
    }
    Ok(FaceFrame {
        area,
        center: scale(add(a, b), 0.5),
        normal: scale(cross(Z_AXIS, t), 1.0 / area),
    })
}

fn polygon_frame(face: usize, pts: &[[f64; 3]]) -> Result<FaceFrame, MeshError> {
    if pts.len() < 3 {
        return Err(MeshError::FaceVertexCount {
            face,
            expected: "expected at least 3 in 3-D",
            found: pts.len(),
        });
    }
    let origin = pts[0];
    let fan: Vec<([f64; 3], [f64; 3])> = pts[1..]
        .windows(2)
        .map(|w| {
            let twice_area = cross(sub(w[0], origin), sub(w[1], origin));
            let centroid = scale(add(origin, add(w[0], w[1])), 1.0 / 3.0);
            (scale(twice_area, 0.5), centroid)
        })
        .collect();
    let area_vector = fan.iter().fold(ZERO, |acc, (a, _)| add(acc, *a));
    let area = norm(area_vector);
    if !(area > 0.0) {
        return Err(MeshError::DegenerateFace { face });
    }
    let normal = scale(area_vector, 1.0 / area);
    // fan triangles weighted by their area projected on the face normal
    let mut center = ZERO;
    for (a, c) in &fan {
        center = axpy(center, dot(*a, normal), *c);
    }
    Ok(FaceFrame {
        area,
        center: scale(center, 1.0 / area),
        normal,
    })
}

/// Frames of every face.
pub fn face_frames(
    coords: &Coordinates,
    face_vertex_ids: &PaddedIds,
) -> Result<Vec<FaceFrame>, MeshError> {
    try_map_indices(face_vertex_ids.rows(), |f| {
        face_frame(coords, face_vertex_ids, f)
    })
}

/// Two unit tangents per face.
///
/// In 2-D the first tangent is the normal rotated a quarter turn
/// counter-clockwise and
/// the second is the zero vector. In 3-D the first points from the face's
/// first vertex to its centre and the second completes the frame.
pub fn face_tangents(
    coords: &Coordinates,
    face_vertex_ids: &PaddedIds,
    face_centers: &[[f64; 3]],
    face_normals: &[[f64; 3]],
) -> (Vec<[f64; 3]>, Vec<[f64; 3]>) {
    let points = coords.points();
    let dim = coords.dimension();
    map_indices(face_normals.len(), |f| {
        let n = face_normals[f];
        if dim == 2 {
            ([-n[1], n[0], 0.0], ZERO)
        } else {
            let first = face_vertex_ids
                .valid(f)
                .next()
                .map(|(_, &v)| points[v])
                .unwrap_or(face_centers[f]);
            let t1 = unit_or_zero(sub(face_centers[f], first));
            let t2 = unit_or_zero(cross(t1, n));
            (t1, t2)
        }
    })
    .into_iter()
    .unzip()
}

/// Per (cell, face slot) normal, flipped where needed so it points out of the
/// cell. These are the "cell normals".
pub fn oriented_face_normals(
    face_normals: &[[f64; 3]],
    cell_face_ids: &PaddedIds,
    orientations: &PaddedArray<Orientation>,
) -> PaddedArray<[f64; 3]> {
    cell_face_ids.map(|cell, slot, &f| {
        let o = orientations
            .get(cell, slot)
            .copied()
            .unwrap_or(Orientation::Outward);
        o.apply(face_normals[f])
    })
}

/// First estimate of each cell centre: the mean of its face centres.
pub fn cell_center_estimates(face_centers: &[[f64; 3]], cell_face_ids: &PaddedIds) -> Vec<[f64; 3]> {
    map_indices(cell_face_ids.rows(), |c| {
        let mut sum = ZERO;
        let mut n = 0usize;
        for (_, &f) in cell_face_ids.valid(c) {
            sum = add(sum, face_centers[f]);
            n += 1;
        }
        if n == 0 { ZERO } else { scale(sum, 1.0 / n as f64) }
    })
}

/// Signed measure of the sub-simplex between `apex` and each face of `cell`.
fn sub_volumes<'a>(
    dim: usize,
    cell: usize,
    apex: [f64; 3],
    face_areas: &'a [f64],
    face_centers: &'a [[f64; 3]],
    cell_normals: &'a PaddedArray<[f64; 3]>,
    cell_face_ids: &'a PaddedIds,
) -> impl Iterator<Item = (f64, [f64; 3])> + 'a {
    let d = dim as f64;
    cell_face_ids.valid(cell).map(move |(slot, &f)| {
        let n = cell_normals.get(cell, slot).copied().unwrap_or(ZERO);
        let lever = sub(face_centers[f], apex);
        let h = dot(n, lever) * face_areas[f] / d;
        (h, axpy(apex, d / (d + 1.0), lever))
    })
}

/// Divergence-theorem cell volumes,
/// `V = (1/D) Σ (n_out · (fc − cc)) · A`.
///
/// Fails with [`MeshError::NonPositiveVolume`] for inverted or collapsed cells.
pub fn cell_volumes(
    dim: usize,
    face_areas: &[f64],
    face_centers: &[[f64; 3]],
    cell_normals: &PaddedArray<[f64; 3]>,
    cell_centers: &[[f64; 3]],
    cell_face_ids: &PaddedIds,
) -> Result<Vec<f64>, MeshError> {
    try_map_indices(cell_face_ids.rows(), |c| {
        let (volume, gross) = sub_volumes(
            dim,
            c,
            cell_centers[c],
            face_areas,
            face_centers,
            cell_normals,
            cell_face_ids,
        )
        .fold((0.0, 0.0), |(v, g), (h, _)| (v + h, g + h.abs()));
        if !volume.is_finite() || volume <= VOLUME_RELATIVE_TOLERANCE * gross {
            return Err(MeshError::NonPositiveVolume { cell: c, volume });
        }
        Ok(volume)
    })
}

/// Volume-weighted cell centroids.
///
/// Each face and the estimated centre span a sub-simplex; the cell centroid is
/// the average of the sub-simplex centroids weighted by their signed measure.
pub fn cell_centers(
    dim: usize,
    face_areas: &[f64],
    face_centers: &[[f64; 3]],
    cell_normals: &PaddedArray<[f64; 3]>,
    estimates: &[[f64; 3]],
    cell_face_ids: &PaddedIds,
) -> Vec<[f64; 3]> {
    map_indices(cell_face_ids.rows(), |c| {
        let (volume, moment) = sub_volumes(
            dim,
            c,
            estimates[c],
            face_areas,
            face_centers,
            cell_normals,
            cell_face_ids,
        )
        .fold((0.0, ZERO), |(v, m), (h, centroid)| (v + h, axpy(m, h, centroid)));
        if volume > 0.0 {
            scale(moment, 1.0 / volume)
        } else {
            estimates[c]
        }
    })
}

/// Per face, the vector from each adjacent cell centre to the face centre
/// (width 2, second slot absent on the boundary).
pub fn cell_to_face_distance_vectors(
    face_centers: &[[f64; 3]],
    face_cells: &[FaceCells],
    cell_centers: &[[f64; 3]],
) -> PaddedArray<[f64; 3]> {
    let rows: Vec<Vec<usize>> = face_cells.iter().map(|cells| cells.cells().collect()).collect();
    PaddedIds::from_rows_with_width(&rows, 2)
        .map(|face, _, &cell| sub(face_centers[face], cell_centers[cell]))
}

/// Per face, distance from each adjacent cell centre to the face centre.
pub fn face_to_cell_distances(vectors: &PaddedArray<[f64; 3]>) -> PaddedArray<f64> {
    vectors.map(|_, _, &v| norm(v))
}

/// Per face, the vector between the two adjacent cell centres (first to
/// second), or from the single cell centre to the face centre on the boundary.
pub fn cell_distance_vectors(
    face_centers: &[[f64; 3]],
    face_cells: &[FaceCells],
    cell_centers: &[[f64; 3]],
) -> Vec<[f64; 3]> {
    face_cells
        .iter()
        .zip(face_centers)
        .map(|(cells, &fc)| {
            let far = cells.second.map(|c| cell_centers[c]).unwrap_or(fc);
            sub(far, cell_centers[cells.first])
        })
        .collect()
}

/// Per face, length of [`cell_distance_vectors`].
pub fn cell_distances(cell_distance_vectors: &[[f64; 3]]) -> Vec<f64> {
    cell_distance_vectors.iter().map(|&v| norm(v)).collect()
}

/// Per face, the unit vector joining the adjacent cell centres, signed to
/// agree with the face normal.
pub fn face_cell_to_cell_normals(
    cell_distance_vectors: &[[f64; 3]],
    face_normals: &[[f64; 3]],
) -> Vec<[f64; 3]> {
    cell_distance_vectors
        .iter()
        .zip(face_normals)
        .map(|(&d, &n)| {
            let u = unit_or_zero(d);
            if dot(u, n) < 0.0 { scale(u, -1.0) } else { u }
        })
        .collect()
}

/// Per (cell, face slot), the cell distance across that face.
pub fn cell_to_cell_distances(cell_distances: &[f64], cell_face_ids: &PaddedIds) -> PaddedArray<f64> {
    cell_face_ids.map(|_, _, &f| cell_distances[f])
}
