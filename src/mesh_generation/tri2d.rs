//! Triangulated rectangular grid.
//!
//! Each `dx × dy` box of an `nx × ny` grid is split along both diagonals into
//! four triangles. Numbering:
//! - vertices: box corners row by row, then box centres row by row;
//! - faces: horizontal edges, vertical edges, then the lower-left,
//!   lower-right, upper-left and upper-right diagonals (one per box each);
//! - cells: the triangles right of, above, left of, then below each box
//!   centre, each group box by box.
//!
//! The face IDs of every cell are stored in ascending order.

use serde::{Deserialize, Serialize};

use crate::data::coordinates::Coordinates;
use crate::data::padded::PaddedIds;
use crate::mesh::{Mesh, RawMesh, assemble};
use crate::mesh_error::MeshError;
use crate::mesh_generation::{check_count, check_spacing, lattice_edges};

/// Constructor parameters of a [`Tri2D`] mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tri2DParams {
    pub dx: f64,
    pub dy: f64,
    pub nx: usize,
    pub ny: usize,
}

impl Default for Tri2DParams {
    fn default() -> Self {
        Self {
            dx: 1.0,
            dy: 1.0,
            nx: 1,
            ny: 1,
        }
    }
}

impl Tri2DParams {
    pub fn validate(&self) -> Result<(), MeshError> {
        check_count('x', self.nx)?;
        check_count('y', self.ny)?;
        check_spacing('x', self.dx)?;
        check_spacing('y', self.dy)
    }

    fn num_horizontal_faces(&self) -> usize {
        self.nx * (self.ny + 1)
    }

    fn num_vertical_faces(&self) -> usize {
        self.ny * (self.nx + 1)
    }

    fn num_boxes(&self) -> usize {
        self.nx * self.ny
    }
}

/// A mesh of `4 · nx · ny` triangles. Rebuilt from its [`Tri2DParams`] when
/// deserialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "Tri2DParams", try_from = "Tri2DParams")]
pub struct Tri2D {
    params: Tri2DParams,
    mesh: Mesh,
}

super::impl_mesh_providers!(Tri2D);

impl Tri2D {
    pub fn new(dx: f64, dy: f64, nx: usize, ny: usize) -> Result<Self, MeshError> {
        Self::from_params(Tri2DParams { dx, dy, nx, ny })
    }

    pub fn from_params(params: Tri2DParams) -> Result<Self, MeshError> {
        params.validate()?;
        let raw = RawMesh::new(vertices(&params)?, faces(&params), cells(&params));
        log::trace!(
            "Tri2D {}x{} boxes: {} vertices, {} faces, {} cells",
            params.nx,
            params.ny,
            raw.vertex_coords.len(),
            raw.face_vertex_ids.rows(),
            raw.cell_face_ids.rows()
        );
        let mesh = assemble(&raw)?;
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> Tri2DParams {
        self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    /// Number of boxes along x and y.
    pub fn shape(&self) -> (usize, usize) {
        (self.params.nx, self.params.ny)
    }

    /// Extent of the domain in physical units.
    pub fn physical_shape(&self) -> [f64; 2] {
        let l = self.mesh.scale().length;
        [
            self.params.nx as f64 * self.params.dx * l,
            self.params.ny as f64 * self.params.dy * l,
        ]
    }

    /// Box size in raw units.
    pub fn mesh_spacing(&self) -> [f64; 2] {
        [self.params.dx, self.params.dy]
    }

    /// Vertical edges on `x = 0`.
    pub fn faces_left(&self) -> Vec<usize> {
        let p = &self.params;
        (0..p.ny)
            .map(|j| p.num_horizontal_faces() + j * (p.nx + 1))
            .collect()
    }

    /// Vertical edges on `x = nx · dx`.
    pub fn faces_right(&self) -> Vec<usize> {
        let p = &self.params;
        (0..p.ny)
            .map(|j| p.num_horizontal_faces() + j * (p.nx + 1) + p.nx)
            .collect()
    }

    /// Horizontal edges on `y = ny · dy`.
    pub fn faces_top(&self) -> Vec<usize> {
        let h = self.params.num_horizontal_faces();
        (h - self.params.nx..h).collect()
    }

    /// Horizontal edges on `y = 0`.
    pub fn faces_bottom(&self) -> Vec<usize> {
        (0..self.params.nx).collect()
    }
}

impl From<Tri2D> for Tri2DParams {
    fn from(mesh: Tri2D) -> Self {
        mesh.params
    }
}

impl TryFrom<Tri2DParams> for Tri2D {
    type Error = MeshError;

    fn try_from(params: Tri2DParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}

fn vertices(p: &Tri2DParams) -> Result<Coordinates, MeshError> {
    let mut points = Vec::with_capacity((p.nx + 1) * (p.ny + 1) + p.num_boxes());
    for j in 0..=p.ny {
        for i in 0..=p.nx {
            points.push([i as f64 * p.dx, j as f64 * p.dy, 0.0]);
        }
    }
    for j in 0..p.ny {
        for i in 0..p.nx {
            points.push([(i as f64 + 0.5) * p.dx, (j as f64 + 0.5) * p.dy, 0.0]);
        }
    }
    Coordinates::from_points(2, points)
}

fn faces(p: &Tri2DParams) -> PaddedIds {
    let stride = p.nx + 1;
    let first_center = stride * (p.ny + 1);
    let mut faces = lattice_edges(p.nx, p.ny);
    let corners = |b: usize| {
        let (i, j) = (b % p.nx, b / p.nx);
        let ll = j * stride + i;
        (ll, ll + 1, ll + stride, ll + stride + 1)
    };
    let boxes = 0..p.num_boxes();
    faces.extend(boxes.clone().map(|b| [first_center + b, corners(b).0]));
    faces.extend(boxes.clone().map(|b| [corners(b).1, first_center + b]));
    faces.extend(boxes.clone().map(|b| [first_center + b, corners(b).2]));
    faces.extend(boxes.map(|b| [first_center + b, corners(b).3]));
    PaddedIds::from_rows(&faces)
}

fn cells(p: &Tri2DParams) -> PaddedIds {
    let nb = p.num_boxes();
    let h = p.num_horizontal_faces();
    let lower_left = h + p.num_vertical_faces();
    let lower_right = lower_left + nb;
    let upper_left = lower_right + nb;
    let upper_right = upper_left + nb;

    let mut right = Vec::with_capacity(nb);
    let mut top = Vec::with_capacity(nb);
    let mut left = Vec::with_capacity(nb);
    let mut bottom = Vec::with_capacity(nb);
    for j in 0..p.ny {
        for i in 0..p.nx {
            let b = j * p.nx + i;
            let west = h + j * (p.nx + 1) + i;
            right.push([west + 1, upper_right + b, lower_right + b]);
            top.push([b + p.nx, upper_left + b, upper_right + b]);
            left.push([west, lower_left + b, upper_left + b]);
            bottom.push([b, lower_right + b, lower_left + b]);
        }
    }
    let rows: Vec<[usize; 3]> = right
        .into_iter()
        .chain(top)
        .chain(left)
        .chain(bottom)
        .collect();
    let mut cells = PaddedIds::from_rows(&rows);
    cells.sort_rows();
    cells
}
