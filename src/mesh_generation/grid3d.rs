//! Uniform 3-D grid of hexahedra.

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::data::coordinates::Coordinates;
use crate::data::padded::PaddedIds;
use crate::mesh::{Mesh, RawMesh, assemble};
use crate::mesh_error::MeshError;
use crate::mesh_generation::{check_count, check_spacing};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid3DParams {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Grid3DParams {
    pub fn validate(&self) -> Result<(), MeshError> {
        check_count('x', self.nx)?;
        check_count('y', self.ny)?;
        check_count('z', self.nz)?;
        check_spacing('x', self.dx)?;
        check_spacing('y', self.dy)?;
        check_spacing('z', self.dz)
    }
}

/// Face numbering of an `nx × ny × nz` grid: faces normal to z, then y,
/// then x, each block ordered x fastest.
#[derive(Clone, Copy, Debug)]
struct Layout {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl Layout {
    fn vertex(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * (self.nx + 1) + k * (self.nx + 1) * (self.ny + 1)
    }

    fn xy_face(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.nx + k * self.nx * self.ny
    }

    fn xz_face(&self, i: usize, j: usize, k: usize) -> usize {
        self.nx * self.ny * (self.nz + 1) + i + j * self.nx + k * self.nx * (self.ny + 1)
    }

    fn yz_face(&self, i: usize, j: usize, k: usize) -> usize {
        self.nx * self.ny * (self.nz + 1)
            + self.nx * (self.ny + 1) * self.nz
            + i
            + j * (self.nx + 1)
            + k * (self.nx + 1) * self.ny
    }
}

/// Grid of `nx × ny × nz` cells; each cell lists its faces as
/// (left, right, bottom, top, front, back).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "Grid3DParams", try_from = "Grid3DParams")]
pub struct Grid3D {
    params: Grid3DParams,
    mesh: Mesh,
}

super::impl_mesh_providers!(Grid3D);

impl Grid3D {
    pub fn new(
        dx: f64,
        dy: f64,
        dz: f64,
        nx: usize,
        ny: usize,
        nz: usize,
    ) -> Result<Self, MeshError> {
        Self::from_params(Grid3DParams {
            dx,
            dy,
            dz,
            nx,
            ny,
            nz,
        })
    }

    pub fn from_params(params: Grid3DParams) -> Result<Self, MeshError> {
        params.validate()?;
        let g = Layout {
            nx: params.nx,
            ny: params.ny,
            nz: params.nz,
        };
        let (nx, ny, nz) = (g.nx, g.ny, g.nz);

        let points: Vec<[f64; 3]> = iproduct!(0..=nz, 0..=ny, 0..=nx)
            .map(|(k, j, i)| {
                [
                    i as f64 * params.dx,
                    j as f64 * params.dy,
                    k as f64 * params.dz,
                ]
            })
            .collect();

        let mut faces: Vec<[usize; 4]> = Vec::new();
        for (k, j, i) in iproduct!(0..=nz, 0..ny, 0..nx) {
            let v = g.vertex(i, j, k);
            let (a, b, c, d) = (v, g.vertex(i + 1, j, k), g.vertex(i + 1, j + 1, k), g.vertex(i, j + 1, k));
            faces.push(if k == 0 { [a, d, c, b] } else { [a, b, c, d] });
        }
        for (k, j, i) in iproduct!(0..nz, 0..=ny, 0..nx) {
            let (a, b, c, d) = (
                g.vertex(i, j, k),
                g.vertex(i, j, k + 1),
                g.vertex(i + 1, j, k + 1),
                g.vertex(i + 1, j, k),
            );
            faces.push(if j == 0 { [a, d, c, b] } else { [a, b, c, d] });
        }
        for (k, j, i) in iproduct!(0..nz, 0..ny, 0..=nx) {
            let (a, b, c, d) = (
                g.vertex(i, j, k),
                g.vertex(i, j + 1, k),
                g.vertex(i, j + 1, k + 1),
                g.vertex(i, j, k + 1),
            );
            faces.push(if i == 0 { [a, d, c, b] } else { [a, b, c, d] });
        }

        let cells: Vec<[usize; 6]> = iproduct!(0..nz, 0..ny, 0..nx)
            .map(|(k, j, i)| {
                [
                    g.yz_face(i, j, k),
                    g.yz_face(i + 1, j, k),
                    g.xz_face(i, j, k),
                    g.xz_face(i, j + 1, k),
                    g.xy_face(i, j, k),
                    g.xy_face(i, j, k + 1),
                ]
            })
            .collect();

        let raw = RawMesh::new(
            Coordinates::from_points(3, points)?,
            PaddedIds::from_rows(&faces),
            PaddedIds::from_rows(&cells),
        );
        log::trace!(
            "Grid3D {nx}x{ny}x{nz}: {} faces, {} cells",
            raw.face_vertex_ids.rows(),
            raw.cell_face_ids.rows()
        );
        let mesh = assemble(&raw)?;
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> Grid3DParams {
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

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.params.nx, self.params.ny, self.params.nz)
    }

    pub fn physical_shape(&self) -> [f64; 3] {
        let p = &self.params;
        let l = self.mesh.scale().length;
        [
            p.nx as f64 * p.dx * l,
            p.ny as f64 * p.dy * l,
            p.nz as f64 * p.dz * l,
        ]
    }

    pub fn is_orthogonal(&self) -> bool {
        true
    }

    fn layout(&self) -> Layout {
        Layout {
            nx: self.params.nx,
            ny: self.params.ny,
            nz: self.params.nz,
        }
    }

    pub fn faces_left(&self) -> Vec<usize> {
        let g = self.layout();
        iproduct!(0..g.nz, 0..g.ny)
            .map(|(k, j)| g.yz_face(0, j, k))
            .collect()
    }

    pub fn faces_right(&self) -> Vec<usize> {
        let g = self.layout();
        iproduct!(0..g.nz, 0..g.ny)
            .map(|(k, j)| g.yz_face(g.nx, j, k))
            .collect()
    }

    pub fn faces_bottom(&self) -> Vec<usize> {
        let g = self.layout();
        iproduct!(0..g.nz, 0..g.nx)
            .map(|(k, i)| g.xz_face(i, 0, k))
            .collect()
    }

    pub fn faces_top(&self) -> Vec<usize> {
        let g = self.layout();
        iproduct!(0..g.nz, 0..g.nx)
            .map(|(k, i)| g.xz_face(i, g.ny, k))
            .collect()
    }

    pub fn faces_front(&self) -> Vec<usize> {
        let g = self.layout();
        iproduct!(0..g.ny, 0..g.nx)
            .map(|(j, i)| g.xy_face(i, j, 0))
            .collect()
    }

    pub fn faces_back(&self) -> Vec<usize> {
        let g = self.layout();
        iproduct!(0..g.ny, 0..g.nx)
            .map(|(j, i)| g.xy_face(i, j, g.nz))
            .collect()
    }
}

impl From<Grid3D> for Grid3DParams {
    fn from(mesh: Grid3D) -> Self {
        mesh.params
    }
}

impl TryFrom<Grid3DParams> for Grid3D {
    type Error = MeshError;

    fn try_from(params: Grid3DParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}
