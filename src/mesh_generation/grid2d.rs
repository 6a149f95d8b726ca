//! Rectilinear 2-D grid, optionally with non-uniform spacing.

use serde::{Deserialize, Serialize};

use crate::data::coordinates::Coordinates;
use crate::data::padded::PaddedIds;
use crate::mesh::{Mesh, RawMesh, assemble};
use crate::mesh_error::MeshError;
use crate::mesh_generation::{check_spacings, lattice_edges, node_positions};

/// Cell widths along x and y.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid2DParams {
    pub dx: Vec<f64>,
    pub dy: Vec<f64>,
}

impl Grid2DParams {
    /// `nx` columns of width `dx` and `ny` rows of height `dy`.
    pub fn uniform(dx: f64, dy: f64, nx: usize, ny: usize) -> Self {
        Self {
            dx: vec![dx; nx],
            dy: vec![dy; ny],
        }
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        check_spacings('x', &self.dx)?;
        check_spacings('y', &self.dy)
    }

    pub fn nx(&self) -> usize {
        self.dx.len()
    }

    pub fn ny(&self) -> usize {
        self.dy.len()
    }
}

/// Grid of `nx × ny` quadrilateral cells.
///
/// Faces are the horizontal edges then the vertical edges; each cell lists
/// its faces as (bottom, right, top, left).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "Grid2DParams", try_from = "Grid2DParams")]
pub struct Grid2D {
    params: Grid2DParams,
    mesh: Mesh,
}

super::impl_mesh_providers!(Grid2D);

impl Grid2D {
    pub fn new(dx: f64, dy: f64, nx: usize, ny: usize) -> Result<Self, MeshError> {
        Self::from_params(Grid2DParams::uniform(dx, dy, nx, ny))
    }

    /// Grid with one entry per column in `dx` and one per row in `dy`.
    pub fn with_spacings(dx: &[f64], dy: &[f64]) -> Result<Self, MeshError> {
        Self::from_params(Grid2DParams {
            dx: dx.to_vec(),
            dy: dy.to_vec(),
        })
    }

    pub fn from_params(params: Grid2DParams) -> Result<Self, MeshError> {
        params.validate()?;
        let (nx, ny) = (params.nx(), params.ny());
        let xs = node_positions(&params.dx);
        let ys = node_positions(&params.dy);
        let mut points = Vec::with_capacity(xs.len() * ys.len());
        for &y in &ys {
            for &x in &xs {
                points.push([x, y, 0.0]);
            }
        }

        let h = nx * (ny + 1);
        let mut cells = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let bottom = j * nx + i;
                let left = h + j * (nx + 1) + i;
                cells.push([bottom, left + 1, bottom + nx, left]);
            }
        }

        let raw = RawMesh::new(
            Coordinates::from_points(2, points)?,
            PaddedIds::from_rows(&lattice_edges(nx, ny)),
            PaddedIds::from_rows(&cells),
        );
        log::trace!("Grid2D {nx}x{ny}: {} faces", raw.face_vertex_ids.rows());
        let mesh = assemble(&raw)?;
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> &Grid2DParams {
        &self.params
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

    pub fn shape(&self) -> (usize, usize) {
        (self.params.nx(), self.params.ny())
    }

    /// Extent of the domain in physical units.
    pub fn physical_shape(&self) -> [f64; 2] {
        let l = self.mesh.scale().length;
        [
            self.params.dx.iter().sum::<f64>() * l,
            self.params.dy.iter().sum::<f64>() * l,
        ]
    }

    /// Cell-centre lines are perpendicular to the faces they cross.
    pub fn is_orthogonal(&self) -> bool {
        true
    }

    pub fn faces_left(&self) -> Vec<usize> {
        let (nx, ny) = self.shape();
        (0..ny).map(|j| nx * (ny + 1) + j * (nx + 1)).collect()
    }

    pub fn faces_right(&self) -> Vec<usize> {
        let (nx, ny) = self.shape();
        (0..ny).map(|j| nx * (ny + 1) + j * (nx + 1) + nx).collect()
    }

    pub fn faces_top(&self) -> Vec<usize> {
        let (nx, ny) = self.shape();
        (nx * ny..nx * (ny + 1)).collect()
    }

    pub fn faces_bottom(&self) -> Vec<usize> {
        (0..self.params.nx()).collect()
    }
}

impl From<Grid2D> for Grid2DParams {
    fn from(mesh: Grid2D) -> Self {
        mesh.params
    }
}

impl TryFrom<Grid2DParams> for Grid2D {
    type Error = MeshError;

    fn try_from(params: Grid2DParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_faces_match_reference_numbering() {
        let grid = Grid2D::new(0.5, 2.0, 3, 2).unwrap();
        assert_eq!(grid.faces_left(), vec![9, 13]);
        assert_eq!(grid.faces_right(), vec![12, 16]);
        assert_eq!(grid.faces_top(), vec![6, 7, 8]);
        assert_eq!(grid.mesh().faces_left(), vec![9, 13]);
        assert_eq!(grid.mesh().faces_top(), vec![6, 7, 8]);
    }

    #[test]
    fn non_uniform_cells_have_product_volumes() {
        let grid = Grid2D::with_spacings(&[1.0, 2.0], &[3.0]).unwrap();
        let volumes = grid.mesh().cell_volumes();
        assert!((volumes[0] - 3.0).abs() < 1e-12);
        assert!((volumes[1] - 6.0).abs() < 1e-12);
        assert_eq!(grid.physical_shape(), [3.0, 3.0]);
        assert!(grid.is_orthogonal());
    }
}
