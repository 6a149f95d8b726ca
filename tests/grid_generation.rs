use fv_mesh::prelude::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-10
}

#[test]
fn grid2d_counts_and_exterior_faces() {
    let grid = Grid2D::new(0.5, 2.0, 3, 2).unwrap();
    let mesh = grid.mesh();
    assert_eq!(mesh.num_vertices(), 12);
    assert_eq!(mesh.num_faces(), 17);
    assert_eq!(mesh.num_cells(), 6);
    assert_eq!(mesh.exterior_faces(), &[0, 1, 2, 6, 7, 8, 9, 12, 13, 16]);
    assert_eq!(mesh.interior_faces(), &[3, 4, 5, 10, 11, 14, 15]);
    assert_eq!(mesh.number_of_faces_per_cell(), vec![4; 6]);
    assert!(mesh.cell_volumes().iter().all(|&v| approx(v, 1.0)));
}

#[test]
fn grid2d_cells_list_bottom_right_top_left() {
    let grid = Grid2D::new(1.0, 1.0, 3, 2).unwrap();
    let cells = grid.cell_face_ids();
    assert_eq!(cells.row_values(0), vec![0, 10, 3, 9]);
    assert_eq!(cells.row_values(4), vec![4, 15, 7, 14]);
}

#[test]
fn grid2d_neighbours_follow_face_order() {
    let grid = Grid2D::new(1.0, 1.0, 3, 2).unwrap();
    let mesh = grid.mesh();
    // cell 1: bottom boundary, right 2, top 4, left 0
    let row: Vec<Option<usize>> = mesh.cell_to_cell_ids().row(1).to_vec();
    assert_eq!(row, vec![None, Some(2), Some(4), Some(0)]);
    assert_eq!(mesh.cell_to_cell_ids_filled().row_values(1), vec![1, 2, 4, 0]);
    assert_eq!(mesh.interior_cells(), &[] as &[usize]);
    assert_eq!(mesh.exterior_cells(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn grid2d_normals_point_out_of_the_domain() {
    let grid = Grid2D::new(1.0, 1.0, 2, 2).unwrap();
    let mesh = grid.mesh();
    for &f in &grid.faces_left() {
        assert_eq!(mesh.face_normals()[f], [-1.0, 0.0, 0.0]);
    }
    for &f in &grid.faces_right() {
        assert_eq!(mesh.face_normals()[f], [1.0, 0.0, 0.0]);
    }
    for &f in &grid.faces_bottom() {
        assert_eq!(mesh.face_normals()[f], [0.0, -1.0, 0.0]);
    }
    for &f in &grid.faces_top() {
        assert_eq!(mesh.face_normals()[f], [0.0, 1.0, 0.0]);
    }
}

#[test]
fn grid3d_counts_and_geometry() {
    let grid = Grid3D::new(0.5, 2.0, 4.0, 3, 2, 1).unwrap();
    let mesh = grid.mesh();
    assert_eq!(mesh.dimension(), 3);
    assert_eq!(mesh.num_vertices(), 4 * 3 * 2);
    assert_eq!(mesh.num_faces(), 3 * 2 * 2 + 3 * 3 + 4 * 2);
    assert_eq!(mesh.num_cells(), 6);
    assert_eq!(mesh.max_faces_per_cell(), 6);

    // face areas by orientation block
    let areas = mesh.face_areas();
    assert!(areas[..12].iter().all(|&a| approx(a, 1.0)));
    assert!(areas[12..21].iter().all(|&a| approx(a, 2.0)));
    assert!(areas[21..].iter().all(|&a| approx(a, 8.0)));
    assert_eq!(grid.physical_shape(), [1.5, 4.0, 4.0]);
}

#[test]
fn grid3d_boundary_normals_point_outward() {
    let grid = Grid3D::new(1.0, 1.0, 1.0, 2, 2, 2).unwrap();
    let mesh = grid.mesh();
    let check = |faces: Vec<usize>, expected: [f64; 3]| {
        for f in faces {
            let n = mesh.face_normals()[f];
            assert!(
                (0..3).all(|i| approx(n[i], expected[i])),
                "face {f}: {n:?} != {expected:?}"
            );
        }
    };
    check(grid.faces_left(), [-1.0, 0.0, 0.0]);
    check(grid.faces_right(), [1.0, 0.0, 0.0]);
    check(grid.faces_bottom(), [0.0, -1.0, 0.0]);
    check(grid.faces_top(), [0.0, 1.0, 0.0]);
    check(grid.faces_front(), [0.0, 0.0, -1.0]);
    check(grid.faces_back(), [0.0, 0.0, 1.0]);
    assert_eq!(mesh.interior_cells(), &[] as &[usize]);
}

#[test]
fn grid3d_has_an_interior_cell_when_large_enough() {
    let grid = Grid3D::new(1.0, 1.0, 1.0, 3, 3, 3).unwrap();
    assert_eq!(grid.mesh().interior_cells(), &[13]);
    let center = grid.mesh().cell_centers()[13];
    assert!(center.iter().all(|&c| approx(c, 1.5)));
}

#[test]
fn face_selectors_agree_with_geometry() {
    let grid = Grid3D::new(0.5, 2.0, 4.0, 3, 2, 1).unwrap();
    let mesh = grid.mesh();
    assert_eq!(mesh.faces_right(), grid.faces_right());
    assert_eq!(mesh.faces_top(), grid.faces_top());
    assert_eq!(mesh.faces_front().unwrap(), grid.faces_front());

    let flat = Grid2D::new(1.0, 1.0, 2, 2).unwrap();
    assert_eq!(
        flat.mesh().faces_front(),
        Err(MeshError::MissingAxis {
            axis: 2,
            dimension: 2
        })
    );
}

#[test]
fn nearest_cells_on_a_graded_grid() {
    let graded = Grid2D::with_spacings(&[0.1, 1.0, 10.0], &[0.1, 1.0, 10.0]).unwrap();
    let coarse = Grid2D::new(5.0, 5.0, 2, 2).unwrap();
    let points: Vec<[f64; 2]> = coarse
        .mesh()
        .cell_centers()
        .iter()
        .map(|c| [c[0], c[1]])
        .collect();
    let ids = graded.mesh().nearest_cell_ids(&points).unwrap();
    assert_eq!(ids, vec![4, 5, 7, 8]);
}

#[test]
fn nearest_cell_rejects_wrong_dimension() {
    let grid = Grid2D::new(1.0, 1.0, 2, 2).unwrap();
    assert_eq!(
        grid.mesh().nearest_cell_id(&[0.5, 0.5, 0.5]),
        Err(MeshError::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn generators_validate_parameters() {
    assert_eq!(
        Grid3D::new(1.0, 1.0, 1.0, 1, 0, 1).unwrap_err(),
        MeshError::InvalidCount { axis: 'y', value: 0 }
    );
    assert!(matches!(
        Grid2D::with_spacings(&[1.0, f64::NAN], &[1.0]),
        Err(MeshError::InvalidSpacing { axis: 'x', .. })
    ));
    assert!(matches!(
        Grid2D::with_spacings(&[1.0], &[]),
        Err(MeshError::InvalidCount { axis: 'y', value: 0 })
    ));
    let err = Tri2D::new(0.0, 1.0, 1, 1).unwrap_err();
    assert_eq!(err.kind(), MeshErrorKind::Generation);
}

#[test]
fn generator_meshes_hold_their_invariants() {
    Tri2D::new(0.3, 0.7, 4, 3)
        .unwrap()
        .mesh()
        .validate_invariants()
        .unwrap();
    Grid2D::with_spacings(&[0.5, 1.0, 2.0], &[3.0, 0.25])
        .unwrap()
        .mesh()
        .validate_invariants()
        .unwrap();
    Grid3D::new(1.0, 2.0, 3.0, 2, 3, 2)
        .unwrap()
        .mesh()
        .validate_invariants()
        .unwrap();
}
