use fv_mesh::prelude::*;

fn assert_scaled(actual: &[f64], raw: &[f64], factor: f64) {
    assert_eq!(actual.len(), raw.len());
    for (a, r) in actual.iter().zip(raw) {
        assert!((a - r * factor).abs() < 1e-10, "{a} != {r} * {factor}");
    }
}

#[test]
fn two_dimensional_scale_factors() {
    let mut tri = Tri2D::new(0.5, 2.0, 3, 2).unwrap();
    let raw = tri.mesh().geometry().clone();
    tri.mesh_mut().set_scale(3.0).unwrap();
    let mesh = tri.mesh();

    assert_eq!(
        mesh.scale(),
        Scale {
            length: 3.0,
            area: 3.0,
            volume: 9.0
        }
    );
    assert_scaled(mesh.face_areas(), &raw.face_areas, 3.0);
    assert_scaled(mesh.cell_volumes(), &raw.cell_volumes, 9.0);
    assert_scaled(mesh.cell_distances(), &raw.cell_distances, 3.0);
    let xs: Vec<f64> = mesh.cell_centers().iter().map(|c| c[0]).collect();
    let raw_xs: Vec<f64> = raw.cell_centers.iter().map(|c| c[0]).collect();
    assert_scaled(&xs, &raw_xs, 3.0);
    assert_eq!(tri.physical_shape(), [4.5, 12.0]);

    // normals and ratios are dimensionless
    assert_eq!(mesh.face_normals(), raw.face_normals.as_slice());
    let ratio_before: Vec<f64> = raw
        .cell_distances
        .iter()
        .enumerate()
        .map(|(f, &d)| raw.face_to_cell_distances.get(f, 0).unwrap() / d)
        .collect();
    assert_scaled(mesh.face_to_cell_distance_ratio(), &ratio_before, 1.0);
}

#[test]
fn three_dimensional_scale_factors() {
    let grid = Grid3D::new(1.0, 1.0, 1.0, 2, 1, 1).unwrap();
    let mesh = grid.into_mesh().with_scale(2.0).unwrap();
    assert!(mesh.face_areas().iter().all(|&a| (a - 4.0).abs() < 1e-12));
    assert!(mesh.cell_volumes().iter().all(|&v| (v - 8.0).abs() < 1e-12));
    assert!((mesh.cell_distances()[mesh.interior_faces()[0]] - 2.0).abs() < 1e-12);
    let projection = mesh.area_projections()[0];
    let norm = projection.iter().map(|x| x * x).sum::<f64>().sqrt();
    assert!((norm - 4.0).abs() < 1e-12);
}

#[test]
fn resetting_the_scale_restores_raw_values() {
    let mut grid = Grid2D::with_spacings(&[1.0, 2.0], &[0.5, 0.5]).unwrap();
    let before = grid.mesh().scaled().clone();
    grid.mesh_mut().set_scale(7.5).unwrap();
    assert_ne!(grid.mesh().scaled(), &before);
    grid.mesh_mut().set_scale(1.0).unwrap();
    assert_eq!(grid.mesh().scaled(), &before);
}

#[test]
fn invalid_lengths_leave_the_mesh_unchanged() {
    let mut tri = Tri2D::new(1.0, 1.0, 1, 1).unwrap();
    tri.mesh_mut().set_scale(2.0).unwrap();
    for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let err = tri.mesh_mut().set_scale(bad).unwrap_err();
        assert!(matches!(err, MeshError::InvalidScale(_)));
    }
    assert_eq!(tri.mesh().scale().length, 2.0);
    assert!((tri.mesh().cell_volumes()[0] - 1.0).abs() < 1e-12);
}

#[test]
fn scaled_mesh_moves_in_physical_units() {
    let mesh = Grid2D::new(1.0, 1.0, 1, 1)
        .unwrap()
        .into_mesh()
        .with_scale(10.0)
        .unwrap();
    // translation offsets are raw coordinates
    let moved = (&mesh + [1.0, 0.0]).unwrap();
    assert_eq!(moved.scale().length, 10.0);
    assert!((moved.cell_centers()[0][0] - 15.0).abs() < 1e-12);
    assert_eq!(moved.vertex_coords()[1], [20.0, 0.0, 0.0]);
}
