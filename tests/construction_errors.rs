use fv_mesh::prelude::*;

fn square_coords() -> Vec<[f64; 2]> {
    vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
}

const SQUARE_FACES: [[usize; 2]; 4] = [[1, 0], [2, 3], [0, 2], [3, 1]];

fn build<F: AsRef<[usize]>, L: AsRef<[usize]>>(
    coords: &[[f64; 2]],
    faces: &[F],
    cells: &[L],
) -> Result<Mesh, MeshError> {
    let raw = RawMesh::from_rows(2, coords, faces, cells)?;
    Mesh::from_raw(raw)
}

#[test]
fn unit_square_assembles() {
    let mesh = build(&square_coords(), &SQUARE_FACES, &[[0, 1, 2, 3]]).unwrap();
    assert!((mesh.cell_volumes()[0] - 1.0).abs() < 1e-12);
    let center = mesh.cell_centers()[0];
    assert!((center[0] - 0.5).abs() < 1e-12 && (center[1] - 0.5).abs() < 1e-12);
    assert_eq!(mesh.exterior_cells(), &[0]);
    assert!(!mesh.is_orthogonal());
}

#[test]
fn unsupported_dimensions() {
    let err = RawMesh::from_rows(1, &[[0.0], [1.0]], &[[0, 1]], &[[0]]).unwrap_err();
    assert_eq!(err, MeshError::UnsupportedDimension(1));
    assert_eq!(err.kind(), MeshErrorKind::Construction);
}

#[test]
fn coordinate_rows_must_match_dimension() {
    let coords: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0, 0.0, 0.0]];
    let err = Coordinates::try_new(2, &coords).unwrap_err();
    assert_eq!(
        err,
        MeshError::CoordinateLength {
            vertex: 1,
            expected: 2,
            found: 3
        }
    );
}

#[test]
fn dangling_references() {
    let err = build(&square_coords(), &[[1, 0], [2, 3], [0, 2], [3, 9]], &[[0, 1, 2, 3]])
        .unwrap_err();
    assert!(matches!(err, MeshError::DanglingVertex { face: 3, vertex: 9, .. }));

    let err = build(&square_coords(), &SQUARE_FACES, &[[0, 1, 2, 4]]).unwrap_err();
    assert_eq!(
        err,
        MeshError::DanglingFace {
            cell: 0,
            face: 4,
            face_count: 4
        }
    );
}

#[test]
fn face_arity_depends_on_dimension() {
    let faces: Vec<Vec<usize>> = vec![vec![1, 0], vec![2, 3], vec![0, 2, 3], vec![3, 1]];
    let err = build(&square_coords(), &faces, &[[0, 1, 2, 3]]).unwrap_err();
    assert!(matches!(err, MeshError::FaceVertexCount { face: 2, found: 3, .. }));

    let raw = RawMesh::from_rows(
        3,
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        &[vec![0, 1]],
        &[[0, 0, 0, 0]],
    )
    .unwrap();
    assert!(matches!(
        Mesh::from_raw(raw),
        Err(MeshError::FaceVertexCount { face: 0, found: 2, .. })
    ));
}

#[test]
fn cells_need_enough_faces() {
    let err = build(&square_coords(), &SQUARE_FACES, &[vec![0, 1]]).unwrap_err();
    assert_eq!(
        err,
        MeshError::CellFaceCount {
            cell: 0,
            minimum: 3,
            found: 2
        }
    );
}

#[test]
fn empty_meshes_are_refused() {
    let cells: [[usize; 3]; 0] = [];
    let err = build(&square_coords(), &SQUARE_FACES, &cells).unwrap_err();
    assert_eq!(err, MeshError::EmptyMesh);
}

#[test]
fn topology_violations() {
    // face 4 is not used by any cell
    let faces = [[1, 0], [2, 3], [0, 2], [3, 1], [0, 3]];
    let err = build(&square_coords(), &faces, &[[0, 1, 2, 3]]).unwrap_err();
    assert_eq!(err, MeshError::OrphanFace { face: 4 });
    assert_eq!(err.kind(), MeshErrorKind::Topology);

    let err = build(&square_coords(), &SQUARE_FACES, &[[0, 1, 2, 2]]).unwrap_err();
    assert_eq!(err, MeshError::DuplicateCellFace { cell: 0, face: 2 });

    let err = build(
        &square_coords(),
        &SQUARE_FACES,
        &[[0, 1, 2, 3], [0, 1, 2, 3], [0, 1, 2, 3]],
    )
    .unwrap_err();
    assert!(matches!(err, MeshError::TooManyAdjacentCells { face: 0, count: 3 }));
}

#[test]
fn degenerate_faces() {
    let coords = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0]];
    let err = build(&coords, &SQUARE_FACES, &[[0, 1, 2, 3]]).unwrap_err();
    assert_eq!(err, MeshError::DegenerateFace { face: 1 });

    let coords = vec![[0.0, 0.0], [f64::NAN, 0.0], [0.0, 1.0], [1.0, 1.0]];
    let err = build(&coords, &SQUARE_FACES, &[[0, 1, 2, 3]]).unwrap_err();
    assert_eq!(err, MeshError::DegenerateFace { face: 0 });
}

#[test]
fn inverted_cells() {
    // every face listed clockwise, so all normals point inward
    let faces = [[0, 1], [3, 2], [2, 0], [1, 3]];
    let err = build(&square_coords(), &faces, &[[0, 1, 2, 3]]).unwrap_err();
    assert!(matches!(err, MeshError::NonPositiveVolume { cell: 0, .. }));

    let mesh = build(&square_coords(), &SQUARE_FACES, &[[0, 1, 2, 3]]).unwrap();
    assert!(matches!(
        mesh.dilate_by(&[-1.0, 1.0]),
        Err(MeshError::NonPositiveVolume { .. })
    ));
}
