//! MeshError: Unified error type for fv-mesh public APIs
//!
//! Every fallible operation in the crate (construction, topology derivation,
//! mesh algebra, generation, scaling) reports through this type. Errors are
//! raised where they are detected and never retried.

use thiserror::Error;

/// Reasons a mesh concatenation can be refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdditionFailure {
    /// No exterior vertex of one operand coincides with one of the other.
    #[error("Vertices are not aligned")]
    VerticesNotAligned,
    /// Coincident vertices exist but the boundary faces they span differ.
    #[error("Faces are not aligned")]
    FacesNotAligned,
    /// The operands live in spaces of different dimension.
    #[error("Dimensions do not match")]
    DimensionsDoNotMatch,
}

/// Coarse classification of a [`MeshError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshErrorKind {
    /// Malformed raw connectivity or geometry.
    Construction,
    /// Violated face/cell adjacency invariant.
    Topology,
    /// Refused concatenation.
    Addition,
    /// Invalid generator parameters.
    Generation,
    /// Vector operand of the wrong length.
    Shape,
}

/// Unified error type for mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Only 2-D and 3-D meshes are supported.
    #[error("unsupported mesh dimension {0} (expected 2 or 3)")]
    UnsupportedDimension(usize),
    /// A coordinate row does not have the mesh dimension.
    #[error("vertex {vertex} has {found} coordinates, expected {expected}")]
    CoordinateLength {
        vertex: usize,
        expected: usize,
        found: usize,
    },
    /// A vertex of a 2-D mesh carries a non-zero z component.
    #[error("vertex {vertex} has a non-zero component beyond dimension {dimension}")]
    CoordinatePadding { vertex: usize, dimension: usize },
    /// A padded table whose slots do not fill whole rows.
    #[error("padded table has {slots} slots, not a multiple of width {width}")]
    SlotCount { slots: usize, width: usize },
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    DanglingVertex {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },
    /// A cell references a face that does not exist.
    #[error("cell {cell} references face {face}, but the mesh has {face_count} faces")]
    DanglingFace {
        cell: usize,
        face: usize,
        face_count: usize,
    },
    /// A mesh must contain at least one cell.
    #[error("mesh has no cells")]
    EmptyMesh,
    /// A face has the wrong number of vertices for the mesh dimension.
    #[error("face {face} has {found} vertices, {expected}")]
    FaceVertexCount {
        face: usize,
        expected: &'static str,
        found: usize,
    },
    /// A cell has too few faces to enclose a volume.
    #[error("cell {cell} has {found} faces, at least {minimum} required")]
    CellFaceCount {
        cell: usize,
        minimum: usize,
        found: usize,
    },
    /// A face has zero extent, so its normal is undefined.
    #[error("face {face} is degenerate (zero area)")]
    DegenerateFace { face: usize },
    /// A cell encloses zero or negative volume (inverted or collapsed cell).
    #[error("cell {cell} has non-positive volume {volume}")]
    NonPositiveVolume { cell: usize, volume: f64 },
    /// A face bounds more than two cells.
    #[error("Topology error: face {face} is adjacent to {count} cells (at most 2 allowed)")]
    TooManyAdjacentCells { face: usize, count: usize },
    /// A face bounds no cell at all.
    #[error("Topology error: face {face} is not referenced by any cell")]
    OrphanFace { face: usize },
    /// A cell lists the same face twice.
    #[error("Topology error: cell {cell} lists face {face} more than once")]
    DuplicateCellFace { cell: usize, face: usize },
    /// A cell or face invariant failed during validation.
    #[error("Topology error: {0}")]
    TopologyInvariant(String),
    /// Mesh concatenation was refused.
    #[error("MeshAdditionError: {0}")]
    Addition(#[from] AdditionFailure),
    /// A generator received an empty box count.
    #[error("MeshGenerationError: n{axis} must be positive, got {value}")]
    InvalidCount { axis: char, value: usize },
    /// A generator received an unusable spacing.
    #[error("MeshGenerationError: d{axis} must be finite and positive, got {value}")]
    InvalidSpacing { axis: char, value: f64 },
    /// A vector operand does not have one component per mesh dimension.
    #[error("shape mismatch: expected {expected} components, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A face selector was asked for an axis the mesh does not have.
    #[error("axis {axis} is not available on a {dimension}-D mesh")]
    MissingAxis { axis: usize, dimension: usize },
    /// Scale factors must be finite and positive.
    #[error("scale length must be finite and positive, got {0}")]
    InvalidScale(f64),
}

impl MeshError {
    /// Classify the error into one of the coarse failure kinds.
    pub fn kind(&self) -> MeshErrorKind {
        match self {
            MeshError::UnsupportedDimension(_)
            | MeshError::CoordinateLength { .. }
            | MeshError::CoordinatePadding { .. }
            | MeshError::SlotCount { .. }
            | MeshError::EmptyMesh
            | MeshError::DanglingVertex { .. }
            | MeshError::DanglingFace { .. }
            | MeshError::FaceVertexCount { .. }
            | MeshError::CellFaceCount { .. }
            | MeshError::DegenerateFace { .. }
            | MeshError::NonPositiveVolume { .. }
            | MeshError::InvalidScale(_) => MeshErrorKind::Construction,
            MeshError::TooManyAdjacentCells { .. }
            | MeshError::OrphanFace { .. }
            | MeshError::DuplicateCellFace { .. }
            | MeshError::TopologyInvariant(_) => MeshErrorKind::Topology,
            MeshError::Addition(_) => MeshErrorKind::Addition,
            MeshError::InvalidCount { .. } | MeshError::InvalidSpacing { .. } => {
                MeshErrorKind::Generation
            }
            MeshError::DimensionMismatch { .. } | MeshError::MissingAxis { .. } => {
                MeshErrorKind::Shape
            }
        }
    }

    /// The concatenation failure carried by this error, if any.
    pub fn addition_failure(&self) -> Option<AdditionFailure> {
        match self {
            MeshError::Addition(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_messages_are_stable() {
        assert_eq!(
            AdditionFailure::VerticesNotAligned.to_string(),
            "Vertices are not aligned"
        );
        assert_eq!(
            AdditionFailure::FacesNotAligned.to_string(),
            "Faces are not aligned"
        );
        let err = MeshError::from(AdditionFailure::DimensionsDoNotMatch);
        assert_eq!(err.to_string(), "MeshAdditionError: Dimensions do not match");
        assert_eq!(err.kind(), MeshErrorKind::Addition);
    }

    #[test]
    fn kinds_cover_generation_and_shape() {
        let err = MeshError::InvalidCount { axis: 'x', value: 0 };
        assert_eq!(err.kind(), MeshErrorKind::Generation);
        assert_eq!(err.addition_failure(), None);
        let err = MeshError::DimensionMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(err.kind(), MeshErrorKind::Shape);
    }
}
