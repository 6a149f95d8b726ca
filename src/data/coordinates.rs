//! Vertex coordinate storage.
//!
//! Coordinates are stored as `[f64; 3]` points with a fixed spatial dimension;
//! components beyond the dimension are kept at zero so that 2-D and 3-D meshes
//! share one set of vector kernels.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;

/// Coordinate storage with an attached dimension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateRecord")]
pub struct Coordinates {
    dimension: usize,
    points: Vec<[f64; 3]>,
}

/// Unchecked wire form of [`Coordinates`].
#[derive(Deserialize)]
struct CoordinateRecord {
    dimension: usize,
    points: Vec<[f64; 3]>,
}

impl TryFrom<CoordinateRecord> for Coordinates {
    type Error = MeshError;

    fn try_from(raw: CoordinateRecord) -> Result<Self, Self::Error> {
        validate_dimension(raw.dimension)?;
        let padded = raw
            .points
            .iter()
            .position(|p| p[raw.dimension..].iter().any(|&x| x != 0.0));
        if let Some(vertex) = padded {
            return Err(MeshError::CoordinatePadding {
                vertex,
                dimension: raw.dimension,
            });
        }
        Ok(Self {
            dimension: raw.dimension,
            points: raw.points,
        })
    }
}

impl Coordinates {
    /// Build coordinates from one row of `dimension` components per point.
    pub fn try_new<R: AsRef<[f64]>>(dimension: usize, rows: &[R]) -> Result<Self, MeshError> {
        validate_dimension(dimension)?;
        let mut points = Vec::with_capacity(rows.len());
        for (vertex, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dimension {
                return Err(MeshError::CoordinateLength {
                    vertex,
                    expected: dimension,
                    found: row.len(),
                });
            }
            let mut p = [0.0; 3];
            p[..dimension].copy_from_slice(row);
            points.push(p);
        }
        Ok(Self { dimension, points })
    }

    /// Wrap padded points, zeroing any component beyond `dimension`.
    pub fn from_points(dimension: usize, mut points: Vec<[f64; 3]>) -> Result<Self, MeshError> {
        validate_dimension(dimension)?;
        for p in &mut points {
            p[dimension..].fill(0.0);
        }
        Ok(Self { dimension, points })
    }

    /// Returns the spatial dimension per point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when no point is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Padded `[x, y, z]` view of every point.
    #[inline]
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Padded point `i`, or `None` when out of range.
    #[inline]
    pub fn point(&self, i: usize) -> Option<&[f64; 3]> {
        self.points.get(i)
    }

    /// Read-only view of the `dimension` components of point `i`.
    #[inline]
    pub fn restrict(&self, i: usize) -> Option<&[f64]> {
        self.points.get(i).map(|p| &p[..self.dimension])
    }

    /// Component `axis` of every point.
    pub fn axis(&self, axis: usize) -> Vec<f64> {
        self.points.iter().map(|p| p[axis]).collect()
    }

    /// Shift every point by `offset` (one component per dimension).
    pub fn translate(&self, offset: &[f64]) -> Result<Self, MeshError> {
        let offset = self.check_vector(offset)?;
        Ok(self.map_points(|p| {
            [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]]
        }))
    }

    /// Scale every point component-wise by `factor` (one component per dimension).
    pub fn dilate(&self, factor: &[f64]) -> Result<Self, MeshError> {
        let factor = self.check_vector(factor)?;
        Ok(self.map_points(|p| {
            [p[0] * factor[0], p[1] * factor[1], p[2] * factor[2]]
        }))
    }

    /// Append the points of `other` (which must share the dimension).
    pub(crate) fn extend_from(&mut self, other: impl IntoIterator<Item = [f64; 3]>) {
        self.points.extend(other);
    }

    fn map_points(&self, f: impl Fn(&[f64; 3]) -> [f64; 3]) -> Self {
        Self {
            dimension: self.dimension,
            points: self.points.iter().map(f).collect(),
        }
    }

    fn check_vector(&self, v: &[f64]) -> Result<[f64; 3], MeshError> {
        if v.len() != self.dimension {
            return Err(MeshError::DimensionMismatch {
                expected: self.dimension,
                found: v.len(),
            });
        }
        let mut out = [0.0; 3];
        out[..self.dimension].copy_from_slice(v);
        Ok(out)
    }
}

fn validate_dimension(dimension: usize) -> Result<(), MeshError> {
    if !(2..=3).contains(&dimension) {
        return Err(MeshError::UnsupportedDimension(dimension));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_must_match_dimension() {
        let err = Coordinates::try_new(2, &[vec![0.0, 0.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::CoordinateLength {
                vertex: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            Coordinates::try_new(4, &[[0.0; 4]]).unwrap_err(),
            MeshError::UnsupportedDimension(4)
        );
    }

    #[test]
    fn translate_and_dilate_keep_padding_zero() {
        let coords = Coordinates::try_new(2, &[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let moved = coords.translate(&[1.0, -1.0]).unwrap();
        assert_eq!(moved.points(), &[[2.0, 1.0, 0.0], [4.0, 3.0, 0.0]]);
        let scaled = coords.dilate(&[2.0, 0.5]).unwrap();
        assert_eq!(scaled.restrict(1).unwrap(), &[6.0, 2.0]);
        assert!(matches!(
            coords.dilate(&[1.0, 1.0, 1.0]),
            Err(MeshError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn deserialization_checks_padding() {
        let record = CoordinateRecord {
            dimension: 2,
            points: vec![[0.0, 0.0, 0.0], [1.0, 2.0, 5.0]],
        };
        assert_eq!(
            Coordinates::try_from(record).unwrap_err(),
            MeshError::CoordinatePadding {
                vertex: 1,
                dimension: 2
            }
        );
        let record = CoordinateRecord {
            dimension: 1,
            points: vec![],
        };
        assert_eq!(
            Coordinates::try_from(record).unwrap_err(),
            MeshError::UnsupportedDimension(1)
        );
    }
}
