//! Small fixed-size vector helpers shared by the geometry kernels.
//!
//! All vectors are `[f64; 3]`; 2-D data keeps its third component at zero.

pub(crate) const ZERO: [f64; 3] = [0.0, 0.0, 0.0];
pub(crate) const Z_AXIS: [f64; 3] = [0.0, 0.0, 1.0];

#[inline]
pub(crate) fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub(crate) fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// `a + s·b`
#[inline]
pub(crate) fn axpy(a: [f64; 3], s: f64, b: [f64; 3]) -> [f64; 3] {
    [a[0] + s * b[0], a[1] + s * b[1], a[2] + s * b[2]]
}

#[inline]
pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub(crate) fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub(crate) fn distance_squared(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = sub(a, b);
    dot(d, d)
}

/// `a / |a|`, or the zero vector when `a` has no length.
#[inline]
pub(crate) fn unit_or_zero(a: [f64; 3]) -> [f64; 3] {
    let len = norm(a);
    if len > 0.0 {
        [a[0] / len, a[1] / len, a[2] / len]
    } else {
        ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_with_z_axis_rotates_counter_clockwise() {
        assert_eq!(cross(Z_AXIS, [1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);
        assert_eq!(cross(Z_AXIS, [0.0, 2.0, 0.0]), [-2.0, 0.0, 0.0]);
    }

    #[test]
    fn unit_handles_zero() {
        assert_eq!(unit_or_zero(ZERO), ZERO);
        assert_eq!(unit_or_zero([3.0, 0.0, 4.0]), [0.6, 0.0, 0.8]);
        assert_eq!(distance_squared([1.0, 1.0, 0.0], [0.0, 0.0, 0.0]), 2.0);
        assert_eq!(axpy([1.0, 0.0, 0.0], 2.0, [0.0, 1.0, 0.0]), [1.0, 2.0, 0.0]);
    }
}
