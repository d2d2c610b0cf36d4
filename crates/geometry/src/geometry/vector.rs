use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};
use tracing::debug;

use super::direction::{Direction2d, Direction3d};
use crate::error::{GeometryError, Result};
use crate::{Tolerance, default_tolerance};

/// A displacement in 3D Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_components((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }

    pub fn components(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Normalize against the process-wide default tolerance.
    pub fn normalize(&self) -> Result<Direction3d> {
        self.normalize_with(&default_tolerance())
    }

    /// Normalize, reporting `ZeroVector` when the squared length is below
    /// `tolerance.zero_length_squared`.
    ///
    /// Vectors whose squared length overflows are first divided by their
    /// largest component. Infinite or NaN components fail with
    /// `NonFiniteVector`.
    pub fn normalize_with(&self, tolerance: &Tolerance) -> Result<Direction3d> {
        let length_squared = self.length_squared();
        if !length_squared.is_finite() {
            if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
                debug!(vector = ?self, "refusing to normalize non-finite vector");
                return Err(GeometryError::NonFiniteVector);
            }
            let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
            return (*self / largest).normalize_with(tolerance);
        }
        if tolerance.is_zero_length_squared(length_squared) {
            debug!(vector = ?self, length_squared, "refusing to normalize near-zero vector");
            return Err(GeometryError::ZeroVector { length_squared });
        }
        let v = *self / length_squared.sqrt();
        Ok(Direction3d::from_unit_vector_unchecked(v))
    }

    /// Signed length of the projection onto `direction`.
    pub fn component_in(&self, direction: &Direction3d) -> f64 {
        self.dot(&direction.to_vec3())
    }

    pub fn project_onto_direction(&self, direction: &Direction3d) -> Self {
        direction.to_vec3() * self.component_in(direction)
    }

    /// Linear interpolation; `t` outside `[0, 1]` extrapolates.
    pub fn interpolate_from(a: &Self, b: &Self, t: f64) -> Self {
        *a + (*b - *a) * t
    }

    pub fn scale_by(&self, k: f64) -> Self {
        *self * k
    }

    /// An arbitrary vector perpendicular to `self`, of the same order of
    /// magnitude.
    ///
    /// By convention the smallest-magnitude component is zeroed and the
    /// other two are swapped with one negated. The zero vector maps to
    /// itself.
    pub fn perpendicular(&self) -> Self {
        let (ax, ay, az) = (self.x.abs(), self.y.abs(), self.z.abs());
        if ax <= ay {
            if ax <= az {
                Self::new(0.0, -self.z, self.y)
            } else {
                Self::new(-self.y, self.x, 0.0)
            }
        } else if ay <= az {
            Self::new(self.z, 0.0, -self.x)
        } else {
            Self::new(-self.y, self.x, 0.0)
        }
    }

    pub fn angle_to(&self, other: &Self) -> f64 {
        let d = self.dot(other);
        let len_product = self.length() * other.length();
        if len_product < 1e-15 {
            return 0.0;
        }
        (d / len_product).clamp(-1.0, 1.0).acos()
    }

    /// Reflect across the plane whose unit normal is `normal`.
    pub fn reflect(&self, normal: &Direction3d) -> Self {
        *self - normal.to_vec3() * (2.0 * self.component_in(normal))
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

/// A displacement in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_components((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }

    pub fn components(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Signed area of the parallelogram spanned by `self` and `other`.
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn normalize(&self) -> Result<Direction2d> {
        self.normalize_with(&default_tolerance())
    }

    pub fn normalize_with(&self, tolerance: &Tolerance) -> Result<Direction2d> {
        let length_squared = self.length_squared();
        if !length_squared.is_finite() {
            if !(self.x.is_finite() && self.y.is_finite()) {
                debug!(vector = ?self, "refusing to normalize non-finite vector");
                return Err(GeometryError::NonFiniteVector);
            }
            let largest = self.x.abs().max(self.y.abs());
            return (*self / largest).normalize_with(tolerance);
        }
        if tolerance.is_zero_length_squared(length_squared) {
            debug!(vector = ?self, length_squared, "refusing to normalize near-zero vector");
            return Err(GeometryError::ZeroVector { length_squared });
        }
        let v = *self / length_squared.sqrt();
        Ok(Direction2d::from_unit_vector_unchecked(v))
    }

    pub fn component_in(&self, direction: &Direction2d) -> f64 {
        self.dot(&direction.to_vec2())
    }

    pub fn project_onto_direction(&self, direction: &Direction2d) -> Self {
        direction.to_vec2() * self.component_in(direction)
    }

    pub fn interpolate_from(a: &Self, b: &Self, t: f64) -> Self {
        *a + (*b - *a) * t
    }

    pub fn scale_by(&self, k: f64) -> Self {
        *self * k
    }

    /// Rotated counter-clockwise by 90 degrees.
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotated counter-clockwise by `angle` radians.
    pub fn rotate_by(&self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c * self.x - s * self.y, s * self.x + c * self.y)
    }

    /// Reflect across the line through the origin with direction `axis`.
    pub fn reflect_across(&self, axis: &Direction2d) -> Self {
        self.project_onto_direction(axis) * 2.0 - *self
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn from_array(arr: [f64; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl AbsDiffEq for Vec2 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vec2 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    #[test]
    fn test_dot_product() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(&b) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross_product() {
        let result = Vec3::X.cross(&Vec3::Y);
        assert_abs_diff_eq!(result, Vec3::Z, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize() {
        let n = Vec3::new(3.0, 0.0, 4.0).normalize().unwrap();
        assert_abs_diff_eq!(n.to_vec3(), Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-12);
        assert!((n.to_vec3().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let err = Vec3::ZERO.normalize().unwrap_err();
        assert!(matches!(err, GeometryError::ZeroVector { .. }));

        // Below the squared-length threshold of 1e-10.
        let tiny = Vec3::new(1e-6, 0.0, 0.0);
        assert!(tiny.normalize().is_err());
        assert!(Vec2::new(0.0, 1e-6).normalize().is_err());
    }

    #[test]
    fn test_normalize_huge_components() {
        let d = Vec3::new(1e200, 0.0, 0.0).normalize().unwrap();
        assert_eq!(d, Direction3d::X);

        let d = Vec3::new(1e200, -1e200, 0.0).normalize().unwrap();
        assert!((d.to_vec3().length() - 1.0).abs() < 1e-12);
        assert!((d.x_component() - FRAC_1_SQRT_2).abs() < 1e-12);

        let d = Vec2::new(3e160, 4e160).normalize().unwrap();
        assert_abs_diff_eq!(d.to_vec2(), Vec2::new(0.6, 0.8), epsilon = 1e-12);
        assert!((d.to_vec2().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_non_finite_fails() {
        for v in [
            Vec3::new(f64::INFINITY, 0.0, 0.0),
            Vec3::new(f64::NAN, 1.0, 0.0),
            Vec3::new(1e200, f64::NEG_INFINITY, 0.0),
        ] {
            assert_eq!(v.normalize().unwrap_err(), GeometryError::NonFiniteVector);
        }
        assert_eq!(
            Vec2::new(1.0, f64::NAN).normalize().unwrap_err(),
            GeometryError::NonFiniteVector
        );
    }

    #[test]
    fn test_normalize_with_custom_tolerance() {
        let tiny = Vec3::new(1e-6, 0.0, 0.0);
        let strict = Tolerance {
            zero_length_squared: 1e-20,
            ..Tolerance::DEFAULT
        };
        let dir = tiny.normalize_with(&strict).unwrap();
        assert_abs_diff_eq!(dir.to_vec3(), Vec3::X, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_to() {
        let angle = Vec3::X.angle_to(&Vec3::Y);
        assert!((angle - FRAC_PI_2).abs() < 1e-12);

        let angle2 = Vec3::X.angle_to(&(-Vec3::X));
        assert!((angle2 - PI).abs() < 1e-12);
    }

    #[test]
    fn test_reflect() {
        let incoming = Vec3::new(1.0, -1.0, 0.0);
        let reflected = incoming.reflect(&Direction3d::Y);
        assert_abs_diff_eq!(reflected, Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_perpendicular_is_orthogonal() {
        for v in [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-5.0, 0.1, 0.2),
            Vec3::new(0.0, 0.0, 7.0),
            Vec3::new(3.0, -4.0, 0.0),
        ] {
            let p = v.perpendicular();
            assert!(p.dot(&v).abs() < 1e-12, "{p:?} not perpendicular to {v:?}");
            assert!(p.length_squared() > 0.0);
        }
        assert_eq!(Vec3::ZERO.perpendicular(), Vec3::ZERO);
    }

    #[test]
    fn test_interpolate_extrapolates() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);
        assert_abs_diff_eq!(Vec3::interpolate_from(&a, &b, 0.5), Vec3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(Vec3::interpolate_from(&a, &b, -1.0), Vec3::new(-2.0, -4.0, -6.0));
        assert_abs_diff_eq!(Vec3::interpolate_from(&a, &b, 2.0), Vec3::new(4.0, 8.0, 12.0));
    }

    #[test]
    fn test_component_in() {
        let v = Vec3::new(3.0, 4.0, 5.0);
        assert!((v.component_in(&Direction3d::Y) - 4.0).abs() < 1e-12);
        assert_abs_diff_eq!(v.project_onto_direction(&Direction3d::Z), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_vec2_cross_is_signed_area() {
        assert!((Vec2::X.cross(&Vec2::Y) - 1.0).abs() < 1e-12);
        assert!((Vec2::Y.cross(&Vec2::X) + 1.0).abs() < 1e-12);
        assert!((Vec2::new(2.0, 0.0).cross(&Vec2::new(0.0, 3.0)) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_rotate_and_perpendicular() {
        let v = Vec2::new(1.0, 0.0);
        assert_abs_diff_eq!(v.perpendicular(), Vec2::new(0.0, 1.0));
        assert_abs_diff_eq!(v.rotate_by(FRAC_PI_2), Vec2::new(0.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(v.rotate_by(PI), Vec2::new(-1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_vec2_reflect_across() {
        let v = Vec2::new(1.0, 2.0);
        assert_abs_diff_eq!(v.reflect_across(&Direction2d::X), Vec2::new(1.0, -2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_components_roundtrip() {
        let v = Vec3::from_components((1.5, -2.5, 3.25));
        assert_eq!(v.components(), (1.5, -2.5, 3.25));
        assert_eq!(Vec3::from_array(v.to_array()), v);
        let w = Vec2::from_components((0.5, 7.0));
        assert_eq!(Vec2::from_array(w.to_array()), w);
    }
}
