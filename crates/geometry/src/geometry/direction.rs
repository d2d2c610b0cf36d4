//! Unit-length directions.
//!
//! Fields are private: the only ways to build a direction are the named
//! constants, normalization of a vector (which reports `ZeroVector`), and
//! crate-internal constructors used where the result is unit by
//! construction (orthonormal re-expression, rotation, reflection).

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::point::{Point2d, Point3d};
use super::vector::{Vec2, Vec3};
use crate::default_tolerance;
use crate::error::{GeometryError, Result};

/// Squared-length slack accepted for input that is already unit length.
const UNIT_LENGTH_SLACK: f64 = 1e-12;

/// A unit vector in 3D space, representing orientation only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec3", into = "Vec3")]
pub struct Direction3d {
    x: f64,
    y: f64,
    z: f64,
}

impl Direction3d {
    pub const X: Self = Self::from_components_unchecked(1.0, 0.0, 0.0);
    pub const Y: Self = Self::from_components_unchecked(0.0, 1.0, 0.0);
    pub const Z: Self = Self::from_components_unchecked(0.0, 0.0, 1.0);
    pub const NEG_X: Self = Self::from_components_unchecked(-1.0, 0.0, 0.0);
    pub const NEG_Y: Self = Self::from_components_unchecked(0.0, -1.0, 0.0);
    pub const NEG_Z: Self = Self::from_components_unchecked(0.0, 0.0, -1.0);

    const fn from_components_unchecked(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Caller guarantees `v` has unit length.
    pub(crate) fn from_unit_vector_unchecked(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    /// Normalize `v`, failing with `ZeroVector` if it is (near-)zero.
    pub fn from_vector(v: &Vec3) -> Result<Self> {
        v.normalize()
    }

    pub fn from_components(x: f64, y: f64, z: f64) -> Result<Self> {
        Vec3::new(x, y, z).normalize()
    }

    pub fn components(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    pub fn x_component(&self) -> f64 {
        self.x
    }

    pub fn y_component(&self) -> f64 {
        self.y
    }

    pub fn z_component(&self) -> f64 {
        self.z
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn reverse(&self) -> Self {
        Self::from_components_unchecked(-self.x, -self.y, -self.z)
    }

    /// Cosine of the angle between the two directions.
    pub fn dot(&self, other: &Self) -> f64 {
        self.to_vec3().dot(&other.to_vec3())
    }

    /// Signed length of `v` along this direction.
    pub fn component_in(&self, v: &Vec3) -> f64 {
        v.component_in(self)
    }

    /// Cross product as a plain vector (its length is the sine of the angle
    /// between the directions, so it is not generally a direction).
    pub fn cross(&self, other: &Self) -> Vec3 {
        self.to_vec3().cross(&other.to_vec3())
    }

    /// Unsigned angle in `[0, PI]`.
    pub fn angle_from(&self, other: &Self) -> f64 {
        // atan2 keeps precision near 0 and PI, where acos does not.
        self.cross(other).length().atan2(self.dot(other))
    }

    /// An arbitrary perpendicular direction, chosen with the same
    /// smallest-component convention as [`Vec3::perpendicular`].
    ///
    /// This is a convention, not a geometric necessity: any direction in the
    /// orthogonal plane would do.
    pub fn perpendicular(&self) -> Self {
        let p = self.to_vec3().perpendicular();
        // Zeroing the smallest component of a unit vector leaves a squared
        // length of at least 2/3, so this never divides by zero.
        Self::from_unit_vector_unchecked(p / p.length())
    }

    /// Scale a direction about a point.
    ///
    /// Only the factors that preserve unit length are defined: `1` (identity)
    /// and `-1` (reversal). Any other factor fails with `InvalidOperation`.
    /// The center is irrelevant since directions have no position.
    pub fn scale_about(&self, _center: Point3d, scale: f64) -> Result<Self> {
        unit_scale_sign(scale).map(|sign| if sign < 0.0 { self.reverse() } else { *self })
    }

    /// Reverse when `scale` is negative. Used by composite entities, whose
    /// directions follow the orientation of a scaled line.
    pub(crate) fn oriented_by(&self, scale: f64) -> Self {
        if scale < 0.0 { self.reverse() } else { *self }
    }
}

impl TryFrom<Vec3> for Direction3d {
    type Error = GeometryError;

    /// Already-unit input is kept bit-for-bit, so encoded directions decode
    /// to exactly the same value.
    fn try_from(v: Vec3) -> Result<Self> {
        if (v.length_squared() - 1.0).abs() <= UNIT_LENGTH_SLACK {
            Ok(Self::from_unit_vector_unchecked(v))
        } else {
            v.normalize()
        }
    }
}

impl From<Direction3d> for Vec3 {
    fn from(d: Direction3d) -> Self {
        d.to_vec3()
    }
}

impl AbsDiffEq for Direction3d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_vec3().abs_diff_eq(&other.to_vec3(), epsilon)
    }
}

impl RelativeEq for Direction3d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_vec3()
            .relative_eq(&other.to_vec3(), epsilon, max_relative)
    }
}

/// A unit vector in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec2", into = "Vec2")]
pub struct Direction2d {
    x: f64,
    y: f64,
}

impl Direction2d {
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0 };
    pub const NEG_X: Self = Self { x: -1.0, y: 0.0 };
    pub const NEG_Y: Self = Self { x: 0.0, y: -1.0 };

    pub(crate) fn from_unit_vector_unchecked(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn from_vector(v: &Vec2) -> Result<Self> {
        v.normalize()
    }

    pub fn from_components(x: f64, y: f64) -> Result<Self> {
        Vec2::new(x, y).normalize()
    }

    /// Direction at `angle` radians counter-clockwise from the positive X axis.
    pub fn from_angle(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self { x: c, y: s }
    }

    /// Angle from the positive X axis, in `(-PI, PI]`.
    pub fn to_angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn components(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn x_component(&self) -> f64 {
        self.x
    }

    pub fn y_component(&self) -> f64 {
        self.y
    }

    pub fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn reverse(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// Rotated counter-clockwise by 90 degrees. Exact.
    pub fn perpendicular(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    pub fn rotate_by(&self, angle: f64) -> Self {
        Self::from_unit_vector_unchecked(self.to_vec2().rotate_by(angle))
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.to_vec2().dot(&other.to_vec2())
    }

    /// Signed length of `v` along this direction.
    pub fn component_in(&self, v: &Vec2) -> f64 {
        v.component_in(self)
    }

    pub fn cross(&self, other: &Self) -> f64 {
        self.to_vec2().cross(&other.to_vec2())
    }

    /// Signed angle, counter-clockwise positive, from `other` to `self`.
    pub fn angle_from(&self, other: &Self) -> f64 {
        other.cross(self).atan2(other.dot(self))
    }

    /// See [`Direction3d::scale_about`]: only `1` and `-1` are defined.
    pub fn scale_about(&self, _center: Point2d, scale: f64) -> Result<Self> {
        unit_scale_sign(scale).map(|sign| if sign < 0.0 { self.reverse() } else { *self })
    }

    pub(crate) fn oriented_by(&self, scale: f64) -> Self {
        if scale < 0.0 { self.reverse() } else { *self }
    }
}

impl TryFrom<Vec2> for Direction2d {
    type Error = GeometryError;

    fn try_from(v: Vec2) -> Result<Self> {
        if (v.length_squared() - 1.0).abs() <= UNIT_LENGTH_SLACK {
            Ok(Self::from_unit_vector_unchecked(v))
        } else {
            v.normalize()
        }
    }
}

impl From<Direction2d> for Vec2 {
    fn from(d: Direction2d) -> Self {
        d.to_vec2()
    }
}

impl AbsDiffEq for Direction2d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_vec2().abs_diff_eq(&other.to_vec2(), epsilon)
    }
}

impl RelativeEq for Direction2d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_vec2()
            .relative_eq(&other.to_vec2(), epsilon, max_relative)
    }
}

/// `Ok(1.0)` or `Ok(-1.0)` for the unit-preserving scale factors, matched within
/// `Tolerance::unit_scale`.
fn unit_scale_sign(scale: f64) -> Result<f64> {
    let slack = default_tolerance().unit_scale;
    if (scale - 1.0).abs() <= slack {
        Ok(1.0)
    } else if (scale + 1.0).abs() <= slack {
        Ok(-1.0)
    } else {
        debug!(scale, "rejecting non-unit scale of a direction");
        Err(GeometryError::InvalidOperation {
            operation: "scale_about",
            reason: format!("scale factor {scale} does not preserve unit length"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_constants_are_unit() {
        for d in [
            Direction3d::X,
            Direction3d::Y,
            Direction3d::Z,
            Direction3d::NEG_X,
            Direction3d::NEG_Y,
            Direction3d::NEG_Z,
        ] {
            assert!((d.to_vec3().length() - 1.0).abs() < 1e-15);
        }
    }

    #[test]
    fn test_from_components_normalizes() {
        let d = Direction3d::from_components(0.0, 3.0, 4.0).unwrap();
        assert_abs_diff_eq!(d.to_vec3(), Vec3::new(0.0, 0.6, 0.8), epsilon = 1e-12);
        assert!(Direction3d::from_components(0.0, 0.0, 0.0).is_err());
        assert!(Direction2d::from_components(1e-7, 0.0).is_err());
    }

    #[test]
    fn test_perpendicular_3d() {
        for d in [
            Direction3d::X,
            Direction3d::Z,
            Direction3d::from_components(1.0, 2.0, -3.0).unwrap(),
        ] {
            let p = d.perpendicular();
            assert!(d.dot(&p).abs() < 1e-12);
            assert!((p.to_vec3().length() - 1.0).abs() < 1e-12);
        }
        // Convention: Z maps into the XY plane.
        assert_abs_diff_eq!(Direction3d::Z.perpendicular(), Direction3d::NEG_Y, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_from() {
        assert!((Direction3d::X.angle_from(&Direction3d::Y) - FRAC_PI_2).abs() < 1e-12);
        assert!((Direction3d::X.angle_from(&Direction3d::NEG_X) - PI).abs() < 1e-12);
        assert!((Direction2d::Y.angle_from(&Direction2d::X) - FRAC_PI_2).abs() < 1e-12);
        assert!((Direction2d::X.angle_from(&Direction2d::Y) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_2d_angle_roundtrip() {
        let d = Direction2d::from_angle(FRAC_PI_4);
        assert!((d.to_angle() - FRAC_PI_4).abs() < 1e-12);
        assert_abs_diff_eq!(d.perpendicular(), Direction2d::from_angle(3.0 * FRAC_PI_4), epsilon = 1e-12);
        assert_abs_diff_eq!(d.rotate_by(FRAC_PI_4), Direction2d::Y, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_about_unit_factors() {
        let center = Point3d::new(5.0, 5.0, 5.0);
        assert_eq!(Direction3d::X.scale_about(center, 1.0).unwrap(), Direction3d::X);
        assert_eq!(Direction3d::X.scale_about(center, -1.0).unwrap(), Direction3d::NEG_X);
        assert_eq!(
            Direction2d::Y.scale_about(Point2d::ORIGIN, -1.0).unwrap(),
            Direction2d::NEG_Y
        );
    }

    #[test]
    fn test_scale_about_rejects_other_factors() {
        for k in [0.0, 0.5, 2.0, -3.0] {
            let err = Direction3d::Z.scale_about(Point3d::ORIGIN, k).unwrap_err();
            assert!(matches!(err, GeometryError::InvalidOperation { operation: "scale_about", .. }));
            assert!(Direction2d::X.scale_about(Point2d::ORIGIN, k).is_err());
        }
    }

    #[test]
    fn test_component_in_is_signed_length() {
        let d = Direction2d::from_angle(FRAC_PI_4);
        let v = Vec2::new(3.0, 3.0);
        assert!((d.component_in(&v) - 18.0_f64.sqrt()).abs() < 1e-12);
        assert!((d.reverse().component_in(&v) + 18.0_f64.sqrt()).abs() < 1e-12);
        assert!((Direction3d::Z.component_in(&Vec3::new(1.0, 2.0, -5.0)) + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_from_keeps_unit_input_exact() {
        let d = Direction3d::from_components(1.0, 2.0, 3.0).unwrap();
        let back = Direction3d::try_from(d.to_vec3()).unwrap();
        assert_eq!(back, d);
        assert!(Direction3d::try_from(Vec3::ZERO).is_err());

        let scaled = Direction2d::try_from(Vec2::new(0.0, 5.0)).unwrap();
        assert_eq!(scaled, Direction2d::Y);
    }
}
