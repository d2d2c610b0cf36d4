//! Affine transformation operators.
//!
//! Every transformable entity implements the same operator traits, and every
//! operator returns a value of the input's own type. Composite entities
//! (axes, frames, planes, splines) implement them in their own modules by
//! delegating to the point, vector and direction impls below.
//!
//! Position-free entities (vectors, directions) ignore translation.
//! Directions do not implement [`Scale3d`]/[`Scale2d`]; see
//! [`Direction3d::scale_about`] for the fallible form.

use super::axis::{Axis2d, Axis3d};
use super::direction::{Direction2d, Direction3d};
use super::plane::Plane3d;
use super::point::{Point2d, Point3d};
use super::vector::{Vec2, Vec3};
use crate::error::Result;

/// Rigid operators on 3D entities.
pub trait Transform3d: Sized {
    /// Rotate by `angle` radians around `axis`, counter-clockwise when
    /// looking back along the axis direction.
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self;

    fn translate_by(&self, displacement: Vec3) -> Self;

    /// Reflect across `plane`.
    fn mirror_across(&self, plane: &Plane3d) -> Self;
}

/// Uniform scaling about a fixed point: `p' = center + scale * (p - center)`.
///
/// A negative `scale` is a point reflection combined with a scale; it is
/// allowed but reverses every direction carried by the entity.
pub trait Scale3d: Sized {
    fn scale_about(&self, center: Point3d, scale: f64) -> Self;
}

/// Rigid operators on 2D entities.
pub trait Transform2d: Sized {
    /// Rotate counter-clockwise by `angle` radians around `center`.
    fn rotate_around(&self, center: Point2d, angle: f64) -> Self;

    fn translate_by(&self, displacement: Vec2) -> Self;

    /// Reflect across `axis`.
    fn mirror_across(&self, axis: &Axis2d) -> Self;
}

pub trait Scale2d: Sized {
    fn scale_about(&self, center: Point2d, scale: f64) -> Self;
}

/// Orthogonal projection onto an axis or plane. Idempotent.
pub trait ProjectOnto<Target> {
    type Output;

    fn project_onto(&self, target: &Target) -> Self::Output;
}

/// Rodrigues' rotation of `v` about the unit `axis` through the origin.
pub(crate) fn rotate_vector(v: &Vec3, axis: &Direction3d, angle: f64) -> Vec3 {
    let k = axis.to_vec3();
    let (s, c) = angle.sin_cos();
    *v * c + k.cross(v) * s + k * (k.dot(v) * (1.0 - c))
}

// ── 3D primitives ──────────────────────────────────────────────────────────

impl Transform3d for Vec3 {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        rotate_vector(self, &axis.direction, angle)
    }

    fn translate_by(&self, _displacement: Vec3) -> Self {
        *self
    }

    fn mirror_across(&self, plane: &Plane3d) -> Self {
        self.reflect(&plane.normal_direction)
    }
}

impl Scale3d for Vec3 {
    fn scale_about(&self, _center: Point3d, scale: f64) -> Self {
        *self * scale
    }
}

impl Transform3d for Point3d {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        let offset = *self - axis.origin_point;
        axis.origin_point + rotate_vector(&offset, &axis.direction, angle)
    }

    fn translate_by(&self, displacement: Vec3) -> Self {
        *self + displacement
    }

    fn mirror_across(&self, plane: &Plane3d) -> Self {
        let offset = *self - plane.origin_point;
        plane.origin_point + offset.reflect(&plane.normal_direction)
    }
}

impl Scale3d for Point3d {
    fn scale_about(&self, center: Point3d, scale: f64) -> Self {
        center + (*self - center) * scale
    }
}

impl Transform3d for Direction3d {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        Direction3d::from_unit_vector_unchecked(rotate_vector(&self.to_vec3(), &axis.direction, angle))
    }

    fn translate_by(&self, _displacement: Vec3) -> Self {
        *self
    }

    fn mirror_across(&self, plane: &Plane3d) -> Self {
        Direction3d::from_unit_vector_unchecked(self.to_vec3().reflect(&plane.normal_direction))
    }
}

impl ProjectOnto<Axis3d> for Point3d {
    type Output = Point3d;

    fn project_onto(&self, axis: &Axis3d) -> Point3d {
        Point3d::along(axis, self.signed_distance_along(axis))
    }
}

impl ProjectOnto<Plane3d> for Point3d {
    type Output = Point3d;

    fn project_onto(&self, plane: &Plane3d) -> Point3d {
        *self - plane.normal_direction.to_vec3() * self.signed_distance_from(plane)
    }
}

impl ProjectOnto<Axis3d> for Vec3 {
    type Output = Vec3;

    fn project_onto(&self, axis: &Axis3d) -> Vec3 {
        self.project_onto_direction(&axis.direction)
    }
}

impl ProjectOnto<Plane3d> for Vec3 {
    type Output = Vec3;

    fn project_onto(&self, plane: &Plane3d) -> Vec3 {
        *self - self.project_onto_direction(&plane.normal_direction)
    }
}

/// Fails with `ZeroVector` when the direction is (nearly) the plane normal.
impl ProjectOnto<Plane3d> for Direction3d {
    type Output = Result<Direction3d>;

    fn project_onto(&self, plane: &Plane3d) -> Result<Direction3d> {
        self.to_vec3().project_onto(plane).normalize()
    }
}

// ── 2D primitives ──────────────────────────────────────────────────────────

impl Transform2d for Vec2 {
    fn rotate_around(&self, _center: Point2d, angle: f64) -> Self {
        self.rotate_by(angle)
    }

    fn translate_by(&self, _displacement: Vec2) -> Self {
        *self
    }

    fn mirror_across(&self, axis: &Axis2d) -> Self {
        self.reflect_across(&axis.direction)
    }
}

impl Scale2d for Vec2 {
    fn scale_about(&self, _center: Point2d, scale: f64) -> Self {
        *self * scale
    }
}

impl Transform2d for Point2d {
    fn rotate_around(&self, center: Point2d, angle: f64) -> Self {
        center + (*self - center).rotate_by(angle)
    }

    fn translate_by(&self, displacement: Vec2) -> Self {
        *self + displacement
    }

    fn mirror_across(&self, axis: &Axis2d) -> Self {
        axis.origin_point + (*self - axis.origin_point).reflect_across(&axis.direction)
    }
}

impl Scale2d for Point2d {
    fn scale_about(&self, center: Point2d, scale: f64) -> Self {
        center + (*self - center) * scale
    }
}

impl Transform2d for Direction2d {
    fn rotate_around(&self, _center: Point2d, angle: f64) -> Self {
        self.rotate_by(angle)
    }

    fn translate_by(&self, _displacement: Vec2) -> Self {
        *self
    }

    fn mirror_across(&self, axis: &Axis2d) -> Self {
        Direction2d::from_unit_vector_unchecked(self.to_vec2().reflect_across(&axis.direction))
    }
}

impl ProjectOnto<Axis2d> for Point2d {
    type Output = Point2d;

    fn project_onto(&self, axis: &Axis2d) -> Point2d {
        Point2d::along(axis, self.signed_distance_along(axis))
    }
}

impl ProjectOnto<Axis2d> for Vec2 {
    type Output = Vec2;

    fn project_onto(&self, axis: &Axis2d) -> Vec2 {
        self.project_onto_direction(&axis.direction)
    }
}
