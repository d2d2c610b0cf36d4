//! Conversion between global coordinates and the local coordinates of a
//! frame or sketch plane.
//!
//! `place_in` inverts `relative_to` exactly (up to rounding) for every
//! frame and every entity. `project_into` drops the out-of-plane component
//! and is only inverted by `place_onto` for entities already lying in the
//! sketch plane.

use super::direction::{Direction2d, Direction3d};
use super::frame::{Frame2d, Frame3d};
use super::plane::SketchPlane3d;
use super::point::{Point2d, Point3d};
use super::vector::{Vec2, Vec3};
use crate::error::Result;

/// Re-expression in and out of a [`Frame3d`].
pub trait Placement3d: Sized {
    /// Express a globally defined entity in `frame`'s local coordinates.
    fn relative_to(&self, frame: &Frame3d) -> Self;

    /// Take an entity defined in `frame`'s local coordinates back to global
    /// coordinates.
    fn place_in(&self, frame: &Frame3d) -> Self;
}

/// Re-expression in and out of a [`Frame2d`].
pub trait Placement2d: Sized {
    fn relative_to(&self, frame: &Frame2d) -> Self;

    fn place_in(&self, frame: &Frame2d) -> Self;
}

/// Lossy 3D to 2D conversion: project onto the sketch plane, then express
/// in its 2D basis.
pub trait ProjectInto {
    type Output;

    fn project_into(&self, sketch_plane: &SketchPlane3d) -> Self::Output;
}

/// 2D to 3D embedding in a sketch plane.
pub trait PlaceOnto {
    type Output;

    fn place_onto(&self, sketch_plane: &SketchPlane3d) -> Self::Output;
}

// ── 3D frames ──────────────────────────────────────────────────────────────

impl Placement3d for Vec3 {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        Vec3::new(
            self.component_in(&frame.x_direction),
            self.component_in(&frame.y_direction),
            self.component_in(&frame.z_direction),
        )
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        frame.x_direction.to_vec3() * self.x
            + frame.y_direction.to_vec3() * self.y
            + frame.z_direction.to_vec3() * self.z
    }
}

impl Placement3d for Point3d {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        let local = (*self - frame.origin_point).relative_to(frame);
        Point3d::new(local.x, local.y, local.z)
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        frame.origin_point + self.to_vec3().place_in(frame)
    }
}

// Orthonormal re-expression preserves length, so the results stay unit.
impl Placement3d for Direction3d {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        Direction3d::from_unit_vector_unchecked(self.to_vec3().relative_to(frame))
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        Direction3d::from_unit_vector_unchecked(self.to_vec3().place_in(frame))
    }
}

// ── 2D frames ──────────────────────────────────────────────────────────────

impl Placement2d for Vec2 {
    fn relative_to(&self, frame: &Frame2d) -> Self {
        Vec2::new(
            self.component_in(&frame.x_direction),
            self.component_in(&frame.y_direction),
        )
    }

    fn place_in(&self, frame: &Frame2d) -> Self {
        frame.x_direction.to_vec2() * self.x + frame.y_direction.to_vec2() * self.y
    }
}

impl Placement2d for Point2d {
    fn relative_to(&self, frame: &Frame2d) -> Self {
        let local = (*self - frame.origin_point).relative_to(frame);
        Point2d::new(local.x, local.y)
    }

    fn place_in(&self, frame: &Frame2d) -> Self {
        frame.origin_point + self.to_vec2().place_in(frame)
    }
}

impl Placement2d for Direction2d {
    fn relative_to(&self, frame: &Frame2d) -> Self {
        Direction2d::from_unit_vector_unchecked(self.to_vec2().relative_to(frame))
    }

    fn place_in(&self, frame: &Frame2d) -> Self {
        Direction2d::from_unit_vector_unchecked(self.to_vec2().place_in(frame))
    }
}

// ── Sketch planes ──────────────────────────────────────────────────────────

impl ProjectInto for Vec3 {
    type Output = Vec2;

    fn project_into(&self, sketch_plane: &SketchPlane3d) -> Vec2 {
        Vec2::new(
            self.component_in(&sketch_plane.x_direction),
            self.component_in(&sketch_plane.y_direction),
        )
    }
}

impl ProjectInto for Point3d {
    type Output = Point2d;

    fn project_into(&self, sketch_plane: &SketchPlane3d) -> Point2d {
        let local = (*self - sketch_plane.origin_point).project_into(sketch_plane);
        Point2d::new(local.x, local.y)
    }
}

/// Fails with `ZeroVector` when the direction is (nearly) normal to the
/// sketch plane.
impl ProjectInto for Direction3d {
    type Output = Result<Direction2d>;

    fn project_into(&self, sketch_plane: &SketchPlane3d) -> Result<Direction2d> {
        self.to_vec3().project_into(sketch_plane).normalize()
    }
}

impl PlaceOnto for Vec2 {
    type Output = Vec3;

    fn place_onto(&self, sketch_plane: &SketchPlane3d) -> Vec3 {
        sketch_plane.x_direction.to_vec3() * self.x + sketch_plane.y_direction.to_vec3() * self.y
    }
}

impl PlaceOnto for Point2d {
    type Output = Point3d;

    fn place_onto(&self, sketch_plane: &SketchPlane3d) -> Point3d {
        sketch_plane.origin_point + self.to_vec2().place_onto(sketch_plane)
    }
}

impl PlaceOnto for Direction2d {
    type Output = Direction3d;

    fn place_onto(&self, sketch_plane: &SketchPlane3d) -> Direction3d {
        Direction3d::from_unit_vector_unchecked(self.to_vec2().place_onto(sketch_plane))
    }
}
