use serde::{Deserialize, Serialize};

use super::conversion::{PlaceOnto, Placement2d, Placement3d, ProjectInto};
use super::direction::{Direction2d, Direction3d};
use super::frame::{Frame2d, Frame3d};
use super::plane::{Plane3d, SketchPlane3d};
use super::point::{Point2d, Point3d};
use super::transform::{ProjectOnto, Scale2d, Scale3d, Transform2d, Transform3d};
use super::vector::{Vec2, Vec3};
use crate::error::Result;

/// An oriented line in 3D space: an origin point and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis3d {
    pub origin_point: Point3d,
    pub direction: Direction3d,
}

impl Axis3d {
    pub const fn new(origin_point: Point3d, direction: Direction3d) -> Self {
        Self {
            origin_point,
            direction,
        }
    }

    pub const fn x() -> Self {
        Self::new(Point3d::ORIGIN, Direction3d::X)
    }

    pub const fn y() -> Self {
        Self::new(Point3d::ORIGIN, Direction3d::Y)
    }

    pub const fn z() -> Self {
        Self::new(Point3d::ORIGIN, Direction3d::Z)
    }

    /// Axis through `a` pointing towards `b`. Fails if the points coincide.
    pub fn through_points(a: Point3d, b: Point3d) -> Result<Self> {
        Ok(Self::new(a, (b - a).normalize()?))
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.origin_point, self.direction.reverse())
    }

    pub fn move_to(&self, origin_point: Point3d) -> Self {
        Self::new(origin_point, self.direction)
    }

    /// An axis through the same origin, perpendicular to this one.
    ///
    /// In 3D the perpendicular is not unique; the direction follows the
    /// smallest-component convention of [`Direction3d::perpendicular`].
    pub fn perpendicular(&self) -> Self {
        Self::new(self.origin_point, self.direction.perpendicular())
    }
}

impl Transform3d for Axis3d {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        Self::new(
            self.origin_point.rotate_around(axis, angle),
            self.direction.rotate_around(axis, angle),
        )
    }

    fn translate_by(&self, displacement: Vec3) -> Self {
        self.move_to(self.origin_point.translate_by(displacement))
    }

    fn mirror_across(&self, plane: &Plane3d) -> Self {
        Self::new(
            self.origin_point.mirror_across(plane),
            self.direction.mirror_across(plane),
        )
    }
}

impl Scale3d for Axis3d {
    fn scale_about(&self, center: Point3d, scale: f64) -> Self {
        Self::new(
            self.origin_point.scale_about(center, scale),
            self.direction.oriented_by(scale),
        )
    }
}

/// Fails with `ZeroVector` when the axis is (nearly) normal to the plane.
impl ProjectOnto<Plane3d> for Axis3d {
    type Output = Result<Axis3d>;

    fn project_onto(&self, plane: &Plane3d) -> Result<Axis3d> {
        Ok(Self::new(
            self.origin_point.project_onto(plane),
            self.direction.project_onto(plane)?,
        ))
    }
}

impl Placement3d for Axis3d {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        Self::new(
            self.origin_point.relative_to(frame),
            self.direction.relative_to(frame),
        )
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        Self::new(
            self.origin_point.place_in(frame),
            self.direction.place_in(frame),
        )
    }
}

impl ProjectInto for Axis3d {
    type Output = Result<Axis2d>;

    fn project_into(&self, sketch_plane: &SketchPlane3d) -> Result<Axis2d> {
        Ok(Axis2d::new(
            self.origin_point.project_into(sketch_plane),
            self.direction.project_into(sketch_plane)?,
        ))
    }
}

/// An oriented line in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis2d {
    pub origin_point: Point2d,
    pub direction: Direction2d,
}

impl Axis2d {
    pub const fn new(origin_point: Point2d, direction: Direction2d) -> Self {
        Self {
            origin_point,
            direction,
        }
    }

    pub const fn x() -> Self {
        Self::new(Point2d::ORIGIN, Direction2d::X)
    }

    pub const fn y() -> Self {
        Self::new(Point2d::ORIGIN, Direction2d::Y)
    }

    pub fn through_points(a: Point2d, b: Point2d) -> Result<Self> {
        Ok(Self::new(a, (b - a).normalize()?))
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.origin_point, self.direction.reverse())
    }

    pub fn move_to(&self, origin_point: Point2d) -> Self {
        Self::new(origin_point, self.direction)
    }

    /// The axis through the same origin, rotated counter-clockwise by 90 degrees.
    pub fn perpendicular(&self) -> Self {
        Self::new(self.origin_point, self.direction.perpendicular())
    }
}

impl Transform2d for Axis2d {
    fn rotate_around(&self, center: Point2d, angle: f64) -> Self {
        Self::new(
            self.origin_point.rotate_around(center, angle),
            self.direction.rotate_around(center, angle),
        )
    }

    fn translate_by(&self, displacement: Vec2) -> Self {
        self.move_to(self.origin_point.translate_by(displacement))
    }

    fn mirror_across(&self, axis: &Axis2d) -> Self {
        Self::new(
            self.origin_point.mirror_across(axis),
            self.direction.mirror_across(axis),
        )
    }
}

impl Scale2d for Axis2d {
    fn scale_about(&self, center: Point2d, scale: f64) -> Self {
        Self::new(
            self.origin_point.scale_about(center, scale),
            self.direction.oriented_by(scale),
        )
    }
}

impl Placement2d for Axis2d {
    fn relative_to(&self, frame: &Frame2d) -> Self {
        Self::new(
            self.origin_point.relative_to(frame),
            self.direction.relative_to(frame),
        )
    }

    fn place_in(&self, frame: &Frame2d) -> Self {
        Self::new(
            self.origin_point.place_in(frame),
            self.direction.place_in(frame),
        )
    }
}

impl PlaceOnto for Axis2d {
    type Output = Axis3d;

    fn place_onto(&self, sketch_plane: &SketchPlane3d) -> Axis3d {
        Axis3d::new(
            self.origin_point.place_onto(sketch_plane),
            self.direction.place_onto(sketch_plane),
        )
    }
}
