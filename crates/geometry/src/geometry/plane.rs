use serde::{Deserialize, Serialize};

use super::axis::Axis3d;
use super::conversion::Placement3d;
use super::direction::Direction3d;
use super::frame::Frame3d;
use super::point::Point3d;
use super::transform::{Scale3d, Transform3d};
use super::vector::Vec3;

/// Unit normal of the basis `(x, y)`. The basis must be orthonormal.
fn basis_normal(x_direction: &Direction3d, y_direction: &Direction3d) -> Direction3d {
    Direction3d::from_unit_vector_unchecked(x_direction.cross(y_direction))
}

/// An oriented plane with an in-plane basis; `normal = x × y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane3d {
    pub origin_point: Point3d,
    pub x_direction: Direction3d,
    pub y_direction: Direction3d,
    pub normal_direction: Direction3d,
}

impl Plane3d {
    pub const fn xy() -> Self {
        Self {
            origin_point: Point3d::ORIGIN,
            x_direction: Direction3d::X,
            y_direction: Direction3d::Y,
            normal_direction: Direction3d::Z,
        }
    }

    pub const fn yz() -> Self {
        Self {
            origin_point: Point3d::ORIGIN,
            x_direction: Direction3d::Y,
            y_direction: Direction3d::Z,
            normal_direction: Direction3d::X,
        }
    }

    pub const fn zx() -> Self {
        Self {
            origin_point: Point3d::ORIGIN,
            x_direction: Direction3d::Z,
            y_direction: Direction3d::X,
            normal_direction: Direction3d::Y,
        }
    }

    /// Plane through `origin_point` with the given normal. The in-plane x
    /// direction follows [`Direction3d::perpendicular`]; `y = normal × x`.
    pub fn through(origin_point: Point3d, normal_direction: Direction3d) -> Self {
        let x_direction = normal_direction.perpendicular();
        let y_direction = basis_normal(&normal_direction, &x_direction);
        Self {
            origin_point,
            x_direction,
            y_direction,
            normal_direction,
        }
    }

    /// Caller guarantees `x` and `y` are perpendicular.
    pub fn with_x_and_y_unchecked(
        origin_point: Point3d,
        x_direction: Direction3d,
        y_direction: Direction3d,
    ) -> Self {
        Self {
            origin_point,
            x_direction,
            y_direction,
            normal_direction: basis_normal(&x_direction, &y_direction),
        }
    }

    pub fn normal_axis(&self) -> Axis3d {
        Axis3d::new(self.origin_point, self.normal_direction)
    }

    /// Opposite orientation. Reverses y along with the normal so the basis
    /// stays right-handed.
    pub fn flip(&self) -> Self {
        Self {
            y_direction: self.y_direction.reverse(),
            normal_direction: self.normal_direction.reverse(),
            ..*self
        }
    }

    /// Parallel plane shifted `distance` along the normal.
    pub fn offset_by(&self, distance: f64) -> Self {
        self.move_to(self.origin_point + self.normal_direction.to_vec3() * distance)
    }

    pub fn move_to(&self, origin_point: Point3d) -> Self {
        Self {
            origin_point,
            ..*self
        }
    }
}

impl Default for Plane3d {
    fn default() -> Self {
        Self::xy()
    }
}

impl Transform3d for Plane3d {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        Self {
            origin_point: self.origin_point.rotate_around(axis, angle),
            x_direction: self.x_direction.rotate_around(axis, angle),
            y_direction: self.y_direction.rotate_around(axis, angle),
            normal_direction: self.normal_direction.rotate_around(axis, angle),
        }
    }

    fn translate_by(&self, displacement: Vec3) -> Self {
        self.move_to(self.origin_point.translate_by(displacement))
    }

    // The mirrored basis is left-handed; the normal is rebuilt from it so
    // `normal = x × y` still holds.
    fn mirror_across(&self, plane: &Plane3d) -> Self {
        Self::with_x_and_y_unchecked(
            self.origin_point.mirror_across(plane),
            self.x_direction.mirror_across(plane),
            self.y_direction.mirror_across(plane),
        )
    }
}

impl Scale3d for Plane3d {
    fn scale_about(&self, center: Point3d, scale: f64) -> Self {
        Self::with_x_and_y_unchecked(
            self.origin_point.scale_about(center, scale),
            self.x_direction.oriented_by(scale),
            self.y_direction.oriented_by(scale),
        )
    }
}

impl Placement3d for Plane3d {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        Self::with_x_and_y_unchecked(
            self.origin_point.relative_to(frame),
            self.x_direction.relative_to(frame),
            self.y_direction.relative_to(frame),
        )
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        Self::with_x_and_y_unchecked(
            self.origin_point.place_in(frame),
            self.x_direction.place_in(frame),
            self.y_direction.place_in(frame),
        )
    }
}

/// A plane carrying a 2D coordinate system, used to move between 2D sketch
/// coordinates and 3D space. The normal is not stored; it is always `x × y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPlane3d {
    pub origin_point: Point3d,
    pub x_direction: Direction3d,
    pub y_direction: Direction3d,
}

impl SketchPlane3d {
    const fn global(x_direction: Direction3d, y_direction: Direction3d) -> Self {
        Self::new_unchecked(Point3d::ORIGIN, x_direction, y_direction)
    }

    pub const fn xy() -> Self {
        Self::global(Direction3d::X, Direction3d::Y)
    }

    pub const fn yx() -> Self {
        Self::global(Direction3d::Y, Direction3d::X)
    }

    pub const fn yz() -> Self {
        Self::global(Direction3d::Y, Direction3d::Z)
    }

    pub const fn zy() -> Self {
        Self::global(Direction3d::Z, Direction3d::Y)
    }

    pub const fn zx() -> Self {
        Self::global(Direction3d::Z, Direction3d::X)
    }

    pub const fn xz() -> Self {
        Self::global(Direction3d::X, Direction3d::Z)
    }

    /// Caller guarantees `x` and `y` are perpendicular.
    pub const fn new_unchecked(
        origin_point: Point3d,
        x_direction: Direction3d,
        y_direction: Direction3d,
    ) -> Self {
        Self {
            origin_point,
            x_direction,
            y_direction,
        }
    }

    pub fn from_plane(plane: &Plane3d) -> Self {
        Self::new_unchecked(plane.origin_point, plane.x_direction, plane.y_direction)
    }

    pub fn to_plane(&self) -> Plane3d {
        Plane3d::with_x_and_y_unchecked(self.origin_point, self.x_direction, self.y_direction)
    }

    pub fn normal_direction(&self) -> Direction3d {
        basis_normal(&self.x_direction, &self.y_direction)
    }

    pub fn normal_axis(&self) -> Axis3d {
        Axis3d::new(self.origin_point, self.normal_direction())
    }

    pub fn x_axis(&self) -> Axis3d {
        Axis3d::new(self.origin_point, self.x_direction)
    }

    pub fn y_axis(&self) -> Axis3d {
        Axis3d::new(self.origin_point, self.y_direction)
    }

    pub fn move_to(&self, origin_point: Point3d) -> Self {
        Self {
            origin_point,
            ..*self
        }
    }

    /// Reversing one in-plane direction also reverses the derived normal.
    pub fn flip_x(&self) -> Self {
        Self {
            x_direction: self.x_direction.reverse(),
            ..*self
        }
    }

    pub fn flip_y(&self) -> Self {
        Self {
            y_direction: self.y_direction.reverse(),
            ..*self
        }
    }
}

impl Default for SketchPlane3d {
    fn default() -> Self {
        Self::xy()
    }
}

impl From<Plane3d> for SketchPlane3d {
    fn from(plane: Plane3d) -> Self {
        Self::from_plane(&plane)
    }
}

impl Transform3d for SketchPlane3d {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        Self::new_unchecked(
            self.origin_point.rotate_around(axis, angle),
            self.x_direction.rotate_around(axis, angle),
            self.y_direction.rotate_around(axis, angle),
        )
    }

    fn translate_by(&self, displacement: Vec3) -> Self {
        self.move_to(self.origin_point.translate_by(displacement))
    }

    fn mirror_across(&self, plane: &Plane3d) -> Self {
        Self::new_unchecked(
            self.origin_point.mirror_across(plane),
            self.x_direction.mirror_across(plane),
            self.y_direction.mirror_across(plane),
        )
    }
}

impl Scale3d for SketchPlane3d {
    fn scale_about(&self, center: Point3d, scale: f64) -> Self {
        Self::new_unchecked(
            self.origin_point.scale_about(center, scale),
            self.x_direction.oriented_by(scale),
            self.y_direction.oriented_by(scale),
        )
    }
}

impl Placement3d for SketchPlane3d {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        Self::new_unchecked(
            self.origin_point.relative_to(frame),
            self.x_direction.relative_to(frame),
            self.y_direction.relative_to(frame),
        )
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        Self::new_unchecked(
            self.origin_point.place_in(frame),
            self.x_direction.place_in(frame),
            self.y_direction.place_in(frame),
        )
    }
}
