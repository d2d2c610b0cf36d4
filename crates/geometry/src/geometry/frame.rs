//! Local coordinate systems: an origin point plus an orthonormal basis.
//!
//! Constructors that take fewer directions than the basis needs derive the
//! rest by cross product (3D) or an exact quarter turn (2D), so the basis is
//! orthonormal by construction. The `*_unchecked` constructors trust the
//! caller's basis and do not re-normalize it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::axis::{Axis2d, Axis3d};
use super::conversion::{PlaceOnto, Placement2d, Placement3d};
use super::direction::{Direction2d, Direction3d};
use super::plane::{Plane3d, SketchPlane3d};
use super::point::{Point2d, Point3d};
use super::transform::{Scale2d, Scale3d, Transform2d, Transform3d};
use super::vector::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame3d {
    pub origin_point: Point3d,
    pub x_direction: Direction3d,
    pub y_direction: Direction3d,
    pub z_direction: Direction3d,
}

impl Frame3d {
    /// The global frame.
    pub const fn xyz() -> Self {
        Self::at_point(Point3d::ORIGIN)
    }

    /// Global axes, moved to `origin_point`.
    pub const fn at_point(origin_point: Point3d) -> Self {
        Self {
            origin_point,
            x_direction: Direction3d::X,
            y_direction: Direction3d::Y,
            z_direction: Direction3d::Z,
        }
    }

    /// Caller guarantees the three directions are mutually perpendicular.
    pub const fn new_unchecked(
        origin_point: Point3d,
        x_direction: Direction3d,
        y_direction: Direction3d,
        z_direction: Direction3d,
    ) -> Self {
        Self {
            origin_point,
            x_direction,
            y_direction,
            z_direction,
        }
    }

    /// Right-handed frame with the given z direction. The x direction is
    /// picked by [`Direction3d::perpendicular`]; `y = z × x`.
    pub fn with_z_direction(origin_point: Point3d, z_direction: Direction3d) -> Self {
        let x_direction = z_direction.perpendicular();
        let y_direction = Direction3d::from_unit_vector_unchecked(z_direction.cross(&x_direction));
        trace!(?origin_point, ?z_direction, ?x_direction, "derived frame basis from z direction");
        Self::new_unchecked(origin_point, x_direction, y_direction, z_direction)
    }

    /// Right-handed frame from perpendicular x and z directions; `y = z × x`.
    /// Perpendicularity is trusted, not checked.
    pub fn from_x_and_z_unchecked(
        origin_point: Point3d,
        x_direction: Direction3d,
        z_direction: Direction3d,
    ) -> Self {
        let y_direction = Direction3d::from_unit_vector_unchecked(z_direction.cross(&x_direction));
        Self::new_unchecked(origin_point, x_direction, y_direction, z_direction)
    }

    pub fn x_axis(&self) -> Axis3d {
        Axis3d::new(self.origin_point, self.x_direction)
    }

    pub fn y_axis(&self) -> Axis3d {
        Axis3d::new(self.origin_point, self.y_direction)
    }

    pub fn z_axis(&self) -> Axis3d {
        Axis3d::new(self.origin_point, self.z_direction)
    }

    pub fn is_right_handed(&self) -> bool {
        self.x_direction
            .cross(&self.y_direction)
            .dot(&self.z_direction.to_vec3())
            > 0.0
    }

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

    pub fn flip_z(&self) -> Self {
        Self {
            z_direction: self.z_direction.reverse(),
            ..*self
        }
    }

    pub fn move_to(&self, origin_point: Point3d) -> Self {
        Self {
            origin_point,
            ..*self
        }
    }

    /// Plane spanned by the x and y directions, normal `x × y`.
    pub fn xy_plane(&self) -> Plane3d {
        Plane3d::with_x_and_y_unchecked(self.origin_point, self.x_direction, self.y_direction)
    }

    pub fn yz_plane(&self) -> Plane3d {
        Plane3d::with_x_and_y_unchecked(self.origin_point, self.y_direction, self.z_direction)
    }

    pub fn zx_plane(&self) -> Plane3d {
        Plane3d::with_x_and_y_unchecked(self.origin_point, self.z_direction, self.x_direction)
    }

    pub fn xy_sketch_plane(&self) -> SketchPlane3d {
        SketchPlane3d::new_unchecked(self.origin_point, self.x_direction, self.y_direction)
    }

    pub fn yz_sketch_plane(&self) -> SketchPlane3d {
        SketchPlane3d::new_unchecked(self.origin_point, self.y_direction, self.z_direction)
    }

    pub fn zx_sketch_plane(&self) -> SketchPlane3d {
        SketchPlane3d::new_unchecked(self.origin_point, self.z_direction, self.x_direction)
    }
}

impl Default for Frame3d {
    fn default() -> Self {
        Self::xyz()
    }
}

impl Transform3d for Frame3d {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        Self::new_unchecked(
            self.origin_point.rotate_around(axis, angle),
            self.x_direction.rotate_around(axis, angle),
            self.y_direction.rotate_around(axis, angle),
            self.z_direction.rotate_around(axis, angle),
        )
    }

    fn translate_by(&self, displacement: Vec3) -> Self {
        self.move_to(self.origin_point.translate_by(displacement))
    }

    /// Mirroring reverses handedness.
    fn mirror_across(&self, plane: &Plane3d) -> Self {
        Self::new_unchecked(
            self.origin_point.mirror_across(plane),
            self.x_direction.mirror_across(plane),
            self.y_direction.mirror_across(plane),
            self.z_direction.mirror_across(plane),
        )
    }
}

impl Scale3d for Frame3d {
    fn scale_about(&self, center: Point3d, scale: f64) -> Self {
        Self::new_unchecked(
            self.origin_point.scale_about(center, scale),
            self.x_direction.oriented_by(scale),
            self.y_direction.oriented_by(scale),
            self.z_direction.oriented_by(scale),
        )
    }
}

impl Placement3d for Frame3d {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        Self::new_unchecked(
            self.origin_point.relative_to(frame),
            self.x_direction.relative_to(frame),
            self.y_direction.relative_to(frame),
            self.z_direction.relative_to(frame),
        )
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        Self::new_unchecked(
            self.origin_point.place_in(frame),
            self.x_direction.place_in(frame),
            self.y_direction.place_in(frame),
            self.z_direction.place_in(frame),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame2d {
    pub origin_point: Point2d,
    pub x_direction: Direction2d,
    pub y_direction: Direction2d,
}

impl Frame2d {
    pub const fn xy() -> Self {
        Self::at_point(Point2d::ORIGIN)
    }

    pub const fn at_point(origin_point: Point2d) -> Self {
        Self {
            origin_point,
            x_direction: Direction2d::X,
            y_direction: Direction2d::Y,
        }
    }

    /// Right-handed frame; y is x rotated counter-clockwise by 90 degrees.
    pub fn with_x_direction(origin_point: Point2d, x_direction: Direction2d) -> Self {
        Self {
            origin_point,
            x_direction,
            y_direction: x_direction.perpendicular(),
        }
    }

    pub const fn new_unchecked(
        origin_point: Point2d,
        x_direction: Direction2d,
        y_direction: Direction2d,
    ) -> Self {
        Self {
            origin_point,
            x_direction,
            y_direction,
        }
    }

    pub fn x_axis(&self) -> Axis2d {
        Axis2d::new(self.origin_point, self.x_direction)
    }

    pub fn y_axis(&self) -> Axis2d {
        Axis2d::new(self.origin_point, self.y_direction)
    }

    pub fn is_right_handed(&self) -> bool {
        self.x_direction.cross(&self.y_direction) > 0.0
    }

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

    pub fn move_to(&self, origin_point: Point2d) -> Self {
        Self {
            origin_point,
            ..*self
        }
    }
}

impl Default for Frame2d {
    fn default() -> Self {
        Self::xy()
    }
}

impl Transform2d for Frame2d {
    fn rotate_around(&self, center: Point2d, angle: f64) -> Self {
        Self::new_unchecked(
            self.origin_point.rotate_around(center, angle),
            self.x_direction.rotate_around(center, angle),
            self.y_direction.rotate_around(center, angle),
        )
    }

    fn translate_by(&self, displacement: Vec2) -> Self {
        self.move_to(self.origin_point.translate_by(displacement))
    }

    fn mirror_across(&self, axis: &Axis2d) -> Self {
        Self::new_unchecked(
            self.origin_point.mirror_across(axis),
            self.x_direction.mirror_across(axis),
            self.y_direction.mirror_across(axis),
        )
    }
}

impl Scale2d for Frame2d {
    fn scale_about(&self, center: Point2d, scale: f64) -> Self {
        Self::new_unchecked(
            self.origin_point.scale_about(center, scale),
            self.x_direction.oriented_by(scale),
            self.y_direction.oriented_by(scale),
        )
    }
}

impl Placement2d for Frame2d {
    fn relative_to(&self, frame: &Frame2d) -> Self {
        Self::new_unchecked(
            self.origin_point.relative_to(frame),
            self.x_direction.relative_to(frame),
            self.y_direction.relative_to(frame),
        )
    }

    fn place_in(&self, frame: &Frame2d) -> Self {
        Self::new_unchecked(
            self.origin_point.place_in(frame),
            self.x_direction.place_in(frame),
            self.y_direction.place_in(frame),
        )
    }
}

/// A 2D frame placed onto a sketch plane becomes a sketch plane.
impl PlaceOnto for Frame2d {
    type Output = SketchPlane3d;

    fn place_onto(&self, sketch_plane: &SketchPlane3d) -> SketchPlane3d {
        SketchPlane3d::new_unchecked(
            self.origin_point.place_onto(sketch_plane),
            self.x_direction.place_onto(sketch_plane),
            self.y_direction.place_onto(sketch_plane),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_orthonormal(frame: &Frame3d) {
        let (x, y, z) = (frame.x_direction, frame.y_direction, frame.z_direction);
        for d in [x, y, z] {
            assert!((d.to_vec3().length() - 1.0).abs() < 1e-12);
        }
        assert!(x.dot(&y).abs() < 1e-12);
        assert!(y.dot(&z).abs() < 1e-12);
        assert!(z.dot(&x).abs() < 1e-12);
    }

    #[test]
    fn test_with_z_direction_is_right_handed_orthonormal() {
        for z in [
            Direction3d::Z,
            Direction3d::NEG_X,
            Direction3d::from_components(1.0, -2.0, 0.5).unwrap(),
        ] {
            let frame = Frame3d::with_z_direction(Point3d::new(1.0, 2.0, 3.0), z);
            assert_orthonormal(&frame);
            assert!(frame.is_right_handed());
            assert_eq!(frame.z_direction, z);
        }
    }

    #[test]
    fn test_from_x_and_z_derives_y() {
        let frame = Frame3d::from_x_and_z_unchecked(Point3d::ORIGIN, Direction3d::X, Direction3d::Z);
        assert_abs_diff_eq!(frame.y_direction, Direction3d::Y, epsilon = 1e-12);
    }

    #[test]
    fn test_flip_changes_handedness() {
        let frame = Frame3d::xyz();
        assert!(frame.is_right_handed());
        assert!(!frame.flip_x().is_right_handed());
        assert!(frame.flip_x().flip_y().is_right_handed());
        assert!(!Frame2d::xy().flip_y().is_right_handed());
    }

    #[test]
    fn test_mirror_reverses_handedness() {
        let mirrored = Frame3d::xyz().mirror_across(&Plane3d::yz());
        assert_orthonormal(&mirrored);
        assert!(!mirrored.is_right_handed());
        assert_abs_diff_eq!(mirrored.x_direction, Direction3d::NEG_X, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_rotation_keeps_basis() {
        let frame = Frame3d::at_point(Point3d::new(1.0, 0.0, 0.0)).rotate_around(&Axis3d::z(), FRAC_PI_2);
        assert_orthonormal(&frame);
        assert_abs_diff_eq!(frame.origin_point, Point3d::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(frame.x_direction, Direction3d::Y, epsilon = 1e-12);
        assert_abs_diff_eq!(frame.y_direction, Direction3d::NEG_X, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_planes_are_right_handed() {
        let frame = Frame3d::with_z_direction(Point3d::ORIGIN, Direction3d::from_components(1.0, 1.0, 1.0).unwrap());
        for plane in [frame.xy_plane(), frame.yz_plane(), frame.zx_plane()] {
            let n = plane.x_direction.cross(&plane.y_direction);
            assert_abs_diff_eq!(n, plane.normal_direction.to_vec3(), epsilon = 1e-12);
        }
        assert_abs_diff_eq!(frame.xy_plane().normal_direction, frame.z_direction, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_relative_to_itself_is_global() {
        let frame = Frame3d::with_z_direction(Point3d::new(4.0, 5.0, 6.0), Direction3d::from_components(0.0, 1.0, 1.0).unwrap());
        let local = frame.relative_to(&frame);
        assert_abs_diff_eq!(local.origin_point, Point3d::ORIGIN, epsilon = 1e-12);
        assert_abs_diff_eq!(local.x_direction, Direction3d::X, epsilon = 1e-12);
        assert_abs_diff_eq!(local.y_direction, Direction3d::Y, epsilon = 1e-12);
        assert_abs_diff_eq!(local.z_direction, Direction3d::Z, epsilon = 1e-12);
    }

    #[test]
    fn test_frame2d_with_x_direction() {
        let frame = Frame2d::with_x_direction(Point2d::new(1.0, 1.0), Direction2d::Y);
        assert!(frame.is_right_handed());
        assert_eq!(frame.y_direction, Direction2d::NEG_X);
        assert_abs_diff_eq!(frame.x_axis().direction, Direction2d::Y);
    }

    #[test]
    fn test_frame2d_place_onto_sketch_plane() {
        let frame = Frame2d::at_point(Point2d::new(2.0, 3.0));
        let sketch = frame.place_onto(&SketchPlane3d::zx());
        assert_abs_diff_eq!(sketch.origin_point, Point3d::new(3.0, 0.0, 2.0), epsilon = 1e-12);
        assert_eq!(sketch.x_direction, Direction3d::Z);
        assert_eq!(sketch.y_direction, Direction3d::X);
    }
}
