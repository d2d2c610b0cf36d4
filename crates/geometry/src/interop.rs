//! Conversions to and from `nalgebra` types.
//!
//! Vectors and points convert losslessly both ways. Directions convert to
//! `Unit<_>` directly and come back through normalization, which can fail.

use nalgebra::{Matrix3, Matrix4, Point2, Point3, Unit, Vector2, Vector3};

use crate::error::{GeometryError, Result};
use crate::geometry::direction::{Direction2d, Direction3d};
use crate::geometry::frame::{Frame2d, Frame3d};
use crate::geometry::point::{Point2d, Point3d};
use crate::geometry::vector::{Vec2, Vec3};

impl From<Vec3> for Vector3<f64> {
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Point3d> for Point3<f64> {
    fn from(p: Point3d) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

impl From<Point3<f64>> for Point3d {
    fn from(p: Point3<f64>) -> Self {
        Point3d::new(p.x, p.y, p.z)
    }
}

impl From<Vec2> for Vector2<f64> {
    fn from(v: Vec2) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Vector2<f64>> for Vec2 {
    fn from(v: Vector2<f64>) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Point2d> for Point2<f64> {
    fn from(p: Point2d) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<Point2<f64>> for Point2d {
    fn from(p: Point2<f64>) -> Self {
        Point2d::new(p.x, p.y)
    }
}

impl From<Direction3d> for Unit<Vector3<f64>> {
    fn from(d: Direction3d) -> Self {
        Unit::new_unchecked(d.to_vec3().into())
    }
}

impl From<Direction2d> for Unit<Vector2<f64>> {
    fn from(d: Direction2d) -> Self {
        Unit::new_unchecked(d.to_vec2().into())
    }
}

impl TryFrom<Vector3<f64>> for Direction3d {
    type Error = GeometryError;

    fn try_from(v: Vector3<f64>) -> Result<Self> {
        Vec3::from(v).normalize()
    }
}

impl TryFrom<Vector2<f64>> for Direction2d {
    type Error = GeometryError;

    fn try_from(v: Vector2<f64>) -> Result<Self> {
        Vec2::from(v).normalize()
    }
}

impl Frame3d {
    /// Homogeneous matrix taking local coordinates to global ones.
    ///
    /// Columns are the x, y and z directions and the origin point, so
    /// applying it to a point or vector matches `place_in`.
    pub fn placement_matrix(&self) -> Matrix4<f64> {
        let (x, y, z) = (self.x_direction, self.y_direction, self.z_direction);
        let o = self.origin_point;
        #[rustfmt::skip]
        let m = Matrix4::new(
            x.x_component(), y.x_component(), z.x_component(), o.x,
            x.y_component(), y.y_component(), z.y_component(), o.y,
            x.z_component(), y.z_component(), z.z_component(), o.z,
            0.0,             0.0,             0.0,             1.0,
        );
        m
    }
}

impl Frame2d {
    pub fn placement_matrix(&self) -> Matrix3<f64> {
        let (x, y) = (self.x_direction, self.y_direction);
        let o = self.origin_point;
        #[rustfmt::skip]
        let m = Matrix3::new(
            x.x_component(), y.x_component(), o.x,
            x.y_component(), y.y_component(), o.y,
            0.0,             0.0,             1.0,
        );
        m
    }
}
