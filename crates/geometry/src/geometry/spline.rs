//! Quadratic Bézier splines.
//!
//! Evaluation uses de Casteljau's construction. At parameter `t`:
//!
//! ```text
//! q1 = lerp(p1, p2, t)
//! q2 = lerp(p2, p3, t)
//! r  = lerp(q1, q2, t)      point on the curve
//! r' = 2 (q2 - q1)          first derivative
//! ```
//!
//! and `split_at(t)` reuses the same intermediates: `(p1, q1, r)` and
//! `(r, q2, p3)`. Any real `t` is accepted; values outside `[0, 1]`
//! extrapolate the underlying parabola.
//!
//! Every affine operator is lifted to splines by applying it to the three
//! control points through [`QuadraticSpline3d::map_control_points`]. Bézier
//! curves are affine invariant, so the result is exact.

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use super::axis::{Axis2d, Axis3d};
use super::bounding_box::{BoundingBox2d, BoundingBox3d};
use super::conversion::{PlaceOnto, Placement2d, Placement3d, ProjectInto};
use super::frame::{Frame2d, Frame3d};
use super::plane::{Plane3d, SketchPlane3d};
use super::point::{Point2d, Point3d};
use super::transform::{ProjectOnto, Scale2d, Scale3d, Transform2d, Transform3d};
use super::vector::{Vec2, Vec3};

/// Value of the extremum of the scalar quadratic with control values
/// `(a, b, c)`, if it lies strictly inside `(0, 1)`.
fn interior_extremum(a: f64, b: f64, c: f64) -> Option<f64> {
    let denominator = a - 2.0 * b + c;
    if denominator == 0.0 {
        return None;
    }
    let t = (a - b) / denominator;
    if t <= 0.0 || t >= 1.0 {
        return None;
    }
    let s = 1.0 - t;
    Some(s * s * a + 2.0 * s * t * b + t * t * c)
}

/// Range `(min, max)` of one coordinate over `t ∈ [0, 1]`.
fn coordinate_range(a: f64, b: f64, c: f64) -> (f64, f64) {
    let (mut lo, mut hi) = (a.min(c), a.max(c));
    if let Some(v) = interior_extremum(a, b, c) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticSpline3d {
    p1: Point3d,
    p2: Point3d,
    p3: Point3d,
}

impl QuadraticSpline3d {
    /// Spline from three control points. Coincident or collinear control
    /// points are valid.
    pub const fn new(p1: Point3d, p2: Point3d, p3: Point3d) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn control_points(&self) -> (Point3d, Point3d, Point3d) {
        (self.p1, self.p2, self.p3)
    }

    pub fn first_control_point(&self) -> Point3d {
        self.p1
    }

    pub fn second_control_point(&self) -> Point3d {
        self.p2
    }

    pub fn third_control_point(&self) -> Point3d {
        self.p3
    }

    pub fn start_point(&self) -> Point3d {
        self.p1
    }

    pub fn end_point(&self) -> Point3d {
        self.p3
    }

    fn intermediate_points(&self, t: f64) -> (Point3d, Point3d) {
        (
            Point3d::interpolate_from(&self.p1, &self.p2, t),
            Point3d::interpolate_from(&self.p2, &self.p3, t),
        )
    }

    pub fn point_on(&self, t: f64) -> Point3d {
        let (q1, q2) = self.intermediate_points(t);
        Point3d::interpolate_from(&q1, &q2, t)
    }

    pub fn derivative(&self, t: f64) -> Vec3 {
        let v1 = self.p2 - self.p1;
        let v2 = self.p3 - self.p2;
        Vec3::interpolate_from(&v1, &v2, t) * 2.0
    }

    /// Constant for a quadratic.
    pub fn second_derivative(&self) -> Vec3 {
        ((self.p3 - self.p2) - (self.p2 - self.p1)) * 2.0
    }

    pub fn start_derivative(&self) -> Vec3 {
        (self.p2 - self.p1) * 2.0
    }

    pub fn end_derivative(&self) -> Vec3 {
        (self.p3 - self.p2) * 2.0
    }

    /// Point and first derivative at `t`, sharing the intermediate points.
    pub fn evaluate(&self, t: f64) -> (Point3d, Vec3) {
        let (q1, q2) = self.intermediate_points(t);
        (Point3d::interpolate_from(&q1, &q2, t), (q2 - q1) * 2.0)
    }

    /// Split into `[0, t]` and `[t, 1]`, each reparameterized to `[0, 1]`.
    #[instrument(level = "trace", skip(self))]
    pub fn split_at(&self, t: f64) -> (Self, Self) {
        let (q1, q2) = self.intermediate_points(t);
        let r = Point3d::interpolate_from(&q1, &q2, t);
        trace!(split_point = ?[r.x, r.y, r.z], "split quadratic spline");
        (Self::new(self.p1, q1, r), Self::new(r, q2, self.p3))
    }

    pub fn bisect(&self) -> (Self, Self) {
        self.split_at(0.5)
    }

    /// Same curve traversed in the opposite direction.
    pub fn reverse(&self) -> Self {
        Self::new(self.p3, self.p2, self.p1)
    }

    /// Apply `f` to each control point.
    pub fn map_control_points<F>(&self, f: F) -> Self
    where
        F: Fn(&Point3d) -> Point3d,
    {
        Self::new(f(&self.p1), f(&self.p2), f(&self.p3))
    }

    /// Tight axis-aligned box of the curve over `t ∈ [0, 1]`.
    pub fn bounding_box(&self) -> BoundingBox3d {
        let (x0, x1) = coordinate_range(self.p1.x, self.p2.x, self.p3.x);
        let (y0, y1) = coordinate_range(self.p1.y, self.p2.y, self.p3.y);
        let (z0, z1) = coordinate_range(self.p1.z, self.p2.z, self.p3.z);
        BoundingBox3d::new(Point3d::new(x0, y0, z0), Point3d::new(x1, y1, z1))
    }
}

impl AbsDiffEq for QuadraticSpline3d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.p1.abs_diff_eq(&other.p1, epsilon)
            && self.p2.abs_diff_eq(&other.p2, epsilon)
            && self.p3.abs_diff_eq(&other.p3, epsilon)
    }
}

impl Transform3d for QuadraticSpline3d {
    fn rotate_around(&self, axis: &Axis3d, angle: f64) -> Self {
        self.map_control_points(|p| p.rotate_around(axis, angle))
    }

    fn translate_by(&self, displacement: Vec3) -> Self {
        self.map_control_points(|p| p.translate_by(displacement))
    }

    fn mirror_across(&self, plane: &Plane3d) -> Self {
        self.map_control_points(|p| p.mirror_across(plane))
    }
}

impl Scale3d for QuadraticSpline3d {
    fn scale_about(&self, center: Point3d, scale: f64) -> Self {
        self.map_control_points(|p| p.scale_about(center, scale))
    }
}

impl ProjectOnto<Axis3d> for QuadraticSpline3d {
    type Output = QuadraticSpline3d;

    fn project_onto(&self, axis: &Axis3d) -> Self {
        self.map_control_points(|p| p.project_onto(axis))
    }
}

impl ProjectOnto<Plane3d> for QuadraticSpline3d {
    type Output = QuadraticSpline3d;

    fn project_onto(&self, plane: &Plane3d) -> Self {
        self.map_control_points(|p| p.project_onto(plane))
    }
}

impl Placement3d for QuadraticSpline3d {
    fn relative_to(&self, frame: &Frame3d) -> Self {
        self.map_control_points(|p| p.relative_to(frame))
    }

    fn place_in(&self, frame: &Frame3d) -> Self {
        self.map_control_points(|p| p.place_in(frame))
    }
}

impl ProjectInto for QuadraticSpline3d {
    type Output = QuadraticSpline2d;

    fn project_into(&self, sketch_plane: &SketchPlane3d) -> QuadraticSpline2d {
        QuadraticSpline2d::new(
            self.p1.project_into(sketch_plane),
            self.p2.project_into(sketch_plane),
            self.p3.project_into(sketch_plane),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticSpline2d {
    p1: Point2d,
    p2: Point2d,
    p3: Point2d,
}

impl QuadraticSpline2d {
    pub const fn new(p1: Point2d, p2: Point2d, p3: Point2d) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn control_points(&self) -> (Point2d, Point2d, Point2d) {
        (self.p1, self.p2, self.p3)
    }

    pub fn first_control_point(&self) -> Point2d {
        self.p1
    }

    pub fn second_control_point(&self) -> Point2d {
        self.p2
    }

    pub fn third_control_point(&self) -> Point2d {
        self.p3
    }

    pub fn start_point(&self) -> Point2d {
        self.p1
    }

    pub fn end_point(&self) -> Point2d {
        self.p3
    }

    fn intermediate_points(&self, t: f64) -> (Point2d, Point2d) {
        (
            Point2d::interpolate_from(&self.p1, &self.p2, t),
            Point2d::interpolate_from(&self.p2, &self.p3, t),
        )
    }

    pub fn point_on(&self, t: f64) -> Point2d {
        let (q1, q2) = self.intermediate_points(t);
        Point2d::interpolate_from(&q1, &q2, t)
    }

    pub fn derivative(&self, t: f64) -> Vec2 {
        let v1 = self.p2 - self.p1;
        let v2 = self.p3 - self.p2;
        Vec2::interpolate_from(&v1, &v2, t) * 2.0
    }

    pub fn second_derivative(&self) -> Vec2 {
        ((self.p3 - self.p2) - (self.p2 - self.p1)) * 2.0
    }

    pub fn start_derivative(&self) -> Vec2 {
        (self.p2 - self.p1) * 2.0
    }

    pub fn end_derivative(&self) -> Vec2 {
        (self.p3 - self.p2) * 2.0
    }

    pub fn evaluate(&self, t: f64) -> (Point2d, Vec2) {
        let (q1, q2) = self.intermediate_points(t);
        (Point2d::interpolate_from(&q1, &q2, t), (q2 - q1) * 2.0)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn split_at(&self, t: f64) -> (Self, Self) {
        let (q1, q2) = self.intermediate_points(t);
        let r = Point2d::interpolate_from(&q1, &q2, t);
        trace!(split_point = ?[r.x, r.y], "split quadratic spline");
        (Self::new(self.p1, q1, r), Self::new(r, q2, self.p3))
    }

    pub fn bisect(&self) -> (Self, Self) {
        self.split_at(0.5)
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.p3, self.p2, self.p1)
    }

    pub fn map_control_points<F>(&self, f: F) -> Self
    where
        F: Fn(&Point2d) -> Point2d,
    {
        Self::new(f(&self.p1), f(&self.p2), f(&self.p3))
    }

    pub fn bounding_box(&self) -> BoundingBox2d {
        let (x0, x1) = coordinate_range(self.p1.x, self.p2.x, self.p3.x);
        let (y0, y1) = coordinate_range(self.p1.y, self.p2.y, self.p3.y);
        BoundingBox2d::new(Point2d::new(x0, y0), Point2d::new(x1, y1))
    }
}

impl AbsDiffEq for QuadraticSpline2d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.p1.abs_diff_eq(&other.p1, epsilon)
            && self.p2.abs_diff_eq(&other.p2, epsilon)
            && self.p3.abs_diff_eq(&other.p3, epsilon)
    }
}

impl Transform2d for QuadraticSpline2d {
    fn rotate_around(&self, center: Point2d, angle: f64) -> Self {
        self.map_control_points(|p| p.rotate_around(center, angle))
    }

    fn translate_by(&self, displacement: Vec2) -> Self {
        self.map_control_points(|p| p.translate_by(displacement))
    }

    fn mirror_across(&self, axis: &Axis2d) -> Self {
        self.map_control_points(|p| p.mirror_across(axis))
    }
}

impl Scale2d for QuadraticSpline2d {
    fn scale_about(&self, center: Point2d, scale: f64) -> Self {
        self.map_control_points(|p| p.scale_about(center, scale))
    }
}

impl ProjectOnto<Axis2d> for QuadraticSpline2d {
    type Output = QuadraticSpline2d;

    fn project_onto(&self, axis: &Axis2d) -> Self {
        self.map_control_points(|p| p.project_onto(axis))
    }
}

impl Placement2d for QuadraticSpline2d {
    fn relative_to(&self, frame: &Frame2d) -> Self {
        self.map_control_points(|p| p.relative_to(frame))
    }

    fn place_in(&self, frame: &Frame2d) -> Self {
        self.map_control_points(|p| p.place_in(frame))
    }
}

impl PlaceOnto for QuadraticSpline2d {
    type Output = QuadraticSpline3d;

    fn place_onto(&self, sketch_plane: &SketchPlane3d) -> QuadraticSpline3d {
        QuadraticSpline3d::new(
            self.p1.place_onto(sketch_plane),
            self.p2.place_onto(sketch_plane),
            self.p3.place_onto(sketch_plane),
        )
    }
}
