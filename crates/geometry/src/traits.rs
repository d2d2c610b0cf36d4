//! Curve abstraction shared by the 2D and 3D splines.
//!
//! The affine operator traits live next to the primitives in
//! `geometry/transform.rs` and `geometry/conversion.rs`.

use crate::geometry::point::{Point2d, Point3d};
use crate::geometry::spline::{QuadraticSpline2d, QuadraticSpline3d};
use crate::geometry::vector::{Vec2, Vec3};

/// A curve parameterized over `t ∈ [0, 1]`.
pub trait ParametricCurve {
    type Point: Copy;
    type Vector: Copy;

    /// Point at parameter `t`.
    fn point_on(&self, t: f64) -> Self::Point;

    /// First derivative at parameter `t`.
    fn derivative(&self, t: f64) -> Self::Vector;

    /// Distance between two points of the curve's space.
    fn distance(a: &Self::Point, b: &Self::Point) -> f64;

    /// Whether the curve collapses to a single point within `tolerance`.
    fn is_degenerate(&self, tolerance: f64) -> bool;

    /// Validate that a point lies on the curve at `t` within tolerance.
    fn point_on_curve(&self, point: &Self::Point, t: f64, tolerance: f64) -> bool {
        Self::distance(point, &self.point_on(t)) < tolerance
    }

    /// `n + 1` evenly spaced points from `t = 0` to `t = 1`. `n = 0` yields
    /// only the start point.
    fn sample(&self, n: usize) -> Vec<Self::Point> {
        if n == 0 {
            return vec![self.point_on(0.0)];
        }
        (0..=n)
            .map(|i| self.point_on(i as f64 / n as f64))
            .collect()
    }

    /// Polyline length through `num_samples` equal parameter steps.
    fn approximate_length(&self, num_samples: usize) -> f64 {
        self.sample(num_samples.max(1))
            .windows(2)
            .map(|w| Self::distance(&w[0], &w[1]))
            .sum()
    }
}

impl ParametricCurve for QuadraticSpline3d {
    type Point = Point3d;
    type Vector = Vec3;

    fn point_on(&self, t: f64) -> Point3d {
        QuadraticSpline3d::point_on(self, t)
    }

    fn derivative(&self, t: f64) -> Vec3 {
        QuadraticSpline3d::derivative(self, t)
    }

    fn distance(a: &Point3d, b: &Point3d) -> f64 {
        a.distance_to(b)
    }

    fn is_degenerate(&self, tolerance: f64) -> bool {
        let (p1, p2, p3) = self.control_points();
        p1.distance_to(&p2) < tolerance && p2.distance_to(&p3) < tolerance
    }
}

impl ParametricCurve for QuadraticSpline2d {
    type Point = Point2d;
    type Vector = Vec2;

    fn point_on(&self, t: f64) -> Point2d {
        QuadraticSpline2d::point_on(self, t)
    }

    fn derivative(&self, t: f64) -> Vec2 {
        QuadraticSpline2d::derivative(self, t)
    }

    fn distance(a: &Point2d, b: &Point2d) -> f64 {
        a.distance_to(b)
    }

    fn is_degenerate(&self, tolerance: f64) -> bool {
        let (p1, p2, p3) = self.control_points();
        p1.distance_to(&p2) < tolerance && p2.distance_to(&p3) < tolerance
    }
}
