//! Axis-aligned extents produced by `QuadraticSpline*::bounding_box`.

use serde::{Deserialize, Serialize};

use super::point::{Point2d, Point3d};

/// Axis-aligned box in 3D, stored as its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3d {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox3d {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    /// Closed containment test; points on a face count as inside.
    pub fn contains_point(&self, p: &Point3d) -> bool {
        let within = |v: f64, lo: f64, hi: f64| (lo..=hi).contains(&v);
        within(p.x, self.min.x, self.max.x)
            && within(p.y, self.min.y, self.max.y)
            && within(p.z, self.min.z, self.max.z)
    }
}

/// Axis-aligned box in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2d {
    pub min: Point2d,
    pub max: Point2d,
}

impl BoundingBox2d {
    pub fn new(min: Point2d, max: Point2d) -> Self {
        Self { min, max }
    }

    pub fn contains_point(&self, p: &Point2d) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }
}
