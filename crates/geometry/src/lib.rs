pub mod error;
pub mod geometry;
pub mod interop;
pub mod traits;

use std::sync::RwLock;

use tracing::info;

// Re-export key types and traits at crate root for convenience.
pub use error::{GeometryError, Result};
pub use geometry::axis::{Axis2d, Axis3d};
pub use geometry::bounding_box::{BoundingBox2d, BoundingBox3d};
pub use geometry::conversion::{PlaceOnto, Placement2d, Placement3d, ProjectInto};
pub use geometry::direction::{Direction2d, Direction3d};
pub use geometry::frame::{Frame2d, Frame3d};
pub use geometry::plane::{Plane3d, SketchPlane3d};
pub use geometry::point::{Point2d, Point3d};
pub use geometry::spline::{QuadraticSpline2d, QuadraticSpline3d};
pub use geometry::transform::{ProjectOnto, Scale2d, Scale3d, Transform2d, Transform3d};
pub use geometry::vector::{Vec2, Vec3};
pub use traits::ParametricCurve;

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Squared lengths below this are treated as zero when normalizing.
    pub zero_length_squared: f64,
    /// Points closer than this are considered coincident.
    pub coincidence: f64,
    /// Slack when matching a dimensionless scale factor against `±1`.
    pub unit_scale: f64,
}

impl Tolerance {
    /// Library defaults: `1e-10` on squared lengths, `1e-9` for coincidence
    /// and for unit scale factors.
    pub const DEFAULT: Self = Self {
        zero_length_squared: 1e-10,
        coincidence: 1e-9,
        unit_scale: 1e-9,
    };

    pub fn is_zero_length_squared(&self, length_squared: f64) -> bool {
        length_squared < self.zero_length_squared
    }

    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }

    pub fn points_coincident_2d(&self, a: &Point2d, b: &Point2d) -> bool {
        a.distance_to(b) < self.coincidence
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static DEFAULT_TOLERANCE: RwLock<Tolerance> = RwLock::new(Tolerance::DEFAULT);

/// Process-wide default tolerance, used by every operation without a `_with` suffix.
pub fn default_tolerance() -> Tolerance {
    match DEFAULT_TOLERANCE.read() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Replace the process-wide default tolerance. Returns the previous value.
pub fn set_default_tolerance(tolerance: Tolerance) -> Tolerance {
    let mut guard = match DEFAULT_TOLERANCE.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let previous = *guard;
    *guard = tolerance;
    info!(
        zero_length_squared = tolerance.zero_length_squared,
        coincidence = tolerance.coincidence,
        unit_scale = tolerance.unit_scale,
        "default tolerance updated"
    );
    previous
}
