//! Property-based tests for geometry invariants using the `proptest` crate.

use approx::AbsDiffEq;
use proptest::prelude::*;

use cad_geometry::{
    Axis2d, Axis3d, Direction2d, Direction3d, Frame3d, GeometryError, PlaceOnto, Placement3d,
    Plane3d, Point2d, Point3d, ProjectInto, ProjectOnto, QuadraticSpline3d, Scale3d, Transform2d,
    Transform3d, Vec3,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary 3D coordinate tuple in a reasonable floating-point range.
fn arb_coords() -> impl Strategy<Value = (f64, f64, f64)> {
    (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0)
}

fn arb_point() -> impl Strategy<Value = Point3d> {
    arb_coords().prop_map(Point3d::from_coordinates)
}

/// Direction from a random vector, skipping vectors too short to normalize
/// reliably.
fn arb_direction() -> impl Strategy<Value = Direction3d> {
    arb_coords()
        .prop_filter("vector too short", |&(x, y, z)| x * x + y * y + z * z > 1e-6)
        .prop_map(|(x, y, z)| Direction3d::from_components(x, y, z).unwrap())
}

fn arb_frame() -> impl Strategy<Value = Frame3d> {
    (arb_point(), arb_direction()).prop_map(|(o, z)| Frame3d::with_z_direction(o, z))
}

fn arb_plane() -> impl Strategy<Value = Plane3d> {
    (arb_point(), arb_direction()).prop_map(|(o, n)| Plane3d::through(o, n))
}

fn arb_spline() -> impl Strategy<Value = QuadraticSpline3d> {
    (arb_point(), arb_point(), arb_point()).prop_map(|(a, b, c)| QuadraticSpline3d::new(a, b, c))
}

fn arb_point2d() -> impl Strategy<Value = Point2d> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point2d::new(x, y))
}

fn arb_axis2d() -> impl Strategy<Value = Axis2d> {
    (arb_point2d(), arb_angle()).prop_map(|(o, a)| Axis2d::new(o, Direction2d::from_angle(a)))
}

/// Arbitrary rotation angle in radians.
fn arb_angle() -> impl Strategy<Value = f64> {
    -std::f64::consts::PI..std::f64::consts::PI
}

const TOL: f64 = 1e-9;

fn close(a: Point3d, b: Point3d) -> bool {
    a.distance_to(&b) < TOL
}

fn same_direction(a: Direction3d, b: Direction3d) -> bool {
    a.abs_diff_eq(&b, TOL)
}

// ---------------------------------------------------------------------------
// 1. Frame round-trip: place_in(F, relative_to(F, p)) == p
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn frame_placement_roundtrip(p in arb_point(), frame in arb_frame()) {
        let back = p.relative_to(&frame).place_in(&frame);
        prop_assert!(close(back, p), "roundtrip {:?} -> {:?}", p, back);
    }
}

// ---------------------------------------------------------------------------
// 2. Projection is idempotent onto axes and planes
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn projection_idempotent(
        p in arb_point(),
        origin in arb_point(),
        d in arb_direction(),
        plane in arb_plane(),
    ) {
        let axis = Axis3d::new(origin, d);
        let once = p.project_onto(&axis);
        prop_assert!(close(once.project_onto(&axis), once));

        let once = p.project_onto(&plane);
        prop_assert!(close(once.project_onto(&plane), once));
        prop_assert!(once.signed_distance_from(&plane).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// 3. Reversal symmetry: reverse(S).point_on(t) == S.point_on(1 - t)
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn spline_reversal_symmetry(s in arb_spline(), t in 0.0f64..1.0) {
        prop_assert!(close(s.reverse().point_on(t), s.point_on(1.0 - t)));
    }
}

// ---------------------------------------------------------------------------
// 4. Subdivision exactness: both halves trace the unsplit curve
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn spline_split_exact(s in arb_spline(), t in 0.01f64..0.99, u in 0.0f64..1.0) {
        let (left, right) = s.split_at(t);
        prop_assert!(close(left.point_on(u), s.point_on(t * u)));
        prop_assert!(close(right.point_on(u), s.point_on(t + (1.0 - t) * u)));
    }
}

// ---------------------------------------------------------------------------
// 5. Scale identity (k = 1) and collapse (k = 0)
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scale_identity_and_collapse(p in arb_point(), center in arb_point()) {
        prop_assert!(close(p.scale_about(center, 1.0), p));
        prop_assert!(close(p.scale_about(center, 0.0), center));
    }
}

// ---------------------------------------------------------------------------
// 6. Mirror involution: mirroring twice is the identity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mirror_involution(
        p in arb_point(),
        d in arb_direction(),
        axis in (arb_point(), arb_direction()).prop_map(|(o, d)| Axis3d::new(o, d)),
        frame in arb_frame(),
        target in arb_plane(),
        plane in arb_plane(),
    ) {
        prop_assert!(close(p.mirror_across(&plane).mirror_across(&plane), p));
        prop_assert!(same_direction(d.mirror_across(&plane).mirror_across(&plane), d));

        let back = axis.mirror_across(&plane).mirror_across(&plane);
        prop_assert!(close(back.origin_point, axis.origin_point));
        prop_assert!(same_direction(back.direction, axis.direction));

        let back = frame.mirror_across(&plane).mirror_across(&plane);
        prop_assert!(close(back.origin_point, frame.origin_point));
        prop_assert!(same_direction(back.x_direction, frame.x_direction));
        prop_assert!(same_direction(back.y_direction, frame.y_direction));
        prop_assert!(same_direction(back.z_direction, frame.z_direction));

        let back = target.mirror_across(&plane).mirror_across(&plane);
        prop_assert!(close(back.origin_point, target.origin_point));
        prop_assert!(same_direction(back.x_direction, target.x_direction));
        prop_assert!(same_direction(back.y_direction, target.y_direction));
        prop_assert!(same_direction(back.normal_direction, target.normal_direction));
    }

    #[test]
    fn mirror_involution_2d(p in arb_point2d(), angle in arb_angle(), axis in arb_axis2d()) {
        let back = p.mirror_across(&axis).mirror_across(&axis);
        prop_assert!(back.distance_to(&p) < TOL, "{:?} -> {:?}", p, back);

        let d = Direction2d::from_angle(angle);
        prop_assert!(d.mirror_across(&axis).mirror_across(&axis).abs_diff_eq(&d, TOL));
    }
}

// ---------------------------------------------------------------------------
// 7. project_into after place_onto is the identity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn place_onto_then_project_into(
        (x, y) in (-100.0f64..100.0, -100.0f64..100.0),
        frame in arb_frame(),
    ) {
        let sketch = frame.xy_sketch_plane();
        let p = Point2d::new(x, y);
        let back = p.place_onto(&sketch).project_into(&sketch);
        prop_assert!(back.distance_to(&p) < TOL, "{:?} -> {:?}", p, back);
    }
}

// ---------------------------------------------------------------------------
// 8. Affine invariance: transforming a spline then evaluating equals
//    evaluating then transforming
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn spline_affine_invariance(
        s in arb_spline(),
        origin in arb_point(),
        d in arb_direction(),
        angle in arb_angle(),
        (dx, dy, dz) in arb_coords(),
        t in 0.0f64..1.0,
    ) {
        let axis = Axis3d::new(origin, d);
        let shift = Vec3::new(dx, dy, dz);
        let moved = s.rotate_around(&axis, angle).translate_by(shift);
        let expected = s.point_on(t).rotate_around(&axis, angle).translate_by(shift);
        prop_assert!(close(moved.point_on(t), expected));
    }
}

// ---------------------------------------------------------------------------
// 9. JSON round-trip is exact
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn json_roundtrip_exact(s in arb_spline(), d in arb_direction(), frame in arb_frame()) {
        let json = serde_json::to_string(&s).unwrap();
        prop_assert_eq!(serde_json::from_str::<QuadraticSpline3d>(&json).unwrap(), s);

        let json = serde_json::to_string(&d).unwrap();
        prop_assert_eq!(serde_json::from_str::<Direction3d>(&json).unwrap(), d);

        let json = serde_json::to_string(&frame).unwrap();
        prop_assert_eq!(serde_json::from_str::<Frame3d>(&json).unwrap(), frame);
    }
}

// ---------------------------------------------------------------------------
// 10. Directions only scale by +1 / -1
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn direction_scale_rejects_non_unit_factors(
        d in arb_direction(),
        center in arb_point(),
        k in prop_oneof![-100.0f64..-1.01, -0.99f64..0.99, 1.01f64..100.0],
    ) {
        let err = d.scale_about(center, k);
        let is_invalid_operation = matches!(err, Err(GeometryError::InvalidOperation { .. }));
        prop_assert!(is_invalid_operation);
        prop_assert_eq!(d.scale_about(center, 1.0).unwrap(), d);
        prop_assert_eq!(d.scale_about(center, -1.0).unwrap(), d.reverse());
    }
}
