//! Bisection refinement of a marching step's entry estimate.

use sdfcast_field::Field;
use sdfcast_math::{Point3, Vec3};

/// Narrow the bracket `[start, start + step]` toward the surface crossing
/// by a fixed number of bisection iterations, returning the final
/// midpoint.
///
/// A midpoint with occupancy > 0 is still outside the field, so the lower
/// bound moves up; otherwise the upper bound moves down. The loop always
/// runs the full iteration count: there is no convergence check, and no
/// validation that the bracket straddles a sign change beyond the one
/// guarantee the marching step established. With `iters == 0` the
/// post-step sample `start + step` is returned, matching the unrefined
/// estimate of a march that skips refinement entirely.
pub fn refine_entry(start: Point3, step: Vec3, field: &dyn Field, iters: u32) -> Point3 {
    let mut lo = start;
    let mut hi = start + step;
    let mut mid = hi;

    for _ in 0..iters {
        mid = Point3::from((lo.coords + hi.coords) * 0.5);
        if field.occupancy(&mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    mid
}
