//! Fixed-step ray march over a scene of occupancy fields.

use sdfcast_field::{Field, Scene};
use sdfcast_math::{distance, unit_or_zero, Point3, Vec3};

use crate::refine::refine_entry;
use crate::MarchSettings;

/// Result of a successful cast: the entry point estimate and a non-owning
/// reference to the field that was entered.
#[derive(Debug, Clone, Copy)]
pub struct RayHit<'scene> {
    /// Estimated point where the ray enters the field.
    pub point: Point3,
    /// The field that was hit.
    pub field: &'scene dyn Field,
}

/// March a ray from `origin` along `direction` until it enters a field or
/// `max_len` is exhausted.
///
/// The direction may have any magnitude; it is re-normalized internally
/// (a zero direction never advances and therefore never hits anything the
/// origin is not already inside of; the march still terminates). The ray
/// advances in fixed steps of `settings.step_len`, shrinking the final
/// step to land exactly on `max_len`. At each step every field in the
/// scene is sampled, in scene order, at the post-step point; each field
/// reporting negative occupancy becomes a candidate whose entry estimate
/// is the bisection-refined point when `refine` is set, and the
/// post-step sample point otherwise. The candidate whose estimate lies
/// closest to the pre-step point wins; exact ties go to the earlier
/// field in scene order (without refinement every estimate is the same
/// sample point, so scene order alone decides).
///
/// A feature thinner than the step length can fall between two samples
/// and be missed; this is an accepted approximation of the fixed-step
/// scheme, not a defect.
///
/// Returns `None` when nothing is entered within `max_len`, or when
/// `settings.step_len` is not a positive finite length (see
/// [`MarchSettings::validate`](crate::MarchSettings::validate) for
/// rejecting such settings up front).
pub fn cast<'scene>(
    scene: &'scene Scene,
    origin: Point3,
    direction: Vec3,
    refine: bool,
    max_len: f64,
    settings: &MarchSettings,
) -> Option<RayHit<'scene>> {
    // a non-positive or non-finite step cannot drive the march forward
    if !(settings.step_len > 0.0 && settings.step_len.is_finite()) {
        return None;
    }

    let dir = unit_or_zero(&direction);
    let mut inc = settings.step_len * dir;

    let mut trace = origin;
    let mut travelled = 0.0;

    while travelled < max_len {
        if travelled + settings.step_len >= max_len {
            // cannot go a full increment without overshooting max_len
            let remaining = max_len - travelled;
            inc = remaining * dir;
        }
        let pre_step = trace;
        trace += inc;
        travelled += settings.step_len;

        let mut first: Option<RayHit<'scene>> = None;
        let mut best: Option<RayHit<'scene>> = None;
        let mut min_dist = max_len;

        for field in scene.iter() {
            if field.occupancy(&trace) < 0.0 {
                let point = if refine {
                    refine_entry(pre_step, inc, field, settings.refine_iters)
                } else {
                    trace
                };
                let hit = RayHit { point, field };
                if first.is_none() {
                    first = Some(hit);
                }
                let dist = distance(&pre_step, &point);
                if dist < min_dist {
                    min_dist = dist;
                    best = Some(hit);
                }
            }
        }

        if first.is_some() {
            return best.or(first);
        }
    }

    None
}
