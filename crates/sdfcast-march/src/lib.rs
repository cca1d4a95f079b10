#![warn(missing_docs)]

//! Ray-march intersection engine for sdfcast.
//!
//! Advances a ray in fixed-length steps through a caller-owned scene of
//! occupancy fields, stops at the first step where any field reports
//! occupancy, picks the nearest entered field, and optionally sharpens
//! the entry point with a fixed-count bisection.
//!
//! # Architecture
//!
//! - [`MarchSettings`] - step length and bisection iteration count
//! - [`cast`] - the march itself, returning `Option<RayHit>`
//! - [`refine_entry`] - bisection refinement of one step's bracket
//!
//! A cast is a pure function of its inputs and the scene snapshot: it
//! mutates nothing and may run concurrently from independent threads as
//! long as the scene is not mutated underneath it. Termination is
//! guaranteed by the travel bound: at most `max_len / step_len` steps,
//! and exactly `refine_iters` bisection iterations per refinement.

use serde::{Deserialize, Serialize};

pub mod error;
mod march;
mod refine;

pub use error::{MarchError, Result};
pub use march::{cast, RayHit};
pub use refine::refine_entry;

/// Marching parameters.
///
/// These are configuration constants, not adaptive state: a fixed step
/// length for the march and a fixed iteration count for the bisection
/// refinement. Fields are public for direct construction; use
/// [`MarchSettings::new`] or [`MarchSettings::validate`] when the
/// values come from configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarchSettings {
    /// Length of one march step.
    pub step_len: f64,
    /// Bisection iterations per refined hit.
    pub refine_iters: u32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            step_len: 0.1,
            refine_iters: 10,
        }
    }
}

impl MarchSettings {
    /// Build validated settings from a step length and a bisection
    /// iteration count.
    pub fn new(step_len: f64, refine_iters: u32) -> Result<Self> {
        let settings = Self {
            step_len,
            refine_iters,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that these settings can drive a terminating march.
    pub fn validate(&self) -> Result<()> {
        if !(self.step_len > 0.0 && self.step_len.is_finite()) {
            return Err(MarchError::InvalidSettings(format!(
                "step length must be positive and finite, got {}",
                self.step_len
            )));
        }
        Ok(())
    }
}
