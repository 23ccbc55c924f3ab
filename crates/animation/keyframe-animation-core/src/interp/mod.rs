//! Interpolators and helpers.
//!
//! Every variant implements [`Interpolator::blend`]; argument validation and
//! the ratio 0 / ratio 1 / identical-input shortcuts live once in the provided
//! [`Interpolator::interpolate`].

pub mod easing;
pub mod functions;

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::KeyframeError;
use crate::Result;
use easing::{Bounce, EasingCurve, EasingMode, Power};
use functions::{lerp_into, slerp_quat_into};

/// Shared linear interpolator.
pub static LINEAR: Lazy<Arc<dyn Interpolator>> = Lazy::new(|| Arc::new(Linear));
/// Shared step interpolator.
pub static STEP: Lazy<Arc<dyn Interpolator>> = Lazy::new(|| Arc::new(Step));
/// Shared quaternion slerp interpolator.
pub static SLERP: Lazy<Arc<dyn Interpolator>> = Lazy::new(|| Arc::new(Slerp));

/// Trait for interpolation functions over fixed-size `f32` vectors.
pub trait Interpolator: Send + Sync + fmt::Debug {
    /// Get the name of this interpolation function
    fn name(&self) -> &str;

    /// Smallest component count this interpolator accepts.
    #[inline]
    fn min_components(&self) -> usize {
        1
    }

    /// Variant formula. Only called with `ratio` strictly inside `(0, 1)` and
    /// with `from`/`to` holding at least `out.len()` components.
    fn blend(&self, from: &[f32], to: &[f32], ratio: f32, out: &mut [f32]);

    /// Interpolate `out.len()` components between `from` and `to`.
    fn interpolate(&self, from: &[f32], to: &[f32], ratio: f32, out: &mut [f32]) -> Result<()> {
        let count = out.len();
        if !(0.0..=1.0).contains(&ratio) {
            return Err(KeyframeError::invalid_argument("ratio < 0 || 1 < ratio"));
        }
        if count < 1 {
            return Err(KeyframeError::invalid_argument("count < 1"));
        }
        if count < self.min_components() {
            return Err(KeyframeError::invalid_argument(format!(
                "count < {} for {}",
                self.min_components(),
                self.name()
            )));
        }
        if ratio < 1.0 && from.len() < count {
            return Err(KeyframeError::invalid_argument("from.len() < count"));
        }
        if ratio > 0.0 && to.len() < count {
            return Err(KeyframeError::invalid_argument("to.len() < count"));
        }

        if ratio == 0.0 {
            out.copy_from_slice(&from[..count]);
        } else if ratio == 1.0 {
            out.copy_from_slice(&to[..count]);
        } else if std::ptr::eq(from.as_ptr(), to.as_ptr()) {
            out.copy_from_slice(&from[..count]);
        } else {
            self.blend(from, to, ratio, out);
        }
        Ok(())
    }
}

/// Component-wise linear blend.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linear;

impl Interpolator for Linear {
    fn name(&self) -> &str {
        "linear"
    }

    fn blend(&self, from: &[f32], to: &[f32], ratio: f32, out: &mut [f32]) {
        lerp_into(from, to, ratio, out);
    }
}

/// Holds the start value until the end keyframe is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step;

impl Interpolator for Step {
    fn name(&self) -> &str {
        "step"
    }

    fn blend(&self, from: &[f32], _to: &[f32], _ratio: f32, out: &mut [f32]) {
        let count = out.len();
        out.copy_from_slice(&from[..count]);
    }
}

/// Spherical linear interpolation of (x, y, z, w) quaternions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Slerp;

impl Interpolator for Slerp {
    fn name(&self) -> &str {
        "slerp"
    }

    fn min_components(&self) -> usize {
        4
    }

    fn blend(&self, from: &[f32], to: &[f32], ratio: f32, out: &mut [f32]) {
        slerp_quat_into(from, to, ratio, out);
    }
}

/// Linear blend whose ratio is first remapped through an easing curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Easing<C> {
    curve: C,
    mode: EasingMode,
}

pub type EasingPower = Easing<Power>;
pub type EasingBounce = Easing<Bounce>;

impl<C: EasingCurve> Easing<C> {
    pub fn new(curve: C, mode: EasingMode) -> Self {
        Self { curve, mode }
    }

    #[inline]
    pub fn curve(&self) -> &C {
        &self.curve
    }

    #[inline]
    pub fn mode(&self) -> EasingMode {
        self.mode
    }

    pub fn with_mode(mut self, mode: EasingMode) -> Self {
        self.mode = mode;
        self
    }
}

impl<C: EasingCurve> Interpolator for Easing<C> {
    fn name(&self) -> &str {
        self.curve.name()
    }

    fn blend(&self, from: &[f32], to: &[f32], ratio: f32, out: &mut [f32]) {
        let eased = self.mode.apply(&self.curve, ratio);
        lerp_into(from, to, eased, out);
    }
}
