//! Easing curves and easing direction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::KeyframeError;
use crate::Result;

/// Direction in which an easing curve is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    In,
    #[default]
    Out,
    InOut,
}

impl EasingMode {
    /// Remap `ratio` through `curve` according to this mode.
    pub fn apply<C: EasingCurve + ?Sized>(self, curve: &C, ratio: f32) -> f32 {
        match self {
            Self::In => curve.ease(ratio),
            Self::Out => 1.0 - curve.ease(1.0 - ratio),
            Self::InOut if ratio < 0.5 => curve.ease(ratio * 2.0) * 0.5,
            Self::InOut => 1.0 - curve.ease((1.0 - ratio) * 2.0) * 0.5,
        }
    }
}

/// A monotone remapping of `[0, 1]` onto itself with `ease(0) == 0` and `ease(1) == 1`.
pub trait EasingCurve: Send + Sync + fmt::Debug {
    /// Interpolator name of the easing built on this curve.
    fn name(&self) -> &'static str;

    fn ease(&self, ratio: f32) -> f32;
}

/// `ratio ^ power`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Power {
    power: f32,
}

impl Power {
    pub const DEFAULT_POWER: f32 = 2.0;

    pub fn new(power: f32) -> Result<Self> {
        if power.is_nan() || power < 0.0 {
            return Err(KeyframeError::invalid_argument("power < 0"));
        }
        Ok(Self { power })
    }

    #[inline]
    pub fn power(&self) -> f32 {
        self.power
    }
}

impl Default for Power {
    fn default() -> Self {
        Self {
            power: Self::DEFAULT_POWER,
        }
    }
}

impl EasingCurve for Power {
    fn name(&self) -> &'static str {
        "easing_power"
    }

    fn ease(&self, ratio: f32) -> f32 {
        (ratio as f64).powf(self.power as f64) as f32
    }
}

/// Decaying bounces: `bounces` arcs, each `bounciness` times shorter than the next.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounce {
    bounces: u32,
    bounciness: f32,
}

impl Bounce {
    pub const DEFAULT_BOUNCES: u32 = 3;
    pub const DEFAULT_BOUNCINESS: f32 = 2.0;

    pub fn new(bounces: u32, bounciness: f32) -> Result<Self> {
        if bounces < 1 {
            return Err(KeyframeError::invalid_argument("bounces < 1"));
        }
        if bounciness.is_nan() || bounciness < 1.0 {
            return Err(KeyframeError::invalid_argument("bounciness < 1"));
        }
        Ok(Self {
            bounces,
            bounciness,
        })
    }

    #[inline]
    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    #[inline]
    pub fn bounciness(&self) -> f32 {
        self.bounciness
    }
}

impl Default for Bounce {
    fn default() -> Self {
        Self {
            bounces: Self::DEFAULT_BOUNCES,
            bounciness: Self::DEFAULT_BOUNCINESS,
        }
    }
}

impl EasingCurve for Bounce {
    fn name(&self) -> &'static str {
        "easing_bounce"
    }

    fn ease(&self, ratio: f32) -> f32 {
        // A bounciness of exactly 1 makes the geometric series degenerate.
        let b = if self.bounciness == 1.0 {
            1.001
        } else {
            self.bounciness as f64
        };
        let n = self.bounces as f64;
        let t = ratio as f64;

        let pow = b.powf(n);
        let one_minus_b = 1.0 - b;
        let sum_of_units = (1.0 - pow) / one_minus_b + pow * 0.5;
        let unit_at_t = t * sum_of_units;
        let bounce_at_t = (-unit_at_t * one_minus_b + 1.0).ln() / b.ln();

        let start = bounce_at_t.floor();
        let end = start + 1.0;
        let start_time = (1.0 - b.powf(start)) / (one_minus_b * sum_of_units);
        let end_time = (1.0 - b.powf(end)) / (one_minus_b * sum_of_units);

        let mid_time = (start_time + end_time) * 0.5;
        let peak_offset = t - mid_time;
        let radius = mid_time - start_time;
        let amplitude = (1.0 / b).powf(n - start);

        ((-amplitude / (radius * radius)) * (peak_offset - radius) * (peak_offset + radius)) as f32
    }
}
