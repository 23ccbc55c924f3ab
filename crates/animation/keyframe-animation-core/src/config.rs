//! Serializable interpolator configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::interp::easing::{Bounce, EasingMode, Power};
use crate::interp::{Easing, Interpolator, LINEAR, SLERP, STEP};
use crate::Result;

/// Describes an interpolator; [`InterpolatorConfig::build`] validates and instantiates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterpolatorConfig {
    Linear,
    Step,
    Slerp,
    EasingPower {
        #[serde(default)]
        mode: EasingMode,
        #[serde(default = "default_power")]
        power: f32,
    },
    EasingBounce {
        #[serde(default)]
        mode: EasingMode,
        #[serde(default = "default_bounces")]
        bounces: u32,
        #[serde(default = "default_bounciness")]
        bounciness: f32,
    },
}

fn default_power() -> f32 {
    Power::DEFAULT_POWER
}

fn default_bounces() -> u32 {
    Bounce::DEFAULT_BOUNCES
}

fn default_bounciness() -> f32 {
    Bounce::DEFAULT_BOUNCINESS
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self::Linear
    }
}

impl InterpolatorConfig {
    /// Stateless kinds hand out the shared instances.
    pub fn build(&self) -> Result<Arc<dyn Interpolator>> {
        Ok(match *self {
            Self::Linear => Arc::clone(&*LINEAR),
            Self::Step => Arc::clone(&*STEP),
            Self::Slerp => Arc::clone(&*SLERP),
            Self::EasingPower { mode, power } => Arc::new(Easing::new(Power::new(power)?, mode)),
            Self::EasingBounce {
                mode,
                bounces,
                bounciness,
            } => Arc::new(Easing::new(Bounce::new(bounces, bounciness)?, mode)),
        })
    }
}
