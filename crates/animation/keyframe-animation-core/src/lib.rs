//! Keyframe Animation Core
//!
//! Samples sparse `(time, value)` keyframes at any integer time, either clamped
//! to the sequence duration or looping over it, blending neighbouring
//! keyframes through a pluggable [`Interpolator`].

pub mod animatable;
pub mod animator;
pub mod builder;
pub mod config;
pub mod error;
pub mod interp;
pub mod sequence;
pub mod store;
pub mod stored_sequence;

// Re-exports for consumers
pub use animatable::{Animatable, AnimatableValue};
pub use animator::Animator;
pub use builder::KeyframeSequenceBuilder;
pub use config::InterpolatorConfig;
pub use error::{IndexKind, KeyframeError, StateError};
pub use interp::easing::{Bounce, EasingCurve, EasingMode, Power};
pub use interp::{
    Easing, EasingBounce, EasingPower, Interpolator, Linear, Slerp, Step, LINEAR, SLERP, STEP,
};
pub use sequence::KeyframeSequence;
pub use store::KeyframeStore;
pub use stored_sequence::{parse_stored_sequence_json, StoredSequence};

/// Keyframe animation result type
pub type Result<T> = core::result::Result<T, KeyframeError>;
