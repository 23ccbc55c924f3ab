//! Error types for keyframe storage, sampling and interpolation.

use serde::{Deserialize, Serialize};

/// Which index argument was rejected by a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    Keyframe,
    Component,
    Element,
}

impl IndexKind {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyframe => "keyframe",
            Self::Component => "component",
            Self::Element => "element",
        }
    }
}

/// Misconfiguration detected lazily, when a sequence is sampled or a builder is used.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateError {
    #[error("Duration is not set")]
    DurationNotSet,

    #[error("No keyframe within the duration ({duration}); first keyframe is at {first_time}")]
    NoKeyframeWithinDuration { duration: i32, first_time: i32 },

    #[error("Interpolator is not set")]
    InterpolatorNotSet,

    #[error("Component count is not set")]
    ComponentCountNotSet,

    #[error("Component count has already been set")]
    ComponentCountAlreadySet,
}

/// Error type for every fallible operation in this crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyframeError {
    /// Constructor or setter misuse (non-positive counts, negative time, short buffers, bad ratio)
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("{} index {index} is out of range (len {len})", kind.name())]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    State(#[from] StateError),

    /// A builder was asked to build a sequence without any keyframe
    #[error("No keyframe")]
    NoKeyframes,

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl KeyframeError {
    #[inline]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } | Self::IndexOutOfRange { .. } => "argument",
            Self::State(_) | Self::NoKeyframes => "state",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for KeyframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Check `index < len`, reporting `kind` on failure.
#[inline]
pub(crate) fn check_index(kind: IndexKind, index: usize, len: usize) -> Result<(), KeyframeError> {
    if index < len {
        Ok(())
    } else {
        Err(KeyframeError::IndexOutOfRange { kind, index, len })
    }
}
