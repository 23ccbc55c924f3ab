use serde::{Deserialize, Serialize};

use crate::builder::KeyframeSequenceBuilder;
use crate::config::InterpolatorConfig;
use crate::sequence::KeyframeSequence;
use crate::Result;

/// Public API: parse a stored keyframe sequence JSON document into a ready
/// [`KeyframeSequence`].
///
/// Notes:
/// - Keyframes may appear in any order; they are sorted by time, ties keep document order.
/// - A keyframe value is either a bare number (single component) or an array.
/// - `duration` may be omitted, leaving the sequence unset until configured.
/// - `interpolator` defaults to linear.
pub fn parse_stored_sequence_json(s: &str) -> Result<KeyframeSequence> {
    let stored: StoredSequence = serde_json::from_str(s)?;
    stored.build()
}

/// JSON schema of a stored sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSequence {
    #[serde(default)]
    pub name: String,
    pub components: usize,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default)]
    pub interpolator: InterpolatorConfig,
    pub keyframes: Vec<StoredKeyframe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredKeyframe {
    pub time: i32,
    pub value: RawValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Scalar(f32),
    Vector(Vec<f32>),
}

impl RawValue {
    pub fn as_slice(&self) -> &[f32] {
        match self {
            RawValue::Scalar(v) => std::slice::from_ref(v),
            RawValue::Vector(v) => v,
        }
    }
}

impl StoredSequence {
    /// Run the document through [`KeyframeSequenceBuilder`] so every argument check applies.
    pub fn build(&self) -> Result<KeyframeSequence> {
        let mut builder = KeyframeSequenceBuilder::with_components(self.components)?
            .interpolator(self.interpolator.build()?)
            .repeated(self.repeated);
        if let Some(duration) = self.duration {
            builder = builder.duration(duration)?;
        }
        for key in &self.keyframes {
            builder = builder.keyframe(key.time, key.value.as_slice())?;
        }
        builder.build()
    }
}
