//! Builder that accepts keyframes in any order and lays them out sorted by time.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{KeyframeError, StateError};
use crate::interp::Interpolator;
use crate::sequence::KeyframeSequence;
use crate::Result;

/// Keyframes sharing one time keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct KeyframeSequenceBuilder {
    keyframes: BTreeMap<i32, Vec<Vec<f32>>>,
    keyframe_count: usize,
    component_count: usize,
    interpolator: Option<Arc<dyn Interpolator>>,
    duration: i32,
    repeated: bool,
}

impl KeyframeSequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(component_count: usize) -> Result<Self> {
        Self::new().component_count(component_count)
    }

    /// Set the component count. Cannot be changed once keyframes were added.
    pub fn component_count(mut self, component_count: usize) -> Result<Self> {
        check_component_count(component_count)?;
        if self.component_count != 0 && self.keyframe_count != 0 {
            return Err(StateError::ComponentCountAlreadySet.into());
        }
        self.component_count = component_count;
        Ok(self)
    }

    /// Add a keyframe. The first `component_count` entries of `value` are copied.
    pub fn keyframe(mut self, time: i32, value: &[f32]) -> Result<Self> {
        if time < 0 {
            return Err(KeyframeError::invalid_argument("time < 0"));
        }
        if self.component_count == 0 {
            return Err(StateError::ComponentCountNotSet.into());
        }
        if value.len() < self.component_count {
            return Err(KeyframeError::invalid_argument(format!(
                "value.len() < component_count ({} < {})",
                value.len(),
                self.component_count
            )));
        }
        self.keyframes
            .entry(time)
            .or_default()
            .push(value[..self.component_count].to_vec());
        self.keyframe_count += 1;
        Ok(self)
    }

    pub fn interpolator(mut self, interpolator: Arc<dyn Interpolator>) -> Self {
        self.interpolator = Some(interpolator);
        self
    }

    pub fn duration(mut self, duration: i32) -> Result<Self> {
        if duration <= 0 {
            return Err(KeyframeError::invalid_argument("duration <= 0"));
        }
        self.duration = duration;
        Ok(self)
    }

    pub fn repeated(mut self, repeated: bool) -> Self {
        self.repeated = repeated;
        self
    }

    /// Number of keyframes added so far, counting duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.keyframe_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframe_count == 0
    }

    pub fn build(&self) -> Result<KeyframeSequence> {
        if self.keyframe_count == 0 {
            return Err(KeyframeError::NoKeyframes);
        }

        let mut seq = KeyframeSequence::new(self.keyframe_count, self.component_count)?;
        if self.duration > 0 {
            seq.set_duration(self.duration)?;
        }
        seq.set_repeated(self.repeated);
        seq.set_interpolator(self.interpolator.clone());

        let flattened = self
            .keyframes
            .iter()
            .flat_map(|(time, values)| values.iter().map(move |v| (*time, v)));
        for (index, (time, value)) in flattened.enumerate() {
            seq.set_keyframe(index, time, value)?;
        }

        debug!(
            keyframes = self.keyframe_count,
            components = self.component_count,
            duration = self.duration,
            repeated = self.repeated,
            interpolator = self.interpolator.as_ref().map(|i| i.name()).unwrap_or("none"),
            "built keyframe sequence"
        );
        Ok(seq)
    }
}

fn check_component_count(component_count: usize) -> Result<()> {
    if component_count < 1 {
        return Err(KeyframeError::invalid_argument("component_count < 1"));
    }
    Ok(())
}
