//! Targets that pull sampled values out of a keyframe sequence.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::error::{check_index, IndexKind, KeyframeError};
use crate::sequence::KeyframeSequence;
use crate::Result;

/// Something that can be driven to a sequence time.
pub trait Animatable {
    /// Update to `time`. Returns true while the target is still within its
    /// sequence's domain, i.e. there is more animation to come.
    fn animate(&mut self, time: i32) -> bool;
}

/// A value buffer updated from an optional shared sequence.
#[derive(Debug, Clone)]
pub struct AnimatableValue {
    value: Vec<f32>,
    sequence: Option<Arc<KeyframeSequence>>,
}

impl AnimatableValue {
    pub fn new(component_count: usize) -> Result<Self> {
        if component_count < 1 {
            return Err(KeyframeError::invalid_argument("component_count < 1"));
        }
        Ok(Self {
            value: vec![0.0; component_count],
            sequence: None,
        })
    }

    pub fn with_sequence(component_count: usize, sequence: Arc<KeyframeSequence>) -> Result<Self> {
        let mut this = Self::new(component_count)?;
        this.sequence = Some(sequence);
        Ok(this)
    }

    #[inline]
    pub fn value(&self) -> &[f32] {
        &self.value
    }

    pub fn element(&self, index: usize) -> Result<f32> {
        check_index(IndexKind::Element, index, self.value.len())?;
        Ok(self.value[index])
    }

    pub fn set_element(&mut self, index: usize, element: f32) -> Result<()> {
        check_index(IndexKind::Element, index, self.value.len())?;
        self.value[index] = element;
        Ok(())
    }

    #[inline]
    pub fn sequence(&self) -> Option<&Arc<KeyframeSequence>> {
        self.sequence.as_ref()
    }

    pub fn set_sequence(&mut self, sequence: Option<Arc<KeyframeSequence>>) {
        self.sequence = sequence;
    }
}

impl Animatable for AnimatableValue {
    fn animate(&mut self, time: i32) -> bool {
        let Some(sequence) = self.sequence.as_ref() else {
            trace!(time, "animate: no sequence attached");
            return false;
        };
        if !sequence.is_ready() {
            trace!(time, "animate: sequence not ready");
            return false;
        }
        if sequence.component_count() > self.value.len() {
            warn!(
                "sequence has {} components but the target holds {}; skipping",
                sequence.component_count(),
                self.value.len()
            );
            return false;
        }
        match sequence.value_at_into(time, &mut self.value) {
            Ok(in_range) => in_range,
            Err(err) => {
                warn!("animate: sampling at {} failed: {}", time, err);
                false
            }
        }
    }
}
