//! Keyframe sequence sampling.
//!
//! Model:
//! - A sequence owns a [`KeyframeStore`] whose times are non-decreasing.
//! - Constant mode holds the first value before the first keyframe and clamps
//!   queries past the duration to the duration.
//! - Repeat mode folds the query time into `(0, duration]` (time 0 stays 0) and
//!   interpolates across the loop seam between the last keyframe within the
//!   duration and the first keyframe.
//! - Among keyframes sharing one time, lookups resolve to the first of them,
//!   except a constant-mode query clamped down to the duration, which resolves
//!   to the last.

use std::sync::Arc;

use tracing::trace;

use crate::error::{KeyframeError, StateError};
use crate::interp::Interpolator;
use crate::store::KeyframeStore;
use crate::Result;

#[derive(Debug, Clone)]
pub struct KeyframeSequence {
    store: KeyframeStore,
    interpolator: Option<Arc<dyn Interpolator>>,
    duration: i32,
    repeated: bool,
}

impl KeyframeSequence {
    pub fn new(keyframe_count: usize, component_count: usize) -> Result<Self> {
        Ok(Self::from_store(KeyframeStore::new(
            keyframe_count,
            component_count,
        )?))
    }

    /// Wrap an existing store. Duration is left unset and repeat mode off.
    pub fn from_store(store: KeyframeStore) -> Self {
        Self {
            store,
            interpolator: None,
            duration: 0,
            repeated: false,
        }
    }

    #[inline]
    pub fn store(&self) -> &KeyframeStore {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut KeyframeStore {
        &mut self.store
    }

    #[inline]
    pub fn keyframe_count(&self) -> usize {
        self.store.keyframe_count()
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.store.component_count()
    }

    pub fn keyframe(&self, index: usize) -> Result<(i32, &[f32])> {
        self.store.get(index)
    }

    pub fn set_keyframe(&mut self, index: usize, time: i32, value: &[f32]) -> Result<&mut Self> {
        self.store.set(index, time, value)?;
        Ok(self)
    }

    pub fn keyframe_time(&self, index: usize) -> Result<i32> {
        self.store.time(index)
    }

    pub fn set_keyframe_time(&mut self, index: usize, time: i32) -> Result<&mut Self> {
        self.store.set_time(index, time)?;
        Ok(self)
    }

    #[inline]
    pub fn interpolator(&self) -> Option<&Arc<dyn Interpolator>> {
        self.interpolator.as_ref()
    }

    pub fn set_interpolator(&mut self, interpolator: Option<Arc<dyn Interpolator>>) -> &mut Self {
        self.interpolator = interpolator;
        self
    }

    /// Duration of one cycle; `0` means unset.
    #[inline]
    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: i32) -> Result<&mut Self> {
        if duration <= 0 {
            return Err(KeyframeError::invalid_argument("duration <= 0"));
        }
        self.duration = duration;
        Ok(self)
    }

    #[inline]
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn set_repeated(&mut self, repeated: bool) -> &mut Self {
        self.repeated = repeated;
        self
    }

    /// True when [`value_at`](Self::value_at) would not fail with a [`StateError`].
    pub fn is_ready(&self) -> bool {
        self.interpolator.is_some() && self.validate_duration().is_ok()
    }

    /// Sample the sequence at `time`.
    ///
    /// Returns the value and whether `time` was within the sequence's domain;
    /// the flag is `false` only in constant mode for `time > duration`.
    pub fn value_at(&self, time: i32) -> Result<(Vec<f32>, bool)> {
        let mut out = vec![0.0; self.component_count()];
        let in_range = self.value_at_into(time, &mut out)?;
        Ok((out, in_range))
    }

    /// Sample into the front of `out` without allocating.
    pub fn value_at_into(&self, time: i32, out: &mut [f32]) -> Result<bool> {
        let interpolator = self
            .interpolator
            .as_deref()
            .ok_or(StateError::InterpolatorNotSet)?;
        self.value_at_with(time, interpolator, out)
    }

    /// Sample using `interpolator` instead of the configured one.
    pub fn value_at_with(
        &self,
        time: i32,
        interpolator: &dyn Interpolator,
        out: &mut [f32],
    ) -> Result<bool> {
        self.store.check_value_len("out", out.len())?;
        self.validate_duration()?;
        let out = &mut out[..self.component_count()];

        if self.repeated {
            self.sample_repeated(time, interpolator, out)?;
            Ok(true)
        } else {
            self.sample_constant(time, interpolator, out)?;
            Ok(time <= self.duration)
        }
    }

    fn validate_duration(&self) -> std::result::Result<(), StateError> {
        if self.duration <= 0 {
            return Err(StateError::DurationNotSet);
        }
        let first_time = self.store.times()[0];
        if self.duration < first_time {
            return Err(StateError::NoKeyframeWithinDuration {
                duration: self.duration,
                first_time,
            });
        }
        Ok(())
    }

    fn sample_constant(
        &self,
        time: i32,
        interpolator: &dyn Interpolator,
        out: &mut [f32],
    ) -> Result<()> {
        let times = self.store.times();
        if time <= times[0] {
            trace!(time, "constant: at or before first keyframe");
            out.copy_from_slice(self.store.slot(0));
            return Ok(());
        }

        let lookup = time.min(self.duration);
        match self.store.search(lookup) {
            Ok(hit) => {
                // A query clamped down to the duration sees the end of the ties.
                let index = if lookup < time {
                    self.store.last_at_same_time(hit)
                } else {
                    self.store.first_at_same_time(hit)
                };
                trace!(time, lookup, index, "constant: exact keyframe");
                out.copy_from_slice(self.store.slot(index));
                Ok(())
            }
            Err(insert) if insert == self.keyframe_count() => {
                trace!(time, lookup, "constant: past last keyframe");
                out.copy_from_slice(self.store.slot(insert - 1));
                Ok(())
            }
            Err(insert) => self.interpolate_between(insert - 1, insert, lookup, interpolator, out),
        }
    }

    fn sample_repeated(
        &self,
        time: i32,
        interpolator: &dyn Interpolator,
        out: &mut [f32],
    ) -> Result<()> {
        let lookup = self.fold_time(time);
        match self.store.search(lookup) {
            Ok(hit) => {
                let index = self.store.first_at_same_time(hit);
                trace!(time, lookup, index, "repeat: exact keyframe");
                out.copy_from_slice(self.store.slot(index));
                Ok(())
            }
            Err(insert) => {
                let start = self.repeat_start_index(insert);
                let end = self.repeat_end_index(insert);
                self.interpolate_between(start, end, lookup, interpolator, out)
            }
        }
    }

    /// Fold `time` into `[0, duration)`, then move exact cycle ends other than
    /// time 0 itself to `duration`.
    fn fold_time(&self, time: i32) -> i32 {
        let folded = time.rem_euclid(self.duration);
        if folded == 0 && time != 0 {
            self.duration
        } else {
            folded
        }
    }

    fn repeat_start_index(&self, insert: usize) -> usize {
        if insert != 0 {
            return insert - 1;
        }
        // Wrap back to the last keyframe within the duration.
        match self.store.search(self.duration) {
            Ok(hit) => self.store.last_at_same_time(hit),
            // duration >= times[0] guarantees a non-zero insertion point here.
            Err(at_duration) => at_duration.saturating_sub(1),
        }
    }

    fn repeat_end_index(&self, insert: usize) -> usize {
        if insert < self.keyframe_count() && self.store.times()[insert] <= self.duration {
            insert
        } else {
            0
        }
    }

    fn interpolate_between(
        &self,
        start: usize,
        end: usize,
        time: i32,
        interpolator: &dyn Interpolator,
        out: &mut [f32],
    ) -> Result<()> {
        let ratio = self.segment_ratio(start, end, time);
        trace!(time, start, end, ratio, "interpolate");
        interpolator.interpolate(self.store.slot(start), self.store.slot(end), ratio, out)
    }

    /// Position of `time` between keyframes `start` and `end`. A segment whose
    /// end is not after its start runs across the loop seam.
    fn segment_ratio(&self, start: usize, end: usize, time: i32) -> f32 {
        let times = self.store.times();
        let start_time = times[start] as i64;
        let end_time = times[end] as i64;
        let time = time as i64;
        let duration = self.duration as i64;

        let (num, den) = if start_time < end_time {
            (time - start_time, end_time - start_time)
        } else {
            let num = if time >= start_time {
                time - start_time
            } else {
                time + duration - start_time
            };
            (num, end_time - start_time + duration)
        };

        if den <= 0 {
            return 0.0;
        }
        (num as f32 / den as f32).clamp(0.0, 1.0)
    }
}
