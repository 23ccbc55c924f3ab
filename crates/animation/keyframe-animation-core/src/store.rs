//! Flat, fixed-size keyframe storage.
//!
//! Keyframe `i` has time `times[i]` and its value occupies
//! `values[i * component_count..(i + 1) * component_count]`.
//! Times are expected to be non-decreasing; this is a caller obligation that
//! is not checked by the setters.

use crate::error::{check_index, IndexKind, KeyframeError};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStore {
    keyframe_count: usize,
    component_count: usize,
    times: Vec<i32>,
    values: Vec<f32>,
}

impl KeyframeStore {
    /// Allocate `keyframe_count` zeroed keyframes of `component_count` components.
    pub fn new(keyframe_count: usize, component_count: usize) -> Result<Self> {
        if keyframe_count < 1 {
            return Err(KeyframeError::invalid_argument("keyframe_count < 1"));
        }
        if component_count < 1 {
            return Err(KeyframeError::invalid_argument("component_count < 1"));
        }
        let value_len = keyframe_count.checked_mul(component_count).ok_or_else(|| {
            KeyframeError::invalid_argument("keyframe_count * component_count overflows")
        })?;
        Ok(Self {
            keyframe_count,
            component_count,
            times: vec![0; keyframe_count],
            values: vec![0.0; value_len],
        })
    }

    #[inline]
    pub fn keyframe_count(&self) -> usize {
        self.keyframe_count
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    #[inline]
    pub fn times(&self) -> &[i32] {
        &self.times
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Time and value of keyframe `index`.
    pub fn get(&self, index: usize) -> Result<(i32, &[f32])> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        Ok((self.times[index], self.slot(index)))
    }

    /// Overwrite keyframe `index`. Only the first `component_count` entries of `value` are read.
    pub fn set(&mut self, index: usize, time: i32, value: &[f32]) -> Result<&mut Self> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        check_time(time)?;
        self.check_value_len("value", value.len())?;
        self.times[index] = time;
        let n = self.component_count;
        self.slot_mut(index).copy_from_slice(&value[..n]);
        Ok(self)
    }

    pub fn time(&self, index: usize) -> Result<i32> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        Ok(self.times[index])
    }

    pub fn set_time(&mut self, index: usize, time: i32) -> Result<&mut Self> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        check_time(time)?;
        self.times[index] = time;
        Ok(self)
    }

    pub fn value(&self, index: usize) -> Result<&[f32]> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        Ok(self.slot(index))
    }

    /// Copy the value of keyframe `index` into the front of `out`.
    pub fn copy_value(&self, index: usize, out: &mut [f32]) -> Result<()> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        self.check_value_len("out", out.len())?;
        out[..self.component_count].copy_from_slice(self.slot(index));
        Ok(())
    }

    pub fn component(&self, index: usize, component: usize) -> Result<f32> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        check_index(IndexKind::Component, component, self.component_count)?;
        Ok(self.values[index * self.component_count + component])
    }

    pub fn set_component(&mut self, index: usize, component: usize, value: f32) -> Result<&mut Self> {
        check_index(IndexKind::Keyframe, index, self.keyframe_count)?;
        check_index(IndexKind::Component, component, self.component_count)?;
        self.values[index * self.component_count + component] = value;
        Ok(self)
    }

    /// Binary search over the keyframe times.
    ///
    /// `Ok(i)` is some keyframe exactly at `time` (any of the ties);
    /// `Err(p)` is the insertion point keeping the times sorted.
    #[inline]
    pub fn search(&self, time: i32) -> std::result::Result<usize, usize> {
        self.times.binary_search(&time)
    }

    /// Walk back from `index` to the first keyframe sharing its time.
    pub fn first_at_same_time(&self, mut index: usize) -> usize {
        let time = self.times[index];
        while index > 0 && self.times[index - 1] == time {
            index -= 1;
        }
        index
    }

    /// Walk forward from `index` to the last keyframe sharing its time.
    pub fn last_at_same_time(&self, mut index: usize) -> usize {
        let time = self.times[index];
        while index + 1 < self.keyframe_count && self.times[index + 1] == time {
            index += 1;
        }
        index
    }

    /// Unchecked slot access for indices already known to be in range.
    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &[f32] {
        let start = index * self.component_count;
        &self.values[start..start + self.component_count]
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut [f32] {
        let start = index * self.component_count;
        &mut self.values[start..start + self.component_count]
    }

    #[inline]
    pub(crate) fn check_value_len(&self, name: &str, len: usize) -> Result<()> {
        if len < self.component_count {
            return Err(KeyframeError::invalid_argument(format!(
                "{name}.len() < component_count ({len} < {})",
                self.component_count
            )));
        }
        Ok(())
    }
}

#[inline]
fn check_time(time: i32) -> Result<()> {
    if time < 0 {
        return Err(KeyframeError::invalid_argument("time < 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_times(times: &[i32]) -> KeyframeStore {
        let mut store = KeyframeStore::new(times.len(), 2).unwrap();
        for (i, t) in times.iter().enumerate() {
            store.set(i, *t, &[i as f32, -(i as f32)]).unwrap();
        }
        store
    }

    #[test]
    fn new_rejects_zero_counts() {
        assert!(matches!(
            KeyframeStore::new(0, 1),
            Err(KeyframeError::InvalidArgument { .. })
        ));
        assert!(matches!(
            KeyframeStore::new(1, 0),
            Err(KeyframeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn set_and_get_slots() {
        let mut store = KeyframeStore::new(2, 3).unwrap();
        store.set(1, 7, &[1.0, 2.0, 3.0, 99.0]).unwrap();
        let (time, value) = store.get(1).unwrap();
        assert_eq!(time, 7);
        assert_eq!(value, &[1.0, 2.0, 3.0]);
        assert_eq!(store.values(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);

        store.set_component(0, 2, 5.0).unwrap();
        assert_eq!(store.component(0, 2).unwrap(), 5.0);

        let mut out = [0.0; 4];
        store.copy_value(1, &mut out).unwrap();
        assert_eq!(out, [1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn bounds_and_argument_checks() {
        let mut store = KeyframeStore::new(2, 2).unwrap();
        assert!(matches!(
            store.get(2),
            Err(KeyframeError::IndexOutOfRange {
                kind: IndexKind::Keyframe,
                index: 2,
                len: 2
            })
        ));
        assert!(matches!(
            store.component(0, 2),
            Err(KeyframeError::IndexOutOfRange {
                kind: IndexKind::Component,
                ..
            })
        ));
        assert!(matches!(
            store.set(0, -1, &[0.0, 0.0]),
            Err(KeyframeError::InvalidArgument { .. })
        ));
        assert!(matches!(
            store.set_time(0, -5),
            Err(KeyframeError::InvalidArgument { .. })
        ));
        assert!(matches!(
            store.set(0, 1, &[0.0]),
            Err(KeyframeError::InvalidArgument { .. })
        ));
        let mut short = [0.0; 1];
        assert!(store.copy_value(0, &mut short).is_err());
    }

    #[test]
    fn out_of_order_time_is_accepted() {
        let mut store = store_with_times(&[0, 5]);
        store.set_time(1, 0).unwrap();
        store.set_time(0, 9).unwrap();
        assert_eq!(store.times(), &[9, 0]);
    }

    #[test]
    fn tie_scans() {
        let store = store_with_times(&[0, 5, 5, 5, 9]);
        for i in 1..=3 {
            assert_eq!(store.first_at_same_time(i), 1);
            assert_eq!(store.last_at_same_time(i), 3);
        }
        assert_eq!(store.first_at_same_time(0), 0);
        assert_eq!(store.last_at_same_time(4), 4);

        let hit = store.search(5).unwrap();
        assert!((1..=3).contains(&hit));
        assert_eq!(store.search(6), Err(4));
        assert_eq!(store.search(10), Err(5));
    }
}
