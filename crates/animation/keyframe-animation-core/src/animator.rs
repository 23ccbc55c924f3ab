//! Maps world time onto sequence time and drives animatables.
//!
//! `sequence_time = round(reference_sequence_time + speed * (world_time - reference_world_time))`

use serde::{Deserialize, Serialize};

use crate::animatable::Animatable;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    reference_world_time: i32,
    reference_sequence_time: i32,
    speed: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            reference_world_time: 0,
            reference_sequence_time: 0,
            speed: 1.0,
        }
    }
}

impl Animator {
    pub fn new(world_time: i32, sequence_time: i32, speed: f32) -> Self {
        Self {
            reference_world_time: world_time,
            reference_sequence_time: sequence_time,
            speed,
        }
    }

    /// Start sequence time 0 at `world_time`, at normal speed.
    pub fn starting_at(world_time: i32) -> Self {
        Self::new(world_time, 0, 1.0)
    }

    #[inline]
    pub fn reference_world_time(&self) -> i32 {
        self.reference_world_time
    }

    #[inline]
    pub fn reference_sequence_time(&self) -> i32 {
        self.reference_sequence_time
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Sequence time at `world_time`. Halves round up; the result saturates at the `i32` range.
    pub fn sequence_time(&self, world_time: i32) -> i32 {
        let elapsed = world_time as f64 - self.reference_world_time as f64;
        let t = self.reference_sequence_time as f64 + self.speed as f64 * elapsed;
        (t + 0.5).floor() as i32
    }

    pub fn set_reference_time(&mut self, world_time: i32, sequence_time: i32) {
        self.reference_world_time = world_time;
        self.reference_sequence_time = sequence_time;
    }

    /// Change speed at `world_time` without a jump in sequence time.
    pub fn set_speed(&mut self, speed: f32, world_time: i32) {
        self.reference_sequence_time = self.sequence_time(world_time);
        self.reference_world_time = world_time;
        self.speed = speed;
    }

    /// Animate every target at the sequence time for `world_time`.
    /// Returns true if any target is still within its sequence's domain.
    pub fn animate(&self, world_time: i32, animatables: &mut [&mut dyn Animatable]) -> bool {
        let time = self.sequence_time(world_time);
        let mut active = false;
        for animatable in animatables.iter_mut() {
            active |= animatable.animate(time);
        }
        active
    }
}
