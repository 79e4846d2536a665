//! Timed obstacle spawning
//!
//! The spawn clock accumulates the `dt` the host passes to each tick and fires
//! once per elapsed interval.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Category;
use crate::clamp_to_margins;
use crate::consts::MAX_SPAWNS_PER_TICK;
use crate::tuning::Tuning;

/// Accumulates simulated time between spawns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnController {
    elapsed: f32,
}

impl SpawnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance the clock and return how many spawns are due
    pub fn advance(&mut self, dt: f32, interval: f32) -> u32 {
        if !(dt.is_finite() && dt > 0.0) {
            return 0;
        }
        self.elapsed += dt;

        let mut due = 0;
        while self.elapsed >= interval && due < MAX_SPAWNS_PER_TICK {
            self.elapsed -= interval;
            due += 1;
        }
        if due == MAX_SPAWNS_PER_TICK {
            // Drop the backlog from a stalled host instead of flooding the field
            self.elapsed %= interval;
        }
        due
    }
}

/// Randomized attributes for one new obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRoll {
    pub category: Category,
    pub x: f32,
    pub size: f32,
    pub fall_speed: f32,
}

/// Draw a new obstacle for a field of the given width
pub fn roll_obstacle<R: Rng + ?Sized>(rng: &mut R, field_width: f32, tuning: &Tuning) -> ObstacleRoll {
    let category = Category::ALL[rng.random_range(0..Category::ALL.len())];

    let margin = tuning.field_margin;
    let x = if field_width - margin >= margin {
        rng.random_range(margin..=field_width - margin)
    } else {
        clamp_to_margins(0.0, field_width, margin)
    };

    ObstacleRoll {
        category,
        x,
        size: tuning.obstacle_size.sample(rng),
        fall_speed: tuning.fall_speed.sample(rng),
    }
}
