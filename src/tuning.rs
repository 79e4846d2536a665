//! Data-driven game balance
//!
//! Defaults mirror [`crate::consts`]. A host may load overrides from JSON;
//! missing fields keep their defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Category;

/// Closed float interval used for randomized attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw uniformly from `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Score awarded for destroying each category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointTable {
    pub coin: u64,
    pub diamond: u64,
    pub meteor: u64,
    pub bomb: u64,
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            coin: COIN_POINTS,
            diamond: DIAMOND_POINTS,
            meteor: METEOR_POINTS,
            bomb: BOMB_POINTS,
        }
    }
}

impl PointTable {
    pub fn for_category(&self, category: Category) -> u64 {
        match category {
            Category::Coin => self.coin,
            Category::Diamond => self.diamond,
            Category::Meteor => self.meteor,
            Category::Bomb => self.bomb,
        }
    }
}

/// Balance knobs for one engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulated seconds between spawns
    pub spawn_interval: f32,
    /// Horizontal margin for spawns and the player
    pub field_margin: f32,
    /// Spawn height (negative = above the field)
    pub spawn_y: f32,
    /// Obstacle diameter
    pub obstacle_size: FloatRange,
    /// Obstacle fall speed, units per tick
    pub fall_speed: FloatRange,
    /// Projectile rise speed, units per tick
    pub projectile_speed: f32,
    /// Distance from the field bottom to the muzzle
    pub muzzle_offset: f32,
    /// Projectiles with y below this are removed
    pub projectile_despawn_y: f32,
    pub starting_lives: u32,
    pub points: PointTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL_SECS,
            field_margin: FIELD_MARGIN,
            spawn_y: SPAWN_Y,
            obstacle_size: FloatRange::new(OBSTACLE_MIN_SIZE, OBSTACLE_MAX_SIZE),
            fall_speed: FloatRange::new(FALL_SPEED_MIN, FALL_SPEED_MAX),
            projectile_speed: PROJECTILE_SPEED,
            muzzle_offset: MUZZLE_OFFSET,
            projectile_despawn_y: PROJECTILE_DESPAWN_Y,
            starting_lives: STARTING_LIVES,
            points: PointTable::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and repair any unusable values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Return a copy with unusable values replaced.
    ///
    /// Every repair is logged at warn level.
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.spawn_interval.is_finite() && self.spawn_interval > 0.0) {
            log::warn!(
                "spawn_interval {} invalid, using {}",
                self.spawn_interval,
                defaults.spawn_interval
            );
            self.spawn_interval = defaults.spawn_interval;
        }

        if !(self.field_margin.is_finite() && self.field_margin >= 0.0) {
            log::warn!("field_margin {} invalid, using {}", self.field_margin, defaults.field_margin);
            self.field_margin = defaults.field_margin;
        }

        if !self.spawn_y.is_finite() {
            log::warn!("spawn_y {} invalid, using {}", self.spawn_y, defaults.spawn_y);
            self.spawn_y = defaults.spawn_y;
        }

        self.obstacle_size = repair_range("obstacle_size", self.obstacle_size, defaults.obstacle_size);
        if self.obstacle_size.min <= 0.0 {
            log::warn!(
                "obstacle_size {:?} must be positive, using {:?}",
                self.obstacle_size,
                defaults.obstacle_size
            );
            self.obstacle_size = defaults.obstacle_size;
        }

        self.fall_speed = repair_range("fall_speed", self.fall_speed, defaults.fall_speed);

        for (name, value, default) in [
            ("projectile_speed", &mut self.projectile_speed, defaults.projectile_speed),
            ("muzzle_offset", &mut self.muzzle_offset, defaults.muzzle_offset),
            ("projectile_despawn_y", &mut self.projectile_despawn_y, defaults.projectile_despawn_y),
        ] {
            if !value.is_finite() {
                log::warn!("{} {} invalid, using {}", name, value, default);
                *value = default;
            }
        }

        if self.starting_lives == 0 {
            log::warn!("starting_lives must be at least 1, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }

        self
    }
}

fn repair_range(name: &str, range: FloatRange, default: FloatRange) -> FloatRange {
    if !range.is_finite() {
        log::warn!("{} {:?} invalid, using {:?}", name, range, default);
        return default;
    }
    if range.min > range.max {
        log::warn!("{} {:?} inverted, swapping bounds", name, range);
        return FloatRange::new(range.max, range.min);
    }
    range
}
