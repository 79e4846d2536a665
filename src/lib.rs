//! Lava Shooter - a falling-obstacle arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, session state)
//! - `tuning`: Data-driven game balance
//!
//! The simulation is host-driven: something outside this crate calls
//! [`sim::Engine::tick`] at a steady cadence, forwards pointer input and
//! renders the exposed entity lists.

pub mod sim;
pub mod tuning;

pub use sim::{Category, Engine, GameEvent, Obstacle, Phase, Projectile, TickReport};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal host tick rate. Per-tick speeds below assume this cadence.
    pub const TICK_RATE_HZ: f32 = 60.0;
    /// Nominal duration of one tick in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ;

    /// Horizontal margin kept clear on both sides of the field
    pub const FIELD_MARGIN: f32 = 40.0;

    /// Simulated seconds between obstacle spawns
    pub const SPAWN_INTERVAL_SECS: f32 = 1.0;
    /// Upper bound on spawns fired by a single (very long) tick
    pub const MAX_SPAWNS_PER_TICK: u32 = 8;
    /// Obstacles appear above the visible field
    pub const SPAWN_Y: f32 = -50.0;
    /// Obstacle diameter range
    pub const OBSTACLE_MIN_SIZE: f32 = 30.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 50.0;
    /// Obstacle fall speed range (units per tick)
    pub const FALL_SPEED_MIN: f32 = 2.0;
    pub const FALL_SPEED_MAX: f32 = 5.0;

    /// Projectile rise speed (units per tick)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Projectiles leave the muzzle this far above the field bottom
    pub const MUZZLE_OFFSET: f32 = 80.0;
    /// Projectiles above this line are gone
    pub const PROJECTILE_DESPAWN_Y: f32 = -50.0;

    /// Lives at the start of a session
    pub const STARTING_LIVES: u32 = 3;

    /// Points per destroyed obstacle
    pub const COIN_POINTS: u64 = 10;
    pub const DIAMOND_POINTS: u64 = 50;
    pub const METEOR_POINTS: u64 = 5;
    pub const BOMB_POINTS: u64 = 10;
}

/// Clamp `x` into `[margin, extent - margin]`.
///
/// Extents too small to hold both margins collapse to their center.
#[inline]
pub fn clamp_to_margins(x: f32, extent: f32, margin: f32) -> f32 {
    let lo = margin;
    let hi = extent - margin;
    if hi < lo {
        return extent / 2.0;
    }
    x.clamp(lo, hi)
}
