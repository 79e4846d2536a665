//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-driven ticks only (no timers, no threads)
//! - Injected, seedable RNG only
//! - Stable iteration order (entities kept in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod entity;
pub mod events;
pub mod score;
pub mod spawn;
pub mod state;
pub mod sweep;
pub mod tick;

pub use collision::{Hit, projectile_hits};
pub use engine::Engine;
pub use entity::{Category, EntityId, EntityStore, Obstacle, Projectile};
pub use events::{GameEvent, TickReport};
pub use score::Scoreboard;
pub use spawn::{ObstacleRoll, SpawnController, roll_obstacle};
pub use state::{Field, Phase, World};
pub use sweep::{SweepOutcome, sweep};
pub use tick::tick;
