//! Fixed-rate simulation tick
//!
//! Pipeline for one tick while playing:
//! spawn → motion → collisions → boundary sweep → game-over check.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::events::{GameEvent, TickReport};
use super::spawn::roll_obstacle;
use super::state::{Phase, World};
use super::sweep::sweep;
use crate::tuning::Tuning;

/// Advance the world by one tick.
///
/// `dt` feeds only the spawn clock; motion is per tick. Does nothing unless
/// the session is playing and the field has a real size.
pub fn tick<R: Rng + ?Sized>(world: &mut World, tuning: &Tuning, rng: &mut R, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    if world.phase != Phase::Playing || world.field.is_degenerate() {
        return report;
    }

    world.ticks += 1;

    // Spawn
    let due = world.spawner.advance(dt, tuning.spawn_interval);
    for _ in 0..due {
        let roll = roll_obstacle(rng, world.field.width, tuning);
        let id = world.store.add_obstacle(
            roll.category,
            Vec2::new(roll.x, tuning.spawn_y),
            roll.size,
            roll.fall_speed,
        );
        report.push(GameEvent::Spawned {
            id,
            category: roll.category,
        });
    }

    // Motion
    world.store.advance(tuning.projectile_speed);

    // Collisions
    for hit in collision::resolve(&mut world.store, &tuning.points, &mut world.board) {
        report.push(GameEvent::Destroyed {
            projectile: hit.projectile,
            obstacle: hit.obstacle,
            category: hit.category,
            points: hit.points,
        });
    }

    // Boundary sweep
    let outcome = sweep(&mut world.store, world.field.height, tuning.projectile_despawn_y);
    for obstacle in &outcome.escaped {
        if obstacle.category.is_hazard() {
            log::debug!("{:?} {} reached bottom", obstacle.category, obstacle.id);
        }
        report.push(GameEvent::Escaped {
            id: obstacle.id,
            category: obstacle.category,
        });
    }
    if outcome.lives_lost > 0 {
        world.board.lose_lives(outcome.lives_lost);
        log::debug!(
            "Lost {} lives. Remaining: {}",
            outcome.lives_lost,
            world.board.lives()
        );
        report.push(GameEvent::LivesLost {
            count: outcome.lives_lost,
            remaining: world.board.lives(),
        });
    }

    // Game over check, after every update
    if world.board.is_out() {
        world.phase = Phase::GameOver;
        log::info!("Game over after {} ticks, final score {}", world.ticks, world.board.score());
        report.push(GameEvent::GameOver {
            final_score: world.board.score(),
        });
    }

    report
}
