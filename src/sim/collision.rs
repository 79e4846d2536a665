//! Projectile/obstacle collision detection and resolution
//!
//! Every live (projectile, obstacle) pair is tested once per tick. A pair hits
//! when the distance between centers is strictly less than the obstacle's
//! radius. Removals are batched until the whole pass is done.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Category, EntityId, EntityStore, Obstacle};
use super::score::Scoreboard;
use crate::tuning::PointTable;

/// One resolved projectile/obstacle hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub projectile: EntityId,
    pub obstacle: EntityId,
    pub category: Category,
    pub points: u64,
}

/// Check whether a projectile centered at `point` overlaps an obstacle
#[inline]
pub fn projectile_hits(point: Vec2, obstacle: &Obstacle) -> bool {
    point.distance(obstacle.pos) < obstacle.radius()
}

/// Find all hits for this tick, award their points, and remove both sides.
///
/// Pairs are visited projectile-major in store order. Each projectile and
/// each obstacle takes part in at most one hit per tick; the first qualifying
/// pair claims both.
pub fn resolve(store: &mut EntityStore, points: &PointTable, board: &mut Scoreboard) -> Vec<Hit> {
    let mut hits = Vec::new();
    let mut spent_projectiles: HashSet<EntityId> = HashSet::new();
    let mut spent_obstacles: HashSet<EntityId> = HashSet::new();

    for projectile in &store.projectiles {
        let target = store
            .obstacles
            .iter()
            .filter(|o| !spent_obstacles.contains(&o.id))
            .find(|o| projectile_hits(projectile.pos, o));

        if let Some(obstacle) = target {
            let awarded = points.for_category(obstacle.category);
            board.add_score(awarded);
            spent_projectiles.insert(projectile.id);
            spent_obstacles.insert(obstacle.id);
            hits.push(Hit {
                projectile: projectile.id,
                obstacle: obstacle.id,
                category: obstacle.category,
                points: awarded,
            });
        }
    }

    store.remove_projectiles(&spent_projectiles);
    store.remove_obstacles(&spent_obstacles);
    hits
}
