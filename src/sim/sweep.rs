//! Boundary sweep: drop entities that left the field
//!
//! Hazards that leave through the bottom are counted, and the total is
//! deducted from lives once per tick.

use serde::{Deserialize, Serialize};

use super::entity::{EntityStore, Obstacle};

/// What one sweep removed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// Obstacles that fell past the bottom edge, in store order
    pub escaped: Vec<Obstacle>,
    /// Hazards among `escaped`
    pub lives_lost: u32,
}

/// Remove obstacles below `field_height` and projectiles above `despawn_y`
pub fn sweep(store: &mut EntityStore, field_height: f32, despawn_y: f32) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();

    store.obstacles.retain(|obstacle| {
        if obstacle.pos.y > field_height {
            if obstacle.category.is_hazard() {
                outcome.lives_lost += 1;
            }
            outcome.escaped.push(obstacle.clone());
            false
        } else {
            true
        }
    });

    store.projectiles.retain(|p| p.pos.y >= despawn_y);

    outcome
}
