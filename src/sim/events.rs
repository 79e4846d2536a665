//! Per-tick gameplay events reported back to the host

use serde::{Deserialize, Serialize};

use super::entity::{Category, EntityId};

/// Something that happened during a tick, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        category: Category,
    },
    Destroyed {
        projectile: EntityId,
        obstacle: EntityId,
        category: Category,
        points: u64,
    },
    /// An obstacle fell off the bottom of the field
    Escaped { id: EntityId, category: Category },
    /// Batched life loss for the tick
    LivesLost { count: u32, remaining: u32 },
    GameOver { final_score: u64 },
}

/// Events produced by one tick (empty when the tick was a no-op)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Score gained from hits this tick
    pub fn points_scored(&self) -> u64 {
        self.events
            .iter()
            .map(|e| match e {
                GameEvent::Destroyed { points, .. } => *points,
                _ => 0,
            })
            .sum()
    }

    /// Lives deducted this tick
    pub fn lives_lost(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                GameEvent::LivesLost { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }

    pub fn game_over(&self) -> bool {
        self.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}
