//! Live obstacle and projectile collections
//!
//! Field-local coordinates: x grows to the right, y grows downward. Obstacles
//! fall (y increases), projectiles rise (y decreases). Horizontal positions
//! never change after creation.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Entity identity, unique for the lifetime of one engine
pub type EntityId = u64;

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Coin,
    Diamond,
    Meteor,
    Bomb,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Coin,
        Category::Diamond,
        Category::Meteor,
        Category::Bomb,
    ];

    /// Hazards cost a life when they escape off the bottom
    pub fn is_hazard(self) -> bool {
        matches!(self, Category::Meteor | Category::Bomb)
    }

    /// Short instruction a host can show next to the category
    pub fn hint(self) -> &'static str {
        match self {
            Category::Coin => "Collect for +10 points",
            Category::Diamond => "Collect for +50 points",
            Category::Meteor | Category::Bomb => "Destroy or lose life!",
        }
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub pos: Vec2,
    /// Units per tick
    pub fall_speed: f32,
    /// Diameter; collision radius is half of this
    pub size: f32,
    pub category: Category,
}

impl Obstacle {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// A player-fired projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
}

/// Owns every live entity (kept in creation order for determinism)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    /// Next entity ID (never reset, so removed IDs are never reused)
    next_id: EntityId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_obstacle(
        &mut self,
        category: Category,
        pos: Vec2,
        size: f32,
        fall_speed: f32,
    ) -> EntityId {
        debug_assert!(size > 0.0, "obstacle size must be positive");
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos,
            fall_speed,
            size,
            category,
        });
        id
    }

    pub fn add_projectile(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile { id, pos });
        id
    }

    /// Move every entity by one tick
    pub fn advance(&mut self, projectile_speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.y += obstacle.fall_speed;
        }
        for projectile in &mut self.projectiles {
            projectile.pos.y -= projectile_speed;
        }
    }

    pub fn remove_obstacles(&mut self, ids: &HashSet<EntityId>) {
        if !ids.is_empty() {
            self.obstacles.retain(|o| !ids.contains(&o.id));
        }
    }

    pub fn remove_projectiles(&mut self, ids: &HashSet<EntityId>) {
        if !ids.is_empty() {
            self.projectiles.retain(|p| !ids.contains(&p.id));
        }
    }

    /// Drop every live entity
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.projectiles.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.projectiles.is_empty()
    }
}
