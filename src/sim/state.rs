//! Session state and core simulation types
//!
//! Everything a tick reads or writes, except the RNG, lives in [`World`].

use serde::{Deserialize, Serialize};

use super::entity::EntityStore;
use super::score::Scoreboard;
use super::spawn::SpawnController;
use crate::clamp_to_margins;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No session yet, or the host stopped it
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Lives ran out; waits for a restart
    GameOver,
}

/// Play-field size last reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    /// Build a field, treating negative or non-finite sizes as zero
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// True until the host has reported a real layout
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

pub(crate) fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub phase: Phase,
    pub field: Field,
    pub board: Scoreboard,
    pub store: EntityStore,
    pub spawner: SpawnController,
    /// Player horizontal position
    pub player_x: f32,
    /// Ticks simulated in the current session
    pub ticks: u64,
    /// Set once `player_x` holds a real position (start in a known field, or input)
    #[serde(default)]
    player_placed: bool,
}

impl World {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            phase: Phase::Idle,
            field: Field::default(),
            board: Scoreboard::new(starting_lives),
            store: EntityStore::new(),
            spawner: SpawnController::new(),
            player_x: 0.0,
            ticks: 0,
            player_placed: false,
        }
    }

    /// Begin a fresh session from any phase
    pub fn begin_session(&mut self, starting_lives: u32) {
        self.board.reset(starting_lives);
        self.store.clear();
        self.spawner.reset();
        self.player_x = self.field.center_x();
        self.player_placed = self.field.width > 0.0;
        self.ticks = 0;
        self.phase = Phase::Playing;
    }

    /// Abandon the session; score and lives stay readable
    pub fn end_session(&mut self) {
        self.store.clear();
        self.spawner.reset();
        self.phase = Phase::Idle;
    }

    /// Record a new field size and keep the player inside it.
    ///
    /// A zero width leaves the player where it is. The player is centered
    /// only if nothing has positioned it yet.
    pub fn set_field(&mut self, field: Field, margin: f32) {
        self.field = field;
        if field.width <= 0.0 {
            return;
        }
        self.player_x = if self.player_placed {
            clamp_to_margins(self.player_x, field.width, margin)
        } else {
            field.center_x()
        };
        self.player_placed = true;
    }

    /// Move the player, clamped to the field margins.
    ///
    /// Ignored while the field width is unknown.
    pub fn move_player(&mut self, x: f32, margin: f32) {
        if x.is_finite() && self.field.width > 0.0 {
            self.player_x = clamp_to_margins(x, self.field.width, margin);
            self.player_placed = true;
        }
    }
}
