//! Host-facing simulation engine
//!
//! One engine owns one game: session state, entities, spawn clock and RNG.
//! The host drives it with [`Engine::tick`] at ~60 Hz and forwards input
//! through [`Engine::set_player_position`] and [`Engine::shoot`]. Calls that
//! make no sense in the current phase are ignored.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{EntityId, Obstacle, Projectile};
use super::events::TickReport;
use super::state::{Field, Phase, World, sanitize_extent};
use super::tick::tick;
use crate::tuning::Tuning;

/// The simulation engine, generic over its randomness source
#[derive(Debug, Clone)]
pub struct Engine<R = Pcg32> {
    world: World,
    tuning: Tuning,
    rng: R,
    /// Seed the RNG was built from, when known
    seed: Option<u64>,
}

impl Engine<Pcg32> {
    /// Create an engine with a deterministic seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an engine with a deterministic seed and custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut engine = Self::with_rng(Pcg32::seed_from_u64(seed), tuning);
        engine.seed = Some(seed);
        engine
    }

    /// Create an engine with a non-deterministic seed
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        log::info!("Engine seeded with {}", seed);
        Self::new(seed)
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine around any random generator
    pub fn with_rng(rng: R, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            world: World::new(tuning.starting_lives),
            tuning,
            rng,
            seed: None,
        }
    }

    /// Start a new session from any phase
    pub fn start(&mut self) {
        self.world.begin_session(self.tuning.starting_lives);
        log::info!(
            "Session started (lives: {}, field: {}x{})",
            self.world.board.lives(),
            self.world.field.width,
            self.world.field.height
        );
    }

    /// Same as [`Engine::start`]
    pub fn restart(&mut self) {
        self.start();
    }

    /// Abandon the current session and go back to idle
    pub fn stop(&mut self) {
        if self.world.phase == Phase::Idle {
            return;
        }
        self.world.end_session();
        log::info!("Session stopped with score {}", self.world.board.score());
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self, dt: f32) -> TickReport {
        tick(&mut self.world, &self.tuning, &mut self.rng, dt)
    }

    /// Forward horizontal drag input
    pub fn set_player_position(&mut self, x: f32, field_width: f32) {
        let field = Field {
            width: sanitize_extent(field_width),
            height: self.world.field.height,
        };
        self.world.set_field(field, self.tuning.field_margin);
        self.world.move_player(x, self.tuning.field_margin);
    }

    /// Fire a projectile from the player's muzzle.
    ///
    /// Returns the new projectile's ID, or `None` when not playing.
    pub fn shoot(&mut self, width: f32, height: f32) -> Option<EntityId> {
        self.resize(width, height);
        if self.world.phase != Phase::Playing || self.world.field.is_degenerate() {
            return None;
        }
        let muzzle = Vec2::new(
            self.world.player_x,
            self.world.field.height - self.tuning.muzzle_offset,
        );
        Some(self.world.store.add_projectile(muzzle))
    }

    /// Report a new field size (layout pass)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.set_field(Field::new(width, height), self.tuning.field_margin);
    }

    pub fn score(&self) -> u64 {
        self.world.board.score()
    }

    pub fn lives(&self) -> u32 {
        self.world.board.lives()
    }

    pub fn phase(&self) -> Phase {
        self.world.phase
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.world.store.obstacles
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.world.store.projectiles
    }

    pub fn player_x(&self) -> f32 {
        self.world.player_x
    }

    pub fn field(&self) -> Field {
        self.world.field
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Ticks simulated in the current session
    pub fn ticks(&self) -> u64 {
        self.world.ticks
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Read-only view of the full simulation state (for snapshots)
    pub fn world(&self) -> &World {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{Category, GameEvent};
    use proptest::prelude::*;

    const WIDTH: f32 = 400.0;
    const HEIGHT: f32 = 600.0;

    fn playing_engine(seed: u64) -> Engine {
        let mut engine = Engine::new(seed);
        engine.resize(WIDTH, HEIGHT);
        engine.start();
        engine
    }

    /// Place an obstacle directly, bypassing the spawn clock
    fn drop_obstacle(engine: &mut Engine, category: Category, x: f32, y: f32, size: f32, speed: f32) -> EntityId {
        engine
            .world
            .store
            .add_obstacle(category, Vec2::new(x, y), size, speed)
    }

    #[test]
    fn test_initial_state() {
        let engine = Engine::new(1);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.lives(), 3);
        assert!(engine.obstacles().is_empty());
        assert!(engine.projectiles().is_empty());
        assert_eq!(engine.seed(), Some(1));
    }

    #[test]
    fn test_start_centers_player() {
        let engine = playing_engine(1);
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.player_x(), 200.0);
    }

    #[test]
    fn test_player_position_clamped() {
        let mut engine = playing_engine(1);
        engine.set_player_position(-20.0, WIDTH);
        assert_eq!(engine.player_x(), 40.0);
        engine.set_player_position(1000.0, WIDTH);
        assert_eq!(engine.player_x(), 360.0);
        engine.set_player_position(150.0, WIDTH);
        assert_eq!(engine.player_x(), 150.0);
        // Input is accepted outside play too
        engine.stop();
        engine.set_player_position(300.0, WIDTH);
        assert_eq!(engine.player_x(), 300.0);
    }

    #[test]
    fn test_shoot_only_while_playing() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.shoot(WIDTH, HEIGHT), None);
        assert!(engine.projectiles().is_empty());

        engine.start();
        let id = engine.shoot(WIDTH, HEIGHT);
        assert!(id.is_some());
        assert_eq!(engine.projectiles()[0].pos, Vec2::new(200.0, 520.0));
    }

    #[test]
    fn test_shoot_ignored_on_degenerate_field() {
        let mut engine = Engine::new(1);
        engine.start();
        assert_eq!(engine.shoot(0.0, 0.0), None);
    }

    #[test]
    fn test_first_shot_fires_from_dragged_position() {
        // Host never calls resize: drag reports the width, the shot the height
        let mut engine = Engine::new(1);
        engine.start();
        engine.set_player_position(100.0, WIDTH);
        assert_eq!(engine.player_x(), 100.0);

        let id = engine.shoot(WIDTH, HEIGHT);

        assert!(id.is_some());
        assert_eq!(engine.player_x(), 100.0);
        assert_eq!(engine.projectiles()[0].pos, Vec2::new(100.0, 520.0));
    }

    #[test]
    fn test_zero_width_input_keeps_player_position() {
        let mut engine = playing_engine(1);
        engine.set_player_position(100.0, WIDTH);
        engine.set_player_position(100.0, 0.0);
        assert_eq!(engine.shoot(0.0, 0.0), None);

        engine.shoot(WIDTH, HEIGHT);

        assert_eq!(engine.player_x(), 100.0);
        assert_eq!(engine.projectiles()[0].pos, Vec2::new(100.0, 520.0));
    }

    #[test]
    fn test_dead_center_coin() {
        let mut engine = playing_engine(3);
        engine.shoot(WIDTH, HEIGHT);
        // After one tick both sit at y = 510
        let coin = drop_obstacle(&mut engine, Category::Coin, 200.0, 508.0, 40.0, 2.0);

        let report = engine.tick(0.0);

        assert_eq!(engine.score(), 10);
        assert_eq!(engine.lives(), 3);
        assert!(engine.obstacles().is_empty());
        assert!(engine.projectiles().is_empty());
        assert_eq!(report.points_scored(), 10);
        assert!(report.events.iter().any(|e| matches!(
            e,
            GameEvent::Destroyed { obstacle, category: Category::Coin, .. } if *obstacle == coin
        )));
    }

    /// Tick a lone unshot Bomb (y = -50, speed 3) until it leaves a field of
    /// the given height; returns the tick on which it escaped
    fn bomb_escape_tick(height: f32) -> u32 {
        let mut engine = Engine::new(3);
        engine.resize(WIDTH, height);
        engine.start();
        let bomb = drop_obstacle(&mut engine, Category::Bomb, 200.0, -50.0, 40.0, 3.0);

        for n in 1..=1000 {
            let report = engine.tick(0.0);
            if engine.obstacles().iter().all(|o| o.id != bomb) {
                assert_eq!(report.lives_lost(), 1);
                assert_eq!(engine.lives(), 2);
                assert_eq!(engine.phase(), Phase::Playing);
                return n;
            }
            assert_eq!(engine.lives(), 3);
        }
        panic!("bomb never left a field of height {}", height);
    }

    #[test]
    fn test_unshot_bomb_costs_one_life() {
        // 650 / 3 is not whole: escapes on tick ceil((H + 50) / 3)
        assert_eq!(bomb_escape_tick(HEIGHT), ((HEIGHT + 50.0) / 3.0).ceil() as u32);
        assert_eq!(bomb_escape_tick(HEIGHT), 217);
    }

    #[test]
    fn test_bomb_resting_on_bottom_edge_stays() {
        // 750 / 3 is whole: on tick 250 the bomb sits exactly at y = H, which
        // is still inside the field, so it escapes one tick later
        assert_eq!(bomb_escape_tick(700.0), 251);
    }

    #[test]
    fn test_simultaneous_hazards_batched() {
        let mut engine = playing_engine(3);
        drop_obstacle(&mut engine, Category::Meteor, 100.0, 598.0, 40.0, 3.0);
        drop_obstacle(&mut engine, Category::Bomb, 300.0, 598.0, 40.0, 3.0);

        let report = engine.tick(0.0);

        assert_eq!(engine.lives(), 1);
        let lives_events: Vec<_> = report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LivesLost { .. }))
            .collect();
        assert_eq!(
            lives_events,
            vec![&GameEvent::LivesLost { count: 2, remaining: 1 }]
        );
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut engine = playing_engine(3);
        engine.world.board.add_score(40);
        engine.world.board.lose_lives(2);
        drop_obstacle(&mut engine, Category::Bomb, 100.0, 599.0, 40.0, 3.0);
        drop_obstacle(&mut engine, Category::Coin, 200.0, 100.0, 40.0, 3.0);
        engine.shoot(WIDTH, HEIGHT);

        engine.tick(SIM_DT);
        assert_eq!(engine.phase(), Phase::GameOver);

        let score = engine.score();
        let lives = engine.lives();
        let obstacles = engine.obstacles().to_vec();
        let projectiles = engine.projectiles().to_vec();

        for _ in 0..300 {
            assert!(engine.tick(1.0).is_empty());
        }
        assert_eq!(engine.shoot(WIDTH, HEIGHT), None);

        assert_eq!(engine.score(), score);
        assert_eq!(engine.lives(), lives);
        assert_eq!(engine.obstacles(), obstacles.as_slice());
        assert_eq!(engine.projectiles(), projectiles.as_slice());
    }

    #[test]
    fn test_start_resets_from_any_phase() {
        let mut engine = playing_engine(3);
        engine.world.board.add_score(70);
        engine.world.board.lose_lives(1);
        drop_obstacle(&mut engine, Category::Diamond, 100.0, 100.0, 40.0, 3.0);
        engine.shoot(WIDTH, HEIGHT);

        // Playing -> start
        engine.start();
        assert_eq!((engine.score(), engine.lives()), (0, 3));
        assert!(engine.obstacles().is_empty() && engine.projectiles().is_empty());

        // GameOver -> restart
        engine.world.board.lose_lives(3);
        engine.world.phase = Phase::GameOver;
        engine.restart();
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!((engine.score(), engine.lives()), (0, 3));

        // Idle -> start
        engine.stop();
        assert_eq!(engine.phase(), Phase::Idle);
        engine.start();
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn test_stop_clears_entities_keeps_score() {
        let mut engine = playing_engine(3);
        engine.world.board.add_score(15);
        drop_obstacle(&mut engine, Category::Coin, 100.0, 100.0, 40.0, 3.0);

        engine.stop();

        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.score(), 15);
        assert!(engine.obstacles().is_empty());
        assert!(engine.tick(1.0).is_empty());
    }

    #[test]
    fn test_spawns_every_second() {
        let mut engine = playing_engine(11);
        let mut spawned = 0;
        for _ in 0..10 {
            for _ in 0..4 {
                spawned += engine
                    .tick(0.25)
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::Spawned { .. }))
                    .count();
            }
        }
        assert_eq!(spawned, 10);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = playing_engine(2024);
        let mut b = playing_engine(2024);

        for i in 0..2000 {
            if i % 15 == 0 {
                a.shoot(WIDTH, HEIGHT);
                b.shoot(WIDTH, HEIGHT);
            }
            let x = 40.0 + (i % 320) as f32;
            a.set_player_position(x, WIDTH);
            b.set_player_position(x, WIDTH);
            a.tick(SIM_DT);
            b.tick(SIM_DT);
        }

        assert_eq!(a.score(), b.score());
        assert_eq!(a.lives(), b.lives());
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.obstacles(), b.obstacles());
        assert_eq!(a.projectiles(), b.projectiles());
    }

    #[test]
    fn test_custom_rng() {
        let rng = Pcg32::seed_from_u64(5);
        let mut engine = Engine::with_rng(rng, Tuning::default());
        engine.resize(WIDTH, HEIGHT);
        engine.start();
        engine.tick(1.0);
        assert_eq!(engine.obstacles().len(), 1);
        assert_eq!(engine.seed(), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Tick(f32),
        Move(f32),
        Shoot,
        Start,
        Stop,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0.0f32..0.5).prop_map(Op::Tick),
            2 => (-100.0f32..500.0).prop_map(Op::Move),
            2 => Just(Op::Shoot),
            1 => Just(Op::Start),
            1 => Just(Op::Stop),
        ]
    }

    proptest! {
        #[test]
        fn prop_session_invariants(seed in any::<u64>(), ops in prop::collection::vec(op_strategy(), 1..400)) {
            let mut engine = Engine::new(seed);
            engine.resize(WIDTH, HEIGHT);
            engine.start();
            let mut last_score = engine.score();

            for op in ops {
                let restarted = matches!(op, Op::Start);
                match op {
                    Op::Tick(dt) => { engine.tick(dt); }
                    Op::Move(x) => engine.set_player_position(x, WIDTH),
                    Op::Shoot => { engine.shoot(WIDTH, HEIGHT); }
                    Op::Start => engine.start(),
                    Op::Stop => engine.stop(),
                }

                prop_assert!(engine.lives() <= 3);
                prop_assert!(engine.player_x() >= 40.0 && engine.player_x() <= 360.0);
                if engine.phase() == Phase::Playing {
                    prop_assert!(engine.lives() > 0);
                }
                if engine.phase() == Phase::GameOver {
                    prop_assert_eq!(engine.lives(), 0);
                }
                if !restarted {
                    prop_assert!(engine.score() >= last_score);
                }
                for obstacle in engine.obstacles() {
                    prop_assert!(obstacle.size > 0.0);
                }
                last_score = engine.score();
            }
        }
    }
}
