//! Abyss Dive - An underwater treasure-diving arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, patrol AI, oxygen, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Persisted preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the original per-frame tuning)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (logical pixels, matches the display surface)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Player (diver) defaults - movement units are pixels per tick
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_ACCEL: f32 = 0.2;
    pub const PLAYER_FRICTION: f32 = 0.95;
    /// Velocity components below this are zeroed to stop infinite decay
    pub const VELOCITY_EPSILON: f32 = 0.01;
    /// Per-axis scale when two perpendicular axes are held (~1/sqrt 2)
    pub const DIAGONAL_SCALE: f32 = 0.707;
    /// Extra inset beyond the radius when clamping to the arena
    pub const PLAYER_BOUND_INSET: f32 = 10.0;

    /// Treasures
    pub const TREASURE_COUNT: usize = 8;
    pub const TREASURE_RADIUS: f32 = 15.0;

    /// Enemies
    pub const ENEMY_COUNT: usize = 5;
    pub const ENEMY_RADIUS: f32 = 18.0;
    /// Speed cap; velocity is rescaled when it exceeds this
    pub const ENEMY_MAX_SPEED: f32 = 2.0;
    pub const ENEMY_STEER_ACCEL: f32 = 0.1;
    /// Arrival threshold: within this distance the patrol target is replaced
    pub const ENEMY_ARRIVE_DIST: f32 = 50.0;
    /// No steering below this distance (prevents jitter on top of the target)
    pub const ENEMY_MIN_STEER_DIST: f32 = 10.0;
    pub const ENEMY_BOUND_MARGIN: f32 = 30.0;
    /// Patrol targets are picked this far inside the arena edges
    pub const PATROL_MARGIN: f32 = 100.0;

    /// Ambient bubbles
    pub const BUBBLE_COUNT: usize = 30;
    /// Bubbles recycle to the bottom once this far above the top edge
    pub const BUBBLE_RECYCLE_MARGIN: f32 = 50.0;
    /// Extra bubbles spawned at a treasure pickup
    pub const PICKUP_BURST_BUBBLES: usize = 5;

    /// Oxygen
    pub const OXYGEN_MAX: f32 = 100.0;
    /// Depletion in units per wall-clock second
    pub const OXYGEN_RATE: f32 = 0.5;
    /// Depletion is applied in batches of at least this much elapsed time
    pub const OXYGEN_BATCH_SECS: f32 = 0.1;
    pub const LOW_OXYGEN_FRACTION: f32 = 0.30;
    /// Chance per depletion batch of the low-oxygen warning firing
    pub const LOW_OXYGEN_WARN_CHANCE: f32 = 0.01;

    /// Transient effects
    pub const PICKUP_SHAKE: f32 = 5.0;
    pub const DEATH_SHAKE: f32 = 15.0;
    /// Screen shake magnitude decays by this factor each tick
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Fade overlay alpha change per tick
    pub const FADE_RATE: f32 = 0.02;
    /// Status message lifetime in ticks
    pub const MESSAGE_TICKS: u32 = 60;
    /// Delay between a terminal transition and the outcome screen reveal
    pub const OUTCOME_DELAY_SECS: f32 = 1.0;
}

/// Clamp a point into the rectangle spanning `min..=max` on both axes
#[inline]
pub fn clamp_point(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(p.x.clamp(min.x, max.x), p.y.clamp(min.y, max.y))
}

/// Angle of the vector from `from` to `to`, in radians
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
