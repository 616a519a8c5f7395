//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! One tick flows input -> movement updates -> collision resolution; the
//! renderer then reads the state without mutating it.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, resolve};
pub use state::{
    Bubble, Enemy, EnemyKind, GameState, LossReason, Player, SessionPhase, Treasure, TreasureKind,
};
pub use tick::{TickInput, tick};
