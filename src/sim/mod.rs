//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the host clock, never read directly
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{CollisionOutcome, check_collisions};
pub use entities::{Coin, Enemy, Particle, ParticleColor, Player};
pub use spawner::{SpawnReport, Spawner, spawn_due};
pub use state::{GamePhase, GameState};
pub use tick::{FrameInput, TickReport, tick};
pub use vector::circles_overlap;
