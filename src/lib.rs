//! Dodge & Dash - A swarm-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `input`: Keyboard/touch normalization into per-frame input
//! - `renderer`: Per-frame draw data and the browser canvas painter
//! - `platform`: Browser/native storage abstraction
//! - `highscores`: Best score persistence
//! - `settings`: Player preferences

pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScoreStore;
pub use input::InputNormalizer;
pub use settings::Settings;

/// Tuned gameplay constants
///
/// Speeds are tuned against millisecond `dt` multiplied by [`FRAME_SCALE`].
pub mod consts {
    /// Converts millisecond dt into the tuned per-frame scale (~60 fps reference)
    pub const FRAME_SCALE: f32 = 0.06;
    /// Upper bound for a single frame's dt (ms)
    pub const MAX_FRAME_DT: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 3.4;
    /// Velocity blend toward desired velocity each tick
    pub const PLAYER_INERTIA_LERP: f32 = 0.6;
    /// Input below this magnitude leaves the facing untouched
    pub const INPUT_EPSILON: f32 = 0.001;

    /// Dash
    pub const DASH_COOLDOWN_MS: f64 = 2800.0;
    pub const DASH_DISTANCE: f32 = 140.0;
    pub const DASH_INVULNERABLE_MS: f32 = 220.0;
    pub const DASH_SHAKE: f32 = 10.0;
    pub const DASH_PARTICLES: usize = 22;
    pub const DASH_PARTICLE_LIFE: f32 = 10.0;

    /// Enemy spawn parameters
    pub const ENEMY_RADIUS_MIN: f32 = 12.0;
    pub const ENEMY_RADIUS_MAX: f32 = 18.0;
    pub const ENEMY_TURN_RATE_MIN: f32 = 0.02;
    pub const ENEMY_TURN_RATE_MAX: f32 = 0.06;
    pub const ENEMY_BASE_SPEED: f32 = 1.8;
    pub const ENEMY_SPEED_JITTER_MIN: f32 = 0.2;
    pub const ENEMY_SPEED_JITTER_MAX: f32 = 0.7;
    /// Score-driven speed bonus: min(cap, factor * sqrt(score + 1))
    pub const ENEMY_SPEED_BONUS_FACTOR: f32 = 0.15;
    pub const ENEMY_SPEED_BONUS_CAP: f32 = 4.0;
    pub const ENEMY_TRAIL_CHANCE: f64 = 0.02;
    pub const ENEMY_TRAIL_LIFE: f32 = 5.0;
    /// Distance beyond the screen edge where enemies appear
    pub const ENEMY_EDGE_OFFSET: f32 = 20.0;

    /// Enemy spawn cadence (ms)
    pub const ENEMY_SPAWN_DELAY_START: f64 = 900.0;
    pub const ENEMY_SPAWN_DELAY_FLOOR: f64 = 350.0;
    pub const ENEMY_SPAWN_DELAY_DECAY: f64 = 0.985;

    /// Coins
    pub const COIN_RADIUS: f32 = 10.0;
    pub const COIN_PHASE_RATE: f32 = 0.005;
    pub const COIN_SPAWN_DELAY_START: f64 = 1200.0;
    pub const COIN_SPAWN_DELAY_MIN: f64 = 900.0;
    pub const COIN_SPAWN_DELAY_MAX: f64 = 1400.0;
    pub const COIN_SPAWN_ATTEMPTS: u32 = 40;
    pub const COIN_SPAWN_MARGIN: f32 = 30.0;
    /// Minimum distance between a new coin and the player
    pub const COIN_SAFE_DISTANCE: f32 = 120.0;
    pub const COIN_SCORE: f32 = 15.0;
    pub const COIN_SHAKE: f32 = 6.0;
    pub const COIN_PARTICLES: usize = 14;
    pub const COIN_PARTICLE_LIFE: f32 = 12.0;

    /// Death
    pub const DEATH_SHAKE: f32 = 14.0;
    pub const DEATH_PARTICLES: usize = 30;
    pub const DEATH_PARTICLE_LIFE: f32 = 16.0;

    /// Particles
    pub const PARTICLE_DRAG: f32 = 0.98;
    pub const PARTICLE_SPEED_MIN: f32 = 0.5;
    pub const PARTICLE_SPEED_MAX: f32 = 3.0;
    pub const PARTICLE_LIFE_JITTER_MIN: f32 = -4.0;
    pub const PARTICLE_LIFE_JITTER_MAX: f32 = 6.0;
    pub const PARTICLE_SIZE_MIN: f32 = 2.0;
    pub const PARTICLE_SIZE_MAX: f32 = 5.0;

    /// Score accrual per millisecond of play
    pub const SCORE_PER_MS: f32 = 0.01;
    /// Screen shake decay per rendered frame
    pub const SHAKE_DECAY: f32 = 0.6;
}

/// Signed shortest rotation from `from` to `to`, in (-π, π]
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let d = (to - from).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}

/// Clamp a raw frame delta (ms) into the range the simulation accepts
#[inline]
pub fn clamp_dt(raw_ms: f64) -> f32 {
    if raw_ms.is_nan() {
        return 0.0;
    }
    raw_ms.clamp(0.0, consts::MAX_FRAME_DT as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_diff_wraps() {
        assert!((angle_diff(0.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((angle_diff(0.5, 0.0) + 0.5).abs() < 1e-6);
        // Crossing the ±π seam takes the short way round
        let d = angle_diff(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_dt_bounds() {
        assert_eq!(clamp_dt(-5.0), 0.0);
        assert_eq!(clamp_dt(16.0), 16.0);
        assert_eq!(clamp_dt(5000.0), 50.0);
        assert_eq!(clamp_dt(f64::NAN), 0.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_dt_in_range(raw in -1.0e9f64..1.0e9) {
            let dt = clamp_dt(raw);
            prop_assert!((0.0..=consts::MAX_FRAME_DT).contains(&dt));
        }

        #[test]
        fn prop_angle_diff_in_half_open_range(a in -20.0f32..20.0, b in -20.0f32..20.0) {
            let d = angle_diff(a, b);
            prop_assert!(d > -PI - 1e-4 && d <= PI + 1e-4);
        }
    }
}
