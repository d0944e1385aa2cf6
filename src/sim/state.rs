//! Session state and the game phase machine
//!
//! Everything the frame loop mutates lives in one [`GameState`] value.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Coin, Enemy, Particle, ParticleColor, Player};
use super::spawner::Spawner;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen over a frozen world
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player touched an enemy
    GameOver,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Playfield size (width, height)
    pub bounds: Vec2,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Visual particles (pruned every tick)
    pub particles: Vec<Particle>,
    /// Fractional score, floored for display and persistence
    pub score: f32,
    pub coin_count: u32,
    /// Best floored score, survives resets
    pub best: u32,
    pub spawner: Spawner,
    /// Current shake magnitude (decays every frame)
    pub screen_shake: f32,
    /// Clock time of the previous frame
    pub last_frame: Option<f64>,
    /// Frames rendered since creation
    pub frame_count: u64,
}

impl GameState {
    /// Create a new session in the menu, with the clock starting at `now`
    pub fn new(seed: u64, bounds: Vec2, now: f64) -> Self {
        let bounds = bounds.max(Vec2::ONE);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            bounds,
            player: Player::new(bounds * 0.5),
            enemies: Vec::new(),
            coins: Vec::new(),
            particles: Vec::new(),
            score: 0.0,
            coin_count: 0,
            best: 0,
            spawner: Spawner::new(now),
            screen_shake: 0.0,
            last_frame: Some(now),
            frame_count: 0,
        }
    }

    /// Builder-style best score (loaded from storage by the host)
    pub fn with_best(mut self, best: u32) -> Self {
        self.best = best;
        self
    }

    /// Clear the session back to the menu. Best score and RNG stream carry over.
    pub fn reset(&mut self, now: f64) {
        self.player = Player::new(self.bounds * 0.5);
        self.enemies.clear();
        self.coins.clear();
        self.particles.clear();
        self.score = 0.0;
        self.coin_count = 0;
        self.spawner.reset(now);
        self.screen_shake = 0.0;
        self.last_frame = Some(now);
        self.phase = GamePhase::Menu;
    }

    /// Full reset straight into play
    pub fn restart(&mut self, now: f64) {
        self.reset(now);
        self.phase = GamePhase::Playing;
        log::info!("Session restarted (best {})", self.best);
    }

    /// Update the playfield size (canvas resize)
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds.max(Vec2::ONE);
    }

    /// Dash with feedback: shake and a spark burst at the landing point
    pub fn dash(&mut self, now: f64) -> bool {
        if !self.player.try_dash(now) {
            return false;
        }
        self.screen_shake = DASH_SHAKE;
        Particle::burst(
            &mut self.particles,
            self.player.pos,
            DASH_PARTICLES,
            DASH_PARTICLE_LIFE,
            ParticleColor::Spark,
            &mut self.rng,
        );
        true
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
