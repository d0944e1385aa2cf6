//! Time-gated enemy and coin spawning
//!
//! Enemies arrive from just outside a random screen edge, faster as the score
//! climbs and more often as the session goes on. Coins land somewhere fair:
//! away from the player when possible, in the middle of the field otherwise.

use glam::Vec2;
use rand::Rng;

use super::entities::{Coin, Enemy};
use super::state::GameState;
use crate::consts::*;

/// Spawn timers for both entity kinds
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Clock time of the last enemy spawn
    pub last_enemy: f64,
    /// Current interval between enemies (shrinks toward the floor)
    pub enemy_delay: f64,
    /// Clock time of the last coin spawn
    pub last_coin: f64,
    /// Current interval between coins (redrawn after each coin)
    pub coin_delay: f64,
}

impl Spawner {
    pub fn new(now: f64) -> Self {
        Self {
            last_enemy: now,
            enemy_delay: ENEMY_SPAWN_DELAY_START,
            last_coin: now,
            coin_delay: COIN_SPAWN_DELAY_START,
        }
    }

    /// Restart both timers at `now`. The coin delay keeps its last draw.
    pub fn reset(&mut self, now: f64) {
        self.last_enemy = now;
        self.enemy_delay = ENEMY_SPAWN_DELAY_START;
        self.last_coin = now;
    }

    /// Shrink the enemy interval after a spawn
    fn tighten_enemy_delay(&mut self) {
        self.enemy_delay = (self.enemy_delay * ENEMY_SPAWN_DELAY_DECAY).max(ENEMY_SPAWN_DELAY_FLOOR);
    }
}

/// What a spawn check produced this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub enemy: bool,
    pub coin: bool,
}

/// Uniform float in `[lo, hi)`; tolerates an empty or inverted range
#[inline]
fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Spawn whatever is due at `now`
pub fn spawn_due(state: &mut GameState, now: f64) -> SpawnReport {
    let mut report = SpawnReport::default();

    if now - state.spawner.last_enemy > state.spawner.enemy_delay {
        state.spawner.last_enemy = now;
        spawn_enemy_at_edge(state);
        state.spawner.tighten_enemy_delay();
        report.enemy = true;
    }

    if now - state.spawner.last_coin > state.spawner.coin_delay {
        state.spawner.last_coin = now;
        spawn_coin(state);
        state.spawner.coin_delay = state
            .rng
            .random_range(COIN_SPAWN_DELAY_MIN..COIN_SPAWN_DELAY_MAX);
        report.coin = true;
    }

    report
}

/// Pick a point just outside one of the four edges
pub fn edge_position<R: Rng>(bounds: Vec2, rng: &mut R) -> Vec2 {
    let (w, h) = (bounds.x, bounds.y);
    match rng.random_range(0..4) {
        0 => Vec2::new(-ENEMY_EDGE_OFFSET, uniform(rng, 0.0, h)),
        1 => Vec2::new(w + ENEMY_EDGE_OFFSET, uniform(rng, 0.0, h)),
        2 => Vec2::new(uniform(rng, 0.0, w), -ENEMY_EDGE_OFFSET),
        _ => Vec2::new(uniform(rng, 0.0, w), h + ENEMY_EDGE_OFFSET),
    }
}

/// Add one enemy at a random edge, with speed scaled by the current score
pub fn spawn_enemy_at_edge(state: &mut GameState) {
    let pos = edge_position(state.bounds, &mut state.rng);
    let speed = Enemy::speed_for_score(state.score, &mut state.rng);
    let enemy = Enemy::spawn(pos, speed, &mut state.rng);
    log::debug!(
        "Enemy #{} at ({:.0}, {:.0}) speed {:.2}, delay {:.0}ms",
        state.enemies.len() + 1,
        pos.x,
        pos.y,
        speed,
        state.spawner.enemy_delay
    );
    state.enemies.push(enemy);
}

/// Find a coin position at least [`COIN_SAFE_DISTANCE`] from `avoid`.
///
/// Tries [`COIN_SPAWN_ATTEMPTS`] candidates in the margin-inset field, then
/// falls back to anywhere in the central 60% of the field.
pub fn coin_position<R: Rng>(bounds: Vec2, avoid: Vec2, rng: &mut R) -> Vec2 {
    let (w, h) = (bounds.x, bounds.y);
    for _ in 0..COIN_SPAWN_ATTEMPTS {
        let candidate = Vec2::new(
            uniform(rng, COIN_SPAWN_MARGIN, w - COIN_SPAWN_MARGIN),
            uniform(rng, COIN_SPAWN_MARGIN, h - COIN_SPAWN_MARGIN),
        );
        if candidate.distance(avoid) > COIN_SAFE_DISTANCE {
            return candidate;
        }
    }

    log::debug!("Coin placement fell back to the central region");
    Vec2::new(
        w * 0.2 + uniform(rng, 0.0, w * 0.6),
        h * 0.2 + uniform(rng, 0.0, h * 0.6),
    )
}

/// Add one coin away from the player
pub fn spawn_coin(state: &mut GameState) {
    let pos = coin_position(state.bounds, state.player.pos, &mut state.rng);
    let coin = Coin::spawn(pos, &mut state.rng);
    state.coins.push(coin);
}
