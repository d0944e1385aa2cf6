//! Frame tick: phase transitions and the fixed update order
//!
//! Core game loop that advances the session by one host frame.

use glam::Vec2;

use super::collision::check_collisions;
use super::spawner::{SpawnReport, spawn_due};
use super::state::{GamePhase, GameState};
use crate::clamp_dt;
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Movement intent, each axis in [-1, 1]
    pub movement: Vec2,
    /// Dash (space/shift/double-click)
    pub dash: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart from any phase
    pub restart: bool,
    /// Pointer press or first touch
    pub activate: bool,
}

/// What happened during a frame (consumed by the host)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Clamped elapsed time used for this frame (ms)
    pub dt: f32,
    pub dashed: bool,
    /// Entities the spawner added this frame
    pub spawned: SpawnReport,
    pub coins_collected: u32,
    /// Best score to persist; set only on the frame the player died
    pub save_best: Option<u32>,
}

/// Advance the session to `now` (host monotonic clock, ms)
pub fn tick(state: &mut GameState, input: &FrameInput, now: f64) -> TickReport {
    let mut report = TickReport::default();

    apply_actions(state, input, now, &mut report);

    let last = state.last_frame.unwrap_or(now);
    let dt = clamp_dt(now - last);
    state.last_frame = Some(now);
    state.frame_count += 1;
    report.dt = dt;

    state.screen_shake = (state.screen_shake - SHAKE_DECAY).max(0.0);

    if state.phase != GamePhase::Playing {
        return report;
    }

    state.player.update(dt, input.movement, state.bounds);

    report.spawned = spawn_due(state, now);

    let target = state.player.pos;
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, target, &mut state.rng, &mut state.particles);
    }

    for coin in state.coins.iter_mut() {
        coin.update(dt);
    }

    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    state.particles.retain(|p| p.is_alive());

    let outcome = check_collisions(state);
    report.coins_collected = outcome.coins_collected;
    report.save_best = outcome.died_with_best;

    if !outcome.died() {
        state.score += dt * SCORE_PER_MS;
    }

    report
}

/// Phase transitions and the dash, in priority order
fn apply_actions(state: &mut GameState, input: &FrameInput, now: f64, report: &mut TickReport) {
    if input.restart {
        state.restart(now);
        return;
    }

    if input.activate {
        match state.phase {
            GamePhase::Menu => {
                state.phase = GamePhase::Playing;
                log::info!("Run started (seed {})", state.seed);
                return;
            }
            GamePhase::GameOver => {
                state.restart(now);
                return;
            }
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                return;
            }
            GamePhase::Menu | GamePhase::GameOver => {}
        }
    }

    if input.dash && state.phase == GamePhase::Playing {
        report.dashed = state.dash(now);
    }
}
