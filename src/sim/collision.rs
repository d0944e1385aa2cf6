//! Collision detection and scoring
//!
//! Everything is a circle. Coins are collected on touch; the first enemy that
//! touches a vulnerable player ends the run.

use super::entities::{Particle, ParticleColor};
use super::state::{GamePhase, GameState};
use super::vector::circles_overlap;
use crate::consts::*;

/// Result of a collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Coins picked up this tick
    pub coins_collected: u32,
    /// Set when an enemy hit the player; carries the best score to persist
    pub died_with_best: Option<u32>,
}

impl CollisionOutcome {
    pub fn died(&self) -> bool {
        self.died_with_best.is_some()
    }
}

/// Collect touched coins, then test enemies against the player
pub fn check_collisions(state: &mut GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome {
        coins_collected: collect_coins(state),
        died_with_best: None,
    };

    if state.player.is_invulnerable() {
        return outcome;
    }

    let player = &state.player;
    let hit = state
        .enemies
        .iter()
        .any(|e| circles_overlap(player.pos, player.radius, e.pos, e.radius));

    if hit {
        outcome.died_with_best = Some(kill_player(state));
    }

    outcome
}

/// Remove every coin touching the player and award it. Returns the count.
fn collect_coins(state: &mut GameState) -> u32 {
    let mut collected = 0;
    for i in (0..state.coins.len()).rev() {
        let coin = &state.coins[i];
        if !circles_overlap(state.player.pos, state.player.radius, coin.pos, coin.radius) {
            continue;
        }
        let coin = state.coins.remove(i);
        state.coin_count += 1;
        state.score += COIN_SCORE;
        state.screen_shake = COIN_SHAKE;
        Particle::burst(
            &mut state.particles,
            coin.pos,
            COIN_PARTICLES,
            COIN_PARTICLE_LIFE,
            ParticleColor::CoinGlint,
            &mut state.rng,
        );
        collected += 1;
    }
    collected
}

/// End the run: record the best score, shake, burst, and switch to game over
fn kill_player(state: &mut GameState) -> u32 {
    let floored = state.display_score();
    if floored > state.best {
        log::info!("New best score: {} (was {})", floored, state.best);
    }
    state.best = state.best.max(floored);
    state.screen_shake = DEATH_SHAKE;
    Particle::burst(
        &mut state.particles,
        state.player.pos,
        DEATH_PARTICLES,
        DEATH_PARTICLE_LIFE,
        ParticleColor::Death,
        &mut state.rng,
    );
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over: score {}, coins {}, enemies {}",
        floored,
        state.coin_count,
        state.enemies.len()
    );
    state.best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Coin, Enemy};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut s = GameState::new(11, Vec2::new(800.0, 600.0), 0.0);
        s.phase = GamePhase::Playing;
        s
    }

    fn enemy_at(s: &mut GameState, pos: Vec2) {
        let mut e = Enemy::spawn(pos, 2.0, &mut s.rng);
        e.radius = 15.0;
        s.enemies.push(e);
    }

    fn coin_at(s: &mut GameState, pos: Vec2) {
        let c = Coin::spawn(pos, &mut s.rng);
        s.coins.push(c);
    }

    #[test]
    fn test_coin_pickup_awards() {
        let mut s = playing();
        let p = s.player.pos;
        coin_at(&mut s, p + Vec2::new(5.0, 0.0));
        coin_at(&mut s, p + Vec2::new(300.0, 0.0));

        let out = check_collisions(&mut s);
        assert_eq!(out.coins_collected, 1);
        assert_eq!(s.coins.len(), 1);
        assert_eq!(s.coin_count, 1);
        assert_eq!(s.score, COIN_SCORE);
        assert_eq!(s.screen_shake, COIN_SHAKE);
        assert_eq!(s.particles.len(), COIN_PARTICLES);
        assert!(!out.died());
    }

    #[test]
    fn test_coin_at_exact_radius_sum_is_collected() {
        let mut s = playing();
        let p = s.player.pos;
        coin_at(&mut s, p + Vec2::new(PLAYER_RADIUS + COIN_RADIUS, 0.0));
        assert_eq!(check_collisions(&mut s).coins_collected, 1);
    }

    #[test]
    fn test_enemy_contact_ends_run() {
        let mut s = playing().with_best(10);
        s.score = 57.9;
        let p = s.player.pos;
        enemy_at(&mut s, p);

        let out = check_collisions(&mut s);
        assert_eq!(out.died_with_best, Some(57));
        assert_eq!(s.best, 57);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.screen_shake, DEATH_SHAKE);
        assert_eq!(s.particles.len(), DEATH_PARTICLES);
    }

    #[test]
    fn test_best_never_decreases() {
        let mut s = playing().with_best(500);
        s.score = 20.0;
        let p = s.player.pos;
        enemy_at(&mut s, p);
        assert_eq!(check_collisions(&mut s).died_with_best, Some(500));
        assert_eq!(s.best, 500);
    }

    #[test]
    fn test_multiple_enemies_kill_once() {
        let mut s = playing();
        let p = s.player.pos;
        enemy_at(&mut s, p);
        enemy_at(&mut s, p + Vec2::new(3.0, 0.0));
        check_collisions(&mut s);
        assert_eq!(s.particles.len(), DEATH_PARTICLES);
    }

    #[test]
    fn test_invulnerable_player_survives() {
        let mut s = playing();
        s.player.invulnerable_ms = 100.0;
        let p = s.player.pos;
        enemy_at(&mut s, p);
        coin_at(&mut s, p);

        let out = check_collisions(&mut s);
        // Coins still count while invulnerable
        assert_eq!(out.coins_collected, 1);
        assert!(!out.died());
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_near_miss() {
        let mut s = playing();
        let p = s.player.pos;
        enemy_at(&mut s, p + Vec2::new(PLAYER_RADIUS + 15.0 + 0.5, 0.0));
        assert!(!check_collisions(&mut s).died());
    }
}
