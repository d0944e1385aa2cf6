//! Entity models and their per-tick update rules
//!
//! Every update takes `dt` in milliseconds and scales motion by
//! [`FRAME_SCALE`] so speeds read as "units per reference frame".

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::angle_diff;
use crate::consts::*;

/// The player-controlled ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Last non-trivial input direction
    pub facing: Vec2,
    pub radius: f32,
    /// Remaining invulnerability (ms)
    pub invulnerable_ms: f32,
    /// Clock time of the last successful dash
    pub last_dash: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Vec2::X,
            radius: PLAYER_RADIUS,
            invulnerable_ms: 0.0,
            last_dash: None,
        }
    }

    /// Steer toward the input direction with inertia, then keep inside `bounds`
    pub fn update(&mut self, dt: f32, input: Vec2, bounds: Vec2) {
        let mut input = input;
        if input.length() > 1.0 {
            input = input.normalize_or_zero();
        }
        if input.length() > INPUT_EPSILON {
            self.facing = input;
        }

        let desired = input * PLAYER_SPEED;
        self.vel = self.vel.lerp(desired, PLAYER_INERTIA_LERP);
        self.pos += self.vel * dt * FRAME_SCALE;

        self.pos.x = self.pos.x.clamp(self.radius, (bounds.x - self.radius).max(self.radius));
        self.pos.y = self.pos.y.clamp(self.radius, (bounds.y - self.radius).max(self.radius));

        self.invulnerable_ms = (self.invulnerable_ms - dt).max(0.0);
    }

    /// Whether the cooldown has elapsed at `now`
    pub fn dash_ready(&self, now: f64) -> bool {
        match self.last_dash {
            Some(t) => now - t >= DASH_COOLDOWN_MS,
            None => true,
        }
    }

    /// Fraction of the cooldown elapsed, 1.0 when ready
    pub fn dash_charge(&self, now: f64) -> f32 {
        match self.last_dash {
            Some(t) => ((now - t) / DASH_COOLDOWN_MS).clamp(0.0, 1.0) as f32,
            None => 1.0,
        }
    }

    /// Teleport along the facing direction and become briefly invulnerable.
    ///
    /// Returns false (and changes nothing) while on cooldown. Visual feedback
    /// is the caller's job.
    pub fn try_dash(&mut self, now: f64) -> bool {
        if !self.dash_ready(now) {
            return false;
        }
        self.last_dash = Some(now);

        let dir = if self.facing.length() < INPUT_EPSILON {
            Vec2::X
        } else {
            self.facing
        };
        self.pos += dir * DASH_DISTANCE;
        self.invulnerable_ms = DASH_INVULNERABLE_MS;
        true
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0.0
    }

    /// Invulnerable sprites flash every 60 ms
    pub fn blinking(&self, now: f64) -> bool {
        self.is_invulnerable() && ((now / 60.0).floor() as i64) % 2 == 0
    }
}

/// A pursuing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Current heading (radians, in [0, 2π))
    pub angle: f32,
    /// Maximum heading change per tick (radians)
    pub turn_rate: f32,
    pub color: ParticleColor,
}

impl Enemy {
    /// Create an enemy with randomized size, heading and agility
    pub fn spawn<R: Rng>(pos: Vec2, speed: f32, rng: &mut R) -> Self {
        Self {
            pos,
            speed,
            radius: rng.random_range(ENEMY_RADIUS_MIN..=ENEMY_RADIUS_MAX),
            angle: rng.random_range(0.0..TAU),
            turn_rate: rng.random_range(ENEMY_TURN_RATE_MIN..=ENEMY_TURN_RATE_MAX),
            color: ParticleColor::EnemyTrail,
        }
    }

    /// Spawn speed for the current score: base + jitter + capped sqrt bonus
    pub fn speed_for_score<R: Rng>(score: f32, rng: &mut R) -> f32 {
        let bonus = (ENEMY_SPEED_BONUS_FACTOR * (score.max(0.0) + 1.0).sqrt())
            .min(ENEMY_SPEED_BONUS_CAP);
        ENEMY_BASE_SPEED + rng.random_range(ENEMY_SPEED_JITTER_MIN..ENEMY_SPEED_JITTER_MAX) + bonus
    }

    /// Turn toward `target` by at most `turn_rate`, then advance.
    ///
    /// Occasionally drops a trail particle into `particles`.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        target: Vec2,
        rng: &mut R,
        particles: &mut Vec<Particle>,
    ) {
        let desired = (target - self.pos).to_angle();
        let da = angle_diff(self.angle, desired);
        let turned = self.angle + da.clamp(-self.turn_rate, self.turn_rate);
        self.angle = turned.rem_euclid(TAU);

        let dir = Vec2::from_angle(self.angle);
        self.pos += dir * self.speed * dt * FRAME_SCALE;

        if rng.random_bool(ENEMY_TRAIL_CHANCE) {
            particles.push(Particle::spawn(self.pos, ENEMY_TRAIL_LIFE, self.color, rng));
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    /// Idle animation phase (cosmetic)
    pub phase: f32,
}

impl Coin {
    pub fn spawn<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            radius: COIN_RADIUS,
            phase: rng.random_range(0.0..TAU),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.phase += dt * COIN_PHASE_RATE;
    }

    /// Wobble angle for rendering
    pub fn wobble(&self) -> f32 {
        self.phase.sin() * 0.3
    }
}

/// Color tag for particles (resolved to RGBA by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Dash burst
    Spark,
    /// Enemy body and trail
    EnemyTrail,
    /// Coin pickup
    CoinGlint,
    /// Player death
    Death,
}

/// A short-lived visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: ParticleColor,
    pub size: f32,
}

impl Particle {
    /// Random direction and speed, life jittered around `base_life`
    pub fn spawn<R: Rng>(pos: Vec2, base_life: f32, color: ParticleColor, rng: &mut R) -> Self {
        let dir = Vec2::from_angle(rng.random_range(0.0..TAU));
        let speed = rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
        let life = base_life + rng.random_range(PARTICLE_LIFE_JITTER_MIN..PARTICLE_LIFE_JITTER_MAX);
        Self {
            pos,
            vel: dir * speed,
            life,
            max_life: life,
            color,
            size: rng.random_range(PARTICLE_SIZE_MIN..PARTICLE_SIZE_MAX),
        }
    }

    /// Push `count` particles at `pos`
    pub fn burst<R: Rng>(
        out: &mut Vec<Particle>,
        pos: Vec2,
        count: usize,
        base_life: f32,
        color: ParticleColor,
        rng: &mut R,
    ) {
        out.reserve(count);
        for _ in 0..count {
            out.push(Self::spawn(pos, base_life, color, rng));
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt * FRAME_SCALE;
        self.vel *= PARTICLE_DRAG;
        self.life -= dt * FRAME_SCALE;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Opacity 0..=1 from remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_player_moves_and_faces_input() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.update(16.0, Vec2::new(0.0, -1.0), BOUNDS);
        // vel = lerp(0, (0,-3.4), 0.6) = (0,-2.04); moved 2.04 * 0.96
        assert!((p.vel.y + 2.04).abs() < 1e-4);
        assert!((p.pos.y - (300.0 - 2.04 * 0.96)).abs() < 1e-3);
        assert_eq!(p.facing, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_player_diagonal_input_normalized() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.update(16.0, Vec2::new(1.0, 1.0), BOUNDS);
        assert!((p.facing.length() - 1.0).abs() < 1e-5);
        assert!(p.vel.length() <= PLAYER_SPEED * PLAYER_INERTIA_LERP + 1e-4);
    }

    #[test]
    fn test_player_tiny_input_keeps_facing() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.facing = Vec2::new(0.0, 1.0);
        p.update(16.0, Vec2::new(0.0005, 0.0), BOUNDS);
        assert_eq!(p.facing, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_player_clamped_to_bounds() {
        let mut p = Player::new(Vec2::new(5.0, 590.0));
        p.update(16.0, Vec2::ZERO, BOUNDS);
        assert_eq!(p.pos, Vec2::new(PLAYER_RADIUS, 600.0 - PLAYER_RADIUS));
    }

    #[test]
    fn test_invulnerability_decays_to_zero() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.invulnerable_ms = 30.0;
        p.update(16.0, Vec2::ZERO, BOUNDS);
        assert!((p.invulnerable_ms - 14.0).abs() < 1e-5);
        p.update(16.0, Vec2::ZERO, BOUNDS);
        assert_eq!(p.invulnerable_ms, 0.0);
    }

    #[test]
    fn test_dash_cooldown() {
        let mut p = Player::new(Vec2::new(100.0, 100.0));
        assert!(p.try_dash(1000.0));
        assert_eq!(p.pos, Vec2::new(240.0, 100.0));
        assert_eq!(p.invulnerable_ms, DASH_INVULNERABLE_MS);

        // Second dash inside the window is a no-op
        assert!(!p.try_dash(1000.0 + DASH_COOLDOWN_MS - 1.0));
        assert_eq!(p.pos, Vec2::new(240.0, 100.0));

        // Exactly at the cooldown boundary it works again
        assert!(p.try_dash(1000.0 + DASH_COOLDOWN_MS));
    }

    #[test]
    fn test_dash_zero_facing_defaults_right() {
        let mut p = Player::new(Vec2::new(100.0, 100.0));
        p.facing = Vec2::ZERO;
        assert!(p.try_dash(0.0));
        assert_eq!(p.pos, Vec2::new(240.0, 100.0));
    }

    #[test]
    fn test_dash_charge() {
        let mut p = Player::new(Vec2::ZERO);
        assert_eq!(p.dash_charge(0.0), 1.0);
        p.try_dash(0.0);
        assert!((p.dash_charge(1400.0) - 0.5).abs() < 1e-6);
        assert_eq!(p.dash_charge(10_000.0), 1.0);
    }

    #[test]
    fn test_enemy_turn_is_bounded() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        let mut e = Enemy::spawn(Vec2::ZERO, 2.0, &mut rng);
        e.angle = 0.0;
        e.turn_rate = 0.05;
        // Target directly behind: wants a full π turn
        e.update(16.0, Vec2::new(-100.0, 0.0), &mut rng, &mut particles);
        assert!((angle_diff(0.0, e.angle).abs() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_enemy_heading_stays_wrapped() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        let mut e = Enemy::spawn(Vec2::new(0.0, 100.0), 3.0, &mut rng);
        e.turn_rate = ENEMY_TURN_RATE_MAX;
        // A target the enemy keeps orbiting without ever reaching
        for _ in 0..20_000 {
            e.update(16.0, Vec2::ZERO, &mut rng, &mut particles);
            assert!((0.0..=TAU).contains(&e.angle), "angle {}", e.angle);
        }
    }

    #[test]
    fn test_enemy_trail_emission_rate() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut particles = Vec::new();
        let mut e = Enemy::spawn(Vec2::ZERO, 2.0, &mut rng);
        for _ in 0..1000 {
            e.update(16.0, Vec2::new(500.0, 500.0), &mut rng, &mut particles);
        }
        // 2% of 1000 ticks is 20 on average
        assert!(
            (5..=45).contains(&particles.len()),
            "trail count {}",
            particles.len()
        );
        assert!(particles.iter().all(|p| p.color == ParticleColor::EnemyTrail));
    }

    #[test]
    fn test_enemy_small_correction_snaps() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        let mut e = Enemy::spawn(Vec2::ZERO, 2.0, &mut rng);
        e.angle = 0.0;
        e.turn_rate = 0.06;
        let target = Vec2::from_angle(0.01) * 100.0;
        e.update(16.0, target, &mut rng, &mut particles);
        assert!((e.angle - 0.01).abs() < 1e-5);
        assert!((e.pos.length() - 2.0 * 16.0 * FRAME_SCALE).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let e = Enemy::spawn(Vec2::ZERO, 2.0, &mut rng);
            assert!((ENEMY_RADIUS_MIN..=ENEMY_RADIUS_MAX).contains(&e.radius));
            assert!((ENEMY_TURN_RATE_MIN..=ENEMY_TURN_RATE_MAX).contains(&e.turn_rate));
        }
    }

    #[test]
    fn test_enemy_speed_bonus_capped() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let s = Enemy::speed_for_score(0.0, &mut rng);
            // base 1.8 + [0.2, 0.7) + 0.15
            assert!(s >= 2.15 - 1e-5 && s < 2.65 + 1e-5);
            let s = Enemy::speed_for_score(1.0e9, &mut rng);
            assert!(s >= 6.0 - 1e-5 && s < 6.5 + 1e-5);
        }
    }

    #[test]
    fn test_coin_phase_advances() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut c = Coin::spawn(Vec2::ZERO, &mut rng);
        let before = c.phase;
        c.update(100.0);
        assert!((c.phase - before - 0.5).abs() < 1e-5);
        assert_eq!(c.radius, COIN_RADIUS);
    }

    #[test]
    fn test_particle_lifecycle() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut p = Particle::spawn(Vec2::ZERO, 10.0, ParticleColor::Spark, &mut rng);
        assert!(p.life >= 6.0 && p.life < 16.0);
        assert_eq!(p.alpha(), 1.0);
        let speed = p.vel.length();
        p.update(16.0);
        assert!((p.vel.length() - speed * PARTICLE_DRAG).abs() < 1e-4);
        assert!(p.alpha() < 1.0);
        // 50ms steps drain 3 life units each
        while p.is_alive() {
            p.update(50.0);
        }
        assert_eq!(p.alpha(), 0.0);
    }
}
