//! Per-frame draw data
//!
//! Turns the session into plain values a painter can draw without touching
//! the simulation: sprites, HUD strings and the phase overlay.

use glam::Vec2;
use rand::Rng;

use crate::input::TouchStick;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, ParticleColor};

/// Background grid cell size
pub const GRID_STEP: f32 = 48.0;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b, 255)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self(self.0, self.1, self.2, a)
    }

    /// CSS `rgba()` string
    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.0,
            self.1,
            self.2,
            self.3 as f32 / 255.0
        )
    }
}

/// Resolve a particle color tag
pub fn particle_rgba(color: ParticleColor) -> Rgba {
    match color {
        ParticleColor::Spark => Rgba(140, 220, 255, 200),
        ParticleColor::EnemyTrail => Rgba(255, 90, 120, 210),
        ParticleColor::CoinGlint => Rgba::rgb(255, 220, 120),
        ParticleColor::Death => Rgba::rgb(255, 120, 140),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSprite {
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
    /// Invulnerability flash frame
    pub blink: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemySprite {
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoinSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgba,
}

/// Top bar
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: String,
    pub best: String,
    pub coins: String,
    /// Dash cooldown progress 0..=1, `None` when the meter is hidden
    pub dash_charge: Option<f32>,
    pub dash_label: &'static str,
    pub key_hint: Option<&'static str>,
}

/// Full-screen text drawn over the frozen world
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Title {
        title: &'static str,
        subtitle: &'static str,
        help: &'static str,
        record: String,
    },
    Pause {
        title: &'static str,
        hint: &'static str,
    },
    GameOver {
        title: &'static str,
        stats: String,
        hint: &'static str,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub size: Vec2,
    /// World jitter from screen shake
    pub shake_offset: Vec2,
    pub show_grid: bool,
    pub grid_offset: f32,
    pub coins: Vec<CoinSprite>,
    pub enemies: Vec<EnemySprite>,
    pub player: PlayerSprite,
    pub particles: Vec<ParticleSprite>,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
    pub touch_stick: Option<TouchStick>,
}

impl RenderFrame {
    /// Snapshot `state` for drawing. `rng` only feeds shake jitter.
    pub fn build<R: Rng>(state: &GameState, settings: &Settings, now: f64, rng: &mut R) -> Self {
        let shake = state.screen_shake;
        let shake_offset = if settings.effective_screen_shake() && shake > 0.0 {
            Vec2::new(rng.random_range(-shake..=shake), rng.random_range(-shake..=shake))
        } else {
            Vec2::ZERO
        };

        let grid_offset = if settings.grid_scrolls() {
            (state.frame_count % GRID_STEP as u64) as f32
        } else {
            0.0
        };

        let particles = if settings.particles {
            state
                .particles
                .iter()
                .map(|p| {
                    let base = particle_rgba(p.color);
                    ParticleSprite {
                        pos: p.pos,
                        size: p.size,
                        color: base.with_alpha((p.alpha() * 255.0).round() as u8),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let player = &state.player;
        let charge = player.dash_charge(now);

        Self {
            size: state.bounds,
            shake_offset,
            show_grid: settings.background_grid,
            grid_offset,
            coins: state
                .coins
                .iter()
                .map(|c| CoinSprite {
                    pos: c.pos,
                    radius: c.radius,
                    rotation: c.wobble(),
                })
                .collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemySprite {
                    pos: e.pos,
                    heading: e.angle,
                    radius: e.radius,
                    color: particle_rgba(e.color),
                })
                .collect(),
            player: PlayerSprite {
                pos: player.pos,
                heading: player.facing.to_angle(),
                radius: player.radius,
                blink: player.blinking(now),
            },
            particles,
            hud: Hud {
                score: format!("Score: {}", state.display_score()),
                best: format!("Best: {}", state.best),
                coins: format!("Coins: {}", state.coin_count),
                dash_charge: settings.show_dash_meter.then_some(charge),
                dash_label: if charge >= 1.0 {
                    "DASH READY (Space/Shift)"
                } else {
                    "DASH charging..."
                },
                key_hint: settings
                    .show_key_hints
                    .then_some("P pause • R restart • M reduced motion"),
            },
            overlay: overlay_for(state),
            touch_stick: None,
        }
    }

    /// Attach the touch stick overlay
    pub fn with_touch_stick(mut self, stick: Option<TouchStick>) -> Self {
        self.touch_stick = stick;
        self
    }
}

fn overlay_for(state: &GameState) -> Option<Overlay> {
    match state.phase {
        GamePhase::Playing => None,
        GamePhase::Menu => Some(Overlay::Title {
            title: "Dodge & Dash",
            subtitle: "Dodge the enemies. Grab the coins. Use the DASH!",
            help: "WASD/Arrows move • Space/Shift DASH • P pause • Click/Tap to start",
            record: format!(
                "Best: {}  •  Coins this session: {}",
                state.best, state.coin_count
            ),
        }),
        GamePhase::Paused => Some(Overlay::Pause {
            title: "Paused",
            hint: "Press P to resume • R to restart",
        }),
        GamePhase::GameOver => Some(Overlay::GameOver {
            title: "Game Over",
            stats: format!(
                "Score: {}   •   Best: {}   •   Coins: {}",
                state.display_score(),
                state.best,
                state.coin_count
            ),
            hint: "Click/Tap or press R to play again",
        }),
    }
}
