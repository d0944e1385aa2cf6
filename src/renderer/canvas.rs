//! Canvas 2D painter for the browser
//!
//! Draws a [`RenderFrame`] with `CanvasRenderingContext2d`. Draw calls are
//! best-effort: a failed call skips that element and the frame goes on.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::frame::{GRID_STEP, Hud, Overlay, RenderFrame, Rgba};

const BACKGROUND: &str = "rgb(11,16,32)";
const FONT_STACK: &str = "system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial";

/// Paints frames onto one canvas context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn paint(&self, frame: &RenderFrame) {
        let ctx = &self.ctx;
        let (w, h) = (frame.size.x as f64, frame.size.y as f64);

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        if frame.show_grid {
            self.grid(w, h, frame.grid_offset as f64);
        }

        ctx.save();
        let _ = ctx.translate(frame.shake_offset.x as f64, frame.shake_offset.y as f64);
        self.world(frame);

        if let Some(overlay) = &frame.overlay {
            self.overlay(overlay, w, h);
        }
        ctx.restore();

        self.hud(&frame.hud, w);

        if let Some(stick) = frame.touch_stick {
            self.touch_stick(stick.origin.x as f64, stick.origin.y as f64, stick.knob_offset());
        }
    }

    fn grid(&self, w: f64, h: f64, offset: f64) {
        let ctx = &self.ctx;
        let step = GRID_STEP as f64;
        ctx.set_stroke_style_str("rgba(255,255,255,0.04)");
        ctx.set_line_width(1.0);
        ctx.begin_path();
        let mut x = offset;
        while x < w {
            ctx.move_to(x, 0.0);
            ctx.line_to(x, h);
            x += step;
        }
        let mut y = offset;
        while y < h {
            ctx.move_to(0.0, y);
            ctx.line_to(w, y);
            y += step;
        }
        ctx.stroke();
    }

    fn world(&self, frame: &RenderFrame) {
        let ctx = &self.ctx;

        for coin in &frame.coins {
            ctx.save();
            let _ = ctx.translate(coin.pos.x as f64, coin.pos.y as f64);
            let _ = ctx.rotate(coin.rotation as f64);
            let r = coin.radius as f64;
            self.ellipse(0.0, 0.0, r, r, Rgba::rgb(255, 210, 80));
            self.ellipse(0.0, 0.0, r * 0.65, r * 0.65, Rgba::rgb(255, 240, 160));
            ctx.restore();
        }

        for enemy in &frame.enemies {
            ctx.save();
            let _ = ctx.translate(enemy.pos.x as f64, enemy.pos.y as f64);
            let _ = ctx.rotate(enemy.heading as f64);
            let r = enemy.radius as f64;
            self.ellipse(0.0, 0.0, r, r * 0.75, enemy.color);
            self.ellipse(r * 0.2, 0.0, r * 0.35, r * 0.35, Rgba(40, 0, 10, 120));
            ctx.restore();
        }

        let p = &frame.player;
        ctx.save();
        let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
        let _ = ctx.rotate(p.heading as f64);
        self.triangle([(-18.0, -9.0), (-18.0, 9.0), (-38.0, 0.0)], Rgba(120, 200, 255, 50));
        let body = if p.blink {
            Rgba::rgb(255, 255, 255)
        } else {
            Rgba::rgb(180, 220, 255)
        };
        self.triangle([(18.0, 0.0), (-12.0, -12.0), (-12.0, 12.0)], body);
        self.ellipse(4.0, 0.0, 3.0, 3.0, Rgba(20, 30, 50, 220));
        ctx.restore();

        for particle in &frame.particles {
            let r = particle.size as f64 * 0.5;
            self.ellipse(particle.pos.x as f64, particle.pos.y as f64, r, r, particle.color);
        }
    }

    fn hud(&self, hud: &Hud, w: f64) {
        let ctx = &self.ctx;
        let pad = 12.0;
        let bar_h = 36.0;
        let mid_y = pad + bar_h * 0.5;

        ctx.set_fill_style_str("rgba(255,255,255,0.07)");
        ctx.fill_rect(pad, pad, w - pad * 2.0, bar_h);

        ctx.set_font(&format!("16px {FONT_STACK}"));
        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str("rgb(230,230,230)");

        let mut x = pad + 12.0;
        for text in [&hud.score, &hud.best, &hud.coins] {
            let _ = ctx.fill_text(text, x, mid_y);
            let width = ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
            x += width + 18.0;
        }

        if let Some(charge) = hud.dash_charge {
            let (cw, ch) = (160.0, 12.0);
            let cx = w - pad - cw - 12.0;
            let cy = pad + (bar_h - ch) * 0.5;
            ctx.set_fill_style_str("rgba(255,255,255,0.16)");
            ctx.fill_rect(cx, cy, cw, ch);
            ctx.set_fill_style_str("rgba(140,220,255,0.67)");
            ctx.fill_rect(cx, cy, cw * charge as f64, ch);

            ctx.set_font(&format!("12px {FONT_STACK}"));
            ctx.set_text_align("right");
            ctx.set_fill_style_str("rgb(220,220,220)");
            let _ = ctx.fill_text(hud.dash_label, cx - 6.0, cy + ch * 0.5);
        }

        if let Some(hint) = hud.key_hint {
            ctx.set_font(&format!("12px {FONT_STACK}"));
            ctx.set_text_align("right");
            ctx.set_fill_style_str("rgb(180,180,180)");
            let _ = ctx.fill_text(hint, w - pad, pad + bar_h + 14.0);
        }
    }

    fn overlay(&self, overlay: &Overlay, w: f64, h: f64) {
        let ctx = &self.ctx;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let cx = w * 0.5;

        match overlay {
            Overlay::Title {
                title,
                subtitle,
                help,
                record,
            } => {
                self.shadow_text(title, 56, cx, h * 0.35, "rgb(255,255,255)");
                self.text(subtitle, 18, cx, h * 0.44, "rgb(210,210,210)");
                self.text(help, 14, cx, h * 0.52, "rgb(180,180,180)");
                self.text(record, 12, cx, h * 0.58, "rgb(160,160,160)");
            }
            Overlay::Pause { title, hint } => {
                self.shadow_text(title, 44, cx, h * 0.4, "rgb(255,255,255)");
                self.text(hint, 16, cx, h * 0.48, "rgb(200,200,200)");
            }
            Overlay::GameOver { title, stats, hint } => {
                self.shadow_text(title, 48, cx, h * 0.4, "rgb(255,200,200)");
                self.text(stats, 18, cx, h * 0.48, "rgb(230,230,230)");
                self.text(hint, 14, cx, h * 0.55, "rgb(200,200,200)");
            }
        }
    }

    fn touch_stick(&self, x: f64, y: f64, knob: glam::Vec2) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str("rgba(255,255,255,0.24)");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let _ = ctx.arc(x, y, 60.0, 0.0, TAU);
        ctx.stroke();
        self.ellipse(
            x + knob.x as f64,
            y + knob.y as f64,
            20.0,
            20.0,
            Rgba(255, 255, 255, 90),
        );
    }

    fn text(&self, text: &str, size: u32, x: f64, y: f64, color: &str) {
        self.ctx.set_font(&format!("{size}px {FONT_STACK}"));
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn shadow_text(&self, text: &str, size: u32, x: f64, y: f64, color: &str) {
        self.text(text, size, x + 2.0, y + 2.0, "rgba(0,0,0,0.47)");
        self.text(text, size, x, y, color);
    }

    fn ellipse(&self, x: f64, y: f64, rx: f64, ry: f64, color: Rgba) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&color.to_css());
        ctx.begin_path();
        if ctx.ellipse(x, y, rx, ry, 0.0, 0.0, TAU).is_ok() {
            ctx.fill();
        }
    }

    fn triangle(&self, points: [(f64, f64); 3], color: Rgba) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&color.to_css());
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        ctx.line_to(points[1].0, points[1].1);
        ctx.line_to(points[2].0, points[2].1);
        ctx.close_path();
        ctx.fill();
    }
}
