//! Dodge & Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dodge_dash::platform::LocalStorage;
    use dodge_dash::renderer::{CanvasPainter, RenderFrame};
    use dodge_dash::sim::{GamePhase, GameState, tick};
    use dodge_dash::{HighScoreStore, InputNormalizer, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        input: InputNormalizer,
        scores: HighScoreStore<LocalStorage>,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        /// Cosmetic RNG (screen shake), kept apart from the gameplay stream
        fx_rng: Pcg32,
    }

    impl Game {
        /// Advance one frame and draw it
        fn frame(&mut self, time: f64) {
            let input = self.input.take_frame_input();
            let report = tick(&mut self.state, &input, time);

            if report.dashed {
                log::debug!("Dash at {:.0}ms", time);
            }
            if report.spawned.enemy {
                log::debug!("Enemy wave now {}", self.state.enemies.len());
            }
            if let Some(best) = report.save_best {
                self.scores.save(best);
            }

            let frame = RenderFrame::build(&self.state, &self.settings, time, &mut self.fx_rng)
                .with_touch_stick(self.input.stick());
            self.painter.paint(&frame);
        }

        /// Flip reduced motion and persist the preference
        fn toggle_reduced_motion(&mut self) {
            self.settings.reduced_motion = !self.settings.reduced_motion;
            log::info!("Reduced motion: {}", self.settings.reduced_motion);
            self.settings.save(&mut LocalStorage);
        }

        /// Match the canvas to the window and tell the simulation
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.state.resize(Vec2::new(w as f32, h as f32));
        }

        /// Touch position in canvas coordinates
        fn touch_pos(&self, event: &TouchEvent) -> Option<Vec2> {
            let touch = event.touches().get(0)?;
            let rect = self.canvas.get_bounding_client_rect();
            Some(Vec2::new(
                (touch.client_x() as f64 - rect.left()) as f32,
                (touch.client_y() as f64 - rect.top()) as f32,
            ))
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dodge & Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load(&LocalStorage);
        let scores = HighScoreStore::new(LocalStorage);
        let best = scores.load();

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, Vec2::new(800.0, 600.0), now()).with_best(best);
        log::info!("Session created with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            input: InputNormalizer::new(),
            scores,
            painter: CanvasPainter::new(ctx),
            canvas: canvas.clone(),
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
        }));
        game.borrow_mut().resize();

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Dodge & Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(
                    key.as_str(),
                    " " | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
                ) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if matches!(key.as_str(), "m" | "M") {
                    g.toggle_reduced_motion();
                } else {
                    g.input.key_down(&key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse press (start / play again)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    game.borrow_mut().input.pointer_down();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Double click dashes
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.double_click();
            });
            let _ = canvas
                .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (activate + anchor stick)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(pos) = g.touch_pos(&event) {
                    g.input.touch_start(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(pos) = g.touch_pos(&event) {
                    g.input.touch_move(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.input.release_all();
                    if g.state.phase == GamePhase::Playing {
                        g.input.request_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.release_all();
                if g.state.phase == GamePhase::Playing {
                    g.input.request_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dodge & Dash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    autopilot_demo(seed);
}

/// Play one run with a simple flee-and-dash bot and report the result
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_demo(seed: u64) {
    use dodge_dash::platform::MemoryStore;
    use dodge_dash::sim::{FrameInput, GamePhase, GameState, tick};
    use dodge_dash::HighScoreStore;
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let mut scores = HighScoreStore::new(MemoryStore::new());
    let mut state = GameState::new(seed, Vec2::new(960.0, 720.0), 0.0).with_best(scores.load());

    let start = FrameInput {
        activate: true,
        ..Default::default()
    };
    tick(&mut state, &start, 0.0);

    let mut frames = 0;
    let mut dashes = 0;
    while state.is_playing() && frames < MAX_FRAMES {
        frames += 1;
        let now = frames as f64 * FRAME_MS;

        // Flee the nearest enemy, drift toward the nearest coin otherwise
        let pos = state.player.pos;
        let nearest_enemy = state
            .enemies
            .iter()
            .min_by(|a, b| a.pos.distance(pos).total_cmp(&b.pos.distance(pos)));
        let nearest_coin = state
            .coins
            .iter()
            .min_by(|a, b| a.pos.distance(pos).total_cmp(&b.pos.distance(pos)));

        let mut input = FrameInput::default();
        match (nearest_enemy, nearest_coin) {
            (Some(e), _) if e.pos.distance(pos) < 160.0 => {
                input.movement = (pos - e.pos).normalize_or_zero();
                input.dash = e.pos.distance(pos) < 60.0;
            }
            (_, Some(c)) => input.movement = (c.pos - pos).normalize_or_zero(),
            _ => {}
        }

        let report = tick(&mut state, &input, now);
        if report.dashed {
            dashes += 1;
        }
        if let Some(best) = report.save_best {
            scores.save(best);
        }
    }

    println!(
        "seed {}: {} after {:.1}s, score {}, coins {}, dashes {}, enemies {}, best {}",
        seed,
        if state.phase == GamePhase::GameOver { "caught" } else { "survived" },
        frames as f64 * FRAME_MS / 1000.0,
        state.display_score(),
        state.coin_count,
        dashes,
        state.enemies.len(),
        scores.load()
    );
}
