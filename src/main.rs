//! Abyss Dive entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use abyss_dive::consts::*;
    use abyss_dive::renderer::{RenderState, scene};
    use abyss_dive::settings::Settings;
    use abyss_dive::sim::{GameState, LossReason, SessionPhase, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        /// Held-key set, debounced from key-down/key-up events
        input: TickInput,
        /// Handle for the 1 Hz elapsed-time display timer
        timer_handle: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                settings: Settings::load(),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                timer_handle: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks at the fixed step
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Push the current state into the DOM HUD. One-way notifications:
        /// the core never reads UI state back.
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let state = &self.state;

            if let Some(el) = document.get_element_by_id("treasures-collected") {
                el.set_text_content(Some(&state.collected.to_string()));
            }

            // Oxygen bar: fill percentage plus a zone color
            if let Some(el) = document.get_element_by_id("oxygen-bar") {
                let pct = state.oxygen_fraction() * 100.0;
                let gradient = if pct < 30.0 {
                    "linear-gradient(90deg, #ff4444, #ff8844)"
                } else if pct < 60.0 {
                    "linear-gradient(90deg, #ffff44, #ff8844)"
                } else {
                    "linear-gradient(90deg, #00ffff, #0088ff)"
                };
                let _ = el.set_attribute(
                    "style",
                    &format!("width: {pct:.0}%; background: {gradient}"),
                );
            }

            // Status banner
            if let Some(el) = document.get_element_by_id("message-display") {
                if state.message.timer > 0 {
                    el.set_text_content(Some(&state.message.text));
                    let _ = el.set_attribute("class", "visible");
                } else {
                    let _ = el.set_attribute("class", "");
                }
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("hud-fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }

            // Overlay screens; the outcome ones wait for the fade to land
            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("start-screen", state.phase == SessionPhase::NotStarted);
            show(
                "win-screen",
                state.phase == SessionPhase::Won && state.outcome_ready(),
            );
            show(
                "game-over-screen",
                state.phase == SessionPhase::Lost(LossReason::Enemy) && state.outcome_ready(),
            );
            show(
                "oxygen-screen",
                state.phase == SessionPhase::Lost(LossReason::Oxygen) && state.outcome_ready(),
            );

            // Outcome stats
            if state.outcome_ready() {
                let time_text = format_time(state.elapsed_secs);
                let treasures_text = state.collected.to_string();
                match state.phase {
                    SessionPhase::Won => {
                        if let Some(el) = document.get_element_by_id("final-time") {
                            el.set_text_content(Some(&time_text));
                        }
                    }
                    SessionPhase::Lost(LossReason::Enemy) => {
                        if let Some(el) = document.get_element_by_id("death-treasures") {
                            el.set_text_content(Some(&treasures_text));
                        }
                        if let Some(el) = document.get_element_by_id("survival-time") {
                            el.set_text_content(Some(&time_text));
                        }
                    }
                    SessionPhase::Lost(LossReason::Oxygen) => {
                        if let Some(el) = document.get_element_by_id("oxygen-treasures") {
                            el.set_text_content(Some(&treasures_text));
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Format elapsed seconds as m:ss
    fn format_time(secs: f32) -> String {
        let total = secs as u32;
        format!("{}:{:02}", total / 60, total % 60)
    }

    /// Map a key name to the held-input set. Returns false for keys the
    /// game doesn't use, so they keep their default browser behavior.
    fn apply_key(input: &mut TickInput, key: &str, pressed: bool) -> bool {
        match key {
            "w" | "arrowup" => input.up = pressed,
            "s" | "arrowdown" => input.down = pressed,
            "a" | "arrowleft" => input.left = pressed,
            "d" | "arrowright" => input.right = pressed,
            _ => return false,
        }
        true
    }

    /// (Re)start the 1 Hz elapsed-time display timer. Cancel-then-restart:
    /// safe to call from any session command, never leaves a stale timer
    /// updating the display after a new session begins.
    fn restart_timer(game: &Rc<RefCell<Game>>) {
        stop_timer(game);

        let window = web_sys::window().unwrap();
        let closure = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || {
                let g = game.borrow();
                // Reads state, never mutates it
                if g.state.is_running() {
                    let document = web_sys::window().unwrap().document().unwrap();
                    if let Some(el) = document.get_element_by_id("timer-value") {
                        el.set_text_content(Some(&format_time(g.state.elapsed_secs)));
                    }
                }
            })
        };
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            )
            .expect("failed to schedule display timer");
        closure.forget();
        game.borrow_mut().timer_handle = Some(handle);
    }

    /// Cancel the display timer if one is active (idempotent)
    fn stop_timer(game: &Rc<RefCell<Game>>) {
        if let Some(handle) = game.borrow_mut().timer_handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Abyss Dive starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_session_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Abyss Dive running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key-down: add to the held set
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                let mut g = game.borrow_mut();
                if apply_key(&mut g.input, &key, true) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key-up: remove from the held set
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                let mut g = game.borrow_mut();
                apply_key(&mut g.input, &key, false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire the start button and the restart buttons on the three outcome
    /// screens to the two session commands.
    fn setup_session_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().state.start();
                restart_timer(&game);
                log::info!("Session started");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for id in ["win-restart-btn", "gameover-restart-btn", "oxygen-restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    stop_timer(&game);
                    let mut g = game.borrow_mut();
                    g.state.restart();
                    g.input = TickInput::default();
                    log::info!("Session reset to start screen");
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use abyss_dive::consts::{SIM_DT, TREASURE_COUNT};
    use abyss_dive::sim::{GameState, TickInput, tick};

    env_logger::init();
    log::info!("Abyss Dive (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Deterministic smoke run: swim right for ten seconds of sim time
    let mut state = GameState::new(42);
    state.start();
    let input = TickInput {
        right: true,
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input, SIM_DT);
    }

    log::info!(
        "smoke run: player at ({:.1}, {:.1}), oxygen {:.1}, treasures {}/{}, phase {:?}",
        state.player.pos.x,
        state.player.pos.y,
        state.oxygen,
        state.collected,
        TREASURE_COUNT,
        state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
