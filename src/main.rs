//! Toro Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use toro_snake::Settings;
    use toro_snake::audio::{AudioManager, SoundEffect};
    use toro_snake::hud::Hud;
    use toro_snake::renderer::{RenderState, scene, vertex::colors};
    use toro_snake::sim::{CollectibleKind, GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: TickInput,
        audio: AudioManager,
        hud: Hud,
        tile_size: f32,
        palette: Vec<[f32; 4]>,
        /// Presentation-only RNG, separate from the simulation's
        bg_rng: Pcg32,
    }

    impl Game {
        fn new(seed: u64, settings: &Settings, hud: Hud) -> Self {
            let mut audio = AudioManager::new();
            audio.apply_settings(settings);
            let palette = settings.palette_rgba();
            Self {
                state: GameState::new(seed, settings.game.clone()),
                render_state: None,
                input: TickInput::default(),
                audio,
                hud,
                tile_size: settings.tile_size,
                palette,
                bg_rng: Pcg32::seed_from_u64(seed ^ 0x5eed_c010),
            }
        }

        /// Advance the simulation and react to its events.
        /// Returns true when the snake died this frame.
        fn update(&mut self, now_ms: u64) -> bool {
            let input = self.input.clone();
            tick(&mut self.state, &input, now_ms);

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.restart = false;

            let mut died = false;
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Started | GameEvent::Restarted => {
                        self.audio.resume();
                        self.audio.play_music();
                    }
                    GameEvent::Collected { kind, .. } => match kind {
                        CollectibleKind::Food => {
                            self.audio.play(SoundEffect::Eat);
                            self.cycle_background();
                        }
                        CollectibleKind::Poison => self.audio.play(SoundEffect::Poison),
                        CollectibleKind::Powerup => self.audio.play(SoundEffect::Powerup),
                    },
                    GameEvent::ScoreChanged(score) => self.hud.set_score(score),
                    GameEvent::Died { score } => {
                        self.audio.play(SoundEffect::Death);
                        log::info!("Game over, score {}", score);
                        died = true;
                    }
                    GameEvent::Stepped { .. } => {}
                }
            }

            if self.state.is_playing() {
                self.audio.update_music();
            } else {
                self.audio.stop_music();
            }

            self.hud.set_phase(self.state.phase());
            self.hud
                .set_stats(self.state.snake.len(), self.state.food.eaten);
            died
        }

        fn cycle_background(&mut self) {
            if self.palette.is_empty() {
                return;
            }
            let index = self.bg_rng.random_range(0..self.palette.len());
            self.set_background(self.palette[index]);
        }

        fn set_background(&mut self, color: [f32; 4]) {
            if let Some(render_state) = &mut self.render_state {
                render_state.clear_color = color;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene(&self.state, self.tile_size);
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
    }

    fn js_err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_err(&e.to_string()))?;

        log::info!("Toro Snake starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        let board = (
            settings.game.grid_width as f32 * settings.tile_size,
            settings.game.grid_height as f32 * settings.tile_size,
        );

        // Size the backing store to the CSS size; fall back to the board size
        let dpr = window.device_pixel_ratio();
        let (client_w, client_h) = match (canvas.client_width(), canvas.client_height()) {
            (w, h) if w > 0 && h > 0 => (w as f64, h as f64),
            _ => (board.0 as f64, board.1 as f64),
        };
        let width = (client_w * dpr) as u32;
        let height = (client_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        let hud = Hud::new(&document);
        let game = Rc::new(RefCell::new(Game::new(seed, &settings, hud)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_err(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = RenderState::new(surface, &adapter, width, height, board)
            .await
            .map_err(|e| js_err(&format!("Failed to get device: {}", e)))?;
        if let Some(first) = settings.palette_rgba().first() {
            render_state.clear_color = *first;
        } else {
            render_state.clear_color = colors::BACKGROUND;
        }

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            let score = g.state.score;
            g.hud.set_score(score);
            let phase = g.state.phase();
            g.hud.set_phase(phase);
        }

        setup_input_handlers(game.clone())?;
        setup_buttons(game.clone());

        request_animation_frame(game)?;

        log::info!("Toro Snake running!");
        Ok(())
    }

    /// Map a key to one of the held direction flags
    fn direction_flag<'a>(input: &'a mut TickInput, key: &str) -> Option<&'a mut bool> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(&mut input.left),
            "ArrowRight" | "d" | "D" => Some(&mut input.right),
            "ArrowUp" | "w" | "W" => Some(&mut input.up),
            "ArrowDown" | "s" | "S" => Some(&mut input.down),
            _ => None,
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(flag) = direction_flag(&mut g.input, &key) {
                    *flag = true;
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    " " | "Enter" => {
                        g.input.start = true;
                        event.prevent_default();
                    }
                    "r" | "R" => g.input.restart = true,
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "m" | "M" => {
                        let muted = !g.audio.is_muted();
                        g.audio.set_muted(muted);
                        if !muted && g.state.is_playing() {
                            g.audio.play_music();
                        }
                        log::info!("Muted: {}", muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(flag) = direction_flag(&mut g.input, &event.key()) {
                    *flag = false;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_directions();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let start_game = game.clone();
        let restart_game = game.clone();
        game.borrow().hud.bind_buttons(
            move || start_game.borrow_mut().input.start = true,
            move || restart_game.borrow_mut().input.restart = true,
        );
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let died = {
            let mut g = game.borrow_mut();
            let died = g.update(time.max(0.0) as u64);
            g.render();
            died
        };

        // Blocking; the borrow above must be released first
        if died {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("You died");
            }
            // The alert swallowed any key-up
            game.borrow_mut().input.release_directions();
        }

        if let Err(e) = request_animation_frame(game) {
            log::error!("Failed to schedule frame: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frame length for the headless demo (ms)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAME_MS: u64 = 16;
/// Give up after this much simulated time (ms)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_LIMIT_MS: u64 = 5 * 60 * 1000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use toro_snake::Settings;
    use toro_snake::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();

    log::info!("Toro Snake (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let settings = Settings::load();
    let seed = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Ignoring bad seed argument ({}), using 42", e);
            42
        }
        None => settings.seed.unwrap_or(42),
    };

    let mut state = GameState::new(seed, settings.game.clone());
    let mut input = TickInput {
        start: true,
        autopilot: true,
        ..Default::default()
    };

    let mut now = 0;
    while now <= DEMO_LIMIT_MS {
        tick(&mut state, &input, now);
        input.start = false;

        for event in state.drain_events() {
            match event {
                GameEvent::Stepped { .. } => {}
                GameEvent::Collected { kind, cell } => {
                    log::info!("t={}ms {} at ({}, {})", now, kind.as_str(), cell.x, cell.y)
                }
                other => log::info!("t={}ms {:?}", now, other),
            }
        }

        if !state.is_playing() {
            break;
        }
        now += DEMO_FRAME_MS;
    }

    println!(
        "seed {}: score {}, length {}, food {}, steps {}, {:?}",
        seed,
        state.score,
        state.snake.len(),
        state.food.eaten,
        state.steps,
        state.phase()
    );
}
