//! Pong Wars entry point
//!
//! Handles platform-specific initialization and runs the fixed-rate loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use pong_wars::consts::*;
    use pong_wars::platform::FrameClock;
    use pong_wars::renderer::{FrameBuilder, RenderState};
    use pong_wars::sim::{Faction, SimState, present_initial, tick};
    use pong_wars::{Scoreboard, Settings};

    /// Game instance holding all state
    struct Game {
        state: SimState,
        frame: FrameBuilder,
        render_state: Option<RenderState>,
        clock: FrameClock,
        last_time: f64,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64) -> Self {
            Self {
                state: SimState::new(seed, settings.motion_policy),
                frame: FrameBuilder::new(settings.diagnostics),
                render_state: None,
                clock: FrameClock::default(),
                last_time: 0.0,
            }
        }

        /// Run whatever ticks the clock says are due
        fn update(&mut self, dt: f32) {
            for _ in 0..self.clock.advance(dt) {
                tick(&mut self.state, &mut self.frame);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.frame.vertices()) {
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

        /// Push the latest scores into the DOM
        fn update_hud(&mut self) {
            if let Some(board) = self.frame.take_scoreboard() {
                show_scoreboard(&board);
            }
        }
    }

    /// Score counters (`#wei-score`) and percentage bars (`#wei-bar`)
    fn show_scoreboard(board: &Scoreboard) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for faction in Faction::ALL {
            let entry = board.entry(faction);
            let name = faction.as_str();
            if let Some(el) = document.get_element_by_id(&format!("{}-score", name)) {
                el.set_text_content(Some(&entry.count.to_string()));
            }
            if let Some(el) = document.get_element_by_id(&format!("{}-bar", name)) {
                let _ = el.set_attribute("style", &format!("width: {}%", entry.percent));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pong Wars starting...");

        let settings = Settings::load();

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("pongCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store matches the playfield so one cell is CELL_SIZE pixels
        let dpr = window.device_pixel_ratio();
        let width = (FIELD_WIDTH as f64 * dpr) as u32;
        let height = (FIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(&settings, seed)));
        log::info!(
            "Simulation initialized with seed: {} ({})",
            seed,
            settings.motion_policy.as_str()
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, (FIELD_WIDTH, FIELD_HEIGHT)).await
        {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        // Starting layout is visible during the startup delay
        {
            let mut g = game.borrow_mut();
            let Game { state, frame, .. } = &mut *g;
            present_initial(state, frame);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);

        log::info!("Pong Wars running!");
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
                0.0
            };
            g.last_time = time;

            g.update(dt);
            if g.clock.is_running() {
                g.render();
                g.update_hud();
            }
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
mod native {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use pong_wars::consts::FRAME_RATE;
    use pong_wars::platform::FrameClock;
    use pong_wars::sim::{Ball, Diagnostics, Frontend, SimState, Tally, present_initial, tick};
    use pong_wars::{MotionPolicy, Scoreboard, Settings};

    /// Headless frontend: scores to the debug log, a summary once a second
    struct ConsoleFrontend {
        diagnostics: bool,
        frames: u64,
    }

    impl Frontend for ConsoleFrontend {
        fn show_scores(&mut self, tally: &Tally, total_cells: usize) {
            let board = Scoreboard::from_tally(tally, total_cells);
            log::debug!("{}", board.summary());
            if self.frames % FRAME_RATE as u64 == 0 {
                log::info!(
                    "[{}s] {} (leader: {})",
                    self.frames / FRAME_RATE as u64,
                    board.summary(),
                    board.leader().as_str()
                );
            }
            self.frames += 1;
        }

        fn draw_ball(&mut self, ball: &Ball) {
            log::trace!(
                "{:>3} ball at ({:.1}, {:.1}) speed {:.2}",
                ball.faction.as_str(),
                ball.pos.x,
                ball.pos.y,
                ball.motion.speed()
            );
        }

        fn log_diagnostics(&mut self, diagnostics: &Diagnostics) {
            if self.diagnostics {
                diagnostics.log();
            }
        }
    }

    pub fn run() {
        let mut settings = Settings::load();
        // Optional positional override: `pong-wars jitter`
        if let Some(arg) = std::env::args().nth(1) {
            match MotionPolicy::from_str(&arg) {
                Some(policy) => settings.motion_policy = policy,
                None => log::warn!(
                    "Unknown motion policy '{}', keeping {}",
                    arg,
                    settings.motion_policy.as_str()
                ),
            }
        }

        if let Ok(json) = settings.to_json() {
            log::debug!("Effective settings: {}", json);
        }

        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!(
            "Simulation initialized with seed: {} ({})",
            seed,
            settings.motion_policy.as_str()
        );

        let mut state = SimState::new(seed, settings.motion_policy);
        let mut frontend = ConsoleFrontend {
            diagnostics: settings.diagnostics,
            frames: 0,
        };
        present_initial(&state, &mut frontend);

        let mut clock = FrameClock::default();
        let mut last = Instant::now();
        loop {
            let now = Instant::now();
            let due = clock.advance(now.duration_since(last).as_secs_f32());
            last = now;

            for _ in 0..due {
                tick(&mut state, &mut frontend);
                if settings.max_frames.is_some_and(|max| state.frame >= max) {
                    log::info!("Stopping after {} frames", state.frame);
                    return;
                }
            }

            std::thread::sleep(Duration::from_secs_f32(clock.time_to_next_tick().max(0.001)));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pong Wars (native, headless) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
