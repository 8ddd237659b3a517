//! Flappy Sim entry point
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

    use flappy_sim::SimConfig;
    use flappy_sim::consts::MAX_SUBSTEPS;
    use flappy_sim::input;
    use flappy_sim::renderer::{RenderState, scene};
    use flappy_sim::sim::{SimEvent, Simulation, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(sim: Simulation) -> Self {
            Self {
                sim,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let step = self.sim.config().tick_dt();
            self.accumulator += dt.min(0.25);

            let mut substeps = 0;
            while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                for event in tick(&mut self.sim, &input) {
                    match event {
                        SimEvent::Crashed(cause) => {
                            log::info!("Crashed ({:?}) with score {}", cause, self.sim.score())
                        }
                        SimEvent::Passed { score } => log::debug!("Score: {}", score),
                        _ => {}
                    }
                }
                self.accumulator -= step;
                substeps += 1;

                // Clear one-shot inputs after processing
                input::clear_one_shots(&mut self.input);
            }

            // Drop the backlog rather than replaying it next frame
            if substeps == MAX_SUBSTEPS && self.accumulator >= step {
                self.accumulator = 0.0;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene(&self.sim.snapshot());
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

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy Sim starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = SimConfig::default();
        let field = (config.field_width, config.field_height);
        let sim = Simulation::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(Game::new(sim)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy Sim running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                // Auto-repeat is not a new press
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                let phase = g.sim.phase();
                if input::key_down(&event.key(), phase, &mut g.input) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if input::key_up(&event.key(), &mut g.input) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: the key release will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.sim.entity().is_descending() {
                    g.input.end_descend = true;
                    log::info!("Fast descend released (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                g.sim.config().tick_dt()
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use flappy_sim::sim::{SimEvent, Simulation, TickInput, tick};
    use flappy_sim::{GapSeeding, SimConfig};

    /// Run the autopilot without a window and report scores
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// JSON config file (missing fields use defaults)
        #[arg(long)]
        pub config: Option<PathBuf>,
        /// Maximum number of ticks to simulate
        #[arg(long, default_value_t = 10_000)]
        pub ticks: u64,
        /// Override the configured seed
        #[arg(long)]
        pub seed: Option<u64>,
        /// Draw gaps from one stream per run instead of reseeding per score
        #[arg(long)]
        pub per_run: bool,
        /// Stop after this many games have ended (0 = run until --ticks)
        #[arg(long, default_value_t = 1)]
        pub loop_games: u32,
    }

    /// Final result of one game
    #[derive(Debug, Clone, PartialEq)]
    pub struct GameResult {
        pub score: u32,
        pub ticks: u64,
        pub finished: bool,
    }

    pub fn build_config(args: &Args) -> Result<SimConfig> {
        let mut config = match &args.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("load config {:?}", path))?,
            None => SimConfig::default(),
        };
        if let Some(seed) = args.seed {
            config.seed = seed;
        }
        if args.per_run {
            config.gap_seeding = GapSeeding::PerRun;
        }
        Ok(config)
    }

    /// Drive the autopilot until the tick or game limit is reached
    pub fn run(config: SimConfig, max_ticks: u64, max_games: u32) -> Result<Vec<GameResult>> {
        let mut sim = Simulation::new(config).context("invalid simulation config")?;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut results = Vec::new();
        for _ in 0..max_ticks {
            if max_games > 0 && results.len() as u32 >= max_games {
                break;
            }
            // The autopilot resets a finished game on the next tick
            for event in tick(&mut sim, &input) {
                match event {
                    SimEvent::Crashed(cause) => {
                        log::info!(
                            "Game {} over: score {} after {} ticks ({:?})",
                            results.len() + 1,
                            sim.score(),
                            sim.ticks(),
                            cause
                        );
                        results.push(GameResult {
                            score: sim.score(),
                            ticks: sim.ticks(),
                            finished: true,
                        });
                    }
                    SimEvent::Passed { score } => log::debug!("Passed obstacle, score {}", score),
                    _ => {}
                }
            }
        }

        if !sim.is_over() && sim.ticks() > 0 {
            log::info!(
                "Stopped mid-game after {} ticks: score {}",
                sim.ticks(),
                sim.score()
            );
            results.push(GameResult {
                score: sim.score(),
                ticks: sim.ticks(),
                finished: false,
            });
        }
        Ok(results)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(extra: &[&str]) -> Args {
            let mut argv = vec!["flappy-sim"];
            argv.extend_from_slice(extra);
            Args::parse_from(argv)
        }

        #[test]
        fn test_cli_overrides() {
            let config = build_config(&args(&["--seed", "7", "--per-run"])).expect("config");
            assert_eq!(config.seed, 7);
            assert_eq!(config.gap_seeding, GapSeeding::PerRun);

            let config = build_config(&args(&[])).expect("config");
            assert_eq!(config, SimConfig::default());
        }

        #[test]
        fn test_missing_config_file_is_an_error() {
            let err = build_config(&args(&["--config", "/nonexistent/flappy.json"]));
            assert!(err.is_err());
        }

        #[test]
        fn test_tick_limit_reports_unfinished_game() {
            let results = run(SimConfig::default(), 93, 1).expect("run");
            assert_eq!(
                results,
                vec![GameResult {
                    score: 1,
                    ticks: 93,
                    finished: false
                }]
            );
        }

        #[test]
        fn test_invalid_config_rejected() {
            let config = SimConfig {
                gap_size: 1000.0,
                ..Default::default()
            };
            assert!(run(config, 10, 1).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    let args = headless::Args::parse();
    let config = headless::build_config(&args)?;
    log::info!(
        "Flappy Sim (headless) starting: seed {}, {} seeding",
        config.seed,
        config.gap_seeding.as_str()
    );

    let results = headless::run(config, args.ticks, args.loop_games)?;
    let best = results.iter().map(|r| r.score).max().unwrap_or(0);
    let finished = results.iter().filter(|r| r.finished).count();
    println!(
        "games: {} finished, {} total; best score: {}",
        finished,
        results.len(),
        best
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
