use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::content::ResourceLoader;
use crate::{resolve_app_paths, StartupError};

use super::input::{GameKey, InputEvent};
use super::metrics::MetricsAccumulator;
use super::mode::{Mode, ServiceProvider};
use super::rendering::{
    RenderSurface, Renderer, LOGICAL_FRAME_HEIGHT_PX, LOGICAL_FRAME_WIDTH_PX,
};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Parallax".to_string(),
            window_width: 1280,
            window_height: 800,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("failed to build the initial game mode: {0}")]
    ModeBuild(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub type ModeBuildResult = Result<Box<dyn Mode>, Box<dyn std::error::Error + Send + Sync>>;

/// What a mode builder gets to work with: the asset loader and the platform
/// services (used for the fade-bracketed loading-screen sequence).
pub struct ModeContext<'a> {
    pub resources: &'a ResourceLoader,
    pub services: &'a mut dyn ServiceProvider,
}

pub fn run_app<F>(config: LoopConfig, build_mode: F) -> Result<(), AppError>
where
    F: FnOnce(&mut ModeContext<'_>) -> ModeBuildResult,
{
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        levels_dir = %app_paths.levels_dir.display(),
        art_dir = %app_paths.art_dir.display(),
        "startup"
    );
    let resources = ResourceLoader::new(&app_paths);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window: &'static winit::window::Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    ));
    let mut renderer = Renderer::new(window).map_err(AppError::CreateRenderer)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut services = ScreenServices::new(resources.clone());
    let mut mode = {
        let mut context = ModeContext {
            resources: &resources,
            services: &mut services,
        };
        build_mode(&mut context).map_err(AppError::ModeBuild)?
    };

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        "loop_config"
    );

    let mut frame = RenderSurface::new(LOGICAL_FRAME_WIDTH_PX, LOGICAL_FRAME_HEIGHT_PX);
    let mut input_collector = InputCollector::default();
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    for input_event in input_collector.drain_pending() {
                        mode.handle_event(&input_event);
                    }

                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    accumulator =
                        accumulator.saturating_add(raw_frame_dt.min(max_frame_delta));

                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        mode.update_and_render(fixed_dt_seconds, &mut frame, &mut services);
                        metrics_accumulator.record_tick();
                    }
                    accumulator = step_plan.remaining_accumulator;
                    if step_plan.ticks_to_run > 0 {
                        services.dismiss_splash();
                    }
                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame, "sim_clamp_triggered"
                        );
                    }

                    if mode.finished() {
                        info!("mode_finished");
                        window_target.exit();
                        return;
                    }

                    if let Some(splash) = services.splash() {
                        frame.blit(&splash, 0, 0);
                    }
                    if let Err(error) = renderer.present(&frame, services.brightness()) {
                        warn!(error = %error, "renderer_present_failed");
                        window_target.exit();
                    }
                    metrics_accumulator.record_frame(raw_frame_dt);

                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Platform services backed by the presenter state: fades scale frame
/// brightness, loading screens become a splash surface shown until the next
/// simulated tick renders over it, music requests are tracked and logged.
struct ScreenServices {
    resources: ResourceLoader,
    current_music: Option<String>,
    brightness: f32,
    splash: Option<RenderSurface>,
}

impl ScreenServices {
    fn new(resources: ResourceLoader) -> Self {
        Self {
            resources,
            current_music: None,
            brightness: 1.0,
            splash: None,
        }
    }

    fn brightness(&self) -> f32 {
        self.brightness
    }

    fn splash(&self) -> Option<RenderSurface> {
        self.splash.clone()
    }

    fn dismiss_splash(&mut self) {
        self.splash = None;
    }
}

impl ServiceProvider for ScreenServices {
    fn play_music(&mut self, track: &str) {
        if self.current_music.as_deref() == Some(track) {
            return;
        }
        info!(track, "music_started");
        self.current_music = Some(track.to_string());
    }

    fn fade_out_screen(&mut self) {
        self.brightness = 0.0;
    }

    fn fade_in_screen(&mut self) {
        self.brightness = 1.0;
    }

    fn show_loading_screen(&mut self, file_name: &str) {
        match self.resources.load_fullscreen_image(file_name) {
            Ok(surface) => self.splash = Some(surface),
            Err(error) => {
                warn!(file = file_name, error = %error, "loading_screen_unavailable");
            }
        }
    }

    fn show_debug_text(&mut self, text: &str) {
        debug!(overlay = text, "debug_text");
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    pending: Vec<InputEvent>,
    quit_requested: bool,
}

impl InputCollector {
    fn handle_keyboard_input(&mut self, key_event: &winit::event::KeyEvent) {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return;
        };
        let pressed = key_event.state == ElementState::Pressed;
        if code == KeyCode::Escape {
            if pressed {
                self.quit_requested = true;
            }
            return;
        }
        if let Some(key) = map_key_code(code) {
            self.pending.push(InputEvent { key, pressed });
        }
    }

    fn drain_pending(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}

fn map_key_code(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::ArrowUp => Some(GameKey::Up),
        KeyCode::ArrowDown => Some(GameKey::Down),
        KeyCode::ArrowLeft => Some(GameKey::Left),
        KeyCode::ArrowRight => Some(GameKey::Right),
        KeyCode::ControlLeft | KeyCode::ControlRight => Some(GameKey::Jump),
        KeyCode::AltLeft | KeyCode::AltRight => Some(GameKey::Shoot),
        KeyCode::KeyB => Some(GameKey::DebugBoundingBoxes),
        KeyCode::KeyC => Some(GameKey::DebugCollisionData),
        KeyCode::KeyG => Some(GameKey::DebugGrid),
        KeyCode::KeyD => Some(GameKey::DebugText),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
