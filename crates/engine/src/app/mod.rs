mod input;
mod loop_runner;
mod metrics;
mod mode;
mod rendering;

pub use input::{GameKey, InputEvent, InputState};
pub use loop_runner::{run_app, AppError, LoopConfig, ModeBuildResult, ModeContext};
pub use metrics::LoopMetricsSnapshot;
pub use mode::{Mode, ServiceProvider, TimeDelta};
pub use rendering::{
    tiles_to_px, RenderSurface, Renderer, IN_GAME_VIEWPORT_HEIGHT_TILES,
    IN_GAME_VIEWPORT_OFFSET_PX, IN_GAME_VIEWPORT_WIDTH_TILES, LOGICAL_FRAME_HEIGHT_PX,
    LOGICAL_FRAME_WIDTH_PX, TILE_SIZE_PX,
};
