mod renderer;
mod surface;
mod transform;

pub use renderer::Renderer;
pub use surface::RenderSurface;
pub use transform::{tiles_to_px, TILE_SIZE_PX};

/// Size of the in-game simulation viewport, in tiles.
pub const IN_GAME_VIEWPORT_WIDTH_TILES: i32 = 32;
pub const IN_GAME_VIEWPORT_HEIGHT_TILES: i32 = 20;

/// Where the off-screen viewport surface lands on the logical output frame.
/// Keeping this indirection lets overlays composite at frame resolution
/// independent of the simulation viewport size.
pub const IN_GAME_VIEWPORT_OFFSET_PX: (i32, i32) = (8, 8);

/// Logical output frame, scaled to the window by the presenter.
pub const LOGICAL_FRAME_WIDTH_PX: u32 = 320;
pub const LOGICAL_FRAME_HEIGHT_PX: u32 = 200;
