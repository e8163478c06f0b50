pub const TILE_SIZE_PX: i32 = 8;

pub fn tiles_to_px(tiles: i32) -> i32 {
    tiles * TILE_SIZE_PX
}
