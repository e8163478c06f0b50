use std::time::Instant;

use engine::{
    tiles_to_px, ActorKind, ActorSpawn, Ai, AiKind, BackdropScrollMode, BoundingBox, DamageDealing,
    Difficulty, Edge, Elevator, Entity, EntityId, EntityStore, GameKey, InputEvent, InputState,
    LevelData, LevelLoadError, Map, Mode, Orientation, Physical, Pickup, PickupKind, PlayerControlled,
    PlayerDamaging, PlayerState, RenderSurface, ResourceLoader, ServiceProvider, Shootable,
    Sprite, TileAttributes, TileExtents, TileVec, TimeDelta, Trigger, TriggerKind, Vec2f,
    WorldRect, IN_GAME_VIEWPORT_HEIGHT_TILES, IN_GAME_VIEWPORT_OFFSET_PX,
    IN_GAME_VIEWPORT_WIDTH_TILES, TILE_SIZE_PX,
};
use tracing::info;

const EPISODE_PREFIXES: [char; 4] = ['L', 'M', 'N', 'O'];
const EPISODE_COUNT: i32 = 4;
const LEVELS_PER_EPISODE: i32 = 8;
const MENU_MUSIC_FILE: &str = "MENUSNG2.IMF";

const STARTING_HEALTH: i32 = 9;
const MAX_HEALTH: i32 = 9;
const STARTING_AMMO: u32 = 32;
const MAX_AMMO: u32 = 32;

const WALK_SPEED_TILES_PER_SECOND: f32 = 8.0;
const CLIMB_SPEED_TILES_PER_SECOND: f32 = 6.0;
const JUMP_SPEED_TILES_PER_SECOND: f32 = 16.0;
const GRAVITY_TILES_PER_SECOND_SQUARED: f32 = 48.0;
const MAX_FALL_SPEED_TILES_PER_SECOND: f32 = 20.0;

const PROJECTILE_SPEED_TILES_PER_SECOND: f32 = 28.0;
const PROJECTILE_DAMAGE: i32 = 1;
const ATTACK_COOLDOWN_SECONDS: f32 = 0.25;

const CONTACT_DAMAGE_MERCY_SECONDS: f32 = 1.0;
const DEATH_ANIMATION_SECONDS: f32 = 1.2;

const PATROL_SPEED_TILES_PER_SECOND: f32 = 3.0;
const ELEVATOR_SPEED_TILES_PER_SECOND: f32 = 4.0;
const CAMERA_DEAD_ZONE_TILES: i32 = 6;

const HEALTH_PICKUP_AMOUNT: i32 = 1;
const AMMO_PICKUP_AMOUNT: u32 = 8;
const SCORE_GEM_VALUE: u32 = 500;
const PATROL_ENEMY_HEALTH: i32 = 2;
const PATROL_ENEMY_CONTACT_DAMAGE: i32 = 1;
const PATROL_ENEMY_SCORE_VALUE: u32 = 150;
const WATCHER_CAMERA_HEALTH: i32 = 1;
const WATCHER_CAMERA_SCORE_VALUE: u32 = 100;

const BACKDROP_AUTO_SCROLL_PX_PER_SECOND: f32 = 12.0;
const BACKDROP_COLOR: [u8; 4] = [18, 24, 40, 255];
const PLAYER_COLOR: [u8; 4] = [90, 200, 255, 255];
const PATROL_ENEMY_COLOR: [u8; 4] = [220, 80, 60, 255];
const WATCHER_CAMERA_COLOR: [u8; 4] = [200, 160, 60, 255];
const PICKUP_COLOR: [u8; 4] = [120, 220, 120, 255];
const ELEVATOR_COLOR: [u8; 4] = [150, 150, 170, 255];
const EXIT_TRIGGER_COLOR: [u8; 4] = [240, 240, 90, 255];
const PROJECTILE_COLOR: [u8; 4] = [255, 255, 255, 255];

const COLLISION_EDGE_COLOR: [u8; 4] = [255, 255, 0, 255];
const CLIMBABLE_TINT_COLOR: [u8; 4] = [255, 100, 255, 220];
const LADDER_TINT_COLOR: [u8; 4] = [0, 100, 255, 220];
const FLAMMABLE_TINT_COLOR: [u8; 4] = [255, 127, 0, 220];
const GRID_COLOR: [u8; 4] = [255, 255, 255, 190];
const BBOX_DAMAGING_COLOR: [u8; 4] = [255, 0, 0, 255];
const BBOX_SOLID_COLOR: [u8; 4] = [255, 255, 0, 255];
const BBOX_DEFAULT_COLOR: [u8; 4] = [0, 255, 0, 255];

include!("types.rs");
include!("factory.rs");
include!("systems.rs");
include!("mode_state.rs");
include!("mode_impl.rs");
include!("util.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
