use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod content;
pub mod map;
pub mod world;

pub use app::{
    run_app, tiles_to_px, AppError, GameKey, InputEvent, InputState, LoopConfig,
    LoopMetricsSnapshot, Mode, ModeBuildResult, ModeContext, RenderSurface, Renderer,
    ServiceProvider, TimeDelta, IN_GAME_VIEWPORT_HEIGHT_TILES, IN_GAME_VIEWPORT_OFFSET_PX,
    IN_GAME_VIEWPORT_WIDTH_TILES, LOGICAL_FRAME_HEIGHT_PX, LOGICAL_FRAME_WIDTH_PX, TILE_SIZE_PX,
};
pub use content::{
    ActorKind, ActorSpawn, BackdropScrollMode, Difficulty, LevelData, LevelLoadError,
    ResourceLoader,
};
pub use map::{CollisionData, Edge, Map, TileAttributes};
pub use world::{
    Ai, AiKind, BoundingBox, DamageDealing, Elevator, Entity, EntityId, EntityStore, Orientation,
    Physical, Pickup, PickupKind, PlayerControlled, PlayerDamaging, PlayerState, Shootable, Sprite,
    TileExtents, TileVec, Trigger, TriggerKind, Vec2f, WorldRect,
};

pub const ROOT_ENV_VAR: &str = "PARALLAX_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub assets_dir: PathBuf,
    pub levels_dir: PathBuf,
    pub art_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error(
        "PARALLAX_ROOT is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or assets/."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "could not detect a project root by walking upward from {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or assets/.\n\
Set {env_var} to the project root explicitly."
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    let assets_dir = root.join("assets");
    let levels_dir = assets_dir.join("levels");
    let art_dir = assets_dir.join("art");

    Ok(AppPaths {
        root,
        assets_dir,
        levels_dir,
        art_dir,
    })
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let raw = PathBuf::from(value);
            let normalized = normalize_path(&raw);
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            for candidate in exe_dir.ancestors() {
                if is_repo_marker(candidate) {
                    return Ok(normalize_path(candidate));
                }
            }

            Err(StartupError::RootNotFound {
                start_dir: normalize_path(&exe_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_assets = path.join("assets").is_dir();

    cargo_toml && (has_crates || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_marker_requires_cargo_toml() {
        let cwd = env::current_dir().expect("cwd");
        assert!(!is_repo_marker(&cwd.join("definitely_not_a_marker")));
    }

    #[test]
    fn asset_directories_hang_off_the_assets_root() {
        let paths = AppPaths {
            root: PathBuf::from("/tmp/game"),
            assets_dir: PathBuf::from("/tmp/game/assets"),
            levels_dir: PathBuf::from("/tmp/game/assets/levels"),
            art_dir: PathBuf::from("/tmp/game/assets/art"),
        };
        assert!(paths.levels_dir.starts_with(&paths.assets_dir));
        assert!(paths.art_dir.starts_with(&paths.assets_dir));
    }
}
