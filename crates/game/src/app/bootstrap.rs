use std::env;
use std::path::Path;

use engine::{Difficulty, LoopConfig, ModeBuildResult, ModeContext, TileVec};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::ingame::{IngameMode, PlayerModel};
use super::saved_game;

const EPISODE_ENV_VAR: &str = "PARALLAX_EPISODE";
const LEVEL_ENV_VAR: &str = "PARALLAX_LEVEL";
const DIFFICULTY_ENV_VAR: &str = "PARALLAX_DIFFICULTY";
const RESUME_ENV_VAR: &str = "PARALLAX_RESUME";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) build_mode: Box<dyn FnOnce(&mut ModeContext<'_>) -> ModeBuildResult>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Parallax Startup ===");

    let start = resolve_start_request();
    info!(
        episode = start.episode,
        level = start.level,
        difficulty = ?start.difficulty,
        resumed = start.position_override.is_some(),
        "start_request"
    );

    let config = LoopConfig::default();
    let build_mode = Box::new(move |context: &mut ModeContext<'_>| -> ModeBuildResult {
        let mode = IngameMode::load(
            start.episode,
            start.level,
            start.difficulty,
            start.player_model,
            start.position_override,
            context.resources,
            context.services,
        )?;
        Ok(Box::new(mode))
    });

    AppWiring { config, build_mode }
}

struct StartRequest {
    episode: i32,
    level: i32,
    difficulty: Difficulty,
    player_model: PlayerModel,
    position_override: Option<TileVec>,
}

fn resolve_start_request() -> StartRequest {
    if let Ok(path) = env::var(RESUME_ENV_VAR) {
        match saved_game::load_saved_game(Path::new(&path)) {
            Ok(save) => {
                info!(path = %path, episode = save.episode, level = save.level, "resuming_saved_game");
                return StartRequest {
                    episode: save.episode,
                    level: save.level,
                    difficulty: save.difficulty,
                    player_model: save.player_model(),
                    position_override: Some(save.position()),
                };
            }
            Err(error) => warn!(path = %path, error = %error, "saved_game_unavailable"),
        }
    }

    StartRequest {
        episode: parse_index_env(EPISODE_ENV_VAR, 4),
        level: parse_index_env(LEVEL_ENV_VAR, 8),
        difficulty: parse_difficulty_env(),
        player_model: PlayerModel::default(),
        position_override: None,
    }
}

fn parse_index_env(var: &'static str, limit: i32) -> i32 {
    let Ok(raw) = env::var(var) else {
        return 0;
    };
    match raw.parse::<i32>() {
        Ok(value) if (0..limit).contains(&value) => value,
        _ => {
            warn!(var, value = raw.as_str(), "invalid index env var; using 0");
            0
        }
    }
}

fn parse_difficulty_env() -> Difficulty {
    let Ok(raw) = env::var(DIFFICULTY_ENV_VAR) else {
        return Difficulty::default();
    };
    match Difficulty::from_token(&raw) {
        Some(difficulty) => difficulty,
        None => {
            warn!(
                var = DIFFICULTY_ENV_VAR,
                value = raw.as_str(),
                "invalid difficulty env var; using medium"
            );
            Difficulty::default()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
