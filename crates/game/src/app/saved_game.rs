//! Saved-game files for resuming a level mid-way: which level to enter, where
//! the player stands, and the player stats carried into the level.

use std::fs;
use std::path::Path;

use engine::{Difficulty, TileVec};
use serde::Deserialize;

use super::ingame::PlayerModel;

const SAVE_VERSION: u32 = 1;

type SavedGameResult<T> = Result<T, String>;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
struct SavedTileVec {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SavedGame {
    save_version: u32,
    pub(crate) episode: i32,
    pub(crate) level: i32,
    pub(crate) difficulty: Difficulty,
    player_position: SavedTileVec,
    health: i32,
    ammo: u32,
    score: u32,
    has_access_card: bool,
    has_special_boots: bool,
}

impl SavedGame {
    pub(crate) fn player_model(&self) -> PlayerModel {
        PlayerModel {
            health: self.health,
            ammo: self.ammo,
            score: self.score,
            has_access_card: self.has_access_card,
            has_special_boots: self.has_special_boots,
        }
    }

    pub(crate) fn position(&self) -> TileVec {
        TileVec::new(self.player_position.x, self.player_position.y)
    }
}

pub(crate) fn load_saved_game(path: &Path) -> SavedGameResult<SavedGame> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("failed to read saved game {}: {error}", path.display()))?;
    parse_saved_game(&raw)
}

/// Saved games are external input, so range problems are soft errors here,
/// unlike the in-engine index contracts.
pub(crate) fn parse_saved_game(raw: &str) -> SavedGameResult<SavedGame> {
    let deserializer = &mut serde_json::Deserializer::from_str(raw);
    let save: SavedGame = serde_path_to_error::deserialize(deserializer)
        .map_err(|error| format!("invalid saved game at {}: {}", error.path(), error.inner()))?;

    if save.save_version != SAVE_VERSION {
        return Err(format!(
            "unsupported save version {}: expected {SAVE_VERSION}",
            save.save_version
        ));
    }
    if !(0..4).contains(&save.episode) {
        return Err(format!("saved episode {} out of range", save.episode));
    }
    if !(0..8).contains(&save.level) {
        return Err(format!("saved level {} out of range", save.level));
    }
    if save.health <= 0 {
        return Err(format!("saved health {} is not playable", save.health));
    }

    Ok(save)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_save_json() -> String {
        r#"{
            "save_version": 1,
            "episode": 1,
            "level": 3,
            "difficulty": "hard",
            "player_position": {"x": 42, "y": 17},
            "health": 6,
            "ammo": 12,
            "score": 31500,
            "has_access_card": true,
            "has_special_boots": false
        }"#
        .to_string()
    }

    #[test]
    fn valid_save_parses_into_model_and_position() {
        let save = parse_saved_game(&sample_save_json()).expect("save parses");
        assert_eq!(save.episode, 1);
        assert_eq!(save.level, 3);
        assert_eq!(save.difficulty, Difficulty::Hard);
        assert_eq!(save.position(), TileVec::new(42, 17));

        let model = save.player_model();
        assert_eq!(model.health, 6);
        assert_eq!(model.ammo, 12);
        assert_eq!(model.score, 31500);
        assert!(model.has_access_card);
        assert!(!model.has_special_boots);
    }

    #[test]
    fn parse_error_reports_the_json_path() {
        let raw = sample_save_json().replace("\"x\": 42", "\"x\": \"far\"");
        let error = parse_saved_game(&raw).expect_err("parse must fail");
        assert!(error.contains("player_position.x"), "error was: {error}");
    }

    #[test]
    fn wrong_save_version_is_rejected() {
        let raw = sample_save_json().replace("\"save_version\": 1", "\"save_version\": 9");
        let error = parse_saved_game(&raw).expect_err("parse must fail");
        assert!(error.contains("unsupported save version 9"));
    }

    #[test]
    fn out_of_range_level_is_a_soft_error_not_a_panic() {
        let raw = sample_save_json().replace("\"level\": 3", "\"level\": 8");
        let error = parse_saved_game(&raw).expect_err("parse must fail");
        assert!(error.contains("saved level 8 out of range"));
    }

    #[test]
    fn dead_player_save_is_rejected() {
        let raw = sample_save_json().replace("\"health\": 6", "\"health\": 0");
        assert!(parse_saved_game(&raw).is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let error =
            load_saved_game(Path::new("/definitely/not/here.save.json")).expect_err("must fail");
        assert!(error.contains("/definitely/not/here.save.json"));
    }
}
