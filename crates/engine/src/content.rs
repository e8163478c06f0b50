//! Level data loading.
//!
//! Levels are JSON documents under `assets/levels/`, keyed by the historical
//! `<EpisodeLetter><Number>.MNI` file names the game derives. A load either
//! produces a complete [`LevelData`] or fails with [`LevelLoadError`]; no
//! partial level is ever constructed.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::RenderSurface;
use crate::map::{CollisionData, Map, TileAttributes};
use crate::world::TileVec;
use crate::AppPaths;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    LevelExit,
    HealthPickup,
    AmmoPickup,
    ScoreGem,
    AccessCard,
    SpecialBoots,
    PatrolEnemy,
    WatcherCamera,
    Elevator,
}

/// One entry of the actor placement list. The list is read once at load time
/// and never mutated afterwards so restarts reproduce identical spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorSpawn {
    pub kind: ActorKind,
    pub position: TileVec,
    pub min_difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackdropScrollMode {
    Fixed,
    ParallaxHorizontal,
    AutoScroll,
}

#[derive(Debug, Clone)]
pub struct LevelData {
    pub map: Map,
    pub tile_attributes: TileAttributes,
    pub actors: Vec<ActorSpawn>,
    pub backdrop: Option<String>,
    pub scroll_mode: BackdropScrollMode,
    pub music_file: String,
}

#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("failed to read level file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse level file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("level {path} has a zero-sized grid")]
    EmptyGrid { path: PathBuf },
    #[error("level {path} has {actual} tiles, expected {expected}")]
    TileCountMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("level {path} has {actual} collision cells, expected {expected}")]
    CollisionCountMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("level {path} has {actual} attribute cells, expected {expected}")]
    AttributeCountMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("level {path} places an actor at ({x}, {y}) outside the {width}x{height} grid")]
    ActorOutOfBounds {
        path: PathBuf,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Deserialize)]
struct LevelDocument {
    width: u32,
    height: u32,
    tiles: Vec<u16>,
    collision: Vec<u8>,
    attributes: Vec<u8>,
    actors: Vec<ActorPlacementDocument>,
    #[serde(default)]
    backdrop: Option<String>,
    scroll_mode: BackdropScrollMode,
    music: String,
}

#[derive(Debug, Deserialize)]
struct ActorPlacementDocument {
    kind: ActorKind,
    x: i32,
    y: i32,
    #[serde(default = "min_difficulty_default")]
    min_difficulty: Difficulty,
}

fn min_difficulty_default() -> Difficulty {
    Difficulty::Easy
}

#[derive(Debug, Clone)]
pub struct ResourceLoader {
    levels_dir: PathBuf,
    art_dir: PathBuf,
}

impl ResourceLoader {
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            levels_dir: paths.levels_dir.clone(),
            art_dir: paths.art_dir.clone(),
        }
    }

    /// Loads and validates a level document, filtering actor placements below
    /// the requested difficulty. All-or-nothing: any failure aborts the load.
    pub fn load_level(
        &self,
        file_name: &str,
        difficulty: Difficulty,
    ) -> Result<LevelData, LevelLoadError> {
        let path = self.levels_dir.join(file_name);
        let raw = std::fs::read_to_string(&path).map_err(|source| LevelLoadError::Read {
            path: path.clone(),
            source,
        })?;
        let document: LevelDocument =
            serde_json::from_str(&raw).map_err(|source| LevelLoadError::Parse {
                path: path.clone(),
                source,
            })?;
        build_level_data(document, difficulty, &path)
    }

    /// Decodes a full-screen image (loading screens, backdrops). The format is
    /// sniffed from content, so the historical `.MNI` names work for PNG data.
    pub fn load_fullscreen_image(&self, file_name: &str) -> Result<RenderSurface, LevelLoadError> {
        let path = self.art_dir.join(file_name);
        let reader = image::ImageReader::open(&path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|source| LevelLoadError::ImageRead {
                path: path.clone(),
                source,
            })?;
        let decoded = reader
            .decode()
            .map_err(|source| LevelLoadError::ImageDecode {
                path: path.clone(),
                source,
            })?;
        let rgba = decoded.to_rgba8();
        Ok(RenderSurface::from_rgba(
            rgba.width(),
            rgba.height(),
            rgba.into_raw(),
        ))
    }
}

fn build_level_data(
    document: LevelDocument,
    difficulty: Difficulty,
    path: &Path,
) -> Result<LevelData, LevelLoadError> {
    let expected = document.width as usize * document.height as usize;
    if expected == 0 {
        return Err(LevelLoadError::EmptyGrid {
            path: path.to_path_buf(),
        });
    }
    if document.tiles.len() != expected {
        return Err(LevelLoadError::TileCountMismatch {
            path: path.to_path_buf(),
            expected,
            actual: document.tiles.len(),
        });
    }
    if document.collision.len() != expected {
        return Err(LevelLoadError::CollisionCountMismatch {
            path: path.to_path_buf(),
            expected,
            actual: document.collision.len(),
        });
    }
    if document.attributes.len() != expected {
        return Err(LevelLoadError::AttributeCountMismatch {
            path: path.to_path_buf(),
            expected,
            actual: document.attributes.len(),
        });
    }

    let mut actors = Vec::with_capacity(document.actors.len());
    for placement in &document.actors {
        if placement.x < 0
            || placement.y < 0
            || placement.x as u32 >= document.width
            || placement.y as u32 >= document.height
        {
            return Err(LevelLoadError::ActorOutOfBounds {
                path: path.to_path_buf(),
                x: placement.x,
                y: placement.y,
                width: document.width,
                height: document.height,
            });
        }
        if placement.min_difficulty > difficulty {
            continue;
        }
        actors.push(ActorSpawn {
            kind: placement.kind,
            position: TileVec::new(placement.x, placement.y),
            min_difficulty: placement.min_difficulty,
        });
    }

    let collision = document
        .collision
        .into_iter()
        .map(CollisionData::from_mask)
        .collect();
    let map = Map::new(document.width, document.height, document.tiles, collision);
    let tile_attributes =
        TileAttributes::new(document.width, document.height, document.attributes);

    Ok(LevelData {
        map,
        tile_attributes,
        actors,
        backdrop: document.backdrop,
        scroll_mode: document.scroll_mode,
        music_file: document.music,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn loader_with_level(name: &str, contents: &str) -> (tempfile::TempDir, ResourceLoader) {
        let dir = tempfile::tempdir().expect("temp dir");
        let levels_dir = dir.path().join("levels");
        let art_dir = dir.path().join("art");
        fs::create_dir_all(&levels_dir).expect("levels dir");
        fs::create_dir_all(&art_dir).expect("art dir");
        fs::write(levels_dir.join(name), contents).expect("level file");
        let loader = ResourceLoader {
            levels_dir,
            art_dir,
        };
        (dir, loader)
    }

    fn sample_document(tile_count: usize) -> String {
        let tiles: Vec<String> = (0..tile_count).map(|_| "1".to_string()).collect();
        let cells: Vec<String> = (0..6).map(|_| "15".to_string()).collect();
        format!(
            r#"{{
                "width": 3,
                "height": 2,
                "tiles": [{tiles}],
                "collision": [{cells}],
                "attributes": [0, 0, 0, 4, 2, 1],
                "actors": [
                    {{"kind": "player", "x": 0, "y": 0}},
                    {{"kind": "level_exit", "x": 2, "y": 0}},
                    {{"kind": "patrol_enemy", "x": 1, "y": 1, "min_difficulty": "hard"}}
                ],
                "scroll_mode": "parallax_horizontal",
                "music": "STAGE1.IMF"
            }}"#,
            tiles = tiles.join(", "),
            cells = cells.join(", "),
        )
    }

    #[test]
    fn valid_document_loads_with_map_attributes_and_actors() {
        let (_dir, loader) = loader_with_level("L1.MNI", &sample_document(6));
        let level = loader
            .load_level("L1.MNI", Difficulty::Hard)
            .expect("level loads");

        assert_eq!(level.map.width(), 3);
        assert_eq!(level.map.height(), 2);
        assert!(level.map.collision_data(0, 0).is_solid_on(crate::map::Edge::Top));
        assert!(level.tile_attributes.is_flammable(0, 1));
        assert!(level.tile_attributes.is_ladder(1, 1));
        assert_eq!(level.actors.len(), 3);
        assert_eq!(level.music_file, "STAGE1.IMF");
        assert_eq!(level.scroll_mode, BackdropScrollMode::ParallaxHorizontal);
        assert!(level.backdrop.is_none());
    }

    #[test]
    fn placements_above_requested_difficulty_are_filtered_at_load() {
        let (_dir, loader) = loader_with_level("L1.MNI", &sample_document(6));
        let level = loader
            .load_level("L1.MNI", Difficulty::Easy)
            .expect("level loads");

        assert_eq!(level.actors.len(), 2);
        assert!(level
            .actors
            .iter()
            .all(|spawn| spawn.kind != ActorKind::PatrolEnemy));
    }

    #[test]
    fn tile_count_mismatch_is_fatal() {
        let (_dir, loader) = loader_with_level("L1.MNI", &sample_document(5));
        let error = loader
            .load_level("L1.MNI", Difficulty::Medium)
            .expect_err("load must fail");
        assert!(matches!(
            error,
            LevelLoadError::TileCountMismatch {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn missing_level_file_is_fatal() {
        let (_dir, loader) = loader_with_level("L1.MNI", &sample_document(6));
        let error = loader
            .load_level("M1.MNI", Difficulty::Medium)
            .expect_err("load must fail");
        assert!(matches!(error, LevelLoadError::Read { .. }));
    }

    #[test]
    fn actor_outside_the_grid_is_fatal() {
        let contents = r#"{
            "width": 1,
            "height": 1,
            "tiles": [0],
            "collision": [0],
            "attributes": [0],
            "actors": [{"kind": "player", "x": 5, "y": 0}],
            "scroll_mode": "fixed",
            "music": "STAGE1.IMF"
        }"#;
        let (_dir, loader) = loader_with_level("L1.MNI", contents);
        let error = loader
            .load_level("L1.MNI", Difficulty::Medium)
            .expect_err("load must fail");
        assert!(matches!(
            error,
            LevelLoadError::ActorOutOfBounds { x: 5, y: 0, .. }
        ));
    }

    #[test]
    fn difficulty_tokens_parse_case_sensitively() {
        assert_eq!(Difficulty::from_token("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_token("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_token("EASY"), None);
        assert_eq!(Difficulty::from_token("nightmare"), None);
    }

    #[test]
    fn difficulty_ordering_supports_min_difficulty_gates() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
    }
}
