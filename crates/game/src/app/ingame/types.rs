/// The player's persistent stats. Two copies exist while a level runs: the
/// live, mutating one and the snapshot taken at level start, which restart
/// copies back wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayerModel {
    pub(crate) health: i32,
    pub(crate) ammo: u32,
    pub(crate) score: u32,
    pub(crate) has_access_card: bool,
    pub(crate) has_special_boots: bool,
}

impl Default for PlayerModel {
    fn default() -> Self {
        Self {
            health: STARTING_HEALTH,
            ammo: STARTING_AMMO,
            score: 0,
            has_access_card: false,
            has_special_boots: false,
        }
    }
}

impl PlayerModel {
    fn add_health(&mut self, amount: i32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    fn add_ammo(&mut self, amount: u32) {
        self.ammo = (self.ammo + amount).min(MAX_AMMO);
    }

    fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }
}

/// Lifecycle state of the running level. `Finished` is a latch: nothing
/// clears it short of constructing a new level instance. `Restarting` exists
/// only inside the synchronous restart sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelPhase {
    Playing,
    Finished,
    Restarting,
}

impl LevelPhase {
    /// The single authoritative transition point. Anything outside the legal
    /// edges is a programming error.
    fn transition(&mut self, next: LevelPhase) {
        let legal = matches!(
            (*self, next),
            (LevelPhase::Playing, LevelPhase::Finished)
                | (LevelPhase::Playing, LevelPhase::Restarting)
                | (LevelPhase::Restarting, LevelPhase::Playing)
        );
        assert!(
            legal,
            "illegal level phase transition: {:?} -> {:?}",
            *self, next
        );
        *self = next;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectileDirection {
    Left,
    Right,
    Up,
}

/// Per-level state owned by the orchestrator. `initial_actors` is never
/// mutated after load; restarts respawn from it verbatim.
#[derive(Debug)]
struct LevelState {
    map: Map,
    tile_attributes: TileAttributes,
    initial_actors: Vec<ActorSpawn>,
}
