/// The fixed set of keys the engine reports to game modes. Anything outside
/// this set never reaches a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    Jump,
    Shoot,
    DebugBoundingBoxes,
    DebugCollisionData,
    DebugGrid,
    DebugText,
}

/// Raw key-down/key-up event. Key-repeat shows up as repeated `pressed`
/// events, which is why debug toggles must act on release only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: GameKey,
    pub pressed: bool,
}

/// Flat record of currently-held gameplay keys. A live snapshot of the
/// current frame's held state, no history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub moving_up: bool,
    pub moving_down: bool,
    pub moving_left: bool,
    pub moving_right: bool,
    pub jumping: bool,
    pub shooting: bool,
}

impl InputState {
    /// Applies a gameplay key transition. Debug keys are not held state and
    /// are ignored here.
    pub fn set_key(&mut self, key: GameKey, pressed: bool) {
        match key {
            GameKey::Up => self.moving_up = pressed,
            GameKey::Down => self.moving_down = pressed,
            GameKey::Left => self.moving_left = pressed,
            GameKey::Right => self.moving_right = pressed,
            GameKey::Jump => self.jumping = pressed,
            GameKey::Shoot => self.shooting = pressed,
            GameKey::DebugBoundingBoxes
            | GameKey::DebugCollisionData
            | GameKey::DebugGrid
            | GameKey::DebugText => {}
        }
    }
}
