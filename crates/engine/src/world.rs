//! Entity store and the typed components gameplay systems operate on.
//!
//! World coordinates are integer tile units; y grows downward. An entity's
//! `position` is the top-left tile of its visual footprint, and an attached
//! [`BoundingBox`] describes its collision extent relative to that position.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileVec {
    pub x: i32,
    pub y: i32,
}

impl TileVec {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileExtents {
    pub width: i32,
    pub height: i32,
}

/// Inclusive tile-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldRect {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl WorldRect {
    pub fn overlaps(&self, other: &WorldRect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    pub fn contains(&self, point: TileVec) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub offset: TileVec,
    pub size: TileExtents,
}

impl BoundingBox {
    pub fn new(offset: TileVec, size: TileExtents) -> Self {
        assert!(
            size.width > 0 && size.height > 0,
            "bounding box must have positive extents"
        );
        Self { offset, size }
    }

    /// The box placed at an entity position, in world tile coordinates.
    pub fn world_space(&self, position: TileVec) -> WorldRect {
        let left = position.x + self.offset.x;
        let top = position.y + self.offset.y;
        WorldRect {
            left,
            right: left + self.size.width - 1,
            top,
            bottom: top + self.size.height - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physical {
    pub velocity: Vec2f,
    pub move_remainder: Vec2f,
    pub gravity_affected: bool,
    pub on_ground: bool,
}

impl Physical {
    pub fn new(gravity_affected: bool) -> Self {
        Self {
            velocity: Vec2f::default(),
            move_remainder: Vec2f::default(),
            gravity_affected,
            on_ground: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub color: [u8; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    LevelExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub kind: TriggerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerState {
    Standing,
    Walking,
    Jumping,
    Falling,
    ClimbingLadder,
    Dieing,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerControlled {
    pub state: PlayerState,
    pub orientation: Orientation,
}

impl Default for PlayerControlled {
    fn default() -> Self {
        Self {
            state: PlayerState::Standing,
            orientation: Orientation::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shootable {
    pub health: i32,
    pub score_value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDamaging {
    pub amount: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageDealing {
    pub amount: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Health,
    Ammo,
    ScoreGem,
    AccessCard,
    SpecialBoots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub kind: PickupKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elevator {
    pub speed: f32,
    pub move_remainder: f32,
}

impl Elevator {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            move_remainder: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiKind {
    Patrol { dir: Orientation },
    Watcher { facing: Orientation },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ai {
    pub kind: AiKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// One entity plus its optional typed components.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub position: TileVec,
    pub bounding_box: Option<BoundingBox>,
    pub physical: Option<Physical>,
    pub sprite: Option<Sprite>,
    pub trigger: Option<Trigger>,
    pub player_controlled: Option<PlayerControlled>,
    pub shootable: Option<Shootable>,
    pub player_damaging: Option<PlayerDamaging>,
    pub damage_dealing: Option<DamageDealing>,
    pub pickup: Option<Pickup>,
    pub elevator: Option<Elevator>,
    pub ai: Option<Ai>,
    pub solid_body: bool,
}

impl Entity {
    fn bare(id: EntityId, position: TileVec) -> Self {
        Self {
            id,
            position,
            bounding_box: None,
            physical: None,
            sprite: None,
            trigger: None,
            player_controlled: None,
            shootable: None,
            player_damaging: None,
            damage_dealing: None,
            pickup: None,
            elevator: None,
            ai: None,
            solid_body: false,
        }
    }

    /// World-space collision rect, if the entity carries a bounding box.
    pub fn world_rect(&self) -> Option<WorldRect> {
        self.bounding_box.map(|bbox| bbox.world_space(self.position))
    }
}

/// Flat entity store. Spawns are visible immediately so that entities created
/// mid-frame (projectiles) participate in the same frame's later systems.
#[derive(Debug, Default)]
pub struct EntityStore {
    next_id: u64,
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn spawn_at(&mut self, position: TileVec) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entities.push(Entity::bare(id, position));
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.id != id);
        self.entities.len() != before
    }

    /// Removes every entity. Entity ids are never reused, so handles into a
    /// previous population stay dangling instead of aliasing new entities.
    pub fn reset(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_ids_are_sequential_and_never_reused() {
        let mut store = EntityStore::default();
        let first = store.spawn_at(TileVec::new(0, 0));
        let second = store.spawn_at(TileVec::new(1, 1));
        assert_eq!(first, EntityId(0));
        assert_eq!(second, EntityId(1));

        store.reset();
        let third = store.spawn_at(TileVec::new(2, 2));
        assert_eq!(third, EntityId(2));
        assert!(store.find_entity(first).is_none());
    }

    #[test]
    fn spawn_is_visible_immediately() {
        let mut store = EntityStore::default();
        let id = store.spawn_at(TileVec::new(3, 4));
        let entity = store.find_entity(id).expect("entity");
        assert_eq!(entity.position, TileVec::new(3, 4));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn despawn_removes_only_the_named_entity() {
        let mut store = EntityStore::default();
        let doomed = store.spawn_at(TileVec::new(0, 0));
        let survivor = store.spawn_at(TileVec::new(5, 5));

        assert!(store.despawn(doomed));
        assert!(!store.despawn(doomed));
        assert!(store.find_entity(survivor).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn world_rect_is_inclusive_and_offset_by_position() {
        let bbox = BoundingBox::new(
            TileVec::new(0, 0),
            TileExtents {
                width: 11,
                height: 10,
            },
        );
        let rect = bbox.world_space(TileVec::new(95, 41));
        assert_eq!(rect.left, 95);
        assert_eq!(rect.right, 105);
        assert_eq!(rect.top, 41);
        assert_eq!(rect.bottom, 50);
    }

    #[test]
    fn rect_overlap_is_inclusive_at_edges() {
        let a = WorldRect {
            left: 0,
            right: 2,
            top: 0,
            bottom: 2,
        };
        let touching = WorldRect {
            left: 2,
            right: 4,
            top: 0,
            bottom: 2,
        };
        let apart = WorldRect {
            left: 3,
            right: 4,
            top: 0,
            bottom: 2,
        };
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    #[should_panic(expected = "positive extents")]
    fn zero_sized_bounding_box_is_a_contract_violation() {
        let _ = BoundingBox::new(TileVec::new(0, 0), TileExtents { width: 0, height: 1 });
    }
}
