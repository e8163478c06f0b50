/// Turns actor placements into configured entities and creates projectiles.
#[derive(Debug, Clone)]
struct EntityFactory {
    difficulty: Difficulty,
}

impl EntityFactory {
    fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Spawns every placement and returns the player entity handle. A level
    /// without exactly one player spawn is malformed beyond recovery.
    fn create_entities_for_level(
        &self,
        store: &mut EntityStore,
        actors: &[ActorSpawn],
    ) -> EntityId {
        let mut player = None;
        for spawn in actors {
            let id = self.spawn_actor(store, spawn);
            if spawn.kind == ActorKind::Player {
                assert!(
                    player.is_none(),
                    "actor list contains more than one player spawn"
                );
                player = Some(id);
            }
        }
        player.unwrap_or_else(|| panic!("actor list contains no player spawn"))
    }

    fn spawn_actor(&self, store: &mut EntityStore, spawn: &ActorSpawn) -> EntityId {
        let id = store.spawn_at(spawn.position);
        let Some(entity) = store.find_entity_mut(id) else {
            unreachable!("entity exists immediately after spawn");
        };
        match spawn.kind {
            ActorKind::Player => {
                entity.bounding_box = Some(BoundingBox::new(
                    TileVec::new(0, 0),
                    TileExtents {
                        width: 2,
                        height: 2,
                    },
                ));
                entity.physical = Some(Physical::new(true));
                entity.player_controlled = Some(PlayerControlled::default());
                entity.sprite = Some(Sprite {
                    color: PLAYER_COLOR,
                });
            }
            ActorKind::LevelExit => {
                entity.trigger = Some(Trigger {
                    kind: TriggerKind::LevelExit,
                });
                entity.sprite = Some(Sprite {
                    color: EXIT_TRIGGER_COLOR,
                });
            }
            ActorKind::HealthPickup => self.configure_pickup(entity, PickupKind::Health),
            ActorKind::AmmoPickup => self.configure_pickup(entity, PickupKind::Ammo),
            ActorKind::ScoreGem => self.configure_pickup(entity, PickupKind::ScoreGem),
            ActorKind::AccessCard => self.configure_pickup(entity, PickupKind::AccessCard),
            ActorKind::SpecialBoots => self.configure_pickup(entity, PickupKind::SpecialBoots),
            ActorKind::PatrolEnemy => {
                entity.bounding_box = Some(BoundingBox::new(
                    TileVec::new(0, 0),
                    TileExtents {
                        width: 2,
                        height: 2,
                    },
                ));
                entity.physical = Some(Physical::new(true));
                entity.ai = Some(Ai {
                    kind: AiKind::Patrol {
                        dir: Orientation::Left,
                    },
                });
                entity.shootable = Some(Shootable {
                    health: self.patrol_enemy_health(),
                    score_value: PATROL_ENEMY_SCORE_VALUE,
                });
                entity.player_damaging = Some(PlayerDamaging {
                    amount: PATROL_ENEMY_CONTACT_DAMAGE,
                });
                entity.sprite = Some(Sprite {
                    color: PATROL_ENEMY_COLOR,
                });
            }
            ActorKind::WatcherCamera => {
                entity.bounding_box = Some(BoundingBox::new(
                    TileVec::new(0, 0),
                    TileExtents {
                        width: 1,
                        height: 1,
                    },
                ));
                entity.ai = Some(Ai {
                    kind: AiKind::Watcher {
                        facing: Orientation::Left,
                    },
                });
                entity.shootable = Some(Shootable {
                    health: WATCHER_CAMERA_HEALTH,
                    score_value: WATCHER_CAMERA_SCORE_VALUE,
                });
                entity.sprite = Some(Sprite {
                    color: WATCHER_CAMERA_COLOR,
                });
            }
            ActorKind::Elevator => {
                entity.bounding_box = Some(BoundingBox::new(
                    TileVec::new(0, 0),
                    TileExtents {
                        width: 3,
                        height: 1,
                    },
                ));
                entity.elevator = Some(Elevator::new(ELEVATOR_SPEED_TILES_PER_SECOND));
                entity.solid_body = true;
                entity.sprite = Some(Sprite {
                    color: ELEVATOR_COLOR,
                });
            }
        }
        id
    }

    fn configure_pickup(&self, entity: &mut Entity, kind: PickupKind) {
        entity.bounding_box = Some(BoundingBox::new(
            TileVec::new(0, 0),
            TileExtents {
                width: 1,
                height: 1,
            },
        ));
        entity.pickup = Some(Pickup { kind });
        entity.sprite = Some(Sprite {
            color: PICKUP_COLOR,
        });
    }

    fn patrol_enemy_health(&self) -> i32 {
        match self.difficulty {
            Difficulty::Hard => PATROL_ENEMY_HEALTH + 1,
            _ => PATROL_ENEMY_HEALTH,
        }
    }

    fn spawn_projectile(
        &self,
        store: &mut EntityStore,
        position: TileVec,
        direction: ProjectileDirection,
    ) -> EntityId {
        let id = store.spawn_at(position);
        let Some(entity) = store.find_entity_mut(id) else {
            unreachable!("entity exists immediately after spawn");
        };
        entity.bounding_box = Some(BoundingBox::new(
            TileVec::new(0, 0),
            TileExtents {
                width: 1,
                height: 1,
            },
        ));
        let mut physical = Physical::new(false);
        physical.velocity = match direction {
            ProjectileDirection::Left => Vec2f {
                x: -PROJECTILE_SPEED_TILES_PER_SECOND,
                y: 0.0,
            },
            ProjectileDirection::Right => Vec2f {
                x: PROJECTILE_SPEED_TILES_PER_SECOND,
                y: 0.0,
            },
            ProjectileDirection::Up => Vec2f {
                x: 0.0,
                y: -PROJECTILE_SPEED_TILES_PER_SECOND,
            },
        };
        entity.physical = Some(physical);
        entity.damage_dealing = Some(DamageDealing {
            amount: PROJECTILE_DAMAGE,
        });
        entity.sprite = Some(Sprite {
            color: PROJECTILE_COLOR,
        });
        id
    }
}

/// The one entity-creation capability the attack system gets. It cannot
/// reach the rest of the factory through this.
struct ProjectileSpawner<'a> {
    factory: &'a EntityFactory,
    store: &'a mut EntityStore,
}

impl<'a> ProjectileSpawner<'a> {
    fn new(factory: &'a EntityFactory, store: &'a mut EntityStore) -> Self {
        Self { factory, store }
    }

    fn spawn(&mut self, position: TileVec, direction: ProjectileDirection) -> EntityId {
        self.factory.spawn_projectile(self.store, position, direction)
    }
}
