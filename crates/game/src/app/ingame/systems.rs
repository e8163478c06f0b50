#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SystemId {
    Elevator,
    PlayerMovement,
    PlayerAttack,
    PlayerInteraction,
    Ai,
    Physics,
    PlayerDamage,
    DamageInfliction,
    PlayerAnimation,
    MapScroll,
    Rendering,
    DebugOverlay,
}

/// The per-frame execution order. Later systems assume earlier systems'
/// writes are already visible this frame (damage infliction sees resolved
/// positions, rendering sees the scrolled camera). Reordering is a breaking
/// change to gameplay timing.
const SIMULATION_SYSTEM_ORDER: [SystemId; 12] = [
    SystemId::Elevator,
    SystemId::PlayerMovement,
    SystemId::PlayerAttack,
    SystemId::PlayerInteraction,
    SystemId::Ai,
    SystemId::Physics,
    SystemId::PlayerDamage,
    SystemId::DamageInfliction,
    SystemId::PlayerAnimation,
    SystemId::MapScroll,
    SystemId::Rendering,
    SystemId::DebugOverlay,
];

/// Borrowed view of the orchestrator-owned shared state, rebuilt each tick.
/// Systems never own any of this.
struct SimulationContext<'a> {
    dt: TimeDelta,
    map: &'a mut Map,
    tile_attributes: &'a TileAttributes,
    player_model: &'a mut PlayerModel,
    player: EntityId,
    store: &'a mut EntityStore,
    factory: &'a EntityFactory,
    camera: &'a mut TileVec,
    viewport: &'a mut RenderSurface,
    backdrop: Option<&'a RenderSurface>,
    scroll_mode: BackdropScrollMode,
    difficulty: Difficulty,
}

/// Runs the fixed pipeline and owns the per-system persistent state
/// (cooldowns, timers, overlay toggles) that survives across ticks.
struct SimulationHost {
    input: InputState,
    attack_cooldown: f32,
    mercy_timer: f32,
    death_animation_timer: f32,
    animation_clock: f32,
    show_bounding_boxes: bool,
    show_world_collision_data: bool,
    show_grid: bool,
}

impl SimulationHost {
    fn new() -> Self {
        Self {
            input: InputState::default(),
            attack_cooldown: 0.0,
            mercy_timer: 0.0,
            death_animation_timer: 0.0,
            animation_clock: 0.0,
            show_bounding_boxes: false,
            show_world_collision_data: false,
            show_grid: false,
        }
    }

    fn set_input_state(&mut self, input: InputState) {
        self.input = input;
    }

    fn toggle_bounding_box_display(&mut self) {
        self.show_bounding_boxes = !self.show_bounding_boxes;
    }

    fn toggle_world_collision_data_display(&mut self) {
        self.show_world_collision_data = !self.show_world_collision_data;
    }

    fn toggle_grid_display(&mut self) {
        self.show_grid = !self.show_grid;
    }

    fn run_frame(&mut self, ctx: &mut SimulationContext<'_>) {
        for system in SIMULATION_SYSTEM_ORDER {
            self.run_system(system, ctx);
        }
    }

    fn run_system(&mut self, system: SystemId, ctx: &mut SimulationContext<'_>) {
        match system {
            SystemId::Elevator => self.update_elevator(ctx),
            SystemId::PlayerMovement => self.update_player_movement(ctx),
            SystemId::PlayerAttack => self.update_player_attack(ctx),
            SystemId::PlayerInteraction => self.update_player_interaction(ctx),
            SystemId::Ai => self.update_ai(ctx),
            SystemId::Physics => self.update_physics(ctx),
            SystemId::PlayerDamage => self.update_player_damage(ctx),
            SystemId::DamageInfliction => self.update_damage_infliction(ctx),
            SystemId::PlayerAnimation => self.update_player_animation(ctx),
            SystemId::MapScroll => self.update_map_scroll(ctx),
            SystemId::Rendering => self.update_rendering(ctx),
            SystemId::DebugOverlay => self.update_debug_overlay(ctx),
        }
    }

    /// While the player stands on an elevator platform, up/down moves the
    /// platform and the rider together.
    fn update_elevator(&mut self, ctx: &mut SimulationContext<'_>) {
        if !self.input.moving_up && !self.input.moving_down {
            return;
        }
        let player_rect = expect_player_rect(player_ref(ctx.store, ctx.player));

        let mut ridden = None;
        for entity in ctx.store.entities() {
            if entity.elevator.is_none() {
                continue;
            }
            let Some(rect) = entity.world_rect() else {
                continue;
            };
            let standing = player_rect.bottom + 1 == rect.top
                && player_rect.right >= rect.left
                && player_rect.left <= rect.right;
            if standing {
                ridden = Some(entity.id);
                break;
            }
        }
        let Some(elevator_id) = ridden else {
            return;
        };

        let direction = if self.input.moving_up { -1.0 } else { 1.0 };
        let steps = {
            let Some(entity) = ctx.store.find_entity_mut(elevator_id) else {
                return;
            };
            let Some(elevator) = entity.elevator.as_mut() else {
                return;
            };
            let desired = direction * elevator.speed * ctx.dt + elevator.move_remainder;
            let steps = desired.trunc() as i32;
            elevator.move_remainder = desired.fract();
            entity.position.y += steps;
            steps
        };
        if steps != 0 {
            let player = player_mut(ctx.store, ctx.player);
            player.position.y += steps;
            if let Some(physical) = player.physical.as_mut() {
                physical.velocity.y = 0.0;
                physical.on_ground = true;
            }
        }
    }

    /// Input to movement intent: horizontal velocity, jump impulse, ladder
    /// climbing, orientation, and the pre-physics control state.
    fn update_player_movement(&mut self, ctx: &mut SimulationContext<'_>) {
        let input = self.input;
        let on_ladder_tile = {
            let player = player_ref(ctx.store, ctx.player);
            let rect = expect_player_rect(player);
            let mid_x = (rect.left + rect.right) / 2;
            (rect.top..=rect.bottom).any(|row| ctx.tile_attributes.is_ladder(mid_x, row))
        };

        let player = player_mut(ctx.store, ctx.player);
        let control = player
            .player_controlled
            .as_mut()
            .unwrap_or_else(|| panic!("player entity lacks a control-state component"));
        if matches!(control.state, PlayerState::Dieing | PlayerState::Dead) {
            if let Some(physical) = player.physical.as_mut() {
                physical.velocity.x = 0.0;
            }
            return;
        }
        let physical = player
            .physical
            .as_mut()
            .unwrap_or_else(|| panic!("player entity lacks a physical component"));

        let mut dx = 0.0;
        if input.moving_right {
            dx += 1.0;
        }
        if input.moving_left {
            dx -= 1.0;
        }
        physical.velocity.x = dx * WALK_SPEED_TILES_PER_SECOND;
        if dx > 0.0 {
            control.orientation = Orientation::Right;
        } else if dx < 0.0 {
            control.orientation = Orientation::Left;
        }

        if on_ladder_tile && (input.moving_up || input.moving_down) {
            control.state = PlayerState::ClimbingLadder;
            physical.velocity.y = if input.moving_up {
                -CLIMB_SPEED_TILES_PER_SECOND
            } else {
                CLIMB_SPEED_TILES_PER_SECOND
            };
            physical.on_ground = false;
        } else if physical.on_ground && input.jumping {
            physical.velocity.y = -JUMP_SPEED_TILES_PER_SECOND;
            physical.on_ground = false;
            control.state = PlayerState::Jumping;
        } else if physical.on_ground {
            control.state = if dx != 0.0 {
                PlayerState::Walking
            } else {
                PlayerState::Standing
            };
        } else {
            control.state = if physical.velocity.y < 0.0 {
                PlayerState::Jumping
            } else {
                PlayerState::Falling
            };
        }
    }

    /// Cooldown-gated shot: spends ammo from the player model and creates the
    /// projectile through the injected spawner capability.
    fn update_player_attack(&mut self, ctx: &mut SimulationContext<'_>) {
        self.attack_cooldown = (self.attack_cooldown - ctx.dt).max(0.0);
        if !self.input.shooting || self.attack_cooldown > 0.0 {
            return;
        }
        if ctx.player_model.ammo == 0 {
            return;
        }

        let (muzzle, direction) = {
            let player = player_ref(ctx.store, ctx.player);
            let control = player
                .player_controlled
                .unwrap_or_else(|| panic!("player entity lacks a control-state component"));
            if matches!(control.state, PlayerState::Dieing | PlayerState::Dead) {
                return;
            }
            let rect = expect_player_rect(player);
            if self.input.moving_up {
                (
                    TileVec::new((rect.left + rect.right) / 2, rect.top - 1),
                    ProjectileDirection::Up,
                )
            } else {
                match control.orientation {
                    Orientation::Right => (
                        TileVec::new(rect.right + 1, (rect.top + rect.bottom) / 2),
                        ProjectileDirection::Right,
                    ),
                    Orientation::Left => (
                        TileVec::new(rect.left - 1, (rect.top + rect.bottom) / 2),
                        ProjectileDirection::Left,
                    ),
                }
            }
        };

        ctx.player_model.ammo -= 1;
        let mut spawner = ProjectileSpawner::new(ctx.factory, ctx.store);
        spawner.spawn(muzzle, direction);
        self.attack_cooldown = ATTACK_COOLDOWN_SECONDS;
    }

    /// Pickups touching the player apply to the player model and despawn.
    fn update_player_interaction(&mut self, ctx: &mut SimulationContext<'_>) {
        let player = player_ref(ctx.store, ctx.player);
        let state = player
            .player_controlled
            .unwrap_or_else(|| panic!("player entity lacks a control-state component"))
            .state;
        if matches!(state, PlayerState::Dieing | PlayerState::Dead) {
            return;
        }
        let player_rect = expect_player_rect(player);

        let mut collected = Vec::new();
        for entity in ctx.store.entities() {
            let Some(pickup) = entity.pickup else {
                continue;
            };
            let Some(rect) = entity.world_rect() else {
                continue;
            };
            if rect.overlaps(&player_rect) {
                collected.push((entity.id, pickup.kind));
            }
        }
        for (id, kind) in collected {
            match kind {
                PickupKind::Health => ctx.player_model.add_health(HEALTH_PICKUP_AMOUNT),
                PickupKind::Ammo => ctx.player_model.add_ammo(AMMO_PICKUP_AMOUNT),
                PickupKind::ScoreGem => ctx.player_model.add_score(SCORE_GEM_VALUE),
                PickupKind::AccessCard => ctx.player_model.has_access_card = true,
                PickupKind::SpecialBoots => ctx.player_model.has_special_boots = true,
            }
            ctx.store.despawn(id);
        }
    }

    /// Patrol enemies walk and turn at walls and ledges; watcher cameras
    /// track which side the player is on.
    fn update_ai(&mut self, ctx: &mut SimulationContext<'_>) {
        let player_x = player_ref(ctx.store, ctx.player).position.x;

        for entity in ctx.store.entities_mut() {
            let position = entity.position;
            let bounding_box = entity.bounding_box;
            let Some(ai) = entity.ai.as_mut() else {
                continue;
            };
            match &mut ai.kind {
                AiKind::Watcher { facing } => {
                    *facing = if player_x < position.x {
                        Orientation::Left
                    } else {
                        Orientation::Right
                    };
                }
                AiKind::Patrol { dir } => {
                    let Some(rect) = bounding_box.map(|bbox| bbox.world_space(position)) else {
                        continue;
                    };
                    let (ahead_col, facing_edge) = match *dir {
                        Orientation::Right => (rect.right + 1, Edge::Left),
                        Orientation::Left => (rect.left - 1, Edge::Right),
                    };
                    let wall_ahead = (rect.top..=rect.bottom).any(|row| {
                        ctx.map.collision_data(ahead_col, row).is_solid_on(facing_edge)
                    });
                    let floor_ahead = ctx
                        .map
                        .collision_data(ahead_col, rect.bottom + 1)
                        .is_solid_on(Edge::Top);
                    if wall_ahead || !floor_ahead {
                        *dir = opposite(*dir);
                    }
                    let speed = match *dir {
                        Orientation::Right => PATROL_SPEED_TILES_PER_SECOND,
                        Orientation::Left => -PATROL_SPEED_TILES_PER_SECOND,
                    };
                    if let Some(physical) = entity.physical.as_mut() {
                        physical.velocity.x = speed;
                    }
                }
            }
        }
    }

    /// Integrates velocity against per-edge map solidity, one tile at a
    /// time, with sub-tile remainders. Gravity applies to airborne entities;
    /// solid-body entities (elevators) count as ground support.
    fn update_physics(&mut self, ctx: &mut SimulationContext<'_>) {
        let dt = ctx.dt;
        let solid_rects: Vec<(EntityId, WorldRect)> = ctx
            .store
            .entities()
            .iter()
            .filter(|entity| entity.solid_body)
            .filter_map(|entity| entity.world_rect().map(|rect| (entity.id, rect)))
            .collect();

        for entity in ctx.store.entities_mut() {
            let id = entity.id;
            let Some(bbox) = entity.bounding_box else {
                continue;
            };
            let Some(physical) = entity.physical.as_mut() else {
                continue;
            };

            if physical.gravity_affected && !physical.on_ground {
                physical.velocity.y = (physical.velocity.y
                    + GRAVITY_TILES_PER_SECOND_SQUARED * dt)
                    .min(MAX_FALL_SPEED_TILES_PER_SECOND);
            }

            let desired_x = physical.velocity.x * dt + physical.move_remainder.x;
            let desired_y = physical.velocity.y * dt + physical.move_remainder.y;
            let steps_x = desired_x.trunc() as i32;
            let steps_y = desired_y.trunc() as i32;
            physical.move_remainder.x = desired_x.fract();
            physical.move_remainder.y = desired_y.fract();

            let dir_x = steps_x.signum();
            for _ in 0..steps_x.abs() {
                let rect = bbox.world_space(entity.position);
                let (ahead_col, edge) = if dir_x > 0 {
                    (rect.right + 1, Edge::Left)
                } else {
                    (rect.left - 1, Edge::Right)
                };
                let blocked = (rect.top..=rect.bottom)
                    .any(|row| ctx.map.collision_data(ahead_col, row).is_solid_on(edge));
                if blocked {
                    physical.move_remainder.x = 0.0;
                    if physical.gravity_affected {
                        physical.velocity.x = 0.0;
                    }
                    break;
                }
                entity.position.x += dir_x;
            }

            let dir_y = steps_y.signum();
            for _ in 0..steps_y.abs() {
                let rect = bbox.world_space(entity.position);
                let (ahead_row, edge) = if dir_y > 0 {
                    (rect.bottom + 1, Edge::Top)
                } else {
                    (rect.top - 1, Edge::Bottom)
                };
                let map_blocked = (rect.left..=rect.right)
                    .any(|col| ctx.map.collision_data(col, ahead_row).is_solid_on(edge));
                let solid_blocked = dir_y > 0
                    && solid_rects.iter().any(|(solid_id, solid)| {
                        *solid_id != id
                            && solid.top == ahead_row
                            && rect.right >= solid.left
                            && rect.left <= solid.right
                    });
                if map_blocked || solid_blocked {
                    physical.move_remainder.y = 0.0;
                    if dir_y > 0 {
                        physical.on_ground = true;
                    }
                    if physical.gravity_affected {
                        physical.velocity.y = 0.0;
                    }
                    break;
                }
                entity.position.y += dir_y;
            }

            if physical.gravity_affected {
                let rect = bbox.world_space(entity.position);
                let supported_by_map = (rect.left..=rect.right)
                    .any(|col| ctx.map.collision_data(col, rect.bottom + 1).is_solid_on(Edge::Top));
                let supported_by_solid = solid_rects.iter().any(|(solid_id, solid)| {
                    *solid_id != id
                        && solid.top == rect.bottom + 1
                        && rect.right >= solid.left
                        && rect.left <= solid.right
                });
                physical.on_ground = supported_by_map || supported_by_solid;
            }
        }
    }

    /// Contact damage against the player, scaled by difficulty, gated by
    /// mercy frames. Reaching zero health starts the death animation; the
    /// `Dead` state itself is set by the animation system later.
    fn update_player_damage(&mut self, ctx: &mut SimulationContext<'_>) {
        self.mercy_timer = (self.mercy_timer - ctx.dt).max(0.0);

        let (player_rect, state) = {
            let player = player_ref(ctx.store, ctx.player);
            let control = player
                .player_controlled
                .unwrap_or_else(|| panic!("player entity lacks a control-state component"));
            (expect_player_rect(player), control.state)
        };
        if matches!(state, PlayerState::Dieing | PlayerState::Dead) {
            return;
        }
        if self.mercy_timer > 0.0 {
            return;
        }

        let contact = ctx.store.entities().iter().find_map(|entity| {
            let damaging = entity.player_damaging?;
            let rect = entity.world_rect()?;
            rect.overlaps(&player_rect).then_some(damaging.amount)
        });
        let Some(amount) = contact else {
            return;
        };

        let scaled = match ctx.difficulty {
            Difficulty::Hard => amount * 2,
            _ => amount,
        };
        ctx.player_model.health = (ctx.player_model.health - scaled).max(0);
        self.mercy_timer = CONTACT_DAMAGE_MERCY_SECONDS;

        if ctx.player_model.health == 0 {
            let player = player_mut(ctx.store, ctx.player);
            if let Some(control) = player.player_controlled.as_mut() {
                control.state = PlayerState::Dieing;
            }
            if let Some(physical) = player.physical.as_mut() {
                physical.velocity = Vec2f::default();
            }
            self.death_animation_timer = DEATH_ANIMATION_SECONDS;
        }
    }

    /// Projectiles against shootable entities and against the map. Runs
    /// after physics so impacts use resolved positions, and sees projectiles
    /// spawned by the attack system earlier this same frame.
    fn update_damage_infliction(&mut self, ctx: &mut SimulationContext<'_>) {
        struct Shot {
            id: EntityId,
            rect: WorldRect,
            velocity: Vec2f,
            amount: i32,
        }

        let shots: Vec<Shot> = ctx
            .store
            .entities()
            .iter()
            .filter_map(|entity| {
                let damage = entity.damage_dealing?;
                let rect = entity.world_rect()?;
                let velocity = entity.physical.map(|physical| physical.velocity).unwrap_or_default();
                Some(Shot {
                    id: entity.id,
                    rect,
                    velocity,
                    amount: damage.amount,
                })
            })
            .collect();

        for shot in shots {
            let mut spent = false;

            if let Some((col, row, edge)) = cell_ahead(&shot.rect, shot.velocity) {
                if ctx.map.collision_data(col, row).is_solid_on(edge) {
                    if ctx.tile_attributes.is_flammable(col, row) {
                        // Burns through destructible geometry and keeps going.
                        ctx.map.clear_tile(col, row);
                    } else {
                        spent = true;
                    }
                }
            }

            let hit = ctx.store.entities().iter().find_map(|entity| {
                let shootable = entity.shootable?;
                let rect = entity.world_rect()?;
                (entity.id != shot.id && rect.overlaps(&shot.rect)).then_some((entity.id, shootable))
            });
            if let Some((target_id, shootable)) = hit {
                let remaining = shootable.health - shot.amount;
                if remaining <= 0 {
                    ctx.player_model.add_score(shootable.score_value);
                    ctx.store.despawn(target_id);
                } else if let Some(target) = ctx.store.find_entity_mut(target_id) {
                    if let Some(shootable) = target.shootable.as_mut() {
                        shootable.health = remaining;
                    }
                }
                spent = true;
            }

            if spent {
                ctx.store.despawn(shot.id);
            }
        }
    }

    /// Advances the death animation to the terminal `Dead` state and keeps
    /// the shared animation clock running.
    fn update_player_animation(&mut self, ctx: &mut SimulationContext<'_>) {
        self.animation_clock += ctx.dt;

        let player = player_mut(ctx.store, ctx.player);
        let Some(control) = player.player_controlled.as_mut() else {
            panic!("player entity lacks a control-state component");
        };
        if control.state == PlayerState::Dieing {
            self.death_animation_timer = (self.death_animation_timer - ctx.dt).max(0.0);
            if self.death_animation_timer <= 0.0 {
                control.state = PlayerState::Dead;
            }
        }
    }

    /// Camera follows the player inside a dead zone, clamped to the map.
    fn update_map_scroll(&mut self, ctx: &mut SimulationContext<'_>) {
        let player_position = player_ref(ctx.store, ctx.player).position;
        let camera = &mut *ctx.camera;

        if player_position.x - camera.x < CAMERA_DEAD_ZONE_TILES {
            camera.x = player_position.x - CAMERA_DEAD_ZONE_TILES;
        }
        if player_position.x - camera.x > IN_GAME_VIEWPORT_WIDTH_TILES - CAMERA_DEAD_ZONE_TILES {
            camera.x = player_position.x - (IN_GAME_VIEWPORT_WIDTH_TILES - CAMERA_DEAD_ZONE_TILES);
        }
        if player_position.y - camera.y < CAMERA_DEAD_ZONE_TILES {
            camera.y = player_position.y - CAMERA_DEAD_ZONE_TILES;
        }
        if player_position.y - camera.y > IN_GAME_VIEWPORT_HEIGHT_TILES - CAMERA_DEAD_ZONE_TILES {
            camera.y =
                player_position.y - (IN_GAME_VIEWPORT_HEIGHT_TILES - CAMERA_DEAD_ZONE_TILES);
        }

        camera.x = camera
            .x
            .clamp(0, (ctx.map.width() as i32 - IN_GAME_VIEWPORT_WIDTH_TILES).max(0));
        camera.y = camera
            .y
            .clamp(0, (ctx.map.height() as i32 - IN_GAME_VIEWPORT_HEIGHT_TILES).max(0));
    }

    /// Backdrop, visible map tiles, and entity rects into the off-screen
    /// viewport surface.
    fn update_rendering(&mut self, ctx: &mut SimulationContext<'_>) {
        ctx.viewport.fill(BACKDROP_COLOR);

        if let Some(backdrop) = ctx.backdrop {
            let width = backdrop.width().max(1) as i32;
            let scroll_px = match ctx.scroll_mode {
                BackdropScrollMode::Fixed => 0,
                BackdropScrollMode::ParallaxHorizontal => {
                    (tiles_to_px(ctx.camera.x) / 2).rem_euclid(width)
                }
                BackdropScrollMode::AutoScroll => {
                    (self.animation_clock * BACKDROP_AUTO_SCROLL_PX_PER_SECOND) as i32 % width
                }
            };
            ctx.viewport.blit(backdrop, -scroll_px, 0);
            if scroll_px > 0 {
                ctx.viewport.blit(backdrop, width - scroll_px, 0);
            }
        }

        for y in 0..IN_GAME_VIEWPORT_HEIGHT_TILES {
            for x in 0..IN_GAME_VIEWPORT_WIDTH_TILES {
                let tile = ctx.map.tile_at(x + ctx.camera.x, y + ctx.camera.y);
                if tile == 0 {
                    continue;
                }
                ctx.viewport.fill_rect(
                    tiles_to_px(x),
                    tiles_to_px(y),
                    TILE_SIZE_PX,
                    TILE_SIZE_PX,
                    tile_color(tile),
                );
            }
        }

        for entity in ctx.store.entities() {
            let Some(sprite) = entity.sprite else {
                continue;
            };
            let size = entity
                .bounding_box
                .map(|bbox| bbox.size)
                .unwrap_or(TileExtents {
                    width: 1,
                    height: 1,
                });
            ctx.viewport.fill_rect(
                tiles_to_px(entity.position.x - ctx.camera.x),
                tiles_to_px(entity.position.y - ctx.camera.y),
                tiles_to_px(size.width),
                tiles_to_px(size.height),
                sprite.color,
            );
        }
    }

    /// Three independently toggled overlays: per-edge collision data plus
    /// attribute tints, entity bounding boxes, and the tile grid. Draws only;
    /// never mutates simulation state.
    fn update_debug_overlay(&mut self, ctx: &mut SimulationContext<'_>) {
        if self.show_world_collision_data {
            for y in 0..IN_GAME_VIEWPORT_HEIGHT_TILES {
                for x in 0..IN_GAME_VIEWPORT_WIDTH_TILES {
                    let col = x + ctx.camera.x;
                    let row = y + ctx.camera.y;
                    if !ctx.map.in_bounds(col, row) {
                        continue;
                    }
                    let collision = ctx.map.collision_data(col, row);
                    let left = tiles_to_px(x);
                    let top = tiles_to_px(y);
                    let right = tiles_to_px(x + 1);
                    let bottom = tiles_to_px(y + 1);

                    let edge_lines = [
                        (Edge::Top, (left, top, right, top)),
                        (Edge::Right, (right, top, right, bottom)),
                        (Edge::Bottom, (left, bottom, right, bottom)),
                        (Edge::Left, (left, top, left, bottom)),
                    ];
                    for (edge, (x1, y1, x2, y2)) in edge_lines {
                        if collision.is_solid_on(edge) {
                            ctx.viewport.draw_line(x1, y1, x2, y2, COLLISION_EDGE_COLOR);
                        }
                    }

                    if ctx.tile_attributes.is_climbable(col, row) {
                        ctx.viewport
                            .draw_rect_outline(left, top, TILE_SIZE_PX, TILE_SIZE_PX, CLIMBABLE_TINT_COLOR);
                    }
                    if ctx.tile_attributes.is_ladder(col, row) {
                        ctx.viewport
                            .draw_rect_outline(left, top, TILE_SIZE_PX, TILE_SIZE_PX, LADDER_TINT_COLOR);
                    }
                    if ctx.tile_attributes.is_flammable(col, row) {
                        ctx.viewport
                            .draw_rect_outline(left, top, TILE_SIZE_PX, TILE_SIZE_PX, FLAMMABLE_TINT_COLOR);
                    }
                }
            }
        }

        if self.show_bounding_boxes {
            for entity in ctx.store.entities() {
                let Some(rect) = entity.world_rect() else {
                    continue;
                };
                let color = if entity.player_damaging.is_some() {
                    BBOX_DAMAGING_COLOR
                } else if entity.solid_body {
                    BBOX_SOLID_COLOR
                } else {
                    BBOX_DEFAULT_COLOR
                };
                ctx.viewport.draw_rect_outline(
                    tiles_to_px(rect.left - ctx.camera.x),
                    tiles_to_px(rect.top - ctx.camera.y),
                    tiles_to_px(rect.right - rect.left + 1),
                    tiles_to_px(rect.bottom - rect.top + 1),
                    color,
                );
            }
        }

        if self.show_grid {
            let max_x = tiles_to_px(IN_GAME_VIEWPORT_WIDTH_TILES);
            let max_y = tiles_to_px(IN_GAME_VIEWPORT_HEIGHT_TILES);
            for y in 0..IN_GAME_VIEWPORT_HEIGHT_TILES {
                let py = tiles_to_px(y);
                ctx.viewport.draw_line(0, py, max_x, py, GRID_COLOR);
            }
            for x in 0..IN_GAME_VIEWPORT_WIDTH_TILES {
                let px = tiles_to_px(x);
                ctx.viewport.draw_line(px, 0, px, max_y, GRID_COLOR);
            }
        }
    }
}

/// The map cell a projectile is about to enter, with the edge it would hit.
fn cell_ahead(rect: &WorldRect, velocity: Vec2f) -> Option<(i32, i32, Edge)> {
    if velocity.x > 0.0 {
        Some((rect.right + 1, rect.top, Edge::Left))
    } else if velocity.x < 0.0 {
        Some((rect.left - 1, rect.top, Edge::Right))
    } else if velocity.y < 0.0 {
        Some((rect.left, rect.top - 1, Edge::Bottom))
    } else if velocity.y > 0.0 {
        Some((rect.left, rect.bottom + 1, Edge::Top))
    } else {
        None
    }
}
