/// Owns one level's full lifetime: load, per-frame simulation, completion
/// and death detection, restart. Systems borrow the shared state through a
/// per-tick [`SimulationContext`] and never outlive this owner.
pub(crate) struct IngameMode {
    level: LevelState,
    map_at_level_start: Map,
    player_model: PlayerModel,
    player_model_at_level_start: PlayerModel,
    store: EntityStore,
    factory: EntityFactory,
    host: SimulationHost,
    player: EntityId,
    input_state: InputState,
    phase: LevelPhase,
    show_debug_text: bool,
    camera: TileVec,
    viewport: RenderSurface,
    backdrop: Option<RenderSurface>,
    scroll_mode: BackdropScrollMode,
    difficulty: Difficulty,
}

impl IngameMode {
    pub(crate) fn load(
        episode: i32,
        level_number: i32,
        difficulty: Difficulty,
        player_model: PlayerModel,
        player_position_override: Option<TileVec>,
        resources: &ResourceLoader,
        services: &mut dyn ServiceProvider,
    ) -> Result<Self, LevelLoadError> {
        show_loading_screen(episode, services);

        let before = Instant::now();
        let file_name = level_file_name(episode, level_number);
        let loaded = resources.load_level(&file_name, difficulty)?;
        let backdrop = match loaded.backdrop.as_deref() {
            Some(name) => Some(resources.load_fullscreen_image(name)?),
            None => None,
        };
        let mode = Self::from_level_data(
            loaded,
            backdrop,
            difficulty,
            player_model,
            player_position_override,
            services,
        );
        info!(
            file = %file_name,
            load_time_ms = before.elapsed().as_secs_f64() * 1000.0,
            "level_loaded"
        );
        Ok(mode)
    }

    fn from_level_data(
        loaded: LevelData,
        backdrop: Option<RenderSurface>,
        difficulty: Difficulty,
        player_model: PlayerModel,
        player_position_override: Option<TileVec>,
        services: &mut dyn ServiceProvider,
    ) -> Self {
        let factory = EntityFactory::new(difficulty);
        let mut store = EntityStore::default();
        let player = factory.create_entities_for_level(&mut store, &loaded.actors);
        if let Some(position) = player_position_override {
            player_mut(&mut store, player).position = position;
        }

        let map_at_level_start = loaded.map.clone();
        services.play_music(&loaded.music_file);

        Self {
            level: LevelState {
                map: loaded.map,
                tile_attributes: loaded.tile_attributes,
                initial_actors: loaded.actors,
            },
            map_at_level_start,
            player_model_at_level_start: player_model.clone(),
            player_model,
            store,
            factory,
            host: SimulationHost::new(),
            player,
            input_state: InputState::default(),
            phase: LevelPhase::Playing,
            show_debug_text: false,
            camera: TileVec::default(),
            viewport: RenderSurface::new(
                tiles_to_px(IN_GAME_VIEWPORT_WIDTH_TILES) as u32,
                tiles_to_px(IN_GAME_VIEWPORT_HEIGHT_TILES) as u32,
            ),
            backdrop,
            scroll_mode: loaded.scroll_mode,
            difficulty,
        }
    }

    pub(crate) fn level_finished(&self) -> bool {
        self.phase == LevelPhase::Finished
    }

    /// One ordered pipeline pass into the off-screen viewport, then the
    /// composite onto the output frame at the fixed offset.
    fn run_simulation_tick(
        &mut self,
        dt: TimeDelta,
        frame: &mut RenderSurface,
        services: &mut dyn ServiceProvider,
    ) {
        self.host.set_input_state(self.input_state);
        let mut context = SimulationContext {
            dt,
            map: &mut self.level.map,
            tile_attributes: &self.level.tile_attributes,
            player_model: &mut self.player_model,
            player: self.player,
            store: &mut self.store,
            factory: &self.factory,
            camera: &mut self.camera,
            viewport: &mut self.viewport,
            backdrop: self.backdrop.as_ref(),
            scroll_mode: self.scroll_mode,
            difficulty: self.difficulty,
        };
        self.host.run_frame(&mut context);

        frame.blit(
            &self.viewport,
            IN_GAME_VIEWPORT_OFFSET_PX.0,
            IN_GAME_VIEWPORT_OFFSET_PX.1,
        );
        if self.show_debug_text {
            services.show_debug_text(&self.debug_text());
        }
    }

    fn check_for_level_exit_reached(&mut self) {
        if self.level_finished() {
            return;
        }
        let player_box = expect_player_rect(player_ref(&self.store, self.player));

        // TODO: also require the trigger to be visible on screen before
        // accepting the touch.
        let reached = self.store.entities().iter().any(|entity| {
            let Some(trigger) = entity.trigger else {
                return false;
            };
            if trigger.kind != TriggerKind::LevelExit {
                return false;
            }
            let player_above_or_at_trigger_height = player_box.bottom <= entity.position.y;
            let touching_trigger_on_x_axis = entity.position.x >= player_box.left
                && entity.position.x <= player_box.right + 1;
            player_above_or_at_trigger_height && touching_trigger_on_x_axis
        });
        if reached {
            self.phase.transition(LevelPhase::Finished);
        }
    }

    /// The state transition alone is not enough: the numeric health must
    /// agree, guarding against desync between animation-driven state and the
    /// player model.
    fn check_for_player_death(
        &mut self,
        frame: &mut RenderSurface,
        services: &mut dyn ServiceProvider,
    ) {
        let control = player_ref(&self.store, self.player)
            .player_controlled
            .unwrap_or_else(|| panic!("player entity lacks a control-state component"));

        let player_dead = control.state == PlayerState::Dead && self.player_model.health <= 0;
        if player_dead {
            self.restart_level(frame, services);
        }
    }

    fn restart_level(&mut self, frame: &mut RenderSurface, services: &mut dyn ServiceProvider) {
        services.fade_out_screen();
        self.phase.transition(LevelPhase::Restarting);

        self.level.map = self.map_at_level_start.clone();
        self.store.reset();
        self.player = self
            .factory
            .create_entities_for_level(&mut self.store, &self.level.initial_actors);
        self.player_model = self.player_model_at_level_start.clone();

        // One zero-delta tick so derived state (camera, ground flags) agrees
        // with the respawned world before the next real frame.
        self.run_simulation_tick(0.0, frame, services);
        self.phase.transition(LevelPhase::Playing);

        services.fade_in_screen();
        info!("level_restarted");
    }

    fn debug_text(&self) -> String {
        let player = player_ref(&self.store, self.player);
        let velocity = player
            .physical
            .map(|physical| physical.velocity)
            .unwrap_or_default();
        format!(
            "Scroll: {}\nPlayer: {}, Vel.: {}",
            format_tile_vec(self.camera),
            format_tile_vec(player.position),
            format_vec2f(velocity)
        )
    }
}
