impl Mode for IngameMode {
    fn handle_event(&mut self, event: &InputEvent) {
        self.input_state.set_key(event.key, event.pressed);

        // Debug toggles act on key-release only; key-repeat delivers
        // repeated presses and must not re-toggle them.
        if event.pressed {
            return;
        }
        match event.key {
            GameKey::DebugBoundingBoxes => self.host.toggle_bounding_box_display(),
            GameKey::DebugCollisionData => self.host.toggle_world_collision_data_display(),
            GameKey::DebugGrid => self.host.toggle_grid_display(),
            GameKey::DebugText => self.show_debug_text = !self.show_debug_text,
            _ => {}
        }
    }

    fn update_and_render(
        &mut self,
        dt: TimeDelta,
        frame: &mut RenderSurface,
        services: &mut dyn ServiceProvider,
    ) {
        if self.level_finished() {
            return;
        }

        self.run_simulation_tick(dt, frame, services);

        self.check_for_player_death(frame, services);
        self.check_for_level_exit_reached();
    }

    fn finished(&self) -> bool {
        self.level_finished()
    }
}
