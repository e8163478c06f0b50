/// Derives a level-data file name from episode and level indices. Pure and
/// total over the valid ranges; out-of-range indices are programming errors.
fn level_file_name(episode: i32, level: i32) -> String {
    assert!(
        (0..EPISODE_COUNT).contains(&episode),
        "episode index out of range: {episode}"
    );
    assert!(
        (0..LEVELS_PER_EPISODE).contains(&level),
        "level index out of range: {level}"
    );
    format!("{}{}.MNI", EPISODE_PREFIXES[episode as usize], level + 1)
}

fn loading_screen_file_name(episode: i32) -> String {
    assert!(
        (0..EPISODE_COUNT).contains(&episode),
        "episode index out of range: {episode}"
    );
    format!("LOAD{}.MNI", episode + 1)
}

/// The fade-bracketed loading sequence shown before level data is fetched.
fn show_loading_screen(episode: i32, services: &mut dyn ServiceProvider) {
    services.fade_out_screen();
    services.play_music(MENU_MUSIC_FILE);
    services.show_loading_screen(&loading_screen_file_name(episode));
    services.fade_in_screen();
}

fn player_ref(store: &EntityStore, player: EntityId) -> &Entity {
    store
        .find_entity(player)
        .unwrap_or_else(|| panic!("player entity {player:?} missing from store"))
}

fn player_mut(store: &mut EntityStore, player: EntityId) -> &mut Entity {
    store
        .find_entity_mut(player)
        .unwrap_or_else(|| panic!("player entity {player:?} missing from store"))
}

fn expect_player_rect(player: &Entity) -> WorldRect {
    player
        .world_rect()
        .unwrap_or_else(|| panic!("player entity lacks a bounding box"))
}

fn opposite(orientation: Orientation) -> Orientation {
    match orientation {
        Orientation::Left => Orientation::Right,
        Orientation::Right => Orientation::Left,
    }
}

fn tile_color(tile: u16) -> [u8; 4] {
    let seed = tile.wrapping_mul(0x9e37);
    [
        (96 + (seed & 0x3f)) as u8,
        (96 + ((seed >> 4) & 0x3f)) as u8,
        (96 + ((seed >> 8) & 0x3f)) as u8,
        255,
    ]
}

fn format_tile_vec(value: TileVec) -> String {
    format!("{:4}, {:4}", value.x, value.y)
}

fn format_vec2f(value: Vec2f) -> String {
    format!("{:5.2}, {:5.2}", value.x, value.y)
}
