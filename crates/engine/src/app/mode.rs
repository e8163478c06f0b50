use super::input::InputEvent;
use super::rendering::RenderSurface;

/// Frame delta in seconds.
pub type TimeDelta = f32;

/// Synchronous, fire-and-forget platform requests. No acknowledgment or
/// result is ever awaited by callers.
pub trait ServiceProvider {
    fn play_music(&mut self, track: &str);
    fn fade_out_screen(&mut self);
    fn fade_in_screen(&mut self);
    fn show_loading_screen(&mut self, file_name: &str);
    fn show_debug_text(&mut self, text: &str);
}

/// One game mode driven by the main loop: receives raw input events and
/// advances/draws once per tick.
pub trait Mode {
    fn handle_event(&mut self, event: &InputEvent);
    fn update_and_render(
        &mut self,
        dt: TimeDelta,
        frame: &mut RenderSurface,
        services: &mut dyn ServiceProvider,
    );
    fn finished(&self) -> bool {
        false
    }
}
