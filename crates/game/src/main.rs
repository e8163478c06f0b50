mod app;

use tracing::error;

fn main() {
    let wiring = app::bootstrap::build_app();
    if let Err(error) = engine::run_app(wiring.config, wiring.build_mode) {
        error!(error = %error, "startup_failed");
        std::process::exit(1);
    }
}
