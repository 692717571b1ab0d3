mod bootstrap;

use anyhow::Result;
use sgcor_core::settings::Settings;
use sgcor_runtime::session::SessionState;
use sgcor_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("SGCor Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let mut session = SessionState::new();
    if let Some(path) = settings.file.as_deref() {
        if let Err(err) = session.load_file(path) {
            // Exit before touching the terminal; a TUI over an empty report
            // would hide the reason the file did not load.
            eprintln!("Erro ao processar arquivo: {err}");
            std::process::exit(1);
        }
    } else {
        tracing::warn!("no input file given; starting with an empty dashboard");
    }

    let app = App::new(
        &settings.theme,
        ViewMode::from_name(&settings.view),
        session,
    );
    app.run()?;

    Ok(())
}
