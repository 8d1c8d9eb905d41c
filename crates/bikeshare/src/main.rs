mod bootstrap;

use anyhow::{Context, Result};
use bikeshare_core::settings::Settings;
use bikeshare_runtime::session::Session;
use bikeshare_ui::console::Console;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, page size: {}",
        settings.data_dir.display(),
        settings.page_size
    );

    if let Err(err) = run(&settings) {
        tracing::error!("{:#}", err);
        return Err(err);
    }
    Ok(())
}

fn run(settings: &Settings) -> Result<()> {
    bootstrap::check_data_dir(&settings.data_dir)?;

    let session = Session::new(&settings.data_dir).with_page_size(settings.page_size());
    let mut console = Console::stdio();
    let summary = session
        .run(&mut console)
        .context("Failed to explore bikeshare data")?;

    tracing::info!(
        "Completed {} cycle(s){}",
        summary.cycles,
        if summary.input_closed { " before input closed" } else { "" }
    );
    Ok(())
}
