use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter (`env_logger` syntax).
const LOG_ENV: &str = "TERMTRIS_LOG";
const DEFAULT_FILTER: &str = "info";

/// Sends log output to `path`. The terminal belongs to the TUI, so logging
/// never writes to stdout or stderr.
pub(crate) fn init(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    Builder::from_env(Env::default().filter_or(LOG_ENV, DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
