use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;

pub(crate) enum LogTarget {
    Stderr,
    /// The TUI owns the terminal, so it logs to a file.
    File(PathBuf),
}

/// Installs the global logger. `RUST_LOG` overrides `default_level`.
pub(crate) fn init(target: LogTarget, default_level: &str) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.format_timestamp_secs();

    match target {
        LogTarget::Stderr => {
            builder.target(env_logger::Target::Stderr);
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }

    builder.try_init().context("Failed to initialise logging")?;
    Ok(())
}
