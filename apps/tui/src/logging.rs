use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::Path;
use theft_dashboard::AppConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Logs go to the configured file when there is one. Without a file only
/// headless runs log (to stderr); the interactive dashboard owns the
/// terminal and stays silent.
///
/// The returned guard flushes the file writer on drop, so hold it until the
/// terminal has been restored.
pub fn init_tracing(config: &AppConfig, headless: bool) -> Result<Option<WorkerGuard>> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(path) = &config.log_file {
        let (writer, guard) = file_writer(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(writer)
            .try_init()
            .map_err(|e| eyre!("Failed to install log subscriber: {e}"))?;
        return Ok(Some(guard));
    }

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| eyre!("Failed to install log subscriber: {e}"))?;
    }

    Ok(None)
}

/// Non-blocking appender for a single, never-rotated log file.
fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("Log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_writer_flushes_on_guard_drop() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dashboard.log");

        let (mut writer, guard) = file_writer(&path)?;
        writer.write_all(b"load finished\n")?;
        drop(guard);

        assert_eq!(std::fs::read_to_string(&path)?, "load finished\n");
        Ok(())
    }

    #[test]
    fn directory_path_is_rejected() {
        assert!(file_writer(Path::new("/")).is_err());
    }
}
