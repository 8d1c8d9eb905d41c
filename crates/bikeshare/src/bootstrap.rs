use std::path::Path;

use bikeshare_core::error::BikeshareError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a Python-style level name to an `EnvFilter` directive.
///
/// Unrecognised names are passed through lowercased so that raw directives
/// such as `bikeshare_data=debug` still work.
fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr so it never interleaves with the prompts on stdout.
/// Falls back to `"warn"` if the level string is not a valid directive.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

// ── Data-path check ────────────────────────────────────────────────────────────

/// Fail early when the configured data directory does not exist.
pub fn check_data_dir(data_dir: &Path) -> Result<(), BikeshareError> {
    if data_dir.is_dir() {
        Ok(())
    } else {
        Err(BikeshareError::DataPathNotFound(data_dir.to_path_buf()))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_directive_maps_python_names() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
    }

    #[test]
    fn test_level_directive_passes_through_raw_directives() {
        assert_eq!(level_directive("bikeshare_data=DEBUG"), "bikeshare_data=debug");
    }

    #[test]
    fn test_check_data_dir_existing() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(check_data_dir(tmp.path()).is_ok());
    }

    #[test]
    fn test_check_data_dir_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope");
        match check_data_dir(&missing) {
            Err(BikeshareError::DataPathNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected DataPathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_check_data_dir_rejects_plain_file() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("chicago.csv");
        std::fs::write(&file, "").expect("write");
        assert!(check_data_dir(&file).is_err());
    }
}
