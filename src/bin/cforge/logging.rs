use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Maps the number of `-v` flags to a log specification.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Starts logging to stderr. `RUST_LOG` takes precedence over `-v`.
///
/// The returned handle must be kept alive for the rest of the process.
pub fn init(verbosity: u8) -> Result<LoggerHandle> {
    let spec = level_for(verbosity);
    Logger::try_with_env_or_str(spec)
        .with_context(|| format!("Invalid log specification '{spec}'"))?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .context("Failed to start logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(3), "trace");
        assert_eq!(level_for(9), "trace");
    }
}
