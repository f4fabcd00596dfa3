//! # Logging
//!
//! Process-wide logger setup for the `stegsvc` binary. Library code only uses the
//! `log` macros; the binary picks the level and installs the formatter once.

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use std::str::FromStr;

/// Environment variable that overrides the configured level.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Pick the effective level: explicit flag, then `LOG_LEVEL`, then the config file.
///
/// Unparseable values fall through to the next source; `info` is the last resort.
pub fn resolve_level(flag: Option<&str>, env: Option<&str>, configured: &str) -> LevelFilter {
    [flag, env, Some(configured)]
        .into_iter()
        .flatten()
        .find_map(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[YYYY-MM-DD HH:MM:SS] [LEVEL] message`, written to stderr so that
/// `decode` output on stdout stays clean.
pub fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_env_and_config() {
        assert_eq!(
            resolve_level(Some("trace"), Some("warn"), "info"),
            LevelFilter::Trace
        );
    }

    #[test]
    fn test_env_wins_over_config() {
        assert_eq!(resolve_level(None, Some("DEBUG"), "info"), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_fall_through() {
        assert_eq!(resolve_level(Some("loud"), None, "error"), LevelFilter::Error);
        assert_eq!(resolve_level(None, None, "verbose"), LevelFilter::Info);
    }
}
