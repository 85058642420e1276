use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{config_dir, Config};

const LOG_FILE: &str = "stratus.log";

/// `STRATUS_LOG` wins over the configured level, which wins over `info`.
pub fn filter_directive(config: &Config, env_override: Option<String>) -> String {
    env_override
        .filter(|directive| !directive.trim().is_empty())
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

pub fn log_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOG_FILE))
}

/// Logs go to a file because the terminal belongs to the UI. Logging is
/// optional, so any failure here leaves the app running without it.
pub fn init_logging(config: &Config) {
    let directive = filter_directive(config, std::env::var("STRATUS_LOG").ok());

    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    let initialized = tracing_subscriber::registry()
        .with(EnvFilter::new(directive))
        .with(layer)
        .try_init();

    if initialized.is_ok() {
        tracing::info!(path = %path.display(), "logging started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_falls_back_through_env_then_config() {
        let configured = Config {
            log_level: Some("debug".into()),
            ..Config::default()
        };

        assert_eq!(
            filter_directive(&configured, Some("stratus=trace".into())),
            "stratus=trace"
        );
        assert_eq!(filter_directive(&configured, Some("  ".into())), "debug");
        assert_eq!(filter_directive(&configured, None), "debug");
        assert_eq!(filter_directive(&Config::default(), None), "info");
    }
}
