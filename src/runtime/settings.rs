use std::path::Path;

use crate::config;

pub fn load_settings(config_path: Option<&Path>) -> config::Settings {
    let loaded = match config_path {
        Some(path) => config::Settings::load_from(Some(path)),
        None => config::Settings::load(),
    };

    match loaded {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            tracing::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
