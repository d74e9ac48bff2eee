use std::{collections::HashMap, fs};

use serde::Deserialize;

/// Public mock endpoint the original table fetched its seed data from.
const DEFAULT_SOURCE_URL: &str = "https://run.mocky.io/v3/c4f605a4-b8b5-4207-b976-ba7499ceffa0";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub source_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.into(),
        }
    }
}

/// Defaults, then `desktop.toml`, then environment variables; later
/// layers win.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("desktop.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("source_url") {
                settings.source_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SOURCE_URL") {
        settings.source_url = v;
    }
    if let Ok(v) = std::env::var("APP__SOURCE_URL") {
        settings.source_url = v;
    }

    settings
}
