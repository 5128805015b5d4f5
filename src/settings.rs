//! User settings stored as settings.json in the app data directory

use crate::api::Endpoints;
use crate::constants::{API_URL_ENV, DEFAULT_API_BASE_URL};
use crate::types::ActiveView;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Server
    pub api_base_url: String,

    // Tab shown on startup
    pub last_view: ActiveView,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            last_view: ActiveView::Gallery,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Base URL after applying the environment override
    pub fn effective_base_url(&self, env_override: Option<String>) -> String {
        match env_override.filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                info!(url = %url, "Using API base URL from {}", API_URL_ENV);
                url
            }
            None => self.api_base_url.clone(),
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::from_base(&self.effective_base_url(std::env::var(API_URL_ENV).ok()))
    }
}
