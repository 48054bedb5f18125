use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::session::Session;
use crate::utils::normalize_url;

pub const API_URL_ENV: &str = "WPP_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// What survives between runs: the backend override and the session token.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppState {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("wpp-console.toml"))
    }

    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::new(),
        }
    }

    /// Missing or unreadable files yield the default state.
    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            return Self::new();
        };
        match toml::from_str::<AppState>(&text) {
            Ok(state) => state,
            Err(e) => {
                warn!("ignoring unreadable state file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        match Self::default_path() {
            Some(path) => self.save_to(&path),
            None => Err(std::io::Error::new(std::io::ErrorKind::NotFound, "No config dir")),
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        fs::write(path, toml)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    /// Environment first, then the persisted override, then localhost.
    pub fn resolve(env_url: Option<String>, state: &AppState) -> Self {
        let base_url = env_url
            .filter(|v| !v.trim().is_empty())
            .or_else(|| Some(state.base_url.clone()).filter(|v| !v.trim().is_empty()))
            .map(|v| normalize_url(&v))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { base_url }
    }

    pub fn from_env(state: &AppState) -> Self {
        Self::resolve(std::env::var(API_URL_ENV).ok(), state)
    }
}

/// Everything a page needs to talk to the backend, built from persisted state.
pub struct Console {
    pub state: AppState,
    pub config: Config,
    pub client: ApiClient,
}

impl Console {
    pub fn bootstrap() -> Self {
        let state = AppState::load();
        let config = Config::from_env(&state);
        let session = Session::with_token(state.token.clone());
        let client = ApiClient::new(&config.base_url, session);
        Self { state, config, client }
    }

    /// Writes the current session token back to the state file.
    pub fn persist_session(&mut self) -> std::io::Result<()> {
        self.state.token = self.client.session().token();
        self.state.save()
    }
}
