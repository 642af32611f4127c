//! Support for library configuration options

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

/// Address of the task server when running on iOS (the simulator shares the host network).
/// Feel free to override it when initing this library.
pub static IOS_SERVER_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:3000".to_string())));

/// Address of the task server on every other platform (usually the LAN address of the development machine).
/// Feel free to override it when initing this library.
pub static DEFAULT_SERVER_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://192.168.1.106:3000".to_string())));

pub const SERVER_URL_VAR: &str = "AGENDA_SERVER_URL";
pub const LOCAL_STORE_VAR: &str = "AGENDA_LOCAL_STORE";
pub const DAYS_AHEAD_VAR: &str = "AGENDA_DAYS_AHEAD";

/// The platforms that use a different server address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Other
        }
    }
}

/// The base URL of the task server for a given platform
pub fn server_url(platform: Platform) -> String {
    match platform {
        Platform::Ios => IOS_SERVER_URL.lock().unwrap().clone(),
        Platform::Other => DEFAULT_SERVER_URL.lock().unwrap().clone(),
    }
}


/// Where tasks come from, and which list to show
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub server_url: String,
    /// When set, tasks are stored in this file instead of on a server
    pub local_store: Option<PathBuf>,
    pub days_ahead: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: server_url(Platform::current()),
            local_store: None,
            days_ahead: 0,
        }
    }
}

impl Settings {
    /// Default settings, overridden by `AGENDA_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup(SERVER_URL_VAR) {
            settings.server_url = url;
        }
        if let Some(path) = lookup(LOCAL_STORE_VAR) {
            if path.is_empty() == false {
                settings.local_store = Some(PathBuf::from(path));
            }
        }
        if let Some(days) = lookup(DAYS_AHEAD_VAR) {
            match days.parse() {
                Ok(days) => settings.days_ahead = days,
                Err(err) => log::warn!("Ignoring invalid {} {:?}: {}", DAYS_AHEAD_VAR, days, err),
            }
        }

        settings
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn per_platform_urls() {
        assert_eq!(server_url(Platform::Ios), "http://localhost:3000");
        assert_eq!(server_url(Platform::Other), "http://192.168.1.106:3000");
    }

    #[test]
    fn environment_overrides() {
        let mut env = HashMap::new();
        env.insert(SERVER_URL_VAR, "http://10.0.2.2:3000");
        env.insert(LOCAL_STORE_VAR, "/tmp/tasks.json");
        env.insert(DAYS_AHEAD_VAR, "7");

        let settings = Settings::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.server_url, "http://10.0.2.2:3000");
        assert_eq!(settings.local_store, Some(PathBuf::from("/tmp/tasks.json")));
        assert_eq!(settings.days_ahead, 7);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let mut env = HashMap::new();
        env.insert(DAYS_AHEAD_VAR, "a week");
        env.insert(LOCAL_STORE_VAR, "");

        let settings = Settings::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.days_ahead, 0);
        assert_eq!(settings.local_store, None);
        assert_eq!(settings.server_url, server_url(Platform::current()));
    }
}
