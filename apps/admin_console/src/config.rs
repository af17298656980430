use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use admin_core::DirectoryOptions;
use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "admin_console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Line-editor history; skipped when unset.
    pub history_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:50000".into(),
            request_timeout_secs: 30,
            connect_timeout_secs: 5,
            history_file: None,
        }
    }
}

impl Settings {
    pub fn directory_options(&self) -> DirectoryOptions {
        DirectoryOptions {
            service_url: self.service_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    service_url: Option<String>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    history_file: Option<PathBuf>,
}

/// Defaults, then the config file, then the environment.
///
/// An explicitly named config file must exist; the default one is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            apply_file(&mut settings, file_cfg);
        }
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.service_url {
        settings.service_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.connect_timeout_secs {
        settings.connect_timeout_secs = v;
    }
    if let Some(v) = file_cfg.history_file {
        settings.history_file = Some(v);
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = var("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
    if let Some(v) = var("APP__CONNECT_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.connect_timeout_secs = parsed;
        }
    }
    if let Some(v) = var("APP__HISTORY_FILE") {
        settings.history_file = Some(PathBuf::from(v));
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_config(contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("admin_console_test_{suffix}.toml"));
        fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn file_values_override_defaults() {
        let path = temp_config(
            "service_url = \"http://facade:9000\"\nrequest_timeout_secs = 3\nhistory_file = \"/tmp/admin_history\"\n",
        );

        let mut settings = Settings::default();
        let raw = fs::read_to_string(&path).expect("read");
        apply_file(&mut settings, toml::from_str(&raw).expect("toml"));

        assert_eq!(settings.service_url, "http://facade:9000");
        assert_eq!(settings.request_timeout_secs, 3);
        assert_eq!(settings.connect_timeout_secs, 5);
        assert_eq!(
            settings.history_file.as_deref(),
            Some(Path::new("/tmp/admin_history"))
        );
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn prefixed_env_wins_over_plain_env() {
        let vars: HashMap<&str, &str> = [
            ("SERVICE_URL", "http://plain:1"),
            ("APP__SERVICE_URL", "http://prefixed:2"),
            ("APP__CONNECT_TIMEOUT_SECS", "not-a-number"),
            ("APP__REQUEST_TIMEOUT_SECS", "9"),
            ("APP__HISTORY_FILE", "/var/tmp/history"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.service_url, "http://prefixed:2");
        assert_eq!(settings.request_timeout_secs, 9);
        assert_eq!(settings.connect_timeout_secs, 5);
        assert_eq!(settings.history_file, Some(PathBuf::from("/var/tmp/history")));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let missing = env::temp_dir().join("admin_console_definitely_missing.toml");
        let err = load_settings(Some(&missing)).expect_err("must fail");
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = temp_config("service_url = [");
        let err = load_settings(Some(&path)).expect_err("must fail");
        assert!(err.to_string().contains("failed to parse config file"));
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn directory_options_carry_timeouts() {
        let options = Settings {
            request_timeout_secs: 12,
            ..Settings::default()
        }
        .directory_options();
        assert_eq!(options.request_timeout, Duration::from_secs(12));
        assert_eq!(options.connect_timeout, Duration::from_secs(5));
    }
}
