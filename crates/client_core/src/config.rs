use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "map_maker.toml";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub aspect_ratio: String,
    /// Unset means wait for the remote call indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.into(),
            request_timeout_secs: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// The API key, if one is set and not blank.
    pub fn configured_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn generate_content_url(&self) -> anyhow::Result<Url> {
        let base = Url::parse(self.api_base_url.trim())
            .with_context(|| format!("invalid api_base_url '{}'", self.api_base_url))?;
        if self.model.trim().is_empty() {
            bail!("model name must not be empty");
        }
        let path = format!("v1beta/models/{}:generateContent", self.model.trim());
        let base = if base.path().ends_with('/') {
            base
        } else {
            let mut with_slash = base.clone();
            with_slash.set_path(&format!("{}/", base.path()));
            with_slash
        };
        base.join(&path)
            .with_context(|| format!("failed to build request url from '{}'", self.api_base_url))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.generate_content_url()?;
        if self.aspect_ratio.trim().is_empty() {
            bail!("aspect_ratio must not be empty");
        }
        Ok(())
    }
}

/// Reads `map_maker.toml` from the working directory when present, then
/// applies environment overrides. A malformed file is logged and ignored.
pub fn load_settings() -> Settings {
    let mut settings = match read_settings_file(Path::new(SETTINGS_FILE)) {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(err) => {
            warn!("ignoring {SETTINGS_FILE}: {err:#}");
            Settings::default()
        }
    };
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

/// Like [`load_settings`] but the file must exist and parse.
pub fn load_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = read_settings_file(path)?
        .with_context(|| format!("settings file '{}' not found", path.display()))?;
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<Settings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let settings = toml::from_str::<Settings>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(Some(settings))
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    // Later names win.
    for name in ["API_KEY", "GEMINI_API_KEY", "APP__API_KEY"] {
        if let Some(v) = read(name) {
            settings.api_key = Some(v);
        }
    }

    if let Some(v) = read("APP__MODEL") {
        settings.model = v;
    }
    if let Some(v) = read("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = read("APP__ASPECT_RATIO") {
        settings.aspect_ratio = v;
    }
    if let Some(v) = read("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v}: not a number"),
        }
    }
    if let Some(v) = read("APP__OUTPUT_DIR") {
        settings.output_dir = PathBuf::from(v);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
