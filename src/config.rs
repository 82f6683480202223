use crate::events::Category;
use anyhow::Context;
use directories::BaseDirs;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "AGENT_CHORUS_HOME";

/// Well-known locations, all rooted in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub state_file: PathBuf,
    pub pause_marker: PathBuf,
    pub packs_dir: PathBuf,
}

impl Paths {
    pub fn discover() -> anyhow::Result<Self> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(root)));
        }
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(Self::at(base.config_dir().join("agent-chorus")))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join("config.json"),
            state_file: root.join("state.json"),
            pause_marker: root.join(".paused"),
            packs_dir: root.join("packs"),
            root,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub active_pack: String,
    pub volume: f32,
    pub enabled: bool,
    pub desktop_notifications: bool,
    pub categories: BTreeMap<Category, bool>,
    pub spam_threshold: usize,
    pub spam_window_seconds: f64,
    pub pack_rotation: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packs_dir: Option<PathBuf>,
}

/// A config together with everything that had to fall back to a default.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub config: Config,
    pub issues: Vec<String>,
}

impl Config {
    /// Never fails: unreadable or malformed input degrades to defaults.
    pub fn load(paths: &Paths) -> Self {
        let report = Self::load_report(&paths.config_file);
        for issue in &report.issues {
            tracing::warn!(path = %paths.config_file.display(), "{issue}");
        }
        report.config
    }

    pub fn load_report(path: &Path) -> LoadReport {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return LoadReport {
                    config: Self::default(),
                    issues: Vec::new(),
                }
            }
            Err(err) => {
                return LoadReport {
                    config: Self::default(),
                    issues: vec![format!("read config failed ({err}); using defaults")],
                }
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Self::from_value(&value),
            Err(err) => LoadReport {
                config: Self::default(),
                issues: vec![format!("parse config failed ({err}); using defaults")],
            },
        }
    }

    pub fn from_value(value: &Value) -> LoadReport {
        let mut config = Self::default();
        let mut issues = Vec::new();

        let Some(obj) = value.as_object() else {
            issues.push("config root is not an object; using defaults".to_string());
            return LoadReport { config, issues };
        };

        if let Some(raw) = field(obj, "active_pack") {
            match raw.as_str().map(str::trim) {
                Some(pack) if !pack.is_empty() => config.active_pack = pack.to_string(),
                _ => issues.push("active_pack must be a non-empty string".to_string()),
            }
        }

        if let Some(raw) = field(obj, "volume") {
            match raw.as_f64() {
                Some(volume) if (0.0..=1.0).contains(&volume) => config.volume = volume as f32,
                _ => issues.push("volume must be a number between 0.0 and 1.0".to_string()),
            }
        }

        if let Some(raw) = field(obj, "enabled") {
            match raw.as_bool() {
                Some(enabled) => config.enabled = enabled,
                None => issues.push("enabled must be a boolean".to_string()),
            }
        }

        if let Some(raw) = field(obj, "desktop_notifications") {
            match raw.as_bool() {
                Some(on) => config.desktop_notifications = on,
                None => issues.push("desktop_notifications must be a boolean".to_string()),
            }
        }

        if let Some(raw) = field(obj, "categories") {
            match raw.as_object() {
                Some(categories) => {
                    for (key, toggle) in categories {
                        let Ok(category) = key.parse::<Category>() else {
                            tracing::debug!(key = %key, "ignoring unknown category toggle");
                            continue;
                        };
                        match toggle.as_bool() {
                            Some(on) => {
                                config.categories.insert(category, on);
                            }
                            None => issues.push(format!("categories.{key} must be a boolean")),
                        }
                    }
                }
                None => issues.push("categories must be an object".to_string()),
            }
        }

        if let Some(raw) = field(obj, "spam_threshold") {
            match raw.as_u64() {
                Some(threshold) if threshold >= 1 => config.spam_threshold = threshold as usize,
                _ => issues.push("spam_threshold must be an integer >= 1".to_string()),
            }
        }

        if let Some(raw) = field(obj, "spam_window_seconds") {
            match raw.as_f64() {
                Some(window) if window > 0.0 => config.spam_window_seconds = window,
                _ => issues.push("spam_window_seconds must be a number > 0".to_string()),
            }
        }

        if let Some(raw) = field(obj, "pack_rotation") {
            match raw.as_array() {
                Some(packs) => {
                    config.pack_rotation = packs
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::trim)
                        .filter(|pack| !pack.is_empty())
                        .map(str::to_string)
                        .collect();
                    if config.pack_rotation.len() != packs.len() {
                        issues.push("pack_rotation entries must be non-empty strings".to_string());
                    }
                }
                None => issues.push("pack_rotation must be an array of strings".to_string()),
            }
        }

        if let Some(raw) = field(obj, "packs_dir") {
            match raw.as_str() {
                Some(dir) if !dir.is_empty() => config.packs_dir = Some(PathBuf::from(dir)),
                _ => issues.push("packs_dir must be a non-empty string".to_string()),
            }
        }

        LoadReport { config, issues }
    }

    pub fn init_default(paths: &Paths) -> anyhow::Result<PathBuf> {
        let path = paths.config_file.clone();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let config = Self::default();
        fs::write(&path, serde_json::to_string_pretty(&config)?)
            .with_context(|| format!("write config at {}", path.display()))?;
        Ok(path)
    }

    /// Categories missing from the map count as enabled.
    pub fn is_category_enabled(&self, category: Category) -> bool {
        self.categories.get(&category).copied().unwrap_or(true)
    }

    pub fn packs_dir(&self, paths: &Paths) -> PathBuf {
        self.packs_dir
            .clone()
            .unwrap_or_else(|| paths.packs_dir.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_pack: "peon".to_string(),
            volume: 0.5,
            enabled: true,
            desktop_notifications: true,
            categories: Category::ALL.into_iter().map(|c| (c, true)).collect(),
            spam_threshold: 3,
            spam_window_seconds: 10.0,
            pack_rotation: Vec::new(),
            packs_dir: None,
        }
    }
}

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|value| !value.is_null())
}
