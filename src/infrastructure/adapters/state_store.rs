//! 키-값 상태를 JSON 파일에 저장하는 `ConfigStore` 어댑터.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

use crate::application::config::Config;
use crate::application::ports::ConfigStore;
use crate::infrastructure::config::default_state_path;

pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `defaults.state_path`가 없으면 사용자 데이터 디렉터리를 쓴다.
    pub fn from_config(config: &Config) -> Self {
        match config.defaults.state_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::new(default_state_path()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read state at {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", self.path.display()))
    }

    fn write_state(&self, state: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        let rendered = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write state at {}", self.path.display()))
    }

    fn update(&self, apply: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let mut state = self.read_state()?;
        apply(&mut state);
        self.write_state(&state)
    }
}

impl ConfigStore for JsonStateStore {
    fn get(&self, key: &str, default: &str) -> String {
        match self.read_state() {
            Ok(state) => state
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| default.to_string()),
            Err(err) => {
                warn!(key, "state read failed, using default: {err:#}");
                default.to_string()
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let result = self.update(|state| {
            state.insert(key.to_string(), Value::String(value.to_string()));
        });
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(key, "state write failed: {err:#}");
                false
            }
        }
    }

    fn reset(&self, key: &str) -> bool {
        if !self.path.exists() {
            return true;
        }

        let result = self.update(|state| {
            state.remove(key);
        });
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(key, "state reset failed: {err:#}");
                false
            }
        }
    }
}
