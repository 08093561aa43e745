//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;
use std::env;

use serde::Serialize;

use super::loader::{LoadedConfig, default_state_path};
use crate::application::config::{Config, DefaultsConfig, RouteConfig};
use crate::infrastructure::locator::{PHP_BINARY_VAR, PHP_PATH_VAR, PHP_PEAR_BIN_VAR};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub interpreter: InterpreterInspection,
    pub routes: BTreeMap<String, RouteInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub entrypoint: String,
    pub entrypoint_exists: bool,
    pub timeout_ms: Option<u64>,
    pub state_path: String,
    pub exec_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpreterInspection {
    pub bin_dir: String,
    pub open_basedir: Option<String>,
    pub windows_fallback_dir: String,
    /// 탐색 우선순위가 높은 환경변수 값(설정된 것만)
    pub env_overrides: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteInspection {
    pub access: Option<String>,
    /// 접근 요구사항이 선언되어 API에서 호출 가능한지 여부
    pub callable: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let routes = config
            .routes
            .iter()
            .map(|(name, cfg)| (name.clone(), route_inspection(cfg)))
            .collect();

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: effective_defaults(config),
            interpreter: InterpreterInspection {
                bin_dir: config.interpreter.bin_dir(),
                open_basedir: config.interpreter.open_basedir.clone(),
                windows_fallback_dir: config.interpreter.windows_fallback_dir(),
                env_overrides: env_overrides(),
            },
            routes,
        }
    }
}

fn effective_defaults(config: &Config) -> EffectiveDefaults {
    let entrypoint = config.entrypoint();
    let state_path = config
        .defaults
        .state_path
        .clone()
        .unwrap_or_else(|| default_state_path().display().to_string());

    EffectiveDefaults {
        entrypoint_exists: entrypoint.is_file(),
        entrypoint: entrypoint.display().to_string(),
        timeout_ms: config.timeout().map(|t| t.as_millis() as u64),
        state_path,
        exec_enabled: config.exec_enabled(),
    }
}

fn env_overrides() -> BTreeMap<String, String> {
    [PHP_BINARY_VAR, PHP_PATH_VAR, PHP_PEAR_BIN_VAR]
        .into_iter()
        .filter_map(|var| {
            env::var(var)
                .ok()
                .filter(|v| !v.is_empty())
                .map(|v| (var.to_string(), v))
        })
        .collect()
}

fn route_inspection(cfg: &RouteConfig) -> RouteInspection {
    RouteInspection {
        access: cfg.access.clone(),
        callable: cfg.access.as_deref().is_some_and(|a| !a.is_empty()),
    }
}
