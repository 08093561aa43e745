//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENTRYPOINT: &str = "cli.php";
pub const DEFAULT_UNIX_BIN_DIR: &str = "/usr/bin";
pub const DEFAULT_WINDOWS_BIN_DIR: &str = "C:\\php";
pub const DEFAULT_WINDOWS_FALLBACK_DIR: &str = "C:\\xampp\\php\\";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 실행 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 인터프리터 탐색 설정
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    /// CLI 명령별 접근 요구사항
    #[serde(default)]
    pub routes: BTreeMap<String, RouteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 애플리케이션 CLI 진입점 파일 경로
    pub entrypoint: Option<String>,
    /// 하위 프로세스 타임아웃(ms). 없으면 종료될 때까지 기다린다.
    pub timeout_ms: Option<u64>,
    /// 탐색한 실행 파일 경로를 저장할 상태 파일
    pub state_path: Option<String>,
    /// 하위 프로세스 실행 허용 여부(기본 true)
    pub exec_enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InterpreterConfig {
    /// 인터프리터 기본 설치 디렉터리
    pub bin_dir: Option<String>,
    /// 탐색을 제한할 디렉터리 목록(`:`/`;` 구분)
    pub open_basedir: Option<String>,
    /// Windows 전용 추가 탐색 디렉터리
    pub windows_fallback_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RouteConfig {
    pub access: Option<String>,
}

impl Config {
    pub fn entrypoint(&self) -> PathBuf {
        PathBuf::from(
            self.defaults
                .entrypoint
                .as_deref()
                .unwrap_or(DEFAULT_ENTRYPOINT),
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.defaults
            .timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn exec_enabled(&self) -> bool {
        self.defaults.exec_enabled.unwrap_or(true)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.interpreter.merge_from(other.interpreter);

        for (name, incoming) in other.routes {
            if let Some(existing) = self.routes.get_mut(&name) {
                existing.merge_from(incoming);
            } else {
                self.routes.insert(name, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.entrypoint.is_some() {
            self.entrypoint = other.entrypoint;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
        if other.state_path.is_some() {
            self.state_path = other.state_path;
        }
        if other.exec_enabled.is_some() {
            self.exec_enabled = other.exec_enabled;
        }
    }
}

impl InterpreterConfig {
    pub fn bin_dir(&self) -> String {
        self.bin_dir.clone().unwrap_or_else(|| {
            if cfg!(windows) {
                DEFAULT_WINDOWS_BIN_DIR.to_string()
            } else {
                DEFAULT_UNIX_BIN_DIR.to_string()
            }
        })
    }

    pub fn windows_fallback_dir(&self) -> String {
        self.windows_fallback_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_WINDOWS_FALLBACK_DIR.to_string())
    }

    pub fn merge_from(&mut self, other: InterpreterConfig) {
        if other.bin_dir.is_some() {
            self.bin_dir = other.bin_dir;
        }
        if other.open_basedir.is_some() {
            self.open_basedir = other.open_basedir;
        }
        if other.windows_fallback_dir.is_some() {
            self.windows_fallback_dir = other.windows_fallback_dir;
        }
    }
}

impl RouteConfig {
    pub fn merge_from(&mut self, other: RouteConfig) {
        if other.access.is_some() {
            self.access = other.access;
        }
    }
}
