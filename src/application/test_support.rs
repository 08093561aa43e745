//! 유스케이스 단위 테스트용 포트 대역.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::application::ports::{
    ConfigStore, ExecutableFinder, ProcessOutput, ProcessRunner, Route, RouteRegistry,
};
use crate::domain::error::ExecutableError;

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(key, value);
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str, default: &str) -> String {
        self.value(key).unwrap_or_else(|| default.to_string())
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn reset(&self, key: &str) -> bool {
        self.values.lock().unwrap().remove(key);
        true
    }
}

#[derive(Default)]
pub struct StubRegistry {
    routes: HashMap<String, Route>,
}

impl StubRegistry {
    pub fn granting(command: &str, access: Option<&str>) -> Self {
        let mut routes = HashMap::new();
        routes.insert(
            command.to_string(),
            Route {
                access: access.map(str::to_string),
            },
        );
        Self { routes }
    }
}

impl RouteRegistry for StubRegistry {
    fn route(&self, command: &str) -> Option<Route> {
        self.routes.get(command).cloned()
    }
}

pub struct FixedFinder {
    result: std::result::Result<PathBuf, ExecutableError>,
    executables: Vec<PathBuf>,
    calls: AtomicUsize,
}

impl FixedFinder {
    pub fn found(path: &str) -> Self {
        Self {
            result: Ok(PathBuf::from(path)),
            executables: vec![PathBuf::from(path)],
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: ExecutableError) -> Self {
        Self {
            result: Err(err),
            executables: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_executable(mut self, path: &str) -> Self {
        self.executables.push(PathBuf::from(path));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExecutableFinder for FixedFinder {
    fn resolve(&self) -> std::result::Result<PathBuf, ExecutableError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.executables.iter().any(|known| known == path)
    }
}

/// 받은 argv를 기록하고 미리 정한 출력을 돌려주는 실행기.
pub struct RecordingRunner {
    output: Option<ProcessOutput>,
    pub seen: Mutex<Vec<Vec<String>>>,
}

impl RecordingRunner {
    pub fn replying(lines: &[&str], exit_indicator: Option<&str>) -> Self {
        Self {
            output: Some(ProcessOutput {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                exit_indicator: exit_indicator.map(str::to_string),
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            output: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn last_argv(&self) -> Option<Vec<String>> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, argv: &[String], _timeout: Option<Duration>) -> Result<ProcessOutput> {
        self.seen.lock().unwrap().push(argv.to_vec());
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => bail!("failed to spawn '{}'", argv.first().map(String::as_str).unwrap_or("")),
        }
    }
}
