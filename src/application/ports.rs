//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::error::ExecutableError;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 키 단위 값 저장소 포트. 실행 파일 경로 캐시에만 쓰인다.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str, default: &str) -> String;
    fn set(&self, key: &str, value: &str) -> bool;
    fn reset(&self, key: &str) -> bool;
}

/// CLI 라우트 조회 결과.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub access: Option<String>,
}

/// 명령 이름으로 CLI 라우트를 조회하는 포트.
pub trait RouteRegistry: Send + Sync {
    fn route(&self, command: &str) -> Option<Route>;
}

/// 인터프리터 실행 파일 탐색 포트.
pub trait ExecutableFinder: Send + Sync {
    fn resolve(&self) -> std::result::Result<PathBuf, ExecutableError>;

    /// 탐색 단계와 같은 기준으로 실행 가능 여부를 판단한다.
    fn is_executable(&self, path: &Path) -> bool;
}

/// 하위 프로세스 실행 결과.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// stdout 줄(줄 끝 공백 제거)
    pub lines: Vec<String>,
    /// 정상 종료면 None, 아니면 종료 코드 또는 상태 설명
    pub exit_indicator: Option<String>,
}

/// argv 기반 하위 프로세스 실행 포트.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, argv: &[String], timeout: Option<Duration>) -> Result<ProcessOutput>;
}
