//! 설치 전 점검과 제거 후 정리 유스케이스.

use std::time::Duration;

use tracing::warn;

use crate::application::ports::{ConfigStore, ProcessRunner};

use super::resolve_executable::EXECUTABLE_CACHE_KEY;

/// 왕복 점검에 쓰는 출력 토큰.
pub const PRECHECK_TOKEN: &str = "EXEC";

const PRECHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// 하위 프로세스 실행이 가능한지 확인한다.
pub struct InstallPrecheckUseCase<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub exec_enabled: bool,
    /// `PRECHECK_TOKEN`을 출력하는 명령(argv)
    pub probe_argv: &'a [String],
}

impl<'a> InstallPrecheckUseCase<'a> {
    /// 통과하면 None, 실패하면 사람이 읽을 수 있는 사유를 반환한다.
    pub async fn check(&self) -> Option<String> {
        if !self.exec_enabled {
            return Some("subprocess execution is disabled".to_string());
        }

        match self.runner.run(self.probe_argv, Some(PRECHECK_TIMEOUT)).await {
            Ok(output)
                if output.exit_indicator.is_none()
                    && output.lines.concat().trim() == PRECHECK_TOKEN =>
            {
                None
            }
            Ok(output) => {
                warn!(?output, "shell round trip returned unexpected output");
                Some("subprocess execution is not functional".to_string())
            }
            Err(err) => Some(format!("subprocess execution is disabled: {err:#}")),
        }
    }
}

/// 모듈 제거 시 저장된 실행 파일 경로를 지운다.
pub struct UninstallUseCase<'a> {
    pub store: &'a dyn ConfigStore,
}

impl<'a> UninstallUseCase<'a> {
    pub fn execute(&self) -> bool {
        self.store.reset(EXECUTABLE_CACHE_KEY)
    }
}
