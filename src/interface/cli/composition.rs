//! 애플리케이션 조립(composition root) 모듈.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::ConfigRepository;
use crate::application::usecases::execute_command::ExecuteCommandUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::lifecycle::{
    InstallPrecheckUseCase, PRECHECK_TOKEN, UninstallUseCase,
};
use crate::application::usecases::process_api::ProcessApiUseCase;
use crate::application::usecases::resolve_executable::ResolveExecutableUseCase;
use crate::infrastructure::adapters::{ConfigRouteRegistry, JsonConfigRepository, JsonStateStore};
use crate::infrastructure::locator::{ExecutableLocator, LocatorSettings};
use crate::infrastructure::process::{TokioProcessRunner, shell_echo_argv};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    state_store: JsonStateStore,
    locator: ExecutableLocator,
    route_registry: ConfigRouteRegistry,
    runner: TokioProcessRunner,
    entrypoint: PathBuf,
    timeout: Option<Duration>,
    exec_enabled: bool,
    precheck_argv: Vec<String>,
}

impl AppComposition {
    /// 병합 설정 파일을 읽어 실행 조합을 생성한다.
    pub fn load() -> Result<Self> {
        let config = JsonConfigRepository.load()?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            state_store: JsonStateStore::from_config(config),
            locator: ExecutableLocator::new(LocatorSettings::from_config(config)),
            route_registry: ConfigRouteRegistry::from_config(config),
            runner: TokioProcessRunner,
            entrypoint: config.entrypoint(),
            timeout: config.timeout(),
            exec_enabled: config.exec_enabled(),
            precheck_argv: shell_echo_argv(PRECHECK_TOKEN),
        }
    }

    /// 실행 파일 경로 조회/저장 유스케이스를 생성한다.
    pub fn resolve_executable_usecase(&self) -> ResolveExecutableUseCase<'_> {
        ResolveExecutableUseCase {
            store: &self.state_store,
            finder: &self.locator,
        }
    }

    /// CLI 명령 실행 유스케이스를 생성한다.
    pub fn execute_usecase(&self) -> ExecuteCommandUseCase<'_> {
        ExecuteCommandUseCase {
            store: &self.state_store,
            finder: &self.locator,
            route_registry: &self.route_registry,
            runner: &self.runner,
            entrypoint: &self.entrypoint,
            timeout: self.timeout,
        }
    }

    /// API 처리 훅 유스케이스를 생성한다.
    pub fn process_api_usecase(&self) -> ProcessApiUseCase<'_> {
        ProcessApiUseCase {
            executor: self.execute_usecase(),
        }
    }

    /// 설치 전 점검 유스케이스를 생성한다.
    pub fn install_precheck_usecase(&self) -> InstallPrecheckUseCase<'_> {
        InstallPrecheckUseCase {
            runner: &self.runner,
            exec_enabled: self.exec_enabled,
            probe_argv: &self.precheck_argv,
        }
    }

    /// 제거 후 정리 유스케이스를 생성한다.
    pub fn uninstall_usecase(&self) -> UninstallUseCase<'_> {
        UninstallUseCase {
            store: &self.state_store,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }
}
