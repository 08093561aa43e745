//! 인터프리터 실행 파일 탐색기.
//! 환경변수 -> 기본 설치 디렉터리 -> open_basedir/PATH 순으로 후보를 평가한다.

mod host;
mod probes;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::config::Config;
use crate::application::ports::ExecutableFinder;
use crate::domain::error::ExecutableError;

pub use host::{HostEnv, Platform, SystemHost};
pub use probes::{DEFAULT_PROBES, PHP_BINARY_VAR, PHP_PATH_VAR, PHP_PEAR_BIN_VAR, Probe};

/// 탐색에 필요한 설정값.
#[derive(Debug, Clone)]
pub struct LocatorSettings {
    pub bin_dir: String,
    pub open_basedir: Option<String>,
    pub windows_fallback_dir: String,
}

impl LocatorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bin_dir: config.interpreter.bin_dir(),
            open_basedir: config.interpreter.open_basedir.clone(),
            windows_fallback_dir: config.interpreter.windows_fallback_dir(),
        }
    }
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct ExecutableLocator<H = SystemHost> {
    settings: LocatorSettings,
    host: H,
    probes: Vec<Probe>,
}

impl ExecutableLocator<SystemHost> {
    pub fn new(settings: LocatorSettings) -> Self {
        Self::with_host(settings, SystemHost)
    }
}

impl<H: HostEnv> ExecutableLocator<H> {
    pub fn with_host(settings: LocatorSettings, host: H) -> Self {
        Self {
            settings,
            host,
            probes: DEFAULT_PROBES.to_vec(),
        }
    }

    /// 첫 번째로 성공한 단계의 경로를 반환한다.
    /// 엄격한 환경변수 단계의 실패는 뒤 단계를 시도하지 않고 그대로 전파한다.
    pub fn resolve(&self) -> Result<PathBuf, ExecutableError> {
        for probe in &self.probes {
            if let Some(path) = probe.probe(&self.settings, &self.host)? {
                debug!(probe = %probe.label(), path = %path.display(), "interpreter executable found");
                return Ok(path);
            }
        }

        Err(ExecutableError::NotFound)
    }
}

impl<H: HostEnv + Send + Sync> ExecutableFinder for ExecutableLocator<H> {
    fn resolve(&self) -> Result<PathBuf, ExecutableError> {
        ExecutableLocator::resolve(self)
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.host.is_executable(path)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::probes::tests::{FakeHost, unix_settings};
    use super::*;

    #[test]
    fn php_binary_wins_over_every_other_tier() {
        let host = FakeHost::new(Platform::Unix)
            .var(PHP_BINARY_VAR, "/opt/custom/php")
            .executable("/opt/custom/php")
            .var(PHP_PATH_VAR, "/opt/other/php")
            .executable("/opt/other/php")
            .executable("/usr/bin/php")
            .var("PATH", "/usr/local/bin")
            .executable("/usr/local/bin/php");

        let locator = ExecutableLocator::with_host(unix_settings(), host);
        assert_eq!(locator.resolve().unwrap(), PathBuf::from("/opt/custom/php"));
    }

    #[test]
    fn broken_php_binary_fails_without_trying_php_path() {
        let host = FakeHost::new(Platform::Unix)
            .var(PHP_BINARY_VAR, "/opt/custom/php")
            .var(PHP_PATH_VAR, "/opt/other/php")
            .executable("/opt/other/php");

        let locator = ExecutableLocator::with_host(unix_settings(), host);
        assert_matches!(
            locator.resolve(),
            Err(ExecutableError::NotExecutable { variable, .. }) if variable == PHP_BINARY_VAR
        );
    }

    #[test]
    fn broken_pear_bin_falls_through_to_bin_dir() {
        let host = FakeHost::new(Platform::Unix)
            .var(PHP_PEAR_BIN_VAR, "/nope/php")
            .executable("/usr/bin/php");

        let locator = ExecutableLocator::with_host(unix_settings(), host);
        assert_eq!(locator.resolve().unwrap(), PathBuf::from("/usr/bin/php"));
    }

    #[test]
    fn broken_php_path_stops_before_pear_and_bin_dir() {
        let host = FakeHost::new(Platform::Unix)
            .var(PHP_PATH_VAR, "/opt/other/php")
            .var(PHP_PEAR_BIN_VAR, "/opt/pear/php")
            .executable("/opt/pear/php")
            .executable("/usr/bin/php");

        let locator = ExecutableLocator::with_host(unix_settings(), host);
        assert_matches!(
            locator.resolve(),
            Err(ExecutableError::NotExecutable { variable, path })
                if variable == PHP_PATH_VAR && path == PathBuf::from("/opt/other/php")
        );
    }

    #[test]
    fn finder_uses_host_executable_check() {
        let host = FakeHost::new(Platform::Unix)
            .file("/srv/app/php")
            .executable("/usr/bin/php");

        let locator = ExecutableLocator::with_host(unix_settings(), host);
        assert!(ExecutableFinder::is_executable(&locator, Path::new("/usr/bin/php")));
        assert!(!ExecutableFinder::is_executable(&locator, Path::new("/srv/app/php")));
    }

    #[test]
    fn nothing_found_is_not_found_error() {
        let host = FakeHost::new(Platform::Unix).var("PATH", "/usr/local/bin:/bin");

        let locator = ExecutableLocator::with_host(unix_settings(), host);
        let err = locator.resolve().unwrap_err();
        assert_eq!(err, ExecutableError::NotFound);
        assert_eq!(err.to_string(), "Cannot find executable");
    }
}
