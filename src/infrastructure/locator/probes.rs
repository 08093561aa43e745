//! 우선순위 순서로 평가되는 실행 파일 탐색 단계.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::error::ExecutableError;

use super::LocatorSettings;
use super::host::{HostEnv, Platform};

pub const PHP_BINARY_VAR: &str = "PHP_BINARY";
pub const PHP_PATH_VAR: &str = "PHP_PATH";
pub const PHP_PEAR_BIN_VAR: &str = "PHP_PEAR_PHP_BIN";

const INTERPRETER_STEM: &str = "php";

/// 개별 탐색 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// 설정되어 있으면 반드시 실행 가능해야 한다(아니면 즉시 실패).
    StrictEnv(&'static str),
    /// 실행 가능할 때만 채택하고, 아니면 다음 단계로 넘어간다.
    SoftEnv(&'static str),
    /// 기본 설치 디렉터리의 `php`/`php.exe`.
    BinDir,
    /// open_basedir 또는 PATH 디렉터리 탐색.
    DirectorySearch,
}

pub const DEFAULT_PROBES: [Probe; 5] = [
    Probe::StrictEnv(PHP_BINARY_VAR),
    Probe::StrictEnv(PHP_PATH_VAR),
    Probe::SoftEnv(PHP_PEAR_BIN_VAR),
    Probe::BinDir,
    Probe::DirectorySearch,
];

impl Probe {
    pub fn label(&self) -> String {
        match self {
            Probe::StrictEnv(var) | Probe::SoftEnv(var) => format!("env:{var}"),
            Probe::BinDir => "bin_dir".to_string(),
            Probe::DirectorySearch => "directory_search".to_string(),
        }
    }

    pub fn probe(
        &self,
        settings: &LocatorSettings,
        host: &dyn HostEnv,
    ) -> Result<Option<PathBuf>, ExecutableError> {
        match *self {
            Probe::StrictEnv(var) => strict_env(var, host),
            Probe::SoftEnv(var) => Ok(soft_env(var, host)),
            Probe::BinDir => Ok(bin_dir(settings, host)),
            Probe::DirectorySearch => Ok(directory_search(settings, host)),
        }
    }
}

fn env_value(var: &str, host: &dyn HostEnv) -> Option<String> {
    host.var(var).filter(|v| !v.is_empty())
}

fn strict_env(var: &str, host: &dyn HostEnv) -> Result<Option<PathBuf>, ExecutableError> {
    let Some(value) = env_value(var, host) else {
        return Ok(None);
    };

    let path = PathBuf::from(value);
    if host.is_executable(&path) {
        return Ok(Some(path));
    }

    Err(ExecutableError::NotExecutable {
        variable: var.to_string(),
        path,
    })
}

fn soft_env(var: &str, host: &dyn HostEnv) -> Option<PathBuf> {
    let path = PathBuf::from(env_value(var, host)?);
    host.is_executable(&path).then_some(path)
}

fn bin_dir(settings: &LocatorSettings, host: &dyn HostEnv) -> Option<PathBuf> {
    let platform = host.platform();
    let path = platform.join(&settings.bin_dir, platform.executable_name());
    host.is_executable(&path).then_some(path)
}

fn directory_search(settings: &LocatorSettings, host: &dyn HostEnv) -> Option<PathBuf> {
    let platform = host.platform();

    let dirs = match settings.open_basedir.as_deref().filter(|v| !v.is_empty()) {
        Some(restriction) => {
            let mut dirs = Vec::new();
            for entry in split_list(restriction, platform) {
                if is_dir_quiet(host, Path::new(entry)) {
                    dirs.push(entry.to_string());
                    continue;
                }

                let path = PathBuf::from(entry);
                if platform.basename(entry) == INTERPRETER_STEM && host.is_executable(&path) {
                    return Some(path);
                }
            }
            dirs
        }
        None => search_path_dirs(settings, host),
    };

    for suffix in suffixes(host) {
        for dir in &dirs {
            let file = platform.join(dir, &format!("{INTERPRETER_STEM}{suffix}"));
            // Windows는 실행 비트가 의미 없으므로 파일 여부만 본다.
            if host.is_file(&file) && (platform == Platform::Windows || host.is_executable(&file)) {
                return Some(file);
            }
        }
    }

    None
}

/// PATH 디렉터리 + 기본 설치 디렉터리(+ Windows 보조 디렉터리).
fn search_path_dirs(settings: &LocatorSettings, host: &dyn HostEnv) -> Vec<String> {
    let platform = host.platform();
    let path_var = env_value("PATH", host)
        .or_else(|| env_value("Path", host))
        .unwrap_or_default();

    let mut dirs: Vec<String> = split_list(&path_var, platform)
        .map(str::to_string)
        .collect();
    dirs.push(settings.bin_dir.clone());
    if platform == Platform::Windows {
        dirs.push(settings.windows_fallback_dir.clone());
    }
    dirs
}

/// 빈 접미사를 항상 먼저 시도하고, Windows에서는 PATHEXT 항목을 덧붙인다.
fn suffixes(host: &dyn HostEnv) -> Vec<String> {
    let mut suffixes = vec![String::new()];
    let platform = host.platform();
    if platform == Platform::Windows
        && let Some(path_ext) = env_value("PATHEXT", host)
    {
        suffixes.extend(split_list(&path_ext, platform).map(str::to_string));
    }
    suffixes
}

fn split_list(raw: &str, platform: Platform) -> impl Iterator<Item = &str> {
    raw.split(platform.list_separator())
        .filter(|s| !s.is_empty())
}

/// 읽을 수 없는 디렉터리는 건너뛴다(전체 탐색을 실패시키지 않는다).
fn is_dir_quiet(host: &dyn HostEnv, path: &Path) -> bool {
    match host.is_dir(path) {
        Ok(is_dir) => is_dir,
        Err(err) => {
            debug!(path = %path.display(), "skipping unreadable directory: {err}");
            false
        }
    }
}
