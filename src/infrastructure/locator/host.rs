//! 실행 파일 탐색이 참조하는 호스트 상태(환경변수/파일시스템) 추상화.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn dir_separator(self) -> char {
        match self {
            Platform::Unix => '/',
            Platform::Windows => '\\',
        }
    }

    /// PATH 류 목록 구분자.
    pub fn list_separator(self) -> char {
        match self {
            Platform::Unix => ':',
            Platform::Windows => ';',
        }
    }

    pub fn executable_name(self) -> &'static str {
        match self {
            Platform::Unix => "php",
            Platform::Windows => "php.exe",
        }
    }

    /// 디렉터리 끝의 구분자를 정리한 뒤 파일 이름을 붙인다.
    pub fn join(self, dir: &str, file: &str) -> PathBuf {
        let trimmed = match self {
            Platform::Unix => dir.trim_end_matches('/'),
            Platform::Windows => dir.trim_end_matches(['/', '\\']),
        };
        PathBuf::from(format!("{trimmed}{}{file}", self.dir_separator()))
    }

    pub fn basename(self, path: &str) -> &str {
        let split = match self {
            Platform::Unix => path.rsplit('/').next(),
            Platform::Windows => path.rsplit(['/', '\\']).next(),
        };
        split.unwrap_or(path)
    }
}

/// 탐색 단계가 읽는 호스트 상태.
pub trait HostEnv {
    fn platform(&self) -> Platform;
    fn var(&self, key: &str) -> Option<String>;
    fn is_file(&self, path: &Path) -> bool;
    /// 권한 문제 등은 `Err`로 돌려준다. 호출자가 무시 여부를 정한다.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;
    fn is_executable(&self, path: &Path) -> bool;
}

/// 실제 프로세스 환경과 파일시스템.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostEnv for SystemHost {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(path)
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        path.is_file()
    }
}
