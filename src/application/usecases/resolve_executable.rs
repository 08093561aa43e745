//! 저장된 인터프리터 경로를 읽고, 없으면 탐색 후 저장하는 유스케이스.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, ExecutableFinder};
use crate::domain::error::ExecutableError;

/// 실행 파일 경로 캐시 키.
pub const EXECUTABLE_CACHE_KEY: &str = "interpreter_executable_file";

pub struct ResolveExecutableUseCase<'a> {
    pub store: &'a dyn ConfigStore,
    pub finder: &'a dyn ExecutableFinder,
}

impl<'a> ResolveExecutableUseCase<'a> {
    /// 캐시된 경로를 우선 사용한다. 비어 있으면 다시 탐색해 저장한다.
    pub fn executable(&self) -> Result<PathBuf, ExecutableError> {
        let cached = self.store.get(EXECUTABLE_CACHE_KEY, "");
        if !cached.is_empty() {
            return Ok(PathBuf::from(cached));
        }

        let found = self.finder.resolve()?;
        debug!(path = %found.display(), "interpreter executable discovered");
        if !self.store_path(&found) {
            // 저장 실패는 다음 호출에서 다시 탐색하면 되므로 결과는 그대로 돌려준다.
            warn!(path = %found.display(), "failed to cache interpreter executable path");
        }
        Ok(found)
    }

    /// 캐시를 비우고 다시 탐색한다.
    pub fn refresh(&self) -> Result<PathBuf, ExecutableError> {
        self.forget();
        self.executable()
    }

    /// 직접 지정한 경로를 저장한다. 실행 가능한 파일이 아니면 저장하지 않는다.
    /// `Ok(false)`는 저장소 쓰기 실패.
    pub fn set_executable(&self, path: &Path) -> Result<bool, ExecutableError> {
        if !self.finder.is_executable(path) {
            return Err(ExecutableError::Rejected(path.to_path_buf()));
        }
        Ok(self.store_path(path))
    }

    fn store_path(&self, path: &Path) -> bool {
        self.store
            .set(EXECUTABLE_CACHE_KEY, &path.to_string_lossy())
    }

    pub fn forget(&self) -> bool {
        self.store.reset(EXECUTABLE_CACHE_KEY)
    }
}
