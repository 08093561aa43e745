//! 병합된 설정과 탐색 경로를 보여주는 `config` 서브커맨드.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 설정 파일 경로, 라우트별 호출 가능 여부, 인터프리터 관련 환경변수를 담은 JSON.
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
