//! 실행 파일 탐색/명령 구성 단계의 도메인 오류.

use std::path::PathBuf;

/// 인터프리터 실행 파일 탐색 실패.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutableError {
    /// 명시적으로 지정된 경로가 실행 불가능한 경우(다음 단계로 넘어가지 않는다).
    #[error("{variable} is not executable: {}", path.display())]
    NotExecutable { variable: String, path: PathBuf },

    #[error("Cannot find executable")]
    NotFound,

    /// 직접 지정한 경로가 실행 가능한 파일이 아닌 경우.
    #[error("not an executable file: {}", .0.display())]
    Rejected(PathBuf),
}

/// 요청 파라미터를 CLI 명령으로 변환하지 못한 경우.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("\"arguments\" key must contain exactly one array element (got {0})")]
    InvalidArguments(usize),

    #[error("caller identity must contain a valid user ID under \"user_id\" key")]
    InvalidIdentity,

    #[error("Undefined user access for command '{0}'")]
    AccessUndefined(String),
}
