//! Domain layer
//! 요청 파라미터, CLI 명령 구성 규칙, 실행 결과 정규화를 외부 시스템 없이 표현한다.

pub mod command;
pub mod error;
pub mod reply;
pub mod request;
