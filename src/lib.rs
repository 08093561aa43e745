//! clibridge library root.
//! API 요청을 CLI 호출로 중계하는 계층(Clean Architecture)을 외부에 노출한다.

use anyhow::Result;
use serde_json::Value;
use tracing::warn;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::usecases::process_api::parse_reply;
use domain::reply::{DEFINE_EXECUTABLE_ERROR, ExecReply};
use domain::request::{CallerIdentity, RequestParameters};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 실행 함수. 설정 파일 기반 기본 조합을 사용한다.
/// 설정을 읽지 못한 경우도 실패 응답으로 돌려준다.
pub async fn execute(
    params: &RequestParameters,
    identity: &CallerIdentity,
    return_string: bool,
) -> ExecReply {
    match AppComposition::load() {
        Ok(composition) => {
            composition
                .execute_usecase()
                .execute(params, identity, return_string)
                .await
        }
        Err(err) => config_failure(err),
    }
}

/// API 처리 훅 호출용 함수. 응답이 이미 있으면 그대로 둔다.
pub async fn process_api(
    params: &RequestParameters,
    identity: &CallerIdentity,
    response: &mut Option<Value>,
) {
    if response.is_some() {
        return;
    }

    match AppComposition::load() {
        Ok(composition) => {
            composition
                .process_api_usecase()
                .process(params, identity, response)
                .await
        }
        Err(err) => *response = Some(parse_reply(config_failure(err).into_text())),
    }
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::load()?;
    composition.inspect_config_usecase().execute()
}

fn config_failure(err: anyhow::Error) -> ExecReply {
    warn!("failed to load configuration: {err:#}");
    ExecReply::failure(DEFINE_EXECUTABLE_ERROR, format!("{err:#}"))
}
