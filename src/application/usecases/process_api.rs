//! API 처리 훅 경계: 응답이 비어 있을 때만 CLI를 실행하고 결과를 JSON으로 해석한다.

use serde_json::Value;
use tracing::debug;

use crate::domain::request::{CallerIdentity, RequestParameters};

use super::execute_command::ExecuteCommandUseCase;

pub struct ProcessApiUseCase<'a> {
    pub executor: ExecuteCommandUseCase<'a>,
}

impl<'a> ProcessApiUseCase<'a> {
    /// 이미 응답이 채워져 있으면 아무것도 하지 않는다.
    pub async fn process(
        &self,
        params: &RequestParameters,
        identity: &CallerIdentity,
        response: &mut Option<Value>,
    ) {
        if response.is_some() {
            debug!("API response already set; skipping CLI execution");
            return;
        }

        let text = self.executor.execute(params, identity, true).await.into_text();
        *response = Some(parse_reply(text));
    }
}

/// JSON 해석에 실패하면 원문 문자열을 그대로 응답으로 쓴다.
pub fn parse_reply(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}
