//! API 요청 파라미터와 호출자 식별 정보.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// API 요청 파라미터. 누락된 키는 빈 컨테이너로 취급한다.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RequestParameters {
    /// 쿼리 스타일 값
    #[serde(default)]
    pub get: Map<String, Value>,
    /// 본문 스타일 값
    #[serde(default)]
    pub post: Map<String, Value>,
    /// 실행할 명령 이름(정확히 1개여야 한다)
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl RequestParameters {
    /// 단일 명령 이름만 가진 요청을 만든다.
    pub fn for_command(command: &str) -> Self {
        Self {
            arguments: vec![Value::String(command.to_string())],
            ..Self::default()
        }
    }

    /// `get` 위에 `post`를 덮어쓴 병합 결과.
    /// 충돌한 키는 `get`에서의 위치를 유지하고 값만 `post` 쪽으로 바뀐다.
    pub fn merged_values(&self) -> Map<String, Value> {
        let mut merged = self.get.clone();
        for (key, value) in &self.post {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

/// 호출자 식별 정보.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CallerIdentity {
    #[serde(default)]
    pub user_id: Option<Value>,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<Value>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// 비어 있지 않은 user_id를 명령행 토큰으로 반환한다.
    /// `""`, `"0"`, `0`, null 및 문자열/정수가 아닌 값은 비어 있는 것으로 본다.
    pub fn user_token(&self) -> Option<String> {
        let token = match self.user_id.as_ref()? {
            Value::Number(n) if n.as_f64() == Some(0.0) => return None,
            other => scalar_token(other)?,
        };
        if token.is_empty() || token == "0" {
            return None;
        }
        Some(token)
    }
}

/// API 경계로 들어오는 요청 묶음(`clibridge api` 입력).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub params: RequestParameters,
    #[serde(default)]
    pub user: CallerIdentity,
    /// 이미 다른 처리기가 채운 응답(있으면 실행하지 않는다)
    #[serde(default)]
    pub response: Option<Value>,
}

/// 문자열/숫자 값을 명령행 토큰 문자열로 바꾼다.
pub fn scalar_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
