//! CLI 명령 토큰 구성 규칙.
//!
//! 모든 값은 셸 이스케이프를 거친 뒤에만 토큰에 들어간다.

use std::path::Path;

use serde_json::Value;

/// 출력 형식 플래그. 호출자 입력과 무관하게 항상 json으로 고정한다.
pub const FORMAT_FLAG: &str = "-f=json";

/// 구성이 끝난 CLI 명령: `[command, --key=value..., -u=<user>, -f=json]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltCommand {
    tokens: Vec<String>,
}

impl BuiltCommand {
    pub fn new(command: &str) -> Self {
        Self {
            tokens: vec![escape(command)],
        }
    }

    /// `--key=value` 플래그를 추가한다. 값이 비어 있으면 `--key`만 남긴다.
    pub fn push_flag(&mut self, key: &str, value: &str) {
        let token = if value.is_empty() {
            format!("--{}", escape(key))
        } else {
            format!("--{}={}", escape(key), escape(value))
        };
        self.tokens.push(token);
    }

    /// 사용자 플래그와 형식 플래그를 순서대로 붙여 명령을 마무리한다.
    pub fn finish(mut self, user_token: &str) -> Self {
        self.tokens.push(format!("-u={}", escape(user_token)));
        self.tokens.push(FORMAT_FLAG.to_string());
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn to_command_line(&self) -> String {
        self.tokens.join(" ")
    }
}

/// 병합된 요청 값 중 플래그로 승격할 값을 고른다.
/// 문자열 값이면서 키 길이가 1바이트를 넘는 경우만 해당한다.
pub fn promotable_value<'v>(key: &str, value: &'v Value) -> Option<&'v str> {
    match value {
        Value::String(text) if key.len() > 1 => Some(text),
        _ => None,
    }
}

/// `<executable> <entrypoint> <command...>` 전체 명령행을 만든다.
pub fn compose_command_line(executable: &Path, entrypoint: &Path, command: &BuiltCommand) -> String {
    format!(
        "{} {} {}",
        escape(&executable.to_string_lossy()),
        escape(&entrypoint.to_string_lossy()),
        command.to_command_line()
    )
}

fn escape(raw: &str) -> String {
    shell_words::quote(raw).into_owned()
}
