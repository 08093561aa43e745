//! 실행 결과 정규화와 소프트 실패 응답 모델.

use std::fmt::Display;

pub const DEFINE_EXECUTABLE_ERROR: &str = "Error defining PHP executable";
pub const CONSTRUCT_COMMAND_ERROR: &str = "Error constructing CLI command";
pub const RUN_COMMAND_ERROR: &str = "Error executing CLI command";

/// 하위 프로세스 출력.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutput {
    /// 줄을 구분자 없이 이어 붙이고 앞뒤 공백을 제거한 문자열
    Text(String),
    /// 줄 단위 원본 출력
    Lines(Vec<String>),
}

/// 실행 경계의 응답. 실패도 사용자에게 보여줄 문자열로 표현한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecReply {
    Output(ExecOutput),
    Failure(String),
}

impl ExecReply {
    pub fn failure(prefix: &str, message: impl Display) -> Self {
        ExecReply::Failure(format!("{prefix}: {message}"))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExecReply::Failure(_))
    }

    /// 응답을 항상 문자열로 돌려준다. 줄 단위 출력도 `Text`와 같이 구분자 없이 잇는다.
    pub fn into_text(self) -> String {
        match self {
            ExecReply::Output(ExecOutput::Text(text)) => text,
            ExecReply::Output(ExecOutput::Lines(lines)) => lines.concat(),
            ExecReply::Failure(message) => message,
        }
    }
}

/// 종료 표시와 출력 줄을 정규화한다.
/// 종료 표시가 있는데 출력이 비어 있으면 종료 표시 자체를 출력으로 쓴다.
pub fn normalize_output(
    mut lines: Vec<String>,
    exit_indicator: Option<String>,
    return_string: bool,
) -> ExecOutput {
    if lines.is_empty()
        && let Some(indicator) = exit_indicator.filter(|v| !v.is_empty())
    {
        lines.push(indicator);
    }

    if return_string {
        ExecOutput::Text(lines.concat().trim().to_string())
    } else {
        ExecOutput::Lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn text_output_joins_without_separator_and_trims() {
        let out = normalize_output(lines(&["  {\"a\":", "1}  "]), None, true);
        assert_eq!(out, ExecOutput::Text("{\"a\":1}".to_string()));
    }

    #[test]
    fn exit_indicator_replaces_empty_output() {
        let out = normalize_output(Vec::new(), Some("127".to_string()), true);
        assert_eq!(out, ExecOutput::Text("127".to_string()));
    }

    #[test]
    fn exit_indicator_is_ignored_when_output_exists() {
        let out = normalize_output(lines(&["boom"]), Some("1".to_string()), false);
        assert_eq!(out, ExecOutput::Lines(lines(&["boom"])));
    }

    #[test]
    fn line_output_as_text_has_no_separator() {
        let reply = ExecReply::Output(ExecOutput::Lines(lines(&["{\"a\":", "1}"])));
        assert_eq!(reply.into_text(), "{\"a\":1}");
    }

    #[test]
    fn failure_text_carries_prefix() {
        let reply = ExecReply::failure(CONSTRUCT_COMMAND_ERROR, "bad input");
        assert!(reply.is_failure());
        assert_eq!(reply.into_text(), "Error constructing CLI command: bad input");
    }
}
