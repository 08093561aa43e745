//! 하위 프로세스 실행기.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{ProcessOutput, ProcessRunner};

/// tokio 기반 argv 실행기. 셸을 거치지 않는다.
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, argv: &[String], timeout: Option<Duration>) -> Result<ProcessOutput> {
        let (program, args) = argv.split_first().context("command line is empty")?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn '{program}'"))?;

        // 타임아웃 시 future와 함께 child가 drop되어 프로세스가 종료된다.
        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| anyhow!("'{program}' timed out after {} ms", limit.as_millis()))?,
            None => child.wait_with_output().await,
        }
        .with_context(|| format!("failed to wait for '{program}'"))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(program = %program, stderr = %stderr.trim(), "subprocess wrote to stderr");
        }

        Ok(ProcessOutput {
            lines: String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect(),
            exit_indicator: exit_indicator(output.status),
        })
    }
}

/// 정상 종료면 None. 시그널로 끝난 경우처럼 코드가 없으면 상태 설명을 쓴다.
fn exit_indicator(status: ExitStatus) -> Option<String> {
    if status.success() {
        return None;
    }
    Some(
        status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| status.to_string()),
    )
}

/// 플랫폼 셸로 `text`를 출력하는 명령.
pub fn shell_echo_argv(text: &str) -> Vec<String> {
    if cfg!(windows) {
        vec!["cmd".into(), "/C".into(), format!("echo {text}")]
    } else {
        vec!["sh".into(), "-c".into(), format!("echo {text}")]
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".into(), "-c".into(), script.into()]
    }

    #[tokio::test]
    async fn captures_stdout_lines_without_trailing_whitespace() {
        let output = TokioProcessRunner
            .run(&sh("printf 'one  \\ntwo\\n'"), None)
            .await
            .unwrap();

        assert_eq!(output.lines, ["one", "two"]);
        assert_eq!(output.exit_indicator, None);
    }

    #[tokio::test]
    async fn non_zero_exit_is_reported() {
        let output = TokioProcessRunner
            .run(&sh("echo oops >&2; exit 3"), None)
            .await
            .unwrap();

        assert!(output.lines.is_empty());
        assert_eq!(output.exit_indicator.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn timeout_kills_long_running_child() {
        let err = TokioProcessRunner
            .run(&sh("sleep 5"), Some(Duration::from_millis(100)))
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("timed out"));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let argv = vec!["/definitely/not/here/php".to_string()];
        assert!(TokioProcessRunner.run(&argv, None).await.is_err());
        assert!(TokioProcessRunner.run(&[], None).await.is_err());
    }

    #[tokio::test]
    async fn shell_echo_round_trips() {
        let output = TokioProcessRunner
            .run(&shell_echo_argv("EXEC"), None)
            .await
            .unwrap();
        assert_eq!(output.lines, ["EXEC"]);
    }
}
