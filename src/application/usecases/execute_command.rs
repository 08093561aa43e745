//! 실행 파일 해석 + 명령 구성 + 하위 프로세스 실행을 조율하는 유스케이스.
//!
//! 어떤 단계가 실패해도 오류를 던지지 않고 문자열 응답으로 돌려준다.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, ExecutableFinder, ProcessRunner, RouteRegistry};
use crate::domain::command::compose_command_line;
use crate::domain::reply::{
    CONSTRUCT_COMMAND_ERROR, DEFINE_EXECUTABLE_ERROR, ExecReply, RUN_COMMAND_ERROR,
    normalize_output,
};
use crate::domain::request::{CallerIdentity, RequestParameters};

use super::build_command::CommandBuilder;
use super::resolve_executable::ResolveExecutableUseCase;

pub struct ExecuteCommandUseCase<'a> {
    pub store: &'a dyn ConfigStore,
    pub finder: &'a dyn ExecutableFinder,
    pub route_registry: &'a dyn RouteRegistry,
    pub runner: &'a dyn ProcessRunner,
    pub entrypoint: &'a Path,
    pub timeout: Option<Duration>,
}

impl<'a> ExecuteCommandUseCase<'a> {
    /// 요청을 CLI 호출로 실행한다.
    /// - `return_string`: true면 출력 줄을 이어 붙인 문자열, false면 줄 목록
    pub async fn execute(
        &self,
        params: &RequestParameters,
        identity: &CallerIdentity,
        return_string: bool,
    ) -> ExecReply {
        let resolver = ResolveExecutableUseCase {
            store: self.store,
            finder: self.finder,
        };
        let executable = match resolver.executable() {
            Ok(path) => path,
            Err(err) => return ExecReply::failure(DEFINE_EXECUTABLE_ERROR, err),
        };

        let builder = CommandBuilder {
            route_registry: self.route_registry,
        };
        let command = match builder.build(params, identity) {
            Ok(command) => command,
            Err(err) => return ExecReply::failure(CONSTRUCT_COMMAND_ERROR, err),
        };

        // 조합된 명령행을 다시 토큰화해 셸 없이 argv로 실행한다.
        let line = compose_command_line(&executable, self.entrypoint, &command);
        let argv = match shell_words::split(&line) {
            Ok(argv) => argv,
            Err(err) => return ExecReply::failure(CONSTRUCT_COMMAND_ERROR, err),
        };

        debug!(command_line = %line, "running CLI command");
        let output = match self.runner.run(&argv, self.timeout).await {
            Ok(output) => output,
            Err(err) => {
                warn!(command_line = %line, "CLI command failed to run: {err:#}");
                return ExecReply::failure(RUN_COMMAND_ERROR, format!("{err:#}"));
            }
        };

        if let Some(indicator) = &output.exit_indicator {
            debug!(exit = %indicator, lines = output.lines.len(), "CLI command exited abnormally");
        }

        ExecReply::Output(normalize_output(
            output.lines,
            output.exit_indicator,
            return_string,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;
    use crate::application::test_support::{FixedFinder, MemoryStore, RecordingRunner, StubRegistry};
    use crate::domain::error::ExecutableError;
    use crate::domain::reply::ExecOutput;

    struct Fixture {
        store: MemoryStore,
        finder: FixedFinder,
        registry: StubRegistry,
        runner: RecordingRunner,
        entrypoint: PathBuf,
    }

    impl Fixture {
        fn new(finder: FixedFinder, runner: RecordingRunner) -> Self {
            Self {
                store: MemoryStore::default(),
                finder,
                registry: StubRegistry::granting("status", Some("status_view")),
                runner,
                entrypoint: PathBuf::from("/srv/app/cli.php"),
            }
        }

        fn usecase(&self) -> ExecuteCommandUseCase<'_> {
            ExecuteCommandUseCase {
                store: &self.store,
                finder: &self.finder,
                route_registry: &self.registry,
                runner: &self.runner,
                entrypoint: &self.entrypoint,
                timeout: None,
            }
        }
    }

    fn status_params() -> RequestParameters {
        serde_json::from_value(json!({"arguments": ["status"], "get": {"verbose": "1"}})).unwrap()
    }

    #[tokio::test]
    async fn runs_composed_command_and_joins_output() {
        let fixture = Fixture::new(
            FixedFinder::found("/usr/bin/php"),
            RecordingRunner::replying(&["{\"ok\":", "true}"], None),
        );

        let reply = fixture
            .usecase()
            .execute(&status_params(), &CallerIdentity::new(7), true)
            .await;

        assert_eq!(reply, ExecReply::Output(ExecOutput::Text("{\"ok\":true}".into())));
        assert_eq!(
            fixture.runner.last_argv().unwrap(),
            [
                "/usr/bin/php",
                "/srv/app/cli.php",
                "status",
                "--verbose=1",
                "-u=7",
                "-f=json"
            ]
        );
    }

    #[tokio::test]
    async fn returns_raw_lines_when_requested() {
        let fixture = Fixture::new(
            FixedFinder::found("/usr/bin/php"),
            RecordingRunner::replying(&["one", "two"], None),
        );

        let reply = fixture
            .usecase()
            .execute(&status_params(), &CallerIdentity::new(7), false)
            .await;

        assert_eq!(
            reply,
            ExecReply::Output(ExecOutput::Lines(vec!["one".into(), "two".into()]))
        );
    }

    #[tokio::test]
    async fn invalid_params_become_construction_error_text() {
        let fixture = Fixture::new(
            FixedFinder::found("/usr/bin/php"),
            RecordingRunner::replying(&[], None),
        );
        let params: RequestParameters =
            serde_json::from_value(json!({"arguments": ["status", "extra"]})).unwrap();

        let text = fixture
            .usecase()
            .execute(&params, &CallerIdentity::new(7), true)
            .await
            .into_text();

        assert!(text.starts_with("Error constructing CLI command:"), "{text}");
        assert!(fixture.runner.last_argv().is_none());
    }

    #[tokio::test]
    async fn missing_executable_becomes_definition_error_text() {
        let fixture = Fixture::new(
            FixedFinder::failing(ExecutableError::NotFound),
            RecordingRunner::replying(&[], None),
        );

        let text = fixture
            .usecase()
            .execute(&status_params(), &CallerIdentity::new(7), true)
            .await
            .into_text();

        assert_eq!(text, "Error defining PHP executable: Cannot find executable");
    }

    #[tokio::test]
    async fn exit_code_is_used_when_output_is_empty() {
        let fixture = Fixture::new(
            FixedFinder::found("/usr/bin/php"),
            RecordingRunner::replying(&[], Some("255")),
        );

        let text = fixture
            .usecase()
            .execute(&status_params(), &CallerIdentity::new(7), true)
            .await
            .into_text();

        assert_eq!(text, "255");
    }

    #[tokio::test]
    async fn spawn_failure_is_reported_as_text() {
        let fixture = Fixture::new(FixedFinder::found("/usr/bin/php"), RecordingRunner::broken());

        let reply = fixture
            .usecase()
            .execute(&status_params(), &CallerIdentity::new(7), true)
            .await;

        assert!(reply.is_failure());
        assert!(reply.into_text().starts_with("Error executing CLI command:"));
    }

    #[tokio::test]
    async fn cached_executable_is_reused() {
        let fixture = Fixture::new(
            FixedFinder::found("/usr/bin/php"),
            RecordingRunner::replying(&["ok"], None),
        );

        for _ in 0..2 {
            fixture
                .usecase()
                .execute(&status_params(), &CallerIdentity::new(7), true)
                .await;
        }

        assert_eq!(fixture.finder.calls(), 1);
    }
}
