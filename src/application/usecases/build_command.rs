//! API 요청 파라미터를 CLI 명령으로 바꾸는 유스케이스.

use tracing::debug;

use crate::application::ports::RouteRegistry;
use crate::domain::command::{BuiltCommand, promotable_value};
use crate::domain::error::BuildError;
use crate::domain::request::{CallerIdentity, RequestParameters, scalar_token};

/// 요청 검증 후 이스케이프된 명령 토큰을 구성한다.
pub struct CommandBuilder<'a> {
    pub route_registry: &'a dyn RouteRegistry,
}

impl<'a> CommandBuilder<'a> {
    /// 검증 순서: 인자 개수 -> user_id -> 라우트 접근 요구사항.
    pub fn build(
        &self,
        params: &RequestParameters,
        identity: &CallerIdentity,
    ) -> Result<BuiltCommand, BuildError> {
        let [argument] = params.arguments.as_slice() else {
            return Err(BuildError::InvalidArguments(params.arguments.len()));
        };

        let Some(user) = identity.user_token() else {
            return Err(BuildError::InvalidIdentity);
        };

        let command_name = scalar_token(argument).unwrap_or_default();
        let has_access = self
            .route_registry
            .route(&command_name)
            .and_then(|route| route.access)
            .is_some_and(|access| !access.is_empty());
        if !has_access {
            return Err(BuildError::AccessUndefined(command_name));
        }

        let mut command = BuiltCommand::new(&command_name);
        for (key, value) in &params.merged_values() {
            if let Some(text) = promotable_value(key, value) {
                command.push_flag(key, text);
            }
        }

        let command = command.finish(&user);
        debug!(command = %command_name, tokens = command.tokens().len(), "CLI command built");
        Ok(command)
    }
}
