//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use crate::domain::request::{CallerIdentity, RequestParameters};

#[derive(Debug, Parser)]
#[command(name = "clibridge")]
#[command(about = "Run application CLI commands on behalf of API requests")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build and run a CLI command for the given request parameters
    Exec {
        /// Target command name
        command: String,

        /// Query-style parameter (repeatable)
        #[arg(long = "get", value_name = "KEY=VALUE", value_parser = parse_pair)]
        get: Vec<(String, String)>,

        /// Body-style parameter, overrides --get on collision (repeatable)
        #[arg(long = "post", value_name = "KEY=VALUE", value_parser = parse_pair)]
        post: Vec<(String, String)>,

        /// Caller user ID
        #[arg(long, short = 'u')]
        user: String,

        /// Print raw output lines instead of the joined string
        #[arg(long)]
        lines: bool,
    },
    /// Read {"params": ..., "user": ...} JSON from stdin and print the API response
    Api,
    /// Print the interpreter executable path (cached or discovered)
    Locate {
        /// Ignore the cached path and discover again
        #[arg(long)]
        refresh: bool,
    },
    /// Store an explicit interpreter executable path
    SetInterpreter { path: PathBuf },
    /// Check that subprocess execution works on this host
    Precheck,
    /// Clear the cached interpreter executable path
    Uninstall,
    /// Show effective merged config
    Config,
}

pub enum CliAction {
    Exec {
        params: RequestParameters,
        identity: CallerIdentity,
        return_string: bool,
    },
    Api,
    Locate { refresh: bool },
    SetInterpreter(PathBuf),
    Precheck,
    Uninstall,
    InspectConfig,
}

impl Cli {
    /// 인자 오류/도움말은 clap이 직접 출력하고 종료한다.
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Commands::Exec {
                command,
                get,
                post,
                user,
                lines,
            } => CliAction::Exec {
                params: RequestParameters {
                    get: to_map(get),
                    post: to_map(post),
                    arguments: vec![Value::String(command)],
                },
                identity: CallerIdentity::new(user),
                return_string: !lines,
            },
            Commands::Api => CliAction::Api,
            Commands::Locate { refresh } => CliAction::Locate { refresh },
            Commands::SetInterpreter { path } => CliAction::SetInterpreter(path),
            Commands::Precheck => CliAction::Precheck,
            Commands::Uninstall => CliAction::Uninstall,
            Commands::Config => CliAction::InspectConfig,
        }
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn to_map(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}
