//! `clibridge` 바이너리 진입점.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};

use clibridge::domain::reply::{ExecOutput, ExecReply};
use clibridge::domain::request::ApiRequest;
use clibridge::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let action = Cli::parse_action();

    let composition = match AppComposition::load() {
        Ok(composition) => composition,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(action, &composition).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(action: CliAction, composition: &AppComposition) -> Result<()> {
    match action {
        CliAction::Exec {
            params,
            identity,
            return_string,
        } => {
            let reply = composition
                .execute_usecase()
                .execute(&params, &identity, return_string)
                .await;
            match reply {
                ExecReply::Output(ExecOutput::Text(text)) => println!("{text}"),
                ExecReply::Output(ExecOutput::Lines(lines)) => {
                    for line in lines {
                        println!("{line}");
                    }
                }
                ExecReply::Failure(message) => bail!(message),
            }
        }
        CliAction::Api => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read API request from stdin")?;
            let request: ApiRequest =
                serde_json::from_str(&raw).context("failed to parse API request JSON")?;

            let mut response = request.response;
            composition
                .process_api_usecase()
                .process(&request.params, &request.user, &mut response)
                .await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        CliAction::Locate { refresh } => {
            let usecase = composition.resolve_executable_usecase();
            let path = if refresh {
                usecase.refresh()?
            } else {
                usecase.executable()?
            };
            println!("{}", path.display());
        }
        CliAction::SetInterpreter(path) => {
            if !composition.resolve_executable_usecase().set_executable(&path)? {
                bail!("failed to store interpreter path {}", path.display());
            }
            println!("{}", path.display());
        }
        CliAction::Precheck => match composition.install_precheck_usecase().check().await {
            None => println!("ok"),
            Some(reason) => bail!(reason),
        },
        CliAction::Uninstall => {
            if !composition.uninstall_usecase().execute() {
                bail!("failed to clear cached interpreter path");
            }
        }
        CliAction::InspectConfig => {
            println!("{}", composition.inspect_config_usecase().execute()?);
        }
    }

    Ok(())
}
