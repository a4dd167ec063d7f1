mod diagnosis;
mod plants;
mod reminders;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use sprouty_core::{ApiResult, ClientConfig, ClientEvent, MemoryTokenStore, SproutyClient};
use tokio::sync::broadcast;

use crate::cli::{Cli, Command};
use crate::error::CliError;

const TOKEN_VAR: &str = "SPROUTY_AUTH_TOKEN";

/// Rendered command output and whether the operation succeeded.
pub struct CommandOutput {
    pub value: Value,
    pub success: bool,
}

impl CommandOutput {
    pub fn new<T: Serialize>(value: &T, success: bool) -> Result<Self, CliError> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            success,
        })
    }

    pub fn from_result(result: &ApiResult) -> Result<Self, CliError> {
        Self::new(result, result.success)
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let client = build_client(cli)?;
    let mut events = client.events().subscribe();

    let output = match &cli.command {
        Command::Reminders(command) => reminders::run(command, &client).await?,
        Command::Plants(command) => plants::run(command, &client).await?,
        Command::Diagnosis(command) => diagnosis::run(command, &client).await?,
    };

    report_events(&mut events);
    Ok(output)
}

fn build_client(cli: &Cli) -> Result<SproutyClient, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_base_url(api_url.as_str())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var(TOKEN_VAR).ok());
    let tokens = match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    };

    Ok(SproutyClient::with_reqwest(config, Arc::new(tokens)))
}

fn report_events(events: &mut broadcast::Receiver<ClientEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            ClientEvent::NetworkUnreachable { origin, api } => {
                tracing::warn!(%origin, %api, "backend unreachable; check connectivity or CORS settings");
            }
            ClientEvent::AuthExpired => {
                tracing::warn!("session expired; sign in again and pass a fresh --token");
            }
        }
    }
}
