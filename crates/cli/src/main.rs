mod camera;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use attend::UiEvent;
use clap::Parser;
use serde_json::Value;
use tracing::error;

use crate::cli::{Cli, Commands};
use crate::commands::CommandContext;
use crate::config::{ClientConfig, ConfigOverrides};
use crate::error::Result;
use crate::output::{ResultBuilder, print_result};

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let name = cli.command.name();
	let format = cli.format;
	let overrides = ConfigOverrides {
		api_url: cli.api_url,
		storage_path: cli.storage,
		config_path: cli.config,
	};

	let builder = ResultBuilder::<Value>::new(name);
	let mut events = Vec::new();
	let outcome = run(cli.command, &overrides, &mut events).await;
	let mut builder = builder.events(events);

	let code = match outcome {
		Ok(data) => {
			builder = builder.data(data);
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!(target = "attend", command = name, error = %err, "command failed");
			builder = builder.error(err.code(), err.user_message());
			ExitCode::FAILURE
		}
	};

	print_result(&builder.build(), format);
	code
}

async fn run(command: Commands, overrides: &ConfigOverrides, events: &mut Vec<UiEvent>) -> Result<Value> {
	let config = ClientConfig::resolve(overrides)?;
	let mut ctx = CommandContext::new(config, commands::frame_source(&command))?;
	let outcome = commands::dispatch(command, &mut ctx).await;
	*events = ctx.drain_events();
	outcome
}
