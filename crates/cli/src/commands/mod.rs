//! Command dispatch.
//!
//! Every command runs against a freshly restored [`App`]: the session comes
//! back from the storage file, the command drives one view, and the view's
//! UI events are collected for the result envelope.

mod admin;
mod employee;
mod login;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use attend::{App, Camera, Error as AttendError, JsonFileStorage, LoadReport, Route, UiEvent, UiEvents};
use attend_runtime::HttpTransport;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::camera::FileCamera;
use crate::cli::{AdminAction, Commands, LoginMethod};
use crate::config::ClientConfig;
use crate::error::{CliError, Result};

/// Everything a command needs: the app graph, its event stream and the
/// resolved configuration.
pub struct CommandContext {
	pub app: App,
	pub config: ClientConfig,
	events: UiEvents,
}

impl CommandContext {
	/// Builds the app with `frame` as the camera's image source.
	pub fn new(config: ClientConfig, frame: Option<PathBuf>) -> Result<Self> {
		let transport = HttpTransport::new(&config.api_url, config.request_timeout).map_err(AttendError::from)?;
		let storage = JsonFileStorage::new(&config.storage_path);
		let camera = Camera::new(Arc::new(FileCamera::new(frame)));
		let (app, events) = App::new(Arc::new(transport), Arc::new(storage), camera);
		debug!(target = "attend.cli", authenticated = app.session().is_authenticated(), "app restored");
		Ok(Self { app, config, events })
	}

	/// UI events raised so far, in order.
	pub fn drain_events(&mut self) -> Vec<UiEvent> {
		self.events.drain()
	}

	/// Fails fast when no session is stored, redirecting to login the way a
	/// dashboard does on mount.
	fn require_session(&self) -> Result<()> {
		if self.app.session().is_authenticated() {
			return Ok(());
		}
		self.app.ui().navigate(Route::Login);
		Err(CliError::NotSignedIn)
	}
}

/// Image file the command hands to the camera, if any.
pub fn frame_source(command: &Commands) -> Option<PathBuf> {
	match command {
		Commands::Login {
			method: LoginMethod::Face { frame },
		} => Some(frame.clone()),
		Commands::Admin {
			action: AdminAction::Register(args),
		} => Some(args.photo.clone()),
		_ => None,
	}
}

pub async fn dispatch(command: Commands, ctx: &mut CommandContext) -> Result<Value> {
	match command {
		Commands::Login { method } => match method {
			LoginMethod::Admin { username, password } => login::admin(&username, &password, ctx).await,
			LoginMethod::Face { .. } => login::face(ctx).await,
		},
		Commands::Logout => session::logout(ctx),
		Commands::Status => session::status(ctx),
		Commands::Admin { action } => {
			ctx.require_session()?;
			admin::execute(action, ctx).await
		}
		Commands::Employee { action } => {
			ctx.require_session()?;
			employee::execute(action, ctx).await
		}
	}
}

/// Turns an applied load failure into the command's error.
fn settle(report: LoadReport) -> Result<()> {
	match report.applied_error() {
		Some(err) => Err(err.clone().into()),
		None => Ok(()),
	}
}

fn to_data<T: Serialize>(data: T) -> Result<Value> {
	serde_json::to_value(data).map_err(|err| CliError::Anyhow(err.into()))
}
