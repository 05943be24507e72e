use std::path::PathBuf;

use serde::Serialize;

/// Result data for login commands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
	pub route: String,
	pub authenticated: bool,
}

/// Result data for the status command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
	pub authenticated: bool,
	pub api_url: String,
	pub storage: PathBuf,
}

/// Result data for write commands whose backend reply is not shown.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
	pub action: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub target: Option<String>,
}

impl ActionData {
	pub fn new(action: &'static str) -> Self {
		Self { action, target: None }
	}

	pub fn with_target(mut self, target: impl Into<String>) -> Self {
		self.target = Some(target.into());
		self
	}
}
