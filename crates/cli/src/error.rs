use std::path::PathBuf;

use attend::{AuthError, Error as AttendError, RequestError};
use thiserror::Error;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Attend(#[from] AttendError),

	#[error("not signed in; run `attend login` first")]
	NotSignedIn,

	#[error("invalid config file {path}: {message}")]
	Config { path: PathBuf, message: String },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl From<AuthError> for CliError {
	fn from(err: AuthError) -> Self {
		CliError::Attend(err.into())
	}
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Attend(err) => match err {
				AttendError::Auth(AuthError::SessionExpired) => ErrorCode::SessionExpired,
				AttendError::Auth(AuthError::Transport(_)) => ErrorCode::NetworkError,
				AttendError::Auth(AuthError::MissingField(_)) => ErrorCode::InvalidInput,
				AttendError::Auth(_) => ErrorCode::AuthError,
				AttendError::Media(_) | AttendError::Capture(_) => ErrorCode::CameraError,
				AttendError::Request(RequestError::BackendRejected { .. }) => ErrorCode::BackendRejected,
				AttendError::Request(RequestError::Transport(_)) => ErrorCode::NetworkError,
				AttendError::Request(RequestError::Decode(_)) => ErrorCode::InternalError,
				AttendError::Storage(_) => ErrorCode::IoError,
				AttendError::PhotoMissing | AttendError::InvalidInput(_) => ErrorCode::InvalidInput,
			},
			CliError::NotSignedIn => ErrorCode::SessionExpired,
			CliError::Config { .. } => ErrorCode::InvalidInput,
			CliError::Io(_) => ErrorCode::IoError,
			CliError::Anyhow(_) => ErrorCode::InternalError,
		}
	}

	/// Message shown to the user; orchestrator errors use their notice text.
	pub fn user_message(&self) -> String {
		match self {
			CliError::Attend(err) => err.notice_text(&err.to_string()),
			other => other.to_string(),
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
	use attend::MediaError;

	use super::*;

	#[test]
	fn session_expiry_has_its_own_code() {
		let err = CliError::from(AuthError::SessionExpired);
		assert_eq!(err.code(), ErrorCode::SessionExpired);
		assert_eq!(err.user_message(), "Your session has expired. Please log in again.");
	}

	#[test]
	fn rejection_message_comes_from_backend() {
		let err = CliError::Attend(AttendError::Request(RequestError::BackendRejected {
			status: 404,
			message: Some("Employee not found".into()),
		}));
		assert_eq!(err.code(), ErrorCode::BackendRejected);
		assert_eq!(err.user_message(), "Employee not found");
	}

	#[test]
	fn camera_failures_map_to_camera_code() {
		let err = CliError::Attend(MediaError::Unavailable("no such file".into()).into());
		assert_eq!(err.code(), ErrorCode::CameraError);
	}
}
