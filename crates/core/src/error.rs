//! Error taxonomy for the orchestrator.
//!
//! Every failure here is recoverable: each variant maps to a user-facing
//! notice and leaves the camera idle, the session consistent, or a load slot
//! in a retryable `Failed` state.

use attend_runtime::TransportError;
use thiserror::Error;

use crate::media::Purpose;

/// Camera acquisition failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaError {
	/// Permission denied, no device, or the device went away.
	#[error("camera unavailable: {0}")]
	Unavailable(String),

	/// Another controller currently holds the device.
	#[error("camera is already in use for {0}")]
	Busy(Purpose),
}

/// Still-frame capture failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
	#[error("camera is not armed")]
	NotArmed,

	#[error("frame encoding produced no data")]
	EncodingFailed,

	/// The stream died while armed; the controller has already dropped to idle.
	#[error("camera lost while armed: {0}")]
	DeviceLost(String),
}

/// Login and session-validity failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
	#[error("{0} is required")]
	MissingField(&'static str),

	#[error("{0}")]
	InvalidCredentials(String),

	#[error("{0}")]
	NoMatch(String),

	#[error("no captured frame to submit")]
	CaptureMissing,

	#[error("session expired")]
	SessionExpired,

	#[error("login failed: {0}")]
	Transport(String),
}

/// Failures of authorized resource calls other than session expiry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
	/// Non-2xx other than 401/403. `message` is the backend's payload, if any.
	#[error("{}", .message.as_deref().unwrap_or(GENERIC_REJECTION))]
	BackendRejected { status: u16, message: Option<String> },

	#[error("transport failure: {0}")]
	Transport(String),

	#[error("unexpected response body: {0}")]
	Decode(String),
}

/// Persistent key/value storage failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
	#[error("storage I/O failed: {0}")]
	Io(String),

	#[error("storage file is corrupt: {0}")]
	Corrupt(String),
}

/// Crate-wide error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
	#[error(transparent)]
	Media(#[from] MediaError),

	#[error(transparent)]
	Capture(#[from] CaptureError),

	#[error(transparent)]
	Auth(#[from] AuthError),

	#[error(transparent)]
	Request(#[from] RequestError),

	#[error(transparent)]
	Storage(#[from] StorageError),

	#[error("please capture a photo")]
	PhotoMissing,

	#[error("{0}")]
	InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Generic text for rejections that carry no payload.
pub const GENERIC_REJECTION: &str = "The server rejected the request";

impl From<TransportError> for RequestError {
	fn from(err: TransportError) -> Self {
		RequestError::Transport(err.to_string())
	}
}

impl From<TransportError> for Error {
	fn from(err: TransportError) -> Self {
		Error::Request(err.into())
	}
}

impl MediaError {
	pub fn notice_text(&self) -> String {
		match self {
			MediaError::Unavailable(_) => "Failed to access webcam. Please ensure camera access is allowed.".to_string(),
			MediaError::Busy(purpose) => format!("The camera is busy with {purpose}. Close it there first."),
		}
	}
}

impl AuthError {
	pub fn notice_text(&self) -> String {
		match self {
			AuthError::InvalidCredentials(msg) | AuthError::NoMatch(msg) => msg.clone(),
			AuthError::CaptureMissing => "Failed to capture photo".to_string(),
			AuthError::SessionExpired => "Your session has expired. Please log in again.".to_string(),
			AuthError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
			AuthError::MissingField(_) => self.to_string(),
		}
	}
}

impl Error {
	/// True when the error means the user is no longer signed in.
	pub fn is_session_expired(&self) -> bool {
		matches!(self, Error::Auth(AuthError::SessionExpired))
	}

	/// User-facing text; `fallback` stands in for failures without a
	/// meaningful message of their own (transport and decode failures).
	pub fn notice_text(&self, fallback: &str) -> String {
		match self {
			Error::Media(err) => err.notice_text(),
			Error::Auth(err) => err.notice_text(),
			Error::Request(RequestError::BackendRejected { message: Some(message), .. }) => message.clone(),
			Error::Request(_) => fallback.to_string(),
			Error::Capture(CaptureError::DeviceLost(_)) => MediaError::Unavailable(String::new()).notice_text(),
			Error::Capture(_) => "Failed to capture photo".to_string(),
			Error::Storage(_) => fallback.to_string(),
			Error::PhotoMissing | Error::InvalidInput(_) => self.to_string(),
		}
	}
}
