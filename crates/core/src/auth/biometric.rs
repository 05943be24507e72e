use std::sync::Arc;

use attend_protocol::{EMPLOYEE_LOGIN_PATH, LOGIN_PHOTO_FILENAME, PHOTO_FIELD};
use attend_runtime::{ApiRequest, Transport};
use tracing::{debug, info};

use super::{Exchange, LoginOutcome, complete_exchange};
use crate::error::{self, AuthError, CaptureError};
use crate::media::{CapturedFrame, MediaController};
use crate::session::SessionStore;

/// Exchanges a captured face image for a session token.
///
/// Every entry point releases the camera before returning, whatever the
/// outcome.
#[derive(Clone)]
pub struct BiometricLogin {
	transport: Arc<dyn Transport>,
	session: SessionStore,
}

impl BiometricLogin {
	pub fn new(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
		Self { transport, session }
	}

	/// Submits `frame`, captured earlier through `media`.
	///
	/// # Errors
	///
	/// - [`AuthError::CaptureMissing`] when `frame` is `None`
	/// - [`AuthError::NoMatch`] when no enrolled identity matches
	/// - [`AuthError::Transport`] on network or server failure
	pub async fn login(&self, media: &mut MediaController, frame: Option<CapturedFrame>) -> Result<LoginOutcome, AuthError> {
		let _release = media.release_on_drop();
		let frame = frame.ok_or(AuthError::CaptureMissing)?;
		self.submit(&frame).await
	}

	/// Captures the current frame from `media` and submits it.
	///
	/// # Errors
	///
	/// - [`AuthError::CaptureMissing`] when the camera is not armed
	/// - [`Error::Capture`](crate::Error::Capture) when the device was lost or encoding failed
	/// - the exchange errors of [`BiometricLogin::login`]
	pub async fn capture_and_login(&self, media: &mut MediaController) -> error::Result<LoginOutcome> {
		let mut media = media.release_on_drop();
		let frame = match media.capture_frame().await {
			Ok(frame) => frame,
			Err(CaptureError::NotArmed) => return Err(AuthError::CaptureMissing.into()),
			Err(err) => {
				debug!(target = "attend.auth", error = %err, "capture failed before face login");
				return Err(err.into());
			}
		};
		Ok(self.submit(&frame).await?)
	}

	async fn submit(&self, frame: &CapturedFrame) -> Result<LoginOutcome, AuthError> {
		let request =
			ApiRequest::post(EMPLOYEE_LOGIN_PATH).with_multipart(vec![frame.to_form_part(PHOTO_FIELD, LOGIN_PHOTO_FILENAME)]);
		let outcome = complete_exchange(Exchange::Biometric, &self.session, self.transport.send(request).await)?;
		info!(target = "attend.auth", "face login succeeded");
		Ok(outcome)
	}
}
