use std::sync::Arc;

use attend_protocol::{ADMIN_LOGIN_PATH, CredentialLogin as CredentialPayload};
use attend_runtime::{ApiRequest, Transport};
use tracing::info;

use super::{Exchange, LoginOutcome, complete_exchange};
use crate::error::AuthError;
use crate::session::SessionStore;

/// Exchanges an administrator's username and password for a session token.
///
/// Rejections are reported once; there are no retries.
#[derive(Clone)]
pub struct CredentialLogin {
	transport: Arc<dyn Transport>,
	session: SessionStore,
}

impl CredentialLogin {
	pub fn new(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
		Self { transport, session }
	}

	/// # Errors
	///
	/// - [`AuthError::MissingField`] when either field is empty
	/// - [`AuthError::InvalidCredentials`] when the backend rejects the pair
	/// - [`AuthError::Transport`] on network or server failure
	pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginOutcome, AuthError> {
		let identifier = identifier.trim();
		if identifier.is_empty() {
			return Err(AuthError::MissingField("username"));
		}
		if secret.is_empty() {
			return Err(AuthError::MissingField("password"));
		}

		let payload = CredentialPayload {
			username: identifier.to_string(),
			password: secret.to_string(),
		};
		let request = ApiRequest::post(ADMIN_LOGIN_PATH)
			.with_json(&payload)
			.map_err(|err| AuthError::Transport(err.to_string()))?;

		let outcome = complete_exchange(Exchange::Credential, &self.session, self.transport.send(request).await)?;
		info!(target = "attend.auth", username = identifier, "credential login succeeded");
		Ok(outcome)
	}
}
