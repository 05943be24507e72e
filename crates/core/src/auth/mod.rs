//! Login executors: credential and face-capture exchanges for a session token.
//!
//! Both protocols share one contract: a successful response carries
//! `{ "token": "..." }`, which is deposited into the [`SessionStore`] before
//! the caller learns which route to navigate to.

mod biometric;
mod credential;

use attend_protocol::TokenGrant;
use attend_runtime::{ApiResponse, TransportError};
use tracing::warn;

pub use self::biometric::BiometricLogin;
pub use self::credential::CredentialLogin;
use crate::error::AuthError;
use crate::session::{SessionStore, SessionToken};
use crate::ui::Route;

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
	pub token: SessionToken,
	pub route: Route,
}

/// Which protocol produced the response; decides the rejection variant.
#[derive(Debug, Clone, Copy)]
enum Exchange {
	Credential,
	Biometric,
}

impl Exchange {
	fn rejected(self, message: String) -> AuthError {
		match self {
			Exchange::Credential => AuthError::InvalidCredentials(message),
			Exchange::Biometric => AuthError::NoMatch(message),
		}
	}

	fn default_rejection(self) -> &'static str {
		match self {
			Exchange::Credential => "Failed to log in. Please check your credentials.",
			Exchange::Biometric => "Face recognition failed. Please try again.",
		}
	}

	fn route(self) -> Route {
		match self {
			Exchange::Credential => Route::Admin,
			Exchange::Biometric => Route::Employee,
		}
	}
}

/// Maps a login response onto the token contract and stores the token.
///
/// Server errors and transport failures are [`AuthError::Transport`]; any
/// other non-2xx status is a rejection of what the user submitted.
fn complete_exchange(
	exchange: Exchange,
	session: &SessionStore,
	response: Result<ApiResponse, TransportError>,
) -> Result<LoginOutcome, AuthError> {
	let response = response.map_err(|err| {
		warn!(target = "attend.auth", ?exchange, error = %err, "login request failed");
		AuthError::Transport(err.to_string())
	})?;

	if response.is_server_error() {
		let message = response
			.error_message()
			.unwrap_or_else(|| format!("server returned {}", response.status));
		warn!(target = "attend.auth", ?exchange, status = response.status, "login backend failure");
		return Err(AuthError::Transport(message));
	}

	if !response.is_success() {
		let message = response
			.error_message()
			.unwrap_or_else(|| exchange.default_rejection().to_string());
		return Err(exchange.rejected(message));
	}

	let token = response
		.decode::<TokenGrant>()
		.ok()
		.and_then(TokenGrant::into_token)
		.and_then(SessionToken::new)
		.ok_or_else(|| AuthError::Transport("no token received from server".to_string()))?;

	session.set(token.clone());
	Ok(LoginOutcome {
		token,
		route: exchange.route(),
	})
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn run(exchange: Exchange, response: Result<ApiResponse, TransportError>) -> (SessionStore, Result<LoginOutcome, AuthError>) {
		let session = SessionStore::in_memory();
		let result = complete_exchange(exchange, &session, response);
		(session, result)
	}

	#[test]
	fn token_is_stored_before_returning() {
		let (session, result) = run(Exchange::Credential, Ok(ApiResponse::json(200, &json!({"token": "t1"}))));
		let outcome = result.unwrap();
		assert_eq!(outcome.route, Route::Admin);
		assert_eq!(session.current(), Some(outcome.token));
	}

	#[test]
	fn rejection_uses_backend_message() {
		let (session, result) = run(
			Exchange::Biometric,
			Ok(ApiResponse::json(401, &json!({"message": "Face not recognized"}))),
		);
		assert_eq!(result.unwrap_err(), AuthError::NoMatch("Face not recognized".into()));
		assert!(!session.is_authenticated());
	}

	#[test]
	fn rejection_without_payload_uses_default_text() {
		let (_, result) = run(Exchange::Credential, Ok(ApiResponse::new(400, Vec::new())));
		assert_eq!(
			result.unwrap_err(),
			AuthError::InvalidCredentials("Failed to log in. Please check your credentials.".into())
		);
	}

	#[test]
	fn server_error_is_transport() {
		let (_, result) = run(Exchange::Credential, Ok(ApiResponse::json(500, &json!("database down"))));
		assert_eq!(result.unwrap_err(), AuthError::Transport("database down".into()));
	}

	#[test]
	fn missing_token_is_transport() {
		let (session, result) = run(Exchange::Biometric, Ok(ApiResponse::json(200, &json!({"token": ""}))));
		assert_eq!(result.unwrap_err(), AuthError::Transport("no token received from server".into()));
		assert!(!session.is_authenticated());
	}

	#[test]
	fn network_failure_is_transport() {
		let (_, result) = run(Exchange::Credential, Err(TransportError::Timeout));
		assert!(matches!(result, Err(AuthError::Transport(_))));
	}
}
