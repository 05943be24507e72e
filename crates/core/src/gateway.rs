//! Bearer authorization and the uniform 401/403 policy.

use std::sync::Arc;

use attend_runtime::{ApiRequest, ApiResponse, Transport};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AuthError, Error, RequestError, Result};
use crate::session::SessionStore;
use crate::ui::{Route, UiSender};

/// Wraps every authorized backend call.
///
/// On a 401 or 403 the gateway clears the session, emits one navigation to
/// the login route and returns [`AuthError::SessionExpired`]. Callers never
/// see the original status.
#[derive(Clone)]
pub struct AuthorizedGateway {
	transport: Arc<dyn Transport>,
	session: SessionStore,
	ui: UiSender,
}

impl AuthorizedGateway {
	pub fn new(transport: Arc<dyn Transport>, session: SessionStore, ui: UiSender) -> Self {
		Self { transport, session, ui }
	}

	pub fn session(&self) -> &SessionStore {
		&self.session
	}

	/// Sends `request` with the current bearer token and returns the 2xx response.
	///
	/// # Errors
	///
	/// - [`AuthError::SessionExpired`] on 401/403, after the session is cleared
	/// - [`RequestError::BackendRejected`] on any other non-2xx status
	/// - [`RequestError::Transport`] when the backend is unreachable
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		let request = match self.session.current() {
			Some(token) => request.with_bearer(token.as_str()),
			None => request,
		};
		let route = request.route();

		let response = self.transport.send(request).await.map_err(|err| {
			warn!(target = "attend.gateway", %route, error = %err, "request failed in transport");
			Error::from(err)
		})?;

		if response.is_auth_failure() {
			warn!(target = "attend.gateway", %route, status = response.status, "authorization failed; ending session");
			self.session.clear();
			self.ui.navigate(Route::Login);
			return Err(AuthError::SessionExpired.into());
		}

		if !response.is_success() {
			let err = RequestError::BackendRejected {
				status: response.status,
				message: response.error_message(),
			};
			debug!(target = "attend.gateway", %route, status = response.status, error = %err, "backend rejected request");
			return Err(err.into());
		}

		debug!(target = "attend.gateway", %route, status = response.status, "ok");
		Ok(response)
	}

	/// [`send`](Self::send) and decode the JSON body as `T`.
	pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
		let response = self.send(request).await?;
		response
			.decode()
			.map_err(|err| RequestError::Decode(err.to_string()).into())
	}

	/// [`send`](Self::send) for calls whose body is not needed.
	pub async fn execute(&self, request: ApiRequest) -> Result<()> {
		self.send(request).await.map(drop)
	}
}

#[cfg(test)]
mod tests {
	use attend_runtime::Method;
	use attend_runtime::fake::FakeTransportBuilder;
	use serde_json::json;

	use super::*;
	use crate::error::GENERIC_REJECTION;
	use crate::session::SessionToken;
	use crate::ui::{self, UiEvent, count_navigations};

	fn signed_in_gateway() -> (AuthorizedGateway, attend_runtime::fake::FakeTransportController, ui::UiEvents) {
		let (transport, controller) = FakeTransportBuilder::new().build();
		let session = SessionStore::in_memory();
		session.set(SessionToken::new("tok").unwrap());
		let (ui, events) = ui::channel();
		(AuthorizedGateway::new(Arc::new(transport), session, ui), controller, events)
	}

	#[tokio::test]
	async fn attaches_bearer_token() {
		let (gateway, controller, _events) = signed_in_gateway();
		controller.reply(Method::Get, "/admin/profile", 200, json!({"username": "admin1"}));

		let profile: serde_json::Value = gateway.fetch(ApiRequest::get("/admin/profile")).await.unwrap();
		assert_eq!(profile["username"], "admin1");

		let sent = controller.last_sent_to(Method::Get, "/admin/profile").unwrap();
		assert_eq!(sent.bearer.as_deref(), Some("tok"));
	}

	#[tokio::test]
	async fn forbidden_clears_session_and_navigates_once() {
		let (gateway, controller, mut events) = signed_in_gateway();
		controller.reply(Method::Get, "/admin/employees", 403, json!("Invalid token"));

		let err = gateway.execute(ApiRequest::get("/admin/employees")).await.unwrap_err();
		assert!(err.is_session_expired());
		assert!(!gateway.session().is_authenticated());
		assert_eq!(events.drain(), vec![UiEvent::Navigate(Route::Login)]);
	}

	#[tokio::test]
	async fn unauthorized_behaves_like_forbidden() {
		let (gateway, controller, mut events) = signed_in_gateway();
		controller.reply(Method::Delete, "/admin/employees/E1", 401, json!({}));

		let err = gateway.execute(ApiRequest::delete("/admin/employees/E1")).await.unwrap_err();
		assert!(err.is_session_expired());
		assert_eq!(count_navigations(&events.drain(), Route::Login), 1);
	}

	#[tokio::test]
	async fn other_rejections_carry_backend_message() {
		let (gateway, controller, mut events) = signed_in_gateway();
		controller.reply(Method::Post, "/admin/register-employee", 400, json!("Employee ID or email already exists"));

		let err = gateway.execute(ApiRequest::post("/admin/register-employee")).await.unwrap_err();
		assert_eq!(
			err,
			Error::Request(RequestError::BackendRejected {
				status: 400,
				message: Some("Employee ID or email already exists".into()),
			})
		);
		assert!(gateway.session().is_authenticated());
		assert!(events.drain().is_empty());
	}

	#[tokio::test]
	async fn empty_rejection_has_generic_text() {
		let (gateway, controller, _events) = signed_in_gateway();
		controller.reply_raw(Method::Get, "/employee/profile", ApiResponse::new(500, Vec::new()));

		let err = gateway.execute(ApiRequest::get("/employee/profile")).await.unwrap_err();
		assert_eq!(
			err,
			Error::Request(RequestError::BackendRejected {
				status: 500,
				message: None,
			})
		);
		assert_eq!(err.to_string(), GENERIC_REJECTION);
	}

	#[tokio::test]
	async fn undecodable_body_is_decode_error() {
		let (gateway, controller, _events) = signed_in_gateway();
		controller.reply(Method::Get, "/admin/employees", 200, json!({"not": "a list"}));

		let err = gateway.fetch::<Vec<serde_json::Value>>(ApiRequest::get("/admin/employees")).await.unwrap_err();
		assert!(matches!(err, Error::Request(RequestError::Decode(_))));
	}
}
