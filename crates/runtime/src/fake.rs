//! Fake transport for unit testing session and authorization policy.
//!
//! Provides an in-memory transport so the orchestrator can be exercised
//! without a backend.
//!
//! # Example
//!
//! ```ignore
//! let (transport, controller) = FakeTransportBuilder::new().build();
//! controller.reply(Method::Post, "/admin/login", 200, json!({"token": "t1"}));
//!
//! let pending = controller.defer(Method::Get, "/admin/employees");
//! let fut = transport.send(ApiRequest::get("/admin/employees"));
//! pending.respond(200, json!([]));
//! let response = fut.await?;
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use tokio::sync::oneshot;

use crate::request::{ApiRequest, ApiResponse, Method};
use crate::transport::{Transport, TransportError};

type Reply = Result<ApiResponse, TransportError>;

enum Scripted {
	Ready(Reply),
	Deferred(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct FakeState {
	routes: HashMap<(Method, String), VecDeque<Scripted>>,
	sent: Vec<ApiRequest>,
	fallback: Option<ApiResponse>,
}

/// Builder for creating fake transport instances.
#[derive(Default)]
pub struct FakeTransportBuilder {
	fallback: Option<ApiResponse>,
}

impl FakeTransportBuilder {
	/// Create a new fake transport builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Reply used for routes with nothing scripted, instead of failing with
	/// [`TransportError::Unroutable`].
	pub fn fallback(mut self, response: ApiResponse) -> Self {
		self.fallback = Some(response);
		self
	}

	/// Build the fake transport and return both the transport and a controller.
	pub fn build(self) -> (FakeTransport, FakeTransportController) {
		let state = Arc::new(Mutex::new(FakeState {
			fallback: self.fallback,
			..FakeState::default()
		}));
		(
			FakeTransport { state: Arc::clone(&state) },
			FakeTransportController { state },
		)
	}
}

/// In-memory [`Transport`]; replies come from the paired controller.
#[derive(Clone)]
pub struct FakeTransport {
	state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl Transport for FakeTransport {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
		let key = (request.method, request.path.clone());
		let route = request.route();

		let scripted = {
			let mut state = self.state.lock();
			state.sent.push(request);
			match state.routes.get_mut(&key).and_then(VecDeque::pop_front) {
				Some(scripted) => scripted,
				None => match &state.fallback {
					Some(response) => Scripted::Ready(Ok(response.clone())),
					None => return Err(TransportError::Unroutable(route)),
				},
			}
		};

		match scripted {
			Scripted::Ready(reply) => reply,
			Scripted::Deferred(rx) => rx.await.map_err(|_| TransportError::Closed)?,
		}
	}
}

/// Handle for completing a deferred reply at a time chosen by the test.
pub struct DeferredReply {
	tx: oneshot::Sender<Reply>,
}

impl DeferredReply {
	/// Completes the pending request with a JSON response.
	pub fn respond(self, status: u16, body: JsonValue) {
		let _ = self.tx.send(Ok(ApiResponse::json(status, &body)));
	}

	/// Completes the pending request with a transport failure.
	pub fn fail(self, error: TransportError) {
		let _ = self.tx.send(Err(error));
	}
}

/// Controller for scripting replies and inspecting sent requests.
#[derive(Clone)]
pub struct FakeTransportController {
	state: Arc<Mutex<FakeState>>,
}

impl FakeTransportController {
	fn push(&self, method: Method, path: &str, scripted: Scripted) {
		self.state
			.lock()
			.routes
			.entry((method, path.to_string()))
			.or_default()
			.push_back(scripted);
	}

	/// Queues a JSON reply for the next request to `method path`.
	pub fn reply(&self, method: Method, path: &str, status: u16, body: JsonValue) {
		self.push(method, path, Scripted::Ready(Ok(ApiResponse::json(status, &body))));
	}

	/// Queues a raw reply.
	pub fn reply_raw(&self, method: Method, path: &str, response: ApiResponse) {
		self.push(method, path, Scripted::Ready(Ok(response)));
	}

	/// Queues a transport failure.
	pub fn fail(&self, method: Method, path: &str, error: TransportError) {
		self.push(method, path, Scripted::Ready(Err(error)));
	}

	/// Queues a reply that resolves only when the returned handle is used.
	pub fn defer(&self, method: Method, path: &str) -> DeferredReply {
		let (tx, rx) = oneshot::channel();
		self.push(method, path, Scripted::Deferred(rx));
		DeferredReply { tx }
	}

	/// Snapshot of every request sent so far.
	pub fn sent(&self) -> Vec<ApiRequest> {
		self.state.lock().sent.clone()
	}

	/// Number of requests sent to `method path`.
	pub fn sent_to(&self, method: Method, path: &str) -> usize {
		self.state
			.lock()
			.sent
			.iter()
			.filter(|r| r.method == method && r.path == path)
			.count()
	}

	/// Most recent request sent to `method path`.
	pub fn last_sent_to(&self, method: Method, path: &str) -> Option<ApiRequest> {
		self.state
			.lock()
			.sent
			.iter()
			.rev()
			.find(|r| r.method == method && r.path == path)
			.cloned()
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn replies_in_queue_order_and_records_requests() {
		let (transport, controller) = FakeTransportBuilder::new().build();
		controller.reply(Method::Get, "/a", 200, json!(1));
		controller.reply(Method::Get, "/a", 500, json!("boom"));

		let first = transport.send(ApiRequest::get("/a")).await.unwrap();
		let second = transport.send(ApiRequest::get("/a").with_bearer("t")).await.unwrap();

		assert_eq!(first.status, 200);
		assert_eq!(second.status, 500);
		assert_eq!(controller.sent_to(Method::Get, "/a"), 2);
		assert_eq!(controller.last_sent_to(Method::Get, "/a").unwrap().bearer.as_deref(), Some("t"));
	}

	#[tokio::test]
	async fn unscripted_route_is_unroutable() {
		let (transport, _controller) = FakeTransportBuilder::new().build();
		let err = transport.send(ApiRequest::delete("/x")).await.unwrap_err();
		assert_eq!(err, TransportError::Unroutable("DELETE /x".into()));
	}

	#[tokio::test]
	async fn fallback_answers_unscripted_routes() {
		let (transport, _controller) = FakeTransportBuilder::new().fallback(ApiResponse::new(204, "")).build();
		let response = transport.send(ApiRequest::get("/anything")).await.unwrap();
		assert_eq!(response.status, 204);
	}

	#[tokio::test]
	async fn deferred_reply_waits_for_release() {
		let (transport, controller) = FakeTransportBuilder::new().build();
		let pending = controller.defer(Method::Get, "/slow");

		let task = tokio::spawn({
			let transport = transport.clone();
			async move { transport.send(ApiRequest::get("/slow")).await }
		});
		tokio::task::yield_now().await;
		assert!(!task.is_finished());

		pending.respond(200, json!({"ok": true}));
		let response = task.await.unwrap().unwrap();
		assert_eq!(response.decode::<JsonValue>().unwrap()["ok"], true);
	}

	#[tokio::test]
	async fn dropped_deferred_reply_closes_request() {
		let (transport, controller) = FakeTransportBuilder::new().build();
		drop(controller.defer(Method::Get, "/gone"));
		let err = transport.send(ApiRequest::get("/gone")).await.unwrap_err();
		assert_eq!(err, TransportError::Closed);
	}
}
