//! Shared wiring for the orchestrator integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Poll;

use attend::media::fake::FakeCamera;
use attend::{App, Camera, KeyValueStore, MemoryStorage, TOKEN_KEY, UiEvent, UiEvents};
use attend_runtime::fake::{FakeTransportBuilder, FakeTransportController};
use serde_json::{Value, json};

pub struct Harness {
	pub app: App,
	pub events: UiEvents,
	pub server: FakeTransportController,
	pub camera: FakeCamera,
	pub storage: Arc<MemoryStorage>,
}

impl Harness {
	pub fn signed_out() -> Self {
		Self::with_storage(MemoryStorage::new())
	}

	pub fn signed_in(token: &str) -> Self {
		Self::with_storage(MemoryStorage::with_entry(TOKEN_KEY, token))
	}

	fn with_storage(storage: MemoryStorage) -> Self {
		let (transport, server) = FakeTransportBuilder::new().build();
		let camera = FakeCamera::new();
		let storage = Arc::new(storage);
		let (app, events) = App::new(
			Arc::new(transport),
			storage.clone() as Arc<dyn KeyValueStore>,
			Camera::new(Arc::new(camera.clone())),
		);
		Self {
			app,
			events,
			server,
			camera,
			storage,
		}
	}

	pub fn drain(&mut self) -> Vec<UiEvent> {
		self.events.drain()
	}

	pub fn persisted_token(&self) -> Option<String> {
		self.storage.get(TOKEN_KEY).unwrap()
	}
}

pub fn employee(name: &str, id: &str, department: &str, email: &str) -> Value {
	json!({
		"_id": format!("oid-{id}"),
		"fullName": name,
		"employeeId": id,
		"department": department,
		"email": email,
	})
}

/// Polls `fut` exactly once.
pub async fn poll_once<F: Future + Unpin>(fut: &mut F) -> Poll<F::Output> {
	std::future::poll_fn(|cx| Poll::Ready(Pin::new(&mut *fut).poll(cx))).await
}

pub fn error_notices(events: &[UiEvent]) -> Vec<String> {
	events
		.iter()
		.filter_map(|event| match event {
			UiEvent::Notice(notice) if notice.level == attend::NoticeLevel::Error => Some(notice.message.clone()),
			_ => None,
		})
		.collect()
}
