//! Events for the rendering layer: forced navigation and user notices.

use std::fmt;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::trace;

/// Top-level routes of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
	Login,
	Admin,
	Employee,
	ForgotPassword,
	ContactAdmin,
}

impl Route {
	pub fn path(self) -> &'static str {
		match self {
			Route::Login => "/login",
			Route::Admin => "/admin",
			Route::Employee => "/employee",
			Route::ForgotPassword => "/forgot-password",
			Route::ContactAdmin => "/contact-admin",
		}
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.path())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
	Success,
	Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	pub level: NoticeLevel,
	pub title: String,
	pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UiEvent {
	Navigate(Route),
	Notice(Notice),
}

/// Creates the single ordered event channel shared by every view.
pub fn channel() -> (UiSender, UiEvents) {
	let (tx, rx) = mpsc::unbounded_channel();
	(UiSender { tx }, UiEvents { rx })
}

/// Sending half, cloned into every component that may navigate or notify.
#[derive(Debug, Clone)]
pub struct UiSender {
	tx: mpsc::UnboundedSender<UiEvent>,
}

impl UiSender {
	fn emit(&self, event: UiEvent) {
		if self.tx.send(event).is_err() {
			trace!(target = "attend.ui", "renderer gone; dropping event");
		}
	}

	pub fn navigate(&self, route: Route) {
		self.emit(UiEvent::Navigate(route));
	}

	pub fn success(&self, title: impl Into<String>, message: impl Into<String>) {
		self.emit(UiEvent::Notice(Notice {
			level: NoticeLevel::Success,
			title: title.into(),
			message: message.into(),
		}));
	}

	pub fn error(&self, message: impl Into<String>) {
		self.emit(UiEvent::Notice(Notice {
			level: NoticeLevel::Error,
			title: "Error".to_string(),
			message: message.into(),
		}));
	}
}

/// Receiving half, owned by the rendering layer.
#[derive(Debug)]
pub struct UiEvents {
	rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl UiEvents {
	/// Waits for the next event; `None` once every sender is gone.
	pub async fn next(&mut self) -> Option<UiEvent> {
		self.rx.recv().await
	}

	/// Takes every event that is already queued.
	pub fn drain(&mut self) -> Vec<UiEvent> {
		let mut events = Vec::new();
		while let Ok(event) = self.rx.try_recv() {
			events.push(event);
		}
		events
	}
}

/// Number of navigations to `route` among `events`.
pub fn count_navigations(events: &[UiEvent], route: Route) -> usize {
	events.iter().filter(|e| **e == UiEvent::Navigate(route)).count()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn events_arrive_in_emission_order() {
		let (ui, mut events) = channel();
		ui.error("boom");
		ui.navigate(Route::Login);
		let drained = events.drain();
		assert_eq!(drained.len(), 2);
		assert!(matches!(&drained[0], UiEvent::Notice(n) if n.level == NoticeLevel::Error && n.message == "boom"));
		assert_eq!(drained[1], UiEvent::Navigate(Route::Login));
	}

	#[test]
	fn sending_after_receiver_drop_is_silent() {
		let (ui, events) = channel();
		drop(events);
		ui.navigate(Route::Admin);
	}

	#[test]
	fn route_paths() {
		assert_eq!(Route::Login.to_string(), "/login");
		assert_eq!(Route::ContactAdmin.path(), "/contact-admin");
	}
}
