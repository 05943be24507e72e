//! Application bootstrap: one session, one event channel, one gateway.

use std::sync::Arc;

use attend_runtime::Transport;

use crate::auth::{BiometricLogin, CredentialLogin};
use crate::gateway::AuthorizedGateway;
use crate::media::Camera;
use crate::session::{KeyValueStore, SessionStore};
use crate::ui::{self, Route, UiEvents, UiSender};
use crate::views::{AdminDashboard, EmployeeDashboard, LoginView};

/// Root of the object graph.
///
/// Views are built on demand and receive clones of the shared pieces, so
/// every view observes the same session.
#[derive(Clone)]
pub struct App {
	transport: Arc<dyn Transport>,
	session: SessionStore,
	camera: Camera,
	ui: UiSender,
	gateway: AuthorizedGateway,
}

impl App {
	/// Restores the persisted session from `storage` and returns the app with
	/// the receiving end of its event channel.
	pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn KeyValueStore>, camera: Camera) -> (Self, UiEvents) {
		let session = SessionStore::restore(storage);
		let (ui, events) = ui::channel();
		let gateway = AuthorizedGateway::new(transport.clone(), session.clone(), ui.clone());
		let app = Self {
			transport,
			session,
			camera,
			ui,
			gateway,
		};
		(app, events)
	}

	pub fn session(&self) -> &SessionStore {
		&self.session
	}

	pub fn gateway(&self) -> &AuthorizedGateway {
		&self.gateway
	}

	pub fn camera(&self) -> &Camera {
		&self.camera
	}

	pub fn ui(&self) -> &UiSender {
		&self.ui
	}

	pub fn credential_login(&self) -> CredentialLogin {
		CredentialLogin::new(self.transport.clone(), self.session.clone())
	}

	pub fn biometric_login(&self) -> BiometricLogin {
		BiometricLogin::new(self.transport.clone(), self.session.clone())
	}

	pub fn login_view(&self) -> LoginView {
		LoginView::new(self.camera.clone(), self.credential_login(), self.biometric_login(), self.ui.clone())
	}

	pub fn admin_dashboard(&self) -> AdminDashboard {
		AdminDashboard::new(self.gateway.clone(), self.camera.clone(), self.ui.clone())
	}

	pub fn employee_dashboard(&self) -> EmployeeDashboard {
		EmployeeDashboard::new(self.gateway.clone(), self.ui.clone())
	}

	/// Ends the session from outside any view.
	pub fn logout(&self) {
		self.session.clear();
		self.ui.success("Success", "Logged out successfully");
		self.ui.navigate(Route::Login);
	}
}
