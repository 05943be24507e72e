use serde::Serialize;
use tracing::debug;

use crate::auth::{BiometricLogin, CredentialLogin, LoginOutcome};
use crate::error::Result;
use crate::media::{Camera, MediaController, MediaState, Purpose};
use crate::ui::{Route, UiSender};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginTab {
	#[default]
	Admin,
	Employee,
}

/// Login screen: an admin credential form and an employee face scanner.
///
/// The camera is armed only while the employee tab is selected.
pub struct LoginView {
	tab: LoginTab,
	media: MediaController,
	credential: CredentialLogin,
	biometric: BiometricLogin,
	ui: UiSender,
}

impl LoginView {
	pub fn new(camera: Camera, credential: CredentialLogin, biometric: BiometricLogin, ui: UiSender) -> Self {
		Self {
			tab: LoginTab::default(),
			media: MediaController::new(camera),
			credential,
			biometric,
			ui,
		}
	}

	pub fn tab(&self) -> LoginTab {
		self.tab
	}

	pub fn media_state(&self) -> MediaState {
		self.media.state()
	}

	/// Switches tabs; the employee tab arms the camera, the admin tab releases it.
	///
	/// A camera failure raises a notice and leaves the tab selected but idle.
	pub async fn select_tab(&mut self, tab: LoginTab) -> Result<()> {
		self.tab = tab;
		match tab {
			LoginTab::Admin => {
				self.media.release();
				Ok(())
			}
			LoginTab::Employee => {
				if let Err(err) = self.media.acquire(Purpose::BiometricLogin).await {
					self.ui.error(err.notice_text());
					return Err(err.into());
				}
				Ok(())
			}
		}
	}

	pub async fn admin_login(&mut self, identifier: &str, secret: &str) -> Result<LoginOutcome> {
		match self.credential.login(identifier, secret).await {
			Ok(outcome) => {
				self.ui.success("Success", "Logged in successfully");
				self.ui.navigate(outcome.route);
				Ok(outcome)
			}
			Err(err) => {
				self.ui.error(err.notice_text());
				Err(err.into())
			}
		}
	}

	/// Captures the current frame and submits it. The camera is idle afterwards.
	pub async fn face_login(&mut self) -> Result<LoginOutcome> {
		let result = self.biometric.capture_and_login(&mut self.media).await;
		debug!(target = "attend.auth", armed = self.media.is_armed(), "face login attempt finished");
		match result {
			Ok(outcome) => {
				self.ui.success("Face Recognition Successful", "Welcome back! Redirecting to your dashboard...");
				self.ui.navigate(outcome.route);
				Ok(outcome)
			}
			Err(err) => {
				self.ui.error(err.notice_text("Failed to capture photo"));
				Err(err)
			}
		}
	}

	pub fn forgot_password(&self) {
		self.ui.navigate(Route::ForgotPassword);
	}

	pub fn contact_admin(&self) {
		self.ui.navigate(Route::ContactAdmin);
	}

	/// Unmount without dropping: releases the camera.
	pub fn leave(&mut self) {
		self.media.release();
	}
}
