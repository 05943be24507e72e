use attend_protocol::{
	ADMIN_RECIPIENT, AttendanceRecord, Complaint, ComplaintDraft, EMPLOYEE_ACTIVITIES_PATH, EMPLOYEE_COMPLAINTS_PATH,
	EMPLOYEE_NOTIFICATIONS_PATH, EMPLOYEE_PROFILE_PATH, Employee, Notification, NotificationDraft, ProfileUpdate,
};
use attend_runtime::ApiRequest;
use serde::Serialize;
use tracing::debug;

use super::display::{ActivityEntry, ComplaintEntry};
use super::{get, notify_failure};
use crate::error::{Error, Result};
use crate::gateway::AuthorizedGateway;
use crate::loader::{LoadReport, LoadSlot};
use crate::ui::{Route, UiSender};

/// Employee dashboard.
///
/// The profile loads first; activities, notifications and complaints load
/// once the profile names an employee ID.
pub struct EmployeeDashboard {
	gateway: AuthorizedGateway,
	ui: UiSender,
	profile: LoadSlot<Employee>,
	activities: LoadSlot<Vec<AttendanceRecord>>,
	notifications: LoadSlot<Vec<Notification>>,
	complaints: LoadSlot<Vec<Complaint>>,
}

impl EmployeeDashboard {
	pub fn new(gateway: AuthorizedGateway, ui: UiSender) -> Self {
		Self {
			gateway,
			ui,
			profile: LoadSlot::new("employee-profile", "Failed to fetch profile"),
			activities: LoadSlot::new("activities", "Failed to fetch activities"),
			notifications: LoadSlot::new("employee-notifications", "Failed to fetch notifications"),
			complaints: LoadSlot::new("complaints", "Failed to fetch complaints"),
		}
	}

	pub fn profile(&self) -> &LoadSlot<Employee> {
		&self.profile
	}

	pub fn activities(&self) -> &LoadSlot<Vec<AttendanceRecord>> {
		&self.activities
	}

	pub fn notifications(&self) -> &LoadSlot<Vec<Notification>> {
		&self.notifications
	}

	pub fn complaints(&self) -> &LoadSlot<Vec<Complaint>> {
		&self.complaints
	}

	/// Redirects to login without a session; otherwise loads the profile and,
	/// once it names an employee, the dependent slots.
	pub async fn mount(&self) -> bool {
		if !self.gateway.session().is_authenticated() {
			debug!(target = "attend.views", "employee dashboard mounted without a session");
			self.ui.navigate(Route::Login);
			return false;
		}
		self.load_profile().await;
		if self.has_employee_id() {
			self.load_details().await;
		}
		true
	}

	fn has_employee_id(&self) -> bool {
		self.profile
			.with_value(|profile| profile.is_some_and(|p| !p.employee_id.is_empty()))
	}

	pub async fn load_profile(&self) -> LoadReport {
		let report = self.profile.load(get(&self.gateway, EMPLOYEE_PROFILE_PATH)).await;
		notify_failure(&self.ui, &self.profile, &report);
		report
	}

	/// Activities, notifications and complaints, in parallel.
	pub async fn load_details(&self) {
		tokio::join!(self.load_activities(), self.load_notifications(), self.load_complaints());
	}

	pub async fn load_activities(&self) -> LoadReport {
		let report = self.activities.load(get(&self.gateway, EMPLOYEE_ACTIVITIES_PATH)).await;
		notify_failure(&self.ui, &self.activities, &report);
		report
	}

	pub async fn load_notifications(&self) -> LoadReport {
		let report = self.notifications.load(get(&self.gateway, EMPLOYEE_NOTIFICATIONS_PATH)).await;
		notify_failure(&self.ui, &self.notifications, &report);
		report
	}

	pub async fn load_complaints(&self) -> LoadReport {
		let report = self.complaints.load(get(&self.gateway, EMPLOYEE_COMPLAINTS_PATH)).await;
		notify_failure(&self.ui, &self.complaints, &report);
		report
	}

	pub fn activity_entries(&self) -> Vec<ActivityEntry> {
		self.activities
			.with_value(|records| records.map(|r| r.iter().map(ActivityEntry::from).collect()))
			.unwrap_or_default()
	}

	pub fn complaint_entries(&self) -> Vec<ComplaintEntry> {
		self.complaints
			.with_value(|complaints| complaints.map(|c| c.iter().map(ComplaintEntry::from).collect()))
			.unwrap_or_default()
	}

	/// Editable copy of the loaded profile; empty when none is loaded.
	pub fn profile_form(&self) -> ProfileUpdate {
		self.profile.with_value(|profile| {
			profile
				.map(|p| ProfileUpdate {
					full_name: p.full_name.clone(),
					phone: p.phone.clone().unwrap_or_default(),
					email: p.email.clone(),
					department: p.department.clone(),
					employee_id: p.employee_id.clone(),
					address: p.address.clone().unwrap_or_default(),
				})
				.unwrap_or_default()
		})
	}

	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
		let request = ApiRequest::put(EMPLOYEE_PROFILE_PATH)
			.with_json(update)
			.map_err(|err| Error::InvalidInput(err.to_string()))?;
		if let Err(err) = self.gateway.execute(request).await {
			self.ui.error(err.notice_text("Failed to update profile"));
			return Err(err);
		}
		self.ui
			.success("Profile Updated", "Your profile information has been successfully updated.");
		self.load_profile().await;
		Ok(())
	}

	pub async fn submit_complaint(&self, description: &str) -> Result<()> {
		let description = description.trim();
		if description.is_empty() {
			return Err(self.reject_input("Please enter a complaint description"));
		}
		let draft = ComplaintDraft {
			description: description.to_string(),
		};
		self.post(EMPLOYEE_COMPLAINTS_PATH, &draft, "Failed to submit complaint").await?;
		self.ui
			.success("Complaint Submitted", "Your complaint has been sent to the administration.");
		self.load_complaints().await;
		Ok(())
	}

	/// Sends `message` to the administration.
	pub async fn send_notification(&self, message: &str) -> Result<()> {
		let message = message.trim();
		if message.is_empty() {
			return Err(self.reject_input("Please enter a notification message"));
		}
		let draft = NotificationDraft {
			to: ADMIN_RECIPIENT.to_string(),
			message: message.to_string(),
		};
		self.post(EMPLOYEE_NOTIFICATIONS_PATH, &draft, "Failed to send notification").await?;
		self.ui
			.success("Notification Sent", "Your message has been sent to the administrator.");
		self.load_notifications().await;
		Ok(())
	}

	pub fn logout(&self) {
		self.gateway.session().clear();
		self.ui.success("Success", "Logged out successfully");
		self.ui.navigate(Route::Login);
	}

	async fn post<B: Serialize>(&self, path: &'static str, body: &B, failure: &str) -> Result<()> {
		let request = ApiRequest::post(path)
			.with_json(body)
			.map_err(|err| Error::InvalidInput(err.to_string()))?;
		self.gateway.execute(request).await.inspect_err(|err| {
			self.ui.error(err.notice_text(failure));
		})
	}

	fn reject_input(&self, message: &str) -> Error {
		self.ui.error(message);
		Error::InvalidInput(message.to_string())
	}
}
