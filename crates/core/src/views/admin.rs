use std::cmp::Ordering;

use attend_protocol::{
	ADMIN_EMPLOYEES_PATH, ADMIN_NOTIFICATIONS_PATH, ADMIN_PROFILE_PATH, AdminProfile, AttendanceRecord, ENROLLMENT_PHOTO_FILENAME,
	Employee, Notification, NotificationDraft, PHOTO_FIELD, REGISTER_EMPLOYEE_PATH, RegistrationFields, TODAY_ATTENDANCE_PATH,
	employee_path,
};
use attend_runtime::{ApiRequest, FormPart};
use serde::Serialize;
use tracing::{debug, info};

use super::display::ReportEntry;
use super::{get, notify_failure};
use crate::error::{Error, RequestError, Result};
use crate::gateway::AuthorizedGateway;
use crate::loader::{LoadReport, LoadSlot};
use crate::media::{Camera, CapturedFrame, MediaController, MediaState, Purpose};
use crate::ui::{Route, UiSender};

const DUPLICATE_EMPLOYEE: &str = "Employee ID or email already exists";
const DUPLICATE_EMPLOYEE_NOTICE: &str = "Employee ID or email is already registered";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminSection {
	#[default]
	Profile,
	Employees,
	Notifications,
	Reports,
	AddEmployee,
}

/// Roster ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
	#[default]
	Name,
	Department,
	Email,
}

impl SortKey {
	fn compare(self, a: &Employee, b: &Employee) -> Ordering {
		match self {
			SortKey::Name => a.full_name.cmp(&b.full_name),
			SortKey::Department => a.department.cmp(&b.department),
			SortKey::Email => a.email.cmp(&b.email),
		}
	}
}

/// Administrator dashboard.
///
/// Owns one camera controller, armed only while the add-employee section is
/// active.
pub struct AdminDashboard {
	gateway: AuthorizedGateway,
	ui: UiSender,
	media: MediaController,
	section: AdminSection,
	profile: LoadSlot<AdminProfile>,
	roster: LoadSlot<Vec<Employee>>,
	notifications: LoadSlot<Vec<Notification>>,
	attendance: LoadSlot<Vec<AttendanceRecord>>,
	enrollment_photo: Option<CapturedFrame>,
}

impl AdminDashboard {
	pub fn new(gateway: AuthorizedGateway, camera: Camera, ui: UiSender) -> Self {
		Self {
			gateway,
			ui,
			media: MediaController::new(camera),
			section: AdminSection::default(),
			profile: LoadSlot::new("admin-profile", "Failed to fetch profile"),
			roster: LoadSlot::new("roster", "Failed to fetch employees"),
			notifications: LoadSlot::new("admin-notifications", "Failed to fetch notifications"),
			attendance: LoadSlot::new("today-attendance", "Failed to fetch today's attendance"),
			enrollment_photo: None,
		}
	}

	pub fn section(&self) -> AdminSection {
		self.section
	}

	pub fn media_state(&self) -> MediaState {
		self.media.state()
	}

	pub fn profile(&self) -> &LoadSlot<AdminProfile> {
		&self.profile
	}

	pub fn roster(&self) -> &LoadSlot<Vec<Employee>> {
		&self.roster
	}

	pub fn notifications(&self) -> &LoadSlot<Vec<Notification>> {
		&self.notifications
	}

	pub fn attendance(&self) -> &LoadSlot<Vec<AttendanceRecord>> {
		&self.attendance
	}

	pub fn enrollment_photo(&self) -> Option<&CapturedFrame> {
		self.enrollment_photo.as_ref()
	}

	/// Redirects to login without a session; otherwise loads every slot.
	///
	/// Returns whether the dashboard is signed in.
	pub async fn mount(&mut self) -> bool {
		if !self.gateway.session().is_authenticated() {
			debug!(target = "attend.views", "admin dashboard mounted without a session");
			self.ui.navigate(Route::Login);
			return false;
		}
		self.refresh().await;
		true
	}

	/// Loads profile, roster and notifications in parallel, plus today's
	/// attendance when the reports section is active.
	pub async fn refresh(&self) {
		let reports = self.section == AdminSection::Reports;
		tokio::join!(self.load_profile(), self.load_roster(), self.load_notifications(), async {
			if reports {
				self.load_attendance().await;
			}
		});
	}

	pub async fn load_profile(&self) -> LoadReport {
		let report = self.profile.load(get(&self.gateway, ADMIN_PROFILE_PATH)).await;
		notify_failure(&self.ui, &self.profile, &report);
		report
	}

	pub async fn load_roster(&self) -> LoadReport {
		let report = self.roster.load(get(&self.gateway, ADMIN_EMPLOYEES_PATH)).await;
		notify_failure(&self.ui, &self.roster, &report);
		report
	}

	pub async fn load_notifications(&self) -> LoadReport {
		let report = self.notifications.load(get(&self.gateway, ADMIN_NOTIFICATIONS_PATH)).await;
		notify_failure(&self.ui, &self.notifications, &report);
		report
	}

	pub async fn load_attendance(&self) -> LoadReport {
		let report = self.attendance.load(get(&self.gateway, TODAY_ATTENDANCE_PATH)).await;
		notify_failure(&self.ui, &self.attendance, &report);
		report
	}

	/// Moves to `section`, releasing or arming the camera as needed.
	///
	/// Leaving the add-employee section discards the draft photo. A camera
	/// failure raises a notice; the section still changes.
	pub async fn switch_section(&mut self, section: AdminSection) -> Result<()> {
		if section == self.section {
			return Ok(());
		}
		if self.section == AdminSection::AddEmployee {
			self.media.release();
			self.enrollment_photo = None;
		}
		self.section = section;

		match section {
			AdminSection::AddEmployee => {
				if let Err(err) = self.media.acquire(Purpose::Enrollment).await {
					self.ui.error(err.notice_text());
					return Err(err.into());
				}
			}
			AdminSection::Reports => {
				self.load_attendance().await;
			}
			_ => {}
		}
		Ok(())
	}

	/// Captures the enrollment photo, replacing any earlier capture.
	pub async fn capture_enrollment_photo(&mut self) -> Result<()> {
		match self.media.capture_frame().await {
			Ok(frame) => {
				self.enrollment_photo = Some(frame);
				self.ui.success("Success", "Photo captured successfully");
				Ok(())
			}
			Err(err) => {
				let err = Error::from(err);
				self.ui.error(err.notice_text("Failed to capture photo"));
				Err(err)
			}
		}
	}

	/// Submits a new roster entry with the captured photo.
	pub async fn register_employee(&mut self, fields: RegistrationFields) -> Result<()> {
		let Some(photo) = self.enrollment_photo.as_ref() else {
			self.ui.error(Error::PhotoMissing.to_string());
			return Err(Error::PhotoMissing);
		};
		let required = [&fields.full_name, &fields.employee_id, &fields.department, &fields.email];
		if required.iter().any(|value| value.trim().is_empty()) {
			let err = Error::InvalidInput("Please fill in all required fields".to_string());
			self.ui.error(err.to_string());
			return Err(err);
		}

		let mut parts: Vec<FormPart> = fields
			.form_fields()
			.into_iter()
			.map(|(name, value)| FormPart::text(name, value))
			.collect();
		parts.push(photo.to_form_part(PHOTO_FIELD, ENROLLMENT_PHOTO_FILENAME));

		let request = ApiRequest::post(REGISTER_EMPLOYEE_PATH).with_multipart(parts);
		if let Err(err) = self.gateway.execute(request).await {
			let message = match &err {
				Error::Request(RequestError::BackendRejected {
					message: Some(message), ..
				}) if message == DUPLICATE_EMPLOYEE => {
					DUPLICATE_EMPLOYEE_NOTICE.to_string()
				}
				other => other.notice_text("Failed to register employee"),
			};
			self.ui.error(message);
			return Err(err);
		}

		info!(target = "attend.views", employee_id = %fields.employee_id, "employee registered");
		self.ui.success("Success", format!("{} has been registered", fields.full_name));
		self.enrollment_photo = None;
		self.load_roster().await;
		Ok(())
	}

	pub async fn delete_employee(&self, employee_id: &str) -> Result<()> {
		let Some(path) = employee_path(employee_id) else {
			let err = Error::InvalidInput("Please select an employee to delete".to_string());
			self.ui.error(err.to_string());
			return Err(err);
		};
		let request = ApiRequest::delete(path);
		if let Err(err) = self.gateway.execute(request).await {
			self.ui.error(err.notice_text("Failed to delete employee"));
			return Err(err);
		}
		self.ui.success("Success", format!("Employee {employee_id} deleted successfully"));
		self.load_roster().await;
		Ok(())
	}

	/// Sends a notification to the employee identified by `to`.
	pub async fn send_notification(&self, to: &str, message: &str) -> Result<()> {
		if to.trim().is_empty() || message.trim().is_empty() {
			let err = Error::InvalidInput("Please select an employee and enter a message".to_string());
			self.ui.error(err.to_string());
			return Err(err);
		}

		let draft = NotificationDraft {
			to: to.to_string(),
			message: message.to_string(),
		};
		let request = ApiRequest::post(ADMIN_NOTIFICATIONS_PATH)
			.with_json(&draft)
			.map_err(|err| Error::InvalidInput(err.to_string()))?;
		if let Err(err) = self.gateway.execute(request).await {
			self.ui.error(err.notice_text("Failed to send notification"));
			return Err(err);
		}
		self.ui.success("Success", "Notification sent");
		self.load_notifications().await;
		Ok(())
	}

	/// Today's attendance as report rows.
	pub fn report_entries(&self) -> Vec<ReportEntry> {
		self.attendance
			.with_value(|records| records.map(|r| r.iter().map(ReportEntry::from).collect()))
			.unwrap_or_default()
	}

	/// Current roster ordered by `key`.
	pub fn sorted_employees(&self, key: SortKey) -> Vec<Employee> {
		let mut employees = self.roster.value().unwrap_or_default();
		employees.sort_by(|a, b| key.compare(a, b));
		employees
	}

	pub fn logout(&mut self) {
		self.media.release();
		self.enrollment_photo = None;
		self.gateway.session().clear();
		self.ui.success("Success", "Logged out successfully");
		self.ui.navigate(Route::Login);
	}
}
