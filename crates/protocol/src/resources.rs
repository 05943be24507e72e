//! Paths of the bearer-authorized resource endpoints.

pub const ADMIN_PROFILE_PATH: &str = "/admin/profile";
pub const ADMIN_EMPLOYEES_PATH: &str = "/admin/employees";
pub const ADMIN_NOTIFICATIONS_PATH: &str = "/admin/notifications";
pub const TODAY_ATTENDANCE_PATH: &str = "/admin/attendance/today";
pub const REGISTER_EMPLOYEE_PATH: &str = "/admin/register-employee";

pub const EMPLOYEE_PROFILE_PATH: &str = "/employee/profile";
pub const EMPLOYEE_ACTIVITIES_PATH: &str = "/employee/attendance";
pub const EMPLOYEE_NOTIFICATIONS_PATH: &str = "/employee/notifications";
pub const EMPLOYEE_COMPLAINTS_PATH: &str = "/employee/complaints";

/// `DELETE` target for one roster entry.
///
/// The ID is percent-encoded into a single path segment. Blank IDs and the
/// dot segments `.` and `..` address no entry and yield `None`.
pub fn employee_path(employee_id: &str) -> Option<String> {
	let id = employee_id.trim();
	if id.is_empty() || id == "." || id == ".." {
		return None;
	}
	Some(format!("{ADMIN_EMPLOYEES_PATH}/{}", urlencoding::encode(id)))
}
