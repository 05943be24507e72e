//! Resource records returned by authorized endpoints.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in administrator (`GET /admin/profile`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
	#[serde(default)]
	pub full_name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub department: String,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
}

/// Roster entry (`GET /admin/employees`) and employee self-profile
/// (`GET /employee/profile`); the backend uses one shape for both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	#[serde(default)]
	pub full_name: String,
	#[serde(default)]
	pub employee_id: String,
	#[serde(default)]
	pub department: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub last_seen: Option<String>,
}

/// Notification in either direction (admin <-> employee).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	#[serde(default)]
	pub from: String,
	#[serde(default)]
	pub to: Option<String>,
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub time: Option<String>,
}

/// Where an attendance record was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	#[serde(default)]
	pub city: Option<String>,
	#[serde(default)]
	pub region: Option<String>,
	#[serde(default)]
	pub country: Option<String>,
}

impl Location {
	/// `city, region, country` with `Unknown` for missing parts.
	pub fn describe(&self) -> String {
		let part = |p: &Option<String>| p.clone().unwrap_or_else(|| "Unknown".to_string());
		format!("{}, {}, {}", part(&self.city), part(&self.region), part(&self.country))
	}
}

/// Attendance entry (`GET /admin/attendance/today`, `GET /employee/attendance`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	#[serde(default)]
	pub employee_id: Option<String>,
	#[serde(default)]
	pub full_name: Option<String>,
	#[serde(default)]
	pub department: Option<String>,
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub date: Option<String>,
	#[serde(default)]
	pub location: Option<Location>,
}

/// Complaint filed by an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub time: Option<String>,
}
