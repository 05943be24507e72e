//! Display records derived from attendance and complaint resources.

use attend_protocol::{AttendanceRecord, Complaint, Location};
use serde::Serialize;

/// Attendance entries are always shown as taken at the office.
pub const OFFICE_LOCATION: &str = "Office";

const SUBJECT_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
	Login,
	Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityResult {
	Success,
	Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
	pub id: Option<String>,
	pub kind: ActivityKind,
	pub date: Option<String>,
	pub location: &'static str,
	pub result: ActivityResult,
}

impl From<&AttendanceRecord> for ActivityEntry {
	fn from(record: &AttendanceRecord) -> Self {
		let present = record.status == "Present";
		Self {
			id: record.id.clone(),
			kind: if present { ActivityKind::Login } else { ActivityKind::Logout },
			date: record.date.clone(),
			location: OFFICE_LOCATION,
			result: if present { ActivityResult::Success } else { ActivityResult::Failed },
		}
	}
}

/// Row of the administrator's attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
	pub id: Option<String>,
	pub full_name: String,
	pub department: String,
	pub last_seen: Option<String>,
	pub location: String,
	pub status: String,
}

impl From<&AttendanceRecord> for ReportEntry {
	fn from(record: &AttendanceRecord) -> Self {
		Self {
			id: record.id.clone(),
			full_name: record.full_name.clone().unwrap_or_else(|| "Unknown".to_string()),
			department: record.department.clone().unwrap_or_default(),
			last_seen: record.date.clone(),
			location: record.location.as_ref().map_or_else(|| Location::default().describe(), Location::describe),
			status: record.status.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplaintEntry {
	pub id: Option<String>,
	pub subject: String,
	pub description: String,
	pub status: String,
	pub time: Option<String>,
}

impl From<&Complaint> for ComplaintEntry {
	fn from(complaint: &Complaint) -> Self {
		Self {
			id: complaint.id.clone(),
			subject: complaint_subject(&complaint.description),
			description: complaint.description.clone(),
			status: complaint.status.clone(),
			time: complaint.time.clone(),
		}
	}
}

/// First 30 characters of `description`, with `...` appended when cut.
pub fn complaint_subject(description: &str) -> String {
	let mut chars = description.chars();
	let head: String = chars.by_ref().take(SUBJECT_CHARS).collect();
	if chars.next().is_some() { format!("{head}...") } else { head }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn present_maps_to_successful_login() {
		let record = AttendanceRecord {
			status: "Present".into(),
			..Default::default()
		};
		let entry = ActivityEntry::from(&record);
		assert_eq!(entry.kind, ActivityKind::Login);
		assert_eq!(entry.result, ActivityResult::Success);
		assert_eq!(entry.location, "Office");
	}

	#[test]
	fn anything_else_maps_to_failed_logout() {
		for status in ["Absent", "present", ""] {
			let record = AttendanceRecord {
				status: status.into(),
				..Default::default()
			};
			let entry = ActivityEntry::from(&record);
			assert_eq!((entry.kind, entry.result), (ActivityKind::Logout, ActivityResult::Failed));
		}
	}

	#[test]
	fn report_row_fills_unknown_name_and_location() {
		let record = AttendanceRecord {
			status: "Present".into(),
			location: Some(Location {
				city: Some("Lagos".into()),
				..Default::default()
			}),
			..Default::default()
		};
		let row = ReportEntry::from(&record);
		assert_eq!(row.full_name, "Unknown");
		assert_eq!(row.location, "Lagos, Unknown, Unknown");

		let bare = ReportEntry::from(&AttendanceRecord::default());
		assert_eq!(bare.location, "Unknown, Unknown, Unknown");
	}

	#[test]
	fn subject_truncates_after_thirty_characters() {
		assert_eq!(complaint_subject("short"), "short");
		let exact = "a".repeat(30);
		assert_eq!(complaint_subject(&exact), exact);
		assert_eq!(complaint_subject(&"b".repeat(31)), format!("{}...", "b".repeat(30)));
	}

	#[test]
	fn subject_counts_characters_not_bytes() {
		let text = "é".repeat(35);
		assert_eq!(complaint_subject(&text), format!("{}...", "é".repeat(30)));
	}
}
