//! Request bodies for authorized write endpoints.

use serde::{Deserialize, Serialize};

/// Recipient used when an employee writes to the administration.
pub const ADMIN_RECIPIENT: &str = "admin";

/// Body of `POST /admin/notifications` and `POST /employee/notifications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDraft {
	pub to: String,
	pub message: String,
}

/// Body of `POST /employee/complaints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDraft {
	pub description: String,
}

/// Body of `PUT /employee/profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
	pub full_name: String,
	pub phone: String,
	pub email: String,
	pub department: String,
	pub employee_id: String,
	pub address: String,
}

/// Text fields of `POST /admin/register-employee`; the photo travels as a
/// separate multipart part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
	pub full_name: String,
	pub employee_id: String,
	pub department: String,
	pub email: String,
	pub address: String,
	pub phone: String,
}

impl RegistrationFields {
	/// Multipart text parts in the order the backend expects them.
	pub fn form_fields(&self) -> [(&'static str, &str); 6] {
		[
			("fullName", self.full_name.as_str()),
			("employeeId", self.employee_id.as_str()),
			("department", self.department.as_str()),
			("email", self.email.as_str()),
			("address", self.address.as_str()),
			("phone", self.phone.as_str()),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn profile_update_uses_camel_case() {
		let update = ProfileUpdate {
			full_name: "Ada".into(),
			employee_id: "E-1".into(),
			..Default::default()
		};
		let json = serde_json::to_value(&update).unwrap();
		assert_eq!(json["fullName"], "Ada");
		assert_eq!(json["employeeId"], "E-1");
	}

	#[test]
	fn registration_form_field_order() {
		let fields = RegistrationFields::default();
		let names: Vec<_> = fields.form_fields().iter().map(|(name, _)| *name).collect();
		assert_eq!(names, ["fullName", "employeeId", "department", "email", "address", "phone"]);
	}
}
