//! Login payloads shared by the credential and biometric flows.

use serde::{Deserialize, Serialize};

/// Credential login endpoint.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
/// Biometric (face) login endpoint.
pub const EMPLOYEE_LOGIN_PATH: &str = "/employee/login";

/// Multipart field carrying the captured face image.
pub const PHOTO_FIELD: &str = "photo";
/// File name attached to a login capture.
pub const LOGIN_PHOTO_FILENAME: &str = "photo.jpg";
/// File name attached to an enrollment capture.
pub const ENROLLMENT_PHOTO_FILENAME: &str = "employee.jpg";

/// Body of `POST /admin/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialLogin {
	pub username: String,
	pub password: String,
}

/// Token issued by either login endpoint.
///
/// The backend has been observed to answer 2xx without a token, so the field
/// stays optional on the wire and is validated by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
	#[serde(default)]
	pub token: Option<String>,
}

impl TokenGrant {
	/// Returns the token when it is present and non-blank.
	pub fn into_token(self) -> Option<String> {
		self.token.filter(|t| !t.trim().is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn credential_login_serializes_backend_field_names() {
		let body = CredentialLogin {
			username: "admin1".into(),
			password: "correct".into(),
		};
		let json = serde_json::to_value(&body).unwrap();
		assert_eq!(json, serde_json::json!({"username": "admin1", "password": "correct"}));
	}

	#[test]
	fn token_grant_rejects_missing_and_blank_tokens() {
		let missing: TokenGrant = serde_json::from_str("{}").unwrap();
		assert_eq!(missing.into_token(), None);

		let blank: TokenGrant = serde_json::from_str(r#"{"token": "  "}"#).unwrap();
		assert_eq!(blank.into_token(), None);

		let present: TokenGrant = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
		assert_eq!(present.into_token().as_deref(), Some("abc"));
	}
}
