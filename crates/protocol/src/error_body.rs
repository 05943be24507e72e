//! Backend error payloads.
//!
//! The backend is inconsistent about error shapes: login routes answer with
//! `{ "message": "..." }` while resource routes send a bare JSON string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Any error body the backend may produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
	/// `{ "message": "..." }`
	Message { message: String },
	/// `"..."`
	Text(String),
	/// Anything else; kept for diagnostics only.
	Other(Value),
}

impl ErrorBody {
	/// Parses an error body from raw response bytes.
	///
	/// Non-JSON bodies are treated as plain text. Empty bodies yield `None`.
	pub fn parse(bytes: &[u8]) -> Option<Self> {
		if bytes.iter().all(u8::is_ascii_whitespace) {
			return None;
		}
		match serde_json::from_slice(bytes) {
			Ok(body) => Some(body),
			Err(_) => Some(Self::Text(String::from_utf8_lossy(bytes).trim().to_string())),
		}
	}

	/// Human-readable message, if the payload carries one.
	pub fn message(&self) -> Option<&str> {
		let text = match self {
			Self::Message { message } => message.as_str(),
			Self::Text(text) => text.as_str(),
			Self::Other(_) => return None,
		};
		(!text.trim().is_empty()).then_some(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_object_and_string_bodies() {
		let obj = ErrorBody::parse(br#"{"message": "Invalid credentials"}"#).unwrap();
		assert_eq!(obj.message(), Some("Invalid credentials"));

		let text = ErrorBody::parse(br#""Employee ID or email already exists""#).unwrap();
		assert_eq!(text.message(), Some("Employee ID or email already exists"));
	}

	#[test]
	fn plain_text_and_empty_bodies() {
		let raw = ErrorBody::parse(b"Bad Gateway\n").unwrap();
		assert_eq!(raw.message(), Some("Bad Gateway"));
		assert!(ErrorBody::parse(b"  ").is_none());
	}

	#[test]
	fn structured_bodies_without_message_have_no_text() {
		let other = ErrorBody::parse(br#"{"error": 42}"#).unwrap();
		assert_eq!(other.message(), None);
	}
}
