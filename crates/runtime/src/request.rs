//! Transport-level request and response values.

use std::fmt;

use attend_protocol::ErrorBody;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		})
	}
}

/// Value of a single multipart part.
#[derive(Clone, PartialEq, Eq)]
pub enum PartValue {
	Text(String),
	File { filename: String, mime: String, bytes: Vec<u8> },
}

impl fmt::Debug for PartValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PartValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
			PartValue::File { filename, mime, bytes } => f
				.debug_struct("File")
				.field("filename", filename)
				.field("mime", mime)
				.field("len", &bytes.len())
				.finish(),
		}
	}
}

/// Named multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
	pub name: String,
	pub value: PartValue,
}

impl FormPart {
	pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: PartValue::Text(value.into()),
		}
	}

	pub fn file(name: impl Into<String>, filename: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
		Self {
			name: name.into(),
			value: PartValue::File {
				filename: filename.into(),
				mime: mime.into(),
				bytes,
			},
		}
	}
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
	#[default]
	Empty,
	Json(Value),
	Multipart(Vec<FormPart>),
}

/// One outbound call, relative to the configured backend base URL.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
	pub method: Method,
	pub path: String,
	pub bearer: Option<String>,
	pub body: RequestBody,
}

impl ApiRequest {
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			bearer: None,
			body: RequestBody::Empty,
		}
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Attaches a JSON body.
	pub fn with_json<T: Serialize>(mut self, body: &T) -> serde_json::Result<Self> {
		self.body = RequestBody::Json(serde_json::to_value(body)?);
		Ok(self)
	}

	/// Attaches a multipart form body.
	pub fn with_multipart(mut self, parts: Vec<FormPart>) -> Self {
		self.body = RequestBody::Multipart(parts);
		self
	}

	/// Sets the bearer credential.
	pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
		self.bearer = Some(token.into());
		self
	}

	/// `METHOD /path`, used for logging and routing.
	pub fn route(&self) -> String {
		format!("{} {}", self.method, self.path)
	}
}

// Keeps bearer tokens out of logs and panic messages.
impl fmt::Debug for ApiRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
			.field("body", &self.body)
			.finish()
	}
}

/// Raw response: status plus body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
	pub status: u16,
	pub body: Vec<u8>,
}

impl ApiResponse {
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Response with a JSON body.
	pub fn json(status: u16, body: &Value) -> Self {
		Self::new(status, body.to_string())
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// 401 and 403 both mean the presented token is no longer accepted.
	pub fn is_auth_failure(&self) -> bool {
		matches!(self.status, 401 | 403)
	}

	/// 5xx responses are backend failures rather than rejections.
	pub fn is_server_error(&self) -> bool {
		self.status >= 500
	}

	/// Decodes the body; an empty body decodes as JSON `null`.
	pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
		if self.body.iter().all(u8::is_ascii_whitespace) {
			return serde_json::from_value(Value::Null);
		}
		serde_json::from_slice(&self.body)
	}

	/// Parsed error payload, if any.
	pub fn error_body(&self) -> Option<ErrorBody> {
		ErrorBody::parse(&self.body)
	}

	/// Error message carried by the body, if any.
	pub fn error_message(&self) -> Option<String> {
		self.error_body().and_then(|body| body.message().map(str::to_string))
	}
}
