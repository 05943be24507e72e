//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;
use url::Url;

use crate::request::{ApiRequest, ApiResponse, FormPart, Method, PartValue, RequestBody};
use crate::transport::{Transport, TransportError};

/// Transport talking to the real backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	base: Url,
}

impl HttpTransport {
	/// Creates a transport rooted at `base_url`.
	///
	/// # Errors
	///
	/// Returns [`TransportError::InvalidRequest`] when the URL does not parse or
	/// the HTTP client cannot be built.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
		let mut base = Url::parse(base_url).map_err(|e| TransportError::InvalidRequest(format!("invalid base URL {base_url}: {e}")))?;
		// Url::join replaces the last segment unless the base ends with '/'.
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());
			base.set_path(&path);
		}

		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| TransportError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

		Ok(Self { client, base })
	}

	pub fn base_url(&self) -> &Url {
		&self.base
	}

	fn url(&self, path: &str) -> Result<Url, TransportError> {
		self.base
			.join(path.trim_start_matches('/'))
			.map_err(|e| TransportError::InvalidRequest(format!("invalid path {path}: {e}")))
	}
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
	match method {
		Method::Get => reqwest::Method::GET,
		Method::Post => reqwest::Method::POST,
		Method::Put => reqwest::Method::PUT,
		Method::Delete => reqwest::Method::DELETE,
	}
}

fn build_form(parts: Vec<FormPart>) -> Result<Form, TransportError> {
	let mut form = Form::new();
	for part in parts {
		form = match part.value {
			PartValue::Text(text) => form.text(part.name, text),
			PartValue::File { filename, mime, bytes } => {
				let file = Part::bytes(bytes)
					.file_name(filename)
					.mime_str(&mime)
					.map_err(|e| TransportError::InvalidRequest(format!("invalid mime type {mime}: {e}")))?;
				form.part(part.name, file)
			}
		};
	}
	Ok(form)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
	if err.is_timeout() {
		TransportError::Timeout
	} else {
		TransportError::Network(err.to_string())
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
		let route = request.route();
		let url = self.url(&request.path)?;
		let mut builder = self.client.request(to_reqwest_method(request.method), url);

		if let Some(token) = &request.bearer {
			builder = builder.bearer_auth(token);
		}

		builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Json(value) => builder.json(&value),
			RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
		};

		let response = builder.send().await.map_err(map_reqwest_error)?;
		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(map_reqwest_error)?;

		debug!(target = "attend.http", %route, status, len = body.len(), "response received");

		Ok(ApiResponse { status, body: body.to_vec() })
	}
}
