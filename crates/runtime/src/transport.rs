//! The transport seam between the orchestrator and the backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::request::{ApiRequest, ApiResponse};

/// Failure to obtain any HTTP response at all.
///
/// A response with an error status is *not* a transport error; it is returned
/// as an [`ApiResponse`] and interpreted by the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
	#[error("network error: {0}")]
	Network(String),

	#[error("request timed out")]
	Timeout,

	#[error("invalid request: {0}")]
	InvalidRequest(String),

	#[error("connection closed before a response arrived")]
	Closed,

	#[error("no route for {0}")]
	Unroutable(String),
}

/// Sends one request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
		(**self).send(request).await
	}
}
