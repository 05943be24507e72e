//! Transport plumbing for the AutoAttend client.
//!
//! The orchestrator in `attend-rs` never talks to `reqwest` directly: every
//! outbound call goes through the [`Transport`] seam so that the session and
//! authorization policies can be exercised against [`fake::FakeTransport`].

pub mod fake;
pub mod http;
pub mod request;
pub mod transport;

pub use http::HttpTransport;
pub use request::{ApiRequest, ApiResponse, FormPart, Method, PartValue, RequestBody};
pub use transport::{Transport, TransportError};
