//! Client-side session and biometric-capture authentication orchestrator.
//!
//! The crate owns everything in the AutoAttend front-end that has a lifecycle:
//!
//! - [`media`] - camera acquisition, scoped release and still-frame capture
//! - [`auth`] - credential and face login against the token-issuing backend
//! - [`session`] - the single process-wide session token and its persistence
//! - [`gateway`] - bearer authorization and uniform 401/403 handling
//! - [`loader`] - per-resource load slots with last-completed-wins updates
//! - [`views`] - login and dashboard controllers wiring the above together
//!
//! Rendering is not part of this crate. Views report forced navigation and
//! user notices over the [`ui`] event channel.

pub mod app;
pub mod auth;
pub mod error;
pub mod gateway;
pub mod loader;
pub mod media;
pub mod session;
pub mod ui;
pub mod views;

pub use app::App;
pub use auth::{BiometricLogin, CredentialLogin, LoginOutcome};
pub use error::{AuthError, CaptureError, Error, MediaError, RequestError, Result, StorageError};
pub use gateway::AuthorizedGateway;
pub use loader::{LoadOutcome, LoadReport, LoadSlot, SlotSnapshot, SlotStatus};
pub use media::{Camera, CameraDevice, CameraStream, CapturedFrame, MediaController, MediaState, Purpose, VideoConstraints};
pub use session::{JsonFileStorage, KeyValueStore, MemoryStorage, SessionStore, SessionToken, TOKEN_KEY};
pub use ui::{Notice, NoticeLevel, Route, UiEvent, UiEvents, UiSender};
pub use views::{AdminDashboard, AdminSection, EmployeeDashboard, LoginTab, LoginView, SortKey};
