//! View controllers: the login screen and the two dashboards.
//!
//! Each controller owns its load slots and, where it needs one, its own
//! [`MediaController`](crate::media::MediaController). Dropping a controller
//! is the unmount: the camera is released and in-flight loads are discarded.

mod admin;
mod display;
mod employee;
mod login;

use std::future::Future;

use attend_runtime::ApiRequest;
use serde::de::DeserializeOwned;

pub use self::admin::{AdminDashboard, AdminSection, SortKey};
pub use self::display::{ActivityEntry, ActivityKind, ActivityResult, ComplaintEntry, OFFICE_LOCATION, ReportEntry, complaint_subject};
pub use self::employee::EmployeeDashboard;
pub use self::login::{LoginTab, LoginView};
use crate::error::Result;
use crate::gateway::AuthorizedGateway;
use crate::loader::{LoadReport, LoadSlot};
use crate::ui::UiSender;

/// Detached `GET` of `path`, suitable for [`LoadSlot::load`].
fn get<T>(gateway: &AuthorizedGateway, path: &'static str) -> impl Future<Output = Result<T>> + Send + 'static + use<T>
where
	T: DeserializeOwned + Send + 'static,
{
	let gateway = gateway.clone();
	async move { gateway.fetch(ApiRequest::get(path)).await }
}

/// Raises an error notice for a failed attempt that reached its slot.
fn notify_failure<T: Send + 'static>(ui: &UiSender, slot: &LoadSlot<T>, report: &LoadReport) {
	if let Some(err) = report.applied_error() {
		ui.error(err.notice_text(slot.failure_message()));
	}
}
