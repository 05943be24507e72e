mod common;

use attend::ui::count_navigations;
use attend::{AuthError, Error, Route, SessionToken, SlotStatus};
use attend_runtime::{ApiRequest, Method};
use common::{Harness, employee, poll_once};
use serde_json::json;

#[tokio::test]
async fn every_resource_shares_the_forbidden_policy() {
	let cases = [
		(Method::Get, "/admin/profile", 403),
		(Method::Get, "/admin/employees", 401),
		(Method::Post, "/admin/notifications", 403),
		(Method::Get, "/admin/attendance/today", 401),
		(Method::Delete, "/admin/employees/E1", 403),
		(Method::Put, "/employee/profile", 401),
		(Method::Get, "/employee/complaints", 403),
	];

	for (method, path, status) in cases {
		let mut h = Harness::signed_in("tok");
		h.server.reply(method, path, status, json!("Invalid token"));

		let err = h
			.app
			.gateway()
			.execute(ApiRequest::new(method, path))
			.await
			.unwrap_err();

		assert_eq!(err, Error::Auth(AuthError::SessionExpired), "{method} {path}");
		assert!(!h.app.session().is_authenticated(), "{method} {path}");
		assert_eq!(h.persisted_token(), None, "{method} {path}");
		assert_eq!(count_navigations(&h.drain(), Route::Login), 1, "{method} {path}");
	}
}

#[tokio::test]
async fn forbidden_roster_does_not_disturb_inflight_notifications() {
	let mut h = Harness::signed_in("tok");
	let dashboard = h.app.admin_dashboard();
	let notifications_reply = h.server.defer(Method::Get, "/admin/notifications");
	h.server.reply(Method::Get, "/admin/employees", 403, json!("Invalid token"));

	let mut notifications = Box::pin(dashboard.load_notifications());
	assert!(poll_once(&mut notifications).await.is_pending());
	assert_eq!(dashboard.notifications().status(), SlotStatus::Loading);

	dashboard.load_roster().await;
	assert_eq!(dashboard.roster().status(), SlotStatus::Failed);
	assert!(!h.app.session().is_authenticated());

	notifications_reply.respond(200, json!([{"from": "E1", "message": "hello"}]));
	notifications.await;

	let snapshot = dashboard.notifications().snapshot();
	assert_eq!(snapshot.status, SlotStatus::Ready);
	assert_eq!(snapshot.value.unwrap()[0].message, "hello");
	let sent = h.server.last_sent_to(Method::Get, "/admin/notifications").unwrap();
	assert_eq!(sent.bearer.as_deref(), Some("tok"));
	assert_eq!(count_navigations(&h.drain(), Route::Login), 1);

	// The next attempt goes out without a token and fails on its own.
	h.server.reply(Method::Get, "/admin/notifications", 401, json!("No token provided"));
	dashboard.load_notifications().await;
	assert_eq!(dashboard.notifications().status(), SlotStatus::Failed);
	let sent = h.server.last_sent_to(Method::Get, "/admin/notifications").unwrap();
	assert!(sent.bearer.is_none());
	assert_eq!(count_navigations(&h.drain(), Route::Login), 1);
}

#[tokio::test]
async fn concurrent_forbidden_calls_each_navigate_once() {
	let mut h = Harness::signed_in("tok");
	let dashboard = h.app.admin_dashboard();
	h.server.reply(Method::Get, "/admin/profile", 403, json!({}));
	h.server.reply(Method::Get, "/admin/employees", 403, json!({}));
	h.server.reply(Method::Get, "/admin/notifications", 200, json!([]));

	dashboard.refresh().await;

	assert_eq!(dashboard.profile().status(), SlotStatus::Failed);
	assert_eq!(dashboard.roster().status(), SlotStatus::Failed);
	assert!(!h.app.session().is_authenticated());
	assert_eq!(count_navigations(&h.drain(), Route::Login), 2);
}

#[tokio::test]
async fn session_stays_empty_until_next_login() {
	let h = Harness::signed_in("tok");
	h.server.reply(Method::Get, "/employee/profile", 403, json!({}));
	h.server.reply(Method::Post, "/admin/login", 200, json!({"token": "fresh"}));
	let mut rx = h.app.session().subscribe();

	let _ = h.app.gateway().execute(ApiRequest::get("/employee/profile")).await;
	assert!(h.app.session().current().is_none());
	assert!(rx.borrow_and_update().is_none());

	h.app.credential_login().login("admin1", "correct").await.unwrap();
	let current = rx.borrow_and_update().clone();
	assert_eq!(current, SessionToken::new("fresh"));
}

#[tokio::test]
async fn backend_rejection_keeps_session() {
	let mut h = Harness::signed_in("tok");
	let dashboard = h.app.admin_dashboard();
	h.server.reply(Method::Get, "/admin/employees", 200, json!([employee("Ada", "E1", "R&D", "ada@x")]));
	dashboard.load_roster().await;
	h.server.reply(Method::Get, "/admin/employees", 500, json!("database unavailable"));

	dashboard.load_roster().await;

	let snapshot = dashboard.roster().snapshot();
	assert_eq!(snapshot.status, SlotStatus::Failed);
	assert_eq!(snapshot.error.as_deref(), Some("database unavailable"));
	assert_eq!(snapshot.value.unwrap().len(), 1);
	assert!(h.app.session().is_authenticated());
	assert_eq!(count_navigations(&h.drain(), Route::Login), 0);
}
