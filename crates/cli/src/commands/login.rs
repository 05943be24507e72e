use attend::LoginTab;
use serde_json::Value;
use tracing::info;

use super::{CommandContext, to_data};
use crate::error::Result;
use crate::output::LoginData;

pub async fn admin(username: &str, password: &str, ctx: &mut CommandContext) -> Result<Value> {
	let mut view = ctx.app.login_view();
	let outcome = view.admin_login(username, password).await?;
	info!(target = "attend.cli", route = %outcome.route, "signed in with credentials");
	to_data(LoginData {
		route: outcome.route.to_string(),
		authenticated: true,
	})
}

pub async fn face(ctx: &mut CommandContext) -> Result<Value> {
	let mut view = ctx.app.login_view();
	view.select_tab(LoginTab::Employee).await?;
	let outcome = view.face_login().await?;
	info!(target = "attend.cli", route = %outcome.route, "signed in with face recognition");
	to_data(LoginData {
		route: outcome.route.to_string(),
		authenticated: true,
	})
}
