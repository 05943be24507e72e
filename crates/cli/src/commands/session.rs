use serde_json::Value;

use super::{CommandContext, to_data};
use crate::error::Result;
use crate::output::{ActionData, StatusData};

pub fn logout(ctx: &mut CommandContext) -> Result<Value> {
	ctx.app.logout();
	to_data(ActionData::new("logout"))
}

pub fn status(ctx: &mut CommandContext) -> Result<Value> {
	to_data(StatusData {
		authenticated: ctx.app.session().is_authenticated(),
		api_url: ctx.config.api_url.clone(),
		storage: ctx.config.storage_path.clone(),
	})
}
