use attend_protocol::ProfileUpdate;
use serde_json::Value;

use super::{CommandContext, settle, to_data};
use crate::cli::{EmployeeAction, UpdateArgs};
use crate::error::Result;
use crate::output::ActionData;

pub async fn execute(action: EmployeeAction, ctx: &mut CommandContext) -> Result<Value> {
	let dashboard = ctx.app.employee_dashboard();
	match action {
		EmployeeAction::Profile => {
			settle(dashboard.load_profile().await)?;
			to_data(dashboard.profile().value())
		}
		EmployeeAction::Activities => {
			settle(dashboard.load_activities().await)?;
			to_data(dashboard.activity_entries())
		}
		EmployeeAction::Notifications => {
			settle(dashboard.load_notifications().await)?;
			to_data(dashboard.notifications().value().unwrap_or_default())
		}
		EmployeeAction::Complaints => {
			settle(dashboard.load_complaints().await)?;
			to_data(dashboard.complaint_entries())
		}
		EmployeeAction::Complain { description } => {
			dashboard.submit_complaint(&description).await?;
			to_data(ActionData::new("complain"))
		}
		EmployeeAction::Notify { message } => {
			dashboard.send_notification(&message).await?;
			to_data(ActionData::new("notify").with_target("admin"))
		}
		EmployeeAction::Update(args) => {
			settle(dashboard.load_profile().await)?;
			let mut update = dashboard.profile_form();
			apply_update(&mut update, args);
			dashboard.update_profile(&update).await?;
			to_data(dashboard.profile().value())
		}
	}
}

fn apply_update(form: &mut ProfileUpdate, args: UpdateArgs) {
	let fields = [
		(&mut form.full_name, args.full_name),
		(&mut form.phone, args.phone),
		(&mut form.email, args.email),
		(&mut form.department, args.department),
		(&mut form.address, args.address),
	];
	for (field, value) in fields {
		if let Some(value) = value {
			*field = value;
		}
	}
}
