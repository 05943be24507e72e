use attend::AdminSection;
use attend_protocol::RegistrationFields;
use serde_json::Value;

use super::{CommandContext, settle, to_data};
use crate::cli::{AdminAction, RegisterArgs};
use crate::error::Result;
use crate::output::ActionData;

pub async fn execute(action: AdminAction, ctx: &mut CommandContext) -> Result<Value> {
	let mut dashboard = ctx.app.admin_dashboard();
	match action {
		AdminAction::Profile => {
			settle(dashboard.load_profile().await)?;
			to_data(dashboard.profile().value())
		}
		AdminAction::Employees { sort } => {
			settle(dashboard.load_roster().await)?;
			to_data(dashboard.sorted_employees(sort.into()))
		}
		AdminAction::Notifications => {
			settle(dashboard.load_notifications().await)?;
			to_data(dashboard.notifications().value().unwrap_or_default())
		}
		AdminAction::Attendance => {
			settle(dashboard.load_attendance().await)?;
			to_data(dashboard.report_entries())
		}
		AdminAction::Register(args) => {
			dashboard.switch_section(AdminSection::AddEmployee).await?;
			dashboard.capture_enrollment_photo().await?;
			let employee_id = args.employee_id.clone();
			dashboard.register_employee(registration_fields(args)).await?;
			to_data(ActionData::new("register").with_target(employee_id))
		}
		AdminAction::Delete { employee_id } => {
			dashboard.delete_employee(&employee_id).await?;
			to_data(ActionData::new("delete").with_target(employee_id))
		}
		AdminAction::Notify { to, message } => {
			dashboard.send_notification(&to, &message).await?;
			to_data(ActionData::new("notify").with_target(to))
		}
	}
}

fn registration_fields(args: RegisterArgs) -> RegistrationFields {
	RegistrationFields {
		full_name: args.full_name,
		employee_id: args.employee_id,
		department: args.department,
		email: args.email,
		address: args.address,
		phone: args.phone,
	}
}
