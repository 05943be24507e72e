use std::path::PathBuf;

use attend::SortKey;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "attend")]
#[command(about = "AutoAttend client - sign in and work the attendance dashboards from a terminal")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Backend base URL
	#[arg(long, global = true, env = "ATTEND_API_URL", value_name = "URL")]
	pub api_url: Option<String>,

	/// File holding the persisted session token
	#[arg(long, global = true, env = "ATTEND_STORAGE", value_name = "FILE")]
	pub storage: Option<PathBuf>,

	/// Config file (defaults to <config dir>/attend/config.json)
	#[arg(long, global = true, env = "ATTEND_CONFIG", value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Sign in as administrator or employee
	Login {
		#[command(subcommand)]
		method: LoginMethod,
	},

	/// Clear the stored session
	Logout,

	/// Show whether a session is stored
	Status,

	/// Administrator dashboard
	Admin {
		#[command(subcommand)]
		action: AdminAction,
	},

	/// Employee dashboard
	#[command(alias = "emp")]
	Employee {
		#[command(subcommand)]
		action: EmployeeAction,
	},
}

impl Commands {
	/// Dotted name reported in the result envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Login { method } => match method {
				LoginMethod::Admin { .. } => "login.admin",
				LoginMethod::Face { .. } => "login.face",
			},
			Commands::Logout => "logout",
			Commands::Status => "status",
			Commands::Admin { action } => match action {
				AdminAction::Profile => "admin.profile",
				AdminAction::Employees { .. } => "admin.employees",
				AdminAction::Notifications => "admin.notifications",
				AdminAction::Attendance => "admin.attendance",
				AdminAction::Register { .. } => "admin.register",
				AdminAction::Delete { .. } => "admin.delete",
				AdminAction::Notify { .. } => "admin.notify",
			},
			Commands::Employee { action } => match action {
				EmployeeAction::Profile => "employee.profile",
				EmployeeAction::Activities => "employee.activities",
				EmployeeAction::Notifications => "employee.notifications",
				EmployeeAction::Complaints => "employee.complaints",
				EmployeeAction::Complain { .. } => "employee.complain",
				EmployeeAction::Notify { .. } => "employee.notify",
				EmployeeAction::Update(_) => "employee.update",
			},
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum LoginMethod {
	/// Username and password login
	Admin {
		#[arg(short, long)]
		username: String,
		#[arg(short, long, env = "ATTEND_PASSWORD", hide_env_values = true)]
		password: String,
	},

	/// Face login from a JPEG still
	Face {
		/// JPEG image used as the camera frame
		#[arg(long, value_name = "FILE")]
		frame: PathBuf,
	},
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
	/// Administrator profile
	Profile,

	/// Employee roster
	Employees {
		#[arg(long, value_enum, default_value_t = RosterOrder::Name)]
		sort: RosterOrder,
	},

	/// Notifications addressed to the administrator
	Notifications,

	/// Today's attendance report
	Attendance,

	/// Register an employee with an enrollment photo
	Register(RegisterArgs),

	/// Delete an employee by ID
	Delete { employee_id: String },

	/// Send a notification to an employee
	Notify {
		#[arg(long)]
		to: String,
		#[arg(long)]
		message: String,
	},
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
	#[arg(long, alias = "name")]
	pub full_name: String,
	#[arg(long)]
	pub employee_id: String,
	#[arg(long)]
	pub department: String,
	#[arg(long)]
	pub email: String,
	#[arg(long, default_value = "")]
	pub address: String,
	#[arg(long, default_value = "")]
	pub phone: String,
	/// JPEG image used as the enrollment photo
	#[arg(long, value_name = "FILE")]
	pub photo: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeAction {
	/// Own profile
	Profile,

	/// Login and logout history
	Activities,

	/// Notifications addressed to this employee
	Notifications,

	/// Complaints filed so far
	Complaints,

	/// File a complaint
	Complain { description: String },

	/// Message the administrator
	Notify { message: String },

	/// Update profile fields; omitted fields keep their current value
	Update(UpdateArgs),
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
	#[arg(long)]
	pub full_name: Option<String>,
	#[arg(long)]
	pub phone: Option<String>,
	#[arg(long)]
	pub email: Option<String>,
	#[arg(long)]
	pub department: Option<String>,
	#[arg(long)]
	pub address: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RosterOrder {
	#[default]
	Name,
	Department,
	Email,
}

impl From<RosterOrder> for SortKey {
	fn from(order: RosterOrder) -> Self {
		match order {
			RosterOrder::Name => SortKey::Name,
			RosterOrder::Department => SortKey::Department,
			RosterOrder::Email => SortKey::Email,
		}
	}
}
