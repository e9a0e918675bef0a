//! Session identity and role capabilities.
//!
//! Sessions are injected into controllers and view models explicitly. Role
//! checks go through [`Capabilities`], computed once per render context, instead
//! of comparing status strings at each call site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Staff role reported by the session provider as its `status` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
	Staff,
	Admin,
	SuperAdmin,
}

impl Role {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Staff => "Staff",
			Self::Admin => "Admin",
			Self::SuperAdmin => "SuperAdmin",
		}
	}

	const fn is_admin(self) -> bool {
		matches!(self, Self::Admin | Self::SuperAdmin)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role status: {0:?}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
	type Err = RoleParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Staff" => Ok(Self::Staff),
			"Admin" => Ok(Self::Admin),
			"SuperAdmin" => Ok(Self::SuperAdmin),
			other => Err(RoleParseError(other.to_string())),
		}
	}
}

/// The authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub email: String,
	pub role: Role,
}

impl Session {
	pub fn new(email: impl Into<String>, role: Role) -> Self {
		Self {
			email: email.into(),
			role,
		}
	}

	/// Actor string stamped into `createdBy`/`updatedBy`.
	pub fn actor(&self) -> &str {
		&self.email
	}

	pub fn capabilities(&self) -> Capabilities {
		Capabilities::for_session(self)
	}
}

/// Role-derived permissions for one render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
	pub view_audit: bool,
	pub delete: bool,
}

impl Capabilities {
	pub fn for_session(session: &Session) -> Self {
		Self {
			view_audit: can_view_audit(session),
			delete: can_delete(session),
		}
	}
}

/// Whether created/updated audit fields are shown.
pub fn can_view_audit(session: &Session) -> bool {
	session.role.is_admin()
}

/// Whether destructive actions are offered.
pub fn can_delete(session: &Session) -> bool {
	session.role.is_admin()
}
