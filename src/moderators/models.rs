//! Types for modeling moderators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

use crate::authorization::Permissions;
use crate::make_id;

make_id!(ModeratorID as u64);

/// A moderator.
#[derive(Debug, Serialize, ToSchema)]
pub struct Moderator {
	/// The moderator's ID.
	pub id: ModeratorID,

	/// The moderator's name.
	pub name: String,

	/// The permissions this moderator holds.
	#[schema(value_type = Vec<String>, example = json!(["bans", "warnings"]))]
	pub permissions: Permissions,

	/// When this moderator was added.
	pub created_on: DateTime<Utc>,
}

impl FromRow<'_, MySqlRow> for Moderator {
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self> {
		Ok(Self {
			id: row.try_get("id")?,
			name: row.try_get("name")?,
			permissions: row.try_get("permissions")?,
			created_on: row.try_get("created_on")?,
		})
	}
}

/// A minimal representation of a moderator, used when embedding moderators into other responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModeratorInfo {
	/// The moderator's ID.
	pub id: ModeratorID,

	/// The moderator's name.
	pub name: String,
}

/// Request payload for updating a moderator.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ModeratorUpdate {
	/// The moderator's new permissions.
	#[schema(value_type = Vec<String>, example = json!(["bans", "warnings"]))]
	pub permissions: Permissions,
}
