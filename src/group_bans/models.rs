//! Types for modeling group bans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

use crate::make_id;
use crate::moderators::ModeratorInfo;

make_id!(GroupBanID as u64);

/// A ban of an entire Roblox group.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupBan {
	/// The group ban's ID.
	pub id: GroupBanID,

	/// The banned Roblox group's ID.
	pub group_id: u64,

	/// The banned Roblox group's name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group_name: Option<String>,

	/// The reason the group was banned for.
	pub reason: String,

	/// The moderator who banned the group.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub moderator: Option<ModeratorInfo>,

	/// When this group ban was submitted.
	pub created_on: DateTime<Utc>,

	/// Whether this group ban is currently in effect.
	pub is_active: bool,
}

impl FromRow<'_, MySqlRow> for GroupBan {
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self> {
		Ok(Self {
			id: row.try_get("id")?,
			group_id: row.try_get("group_id")?,
			group_name: row.try_get("group_name")?,
			reason: row.try_get("reason")?,
			moderator: row
				.try_get("banned_by_name")
				.and_then(|name| Ok((name, row.try_get("banned_by_id")?)))
				.map(|(name, id)| ModeratorInfo { id, name })
				.ok(),
			created_on: row.try_get("created_on")?,
			is_active: row.try_get("is_active")?,
		})
	}
}

/// Request payload for submitting a new group ban.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewGroupBan {
	/// The Roblox group's ID.
	pub group_id: u64,

	/// The Roblox group's name.
	pub group_name: Option<String>,

	/// The reason for the ban.
	pub reason: String,
}

/// Response body for submitting a new group ban.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CreatedGroupBan {
	/// The group ban's ID.
	pub group_ban_id: GroupBanID,
}
