//! Types for modeling warnings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

use crate::make_id;
use crate::moderators::ModeratorInfo;
use crate::players::{PlayerIdentifier, PlayerInfo};

make_id!(WarningID as u64);

/// A warning issued to a player.
#[derive(Debug, Serialize, ToSchema)]
pub struct Warning {
	/// The warning's ID.
	pub id: WarningID,

	/// The player who the warning applies to.
	pub player: PlayerInfo,

	/// The reason for the warning.
	pub reason: String,

	/// Internal moderator notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,

	/// The moderator who issued the warning.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub moderator: Option<ModeratorInfo>,

	/// When this warning was issued.
	pub created_on: DateTime<Utc>,
}

impl FromRow<'_, MySqlRow> for Warning {
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self> {
		Ok(Self {
			id: row.try_get("id")?,
			player: PlayerInfo {
				id: row.try_get("player_id")?,
				username: row.try_get("player_username")?,
			},
			reason: row.try_get("reason")?,
			notes: row.try_get("notes")?,
			moderator: row
				.try_get("warned_by_name")
				.and_then(|name| Ok((name, row.try_get("warned_by_id")?)))
				.map(|(name, id)| ModeratorInfo { id, name })
				.ok(),
			created_on: row.try_get("created_on")?,
		})
	}
}

/// Request payload for issuing a new warning.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewWarning {
	/// The player who should be warned.
	pub player: PlayerIdentifier,

	/// The reason for the warning.
	pub reason: String,

	/// Internal moderator notes.
	pub notes: Option<String>,
}

/// Response body for issuing a new warning.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CreatedWarning {
	/// The warning's ID.
	pub warning_id: WarningID,
}
