//! Types for modeling ban appeals.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{database, FromRow, MySql, Row};
use thiserror::Error;
use utoipa::ToSchema;

use crate::bans::BanID;
use crate::make_id;
use crate::moderators::ModeratorInfo;
use crate::players::PlayerInfo;

make_id!(AppealID as u64);

/// A ban appeal.
#[derive(Debug, Serialize, ToSchema)]
pub struct Appeal {
	/// The appeal's ID.
	pub id: AppealID,

	/// The ID of the ban this appeal is for.
	pub ban_id: BanID,

	/// The player who submitted the appeal.
	pub player: PlayerInfo,

	/// The appeal's review status.
	pub status: AppealStatus,

	/// The player's account of what happened.
	pub what_happened: String,

	/// Why the player believes they should be unbanned.
	pub why_unban: String,

	/// Anything else the player wanted to add.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub additional_info: Option<String>,

	/// When this appeal was submitted.
	pub created_on: DateTime<Utc>,

	/// The moderator who reviewed this appeal (if any).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reviewed_by: Option<ModeratorInfo>,

	/// When this appeal was reviewed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reviewed_on: Option<DateTime<Utc>>,
}

impl FromRow<'_, MySqlRow> for Appeal {
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self> {
		Ok(Self {
			id: row.try_get("id")?,
			ban_id: row.try_get("ban_id")?,
			player: PlayerInfo {
				id: row.try_get("player_id")?,
				username: row.try_get("player_username")?,
			},
			status: row.try_get("status")?,
			what_happened: row.try_get("what_happened")?,
			why_unban: row.try_get("why_unban")?,
			additional_info: row.try_get("additional_info")?,
			created_on: row.try_get("created_on")?,
			reviewed_by: row
				.try_get("reviewed_by_name")
				.and_then(|name| Ok((name, row.try_get("reviewed_by_id")?)))
				.map(|(name, id)| ModeratorInfo { id, name })
				.ok(),
			reviewed_on: row.try_get("reviewed_on")?,
		})
	}
}

/// The review status of an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum AppealStatus {
	Pending,
	Approved,
	Denied,
}

impl AppealStatus {
	/// Stringified version that is also expected when parsing a string into an
	/// [`AppealStatus`].
	pub const fn as_str(&self) -> &'static str {
		match *self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Denied => "denied",
		}
	}
}

/// An error for parsing appeal statuses.
#[derive(Debug, Error)]
#[error("`{0}` is not a valid appeal status")]
pub struct InvalidAppealStatus(String);

impl FromStr for AppealStatus {
	type Err = InvalidAppealStatus;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"pending" => Ok(Self::Pending),
			"approved" => Ok(Self::Approved),
			"denied" => Ok(Self::Denied),
			invalid => Err(InvalidAppealStatus(invalid.to_owned())),
		}
	}
}

impl sqlx::Type<MySql> for AppealStatus {
	fn type_info() -> <MySql as sqlx::Database>::TypeInfo {
		<str as sqlx::Type<MySql>>::type_info()
	}
}

impl<'q> sqlx::Encode<'q, MySql> for AppealStatus {
	fn encode_by_ref(
		&self,
		buf: &mut <MySql as database::HasArguments<'q>>::ArgumentBuffer,
	) -> sqlx::encode::IsNull {
		<&'q str as sqlx::Encode<'q, MySql>>::encode_by_ref(&self.as_str(), buf)
	}
}

impl<'q> sqlx::Decode<'q, MySql> for AppealStatus {
	fn decode(
		value: <MySql as database::HasValueRef<'q>>::ValueRef,
	) -> Result<Self, sqlx::error::BoxDynError> {
		Ok(<&'q str as sqlx::Decode<'q, MySql>>::decode(value)
			.map(|value| value.parse::<Self>())??)
	}
}

/// Response body for submitting a new appeal.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CreatedAppeal {
	/// The appeal's ID.
	pub appeal_id: AppealID,
}

/// Request payload for reviewing an appeal.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct AppealReview {
	/// The verdict. Must be either `approved` or `denied`.
	pub status: AppealStatus,
}

#[cfg(test)]
mod tests {
	use super::AppealStatus;

	#[test]
	fn statuses_round_trip_through_strings() {
		for status in [
			AppealStatus::Pending,
			AppealStatus::Approved,
			AppealStatus::Denied,
		] {
			assert_eq!(status.as_str().parse::<AppealStatus>().ok(), Some(status));
		}
	}
}
