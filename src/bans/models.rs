//! Types for modeling player bans.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

use crate::make_id;
use crate::moderators::ModeratorInfo;
use crate::players::{PlayerIdentifier, PlayerInfo};

make_id!(BanID as u64);
make_id!(UnbanID as u64);

/// A player ban.
#[derive(Debug, Serialize, ToSchema)]
pub struct Ban {
	/// The ban's ID.
	pub id: BanID,

	/// The player who the ban applies to.
	pub player: PlayerInfo,

	/// The reason the player was banned for.
	pub reason: String,

	/// Internal moderator notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,

	/// The moderator who banned the player.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub moderator: Option<ModeratorInfo>,

	/// When this ban was submitted.
	pub created_on: DateTime<Utc>,

	/// When this ban will expire. `null` means the ban is permanent.
	pub expires_on: Option<DateTime<Utc>>,

	/// When the player may submit an appeal for this ban.
	pub appealable_on: DateTime<Utc>,

	/// Whether this ban is currently in effect.
	pub is_active: bool,

	/// The corresponding unban to this ban (if any).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub unban: Option<Unban>,
}

impl FromRow<'_, MySqlRow> for Ban {
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
				.try_get("banned_by_name")
				.and_then(|name| Ok((name, row.try_get("banned_by_id")?)))
				.map(|(name, id)| ModeratorInfo { id, name })
				.ok(),
			created_on: row.try_get("created_on")?,
			expires_on: row.try_get("expires_on")?,
			appealable_on: row.try_get("appealable_on")?,
			is_active: row.try_get("is_active")?,
			unban: Unban::from_row(row).ok(),
		})
	}
}

/// Reversion of a [`Ban`].
#[derive(Debug, Serialize, ToSchema)]
pub struct Unban {
	/// The unban's ID.
	pub id: UnbanID,

	/// The reason for the unban.
	pub reason: String,

	/// The moderator who reverted the ban.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub moderator: Option<ModeratorInfo>,

	/// When this ban was reverted.
	pub created_on: DateTime<Utc>,
}

impl FromRow<'_, MySqlRow> for Unban {
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self> {
		Ok(Self {
			id: row.try_get("unban_id")?,
			reason: row.try_get("unban_reason")?,
			moderator: row
				.try_get("unbanned_by_name")
				.and_then(|name| Ok((name, row.try_get("unbanned_by_id")?)))
				.map(|(name, id)| ModeratorInfo { id, name })
				.ok(),
			created_on: row.try_get("unban_created_on")?,
		})
	}
}

/// The ban durations moderators can choose from. Omitting a duration makes the ban permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BanDuration {
	/// One hour.
	#[serde(rename = "1h")]
	OneHour,

	/// 24 hours.
	#[serde(rename = "24h")]
	OneDay,

	/// 7 days.
	#[serde(rename = "7d")]
	OneWeek,

	/// 30 days.
	#[serde(rename = "30d")]
	OneMonth,
}

impl BanDuration {
	/// Stringified version of this duration, as shown in mod logs.
	pub const fn as_str(&self) -> &'static str {
		match *self {
			Self::OneHour => "1h",
			Self::OneDay => "24h",
			Self::OneWeek => "7d",
			Self::OneMonth => "30d",
		}
	}

	/// How long a ban of this duration lasts.
	pub fn duration(&self) -> Duration {
		match *self {
			Self::OneHour => Duration::hours(1),
			Self::OneDay => Duration::hours(24),
			Self::OneWeek => Duration::days(7),
			Self::OneMonth => Duration::days(30),
		}
	}
}

/// How many days after a ban is created its appeal window opens.
pub const APPEAL_DELAY_DAYS: i64 = 14;

/// Request payload for submitting a new ban.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewBan {
	/// The player who should be banned.
	pub player: PlayerIdentifier,

	/// The reason for the ban.
	pub reason: String,

	/// Internal moderator notes.
	pub notes: Option<String>,

	/// How long the ban should last. Omit for a permanent ban.
	pub duration: Option<BanDuration>,
}

/// Response body for submitting a new ban.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CreatedBan {
	/// The ban's ID.
	pub ban_id: BanID,
}

/// Request payload for updating an existing ban.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BanUpdate {
	/// A new ban reason.
	pub reason: Option<String>,

	/// New moderator notes.
	///
	/// If this field is omitted, nothing will happen.
	/// If it is explicitly set to `null`, the notes will be cleared.
	pub notes: Option<Option<String>>,

	/// A new expiration date.
	///
	/// If this field is omitted, nothing will happen.
	/// If it is explicitly set to `null`, the ban becomes permanent.
	pub expires_on: Option<Option<DateTime<Utc>>>,
}

/// Request payload for submitting an unban.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewUnban {
	/// The reason for the unban.
	pub reason: String,
}

/// Response body for creating a new unban.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CreatedUnban {
	/// The unban's ID.
	pub unban_id: UnbanID,
}

#[cfg(test)]
mod tests {
	use super::BanDuration;

	#[test]
	fn durations_deserialize_from_their_labels() {
		assert_eq!(
			serde_json::from_str::<BanDuration>("\"24h\"").ok(),
			Some(BanDuration::OneDay),
		);
		assert_eq!(
			serde_json::from_str::<BanDuration>("\"30d\"").ok(),
			Some(BanDuration::OneMonth),
		);
		assert!(serde_json::from_str::<BanDuration>("\"2d\"").is_err());
	}

	#[test]
	fn durations_match_their_labels() {
		assert_eq!(BanDuration::OneWeek.duration(), chrono::Duration::days(7));
		assert_eq!(BanDuration::OneWeek.as_str(), "7d");
	}
}
