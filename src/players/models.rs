//! Types for modeling players.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

use crate::roblox::RobloxID;

/// A player, as tracked by the game.
#[derive(Debug, Serialize, ToSchema)]
pub struct Player {
	/// The player's Roblox ID.
	pub id: RobloxID,

	/// The player's username.
	pub username: String,

	/// The player's coin balance.
	pub coins: i64,

	/// The player's gem balance.
	pub gems: i64,

	/// The player's level.
	pub level: i32,

	/// The player's total playtime, in seconds.
	pub playtime_seconds: i64,

	/// When this player was first seen.
	pub first_seen: DateTime<Utc>,

	/// When this player was last seen.
	pub last_seen: DateTime<Utc>,
}

impl FromRow<'_, MySqlRow> for Player {
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self> {
		Ok(Self {
			id: row.try_get("id")?,
			username: row.try_get("username")?,
			coins: row.try_get("coins")?,
			gems: row.try_get("gems")?,
			level: row.try_get("level")?,
			playtime_seconds: row.try_get("playtime_seconds")?,
			first_seen: row.try_get("first_seen")?,
			last_seen: row.try_get("last_seen")?,
		})
	}
}

/// A minimal representation of a player, used when embedding players into other responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerInfo {
	/// The player's Roblox ID.
	pub id: RobloxID,

	/// The player's username.
	pub username: String,
}

/// A way of identifying a player in requests; either by Roblox ID, or by username.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PlayerIdentifier {
	/// A Roblox ID.
	ID(RobloxID),

	/// A username.
	Name(String),
}

impl Display for PlayerIdentifier {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match *self {
			Self::ID(id) => write!(f, "{id}"),
			Self::Name(ref name) => f.write_str(name),
		}
	}
}

impl PlayerIdentifier {
	/// Resolves this identifier into a Roblox ID.
	///
	/// Usernames are first looked up locally, and only go through the Roblox Users API if we
	/// have never seen the player before.
	pub async fn resolve_id(&self, state: &'static crate::State) -> crate::Result<RobloxID> {
		match *self {
			Self::ID(id) => Ok(id),
			Self::Name(ref username) => {
				let local = sqlx::query_scalar::<_, RobloxID>(
					"SELECT id FROM Players WHERE username = ?",
				)
				.bind(username)
				.fetch_optional(&state.database)
				.await?;

				if let Some(id) = local {
					return Ok(id);
				}

				crate::roblox::User::fetch_by_username(username, &state.http_client)
					.await
					.map(|user| user.id)
			}
		}
	}

	/// Resolves this identifier into a full [`PlayerInfo`].
	///
	/// Like [`PlayerIdentifier::resolve_id()`], but also resolves the side of the identifier we
	/// don't have, again preferring local data over the Roblox Users API.
	pub async fn resolve_info(&self, state: &'static crate::State) -> crate::Result<PlayerInfo> {
		match *self {
			Self::ID(id) => {
				let local = sqlx::query_scalar::<_, String>(
					"SELECT username FROM Players WHERE id = ?",
				)
				.bind(id)
				.fetch_optional(&state.database)
				.await?;

				if let Some(username) = local {
					return Ok(PlayerInfo { id, username });
				}

				crate::roblox::User::fetch(id, &state.http_client)
					.await
					.map(|user| PlayerInfo {
						id: user.id,
						username: user.name,
					})
			}
			Self::Name(ref username) => {
				let local = sqlx::query_scalar::<_, RobloxID>(
					"SELECT id FROM Players WHERE username = ?",
				)
				.bind(username)
				.fetch_optional(&state.database)
				.await?;

				if let Some(id) = local {
					return Ok(PlayerInfo {
						id,
						username: username.clone(),
					});
				}

				crate::roblox::User::fetch_by_username(username, &state.http_client)
					.await
					.map(|user| PlayerInfo {
						id: user.id,
						username: user.name,
					})
			}
		}
	}
}

impl FromStr for PlayerIdentifier {
	type Err = std::convert::Infallible;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Ok(match value.parse::<RobloxID>() {
			Ok(id) => Self::ID(id),
			Err(_) => Self::Name(value.to_owned()),
		})
	}
}

impl<'de> Deserialize<'de> for PlayerIdentifier {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[allow(clippy::missing_docs_in_private_items)]
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Helper {
			ID(u64),
			Name(String),
		}

		Ok(match Helper::deserialize(deserializer)? {
			Helper::ID(id) => Self::ID(RobloxID(id)),
			Helper::Name(name) => match name.parse::<RobloxID>() {
				Ok(id) => Self::ID(id),
				Err(_) => Self::Name(name),
			},
		})
	}
}

/// Request payload for updating a player.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlayerUpdate {
	/// A new coin balance.
	pub coins: Option<i64>,

	/// A new gem balance.
	pub gems: Option<i64>,

	/// A new level.
	pub level: Option<i32>,

	/// A new total playtime, in seconds.
	pub playtime_seconds: Option<i64>,
}

impl PlayerUpdate {
	/// Whether this update would change anything.
	pub const fn is_empty(&self) -> bool {
		self.coins.is_none()
			&& self.gems.is_none()
			&& self.level.is_none()
			&& self.playtime_seconds.is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::PlayerIdentifier;

	#[test]
	fn identifier_parses_numbers_as_ids() {
		assert!(matches!(
			"156".parse::<PlayerIdentifier>(),
			Ok(PlayerIdentifier::ID(id)) if *id == 156,
		));
	}

	#[test]
	fn identifier_parses_everything_else_as_a_name() {
		assert!(matches!(
			"builderman".parse::<PlayerIdentifier>(),
			Ok(PlayerIdentifier::Name(ref name)) if name == "builderman",
		));
	}
}
