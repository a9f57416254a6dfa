//! Everything related to moderator key authentication.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use crate::authorization::Permissions;
use crate::moderators::ModeratorID;
use crate::{Error, Result, State};

/// An authenticated moderator.
///
/// This type acts both as an extractor and as proof of authorization: the `REQUIRED_PERMISSIONS`
/// const parameter encodes the [`Permissions`] a moderator needs in order to pass extraction.
/// Moderators holding [`Permissions::ADMIN`] always pass.
#[derive(Debug, Clone)]
pub struct Moderator<const REQUIRED_PERMISSIONS: u32 = 0> {
	/// The moderator's ID.
	pub id: ModeratorID,

	/// The moderator's name.
	pub name: String,

	/// The permissions this moderator holds.
	pub permissions: Permissions,
}

#[async_trait]
impl<const REQUIRED_PERMISSIONS: u32> FromRequestParts<&'static State>
	for Moderator<REQUIRED_PERMISSIONS>
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &&'static State,
	) -> Result<Self> {
		let key = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
			.await?
			.token()
			.parse::<Uuid>()
			.map_err(|err| Error::invalid_key().context(err))?;

		let row = sqlx::query(
			r"
			SELECT
			  m.id,
			  m.name,
			  m.permissions,
			  c.expires_on
			FROM
			  Credentials c
			  JOIN Moderators m ON m.id = c.moderator_id
			WHERE
			  c.`key` = ?
			",
		)
		.bind(key)
		.fetch_optional(&state.database)
		.await?
		.ok_or_else(Error::invalid_key)?;

		let expires_on = row.try_get::<Option<DateTime<Utc>>, _>("expires_on")?;

		if matches!(expires_on, Some(timestamp) if timestamp < Utc::now()) {
			return Err(Error::expired_key());
		}

		let moderator = Self {
			id: row.try_get("id")?,
			name: row.try_get("name")?,
			permissions: row.try_get("permissions")?,
		};

		let required_permissions = Permissions::new(REQUIRED_PERMISSIONS);

		if !(moderator.permissions.contains(required_permissions)
			|| moderator.permissions.contains(Permissions::ADMIN))
		{
			return Err(Error::insufficient_permissions(required_permissions));
		}

		debug!(moderator.id = %moderator.id, moderator.name = %moderator.name, "authenticated moderator");

		Ok(moderator)
	}
}
