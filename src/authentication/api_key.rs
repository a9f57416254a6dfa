//! Everything related to game server API key authentication.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request;
use chrono::{DateTime, Utc};
use derive_more::{Debug, Display, Into};
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Result, State};

/// The header game servers send their key in.
pub const API_KEY_HEADER: &str = "x-api-key";

/// An opaque API key belonging to a game server.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Into)]
#[debug("{name}")]
#[display("{key} ({name})")]
pub struct ApiKey {
	/// The secret key.
	#[into]
	key: Uuid,

	/// The name of the key.
	name: String,
}

impl ApiKey {
	/// Returns the name of this key.
	pub fn name(&self) -> &str {
		&self.name
	}
}

#[async_trait]
impl FromRequestParts<&'static State> for ApiKey {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &&'static State,
	) -> Result<Self> {
		let header = parts
			.headers
			.get(API_KEY_HEADER)
			.ok_or_else(|| Error::unauthorized().context("missing `x-api-key` header"))?;

		let key = header
			.to_str()
			.map_err(|err| Error::invalid_key().context(err))?
			.parse::<Uuid>()
			.map_err(|err| Error::invalid_key().context(err))?;

		let row = sqlx::query(
			r"
			SELECT
			  name,
			  expires_on
			FROM
			  Credentials
			WHERE
			  `key` = ?
			  AND moderator_id IS NULL
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

		let api_key = ApiKey {
			key,
			name: row.try_get("name")?,
		};

		debug!(?api_key, "authenticated API key");

		Ok(api_key)
	}
}
