//! Roblox Users.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::RobloxID;
use crate::{Error, Result};

/// Roblox Users API URL for fetching users by ID.
const USERS_API_URL: &str = "https://users.roblox.com/v1/users";

/// Roblox Users API URL for resolving usernames.
const USERNAMES_API_URL: &str = "https://users.roblox.com/v1/usernames/users";

/// Information about a Roblox user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
	/// The user's Roblox ID.
	pub id: RobloxID,

	/// The user's username.
	pub name: String,

	/// The user's display name.
	#[serde(rename = "displayName")]
	pub display_name: String,
}

impl User {
	/// Fetches the user with the given `roblox_id` from the Roblox Users API.
	#[tracing::instrument(level = "debug", skip(http_client))]
	pub async fn fetch(roblox_id: RobloxID, http_client: &reqwest::Client) -> Result<Self> {
		let url = format!("{USERS_API_URL}/{roblox_id}");
		let response = http_client.get(url).send().await?;

		if response.status() == reqwest::StatusCode::NOT_FOUND {
			return Err(Error::not_found("roblox user"));
		}

		if let Err(error) = response.error_for_status_ref() {
			let error = Error::external_api_call(error);
			let response_body = response.text().await.ok();

			tracing::error!(?error, ?response_body, "failed to fetch roblox user");

			return Err(error.context(format!("response body: {response_body:?}")));
		}

		let user = response.json::<Self>().await?;

		Ok(user)
	}

	/// Resolves the user with the given `username` via the Roblox Users API.
	#[tracing::instrument(level = "debug", skip(http_client))]
	pub async fn fetch_by_username(username: &str, http_client: &reqwest::Client) -> Result<Self> {
		#[allow(clippy::missing_docs_in_private_items)]
		#[derive(Deserialize)]
		struct Helper {
			data: Vec<User>,
		}

		let response = http_client
			.post(USERNAMES_API_URL)
			.json(&json!({
				"usernames": [username],
				"excludeBannedUsers": false,
			}))
			.send()
			.await?;

		if let Err(error) = response.error_for_status_ref() {
			let error = Error::external_api_call(error);
			let response_body = response.text().await.ok();

			tracing::error!(?error, ?response_body, "failed to resolve roblox username");

			return Err(error.context(format!("response body: {response_body:?}")));
		}

		response
			.json::<Helper>()
			.await?
			.data
			.into_iter()
			.next()
			.ok_or_else(|| Error::not_found("roblox user"))
	}
}

#[cfg(test)]
mod tests {
	use super::User;

	#[test]
	fn deserializes_users_api_response() {
		let json = r#"
		{
			"description": "some description",
			"created": "2010-03-14T12:00:00.000Z",
			"isBanned": false,
			"id": 156,
			"name": "builderman",
			"displayName": "builderman"
		}
		"#;

		let user = serde_json::from_str::<User>(json).expect("valid user payload");

		assert_eq!(*user.id, 156);
		assert_eq!(user.name, "builderman");
	}

	#[test]
	fn profile_url_contains_the_id() {
		let url = crate::roblox::RobloxID(156).profile_url();

		assert_eq!(url.as_str(), "https://www.roblox.com/users/156/profile");
	}
}
