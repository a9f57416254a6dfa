//! Types for interacting with Roblox.
//!
//! Players are identified by their Roblox user ID everywhere in this API. The [`User`] type can
//! be fetched from the [Roblox Users API] to resolve usernames.
//!
//! [Roblox Users API]: https://users.roblox.com/docs

use url::Url;

use crate::make_id;

mod user;
pub use user::User;

make_id!(RobloxID as u64);

impl RobloxID {
	/// Returns the URL to this user's Roblox profile.
	pub fn profile_url(&self) -> Url {
		let url = format!("https://www.roblox.com/users/{self}/profile");

		Url::parse(&url).expect("hardcoded URL is valid")
	}
}
