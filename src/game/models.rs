//! Types for the game-facing API surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bans::BanID;
use crate::roblox::RobloxID;
use crate::warnings::WarningID;

/// Response body for `GET /game/bans/{roblox_id}`.
///
/// The game shows banned players a kick screen with the ban reason and, once the appeal window
/// has opened, an appeal form. Until then it shows a countdown.
#[derive(Debug, Serialize, ToSchema)]
pub struct BanStatus {
	/// Whether the player is currently banned.
	pub is_banned: bool,

	/// The player's active ban, if they have one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ban: Option<ActiveBan>,
}

impl BanStatus {
	/// The status for players without an active ban.
	pub const fn not_banned() -> Self {
		Self {
			is_banned: false,
			ban: None,
		}
	}

	/// The status for players with an active ban.
	pub const fn banned(ban: ActiveBan) -> Self {
		Self {
			is_banned: true,
			ban: Some(ban),
		}
	}
}

/// A ban that is currently in effect, as reported to the game.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveBan {
	/// The ban's ID. The game needs this to submit appeals.
	pub ban_id: BanID,

	/// The reason the player was banned for.
	pub reason: String,

	/// When this ban will expire. `null` means the ban is permanent.
	pub expires_on: Option<DateTime<Utc>>,

	/// When the player may submit an appeal for this ban.
	pub appealable_on: DateTime<Utc>,

	/// How many seconds are left until the appeal window opens.
	///
	/// This truncates toward zero, so it hits 0 up to a second early; `can_appeal` decides
	/// whether the window is actually open.
	pub appeal_countdown: u64,

	/// Whether the player may submit an appeal right now.
	pub can_appeal: bool,
}

impl ActiveBan {
	/// Evaluates the appeal window of a ban at the given point in time.
	pub fn evaluate(
		ban_id: BanID,
		reason: String,
		expires_on: Option<DateTime<Utc>>,
		appealable_on: DateTime<Utc>,
		now: DateTime<Utc>,
	) -> Self {
		// `num_seconds()` truncates toward zero, so the countdown alone cannot decide whether
		// the window is open; compare the timestamps directly.
		let can_appeal = now >= appealable_on;
		let appeal_countdown = (appealable_on - now)
			.num_seconds()
			.try_into()
			.unwrap_or_default();

		Self {
			ban_id,
			reason,
			expires_on,
			appealable_on,
			appeal_countdown,
			can_appeal,
		}
	}

	/// Whether a ban with the given expiration date has expired at the given point in time.
	pub fn is_expired(expires_on: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
		matches!(expires_on, Some(expires_on) if expires_on <= now)
	}
}

/// Response body for `GET /game/warnings/{roblox_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerWarnings {
	/// How many warnings the player has.
	pub count: u64,

	/// The warnings themselves, newest first.
	pub warnings: Vec<PlayerWarning>,
}

/// A single warning, as reported to the game.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerWarning {
	/// The warning's ID.
	pub id: WarningID,

	/// The reason for the warning.
	pub reason: String,

	/// When this warning was issued.
	pub created_on: DateTime<Utc>,
}

/// Request payload for `PUT /game/players`.
///
/// The game syncs this snapshot periodically and on player join/leave.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlayerSync {
	/// The player's Roblox ID.
	pub roblox_id: RobloxID,

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
}

/// An active promo code, as reported to the game.
#[derive(Debug, Serialize, ToSchema)]
pub struct PromoCodeInfo {
	/// The code itself.
	pub code: String,

	/// The reward granted when redeeming this code.
	pub reward: String,
}

/// Request payload for `POST /game/promo-codes/redeem`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemRequest {
	/// The player redeeming the code.
	pub roblox_id: RobloxID,

	/// The code to redeem. Matched case-insensitively.
	pub code: String,
}

/// Response body for `POST /game/promo-codes/redeem`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RedeemedCode {
	/// The reward to grant the player.
	pub reward: String,
}

/// Request payload for `POST /game/appeals`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AppealSubmission {
	/// The player submitting the appeal.
	pub roblox_id: RobloxID,

	/// The player's account of what happened.
	pub what_happened: String,

	/// Why the player believes they should be unbanned.
	pub why_unban: String,

	/// Anything else the player wants to add.
	pub additional_info: Option<String>,
}

/// Request payload for `POST /game/appeals/skip-timer`.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct SkipTimerRequest {
	/// The player whose appeal timer should be skipped.
	pub roblox_id: RobloxID,
}

#[cfg(test)]
mod tests {
	use chrono::{Duration, Utc};

	use super::ActiveBan;
	use crate::bans::BanID;

	#[test]
	fn appeal_countdown_counts_down_to_the_window() {
		let now = Utc::now();
		let appealable_on = now + Duration::days(3);

		let ban = ActiveBan::evaluate(BanID(1), String::from("exploiting"), None, appealable_on, now);

		assert_eq!(ban.appeal_countdown, 3 * 24 * 60 * 60);
		assert!(!ban.can_appeal);
	}

	#[test]
	fn sub_second_countdowns_keep_the_window_closed() {
		let now = Utc::now();
		let appealable_on = now + Duration::milliseconds(500);

		let ban = ActiveBan::evaluate(BanID(1), String::from("exploiting"), None, appealable_on, now);

		assert_eq!(ban.appeal_countdown, 0);
		assert!(!ban.can_appeal);
	}

	#[test]
	fn open_appeal_windows_allow_appeals() {
		let now = Utc::now();
		let appealable_on = now - Duration::hours(1);

		let ban = ActiveBan::evaluate(BanID(1), String::from("exploiting"), None, appealable_on, now);

		assert_eq!(ban.appeal_countdown, 0);
		assert!(ban.can_appeal);
	}

	#[test]
	fn expiry_is_checked_against_the_given_time() {
		let now = Utc::now();

		assert!(!ActiveBan::is_expired(None, now));
		assert!(!ActiveBan::is_expired(Some(now + Duration::hours(1)), now));
		assert!(ActiveBan::is_expired(Some(now), now));
		assert!(ActiveBan::is_expired(Some(now - Duration::hours(1)), now));
	}
}
