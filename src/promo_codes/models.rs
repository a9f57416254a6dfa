//! Types for modeling promo codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

use crate::make_id;
use crate::moderators::ModeratorInfo;

make_id!(PromoCodeID as u64);

/// Codes with a `max_uses` of at least this value can be redeemed indefinitely.
pub const UNLIMITED_USES: u32 = 1_000_000;

/// Whether a code with the given counters can still be redeemed.
pub const fn has_uses_left(uses: u32, max_uses: u32) -> bool {
	max_uses >= UNLIMITED_USES || uses < max_uses
}

/// A promo code.
#[derive(Debug, Serialize, ToSchema)]
pub struct PromoCode {
	/// The code's ID.
	pub id: PromoCodeID,

	/// The code itself. Always uppercase.
	pub code: String,

	/// The reward granted when redeeming this code.
	pub reward: String,

	/// How often this code has been redeemed.
	pub uses: u32,

	/// How often this code can be redeemed in total.
	pub max_uses: u32,

	/// Whether this code is currently redeemable.
	pub is_active: bool,

	/// The moderator who created this code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_by: Option<ModeratorInfo>,

	/// When this code was created.
	pub created_on: DateTime<Utc>,
}

impl FromRow<'_, MySqlRow> for PromoCode {
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self> {
		Ok(Self {
			id: row.try_get("id")?,
			code: row.try_get("code")?,
			reward: row.try_get("reward")?,
			uses: row.try_get("uses")?,
			max_uses: row.try_get("max_uses")?,
			is_active: row.try_get("is_active")?,
			created_by: row
				.try_get("created_by_name")
				.and_then(|name| Ok((name, row.try_get("created_by_id")?)))
				.map(|(name, id)| ModeratorInfo { id, name })
				.ok(),
			created_on: row.try_get("created_on")?,
		})
	}
}

/// Request payload for creating a new promo code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewPromoCode {
	/// The code itself. Will be uppercased.
	pub code: String,

	/// The reward granted when redeeming this code.
	pub reward: String,

	/// How often this code can be redeemed in total. Omit for unlimited uses.
	pub max_uses: Option<u32>,
}

/// Response body for creating a new promo code.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CreatedPromoCode {
	/// The code's ID.
	pub code_id: PromoCodeID,
}

/// Request payload for updating an existing promo code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PromoCodeUpdate {
	/// A new reward.
	pub reward: Option<String>,

	/// A new maximum number of uses.
	pub max_uses: Option<u32>,

	/// Whether the code should be redeemable.
	pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
	use super::{has_uses_left, UNLIMITED_USES};

	#[test]
	fn exhausted_codes_have_no_uses_left() {
		assert!(has_uses_left(0, 1));
		assert!(has_uses_left(4, 5));
		assert!(!has_uses_left(5, 5));
		assert!(!has_uses_left(6, 5));
	}

	#[test]
	fn codes_at_the_sentinel_never_run_out() {
		assert!(has_uses_left(u32::MAX, UNLIMITED_USES));
		assert!(has_uses_left(u32::MAX, UNLIMITED_USES + 1));
	}
}
