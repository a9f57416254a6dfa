//! Everything related to [OpenAPI].
//!
//! This project uses the [`utoipa`] crate for generating an OpenAPI specification from code.
//! The [`Spec`] struct in this module lists out all the relevant types, routes, and other metadata
//! that will be included in the spec.
//!
//! [OpenAPI]: https://spec.openapis.org/oas/latest.html

use derive_more::{Deref, DerefMut};
use itertools::Itertools;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::security::Security;

pub mod parameters;
pub mod responses;
pub mod security;

#[derive(Debug, Clone, Deref, DerefMut, OpenApi)]
#[openapi(
  info(
    title = "Roblox Moderation API",
    description = "Backend for the in-game moderation systems and the moderator dashboard.",
  ),
  modifiers(&Security),
  paths(
    crate::players::handlers::root::get,
    crate::players::handlers::by_identifier::get,
    crate::players::handlers::by_identifier::patch,

    crate::bans::handlers::root::get,
    crate::bans::handlers::root::post,
    crate::bans::handlers::by_id::get,
    crate::bans::handlers::by_id::patch,
    crate::bans::handlers::by_id::delete,

    crate::warnings::handlers::root::get,
    crate::warnings::handlers::root::post,
    crate::warnings::handlers::by_id::delete,

    crate::appeals::handlers::root::get,
    crate::appeals::handlers::by_id::get,
    crate::appeals::handlers::by_id::patch,

    crate::promo_codes::handlers::root::get,
    crate::promo_codes::handlers::root::post,
    crate::promo_codes::handlers::by_id::patch,
    crate::promo_codes::handlers::by_id::delete,

    crate::group_bans::handlers::root::get,
    crate::group_bans::handlers::root::post,
    crate::group_bans::handlers::by_id::delete,

    crate::moderators::handlers::root::get,
    crate::moderators::handlers::by_id::get,
    crate::moderators::handlers::by_id::put,

    crate::game::handlers::bans::get,
    crate::game::handlers::warnings::get,
    crate::game::handlers::players::get,
    crate::game::handlers::players::put,
    crate::game::handlers::promo_codes::get,
    crate::game::handlers::promo_codes::redeem,
    crate::game::handlers::appeals::submit,
    crate::game::handlers::appeals::skip_timer,
    crate::game::handlers::group_bans::get,
  ),
  components(
    schemas(
      crate::openapi::parameters::Offset,
      crate::openapi::parameters::Limit,
      crate::openapi::parameters::SortingOrder,

      crate::roblox::RobloxID,
      crate::roblox::User,

      crate::players::Player,
      crate::players::PlayerInfo,
      crate::players::PlayerIdentifier,
      crate::players::PlayerUpdate,

      crate::bans::Ban,
      crate::bans::BanID,
      crate::bans::BanDuration,
      crate::bans::Unban,
      crate::bans::UnbanID,
      crate::bans::NewBan,
      crate::bans::CreatedBan,
      crate::bans::BanUpdate,
      crate::bans::NewUnban,
      crate::bans::CreatedUnban,

      crate::warnings::Warning,
      crate::warnings::WarningID,
      crate::warnings::NewWarning,
      crate::warnings::CreatedWarning,

      crate::appeals::Appeal,
      crate::appeals::AppealID,
      crate::appeals::AppealStatus,
      crate::appeals::AppealReview,
      crate::appeals::CreatedAppeal,

      crate::promo_codes::PromoCode,
      crate::promo_codes::PromoCodeID,
      crate::promo_codes::NewPromoCode,
      crate::promo_codes::CreatedPromoCode,
      crate::promo_codes::PromoCodeUpdate,

      crate::group_bans::GroupBan,
      crate::group_bans::GroupBanID,
      crate::group_bans::NewGroupBan,
      crate::group_bans::CreatedGroupBan,

      crate::moderators::Moderator,
      crate::moderators::ModeratorID,
      crate::moderators::ModeratorInfo,
      crate::moderators::ModeratorUpdate,

      crate::game::BanStatus,
      crate::game::ActiveBan,
      crate::game::PlayerWarnings,
      crate::game::PlayerWarning,
      crate::game::PlayerSync,
      crate::game::PromoCodeInfo,
      crate::game::RedeemRequest,
      crate::game::RedeemedCode,
      crate::game::AppealSubmission,
      crate::game::SkipTimerRequest,
    ),
  ),
)]
#[allow(missing_docs)]
pub struct Spec(utoipa::openapi::OpenApi);

impl Spec {
	/// Creates a new [`Spec`].
	pub fn new() -> Self {
		Self(Self::openapi())
	}

	/// Returns an iterator over the registered API routes and their allowed HTTP methods.
	pub fn routes(&self) -> impl Iterator<Item = (&str, String)> {
		self.paths.paths.iter().map(|(path, handler)| {
			let methods = handler
				.operations
				.keys()
				.map(|method| format!("{method:?}").to_uppercase())
				.join(", ");

			(path.as_str(), methods)
		})
	}

	/// Generates a JSON representation of this OpenAPI spec.
	pub fn as_json(&self) -> String {
		self.to_pretty_json().expect("spec is valid")
	}

	/// Creates a [`SwaggerUi`], which can be turned into an [`axum::Router`], that will serve
	/// a SwaggerUI web page and a JSON file representing this OpenAPI spec.
	pub fn swagger_ui(self) -> SwaggerUi {
		SwaggerUi::new("/docs/swagger-ui").url("/docs/openapi.json", self.0)
	}
}
