//! Security modifiers for the OpenAPI spec.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::openapi::OpenApi;

/// Security modifier for the OpenAPI spec.
pub struct Security;

impl utoipa::Modify for Security {
	fn modify(&self, openapi: &mut OpenApi) {
		let game_server_key = SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
			crate::authentication::API_KEY_HEADER,
		)));

		let moderator_key = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
		let components = openapi.components.get_or_insert_with(Default::default);

		components.add_security_schemes_from_iter([
			("Game Server Key", game_server_key),
			("Moderator Key", moderator_key),
		])
	}
}
