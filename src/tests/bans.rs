//! Integration tests for bans.

use serde_json::json;
use uuid::Uuid;

use super::Context;

#[tokio::test]
async fn dashboard_reads_require_a_moderator_key() -> anyhow::Result<()> {
	let ctx = Context::new().await?;
	let paths = [
		"/bans",
		"/warnings",
		"/appeals",
		"/players",
		"/promo-codes",
		"/group-bans",
		"/moderators",
	];

	for path in paths {
		let response = ctx.http_client.get(ctx.url(path)).send().await?;

		assert_eq!(response.status(), 400, "{path} should reject missing keys");

		let response = ctx
			.http_client
			.get(ctx.url(path))
			.bearer_auth(Uuid::new_v4())
			.send()
			.await?;

		assert_eq!(response.status(), 401, "{path} should reject unknown keys");
	}

	let response = ctx
		.http_client
		.get(ctx.url("/moderators"))
		.bearer_auth(ctx.moderator_key)
		.send()
		.await?;

	assert_eq!(response.status(), 200, "valid keys should get through");

	let response = ctx
		.http_client
		.get(ctx.url("/bans"))
		.bearer_auth(ctx.moderator_key)
		.send()
		.await?;

	assert_eq!(response.status(), 204, "there are no bans yet");

	Ok(())
}

#[tokio::test]
async fn ban_checks_report_active_bans() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	sqlx::query(
		r"
		INSERT INTO
		  Bans (player_id, reason, appealable_on)
		VALUES
		  (1001, 'exploiting', NOW() + INTERVAL 14 DAY)
		",
	)
	.execute(&ctx.database)
	.await?;

	let response = ctx.http_client.get(ctx.url("/game/bans/1001")).send().await?;

	assert_eq!(response.status(), 401, "game endpoints require a key");

	let status = ctx
		.http_client
		.get(ctx.url("/game/bans/1001"))
		.header("x-api-key", ctx.game_key.to_string())
		.send()
		.await?
		.json::<serde_json::Value>()
		.await?;

	assert_eq!(status["is_banned"], true, "the player is banned");
	assert_eq!(status["ban"]["reason"], "exploiting", "wrong ban reason");
	assert_eq!(status["ban"]["can_appeal"], false, "the window has not opened");

	let status = ctx
		.http_client
		.get(ctx.url("/game/bans/1002"))
		.header("x-api-key", ctx.game_key.to_string())
		.send()
		.await?
		.json::<serde_json::Value>()
		.await?;

	assert_eq!(status["is_banned"], false, "the player is not banned");

	Ok(())
}

#[tokio::test]
async fn expired_bans_are_deactivated_lazily() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	let ban_id = sqlx::query(
		r"
		INSERT INTO
		  Bans (player_id, reason, expires_on, appealable_on)
		VALUES
		  (1002, 'spamming', NOW() - INTERVAL 1 HOUR, NOW())
		",
	)
	.execute(&ctx.database)
	.await?
	.last_insert_id();

	let status = ctx
		.http_client
		.get(ctx.url("/game/bans/1002"))
		.header("x-api-key", ctx.game_key.to_string())
		.send()
		.await?
		.json::<serde_json::Value>()
		.await?;

	assert_eq!(status["is_banned"], false, "expired bans do not count");

	let is_active = sqlx::query_scalar::<_, bool>("SELECT is_active FROM Bans WHERE id = ?")
		.bind(ban_id)
		.fetch_one(&ctx.database)
		.await?;

	assert!(!is_active, "the expired ban should have been deactivated");

	Ok(())
}

#[tokio::test]
async fn bans_can_only_be_reverted_once() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	let ban_id = sqlx::query(
		"INSERT INTO Bans (player_id, reason, appealable_on) VALUES (1001, 'exploiting', NOW())",
	)
	.execute(&ctx.database)
	.await?
	.last_insert_id();

	let response = ctx
		.http_client
		.delete(ctx.url(format!("/bans/{ban_id}")))
		.bearer_auth(ctx.moderator_key)
		.json(&json!({ "reason": "appealed on discord" }))
		.send()
		.await?;

	assert_eq!(response.status(), 201, "the first unban should succeed");

	let is_active = sqlx::query_scalar::<_, bool>("SELECT is_active FROM Bans WHERE id = ?")
		.bind(ban_id)
		.fetch_one(&ctx.database)
		.await?;

	assert!(!is_active, "reverted bans are deactivated");

	let response = ctx
		.http_client
		.delete(ctx.url(format!("/bans/{ban_id}")))
		.bearer_auth(ctx.moderator_key)
		.json(&json!({ "reason": "appealed on discord" }))
		.send()
		.await?;

	assert_eq!(response.status(), 409, "bans can only be reverted once");

	Ok(())
}
