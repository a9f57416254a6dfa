//! Integration tests for ban appeals.

use serde_json::json;

use super::Context;

/// Submits an appeal for `roblox_id` via the game surface.
async fn submit(ctx: &Context, roblox_id: u64) -> reqwest::Result<reqwest::Response> {
	ctx.http_client
		.post(ctx.url("/game/appeals"))
		.header("x-api-key", ctx.game_key.to_string())
		.json(&json!({
			"roblox_id": roblox_id,
			"what_happened": "i got banned",
			"why_unban": "i did nothing wrong",
		}))
		.send()
		.await
}

/// Requests an appeal timer skip for `roblox_id` via the game surface.
async fn skip_timer(ctx: &Context, roblox_id: u64) -> reqwest::Result<reqwest::Response> {
	ctx.http_client
		.post(ctx.url("/game/appeals/skip-timer"))
		.header("x-api-key", ctx.game_key.to_string())
		.json(&json!({ "roblox_id": roblox_id }))
		.send()
		.await
}

#[tokio::test]
async fn appeals_wait_for_the_window() -> anyhow::Result<()> {
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

	let response = submit(&ctx, 1001).await?;

	assert_eq!(response.status(), 409, "the window has not opened yet");

	let response = skip_timer(&ctx, 1001).await?;

	assert_eq!(response.status(), 403, "only testers may skip the timer");

	Ok(())
}

#[tokio::test]
async fn appeals_require_an_active_ban() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	let response = submit(&ctx, 1002).await?;

	assert_eq!(response.status(), 404, "there is no ban to appeal");

	let response = skip_timer(&ctx, super::TESTER_ID).await?;

	assert_eq!(response.status(), 404, "there is no ban to skip the timer for");

	Ok(())
}

#[tokio::test]
async fn testers_can_skip_the_timer() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	sqlx::query(
		r"
		INSERT INTO
		  Bans (player_id, reason, appealable_on)
		VALUES
		  (?, 'exploiting', NOW() + INTERVAL 14 DAY)
		",
	)
	.bind(super::TESTER_ID)
	.execute(&ctx.database)
	.await?;

	let response = submit(&ctx, super::TESTER_ID).await?;

	assert_eq!(response.status(), 409, "the window has not opened yet");

	let response = skip_timer(&ctx, super::TESTER_ID).await?;

	assert_eq!(response.status(), 204, "testers may skip the timer");

	let response = submit(&ctx, super::TESTER_ID).await?;

	assert_eq!(response.status(), 201, "the window is open now");

	let appeal = response.json::<serde_json::Value>().await?;

	assert!(appeal["appeal_id"].is_u64(), "the response carries the appeal's ID");

	let response = submit(&ctx, super::TESTER_ID).await?;

	assert_eq!(response.status(), 409, "only one pending appeal per ban");

	Ok(())
}
