//! Integration tests for promo codes.

use serde_json::json;

use super::Context;

/// Redeems `code` for `roblox_id` via the game surface.
async fn redeem(ctx: &Context, roblox_id: u64, code: &str) -> reqwest::Result<reqwest::Response> {
	ctx.http_client
		.post(ctx.url("/game/promo-codes/redeem"))
		.header("x-api-key", ctx.game_key.to_string())
		.json(&json!({ "roblox_id": roblox_id, "code": code }))
		.send()
		.await
}

#[tokio::test]
async fn redeeming_consumes_uses() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	sqlx::query("INSERT INTO PromoCodes (code, reward, max_uses) VALUES ('LAUNCH', '100 gems', 1)")
		.execute(&ctx.database)
		.await?;

	let response = redeem(&ctx, 1001, "  launch ").await?;

	assert_eq!(response.status(), 200, "codes are matched case-insensitively");

	let body = response.json::<serde_json::Value>().await?;

	assert_eq!(body["reward"], "100 gems", "wrong reward");

	let response = redeem(&ctx, 1002, "LAUNCH").await?;

	assert_eq!(response.status(), 409, "the only use is gone");

	let response = redeem(&ctx, 1001, "NOPE").await?;

	assert_eq!(response.status(), 404, "unknown codes are a 404");

	Ok(())
}

#[tokio::test]
async fn unlimited_codes_never_run_out() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	sqlx::query(
		r"
		INSERT INTO
		  PromoCodes (code, reward, uses, max_uses)
		VALUES
		  ('FOREVER', '1 coin', 2000000, 1000000)
		",
	)
	.execute(&ctx.database)
	.await?;

	for _ in 0..2 {
		let response = redeem(&ctx, 1001, "FOREVER").await?;

		assert_eq!(response.status(), 200, "unlimited codes always redeem");
	}

	Ok(())
}

#[tokio::test]
async fn listing_excludes_exhausted_codes() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	sqlx::query(
		r"
		INSERT INTO
		  PromoCodes (code, reward, uses, max_uses)
		VALUES
		  ('GONE', '1 coin', 1, 1),
		  ('OPEN', '1 coin', 0, 5)
		",
	)
	.execute(&ctx.database)
	.await?;

	let codes = ctx
		.http_client
		.get(ctx.url("/game/promo-codes"))
		.header("x-api-key", ctx.game_key.to_string())
		.send()
		.await?
		.json::<serde_json::Value>()
		.await?;

	let codes = codes
		.as_array()
		.expect("response is an array")
		.iter()
		.map(|code| code["code"].as_str().expect("codes are strings").to_owned())
		.collect::<Vec<_>>();

	assert_eq!(codes, ["OPEN"], "only codes with uses left are listed");

	Ok(())
}
