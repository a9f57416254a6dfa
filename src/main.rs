use anyhow::Context;
use rbx_mod_api::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARN: failed to load `.env` file: {error}");
	}

	// Has to stay alive until the program exits, so the file logger can flush.
	let _guard = rbx_mod_api::logging::init().context("initialize logging")?;

	let config = Config::new().context("load config")?;

	rbx_mod_api::run(config).await
}
