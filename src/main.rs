//! Binary entry point: load configuration, wire the production resolver, serve until shutdown.

// std
use std::{process, sync::Arc};
// self
use yurba_login_relay::{
	config::RelayConfig,
	error::Result,
	obs,
	resolver::YurbaProfileResolver,
	server::{self, RelayState},
};

#[tokio::main]
async fn main() {
	obs::init_tracing();

	if let Err(source) = run().await {
		tracing::error!(%source, "Relay terminated with a fatal error.");
		process::exit(1);
	}
}

async fn run() -> Result<()> {
	let config = Arc::new(RelayConfig::from_env()?);
	let resolver = Arc::new(YurbaProfileResolver::new(&config));

	tracing::info!(port = config.listen_port, "Starting relay.");

	server::serve(RelayState::new(config, resolver)).await
}
