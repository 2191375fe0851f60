//! Tracing bootstrap for the relay binary.

// crates.io
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber with an env-derived filter.
///
/// `RUST_LOG` wins when set; otherwise the relay logs at info together with `tower_http` request
/// traces.
pub fn init_tracing() {
	tracing_subscriber::registry()
		.with(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "yurba_login_relay=info,tower_http=info".into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();
}
