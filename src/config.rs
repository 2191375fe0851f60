//! Startup configuration sourced from the process environment.
//!
//! Every knob of the relay lives here: the application key pair registered with the provider, the
//! callback address, the provider endpoints, the listen port, and the outbound deadline. The
//! configuration is built once at startup and shared behind [`Arc`]; nothing mutates it
//! afterwards.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

const ENV_PUBLIC_KEY: &str = "YURBA_PUBLIC_KEY";
const ENV_SECRET_KEY: &str = "YURBA_SECRET_KEY";
const ENV_REDIRECT_URL: &str = "YURBA_REDIRECT_URL";
const ENV_LOGIN_URL: &str = "YURBA_LOGIN_URL";
const ENV_API_URL: &str = "YURBA_API_URL";
const ENV_LISTEN_PORT: &str = "YURBA_LISTEN_PORT";
const ENV_UPSTREAM_TIMEOUT_SECS: &str = "YURBA_UPSTREAM_TIMEOUT_SECS";

const DEFAULT_REDIRECT_URL: &str = "http://localhost:3000/redirect";
const DEFAULT_LOGIN_URL: &str = "https://yurba.one/login/";
const DEFAULT_API_URL: &str = "https://api.yurba.one/";
const DEFAULT_LISTEN_PORT: &str = "3000";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: &str = "10";

/// Immutable relay configuration, fixed at startup.
#[derive(Clone, Debug)]
pub struct RelayConfig {
	/// Public application identifier advertised in the login redirect.
	pub public_key: String,
	/// Pre-shared secret sent to the profile API in the `Secret-Key` header.
	pub secret_key: String,
	/// Callback address registered with the provider, echoed verbatim in the login redirect.
	pub redirect_url: String,
	/// Provider login page the browser is sent to.
	pub login_url: Url,
	/// Base URL of the provider's server-to-server API.
	pub api_url: Url,
	/// TCP port the relay listens on.
	pub listen_port: u16,
	/// Deadline applied to every outbound profile request.
	pub upstream_timeout: Duration,
}
impl RelayConfig {
	/// Builds the configuration from the process environment, loading a `.env` file first when
	/// one is present.
	pub fn from_env() -> Result<Self, ConfigError> {
		dotenvy::dotenv().ok();

		Self::from_lookup(|var| env::var(var).ok())
	}

	/// Builds the configuration from an arbitrary variable lookup.
	///
	/// Unset variables fall back to the provider's well-known endpoints, port 3000, and a
	/// 10-second outbound deadline. The key pair defaults to empty strings; the relay still runs
	/// but the provider will reject its calls.
	pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
		let value_of =
			|var, default: &str| lookup(var).unwrap_or_else(|| default.to_owned());
		let login_url = parse_url(ENV_LOGIN_URL, &value_of(ENV_LOGIN_URL, DEFAULT_LOGIN_URL))?;
		let api_url = parse_url(ENV_API_URL, &value_of(ENV_API_URL, DEFAULT_API_URL))?;
		let listen_port = value_of(ENV_LISTEN_PORT, DEFAULT_LISTEN_PORT)
			.parse::<u16>()
			.map_err(|source| ConfigError::InvalidNumber { var: ENV_LISTEN_PORT, source })?;
		let timeout_secs =
			value_of(ENV_UPSTREAM_TIMEOUT_SECS, DEFAULT_UPSTREAM_TIMEOUT_SECS)
				.parse::<u64>()
				.map_err(|source| ConfigError::InvalidNumber {
					var: ENV_UPSTREAM_TIMEOUT_SECS,
					source,
				})?;

		Ok(Self {
			public_key: value_of(ENV_PUBLIC_KEY, ""),
			secret_key: value_of(ENV_SECRET_KEY, ""),
			redirect_url: value_of(ENV_REDIRECT_URL, DEFAULT_REDIRECT_URL),
			login_url,
			api_url,
			listen_port,
			upstream_timeout: Duration::from_secs(timeout_secs),
		})
	}
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidUrl { var, source })
}
