//! Token-for-profile exchange against the provider's server-to-server API.

// crates.io
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
// self
use crate::{
	_prelude::*,
	config::RelayConfig,
	error::{ConfigError, DecodeError, TransportError},
	profile::UserProfile,
};

/// Header carrying the pre-shared secret on every profile request.
pub const SECRET_KEY_HEADER: &str = "Secret-Key";

/// Exchanges a callback token for the user profile it represents.
///
/// The trait is the relay's only seam over the provider API; the HTTP surface is exercised in
/// tests with stub implementations while production wires in [`YurbaProfileResolver`].
#[async_trait]
pub trait ProfileResolver
where
	Self: 'static + Send + Sync,
{
	/// Resolves `token` into a profile, giving up after `timeout`.
	///
	/// An empty token is forwarded as-is and fails upstream; callers own non-emptiness checks.
	async fn resolve(&self, token: &str, timeout: Duration) -> Result<UserProfile>;
}

/// Production resolver backed by a per-call reqwest client.
///
/// A fresh client is built for every exchange, so the relay makes no connection-pooling
/// guarantee; each call owns its response body for exactly the duration of the exchange.
#[derive(Clone, Debug)]
pub struct YurbaProfileResolver {
	api_url: Url,
	secret_key: String,
}
impl YurbaProfileResolver {
	/// Creates a resolver bound to the configured API base and pre-shared secret.
	pub fn new(config: &RelayConfig) -> Self {
		Self { api_url: config.api_url.clone(), secret_key: config.secret_key.clone() }
	}

	/// Builds `<api_url>/apps/user/<token>` with the token escaped as one literal path segment.
	fn profile_url(&self, token: &str) -> Result<Url, ConfigError> {
		let mut url = self.api_url.clone();

		url.path_segments_mut()
			.map_err(|()| ConfigError::ApiUrlNotABase)?
			.pop_if_empty()
			.extend(["apps", "user", token]);

		Ok(url)
	}
}
#[async_trait]
impl ProfileResolver for YurbaProfileResolver {
	async fn resolve(&self, token: &str, timeout: Duration) -> Result<UserProfile> {
		let url = self.profile_url(token)?;
		let client = Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|source| ConfigError::HttpClientBuild { source })?;

		tracing::debug!(%url, "Fetching user information for the callback token.");

		let response = client
			.get(url)
			.header(SECRET_KEY_HEADER, &self.secret_key)
			.send()
			.await
			.map_err(|source| TransportError::Network { source })?;
		let status = response.status();

		if status != StatusCode::OK {
			return Err(Error::UpstreamStatus { status: status.to_string() });
		}

		let body = response.bytes().await.map_err(|source| TransportError::Network { source })?;
		let mut deserializer = serde_json::Deserializer::from_slice(&body);
		let profile: UserProfile = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DecodeError::Json { source })?;

		tracing::debug!(user = profile.id, "User information fetched successfully.");

		Ok(profile)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn resolver(base: &str) -> YurbaProfileResolver {
		YurbaProfileResolver {
			api_url: Url::parse(base).expect("Failed to parse test API base URL."),
			secret_key: "s3cret".into(),
		}
	}

	#[test]
	fn profile_url_joins_the_fixed_endpoint_path() {
		let url = resolver("https://api.yurba.one/")
			.profile_url("validtoken")
			.expect("Failed to build profile URL.");

		assert_eq!(url.as_str(), "https://api.yurba.one/apps/user/validtoken");
	}

	#[test]
	fn profile_url_handles_bases_without_trailing_slash() {
		let url = resolver("https://api.example.com/v1")
			.profile_url("t")
			.expect("Failed to build profile URL.");

		assert_eq!(url.as_str(), "https://api.example.com/v1/apps/user/t");
	}

	#[test]
	fn profile_url_escapes_the_token_as_one_segment() {
		let url = resolver("https://api.yurba.one/")
			.profile_url("a/b c")
			.expect("Failed to build profile URL.");

		assert_eq!(url.as_str(), "https://api.yurba.one/apps/user/a%2Fb%20c");
	}

	#[test]
	fn profile_url_rejects_cannot_be_a_base_urls() {
		let err = resolver("data:text/plain,hello")
			.profile_url("t")
			.expect_err("Opaque URLs should be rejected.");

		assert!(matches!(err, ConfigError::ApiUrlNotABase));
	}
}
