//! Relay-wide error types shared by the HTTP handlers and the profile resolver.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical relay error surfaced by the handlers and the resolver.
///
/// The HTTP surface collapses the taxonomy into two responses: [`Error::Validation`] renders as
/// 401, everything else as 500 with the error's message interpolated into the body.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Callback parameters failed validation.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem (environment parsing, URL or client construction).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, deadline).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Profile endpoint answered with a non-200 status.
	#[error("failed to get user: {status}")]
	UpstreamStatus {
		/// Status line reported by the profile endpoint, e.g. `404 Not Found`.
		status: String,
	},
	/// Profile endpoint returned a body that does not decode into a profile.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Callback validation failures; always answered with HTTP 401.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Provider reported a non-success flag or omitted it entirely.
	#[error("Callback success flag is missing or not \"1\".")]
	SuccessFlag,
	/// Provider omitted the callback token or sent an empty one.
	#[error("Callback token is missing or empty.")]
	EmptyToken,
}

/// Configuration failures raised at startup or while preparing an outbound call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying client builder failure.
		#[source]
		source: reqwest::Error,
	},
	/// An environment variable holds a value that does not parse as a URL.
	#[error("Environment variable `{var}` holds an invalid URL.")]
	InvalidUrl {
		/// Name of the offending variable.
		var: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An environment variable holds a value that does not parse as a number.
	#[error("Environment variable `{var}` holds an invalid number.")]
	InvalidNumber {
		/// Name of the offending variable.
		var: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: std::num::ParseIntError,
	},
	/// API base URL cannot carry additional path segments (e.g. `data:` or `mailto:`).
	#[error("API base URL cannot be extended with path segments.")]
	ApiUrlNotABase,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure or a missed deadline.
	#[error("Network error occurred while calling the profile endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: reqwest::Error,
	},
	/// Underlying IO failure surfaced while binding or serving.
	#[error("I/O error occurred while serving the relay.")]
	Io(#[from] std::io::Error),
}

/// Malformed profile payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Profile endpoint returned JSON that does not match the profile shape.
	#[error("Profile endpoint returned malformed JSON.")]
	Json {
		/// Structured parsing failure carrying the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn upstream_status_message_matches_provider_contract() {
		let err = Error::UpstreamStatus { status: "404 Not Found".into() };

		assert_eq!(err.to_string(), "failed to get user: 404 Not Found");
	}

	#[test]
	fn validation_errors_render_as_sentences() {
		assert!(ValidationError::SuccessFlag.to_string().contains("success flag"));
		assert!(ValidationError::EmptyToken.to_string().contains("token"));
	}
}
