//! HTTP surface of the relay: the login redirect, the provider callback, and the serve loop.

// std
use std::net::SocketAddr;
// crates.io
use axum::{
	Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Redirect, Response},
	routing::get,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
// self
use crate::{
	_prelude::*,
	config::RelayConfig,
	error::{TransportError, ValidationError},
	resolver::ProfileResolver,
};

/// Shared per-process state handed to every handler.
///
/// Both members are read-only after startup; requests share them without locking.
#[derive(Clone)]
pub struct RelayState {
	/// Relay configuration, fixed at startup.
	pub config: Arc<RelayConfig>,
	/// Resolver used to exchange callback tokens for profiles.
	pub resolver: Arc<dyn ProfileResolver>,
}
impl RelayState {
	/// Bundles configuration and resolver into shareable handler state.
	pub fn new(config: Arc<RelayConfig>, resolver: Arc<dyn ProfileResolver>) -> Self {
		Self { config, resolver }
	}
}

/// Query parameters the provider attaches to the callback.
///
/// Missing parameters decode as empty strings so validation, not extraction, decides the
/// response; a bare `/redirect` is a 401, never a 400.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
	/// `"1"` exactly when the provider reports a successful authentication.
	#[serde(default)]
	pub success: String,
	/// Short-lived token to trade for a profile.
	#[serde(default)]
	pub token: String,
}

/// Builds the relay router: the login redirect, the callback, and request tracing.
pub fn router(state: RelayState) -> Router {
	Router::new()
		.route("/", get(login))
		.route("/redirect", get(callback))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

/// Binds the configured port and serves the relay until ctrl-c.
///
/// A failure to bind is the only process-fatal error in the relay; the caller logs it and exits
/// non-zero.
pub async fn serve(state: RelayState) -> Result<()> {
	let addr = SocketAddr::from(([0, 0, 0, 0], state.config.listen_port));
	let listener = TcpListener::bind(addr).await.map_err(TransportError::Io)?;

	tracing::info!(%addr, "Relay listening.");

	axum::serve(listener, router(state))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(TransportError::Io)?;

	Ok(())
}

async fn shutdown_signal() {
	if let Err(source) = tokio::signal::ctrl_c().await {
		tracing::error!(%source, "Failed to listen for the shutdown signal.");
	}
}

/// Redirects the browser to the provider's login page with the registered key pair.
async fn login(State(state): State<RelayState>) -> Redirect {
	let mut url = state.config.login_url.clone();

	url.query_pairs_mut()
		.append_pair("publicKey", &state.config.public_key)
		.append_pair("redirectUrl", &state.config.redirect_url);

	tracing::info!("Redirecting to the provider for authentication.");

	Redirect::temporary(url.as_str())
}

/// Handles the provider callback: validate the flag and token, resolve, render.
///
/// Resubmitted callbacks resolve again independently; the relay keeps no replay state.
async fn callback(
	State(state): State<RelayState>,
	Query(params): Query<CallbackParams>,
) -> Result<String> {
	if params.success != "1" {
		return Err(ValidationError::SuccessFlag.into());
	}
	if params.token.is_empty() {
		return Err(ValidationError::EmptyToken.into());
	}

	tracing::debug!("Authentication callback accepted; exchanging the token for a profile.");

	let profile = state.resolver.resolve(&params.token, state.config.upstream_timeout).await?;

	tracing::info!(user = profile.id, "Authenticated user resolved.");

	Ok(format!("Authenticated user:\n{profile}\n"))
}

/// Collapses the error taxonomy into the fixed response contract: validation failures render as
/// 401 with a constant body, everything else as 500 with the message interpolated.
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		match self {
			Self::Validation(source) => {
				tracing::warn!(%source, "Authentication failed.");

				(StatusCode::UNAUTHORIZED, "Authentication failed".to_owned()).into_response()
			},
			other => {
				tracing::error!(error = %other, "Error fetching user.");

				(StatusCode::INTERNAL_SERVER_ERROR, format!("Error fetching user: {other}"))
					.into_response()
			},
		}
	}
}
