// std
use std::{collections::HashMap, sync::Arc, time::Duration};
// crates.io
use async_trait::async_trait;
use axum::{
	Router,
	body::{Body, to_bytes},
	http::{Request, StatusCode, header::LOCATION},
};
use tower::ServiceExt;
use url::Url;
// self
use yurba_login_relay::{
	config::RelayConfig,
	error::{Error, Result},
	profile::UserProfile,
	resolver::ProfileResolver,
	server::{RelayState, router},
};

#[derive(Clone)]
enum StubOutcome {
	Profile(UserProfile),
	UpstreamStatus(String),
}

struct StubResolver {
	outcome: StubOutcome,
}
#[async_trait]
impl ProfileResolver for StubResolver {
	async fn resolve(&self, _token: &str, _timeout: Duration) -> Result<UserProfile> {
		match &self.outcome {
			StubOutcome::Profile(profile) => Ok(profile.clone()),
			StubOutcome::UpstreamStatus(status) =>
				Err(Error::UpstreamStatus { status: status.clone() }),
		}
	}
}

fn test_config() -> RelayConfig {
	let vars: HashMap<&'static str, String> = [
		("YURBA_PUBLIC_KEY", "pk-test"),
		("YURBA_SECRET_KEY", "sk-test"),
		("YURBA_REDIRECT_URL", "http://localhost:3000/redirect"),
	]
	.into_iter()
	.map(|(var, value)| (var, value.to_owned()))
	.collect();

	RelayConfig::from_lookup(|var| vars.get(var).cloned())
		.expect("Failed to build test configuration.")
}

fn test_router(outcome: StubOutcome) -> Router {
	let config = Arc::new(test_config());
	let resolver: Arc<dyn ProfileResolver> = Arc::new(StubResolver { outcome });

	router(RelayState::new(config, resolver))
}

fn alice() -> UserProfile {
	UserProfile {
		id: 42,
		name: "Alice".into(),
		surname: "Liddell".into(),
		link: "alice".into(),
		avatar: 7,
		sub: 1,
		verify: "Verified".into(),
		ban: 0,
		emoji: "🦀".into(),
		cosmetic_avatar: 1,
		comments_state: 2,
		relationship_state: "None".into(),
	}
}

async fn send(router: Router, uri: &str) -> (StatusCode, String) {
	let request =
		Request::builder().uri(uri).body(Body::empty()).expect("Failed to build test request.");
	let response = router.oneshot(request).await.expect("Router should be infallible.");
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read the response body.");
	let body = String::from_utf8(bytes.to_vec()).expect("Response body should be UTF-8.");

	(status, body)
}

#[tokio::test]
async fn root_redirects_to_the_provider_login_page() {
	let router = test_router(StubOutcome::Profile(alice()));
	let request =
		Request::builder().uri("/").body(Body::empty()).expect("Failed to build test request.");
	let response = router.oneshot(request).await.expect("Router should be infallible.");

	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

	let location = response
		.headers()
		.get(LOCATION)
		.expect("Redirect should carry a Location header.")
		.to_str()
		.expect("Location header should be ASCII.");
	let target = Url::parse(location).expect("Location header should be a valid URL.");
	let pairs: HashMap<String, String> = target.query_pairs().into_owned().collect();

	assert_eq!(target.domain(), Some("yurba.one"));
	assert_eq!(pairs.get("publicKey").map(String::as_str), Some("pk-test"));
	assert_eq!(
		pairs.get("redirectUrl").map(String::as_str),
		Some("http://localhost:3000/redirect"),
	);
}

#[tokio::test]
async fn callback_rejects_a_non_success_flag() {
	let (status, body) =
		send(test_router(StubOutcome::Profile(alice())), "/redirect?success=0&token=abc").await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body, "Authentication failed");
}

#[tokio::test]
async fn callback_rejects_a_missing_flag() {
	let (status, body) = send(test_router(StubOutcome::Profile(alice())), "/redirect").await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body, "Authentication failed");
}

#[tokio::test]
async fn callback_rejects_an_empty_token() {
	let (status, body) =
		send(test_router(StubOutcome::Profile(alice())), "/redirect?success=1&token=").await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body, "Authentication failed");
}

#[tokio::test]
async fn callback_renders_the_resolved_profile() {
	let (status, body) = send(
		test_router(StubOutcome::Profile(alice())),
		"/redirect?success=1&token=validtoken",
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("42"));
	assert!(body.contains("Alice"));
	assert!(body.contains("RelationshipState: None"));
}

#[tokio::test]
async fn callback_surfaces_resolver_errors_verbatim() {
	let (status, body) = send(
		test_router(StubOutcome::UpstreamStatus("404 Not Found".into())),
		"/redirect?success=1&token=badtoken",
	)
	.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert!(body.starts_with("Error fetching user: "));
	assert!(body.contains("failed to get user: 404 Not Found"));
}

#[tokio::test]
async fn resubmitted_callbacks_resolve_independently() {
	let router = test_router(StubOutcome::Profile(alice()));

	for _ in 0..2 {
		let (status, body) = send(router.clone(), "/redirect?success=1&token=validtoken").await;

		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("Alice"));
	}
}
