#![cfg(feature = "http-grant")]

use authcode_core::{
    AuthClient, AuthorizationCodeGrant, CallbackParams, ClientConfig, Credentials, HttpGrant,
    TokenError, TokenParams,
};
use authcode_testing::{MockProvider, MockResponse};
use reqwest::StatusCode;
use std::time::Duration;

const REDIRECT_URI: &str = "https://myapp.test/auth/callback";

fn credentials(provider: &MockProvider) -> Credentials {
    Credentials::new(
        "test_client_id",
        "test client secret",
        provider.auth_url(),
        provider.token_url(),
    )
}

fn client(provider: &MockProvider) -> AuthClient<HttpGrant> {
    let config = ClientConfig::new("mock", credentials(provider), REDIRECT_URI, "read write");
    AuthClient::new(config).unwrap()
}

fn callback(client: &AuthClient<HttpGrant>, session_id: &str, code: &str) -> CallbackParams {
    CallbackParams::with_code(code, client.hash_session_id(session_id))
}

#[tokio::test]
async fn test_successful_exchange() {
    let provider = MockProvider::start().await;
    provider.respond_with(MockResponse::token("access-123"));
    let client = client(&provider);

    let envelope = client
        .access_token("session-1", &callback(&client, "session-1", "the/code"))
        .await;

    assert_eq!(
        envelope.to_json(),
        serde_json::json!({
            "message": "success",
            "content": { "token": "access-123", "provider": "mock" }
        })
    );

    provider.verify_calls(1);
    let request = provider.last_token_request().unwrap();
    assert_eq!(request.field("grant_type"), Some("authorization_code"));
    assert_eq!(request.field("code"), Some("the/code"));
    assert_eq!(request.field("redirect_uri"), Some(REDIRECT_URI));
    assert_eq!(request.field("client_id"), Some("test_client_id"));
    assert_eq!(request.field("client_secret"), Some("test client secret"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_csrf_mismatch_never_reaches_provider() {
    let provider = MockProvider::start().await;
    let client = client(&provider);

    let envelope = client
        .access_token("session-1", &callback(&client, "session-2", "code"))
        .await;

    assert_eq!(envelope.error_message(), Some("CSRF detected"));
    provider.verify_calls(0);
}

#[tokio::test]
async fn test_oauth_error_response() {
    let provider = MockProvider::start().await;
    provider.respond_with(MockResponse::oauth_error(
        StatusCode::BAD_REQUEST,
        "invalid_grant",
        Some("The authorization code has expired"),
    ));
    let client = client(&provider);

    let envelope = client
        .access_token("session-1", &callback(&client, "session-1", "stale"))
        .await;

    assert_eq!(
        envelope.error_message(),
        Some("The authorization code has expired")
    );
}

#[tokio::test]
async fn test_error_payload_with_ok_status() {
    let provider = MockProvider::start().await;
    provider.respond_with(MockResponse::json(
        StatusCode::OK,
        serde_json::json!({ "error": "bad_verification_code" }),
    ));
    let client = client(&provider);

    let envelope = client
        .access_token("session-1", &callback(&client, "session-1", "code"))
        .await;

    assert_eq!(envelope.error_message(), Some("bad_verification_code"));
}

#[tokio::test]
async fn test_non_json_failure() {
    let provider = MockProvider::start().await;
    provider.respond_with(MockResponse::text(
        StatusCode::SERVICE_UNAVAILABLE,
        "upstream down",
    ));
    let grant = HttpGrant::new(credentials(&provider)).unwrap();

    let result = grant
        .exchange_code(&TokenParams {
            redirect_uri: REDIRECT_URI,
            code: "code",
        })
        .await;

    assert!(matches!(result, Err(TokenError::ExchangeFailed(body)) if body == "upstream down"));
}

#[tokio::test]
async fn test_missing_access_token() {
    let provider = MockProvider::start().await;
    provider.respond_with(MockResponse::json(
        StatusCode::OK,
        serde_json::json!({ "token_type": "Bearer" }),
    ));
    let client = client(&provider);

    let envelope = client
        .access_token("session-1", &callback(&client, "session-1", "code"))
        .await;

    assert_eq!(
        envelope.error_message(),
        Some("Missing required field: access_token")
    );
}

#[tokio::test]
async fn test_timeout_is_an_error_envelope() {
    let provider = MockProvider::start().await;
    provider.respond_with(MockResponse::token("late").delay(Duration::from_secs(2)));
    let config = ClientConfig::new(
        "mock",
        credentials(&provider).timeout(Duration::from_millis(100)),
        REDIRECT_URI,
        "",
    );
    let client = AuthClient::new(config).unwrap();

    let envelope = client
        .access_token("session-1", &callback(&client, "session-1", "code"))
        .await;

    assert!(!envelope.is_success());
    assert!(envelope
        .error_message()
        .unwrap()
        .starts_with("Network error:"));
}

#[tokio::test]
async fn test_authorize_url_points_at_provider() {
    let provider = MockProvider::start().await;
    let client = client(&provider);

    let url = client.authorize_url("foobar");

    assert!(url.starts_with(&format!("{}?", provider.auth_url())));
    assert!(url.contains("state=3858f62230ac3c915f300c664312c63f"));
    assert!(url.contains("scope=read%20write"));
}
