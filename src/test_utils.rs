use crate::models::{AppConfig, AppState};
use crate::models::app_config::{CLIENT_ID_VAR, CLIENT_SECRET_VAR};

pub const TEST_ALLOWED_ORIGIN: &str = "https://www.youryearincode.com";

/// State pointing at `token_url`, with fixed test credentials.
pub fn test_state(token_url: &str) -> AppState {
    let token_url = token_url.to_string();
    let config = AppConfig::from_lookup(|key| match key {
        CLIENT_ID_VAR => Some("test-client-id".to_string()),
        CLIENT_SECRET_VAR => Some("test-client-secret".to_string()),
        "GITHUB_TOKEN_URL" => Some(token_url.clone()),
        "ALLOWED_ORIGIN" => Some(TEST_ALLOWED_ORIGIN.to_string()),
        "UPSTREAM_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();

    AppState::new(config).unwrap()
}

/// A URL on a local port nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/login/oauth/access_token")
}
