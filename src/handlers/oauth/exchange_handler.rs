use crate::models::AppState;
use crate::models::oauth::OAuthParams;
use axum::{
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Everything that can go wrong while exchanging a code. Only `MissingCode`
/// is the caller's fault; the rest collapse to an empty 500.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("authorization code is missing")]
    MissingCode,
    #[error("error while exchanging code for GitHub access token: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("GitHub token endpoint responded with {0}")]
    UpstreamStatus(StatusCode),
    #[error("error while reading GitHub response: {0}")]
    ReadBody(#[source] reqwest::Error),
}

impl ExchangeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ExchangeError::MissingCode => StatusCode::BAD_REQUEST,
            ExchangeError::Transport(_)
            | ExchangeError::UpstreamStatus(_)
            | ExchangeError::ReadBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

/// The body relayed back to the browser, along with the content type GitHub
/// declared for it.
#[derive(Debug)]
pub struct TokenPayload {
    pub content_type: HeaderValue,
    pub body: Bytes,
}

impl IntoResponse for TokenPayload {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

pub async fn exchange_handler(
    State(app_state): State<AppState>,
    params: Result<Query<OAuthParams>, QueryRejection>,
) -> Result<TokenPayload, ExchangeError> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejecting unreadable query string");
            OAuthParams::default()
        }
    };

    let Some(code) = params.code() else {
        tracing::debug!("rejecting token exchange without an authorization code");
        return Err(ExchangeError::MissingCode);
    };

    request_access_token(&app_state, code).await
}

/// Trades `code` for an access token at the configured token endpoint.
///
/// Errors are logged here, where they happen. The reqwest errors have their
/// URL stripped since it carries the client secret and the code. A request
/// that cannot be built surfaces from `send` and counts as a transport error.
pub async fn request_access_token(
    app_state: &AppState,
    code: &str,
) -> Result<TokenPayload, ExchangeError> {
    let config = &app_state.config;
    let client = &app_state.http_client;

    let response = client
        .post(config.token_url.clone())
        .query(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
        ])
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| {
            let e = e.without_url();
            tracing::error!(
                error = %e,
                timeout = e.is_timeout(),
                "error while exchanging code for GitHub access token"
            );
            ExchangeError::Transport(e)
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::error!(%status, "error while exchanging code for GitHub access token");
        return Err(ExchangeError::UpstreamStatus(status));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let body = response.bytes().await.map_err(|e| {
        let e = e.without_url();
        tracing::error!(error = %e, "error while reading GitHub response");
        ExchangeError::ReadBody(e)
    })?;

    tracing::debug!(bytes = body.len(), "relaying GitHub token response");

    Ok(TokenPayload { content_type, body })
}
