//! OAuth 2.0 authorization code flow with PKCE.
//!
//! `spordash auth` starts the local callback server, sends the user to
//! Spotify's consent page and waits for [`crate::api::callback`] to drop the
//! exchanged token into the shared state. The token is then written to
//! [`crate::config::token_path`] and refreshed on demand by
//! [`TokenManager`](crate::management::TokenManager).

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;
use tokio::{sync::Mutex, time::timeout};

use crate::{
    config, error, management::TokenManager, server::start_api_server, success,
    types::{PkceToken, Token},
    utils, warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Runs the interactive login and stores the resulting token.
///
/// Exits the program when the client id or redirect URI is not configured,
/// when no token arrives within a minute, or when the token cannot be saved.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let (client_id, redirect_uri) = match (config::spotify_client_id(), config::spotify_redirect_uri())
    {
        (Ok(id), Ok(uri)) => (id, uri),
        (Err(e), _) | (_, Err(e)) => error!("Cannot start authentication: {}", e),
    };

    let verifier = utils::generate_code_verifier();
    let url = match authorize_url(
        &client_id,
        &redirect_uri,
        &utils::generate_code_challenge(&verifier),
    ) {
        Ok(url) => url,
        Err(e) => error!("Invalid authorization URL: {}", e),
    };

    *shared_state.lock().await = Some(PkceToken {
        code_verifier: verifier,
        token: None,
    });

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(url.as_str()).is_err() {
        warning!("Could not open a browser, continue the login here:\n{}", url);
    }

    let Ok(token) = timeout(CALLBACK_TIMEOUT, wait_for_token(&shared_state)).await else {
        error!("No authorization received within {:?}.", CALLBACK_TIMEOUT);
    };

    if let Err(e) = TokenManager::new(token).persist().await {
        error!("Failed to store token: {}", e);
    }
    success!("Logged in to Spotify.");
}

/// Consent page URL requesting the configured scope with an S256 challenge.
pub fn authorize_url(client_id: &str, redirect_uri: &str, challenge: &str) -> Result<Url, String> {
    let scope = config::spotify_scope();
    Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge", challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| e.to_string())
}

async fn wait_for_token(shared_state: &Mutex<Option<PkceToken>>) -> Token {
    loop {
        let token = shared_state
            .lock()
            .await
            .as_ref()
            .and_then(|pkce| pkce.token.clone());
        if let Some(token) = token {
            return token;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Trades a refresh token for a fresh access token. Spotify does not always
/// rotate refresh tokens; without a new one the old one is kept.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;
    let mut token = request_token(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id.as_str()),
    ])
    .await?;

    if token.refresh_token.is_empty() {
        token.refresh_token = refresh_token.to_string();
    }
    Ok(token)
}

/// Trades the code received on `/callback` for a token, proving possession
/// of the PKCE code verifier.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;
    let redirect_uri = config::spotify_redirect_uri().map_err(|e| e.to_string())?;

    request_token(&[
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri.as_str()),
        ("client_id", client_id.as_str()),
        ("code_verifier", verifier),
    ])
    .await
}

async fn request_token(form: &[(&str, &str)]) -> Result<Token, String> {
    let response = Client::new()
        .post(config::spotify_apitoken_url())
        .form(form)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| format!("token request failed: {}", e))?;

    let body: Value = response.json().await.map_err(|e| e.to_string())?;
    token_from_json(&body)
}

/// Builds a [`Token`] from a token endpoint response, stamped with the
/// current time.
pub fn token_from_json(json: &Value) -> Result<Token, String> {
    let Some(access_token) = json["access_token"].as_str() else {
        return Err("token response without access_token".to_string());
    };

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"].as_str().unwrap_or_default().to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(DEFAULT_EXPIRES_IN),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
