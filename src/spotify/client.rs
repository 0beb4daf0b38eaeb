use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{sync::Mutex, time::sleep};

use crate::{config, management::TokenManager};

use super::error::{UpstreamError, retry_after};

const MAX_ATTEMPTS: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Whether a request may be repeated after a 502 or a short 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Retry {
    Transient,
    Never,
}

/// Spotify Web API client authenticated with the stored OAuth token.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    /// Client for the configured API URL using the token saved by `spordash auth`.
    pub async fn from_config() -> Result<Self, String> {
        let tokens = TokenManager::load()
            .await
            .map_err(|e| format!("Failed to load token. Please run spordash auth\n Error: {}", e))?;
        Ok(Self::new(config::spotify_apiurl(), tokens))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        retry: Retry,
    ) -> Result<T, UpstreamError> {
        let url = self.url(path);
        let response = self.execute(retry, |token| self.http.get(&url).bearer_auth(token)).await?;
        decode(response).await
    }

    /// GET with URL-encoded query parameters.
    pub(crate) async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        retry: Retry,
    ) -> Result<T, UpstreamError> {
        let url = self.url(path);
        let response = self
            .execute(retry, |token| self.http.get(&url).query(query).bearer_auth(token))
            .await?;
        decode(response).await
    }

    /// GET for endpoints answering `204 No Content` when there is nothing to show.
    pub(crate) async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, UpstreamError> {
        let url = self.url(path);
        let response = self
            .execute(Retry::Transient, |token| self.http.get(&url).bearer_auth(token))
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub(crate) async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, UpstreamError> {
        let response = self.send(method, path, body).await?;
        decode(response).await
    }

    pub(crate) async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, UpstreamError> {
        let url = self.url(path);
        self.execute(Retry::Never, |token| {
            self.http
                .request(method.clone(), &url)
                .bearer_auth(token)
                .json(body)
        })
        .await
    }

    async fn execute<F>(&self, retry: Retry, build: F) -> Result<Response, UpstreamError>
    where
        F: Fn(&str) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let token = self.tokens.lock().await.get_valid_token().await;
            let response = build(&token).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if retry == Retry::Transient && attempt < MAX_ATTEMPTS {
                if status == StatusCode::BAD_GATEWAY {
                    log::debug!("Spotify answered 502, retrying in {:?}", BAD_GATEWAY_DELAY);
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue;
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    match retry_after(&response) {
                        Some(secs) if secs <= MAX_RETRY_AFTER_SECS => {
                            log::debug!("Rate limited, retrying in {} seconds", secs);
                            sleep(Duration::from_secs(secs)).await;
                            continue;
                        }
                        Some(secs) => log::warn!(
                            "Retry after has reached an abnormal high of {} seconds",
                            secs
                        ),
                        None => {}
                    }
                }
            }

            return Err(UpstreamError::from_response(response).await);
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
