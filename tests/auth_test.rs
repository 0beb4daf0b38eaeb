use serde_json::json;
use spordash::spotify::auth::{authorize_url, token_from_json};

#[test]
fn test_authorize_url_carries_pkce_parameters() {
    let url = authorize_url("client-123", "http://127.0.0.1:8888/callback", "challenge").unwrap();
    let params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("client_id"), Some("client-123"));
    assert_eq!(get("response_type"), Some("code"));
    assert_eq!(get("redirect_uri"), Some("http://127.0.0.1:8888/callback"));
    assert_eq!(get("code_challenge"), Some("challenge"));
    assert_eq!(get("code_challenge_method"), Some("S256"));
    assert!(get("scope").unwrap().contains("user-library-read"));
}

#[test]
fn test_token_from_json() {
    let token = token_from_json(&json!({
        "access_token": "access",
        "refresh_token": "refresh",
        "scope": "user-library-read",
        "expires_in": 1800
    }))
    .unwrap();

    assert_eq!(token.access_token, "access");
    assert_eq!(token.refresh_token, "refresh");
    assert_eq!(token.expires_in, 1800);
    assert!(token.obtained_at > 0);
}

#[test]
fn test_token_from_json_defaults() {
    let token = token_from_json(&json!({ "access_token": "access" })).unwrap();

    assert!(token.refresh_token.is_empty());
    assert_eq!(token.expires_in, 3600);
}

#[test]
fn test_token_from_json_without_access_token() {
    assert!(token_from_json(&json!({ "error": "invalid_grant" })).is_err());
}
