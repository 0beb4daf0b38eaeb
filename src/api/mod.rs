//! # API Module
//!
//! Endpoints of the short-lived local server started by `spordash auth`.
//!
//! - [`callback`] - receives the authorization code from Spotify's
//!   authorization server and exchanges it, together with the PKCE code
//!   verifier kept in shared state, for an access token.
//! - [`health`] - reports that the server is up and which version answers.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spordash::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
