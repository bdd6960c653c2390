//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs while
//! `spotfill auth` waits for the user to log in.
//!
//! ## Endpoints
//!
//! - [`callback`] - Target of Spotify's authorization redirect. Completes the
//!   PKCE flow by exchanging the authorization code and the stored code
//!   verifier for an access token.
//! - [`health`] - Returns the application name, status and version, handy to
//!   check that the redirect port is reachable before logging in.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotfill::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Binds the router to `SERVER_ADDRESS`
//! - [`crate::spotify::auth`] - Code exchange and the flow waiting on the callback

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
