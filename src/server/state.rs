//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client for outbound API requests
//! - JWT keys for issuing and verifying bearer tokens
//! - The chat concierge, which also carries the fallback cafe identity

use sea_orm::DatabaseConnection;

use crate::server::{concierge::Concierge, model::cafe::CafeInfo, util::token::JwtKeys};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `JwtKeys` holds the derived signing keys
/// - `Concierge` holds a cloned HTTP client and plain strings
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for outbound requests.
    ///
    /// Configured not to follow redirects. The concierge holds a clone of it.
    pub http_client: reqwest::Client,

    /// Keys and lifetime for bearer tokens.
    pub jwt: JwtKeys,

    /// Answers chat messages, online through Gemini or offline from keyword rules.
    pub concierge: Concierge,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        jwt: JwtKeys,
        concierge: Concierge,
    ) -> Self {
        Self {
            db,
            http_client,
            jwt,
            concierge,
        }
    }

    /// Identity printed on receipts whose cafe no longer exists.
    pub fn cafe_info(&self) -> &CafeInfo {
        self.concierge.cafe()
    }
}
