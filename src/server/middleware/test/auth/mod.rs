use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::Duration;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    util::token::JwtKeys,
};

mod require;

fn keys() -> JwtKeys {
    JwtKeys::new("test-secret", Duration::hours(1))
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
