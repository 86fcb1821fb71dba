//! Request extractors whose rejections render as `AppError`.
//!
//! axum's own `Json` and `Query` reject malformed input with a plain-text 400/415/422.
//! These wrappers delegate to them and turn the rejection into a `BadRequest`, so every
//! client error carries the `{"error": ...}` body.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::server::error::AppError;

/// JSON request body, also usable as a JSON response.
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;

        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string parameters.
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state).await?;

        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{self, header},
    };
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize, Debug)]
    struct Login {
        email: String,
        #[allow(dead_code)]
        password: String,
    }

    #[derive(Deserialize, Debug)]
    struct Paging {
        page: Option<u64>,
    }

    fn json_request(body: &str) -> Request {
        http::Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let result = Json::<Login>::from_request(json_request(r#"{"email":"a@b.c"}"#), &()).await;

        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("password")),
            other => panic!("expected BadRequest, got {:?}", other.map(|j| j.0)),
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let req = http::Request::post("/")
            .body(Body::from(r#"{"email":"a@b.c","password":"x"}"#))
            .unwrap();

        let result = Json::<Login>::from_request(req, &()).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn valid_body_is_extracted() {
        let Json(login) =
            Json::<Login>::from_request(json_request(r#"{"email":"a@b.c","password":"x"}"#), &())
                .await
                .unwrap();

        assert_eq!(login.email, "a@b.c");
    }

    #[tokio::test]
    async fn mistyped_query_is_bad_request() {
        let (mut parts, _) = http::Request::get("/?page=abc").body(()).unwrap().into_parts();

        let result = Query::<Paging>::from_request_parts(&mut parts, &()).await;

        match result {
            Err(AppError::BadRequest(_)) => {}
            other => panic!("expected BadRequest, got {:?}", other.map(|q| q.0)),
        }
    }

    #[tokio::test]
    async fn valid_query_is_extracted() {
        let (mut parts, _) = http::Request::get("/?page=3").body(()).unwrap().into_parts();

        let Query(paging) = Query::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(paging.page, Some(3));
    }
}
