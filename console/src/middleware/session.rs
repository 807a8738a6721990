//! Session middleware
//!
//! The browser authenticates against the inventory backend directly; the
//! console only forwards its bearer token. Every `/api/v1` route except the
//! public ones requires that token.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppError;

/// Bearer token of the browser session making the request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}

/// Require a bearer token and expose it to handlers as a `Session`
pub async fn session_middleware(
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer {
        Some(TypedHeader(Authorization(bearer))) if !bearer.token().trim().is_empty() => {
            bearer.token().to_string()
        }
        _ => {
            tracing::debug!(path = %request.uri().path(), "request without bearer token");
            return AppError::MissingSession("Missing or invalid Authorization header".into())
                .into_response();
        }
    };

    request.extensions_mut().insert(Session { token });
    next.run(request).await
}

/// Extractor for the current session.
/// Use this in handlers behind `session_middleware`.
#[derive(Clone, Debug)]
pub struct CurrentSession(pub Session);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| AppError::MissingSession("Session required".into()))
    }
}
