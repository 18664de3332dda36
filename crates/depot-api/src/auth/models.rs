use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use uuid::Uuid;

/// Verified requester identity, resolved by the auth middleware before any
/// core operation runs and stored in request extensions. The core trusts
/// this id as given; authenticating it is the middleware's job.
#[derive(Debug, Clone, Copy)]
pub struct RequesterContext {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for RequesterContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequesterContext>()
            .copied()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new(
                        "Missing requester context",
                        "MISSING_REQUESTER_CONTEXT",
                    )),
                )
            })
    }
}
