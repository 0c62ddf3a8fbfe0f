//! Validated query and JSON extractors that reject with [`ApiError`].

use std::fmt::Display;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use axum_valid::{Valid, ValidRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// Query string deserialized and validated; malformed input becomes `VALIDATION_ERROR`.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

/// JSON body deserialized and validated; malformed input becomes `VALIDATION_ERROR`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<E: Display> From<ValidRejection<E>> for ApiError {
    fn from(rejection: ValidRejection<E>) -> Self {
        match rejection {
            ValidRejection::Valid(errors) => ApiError::BadRequest(errors.to_string()),
            ValidRejection::Inner(inner) => ApiError::BadRequest(inner.to_string()),
        }
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Valid(Query(value)) = Valid::<Query<T>>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Valid(Json(value)) = Valid::<Json<T>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
