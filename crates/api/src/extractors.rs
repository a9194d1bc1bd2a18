//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use splitter_shared::AppError;

use crate::response::ApiError;

/// JSON body extractor whose rejection is rendered as an `INVALID_JSON` envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_json(&rejection)),
        }
    }
}

fn invalid_json(rejection: &JsonRejection) -> ApiError {
    AppError::InvalidJson(rejection.body_text()).into()
}
