use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;

/// JSON body extractor whose rejection is the service's own 400 envelope.
///
/// `axum::Json` answers malformed bodies with a mix of 400/415/422 and a
/// plain-text message; every such rejection here becomes
/// `400 {"error":"Cannot parse JSON"}`. The underlying cause is logged.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => {
                warn!(error = %rejection, "rejected request body");
                Err(ApiError::bad_request("Cannot parse JSON"))
            }
        }
    }
}
