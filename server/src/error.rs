use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use pokedex_core::CatalogError;
use pokedex_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// `{ "message": ... }` body shared by errors and simple confirmations.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Carries a catalog failure out of a handler as a `{message}` response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] CatalogError);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(CatalogError::Validation(err))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            ApiError::from(ValidationError::TypeCount).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CatalogError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn message_is_the_client_facing_text() {
        assert_eq!(
            ApiError::from(ValidationError::InvalidType).to_string(),
            "Pokemon's type is invalid."
        );
        assert_eq!(
            ApiError::from(CatalogError::NotFound).to_string(),
            "Pokemon not found"
        );
    }

    #[test]
    fn response_carries_the_mapped_status() {
        let response = ApiError::from(ValidationError::MalformedBody).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
