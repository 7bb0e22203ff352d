use axum::http::StatusCode;
use thiserror::Error;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Property not found")]
    PropertyNotFound,

    #[error("Favorite not found")]
    FavoriteNotFound,

    #[error("Property already in favorites")]
    AlreadyFavorited,

    #[error("Not authorized to modify this property")]
    NotPropertyOwner,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::PropertyNotFound | ServiceError::FavoriteNotFound => {
                StatusCode::NOT_FOUND
            }
            ServiceError::AlreadyFavorited => StatusCode::BAD_REQUEST,
            ServiceError::NotPropertyOwner => StatusCode::FORBIDDEN,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        HttpError::new(error.to_string(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_map_to_distinct_status_classes() {
        assert_eq!(
            ServiceError::PropertyNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::FavoriteNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::AlreadyFavorited.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotPropertyOwner.status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn http_error_conversion_keeps_message_and_status() {
        let err = HttpError::from(ServiceError::AlreadyFavorited);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Property already in favorites");

        let err = HttpError::from(ServiceError::NotPropertyOwner);
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
