use rocket::Request;
use rocket::http::Status;
use rocket::response::{self, Responder, status};
use thiserror::Error;

/// Errors a route hands back to the caller.
///
/// Bodies are fixed plain-text strings; store details are logged, never sent.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database not connected.")]
    NotConnected,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    OperationFailed(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound => Status::NotFound,
            ApiError::NotConnected | ApiError::OperationFailed(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        status::Custom(self.status(), self.to_string()).respond_to(request)
    }
}

/// Failures raised by a [`ReservationStore`](crate::db::ReservationStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),
    #[error("failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ApiError::NotConnected.status(), Status::InternalServerError);
        assert_eq!(ApiError::NotFound.status(), Status::NotFound);
        assert_eq!(
            ApiError::OperationFailed("Error creating reservation").status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn messages_are_fixed() {
        assert_eq!(ApiError::NotConnected.to_string(), "Database not connected.");
        assert_eq!(ApiError::NotFound.to_string(), "Not found");
        assert_eq!(
            ApiError::OperationFailed("Error deleting reservation").to_string(),
            "Error deleting reservation"
        );
    }
}
