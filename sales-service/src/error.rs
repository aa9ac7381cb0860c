use crate::services::CsvError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const MISSING_HEADERS_MESSAGE: &str = "Missing required headers: product, quantity, price";

/// Upload failures. Rendered as plain-text bodies.
#[derive(Debug, Error)]
pub enum SalesError {
    #[error("Missing required headers: product, quantity, price")]
    MissingHeaders(Vec<&'static str>),

    #[error("CSV parsing failed: {0}")]
    Parse(CsvError),

    #[error("Missing required multipart field: {0}")]
    MissingField(&'static str),

    #[error("{}", .0.body_text())]
    Multipart(#[from] MultipartError),
}

impl From<CsvError> for SalesError {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::MissingHeaders(missing) => SalesError::MissingHeaders(missing),
            other => SalesError::Parse(other),
        }
    }
}

impl SalesError {
    pub fn status(&self) -> StatusCode {
        match self {
            SalesError::Multipart(err) => err.status(),
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for SalesError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
