//! Error responses of the page handlers.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use catalog_client::LookupError;
use thiserror::Error;

use crate::query::InvalidId;
use crate::render::message_page;

/// A detail request that can't render a record.
///
/// List requests never fail, their failures degrade to an empty page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl PageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PageError::InvalidId(_) | PageError::Lookup(LookupError::InvalidRequest(_)) => {
                StatusCode::BAD_REQUEST
            },
            PageError::Lookup(LookupError::NotFound(_)) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (title, message) = match self {
            PageError::InvalidId(_) | PageError::Lookup(LookupError::InvalidRequest(_)) => {
                ("Invalid ID", "Invalid ID")
            },
            PageError::Lookup(LookupError::NotFound(_)) => {
                ("Character not found", "Personaje no encontrado")
            },
        };
        (status, Html(message_page(title, message))).into_response()
    }
}
