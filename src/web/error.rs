//! HTTP error responses.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use super::render::NOT_FOUND_PAGE;
use super::urls;
use crate::access::AccessError;
use crate::infra::PasswordHashError;
use crate::store::StoreError;

/// Errors a request handler can end with.
#[derive(Debug, Error)]
pub enum WebError {
    /// Anonymous request to a page that needs a user; carries the path to
    /// come back to.
    #[error("login required for {next}")]
    LoginRequired { next: String },

    /// Unknown route, or a note the requester does not own.
    #[error("page not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordHashError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The app was built without `AppState` registered.
    #[error("application state is not configured")]
    MissingState,
}

impl From<AccessError> for WebError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => Self::NotFound,
            AccessError::Store(e) => Self::Store(e),
        }
    }
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::LoginRequired { .. } => StatusCode::FOUND,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Password(_) | Self::Template(_) | Self::MissingState => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::LoginRequired { next } => HttpResponse::Found()
                .insert_header((header::LOCATION, urls::login_with_next(next)))
                .finish(),
            Self::NotFound => HttpResponse::NotFound()
                .content_type(header::ContentType::html())
                .body(NOT_FOUND_PAGE),
            Self::Store(_) | Self::Password(_) | Self::Template(_) | Self::MissingState => {
                log::error!("request failed: {}", self);
                HttpResponse::InternalServerError().body("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_required_redirects_with_next() {
        let resp = WebError::LoginRequired {
            next: "/add/".into(),
        }
        .error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/auth/login/?next=%2Fadd%2F"
        );
    }

    #[test]
    fn access_not_found_maps_to_404() {
        let err: WebError = AccessError::NotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failures_are_500() {
        let err: WebError = StoreError::Poisoned.into();
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn password_failures_are_500() {
        let err: WebError = PasswordHashError::Hash("out of memory".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
