//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. User-correctable failures
//! (validation, unavailable catalog, unknown product) carry the session
//! language so the response body honors the active localization; internal
//! failures are captured to Sentry and answered with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use apiary_core::{LanguageTag, ValidationError};

use crate::i18n::{self, Msg};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The catalog is not loaded; shown inline, retried only by an explicit
    /// reload.
    #[error("catalog unavailable")]
    CatalogUnavailable {
        /// Session language for the user-facing message.
        lang: LanguageTag,
    },

    /// Order rejected before dispatch; shown as a blocking alert.
    #[error("validation failed: {source}")]
    Validation {
        /// What the user has to correct.
        #[source]
        source: ValidationError,
        /// Session language for the user-facing message.
        lang: LanguageTag,
    },

    /// Product id not present in the loaded catalog.
    #[error("unknown product")]
    UnknownProduct {
        /// Session language for the user-facing message.
        lang: LanguageTag,
    },

    /// Session store operation failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Localized, user-facing message.
    pub message: String,
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::CatalogUnavailable { .. } => StatusCode::BAD_GATEWAY,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::UnknownProduct { .. } => StatusCode::NOT_FOUND,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The localized message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::CatalogUnavailable { lang } => {
                i18n::text(*lang, Msg::CatalogUnavailable).to_owned()
            }
            Self::Validation { source, lang } => match source {
                ValidationError::EmptyCart => i18n::text(*lang, Msg::CartEmpty).to_owned(),
                ValidationError::IncompleteContact => {
                    i18n::text(*lang, Msg::IncompleteContact).to_owned()
                }
            },
            Self::UnknownProduct { lang } => i18n::text(*lang, Msg::UnknownProduct).to_owned(),
            // Don't expose internal error details to clients
            Self::Session(_) => "Internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            message: self.user_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
