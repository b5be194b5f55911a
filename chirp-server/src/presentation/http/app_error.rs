use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

pub(crate) type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) field_errors: Option<FieldErrors>,
}

impl ErrorBody {
    fn plain(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field_errors: None,
        }
    }
}

fn field_errors_from_validator(err: &ValidationErrors) -> FieldErrors {
    err.field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { field, message } => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error: err.to_string(),
                        field_errors: Some(BTreeMap::from([(
                            field.to_string(),
                            vec![message.to_string()],
                        )])),
                    },
                ),
                DomainError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, ErrorBody::plain(err.to_string()))
                }
                DomainError::IdentityProvider(_) => {
                    error!(error = %err, "identity provider failure");
                    (
                        StatusCode::BAD_GATEWAY,
                        ErrorBody::plain("identity provider unavailable"),
                    )
                }
                DomainError::Unexpected(_) => {
                    error!(error = %err, "unexpected domain error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::plain("internal error"),
                    )
                }
            },
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.to_string(),
                    field_errors: Some(field_errors_from_validator(&err)),
                },
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorBody::plain("unauthorized")),
            AppError::Internal(err) => {
                error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::plain("internal error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
