// src/errors.rs

//! Crate-wide error aliases and helpers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::process::TerminationError;
use crate::registry::RegistryError;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("Unknown command ID {0}")]
    NotFound(String),

    #[error("Could not stop process {0}")]
    Termination(#[from] TerminationError),

    #[error("Registry error: {0}")]
    Registry(RegistryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RegistryError> for AgentError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => AgentError::NotFound(id),
            other => AgentError::Registry(other),
        }
    }
}

impl ResponseError for AgentError {
    fn status_code(&self) -> StatusCode {
        match self {
            AgentError::BadRequest(_) | AgentError::NotFound(_) | AgentError::Termination(_) => {
                StatusCode::BAD_REQUEST
            }
            AgentError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
