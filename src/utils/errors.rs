//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del cliente WasteTrack
//! y helpers para construirlos.

use reqwest::StatusCode;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend responded {status}: {message}")]
    Backend { status: StatusCode, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Los fallos transitorios se reintentan en el siguiente ciclo de polling
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            AppError::Backend { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, reason: &str) -> AppError {
    AppError::Config(format!("{}: {}", variable, reason))
}

/// Función helper para crear errores de respuesta del backend
pub fn backend_error(status: StatusCode, message: impl Into<String>) -> AppError {
    AppError::Backend {
        status,
        message: message.into(),
    }
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_transient() {
        let err = backend_error(StatusCode::SERVICE_UNAVAILABLE, "down");
        assert!(err.is_transient());

        let err = backend_error(StatusCode::NOT_FOUND, "missing");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_validation_error_field() {
        match validation_error("reason", "empty") {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("reason"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
