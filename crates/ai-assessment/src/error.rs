use crate::config::ConfigError;
use crate::scoring::adoption::AdjustmentRulesError;
use crate::scoring::prioritization::PrioritizationError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Prioritization(PrioritizationError),
    AdjustmentRules(AdjustmentRulesError),
    Input(serde_json::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Prioritization(err) => write!(f, "prioritization error: {}", err),
            AppError::AdjustmentRules(err) => write!(f, "adjustment rules error: {}", err),
            AppError::Input(err) => write!(f, "invalid input: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Prioritization(err) => Some(err),
            AppError::AdjustmentRules(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Prioritization(_) | AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::AdjustmentRules(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<PrioritizationError> for AppError {
    fn from(value: PrioritizationError) -> Self {
        Self::Prioritization(value)
    }
}

impl From<AdjustmentRulesError> for AppError {
    fn from(value: AdjustmentRulesError) -> Self {
        Self::AdjustmentRules(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Input(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prioritization_errors_are_client_errors() {
        let response = AppError::from(PrioritizationError::NoRolesSelected).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_errors_are_server_errors() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let app_error = AppError::from(err);
        assert!(app_error.to_string().starts_with("io error"));
        assert_eq!(app_error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_input_is_a_client_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_error = AppError::from(err);
        assert!(app_error.to_string().starts_with("invalid input"));
        assert_eq!(app_error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn serialization_failures_are_server_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_error = AppError::Serialization(err);
        assert!(app_error.to_string().starts_with("serialization error"));
        assert_eq!(app_error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
