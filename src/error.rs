use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Errors raised while reading or querying a schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid time of day (expected HH:MM): {0}")]
    InvalidTime(String),

    #[error("Unknown weekday: {0}")]
    UnknownWeekDay(String),

    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid schedule document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ScheduleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScheduleError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Handlers reject with `(StatusCode, Json<Value>)`; this lets them use `?` on domain errors.
impl From<ScheduleError> for (StatusCode, Json<Value>) {
    fn from(e: ScheduleError) -> Self {
        tracing::debug!("Rejecting schedule request: {}", e);
        (e.status_code(), Json(json!({ "error": e.to_string() })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body() {
        let (status, Json(body)) =
            <(StatusCode, Json<Value>)>::from(ScheduleError::InvalidMonth { year: 2024, month: 13 });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid month: 2024-13" }));
    }
}
