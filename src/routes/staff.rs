use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    models::staff::{CreateStaffRequest, Staff},
    AppState,
};

/// POST /staff/draft — a new staff record with its default schedule, not stored.
pub async fn draft_staff(
    State(state): State<AppState>,
    Json(body): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<Staff>), (StatusCode, Json<Value>)> {
    let first_name = body.first_name.trim();
    let last_name = body.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "first_name and last_name are required" })),
        ));
    }

    let saturday = body.saturday.unwrap_or(state.config.default_saturday_policy);
    let staff = Staff::new(first_name.to_string(), last_name.to_string(), saturday);
    tracing::info!("Drafted staff record {}", staff.id);
    Ok((StatusCode::CREATED, Json(staff)))
}
