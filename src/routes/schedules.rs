use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    models::{
        requests::{
            ConflictsRequest, ConflictsResponse, DefaultScheduleQuery, MonthRequest,
            ScheduleDateRequest, ScheduleUpdate, WeeklyOffDayRequest, WorkingDayResponse,
            WorkingFlagRequest, WorkingHoursRequest,
        },
        schedule::Schedule,
    },
    services::{
        availability::{to_monday_first_weekday, AvailabilityService},
        calendar::{CalendarService, MonthOverview},
        metrics::{CONFLICTS_COUNTER, SCHEDULE_QUERIES_COUNTER, SCHEDULE_UPDATES_COUNTER},
    },
    AppState,
};

type ApiError = (StatusCode, Json<Value>);

/// Package a mutation result with the conflicts the caller should surface.
fn update_response(
    state: &AppState,
    operation: &str,
    before: &Schedule,
    after: Schedule,
) -> Json<ScheduleUpdate> {
    SCHEDULE_UPDATES_COUNTER
        .with_label_values(&[operation])
        .inc();
    let conflicts = AvailabilityService::detect_conflicts_with(&after, state.config.conflict_policy);
    Json(ScheduleUpdate {
        changed: &after != before,
        schedule: after,
        conflicts,
    })
}

/// GET /schedules/default?saturday=half_day|off
pub async fn default_schedule(
    State(state): State<AppState>,
    Query(params): Query<DefaultScheduleQuery>,
) -> Json<Schedule> {
    let saturday = params
        .saturday
        .unwrap_or(state.config.default_saturday_policy);
    Json(Schedule::with_saturday_policy(saturday))
}

/// POST /schedules/working-day
pub async fn working_day(Json(body): Json<ScheduleDateRequest>) -> Json<WorkingDayResponse> {
    SCHEDULE_QUERIES_COUNTER
        .with_label_values(&["working_day"])
        .inc();
    Json(WorkingDayResponse {
        date: body.date,
        weekday: to_monday_first_weekday(body.date),
        is_working_day: AvailabilityService::is_working_day(&body.schedule, body.date),
    })
}

/// POST /schedules/conflicts
pub async fn conflicts(
    State(state): State<AppState>,
    Json(body): Json<ConflictsRequest>,
) -> Json<ConflictsResponse> {
    SCHEDULE_QUERIES_COUNTER
        .with_label_values(&["conflicts"])
        .inc();
    let policy = body.policy.unwrap_or(state.config.conflict_policy);
    let conflicts = AvailabilityService::detect_conflicts_with(&body.schedule, policy);
    for conflict in &conflicts {
        CONFLICTS_COUNTER
            .with_label_values(&[conflict.kind.as_str()])
            .inc();
    }
    Json(ConflictsResponse {
        conflicts,
        hours_warnings: AvailabilityService::hours_warnings(&body.schedule),
    })
}

/// POST /schedules/off-days
pub async fn set_weekly_off_day(
    State(state): State<AppState>,
    Json(body): Json<WeeklyOffDayRequest>,
) -> Json<ScheduleUpdate> {
    let next = AvailabilityService::set_weekly_off_day(&body.schedule, body.day, body.is_off);
    update_response(&state, "set_weekly_off_day", &body.schedule, next)
}

/// POST /schedules/leaves/toggle
pub async fn toggle_leave(
    State(state): State<AppState>,
    Json(body): Json<ScheduleDateRequest>,
) -> Json<ScheduleUpdate> {
    let next = AvailabilityService::toggle_leave_date(&body.schedule, body.date);
    update_response(&state, "toggle_leave_date", &body.schedule, next)
}

/// POST /schedules/holidays/toggle
pub async fn toggle_holiday(
    State(state): State<AppState>,
    Json(body): Json<ScheduleDateRequest>,
) -> Json<ScheduleUpdate> {
    let next = AvailabilityService::toggle_holiday_date(&body.schedule, body.date);
    update_response(&state, "toggle_holiday_date", &body.schedule, next)
}

/// POST /schedules/hours
pub async fn set_working_hours(
    State(state): State<AppState>,
    Json(body): Json<WorkingHoursRequest>,
) -> Json<ScheduleUpdate> {
    let next =
        AvailabilityService::set_working_hours(&body.schedule, body.day, body.field, body.value);
    if let Some(warning) = AvailabilityService::hours_warnings(&next)
        .into_iter()
        .find(|w| w.day == body.day)
    {
        tracing::warn!(
            "Hours for {} end before they start ({} -> {})",
            warning.day,
            warning.from.format("%H:%M"),
            warning.to.format("%H:%M")
        );
    }
    update_response(&state, "set_working_hours", &body.schedule, next)
}

/// POST /schedules/working-flag
pub async fn set_working_flag(
    State(state): State<AppState>,
    Json(body): Json<WorkingFlagRequest>,
) -> Json<ScheduleUpdate> {
    let next = AvailabilityService::set_working_day_flag(&body.schedule, body.day, body.is_working);
    update_response(&state, "set_working_day_flag", &body.schedule, next)
}

/// POST /schedules/month
pub async fn month_overview(Json(body): Json<MonthRequest>) -> Result<Json<MonthOverview>, ApiError> {
    SCHEDULE_QUERIES_COUNTER
        .with_label_values(&["month"])
        .inc();
    let overview = CalendarService::month_overview(&body.schedule, body.year, body.month)?;
    Ok(Json(overview))
}
