use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use salonspace_api::{
    app,
    config::Config,
    models::schedule::{ConflictPolicy, Schedule},
    AppState,
};

fn router_with(config: Config) -> Router {
    app(AppState { config: Arc::new(config) })
}

fn router() -> Router {
    router_with(Config::default())
}

fn default_schedule() -> Value {
    serde_json::to_value(Schedule::default()).unwrap()
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(router(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_default_schedule_respects_query_and_config() {
    let (status, body) = send(router(), "GET", "/schedules/default", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weekly_off_days"], json!(["sunday"]));
    assert_eq!(body["weekly_hours"]["saturday"]["is_working_day"], true);

    let (_, body) = send(router(), "GET", "/schedules/default?saturday=off", None).await;
    assert_eq!(body["weekly_off_days"], json!(["saturday", "sunday"]));
    assert_eq!(body["weekly_hours"]["saturday"]["is_working_day"], false);
}

#[tokio::test]
async fn test_working_day_query() {
    let (status, body) = send(
        router(),
        "POST",
        "/schedules/working-day",
        Some(json!({ "schedule": default_schedule(), "date": "2024-12-24" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "date": "2024-12-24", "weekday": "tuesday", "is_working_day": true }));

    let (_, body) = send(
        router(),
        "POST",
        "/schedules/working-day",
        Some(json!({ "schedule": default_schedule(), "date": "2024-12-29" })),
    )
    .await;
    assert_eq!(body["weekday"], "sunday");
    assert_eq!(body["is_working_day"], false);
}

#[tokio::test]
async fn test_holiday_conflict() {
    let mut schedule = default_schedule();
    schedule["holidays"] = json!(["2024-12-25"]);

    let (status, body) = send(
        router(),
        "POST",
        "/schedules/conflicts",
        Some(json!({ "schedule": schedule })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["conflicts"],
        json!([{ "date": "2024-12-25", "kind": "holiday_on_working_day" }])
    );
    assert_eq!(body["hours_warnings"], json!([]));
}

#[tokio::test]
async fn test_conflict_policy_from_request_and_config() {
    let mut schedule = default_schedule();
    schedule["holidays"] = json!(["2024-12-29"]);
    schedule["weekly_hours"]["sunday"]["is_working_day"] = json!(true);

    let (_, body) = send(
        router(),
        "POST",
        "/schedules/conflicts",
        Some(json!({ "schedule": schedule.clone() })),
    )
    .await;
    assert_eq!(body["conflicts"], json!([]));

    let (_, body) = send(
        router(),
        "POST",
        "/schedules/conflicts",
        Some(json!({ "schedule": schedule.clone(), "policy": "working_flag_only" })),
    )
    .await;
    assert_eq!(body["conflicts"].as_array().unwrap().len(), 1);

    let legacy = Config {
        conflict_policy: ConflictPolicy::WorkingFlagOnly,
        ..Config::default()
    };
    let (_, body) = send(
        router_with(legacy),
        "POST",
        "/schedules/conflicts",
        Some(json!({ "schedule": schedule })),
    )
    .await;
    assert_eq!(body["conflicts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_toggle_leave_reports_change_and_conflicts() {
    let (status, body) = send(
        router(),
        "POST",
        "/schedules/leaves/toggle",
        Some(json!({ "schedule": default_schedule(), "date": "2024-12-24" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
    assert_eq!(body["schedule"]["leaves"], json!(["2024-12-24"]));
    assert_eq!(
        body["conflicts"],
        json!([{ "date": "2024-12-24", "kind": "leave_on_working_day" }])
    );
}

#[tokio::test]
async fn test_toggle_leave_on_off_day_is_unchanged() {
    let (_, body) = send(
        router(),
        "POST",
        "/schedules/leaves/toggle",
        Some(json!({ "schedule": default_schedule(), "date": "2024-12-29" })),
    )
    .await;
    assert_eq!(body["changed"], false);
    assert_eq!(body["schedule"], default_schedule());

    let mut schedule = default_schedule();
    schedule["leaves"] = json!(["2024-12-29"]);
    let (_, body) = send(
        router(),
        "POST",
        "/schedules/leaves/toggle",
        Some(json!({ "schedule": schedule.clone(), "date": "2024-12-29" })),
    )
    .await;
    assert_eq!(body["changed"], false);
    assert_eq!(body["schedule"]["leaves"], json!(["2024-12-29"]));
}

#[tokio::test]
async fn test_holiday_toggle_then_leave_takes_over() {
    let (_, body) = send(
        router(),
        "POST",
        "/schedules/holidays/toggle",
        Some(json!({ "schedule": default_schedule(), "date": "2024-12-25" })),
    )
    .await;
    assert_eq!(body["schedule"]["holidays"], json!(["2024-12-25"]));

    let (_, body) = send(
        router(),
        "POST",
        "/schedules/leaves/toggle",
        Some(json!({ "schedule": body["schedule"].clone(), "date": "2024-12-25" })),
    )
    .await;
    assert_eq!(body["schedule"]["leaves"], json!(["2024-12-25"]));
    assert_eq!(body["schedule"]["holidays"], json!([]));
}

#[tokio::test]
async fn test_saturday_off_day() {
    let (_, body) = send(
        router(),
        "POST",
        "/schedules/off-days",
        Some(json!({ "schedule": default_schedule(), "day": "saturday", "is_off": true })),
    )
    .await;
    assert_eq!(body["changed"], true);
    assert_eq!(body["schedule"]["weekly_off_days"], json!(["saturday", "sunday"]));
    assert_eq!(body["schedule"]["weekly_hours"]["saturday"]["is_working_day"], false);
}

#[tokio::test]
async fn test_hours_and_working_flag() {
    let (_, body) = send(
        router(),
        "POST",
        "/schedules/hours",
        Some(json!({
            "schedule": default_schedule(),
            "day": "monday",
            "field": "to",
            "value": "08:30"
        })),
    )
    .await;
    assert_eq!(body["schedule"]["weekly_hours"]["monday"]["to"], "08:30");

    let (_, body) = send(
        router(),
        "POST",
        "/schedules/conflicts",
        Some(json!({ "schedule": body["schedule"].clone() })),
    )
    .await;
    assert_eq!(
        body["hours_warnings"],
        json!([{ "day": "monday", "from": "09:00", "to": "08:30" }])
    );

    let (_, body) = send(
        router(),
        "POST",
        "/schedules/working-flag",
        Some(json!({ "schedule": default_schedule(), "day": "sunday", "is_working": true })),
    )
    .await;
    assert_eq!(body["schedule"]["weekly_hours"]["sunday"]["is_working_day"], true);
    assert_eq!(body["schedule"]["weekly_off_days"], json!(["sunday"]));
}

#[tokio::test]
async fn test_month_overview() {
    let (status, body) = send(
        router(),
        "POST",
        "/schedules/month",
        Some(json!({ "schedule": default_schedule(), "year": 2024, "month": 12 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"].as_array().unwrap().len(), 31);
    // 22 weekdays plus 4 Saturdays.
    assert_eq!(body["working_days"], 26);
    assert_eq!(
        body["days"][0],
        json!({ "date": "2024-12-01", "weekday": "sunday", "status": "weekly_off" })
    );

    let (status, body) = send(
        router(),
        "POST",
        "/schedules/month",
        Some(json!({ "schedule": default_schedule(), "year": 2024, "month": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid month: 2024-00");
}

#[tokio::test]
async fn test_schedule_missing_weekday_is_rejected() {
    let mut schedule = default_schedule();
    schedule["weekly_hours"].as_object_mut().unwrap().remove("friday");

    let (status, _) = send(
        router(),
        "POST",
        "/schedules/working-day",
        Some(json!({ "schedule": schedule, "date": "2024-12-24" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_draft_staff() {
    let (status, body) = send(
        router(),
        "POST",
        "/staff/draft",
        Some(json!({ "first_name": "Ana", "last_name": "Lima", "saturday": "off" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["first_name"], "Ana");
    assert_eq!(body["schedule"]["weekly_off_days"], json!(["saturday", "sunday"]));

    let (status, _) = send(
        router(),
        "POST",
        "/staff/draft",
        Some(json!({ "first_name": " ", "last_name": "Lima" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_exposes_schedule_counters() {
    send(
        router(),
        "POST",
        "/schedules/leaves/toggle",
        Some(json!({ "schedule": default_schedule(), "date": "2024-12-24" })),
    )
    .await;

    let response = router()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("schedule_updates_total"));
}
