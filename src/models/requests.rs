use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::schedule::{
    hhmm, Conflict, ConflictPolicy, HoursField, HoursWarning, SaturdayPolicy, Schedule, WeekDay,
};

/// Query params for GET /schedules/default.
#[derive(Debug, Deserialize)]
pub struct DefaultScheduleQuery {
    pub saturday: Option<SaturdayPolicy>,
}

/// Body for POST /schedules/working-day and the leave/holiday toggles.
#[derive(Debug, Deserialize)]
pub struct ScheduleDateRequest {
    pub schedule: Schedule,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct WorkingDayResponse {
    pub date: NaiveDate,
    pub weekday: WeekDay,
    pub is_working_day: bool,
}

/// Body for POST /schedules/conflicts.
#[derive(Debug, Deserialize)]
pub struct ConflictsRequest {
    pub schedule: Schedule,
    /// Falls back to the server's configured policy.
    pub policy: Option<ConflictPolicy>,
}

#[derive(Debug, Serialize)]
pub struct ConflictsResponse {
    pub conflicts: Vec<Conflict>,
    pub hours_warnings: Vec<HoursWarning>,
}

/// Body for POST /schedules/off-days.
#[derive(Debug, Deserialize)]
pub struct WeeklyOffDayRequest {
    pub schedule: Schedule,
    pub day: WeekDay,
    pub is_off: bool,
}

/// Body for POST /schedules/hours.
#[derive(Debug, Deserialize)]
pub struct WorkingHoursRequest {
    pub schedule: Schedule,
    pub day: WeekDay,
    pub field: HoursField,
    #[serde(with = "hhmm")]
    pub value: NaiveTime,
}

/// Body for POST /schedules/working-flag.
#[derive(Debug, Deserialize)]
pub struct WorkingFlagRequest {
    pub schedule: Schedule,
    pub day: WeekDay,
    pub is_working: bool,
}

/// Body for POST /schedules/month.
#[derive(Debug, Deserialize)]
pub struct MonthRequest {
    pub schedule: Schedule,
    pub year: i32,
    pub month: u32,
}

/// Returned by every schedule mutation. `conflicts` are warnings only.
#[derive(Debug, Serialize)]
pub struct ScheduleUpdate {
    pub schedule: Schedule,
    pub changed: bool,
    pub conflicts: Vec<Conflict>,
}
