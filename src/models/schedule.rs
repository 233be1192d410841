use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Days of the week, Monday first. Ordering follows the working week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekDay::Monday => "monday",
            WeekDay::Tuesday => "tuesday",
            WeekDay::Wednesday => "wednesday",
            WeekDay::Thursday => "thursday",
            WeekDay::Friday => "friday",
            WeekDay::Saturday => "saturday",
            WeekDay::Sunday => "sunday",
        }
    }
}

impl std::fmt::Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for WeekDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeekDay::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ScheduleError::UnknownWeekDay(s.to_string()))
    }
}

/// `HH:MM` (24h) wire format for times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Parse a `HH:MM` time of day.
pub fn parse_time(raw: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(raw, hhmm::FORMAT)
        .map_err(|_| ScheduleError::InvalidTime(raw.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(raw.to_string()))
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Working hours for one day of the week.
/// `from` / `to` are only meaningful when `is_working_day` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub is_working_day: bool,
    #[serde(with = "hhmm")]
    pub from: NaiveTime,
    #[serde(with = "hhmm")]
    pub to: NaiveTime,
}

impl DaySchedule {
    pub fn working(from: NaiveTime, to: NaiveTime) -> Self {
        Self { is_working_day: true, from, to }
    }

    pub fn closed() -> Self {
        Self { is_working_day: false, from: hm(9, 0), to: hm(18, 0) }
    }
}

/// Which end of a day's working hours to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursField {
    From,
    To,
}

/// Recurring weekly hours. One field per weekday so a missing day cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeeklyHours {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl WeeklyHours {
    pub fn iter(&self) -> impl Iterator<Item = (WeekDay, &DaySchedule)> {
        WeekDay::ALL.into_iter().map(move |day| (day, &self[day]))
    }
}

impl Index<WeekDay> for WeeklyHours {
    type Output = DaySchedule;

    fn index(&self, day: WeekDay) -> &DaySchedule {
        match day {
            WeekDay::Monday => &self.monday,
            WeekDay::Tuesday => &self.tuesday,
            WeekDay::Wednesday => &self.wednesday,
            WeekDay::Thursday => &self.thursday,
            WeekDay::Friday => &self.friday,
            WeekDay::Saturday => &self.saturday,
            WeekDay::Sunday => &self.sunday,
        }
    }
}

impl IndexMut<WeekDay> for WeeklyHours {
    fn index_mut(&mut self, day: WeekDay) -> &mut DaySchedule {
        match day {
            WeekDay::Monday => &mut self.monday,
            WeekDay::Tuesday => &mut self.tuesday,
            WeekDay::Wednesday => &mut self.wednesday,
            WeekDay::Thursday => &mut self.thursday,
            WeekDay::Friday => &mut self.friday,
            WeekDay::Saturday => &mut self.saturday,
            WeekDay::Sunday => &mut self.sunday,
        }
    }
}

/// How Saturday is set up on a freshly created schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturdayPolicy {
    /// 10:00–16:00 working day.
    #[default]
    HalfDay,
    /// Not worked, and listed as a weekly off-day.
    Off,
}

impl std::str::FromStr for SaturdayPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "half_day" => Ok(SaturdayPolicy::HalfDay),
            "off" => Ok(SaturdayPolicy::Off),
            _ => Err(anyhow::anyhow!("Unknown saturday policy: {s}")),
        }
    }
}

/// Weekly off-days plus one-off leave and holiday dates.
///
/// Serialized as sorted lists. Loading de-duplicates and, when a date is listed both
/// as a leave and a holiday, keeps it as a leave only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AvailabilityRecord")]
pub struct AvailabilitySet {
    pub weekly_off_days: BTreeSet<WeekDay>,
    pub leaves: BTreeSet<NaiveDate>,
    pub holidays: BTreeSet<NaiveDate>,
}

/// Persisted shape of an [`AvailabilitySet`], before the invariants are restored.
#[derive(Debug, Deserialize)]
struct AvailabilityRecord {
    #[serde(default)]
    weekly_off_days: Vec<WeekDay>,
    #[serde(default)]
    leaves: Vec<NaiveDate>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
}

impl From<AvailabilityRecord> for AvailabilitySet {
    fn from(record: AvailabilityRecord) -> Self {
        let leaves: BTreeSet<NaiveDate> = record.leaves.into_iter().collect();
        let holidays = record
            .holidays
            .into_iter()
            .filter(|d| !leaves.contains(d))
            .collect();
        Self {
            weekly_off_days: record.weekly_off_days.into_iter().collect(),
            leaves,
            holidays,
        }
    }
}

/// A staff member's weekly hours and availability, always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub weekly_hours: WeeklyHours,
    #[serde(flatten)]
    pub availability: AvailabilitySet,
}

impl Schedule {
    /// Mon–Fri 09:00–18:00, Saturday per `saturday`, Sunday off.
    pub fn with_saturday_policy(saturday: SaturdayPolicy) -> Self {
        let weekday = DaySchedule::working(hm(9, 0), hm(18, 0));
        let saturday_hours = match saturday {
            SaturdayPolicy::HalfDay => DaySchedule::working(hm(10, 0), hm(16, 0)),
            SaturdayPolicy::Off => DaySchedule::closed(),
        };

        let mut weekly_off_days = BTreeSet::from([WeekDay::Sunday]);
        if saturday == SaturdayPolicy::Off {
            weekly_off_days.insert(WeekDay::Saturday);
        }

        Self {
            weekly_hours: WeeklyHours {
                monday: weekday,
                tuesday: weekday,
                wednesday: weekday,
                thursday: weekday,
                friday: weekday,
                saturday: saturday_hours,
                sunday: DaySchedule::closed(),
            },
            availability: AvailabilitySet {
                weekly_off_days,
                ..AvailabilitySet::default()
            },
        }
    }

    /// Load a schedule from its persisted JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn is_off_day(&self, day: WeekDay) -> bool {
        self.availability.weekly_off_days.contains(&day)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::with_saturday_policy(SaturdayPolicy::default())
    }
}

/// Kind of one-off absence landing on a recurring working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    LeaveOnWorkingDay,
    HolidayOnWorkingDay,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::LeaveOnWorkingDay => "leave_on_working_day",
            ConflictKind::HolidayOnWorkingDay => "holiday_on_working_day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub date: NaiveDate,
    pub kind: ConflictKind,
}

/// Rule deciding whether a leave/holiday weekday counts as a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Weekly off-days are never working days, whatever the hours flag says.
    #[default]
    RespectOffDays,
    /// Only the weekly hours flag is consulted.
    WorkingFlagOnly,
}

impl std::str::FromStr for ConflictPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "respect_off_days" => Ok(ConflictPolicy::RespectOffDays),
            "working_flag_only" => Ok(ConflictPolicy::WorkingFlagOnly),
            _ => Err(anyhow::anyhow!("Unknown conflict policy: {s}")),
        }
    }
}

/// A working day whose hours end before (or when) they start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoursWarning {
    pub day: WeekDay,
    #[serde(with = "hhmm")]
    pub from: NaiveTime,
    #[serde(with = "hhmm")]
    pub to: NaiveTime,
}
