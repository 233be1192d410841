use std::io::Write;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    error::ScheduleError,
    models::schedule::{Schedule, WeekDay},
    services::availability::{to_monday_first_weekday, AvailabilityService},
};

/// Why a day is, or is not, bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    Working,
    Leave,
    Holiday,
    WeeklyOff,
    /// Not an off-day, but the weekly hours mark the weekday as not worked.
    Closed,
}

impl DayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayState::Working => "working",
            DayState::Leave => "leave",
            DayState::Holiday => "holiday",
            DayState::WeeklyOff => "weekly_off",
            DayState::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub weekday: WeekDay,
    pub status: DayState,
}

/// One month of day cells, as rendered by a calendar grid.
#[derive(Debug, Clone, Serialize)]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub working_days: usize,
    pub days: Vec<DayStatus>,
}

pub struct CalendarService;

impl CalendarService {
    /// Resolve a single date with the same precedence as
    /// [`AvailabilityService::is_working_day`].
    pub fn day_status(schedule: &Schedule, date: NaiveDate) -> DayStatus {
        let weekday = to_monday_first_weekday(date);
        let availability = &schedule.availability;

        let status = if availability.leaves.contains(&date) {
            DayState::Leave
        } else if availability.holidays.contains(&date) {
            DayState::Holiday
        } else if schedule.is_off_day(weekday) {
            DayState::WeeklyOff
        } else if AvailabilityService::is_recurring_working_day(schedule, weekday) {
            DayState::Working
        } else {
            DayState::Closed
        };

        DayStatus { date, weekday, status }
    }

    pub fn month_overview(
        schedule: &Schedule,
        year: i32,
        month: u32,
    ) -> Result<MonthOverview, ScheduleError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ScheduleError::InvalidMonth { year, month })?;

        let days: Vec<DayStatus> = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|d| Self::day_status(schedule, d))
            .collect();
        let working_days = days.iter().filter(|d| d.status == DayState::Working).count();

        tracing::debug!(
            "Month overview {}-{:02}: {} working day(s) out of {}",
            year,
            month,
            working_days,
            days.len()
        );

        Ok(MonthOverview { year, month, working_days, days })
    }

    /// Write `date,weekday,status` rows with a header line.
    pub fn write_csv<W: Write>(overview: &MonthOverview, writer: W) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["date", "weekday", "status"])?;
        for day in &overview.days {
            let date = day.date.format("%Y-%m-%d").to_string();
            wtr.write_record([date.as_str(), day.weekday.as_str(), day.status.as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::parse_date;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    fn december() -> Schedule {
        let schedule = Schedule::default();
        let schedule = AvailabilityService::toggle_holiday_date(&schedule, date("2024-12-25"));
        let schedule = AvailabilityService::toggle_leave_date(&schedule, date("2024-12-24"));
        AvailabilityService::set_working_day_flag(&schedule, WeekDay::Saturday, false)
    }

    #[test]
    fn test_month_overview_december_2024() {
        let overview = CalendarService::month_overview(&december(), 2024, 12).unwrap();

        assert_eq!(overview.days.len(), 31);
        assert_eq!(overview.days[0].date, date("2024-12-01"));
        assert_eq!(overview.days[0].weekday, WeekDay::Sunday);
        assert_eq!(overview.days[0].status, DayState::WeeklyOff);
        assert_eq!(overview.days[23].status, DayState::Leave);
        assert_eq!(overview.days[24].status, DayState::Holiday);
        assert_eq!(overview.days[27].status, DayState::Closed);

        // 22 weekdays in December 2024, minus one leave and one holiday.
        assert_eq!(overview.working_days, 20);
    }

    #[test]
    fn test_working_cells_agree_with_is_working_day() {
        let schedule = december();
        let overview = CalendarService::month_overview(&schedule, 2024, 12).unwrap();
        for day in overview.days {
            assert_eq!(
                day.status == DayState::Working,
                AvailabilityService::is_working_day(&schedule, day.date),
                "{}",
                day.date
            );
        }
    }

    #[test]
    fn test_february_leap_year() {
        let overview = CalendarService::month_overview(&Schedule::default(), 2024, 2).unwrap();
        assert_eq!(overview.days.len(), 29);
    }

    #[test]
    fn test_invalid_month() {
        let result = CalendarService::month_overview(&Schedule::default(), 2024, 13);
        assert!(matches!(
            result,
            Err(ScheduleError::InvalidMonth { year: 2024, month: 13 })
        ));
    }

    #[test]
    fn test_csv_export() {
        let overview = CalendarService::month_overview(&december(), 2024, 12).unwrap();
        let mut out = Vec::new();
        CalendarService::write_csv(&overview, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert_eq!(lines[0], "date,weekday,status");
        assert_eq!(lines[1], "2024-12-01,sunday,weekly_off");
        assert_eq!(lines[25], "2024-12-25,wednesday,holiday");
    }
}
