use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::models::schedule::{
    Conflict, ConflictKind, ConflictPolicy, HoursField, HoursWarning, Schedule, WeekDay,
};

/// Pure availability rules over a [`Schedule`]. No I/O, no metrics.
///
/// Mutations never touch their input: they return the schedule the caller should
/// persist in place of the old one.
pub struct AvailabilityService;

/// Map a calendar date onto the Monday-first week.
pub fn to_monday_first_weekday(date: NaiveDate) -> WeekDay {
    let sunday_first = date.weekday().num_days_from_sunday() as usize;
    WeekDay::ALL[(sunday_first + 6) % 7]
}

impl AvailabilityService {
    /// Whether recurring rules alone make `day` a working day: not a weekly off-day
    /// and flagged as working in the weekly hours.
    pub fn is_recurring_working_day(schedule: &Schedule, day: WeekDay) -> bool {
        !schedule.is_off_day(day) && schedule.weekly_hours[day].is_working_day
    }

    /// Leaves and holidays first, then weekly off-days, then the weekly hours flag.
    pub fn is_working_day(schedule: &Schedule, date: NaiveDate) -> bool {
        let availability = &schedule.availability;
        if availability.leaves.contains(&date) || availability.holidays.contains(&date) {
            return false;
        }
        Self::is_recurring_working_day(schedule, to_monday_first_weekday(date))
    }

    /// Leaves and holidays that land on a recurring working day, using
    /// [`ConflictPolicy::RespectOffDays`].
    pub fn detect_conflicts(schedule: &Schedule) -> Vec<Conflict> {
        Self::detect_conflicts_with(schedule, ConflictPolicy::RespectOffDays)
    }

    /// Conflicts sorted by date; on equal dates leaves come before holidays.
    pub fn detect_conflicts_with(schedule: &Schedule, policy: ConflictPolicy) -> Vec<Conflict> {
        let availability = &schedule.availability;
        let leaves = availability
            .leaves
            .iter()
            .map(|d| (*d, ConflictKind::LeaveOnWorkingDay));
        let holidays = availability
            .holidays
            .iter()
            .map(|d| (*d, ConflictKind::HolidayOnWorkingDay));

        let mut conflicts: Vec<Conflict> = leaves
            .chain(holidays)
            .filter(|(date, _)| {
                let day = to_monday_first_weekday(*date);
                match policy {
                    ConflictPolicy::RespectOffDays => Self::is_recurring_working_day(schedule, day),
                    ConflictPolicy::WorkingFlagOnly => schedule.weekly_hours[day].is_working_day,
                }
            })
            .map(|(date, kind)| Conflict { date, kind })
            .collect();

        // Stable sort keeps leaves ahead of holidays on the same date.
        conflicts.sort_by_key(|c| c.date);
        conflicts
    }

    /// Add or remove `day` from the weekly off-days.
    ///
    /// Marking a day off also clears its working flag. Un-marking leaves the weekly
    /// hours untouched, so the day stays non-working until the flag is set again.
    pub fn set_weekly_off_day(schedule: &Schedule, day: WeekDay, is_off: bool) -> Schedule {
        let mut next = schedule.clone();
        if is_off {
            next.availability.weekly_off_days.insert(day);
            next.weekly_hours[day].is_working_day = false;
        } else {
            next.availability.weekly_off_days.remove(&day);
        }
        next
    }

    /// Remove `date` from the leaves if present, otherwise add it and drop it from
    /// the holidays. Dates falling on a weekly off-day are left alone either way.
    pub fn toggle_leave_date(schedule: &Schedule, date: NaiveDate) -> Schedule {
        let mut next = schedule.clone();
        if schedule.is_off_day(to_monday_first_weekday(date)) {
            tracing::debug!("Leave toggle on {} ignored: weekly off-day", date);
            return next;
        }

        let availability = &mut next.availability;
        if !availability.leaves.remove(&date) {
            availability.leaves.insert(date);
            availability.holidays.remove(&date);
        }
        next
    }

    /// Remove `date` from the holidays if present, otherwise add it.
    ///
    /// Weekly off-days are left alone, and adding is refused when the date is
    /// already a leave, so leaves and holidays stay disjoint.
    pub fn toggle_holiday_date(schedule: &Schedule, date: NaiveDate) -> Schedule {
        let mut next = schedule.clone();
        if schedule.is_off_day(to_monday_first_weekday(date)) {
            tracing::debug!("Holiday toggle on {} ignored: weekly off-day", date);
            return next;
        }

        let availability = &mut next.availability;
        if availability.holidays.remove(&date) {
            return next;
        }
        if availability.leaves.contains(&date) {
            tracing::debug!("Holiday on {} ignored: already a leave", date);
            return next;
        }
        availability.holidays.insert(date);
        next
    }

    /// Set the start or end of `day`'s hours. Ordering is not checked here, see
    /// [`AvailabilityService::hours_warnings`].
    pub fn set_working_hours(
        schedule: &Schedule,
        day: WeekDay,
        field: HoursField,
        value: NaiveTime,
    ) -> Schedule {
        let mut next = schedule.clone();
        let hours = &mut next.weekly_hours[day];
        match field {
            HoursField::From => hours.from = value,
            HoursField::To => hours.to = value,
        }
        next
    }

    /// Set the working flag of `day`. Weekly off-days are not updated.
    pub fn set_working_day_flag(schedule: &Schedule, day: WeekDay, is_working: bool) -> Schedule {
        let mut next = schedule.clone();
        next.weekly_hours[day].is_working_day = is_working;
        next
    }

    /// Working days whose hours do not form a forward range.
    pub fn hours_warnings(schedule: &Schedule) -> Vec<HoursWarning> {
        schedule
            .weekly_hours
            .iter()
            .filter(|(_, hours)| hours.is_working_day && hours.from >= hours.to)
            .map(|(day, hours)| HoursWarning {
                day,
                from: hours.from,
                to: hours.to,
            })
            .collect()
    }
}
