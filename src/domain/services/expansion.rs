use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::domain::models::overlay::{BackgroundEvent, BandKind, DateRange};
use crate::domain::models::schedule::{ScheduleOwner, WeeklySchedule};
use crate::domain::services::defaults::{
    BREAK_BAND_COLOR, BREAK_BAND_OPACITY, BREAK_BAND_TITLE, LOCATION_BAND_OPACITY,
    STAFF_BAND_OPACITY,
};

/// Display attributes for the bands a schedule expands into.
pub struct ExpansionOptions {
    pub title: String,
    pub color: String,
    pub show_breaks: bool,
}

/// Expands a weekly schedule over a visible date range: one band per
/// calendar day whose weekday entry is open, plus one break band per day
/// when both break bounds are present and breaks are shown. Malformed
/// day entries and local times that do not resolve in the timezone are
/// skipped, never fatal.
pub fn expand_schedule(
    schedule: &WeeklySchedule,
    range: &DateRange,
    tz: Tz,
    opts: &ExpansionOptions,
) -> Vec<BackgroundEvent> {
    let mut bands = Vec::new();
    for date in range.iter_days() {
        if !schedule.covers(date) {
            continue;
        }
        expand_day(schedule, date, tz, opts, &mut bands);
    }
    bands
}

/// Expands the schedule set of a single owner, resolving superseded
/// validity windows per date: the covering schedule with the newest
/// valid_from wins, so at most one schedule contributes bands per day.
pub fn expand_active(
    schedules: &[WeeklySchedule],
    range: &DateRange,
    tz: Tz,
    opts: &ExpansionOptions,
) -> Vec<BackgroundEvent> {
    let mut bands = Vec::new();
    for date in range.iter_days() {
        if let Some(schedule) = active_schedule_for(schedules, date) {
            expand_day(schedule, date, tz, opts, &mut bands);
        }
    }
    bands
}

pub fn active_schedule_for(
    schedules: &[WeeklySchedule],
    date: NaiveDate,
) -> Option<&WeeklySchedule> {
    schedules
        .iter()
        .filter(|schedule| schedule.covers(date))
        .max_by_key(|schedule| schedule.valid_from)
}

fn expand_day(
    schedule: &WeeklySchedule,
    date: NaiveDate,
    tz: Tz,
    opts: &ExpansionOptions,
    bands: &mut Vec<BackgroundEvent>,
) {
    let Some(entry) = schedule.week.day_entry(date.weekday()) else {
        return;
    };
    if !entry.is_open {
        return;
    }

    let (start_time, end_time) = match entry.window() {
        Ok(window) => window,
        Err(e) => {
            warn!(
                "Skipping malformed day entry for schedule {} on {}: {}",
                schedule.id, date, e
            );
            return;
        }
    };

    let (Some(start), Some(end)) = (
        resolve_local(date, start_time, tz),
        resolve_local(date, end_time, tz),
    ) else {
        warn!(
            "Skipping day entry for schedule {} on {}: local time does not resolve in {}",
            schedule.id, date, tz
        );
        return;
    };

    let kind = match schedule.owner {
        ScheduleOwner::Location { .. } => BandKind::LocationHours,
        ScheduleOwner::Staff { .. } => BandKind::StaffHours,
    };
    let opacity = match kind {
        BandKind::LocationHours => LOCATION_BAND_OPACITY,
        _ => STAFF_BAND_OPACITY,
    };

    bands.push(BackgroundEvent {
        id: format!("{}-{}-{}", kind.as_str(), schedule.id, date),
        title: opts.title.clone(),
        start,
        end,
        kind,
        color: opts.color.clone(),
        opacity,
        location_id: schedule.owner.location_id().map(str::to_string),
        staff_id: schedule.owner.staff_id().map(str::to_string),
    });

    if !opts.show_breaks {
        return;
    }
    let Some((break_start, break_end)) = entry.break_window() else {
        return;
    };
    let (Some(start), Some(end)) = (
        resolve_local(date, break_start, tz),
        resolve_local(date, break_end, tz),
    ) else {
        warn!(
            "Skipping break window for schedule {} on {}: local time does not resolve in {}",
            schedule.id, date, tz
        );
        return;
    };

    bands.push(BackgroundEvent {
        id: format!("{}-{}-{}", BandKind::Break.as_str(), schedule.id, date),
        title: BREAK_BAND_TITLE.to_string(),
        start,
        end,
        kind: BandKind::Break,
        color: BREAK_BAND_COLOR.to_string(),
        opacity: BREAK_BAND_OPACITY,
        location_id: schedule.owner.location_id().map(str::to_string),
        staff_id: schedule.owner.staff_id().map(str::to_string),
    });
}

fn resolve_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
