use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::models::location::Location;
use crate::domain::models::overlay::{BackgroundEvent, CalendarEvent, DayLayout};
use crate::domain::models::schedule::{ScheduleOwner, WeeklySchedule};
use crate::domain::models::settings::{RoleFilter, ViewMode, ViewSettings};
use crate::domain::models::{appointment::Appointment, location::Room, staff::Staff};
use crate::domain::services::compositor::compose_day;
use crate::domain::services::expansion::{expand_active, ExpansionOptions};
use crate::domain::services::filter::{filter_appointments, filter_staff};
use crate::domain::services::projection::project_appointments;

/// Everything that selects what the calendar shows. Serialized form is
/// part of the overlay cache key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OverlayQuery {
    pub anchor: NaiveDate,
    pub view: ViewMode,
    pub staff_filter: RoleFilter,
    pub location_id: Option<String>,
    pub show_breaks: bool,
}

impl OverlayQuery {
    pub fn from_settings(settings: &ViewSettings, fallback_anchor: NaiveDate) -> Self {
        Self {
            anchor: settings.last_viewed_date.unwrap_or(fallback_anchor),
            view: settings.view_mode,
            staff_filter: settings.staff_filter,
            location_id: settings.location_id.clone(),
            show_breaks: settings.show_breaks,
        }
    }
}

pub struct OverlayInputs<'a> {
    pub schedules: &'a [WeeklySchedule],
    pub appointments: &'a [Appointment],
    pub staff: &'a [Staff],
    pub rooms: &'a [Room],
    pub locations: &'a [Location],
}

/// The timezone the view resolves local wall-clock times in: the
/// selected location's, falling back to the practice default.
pub fn view_timezone(query: &OverlayQuery, locations: &[Location], default_tz: Tz) -> Tz {
    query
        .location_id
        .as_deref()
        .and_then(|id| locations.iter().find(|l| l.id == id))
        .map(|l| l.timezone.parse().unwrap_or(default_tz))
        .unwrap_or(default_tz)
}

/// The full derivation: expand schedules into background bands, narrow
/// staff and appointments by the active filters, project appointments,
/// then composite one layout per visible day. Pure function of its
/// inputs; recomputed from scratch whenever any of them change.
pub fn build_overlay(
    query: &OverlayQuery,
    inputs: &OverlayInputs<'_>,
    default_tz: Tz,
) -> Vec<DayLayout> {
    let range = query.view.range(query.anchor);
    let tz = view_timezone(query, inputs.locations, default_tz);

    let mut by_owner: HashMap<String, Vec<WeeklySchedule>> = HashMap::new();
    for schedule in inputs.schedules {
        by_owner
            .entry(schedule.owner.key())
            .or_default()
            .push(schedule.clone());
    }

    let mut background = Vec::new();

    let visible_locations: Vec<&Location> = match query.location_id.as_deref() {
        Some(id) => inputs.locations.iter().filter(|l| l.id == id).collect(),
        None => inputs.locations.iter().collect(),
    };
    for location in &visible_locations {
        let owner = ScheduleOwner::Location {
            location_id: location.id.clone(),
        };
        if let Some(schedules) = by_owner.get(&owner.key()) {
            background.extend(expand_active(
                schedules,
                &range,
                tz,
                &ExpansionOptions {
                    title: location.name.clone(),
                    color: location.color.clone(),
                    show_breaks: query.show_breaks,
                },
            ));
        }
    }

    let visible_staff = filter_staff(inputs.staff, query.staff_filter, query.location_id.as_deref());
    for member in &visible_staff {
        let owner = ScheduleOwner::Staff {
            staff_id: member.id.clone(),
        };
        if let Some(schedules) = by_owner.get(&owner.key()) {
            background.extend(expand_active(
                schedules,
                &range,
                tz,
                &ExpansionOptions {
                    title: member.display_name.clone(),
                    color: member.color.clone(),
                    show_breaks: query.show_breaks,
                },
            ));
        }
    }

    let visible_appointments = filter_appointments(
        inputs.appointments,
        &visible_staff,
        query.location_id.as_deref(),
    );
    let events = project_appointments(
        &visible_appointments,
        inputs.staff,
        inputs.rooms,
        inputs.locations,
    );

    let mut bands_by_day: HashMap<NaiveDate, Vec<BackgroundEvent>> = HashMap::new();
    for band in background {
        let day = band.start.with_timezone(&tz).date_naive();
        bands_by_day.entry(day).or_default().push(band);
    }
    let mut events_by_day: HashMap<NaiveDate, Vec<CalendarEvent>> = HashMap::new();
    for event in events {
        let day = event.start.with_timezone(&tz).date_naive();
        events_by_day.entry(day).or_default().push(event);
    }

    range
        .iter_days()
        .map(|date| {
            compose_day(
                date,
                tz,
                bands_by_day.remove(&date).unwrap_or_default(),
                events_by_day.remove(&date).unwrap_or_default(),
            )
        })
        .collect()
}
