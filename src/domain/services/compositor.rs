use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::domain::models::overlay::{
    BackgroundEvent, BandKind, CalendarEvent, DayLayout, OverlayItem, PositionedBand,
};

/// Lays out one day's bands and appointment bars.
///
/// Location-hours bands (and break windows belonging to a location)
/// span the full column width beneath everything else and never consume
/// a lane. Staff-hours bands and appointment bars each reserve one of
/// `lane_count` equal-width lanes, where lane_count = staff bands +
/// appointment bars for the day; slots are reserved per band regardless
/// of actual time overlap. Staff break bands ride the lane of their
/// staff band. Vertical placement is minutes since the day's first
/// visible hour, which is the floor-hour of the earliest start that
/// day. Purely a rendering computation; no conflict detection happens
/// here.
pub fn compose_day(
    date: NaiveDate,
    tz: Tz,
    background: Vec<BackgroundEvent>,
    events: Vec<CalendarEvent>,
) -> DayLayout {
    let mut location_bands = Vec::new();
    let mut staff_bands = Vec::new();
    let mut staff_breaks = Vec::new();

    for band in background {
        match band.kind {
            BandKind::LocationHours => location_bands.push(band),
            BandKind::StaffHours => staff_bands.push(band),
            BandKind::Break => {
                if band.staff_id.is_some() {
                    staff_breaks.push(band);
                } else {
                    location_bands.push(band);
                }
            }
        }
    }

    let first_visible_hour = first_visible_hour(tz, &location_bands, &staff_bands, &events);
    let origin_min = first_visible_hour as i64 * 60;

    let mut staff_bands = staff_bands;
    staff_bands.sort_by(|a, b| (&a.title, a.start).cmp(&(&b.title, b.start)));
    let mut events = events;
    events.sort_by(|a, b| (a.start, &a.id).cmp(&(b.start, &b.id)));

    let lane_count = staff_bands.len() + events.len();

    let mut items = Vec::new();

    for band in location_bands {
        items.push(position(
            tz,
            origin_min,
            OverlayItem::Band(band),
            None,
            lane_count,
        ));
    }

    let staff_lanes: Vec<(Option<String>, usize)> = staff_bands
        .iter()
        .enumerate()
        .map(|(lane, band)| (band.staff_id.clone(), lane))
        .collect();

    for (lane, band) in staff_bands.into_iter().enumerate() {
        items.push(position(
            tz,
            origin_min,
            OverlayItem::Band(band),
            Some(lane),
            lane_count,
        ));
    }

    for band in staff_breaks {
        let lane = staff_lanes
            .iter()
            .find(|(staff_id, _)| staff_id.as_deref() == band.staff_id.as_deref())
            .map(|(_, lane)| *lane);
        items.push(position(tz, origin_min, OverlayItem::Band(band), lane, lane_count));
    }

    let first_event_lane = staff_lanes.len();
    for (offset, event) in events.into_iter().enumerate() {
        items.push(position(
            tz,
            origin_min,
            OverlayItem::Event(event),
            Some(first_event_lane + offset),
            lane_count,
        ));
    }

    DayLayout {
        date,
        first_visible_hour,
        lane_count,
        items,
    }
}

fn first_visible_hour(
    tz: Tz,
    location_bands: &[BackgroundEvent],
    staff_bands: &[BackgroundEvent],
    events: &[CalendarEvent],
) -> u32 {
    location_bands
        .iter()
        .chain(staff_bands.iter())
        .map(|band| band.start)
        .chain(events.iter().map(|event| event.start))
        .map(|start| start.with_timezone(&tz).hour())
        .min()
        .unwrap_or(0)
}

fn position(
    tz: Tz,
    origin_min: i64,
    item: OverlayItem,
    lane: Option<usize>,
    lane_count: usize,
) -> PositionedBand {
    let start = item.start();
    let end = item.end();
    PositionedBand {
        top_min: minute_of_day(start, tz) - origin_min,
        height_min: (end - start).num_minutes(),
        lane,
        lane_count,
        item,
    }
}

fn minute_of_day(instant: DateTime<Utc>, tz: Tz) -> i64 {
    let local = instant.with_timezone(&tz);
    local.hour() as i64 * 60 + local.minute() as i64
}
