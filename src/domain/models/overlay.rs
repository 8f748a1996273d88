use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive calendar-day range visible in the current view.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            let next = *day + chrono::Duration::days(1);
            if next <= end {
                Some(next)
            } else {
                None
            }
        })
    }

}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BandKind {
    LocationHours,
    StaffHours,
    Break,
}

impl BandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BandKind::LocationHours => "location_hours",
            BandKind::StaffHours => "staff_hours",
            BandKind::Break => "break",
        }
    }
}

/// Derived, never persisted: a time band representing opening or working
/// hours (or a break window), recomputed from WeeklySchedule x visible
/// range on every derivation pass.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackgroundEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: BandKind,
    pub color: String,
    pub opacity: f32,
    pub location_id: Option<String>,
    pub staff_id: Option<String>,
}

/// Derived projection of a booked Appointment enriched with display
/// names and colors. Lifetime is one derivation pass.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub staff_id: String,
    pub staff_name: String,
    pub color: String,
    pub room_name: Option<String>,
    pub location_name: String,
    pub booking_type: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum OverlayItem {
    Band(BackgroundEvent),
    Event(CalendarEvent),
}

impl OverlayItem {
    pub fn start(&self) -> DateTime<Utc> {
        match self {
            OverlayItem::Band(band) => band.start,
            OverlayItem::Event(event) => event.start,
        }
    }

    pub fn end(&self) -> DateTime<Utc> {
        match self {
            OverlayItem::Band(band) => band.end,
            OverlayItem::Event(event) => event.end,
        }
    }
}

/// An overlay item with its rendering slot. `lane == None` means the
/// item spans the full day-column width (location-hours bands and their
/// breaks); everything else occupies one of `lane_count` equal-width
/// lanes. Vertical placement is minutes since the day's first visible
/// hour.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PositionedBand {
    pub item: OverlayItem,
    pub lane: Option<usize>,
    pub lane_count: usize,
    pub top_min: i64,
    pub height_min: i64,
}

impl PositionedBand {
    pub fn width_fraction(&self) -> f32 {
        match self.lane {
            None => 1.0,
            Some(_) if self.lane_count == 0 => 1.0,
            Some(_) => 1.0 / self.lane_count as f32,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub first_visible_hour: u32,
    pub lane_count: usize,
    pub items: Vec<PositionedBand>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CalendarSnapshot {
    pub range: DateRange,
    pub days: Vec<DayLayout>,
    pub generated_at: DateTime<Utc>,
}
