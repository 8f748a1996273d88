use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleOwner {
    Location { location_id: String },
    Staff { staff_id: String },
}

impl ScheduleOwner {
    pub fn key(&self) -> String {
        match self {
            ScheduleOwner::Location { location_id } => format!("location:{}", location_id),
            ScheduleOwner::Staff { staff_id } => format!("staff:{}", staff_id),
        }
    }

    pub fn staff_id(&self) -> Option<&str> {
        match self {
            ScheduleOwner::Staff { staff_id } => Some(staff_id),
            ScheduleOwner::Location { .. } => None,
        }
    }

    pub fn location_id(&self) -> Option<&str> {
        match self {
            ScheduleOwner::Location { location_id } => Some(location_id),
            ScheduleOwner::Staff { .. } => None,
        }
    }
}

/// One weekday entry of a recurring schedule. Times are "HH:MM" local
/// strings; a window must end after it starts on the same day
/// (cross-midnight windows are not supported).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayHours {
    pub is_open: bool,
    pub start: String,
    pub end: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
}

impl DayHours {
    pub fn window(&self) -> Result<(NaiveTime, NaiveTime), AppError> {
        let start = parse_hhmm(&self.start)?;
        let end = parse_hhmm(&self.end)?;
        if end <= start {
            return Err(AppError::Validation(format!(
                "Day window must end after it starts ({} >= {})",
                self.start, self.end
            )));
        }
        Ok((start, end))
    }

    /// Both break bounds must be present and well-formed, otherwise no
    /// break window exists for the day.
    pub fn break_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = parse_hhmm(self.break_start.as_deref()?).ok()?;
        let end = parse_hhmm(self.break_end.as_deref()?).ok()?;
        if end <= start {
            return None;
        }
        Some((start, end))
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid time format (HH:MM): {}", value)))
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeekPlan {
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
    pub sunday: Option<DayHours>,
}

impl WeekPlan {
    /// Weekday lookup through a fixed Sunday-indexed table.
    pub fn day_entry(&self, weekday: Weekday) -> Option<&DayHours> {
        let by_sunday_index: [&Option<DayHours>; 7] = [
            &self.sunday,
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
        ];
        by_sunday_index[weekday.num_days_from_sunday() as usize].as_ref()
    }

    pub fn set_day(&mut self, weekday: Weekday, hours: DayHours) {
        match weekday {
            Weekday::Mon => self.monday = Some(hours),
            Weekday::Tue => self.tuesday = Some(hours),
            Weekday::Wed => self.wednesday = Some(hours),
            Weekday::Thu => self.thursday = Some(hours),
            Weekday::Fri => self.friday = Some(hours),
            Weekday::Sat => self.saturday = Some(hours),
            Weekday::Sun => self.sunday = Some(hours),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        [
            (Weekday::Mon, &self.monday),
            (Weekday::Tue, &self.tuesday),
            (Weekday::Wed, &self.wednesday),
            (Weekday::Thu, &self.thursday),
            (Weekday::Fri, &self.friday),
            (Weekday::Sat, &self.saturday),
            (Weekday::Sun, &self.sunday),
        ]
        .into_iter()
        .filter_map(|(weekday, entry)| entry.as_ref().map(|hours| (weekday, hours)))
    }
}

/// Recurring weekly open/working-hours template for a location or staff
/// member. Schedules are superseded by a new validity window rather than
/// deleted; selection for a date picks the covering schedule with the
/// newest valid_from.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeeklySchedule {
    pub id: String,
    pub owner: ScheduleOwner,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
    pub week: WeekPlan,
    pub created_at: DateTime<Utc>,
}

impl WeeklySchedule {
    pub fn new(owner: ScheduleOwner, valid_from: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner,
            valid_from,
            valid_to: None,
            week: WeekPlan::default(),
            created_at: Utc::now(),
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        if date < self.valid_from {
            return false;
        }
        match self.valid_to {
            Some(valid_to) => date <= valid_to,
            None => true,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(valid_to) = self.valid_to {
            if valid_to < self.valid_from {
                return Err(AppError::Validation(
                    "Validity window must not end before it starts".into(),
                ));
            }
        }
        for (weekday, hours) in self.week.entries() {
            if !hours.is_open {
                continue;
            }
            hours.window().map_err(|e| {
                AppError::Validation(format!("{:?}: {}", weekday, e))
            })?;
            if let (Some(break_start), Some(break_end)) =
                (hours.break_start.as_deref(), hours.break_end.as_deref())
            {
                let start = parse_hhmm(break_start)?;
                let end = parse_hhmm(break_end)?;
                if end <= start {
                    return Err(AppError::Validation(format!(
                        "{:?}: break must end after it starts",
                        weekday
                    )));
                }
            }
        }
        Ok(())
    }
}
