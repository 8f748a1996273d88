use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::models::overlay::DateRange;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Day,
    ThreeDay,
    Week,
    Month,
}

impl ViewMode {
    /// Visible inclusive date range for an anchor date. Week views run
    /// Monday through Sunday; month views cover the anchor's calendar
    /// month.
    pub fn range(self, anchor: NaiveDate) -> DateRange {
        match self {
            ViewMode::Day => DateRange::new(anchor, anchor),
            ViewMode::ThreeDay => DateRange::new(anchor, anchor + chrono::Duration::days(2)),
            ViewMode::Week => {
                let start =
                    anchor - chrono::Duration::days(anchor.weekday().num_days_from_monday() as i64);
                DateRange::new(start, start + chrono::Duration::days(6))
            }
            ViewMode::Month => {
                let start = anchor.with_day(1).unwrap_or(anchor);
                let next_month = if anchor.month() == 12 {
                    NaiveDate::from_ymd_opt(anchor.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(anchor.year(), anchor.month() + 1, 1)
                };
                let end = next_month
                    .map(|first| first - chrono::Duration::days(1))
                    .unwrap_or(anchor);
                DateRange::new(start, end)
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleFilter {
    All,
    Medical,
    NonMedical,
}

/// Persisted UI preferences, stored as a schema-validated JSON blob
/// under a fixed storage key. Load and save go through an explicit
/// SettingsStore rather than ad-hoc parsing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ViewSettings {
    pub view_mode: ViewMode,
    pub staff_filter: RoleFilter,
    pub location_id: Option<String>,
    pub show_breaks: bool,
    pub last_viewed_date: Option<NaiveDate>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Week,
            staff_filter: RoleFilter::All,
            location_id: None,
            show_breaks: true,
            last_viewed_date: None,
        }
    }
}

impl ViewSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(ref location_id) = self.location_id {
            if location_id.is_empty() {
                return Err(AppError::Validation(
                    "Selected location id must not be empty".into(),
                ));
            }
        }
        if let Some(date) = self.last_viewed_date {
            if date.year() < 1900 || date.year() > 2200 {
                return Err(AppError::Validation(format!(
                    "Last viewed date out of range: {}",
                    date
                )));
            }
        }
        Ok(())
    }
}
