#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use uuid::Uuid;

use praxis_calendar::config::Config;
use praxis_calendar::controller::CalendarController;
use praxis_calendar::domain::models::appointment::{Appointment, NewAppointmentParams};
use praxis_calendar::domain::models::location::{Location, Room};
use praxis_calendar::domain::models::schedule::{
    DayHours, ScheduleOwner, WeekPlan, WeeklySchedule,
};
use praxis_calendar::domain::models::settings::{RoleFilter, ViewMode};
use praxis_calendar::domain::models::staff::Staff;
use praxis_calendar::domain::services::overlay::OverlayQuery;
use praxis_calendar::infra::factory::bootstrap_state;
use praxis_calendar::state::AppState;

pub fn vienna() -> Tz {
    chrono_tz::Europe::Vienna
}

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
    pub controller: Arc<CalendarController>,
    pub settings_path: String,
}

impl TestApp {
    pub fn new() -> Self {
        let settings_path = std::env::temp_dir()
            .join(format!("test_settings_{}.json", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();

        let config = Config {
            settings_path: settings_path.clone(),
            default_timezone: "Europe/Vienna".to_string(),
            log_dir: "./logs".to_string(),
        };
        let state = bootstrap_state(&config);
        let controller = CalendarController::new(state.clone());

        Self {
            state,
            controller,
            settings_path,
        }
    }

    pub async fn add_location(&self, name: &str) -> Location {
        let location = Location::new(
            name.to_string(),
            "Europe/Vienna".to_string(),
            "#4caf50".to_string(),
        );
        self.state.location_repo.create(&location).await.unwrap()
    }

    pub async fn add_room(&self, location_id: &str, name: &str) -> Room {
        let room = Room::new(location_id.to_string(), name.to_string());
        self.state.location_repo.add_room(&room).await.unwrap()
    }

    pub async fn add_staff(&self, name: &str, role: &str, location_ids: &[&str]) -> Staff {
        let staff = Staff::new(
            name.to_string(),
            role.to_string(),
            "#1976d2".to_string(),
            location_ids.iter().map(|id| id.to_string()).collect(),
        );
        self.state.staff_repo.create(&staff).await.unwrap()
    }

    pub async fn add_schedule(
        &self,
        owner: ScheduleOwner,
        valid_from: NaiveDate,
        week: WeekPlan,
    ) -> WeeklySchedule {
        let mut schedule = WeeklySchedule::new(owner, valid_from);
        schedule.week = week;
        self.state.schedule_repo.upsert(&schedule).await.unwrap()
    }

    pub async fn add_appointment(
        &self,
        staff: &Staff,
        location_id: &str,
        start: DateTime<Utc>,
        duration_min: i32,
    ) -> Appointment {
        let appointment = Appointment::new(NewAppointmentParams {
            staff_id: staff.id.clone(),
            location_id: location_id.to_string(),
            room_id: None,
            patient_id: Uuid::new_v4().to_string(),
            start,
            duration_min,
            booking_type: "STANDARD".to_string(),
            note: None,
        });
        self.state
            .appointment_repo
            .create(&appointment)
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.settings_path);
    }
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Resolves a local Vienna wall-clock time on a date to UTC.
#[allow(dead_code)]
pub fn at(day: NaiveDate, hour: u32, min: u32) -> DateTime<Utc> {
    vienna()
        .from_local_datetime(&day.and_hms_opt(hour, min, 0).unwrap())
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

#[allow(dead_code)]
pub fn day_hours(start: &str, end: &str) -> DayHours {
    DayHours {
        is_open: true,
        start: start.to_string(),
        end: end.to_string(),
        break_start: None,
        break_end: None,
    }
}

#[allow(dead_code)]
pub fn day_hours_with_break(start: &str, end: &str, break_start: &str, break_end: &str) -> DayHours {
    DayHours {
        is_open: true,
        start: start.to_string(),
        end: end.to_string(),
        break_start: Some(break_start.to_string()),
        break_end: Some(break_end.to_string()),
    }
}

#[allow(dead_code)]
pub fn closed_day() -> DayHours {
    DayHours {
        is_open: false,
        start: "00:00".to_string(),
        end: "00:00".to_string(),
        break_start: None,
        break_end: None,
    }
}

#[allow(dead_code)]
pub fn week_with(entries: &[(Weekday, DayHours)]) -> WeekPlan {
    let mut week = WeekPlan::default();
    for (weekday, hours) in entries {
        week.set_day(*weekday, hours.clone());
    }
    week
}

#[allow(dead_code)]
pub fn day_query(anchor: NaiveDate) -> OverlayQuery {
    OverlayQuery {
        anchor,
        view: ViewMode::Day,
        staff_filter: RoleFilter::All,
        location_id: None,
        show_breaks: true,
    }
}
