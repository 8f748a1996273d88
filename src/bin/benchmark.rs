use chrono::{Duration as ChronoDuration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use colored::*;
use hdrhistogram::Histogram;
use std::time::Instant;
use uuid::Uuid;

use praxis_calendar::config::Config;
use praxis_calendar::controller::CalendarController;
use praxis_calendar::domain::models::appointment::{Appointment, NewAppointmentParams};
use praxis_calendar::domain::models::location::Location;
use praxis_calendar::domain::models::schedule::{
    DayHours, ScheduleOwner, WeekPlan, WeeklySchedule,
};
use praxis_calendar::domain::models::settings::{RoleFilter, ViewMode};
use praxis_calendar::domain::models::staff::Staff;
use praxis_calendar::domain::services::overlay::OverlayQuery;
use praxis_calendar::infra::factory::bootstrap_state;
use praxis_calendar::state::AppState;

const WEEKS: usize = 52;

#[tokio::main]
async fn main() {
    let _guard = praxis_calendar::init_logging("./logs");

    println!("{}", "🚀 Starting Overlay Benchmark Suite".bold().green());
    println!("One iteration = one uncached week-view derivation\n");

    println!(
        "{:<10} | {:<15} | {:<15} | {:<12}",
        "Staff", "Mean (ms)", "P99 (ms)", "Bands/week"
    );
    println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<12}", "", "", "", "");

    for &staff_count in &[5usize, 25, 100, 250] {
        run_stage(staff_count).await;
    }
}

async fn run_stage(staff_count: usize) {
    let config = Config {
        settings_path: format!("bench-settings-{}.json", Uuid::new_v4()),
        default_timezone: "Europe/Vienna".to_string(),
        log_dir: "./logs".to_string(),
    };
    let state = bootstrap_state(&config);

    // 2025-01-06 is a Monday
    let year_start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    seed(&state, staff_count, year_start).await;

    let controller = CalendarController::new(state);
    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut bands_per_week = 0usize;

    for week in 0..WEEKS {
        let anchor = year_start + ChronoDuration::weeks(week as i64);
        let query = OverlayQuery {
            anchor,
            view: ViewMode::Week,
            staff_filter: RoleFilter::All,
            location_id: None,
            show_breaks: true,
        };

        let started = Instant::now();
        let snapshot = controller
            .load_view(&query)
            .await
            .expect("overlay derivation failed");
        histogram
            .record(started.elapsed().as_micros() as u64)
            .unwrap();

        bands_per_week = snapshot.days.iter().map(|day| day.items.len()).sum();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<12}",
        staff_count.to_string().cyan(),
        mean_ms,
        p99_ms,
        bands_per_week
    );
}

async fn seed(state: &AppState, staff_count: usize, year_start: NaiveDate) {
    let tz: Tz = "Europe/Vienna".parse().unwrap();

    let location = Location::new(
        "Ordination Wien".to_string(),
        "Europe/Vienna".to_string(),
        "#4caf50".to_string(),
    );
    state.location_repo.create(&location).await.unwrap();

    let mut location_schedule = WeeklySchedule::new(
        ScheduleOwner::Location {
            location_id: location.id.clone(),
        },
        year_start,
    );
    location_schedule.week = weekdays("07:00", "19:00", None);
    state
        .schedule_repo
        .upsert(&location_schedule)
        .await
        .unwrap();

    for i in 0..staff_count {
        let role = if i % 3 == 0 { "Arzt" } else { "Assistenz" };
        let member = Staff::new(
            format!("Staff {}", i),
            role.to_string(),
            "#1976d2".to_string(),
            vec![location.id.clone()],
        );
        state.staff_repo.create(&member).await.unwrap();

        let mut schedule = WeeklySchedule::new(
            ScheduleOwner::Staff {
                staff_id: member.id.clone(),
            },
            year_start,
        );
        schedule.week = weekdays("08:00", "16:00", Some(("12:00", "12:30")));
        state.schedule_repo.upsert(&schedule).await.unwrap();

        for week in 0..WEEKS {
            let tuesday = year_start + ChronoDuration::weeks(week as i64) + ChronoDuration::days(1);
            let start = tz
                .from_local_datetime(&tuesday.and_hms_opt(9, 0, 0).unwrap())
                .single()
                .unwrap()
                .with_timezone(&Utc);
            let appointment = Appointment::new(NewAppointmentParams {
                staff_id: member.id.clone(),
                location_id: location.id.clone(),
                room_id: None,
                patient_id: Uuid::new_v4().to_string(),
                start,
                duration_min: 30,
                booking_type: "STANDARD".to_string(),
                note: None,
            });
            state.appointment_repo.create(&appointment).await.unwrap();
        }
    }
}

fn weekdays(start: &str, end: &str, lunch: Option<(&str, &str)>) -> WeekPlan {
    let hours = DayHours {
        is_open: true,
        start: start.to_string(),
        end: end.to_string(),
        break_start: lunch.map(|(s, _)| s.to_string()),
        break_end: lunch.map(|(_, e)| e.to_string()),
    };

    let mut week = WeekPlan::default();
    for weekday in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ] {
        week.set_day(weekday, hours.clone());
    }
    week
}
