mod common;

use chrono::Weekday;
use common::*;

use praxis_calendar::domain::models::appointment::{Appointment, NewAppointmentParams};
use praxis_calendar::domain::models::overlay::{BandKind, OverlayItem};
use praxis_calendar::domain::models::schedule::ScheduleOwner;
use praxis_calendar::domain::models::settings::{RoleFilter, ViewMode};
use praxis_calendar::domain::services::overlay::OverlayQuery;
use praxis_calendar::domain::services::projection::project_appointments;

#[tokio::test]
async fn test_single_monday_location_band_end_to_end() {
    let app = TestApp::new();
    let location = app.add_location("Ordination Wien").await;
    app.add_schedule(
        ScheduleOwner::Location {
            location_id: location.id.clone(),
        },
        date(2025, 1, 1),
        week_with(&[(Weekday::Mon, day_hours("09:00", "17:00"))]),
    )
    .await;

    let monday = date(2025, 3, 10);
    let snapshot = app.controller.load_view(&day_query(monday)).await.unwrap();

    assert_eq!(snapshot.days.len(), 1);
    let day = &snapshot.days[0];
    assert_eq!(day.date, monday);
    assert_eq!(day.items.len(), 1);

    let OverlayItem::Band(band) = &day.items[0].item else {
        panic!("expected a background band");
    };
    assert_eq!(band.kind, BandKind::LocationHours);
    assert_eq!(band.start, at(monday, 9, 0));
    assert_eq!(band.end, at(monday, 17, 0));
}

#[tokio::test]
async fn test_week_and_month_views_cover_expected_days() {
    let app = TestApp::new();

    let wednesday = date(2025, 3, 12);
    let query = OverlayQuery {
        anchor: wednesday,
        view: ViewMode::Week,
        staff_filter: RoleFilter::All,
        location_id: None,
        show_breaks: true,
    };
    let snapshot = app.controller.load_view(&query).await.unwrap();
    assert_eq!(snapshot.days.len(), 7);
    assert_eq!(snapshot.days[0].date, date(2025, 3, 10));
    assert_eq!(snapshot.days[6].date, date(2025, 3, 16));

    let query = OverlayQuery {
        view: ViewMode::Month,
        ..query
    };
    let snapshot = app.controller.load_view(&query).await.unwrap();
    assert_eq!(snapshot.days.len(), 31);
}

#[tokio::test]
async fn test_staff_bands_and_appointments_share_the_day_lanes() {
    let app = TestApp::new();
    let location = app.add_location("Ordination Wien").await;
    let monday = date(2025, 3, 10);

    for name in ["Dr. Huber", "Dr. Gruber"] {
        let member = app.add_staff(name, "Arzt", &[&location.id]).await;
        app.add_schedule(
            ScheduleOwner::Staff {
                staff_id: member.id.clone(),
            },
            date(2025, 1, 1),
            week_with(&[(Weekday::Mon, day_hours("08:00", "16:00"))]),
        )
        .await;
        if name == "Dr. Huber" {
            app.add_appointment(&member, &location.id, at(monday, 10, 0), 30)
                .await;
        }
    }

    let snapshot = app.controller.load_view(&day_query(monday)).await.unwrap();
    let day = &snapshot.days[0];

    // two staff bands + one appointment bar
    assert_eq!(day.lane_count, 3);
    for item in &day.items {
        if item.lane.is_some() {
            assert!((item.width_fraction() - 1.0 / 3.0).abs() < 1e-6);
        }
    }
}

#[tokio::test]
async fn test_medical_filter_drops_non_medical_bands() {
    let app = TestApp::new();
    let location = app.add_location("Ordination Wien").await;
    let monday = date(2025, 3, 10);

    for (name, role) in [("Dr. Huber", "Arzt"), ("M. Wagner", "Assistenz")] {
        let member = app.add_staff(name, role, &[&location.id]).await;
        app.add_schedule(
            ScheduleOwner::Staff {
                staff_id: member.id.clone(),
            },
            date(2025, 1, 1),
            week_with(&[(Weekday::Mon, day_hours("08:00", "16:00"))]),
        )
        .await;
    }

    let query = OverlayQuery {
        staff_filter: RoleFilter::Medical,
        ..day_query(monday)
    };
    let snapshot = app.controller.load_view(&query).await.unwrap();
    let day = &snapshot.days[0];

    assert_eq!(day.items.len(), 1);
    let OverlayItem::Band(band) = &day.items[0].item else {
        panic!("expected a staff band");
    };
    assert_eq!(band.title, "Dr. Huber");

    let query = OverlayQuery {
        staff_filter: RoleFilter::NonMedical,
        ..day_query(monday)
    };
    let snapshot = app.controller.load_view(&query).await.unwrap();
    let OverlayItem::Band(band) = &snapshot.days[0].items[0].item else {
        panic!("expected a staff band");
    };
    assert_eq!(band.title, "M. Wagner");
}

#[tokio::test]
async fn test_projection_skips_dangling_references() {
    let app = TestApp::new();
    let location = app.add_location("Ordination Wien").await;
    let member = app.add_staff("Dr. Huber", "Arzt", &[&location.id]).await;
    let monday = date(2025, 3, 10);

    let room = app.add_room(&location.id, "Zimmer 2").await;
    let good = Appointment::new(NewAppointmentParams {
        staff_id: member.id.clone(),
        location_id: location.id.clone(),
        room_id: Some(room.id.clone()),
        patient_id: "p0".to_string(),
        start: at(monday, 9, 0),
        duration_min: 30,
        booking_type: "STANDARD".to_string(),
        note: None,
    });
    app.state.appointment_repo.create(&good).await.unwrap();
    let dangling_staff = Appointment::new(NewAppointmentParams {
        staff_id: "missing".to_string(),
        location_id: location.id.clone(),
        room_id: None,
        patient_id: "p1".to_string(),
        start: at(monday, 10, 0),
        duration_min: 30,
        booking_type: "STANDARD".to_string(),
        note: None,
    });
    let dangling_location = Appointment::new(NewAppointmentParams {
        staff_id: member.id.clone(),
        location_id: "missing".to_string(),
        room_id: None,
        patient_id: "p2".to_string(),
        start: at(monday, 11, 0),
        duration_min: 30,
        booking_type: "STANDARD".to_string(),
        note: None,
    });

    let staff = app.state.staff_repo.list().await.unwrap();
    let locations = app.state.location_repo.list().await.unwrap();
    let rooms = app.state.location_repo.list_rooms().await.unwrap();
    let all = [&good, &dangling_staff, &dangling_location];

    let events = project_appointments(&all, &staff, &rooms, &locations);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, good.id);
    assert_eq!(events[0].staff_name, "Dr. Huber");
    assert_eq!(events[0].location_name, "Ordination Wien");
    assert_eq!(events[0].room_name.as_deref(), Some("Zimmer 2"));
}

#[tokio::test]
async fn test_cancelled_appointments_are_not_projected() {
    let app = TestApp::new();
    let location = app.add_location("Ordination Wien").await;
    let member = app.add_staff("Dr. Huber", "Arzt", &[&location.id]).await;
    let monday = date(2025, 3, 10);

    let appointment = app
        .add_appointment(&member, &location.id, at(monday, 9, 0), 30)
        .await;
    app.state
        .appointment_repo
        .cancel(&appointment.id)
        .await
        .unwrap();

    let snapshot = app.controller.load_view(&day_query(monday)).await.unwrap();
    let has_event = snapshot.days[0]
        .items
        .iter()
        .any(|i| matches!(&i.item, OverlayItem::Event(_)));
    assert!(!has_event);
}
