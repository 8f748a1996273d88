use tracing::warn;

use crate::domain::models::appointment::Appointment;
use crate::domain::models::location::{Location, Room};
use crate::domain::models::overlay::CalendarEvent;
use crate::domain::models::staff::Staff;

/// Projects booked appointments into renderable calendar events with
/// resolved staff name/color and room/location names. Appointments with
/// dangling staff or location references are skipped and logged;
/// cancelled appointments are dropped.
pub fn project_appointments(
    appointments: &[&Appointment],
    staff: &[Staff],
    rooms: &[Room],
    locations: &[Location],
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for appointment in appointments {
        if appointment.status == "CANCELLED" {
            continue;
        }

        let Some(member) = staff.iter().find(|s| s.id == appointment.staff_id) else {
            warn!(
                "Skipping appointment {}: staff {} not found",
                appointment.id, appointment.staff_id
            );
            continue;
        };
        let Some(location) = locations.iter().find(|l| l.id == appointment.location_id) else {
            warn!(
                "Skipping appointment {}: location {} not found",
                appointment.id, appointment.location_id
            );
            continue;
        };

        let room_name = match appointment.room_id.as_deref() {
            Some(room_id) => {
                let room = rooms.iter().find(|r| r.id == room_id);
                if room.is_none() {
                    warn!(
                        "Appointment {} references unknown room {}",
                        appointment.id, room_id
                    );
                }
                room.map(|r| r.name.clone())
            }
            None => None,
        };

        let title = appointment
            .note
            .clone()
            .unwrap_or_else(|| appointment.booking_type.clone());

        events.push(CalendarEvent {
            id: appointment.id.clone(),
            title,
            start: appointment.start_time,
            end: appointment.end_time,
            staff_id: member.id.clone(),
            staff_name: member.display_name.clone(),
            color: member.color.clone(),
            room_name,
            location_name: location.name.clone(),
            booking_type: appointment.booking_type.clone(),
        });
    }

    events
}
