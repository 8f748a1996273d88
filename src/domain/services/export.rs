use crate::domain::models::overlay::CalendarEvent;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

/// Generates an iCalendar (.ics) string for a projected appointment
pub fn generate_ics(event: &CalendarEvent) -> String {
    let mut calendar = Calendar::new();

    let description = match event.room_name.as_deref() {
        Some(room) => format!("{} ({})", event.staff_name, room),
        None => event.staff_name.clone(),
    };

    let ical_event = IcalEvent::new()
        .summary(&event.title)
        .description(&description)
        .location(&event.location_name)
        .starts(event.start)
        .ends(event.end)
        .uid(&event.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
