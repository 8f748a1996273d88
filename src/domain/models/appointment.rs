use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Appointment {
    pub id: String,
    pub staff_id: String,
    pub location_id: String,
    pub room_id: Option<String>,
    pub patient_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub booking_type: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewAppointmentParams {
    pub staff_id: String,
    pub location_id: String,
    pub room_id: Option<String>,
    pub patient_id: String,
    pub start: DateTime<Utc>,
    pub duration_min: i32,
    pub booking_type: String,
    pub note: Option<String>,
}

impl Appointment {
    pub fn new(params: NewAppointmentParams) -> Self {
        let end_time = params.start + chrono::Duration::minutes(params.duration_min as i64);

        Self {
            id: Uuid::new_v4().to_string(),
            staff_id: params.staff_id,
            location_id: params.location_id,
            room_id: params.room_id,
            patient_id: params.patient_id,
            start_time: params.start,
            end_time,
            status: "BOOKED".to_string(),
            booking_type: params.booking_type,
            note: params.note,
            created_at: Utc::now(),
        }
    }
}
