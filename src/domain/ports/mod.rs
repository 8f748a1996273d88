use crate::domain::models::{
    appointment::Appointment,
    location::{Location, Room},
    schedule::{ScheduleOwner, WeeklySchedule},
    settings::ViewSettings,
    staff::Staff,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn list_for_owner(&self, owner: &ScheduleOwner) -> Result<Vec<WeeklySchedule>, AppError>;
    async fn upsert(&self, schedule: &WeeklySchedule) -> Result<WeeklySchedule, AppError>;
    async fn delete_for_staff(&self, staff_id: &str) -> Result<(), AppError>;
    /// Monotonic change counter, bumped on every mutation. Used as the
    /// schedule-version component of overlay cache keys.
    async fn revision(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn list_by_range(
        &self,
        location_id: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError>;
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn cancel(&self, id: &str) -> Result<(), AppError>;
    async fn revision(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Staff>, AppError>;
    async fn create(&self, staff: &Staff) -> Result<Staff, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn revision(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Location>, AppError>;
    async fn create(&self, location: &Location) -> Result<Location, AppError>;
    async fn list_rooms(&self) -> Result<Vec<Room>, AppError>;
    async fn add_room(&self, room: &Room) -> Result<Room, AppError>;
    async fn revision(&self) -> Result<u64, AppError>;
}

/// Explicit settings service: load/save of the persisted view
/// preferences with schema validation, replacing ad-hoc parsing of a
/// loosely-typed blob.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<ViewSettings, AppError>;
    async fn save(&self, settings: &ViewSettings) -> Result<(), AppError>;
}
