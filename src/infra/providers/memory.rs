use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::models::appointment::Appointment;
use crate::domain::models::location::{Location, Room};
use crate::domain::models::schedule::{ScheduleOwner, WeeklySchedule};
use crate::domain::models::staff::Staff;
use crate::domain::ports::{
    AppointmentRepository, LocationRepository, ScheduleRepository, StaffRepository,
};
use crate::error::AppError;

#[derive(Default)]
pub struct InMemoryScheduleRepo {
    inner: RwLock<Vec<WeeklySchedule>>,
    revision: AtomicU64,
}

impl InMemoryScheduleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepo {
    async fn list_for_owner(&self, owner: &ScheduleOwner) -> Result<Vec<WeeklySchedule>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .iter()
            .filter(|schedule| &schedule.owner == owner)
            .cloned()
            .collect())
    }

    async fn upsert(&self, schedule: &WeeklySchedule) -> Result<WeeklySchedule, AppError> {
        schedule.validate()?;
        let mut schedules = self.inner.write().await;
        match schedules.iter_mut().find(|s| s.id == schedule.id) {
            Some(existing) => *existing = schedule.clone(),
            None => schedules.push(schedule.clone()),
        }
        self.bump();
        Ok(schedule.clone())
    }

    async fn delete_for_staff(&self, staff_id: &str) -> Result<(), AppError> {
        let mut schedules = self.inner.write().await;
        schedules.retain(|schedule| schedule.owner.staff_id() != Some(staff_id));
        self.bump();
        Ok(())
    }

    async fn revision(&self) -> Result<u64, AppError> {
        Ok(self.revision.load(Ordering::SeqCst))
    }
}

#[derive(Default)]
pub struct InMemoryAppointmentRepo {
    inner: RwLock<Vec<Appointment>>,
    revision: AtomicU64,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepo {
    async fn list_by_range(
        &self,
        location_id: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .iter()
            .filter(|appointment| appointment.start_time < end && appointment.end_time > start)
            .filter(|appointment| match location_id {
                Some(id) => appointment.location_id == id,
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        if appointment.end_time <= appointment.start_time {
            return Err(AppError::Validation(
                "Appointment must end after it starts".into(),
            ));
        }
        self.inner.write().await.push(appointment.clone());
        self.bump();
        Ok(appointment.clone())
    }

    async fn cancel(&self, id: &str) -> Result<(), AppError> {
        let mut appointments = self.inner.write().await;
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))?;
        appointment.status = "CANCELLED".to_string();
        self.bump();
        Ok(())
    }

    async fn revision(&self) -> Result<u64, AppError> {
        Ok(self.revision.load(Ordering::SeqCst))
    }
}

#[derive(Default)]
pub struct InMemoryStaffRepo {
    inner: RwLock<Vec<Staff>>,
    revision: AtomicU64,
}

impl InMemoryStaffRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StaffRepository for InMemoryStaffRepo {
    async fn list(&self) -> Result<Vec<Staff>, AppError> {
        Ok(self.inner.read().await.clone())
    }

    async fn create(&self, staff: &Staff) -> Result<Staff, AppError> {
        self.inner.write().await.push(staff.clone());
        self.bump();
        Ok(staff.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut staff = self.inner.write().await;
        let before = staff.len();
        staff.retain(|s| s.id != id);
        if staff.len() == before {
            return Err(AppError::NotFound(format!("Staff {} not found", id)));
        }
        self.bump();
        Ok(())
    }

    async fn revision(&self) -> Result<u64, AppError> {
        Ok(self.revision.load(Ordering::SeqCst))
    }
}

#[derive(Default)]
pub struct InMemoryLocationRepo {
    locations: RwLock<Vec<Location>>,
    rooms: RwLock<Vec<Room>>,
    revision: AtomicU64,
}

impl InMemoryLocationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepo {
    async fn list(&self) -> Result<Vec<Location>, AppError> {
        Ok(self.locations.read().await.clone())
    }

    async fn create(&self, location: &Location) -> Result<Location, AppError> {
        self.locations.write().await.push(location.clone());
        self.bump();
        Ok(location.clone())
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        Ok(self.rooms.read().await.clone())
    }

    async fn add_room(&self, room: &Room) -> Result<Room, AppError> {
        self.rooms.write().await.push(room.clone());
        self.bump();
        Ok(room.clone())
    }

    async fn revision(&self) -> Result<u64, AppError> {
        Ok(self.revision.load(Ordering::SeqCst))
    }
}
