use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, LocationRepository, ScheduleRepository, SettingsStore, StaffRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub staff_repo: Arc<dyn StaffRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub settings_store: Arc<dyn SettingsStore>,
}
