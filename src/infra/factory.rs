use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::infra::providers::memory::{
    InMemoryAppointmentRepo, InMemoryLocationRepo, InMemoryScheduleRepo, InMemoryStaffRepo,
};
use crate::infra::settings::json_settings_store::JsonSettingsStore;
use crate::state::AppState;

pub fn bootstrap_state(config: &Config) -> AppState {
    info!(
        "Initializing calendar state (settings at {})",
        config.settings_path
    );

    AppState {
        config: config.clone(),
        schedule_repo: Arc::new(InMemoryScheduleRepo::new()),
        appointment_repo: Arc::new(InMemoryAppointmentRepo::new()),
        staff_repo: Arc::new(InMemoryStaffRepo::new()),
        location_repo: Arc::new(InMemoryLocationRepo::new()),
        settings_store: Arc::new(JsonSettingsStore::new(config.settings_path.clone())),
    }
}
