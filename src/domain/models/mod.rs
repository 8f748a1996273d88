pub mod appointment;
pub mod location;
pub mod notification;
pub mod overlay;
pub mod schedule;
pub mod settings;
pub mod staff;
