use crate::domain::models::appointment::Appointment;
use crate::domain::models::settings::RoleFilter;
use crate::domain::models::staff::Staff;
use crate::domain::services::defaults::MEDICAL_ROLES;

pub fn is_medical(role: &str) -> bool {
    MEDICAL_ROLES.contains(&role)
}

/// Narrows the staff directory by medical/non-medical role and by
/// location assignment. Location match requires the staff's location-id
/// set to contain the selected id exactly; there is no hierarchy.
/// Inactive staff are never shown.
pub fn filter_staff<'a>(
    staff: &'a [Staff],
    role_filter: RoleFilter,
    location_id: Option<&str>,
) -> Vec<&'a Staff> {
    staff
        .iter()
        .filter(|member| member.active)
        .filter(|member| match role_filter {
            RoleFilter::All => true,
            RoleFilter::Medical => is_medical(&member.role),
            RoleFilter::NonMedical => !is_medical(&member.role),
        })
        .filter(|member| match location_id {
            Some(id) => member.works_at(id),
            None => true,
        })
        .collect()
}

/// Narrows appointment bars to the visible staff set and the selected
/// location.
pub fn filter_appointments<'a>(
    appointments: &'a [Appointment],
    visible_staff: &[&Staff],
    location_id: Option<&str>,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|appointment| {
            visible_staff
                .iter()
                .any(|member| member.id == appointment.staff_id)
        })
        .filter(|appointment| match location_id {
            Some(id) => appointment.location_id == id,
            None => true,
        })
        .collect()
}
