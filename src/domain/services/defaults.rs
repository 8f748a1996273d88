/// Role name variants classified as medical. Matching is exact and
/// case-sensitive; anything outside this list is non-medical.
pub const MEDICAL_ROLES: &[&str] = &[
    "doctor",
    "Doctor",
    "arzt",
    "Arzt",
    "dr",
    "Dr",
    "doktor",
    "Doktor",
    "physician",
    "Physician",
];

pub const LOCATION_BAND_OPACITY: f32 = 0.25;
pub const STAFF_BAND_OPACITY: f32 = 0.45;

/// Break bands always render with this color and opacity, overriding
/// the owning band's color.
pub const BREAK_BAND_COLOR: &str = "#9e9e9e";
pub const BREAK_BAND_OPACITY: f32 = 0.6;
pub const BREAK_BAND_TITLE: &str = "Pause";

pub const FALLBACK_BAND_COLOR: &str = "#90a4ae";
