use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub timezone: String,
    pub color: String,
}

impl Location {
    pub fn new(name: String, timezone: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            timezone,
            color,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Room {
    pub id: String,
    pub location_id: String,
    pub name: String,
}

impl Room {
    pub fn new(location_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            location_id,
            name,
        }
    }
}
