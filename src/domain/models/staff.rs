use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Staff {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub color: String,
    pub location_ids: Vec<String>,
    pub active: bool,
}

impl Staff {
    pub fn new(display_name: String, role: String, color: String, location_ids: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            display_name,
            role,
            color,
            location_ids,
            active: true,
        }
    }

    pub fn works_at(&self, location_id: &str) -> bool {
        self.location_ids.iter().any(|id| id == location_id)
    }
}
