use std::env;

#[derive(Clone)]
pub struct Config {
    pub settings_path: String,
    pub default_timezone: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            settings_path: env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| "./calendar-settings.json".to_string()),
            default_timezone: env::var("DEFAULT_TIMEZONE")
                .unwrap_or_else(|_| "Europe/Vienna".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
        }
    }
}
