use crate::utils::validation::validate_utc_offset_minutes;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub attendance_file: Option<PathBuf>,
    pub orders_file: Option<PathBuf>,
    pub appointments_file: Option<PathBuf>,
    pub utc_offset_minutes: i32,
    pub location_update_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:staff_session.db".to_string());

        let attendance_file = env::var("ATTENDANCE_FILE").ok().map(PathBuf::from);
        let orders_file = env::var("ORDERS_FILE").ok().map(PathBuf::from);
        let appointments_file = env::var("APPOINTMENTS_FILE").ok().map(PathBuf::from);

        let utc_offset_minutes = match env::var("UTC_OFFSET_MINUTES") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| anyhow::anyhow!("UTC_OFFSET_MINUTES must be an integer, got {}", raw))?,
            Err(_) => 330,
        };
        validate_utc_offset_minutes(utc_offset_minutes)?;

        let location_update_interval_secs = match env::var("LOCATION_UPDATE_INTERVAL_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
                anyhow::anyhow!("LOCATION_UPDATE_INTERVAL_SECS must be a positive integer, got {}", raw)
            })?,
            Err(_) => 600,
        };

        Ok(Config {
            database_url,
            attendance_file,
            orders_file,
            appointments_file,
            utc_offset_minutes,
            location_update_interval_secs,
        })
    }
}
