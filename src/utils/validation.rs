use anyhow::Result;

pub fn validate_coordinates(lat: f64, long: f64) -> Result<()> {
    if !lat.is_finite() || !long.is_finite() {
        return Err(anyhow::anyhow!("Location is not available"));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(anyhow::anyhow!("Latitude {} is out of range", lat));
    }

    if !(-180.0..=180.0).contains(&long) {
        return Err(anyhow::anyhow!("Longitude {} is out of range", long));
    }

    Ok(())
}

pub fn validate_staff_id(staff_id: i64) -> Result<()> {
    if staff_id <= 0 {
        return Err(anyhow::anyhow!("No signed-in staff member"));
    }
    Ok(())
}

/// East offsets up to +14:00, west down to -12:00.
pub fn validate_utc_offset_minutes(minutes: i32) -> Result<()> {
    if !(-720..=840).contains(&minutes) {
        return Err(anyhow::anyhow!(
            "UTC_OFFSET_MINUTES must be between -720 and 840, got {}",
            minutes
        ));
    }
    Ok(())
}
