use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the UNIX epoch, or 0 if the system clock is set before it
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
