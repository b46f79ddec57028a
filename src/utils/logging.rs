use tracing::{debug, error, info, warn};

/// Logs the start of an inbound event with consistent format
pub fn log_event_start(event: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("EVENT_START: {} in chat {} - {}", event, chat_id, d),
        None => info!("EVENT_START: {} in chat {}", event, chat_id),
    }
}

/// Logs a handled event with consistent format
pub fn log_event_success(event: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("EVENT_SUCCESS: {} in chat {} - {}", event, chat_id, d),
        None => info!("EVENT_SUCCESS: {} in chat {}", event, chat_id),
    }
}

/// Logs a failed event with consistent format
pub fn log_event_error(event: &str, chat_id: i64, error: &str) {
    error!("EVENT_ERROR: {} in chat {} - {}", event, chat_id, error);
}

/// Logs rejected user input with consistent format
pub fn log_validation_error(event: &str, value: &str, error: &str, chat_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} - value '{}' invalid: {} - chat {}",
        event, value, error, chat_id
    );
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("DB_ERROR: {} on {} failed: {} - {}", operation, table, error, d),
        None => error!("DB_ERROR: {} on {} failed: {}", operation, table, error),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
