//! User-friendly error message formatting.
//!
//! Turns provider and storage error text into a short status line plus an
//! optional hint.

/// Convert a technical error message to a user-friendly message with guidance.
///
/// Takes the raw error string and returns a tuple of (short_message, suggestion).
pub fn format_error_with_guidance(error: &str) -> (String, Option<String>) {
    let error_lower = error.to_lowercase();

    if error_lower.contains("timed out") || error_lower.contains("timeout") {
        return (
            "No fix in time".to_string(),
            Some("Move somewhere with a clear view of the sky and try again.".to_string()),
        );
    }

    if error_lower.contains("connection refused") || error_lower.contains("connection reset") {
        return (
            "Location service unreachable".to_string(),
            Some("Check that gpsd is running, or pick another provider in the config.".to_string()),
        );
    }

    if error_lower.contains("position unavailable") || error_lower.contains("no fix") {
        return (
            "Position unavailable".to_string(),
            Some("The receiver has no fix yet. Wait a moment and try again.".to_string()),
        );
    }

    if error_lower.contains("protocol error") {
        return (
            "Unexpected data from the location service".to_string(),
            None,
        );
    }

    if error_lower.contains("database") || error_lower.contains("sqlite") {
        return (
            "Storage error".to_string(),
            Some("The location database could not be updated.".to_string()),
        );
    }

    if error_lower.contains("preference") {
        return (
            "Preference not saved".to_string(),
            Some("The theme will reset on the next start.".to_string()),
        );
    }

    (error.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout() {
        let (msg, suggestion) =
            format_error_with_guidance("Operation 'gpsd fix' timed out after 30s");
        assert_eq!(msg, "No fix in time");
        assert!(suggestion.unwrap().contains("clear view"));
    }

    #[test]
    fn test_connection_refused() {
        let (msg, suggestion) = format_error_with_guidance("Connection refused (os error 111)");
        assert_eq!(msg, "Location service unreachable");
        assert!(suggestion.unwrap().contains("gpsd"));
    }

    #[test]
    fn test_position_unavailable() {
        let (msg, _) = format_error_with_guidance("Position unavailable: gpsd closed the connection");
        assert_eq!(msg, "Position unavailable");
    }

    #[test]
    fn test_storage() {
        let (msg, suggestion) = format_error_with_guidance("Database error: disk I/O error");
        assert_eq!(msg, "Storage error");
        assert!(suggestion.is_some());
    }

    #[test]
    fn test_unknown_error() {
        let (msg, suggestion) = format_error_with_guidance("Some random error xyz");
        assert_eq!(msg, "Some random error xyz");
        assert!(suggestion.is_none());
    }

    #[test]
    fn test_case_insensitivity() {
        let (msg, _) = format_error_with_guidance("PROTOCOL ERROR: bad json");
        assert_eq!(msg, "Unexpected data from the location service");
    }
}
