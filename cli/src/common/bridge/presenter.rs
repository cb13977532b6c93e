//! # Result Presenter
//!
//! Turns a [`CycleState`] into the text shown beneath the input. Pure: the
//! same state always renders the same view (timestamps are shown in local
//! time).

use chrono::{DateTime, Local, NaiveDateTime};

use super::cycle::CycleState;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset-less layouts accepted in addition to RFC 3339.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub const LOADING_TEXT: &str = "Processing your message...";
pub const EMPTY_TEXT: &str = "Send a message to see the response here";

pub fn render(state: &CycleState) -> String {
    match state {
        CycleState::Idle => EMPTY_TEXT.to_string(),
        CycleState::Loading => format!("⏳ {LOADING_TEXT}"),
        CycleState::Success(response) => format!(
            "✅ Response\n{}\nReceived at: {}",
            response.echo,
            format_timestamp(&response.timestamp)
        ),
        CycleState::Failure(error) => {
            let mut lines = vec![
                "❌ Error".to_string(),
                error.error.clone(),
                error.message.clone(),
            ];
            if error.status > 0 {
                lines.push(format!("Status: {}", error.status));
            }
            lines.push(format_timestamp(&error.timestamp));
            lines.join("\n")
        }
    }
}

/// Formats a wire timestamp for display. Values with an offset are converted
/// to local time; offset-less values are taken as already local. Anything
/// unparseable is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string();
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(|naive| naive.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::bridge::types::{ApiError, EchoResponse};

    #[test]
    fn idle_shows_placeholder() {
        assert_eq!(render(&CycleState::Idle), EMPTY_TEXT);
    }

    #[test]
    fn loading_shows_indicator() {
        assert!(render(&CycleState::Loading).contains(LOADING_TEXT));
    }

    #[test]
    fn success_shows_echo_and_formatted_timestamp() {
        let timestamp = "2024-05-01T12:30:00Z";
        let view = render(&CycleState::Success(EchoResponse {
            echo: "hi".into(),
            timestamp: timestamp.into(),
        }));

        assert!(view.contains("Response"));
        assert!(view.contains("hi"));
        assert!(view.contains(&format!("Received at: {}", format_timestamp(timestamp))));
        assert!(!view.contains(LOADING_TEXT));
    }

    #[test]
    fn network_failure_hides_zero_status() {
        let view = render(&CycleState::Failure(ApiError {
            error: "Network Error".into(),
            message: "connection refused".into(),
            status: 0,
            timestamp: "2024-05-01 12:30:00".into(),
        }));

        assert!(view.contains("Error"));
        assert!(view.contains("Network Error"));
        assert!(view.contains("connection refused"));
        assert!(!view.contains("Status:"));
        assert!(view.contains("2024-05-01 12:30:00"));
    }

    #[test]
    fn http_failure_shows_status() {
        let view = render(&CycleState::Failure(ApiError {
            error: "Validation failed".into(),
            message: "{message=Message cannot be empty}".into(),
            status: 400,
            timestamp: "2024-05-01T12:30:00.123".into(),
        }));

        assert!(view.contains("Status: 400"));
        assert!(view.contains("2024-05-01 12:30:00"));
    }

    #[test]
    fn naive_timestamps_are_reformatted_verbatim() {
        assert_eq!(format_timestamp("2024-05-01 12:30:00"), "2024-05-01 12:30:00");
        assert_eq!(
            format_timestamp("2024-05-01T08:15:42.987654"),
            "2024-05-01 08:15:42"
        );
    }

    #[test]
    fn offset_timestamps_convert_to_local() {
        let raw = "2024-05-01T12:30:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string();
        assert_eq!(format_timestamp(raw), expected);
    }

    #[test]
    fn unparseable_timestamp_is_kept() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
