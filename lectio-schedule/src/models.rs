use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lesson booking submitted through the admin API.
///
/// `start_date` is an RFC 3339 timestamp and carries the time-of-day that
/// every generated lesson reuses. `book_until_cancellation` books the same
/// weekday weekly through the end of the month; a non-empty `specific_days`
/// list books exactly those calendar days; with neither, a single lesson is
/// booked at `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub student_id: Uuid,
    pub plan_id: Uuid,
    pub start_date: String,
    #[serde(default)]
    pub book_until_cancellation: bool,
    #[serde(default)]
    pub specific_days: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_fields_default_off() {
        let raw = format!(
            r#"{{"student_id":"{}","plan_id":"{}","start_date":"2025-03-03T08:00:00Z"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );

        let request: BookingRequest = serde_json::from_str(&raw).unwrap();
        assert!(!request.book_until_cancellation);
        assert!(request.specific_days.is_empty());
    }
}
