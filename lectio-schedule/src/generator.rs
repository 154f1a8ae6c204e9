use crate::models::BookingRequest;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

/// Expands a booking request into concrete lesson start times.
///
/// All calendar reasoning (weekday, month boundary, day-of-month) happens in
/// one explicit fixed offset passed at construction, never in the host
/// timezone, so the same request generates the same dates on every
/// deployment.
pub struct LessonDateGenerator {
    offset: FixedOffset,
}

impl LessonDateGenerator {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Generate the full set of lesson start times for a request.
    ///
    /// Modes, in precedence order:
    /// 1. until-cancellation: weekly on `start_date`'s weekday through the
    ///    end of `start_date`'s month, ascending;
    /// 2. specific days: one date per entry, in input order, each combining
    ///    the entry's calendar day with `start_date`'s time-of-day;
    /// 3. otherwise a single date equal to `start_date`.
    ///
    /// Every produced date keeps `start_date`'s time-of-day. Fails with
    /// [`InvalidDateError`] when any input does not parse, producing no
    /// dates at all.
    pub fn generate(&self, request: &BookingRequest) -> Result<Vec<DateTime<Utc>>, InvalidDateError> {
        let start = self.parse_start(&request.start_date)?;

        if request.book_until_cancellation {
            return Ok(self.weekly_until_month_end(start));
        }

        if !request.specific_days.is_empty() {
            return self.days_at_start_time(start, &request.specific_days);
        }

        Ok(vec![start])
    }

    /// One date per week on the start's weekday, from the start (inclusive)
    /// while still inside the start's calendar month. A start on the last
    /// such weekday yields exactly one date.
    fn weekly_until_month_end(&self, start: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let local_start = start.with_timezone(&self.offset);
        let month = (local_start.year(), local_start.month());

        let mut dates = Vec::new();
        let mut current = local_start;
        while (current.year(), current.month()) == month {
            dates.push(current.with_timezone(&Utc));
            // A 7-day stride lands on the same weekday at the same
            // wall-clock time; fixed offsets have no DST jumps.
            current = current + Duration::days(7);
        }
        dates
    }

    /// One date per entry, in input order. Duplicate entries stay
    /// duplicated: the caller gets one lesson per entry, not per distinct
    /// day.
    fn days_at_start_time(
        &self,
        start: DateTime<Utc>,
        entries: &[String],
    ) -> Result<Vec<DateTime<Utc>>, InvalidDateError> {
        // Parse every entry up front so one bad entry yields no dates.
        let mut days = Vec::with_capacity(entries.len());
        for raw in entries {
            days.push(self.parse_day(raw)?);
        }

        let time = start.with_timezone(&self.offset).time();
        let mut dates = Vec::with_capacity(days.len());
        for day in days {
            let local = self
                .offset
                .from_local_datetime(&day.and_time(time))
                .single()
                .ok_or_else(|| InvalidDateError::new(day.to_string()))?;
            dates.push(local.with_timezone(&Utc));
        }
        Ok(dates)
    }

    fn parse_start(&self, raw: &str) -> Result<DateTime<Utc>, InvalidDateError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|_| InvalidDateError::new(raw))
    }

    /// Entries are calendar days; a full timestamp is accepted but only its
    /// calendar day (in the generator's offset) is used.
    fn parse_day(&self, raw: &str) -> Result<NaiveDate, InvalidDateError> {
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(day);
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|at| at.with_timezone(&self.offset).date_naive())
            .map_err(|_| InvalidDateError::new(raw))
    }
}

/// The single failure mode of date generation: an input that does not parse
/// as a calendar date or timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date input: {input}")]
pub struct InvalidDateError {
    pub input: String,
}

impl InvalidDateError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn utc(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn generator_utc() -> LessonDateGenerator {
        LessonDateGenerator::new(FixedOffset::east_opt(0).unwrap())
    }

    fn request(start_date: &str) -> BookingRequest {
        BookingRequest {
            student_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            start_date: start_date.to_string(),
            book_until_cancellation: false,
            specific_days: vec![],
        }
    }

    #[test]
    fn test_single_booking_passes_start_through() {
        let dates = generator_utc().generate(&request("2025-03-03T08:00:00Z")).unwrap();
        assert_eq!(dates, vec![utc("2025-03-03T08:00:00Z")]);
    }

    #[test]
    fn test_until_cancellation_books_every_monday_of_march() {
        let mut req = request("2025-03-03T08:00:00Z");
        req.book_until_cancellation = true;

        let dates = generator_utc().generate(&req).unwrap();
        assert_eq!(
            dates,
            vec![
                utc("2025-03-03T08:00:00Z"),
                utc("2025-03-10T08:00:00Z"),
                utc("2025-03-17T08:00:00Z"),
                utc("2025-03-24T08:00:00Z"),
                utc("2025-03-31T08:00:00Z"),
            ]
        );
    }

    #[test]
    fn test_until_cancellation_on_last_weekday_books_one_lesson() {
        let mut req = request("2025-03-31T08:00:00Z");
        req.book_until_cancellation = true;

        let dates = generator_utc().generate(&req).unwrap();
        assert_eq!(dates, vec![utc("2025-03-31T08:00:00Z")]);
    }

    #[test]
    fn test_until_cancellation_wins_over_specific_days() {
        let mut req = request("2025-03-24T08:00:00Z");
        req.book_until_cancellation = true;
        req.specific_days = vec!["2025-03-15".to_string()];

        let dates = generator_utc().generate(&req).unwrap();
        assert_eq!(
            dates,
            vec![utc("2025-03-24T08:00:00Z"), utc("2025-03-31T08:00:00Z")]
        );
    }

    #[test]
    fn test_specific_days_reuse_start_time_of_day() {
        let mut req = request("2025-04-01T09:30:00Z");
        req.specific_days = vec!["2025-04-05".to_string(), "2025-04-12".to_string()];

        let dates = generator_utc().generate(&req).unwrap();
        assert_eq!(
            dates,
            vec![utc("2025-04-05T09:30:00Z"), utc("2025-04-12T09:30:00Z")]
        );
    }

    #[test]
    fn test_specific_days_keep_duplicates() {
        let mut req = request("2025-04-01T09:30:00Z");
        req.specific_days = vec![
            "2025-04-05".to_string(),
            "2025-04-05".to_string(),
            "2025-04-12".to_string(),
        ];

        let dates = generator_utc().generate(&req).unwrap();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], dates[1]);
        assert_eq!(dates[0], utc("2025-04-05T09:30:00Z"));
    }

    #[test]
    fn test_specific_day_accepts_full_timestamp() {
        let mut req = request("2025-04-01T09:30:00Z");
        req.specific_days = vec!["2025-04-05T23:59:00Z".to_string()];

        let dates = generator_utc().generate(&req).unwrap();
        // Only the calendar day of the entry is kept.
        assert_eq!(dates, vec![utc("2025-04-05T09:30:00Z")]);
    }

    #[test]
    fn test_unparseable_start_is_rejected() {
        let err = generator_utc().generate(&request("next tuesday")).unwrap_err();
        assert_eq!(err, InvalidDateError::new("next tuesday"));
    }

    #[test]
    fn test_one_bad_entry_yields_no_dates() {
        let mut req = request("2025-04-01T09:30:00Z");
        req.specific_days = vec!["2025-04-05".to_string(), "04/12/2025".to_string()];

        let err = generator_utc().generate(&req).unwrap_err();
        assert_eq!(err, InvalidDateError::new("04/12/2025"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut req = request("2025-03-03T08:00:00Z");
        req.book_until_cancellation = true;

        let generator = generator_utc();
        assert_eq!(generator.generate(&req).unwrap(), generator.generate(&req).unwrap());
    }

    #[test]
    fn test_offset_decides_which_month_the_start_is_in() {
        // 22:30 UTC on March 31 is already April 1 (a Tuesday) at +03:00.
        let mut req = request("2025-03-31T22:30:00Z");
        req.book_until_cancellation = true;

        let moscow = LessonDateGenerator::new(FixedOffset::east_opt(3 * 3600).unwrap());
        let dates = moscow.generate(&req).unwrap();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], utc("2025-03-31T22:30:00Z"));
        assert_eq!(dates[4], utc("2025-04-28T22:30:00Z"));

        // At UTC the same instant is the last Monday of March.
        let dates = generator_utc().generate(&req).unwrap();
        assert_eq!(dates, vec![utc("2025-03-31T22:30:00Z")]);
    }
}
