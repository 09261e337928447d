use chrono::{DateTime, SecondsFormat, Utc};

pub mod entities;
pub mod inner_error;
pub mod repository;
pub mod verification;

/// Canonical textual form of every timestamp the service stores or returns.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn current_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parses any RFC 3339 timestamp into its canonical form.
pub fn normalize_timestamp(value: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|time| format_timestamp(time.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamps_use_millisecond_utc_form() {
        let time = Utc.with_ymd_and_hms(2024, 8, 7, 17, 30, 0).unwrap();
        assert_eq!(format_timestamp(time), "2024-08-07T17:30:00.000Z");
    }

    #[test]
    fn normalize_converts_offsets_to_utc() {
        assert_eq!(
            normalize_timestamp("2024-08-07T19:30:00.5+02:00").as_deref(),
            Some("2024-08-07T17:30:00.500Z")
        );
        assert_eq!(normalize_timestamp("yesterday"), None);
    }
}
