//! APOD date resolution.

use apod_core::Error;
use chrono::NaiveDate;

/// Parse the requested APOD date, defaulting to `today`.
///
/// The date must be `YYYY-MM-DD`, no earlier than the first APOD
/// (1995-06-16) and not after `today`.
pub fn resolve_apod_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate, Error> {
    let Some(raw) = arg else {
        return Ok(today);
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput(format!("invalid date format '{raw}'; must be YYYY-MM-DD")))?;

    if date < first_apod_date() {
        return Err(Error::InvalidInput(format!(
            "date {date} too far in the past; first APOD is {}",
            first_apod_date()
        )));
    }
    if date > today {
        return Err(Error::InvalidInput(format!("date {date} cannot be in the future")));
    }

    Ok(date)
}

fn first_apod_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 6, 16).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_to_today() {
        let today = ymd(2026, 10, 14);
        assert_eq!(resolve_apod_date(None, today).unwrap(), today);
    }

    #[test]
    fn test_valid_date() {
        let today = ymd(2026, 10, 14);
        assert_eq!(resolve_apod_date(Some("2024-01-15"), today).unwrap(), ymd(2024, 1, 15));
    }

    #[test]
    fn test_bounds_inclusive() {
        let today = ymd(2026, 10, 14);
        assert_eq!(resolve_apod_date(Some("1995-06-16"), today).unwrap(), ymd(1995, 6, 16));
        assert_eq!(resolve_apod_date(Some("2026-10-14"), today).unwrap(), today);
    }

    #[test]
    fn test_before_first_apod() {
        let result = resolve_apod_date(Some("1995-06-15"), ymd(2026, 10, 14));
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg.contains("too far in the past")));
    }

    #[test]
    fn test_future_date() {
        let result = resolve_apod_date(Some("2026-10-15"), ymd(2026, 10, 14));
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg.contains("future")));
    }

    #[test]
    fn test_malformed_dates() {
        let today = ymd(2026, 10, 14);
        for raw in ["2024-13-01", "2024/01/15", "15-01-2024", "yesterday", ""] {
            let result = resolve_apod_date(Some(raw), today);
            assert!(matches!(result, Err(Error::InvalidInput(_))), "{raw} should be rejected");
        }
    }
}
