use chrono::prelude::*;

use crate::error::{Error, Result};

// Formats accepted for a wall-clock pickup time, tried in order.
static FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Epoch value the dispatch api reads as "as soon as possible".
pub const IMMEDIATE: i64 = 0;

/// Converts a requested pickup time into epoch seconds, reading wall-clock
/// times in the local timezone.
pub fn pickup_epoch(input: &str) -> Result<i64> {
    pickup_epoch_in(input, &Local)
}

/// Converts a requested pickup time into epoch seconds.
///
/// An empty string or `now` is an immediate booking.  A bare integer is
/// taken to already be epoch seconds.  RFC 3339 strings carry their own
/// offset, anything else is read as wall-clock time in `tz`.
pub fn pickup_epoch_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<i64> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("now") {
        return Ok(IMMEDIATE);
    }

    if let Ok(epoch) = input.parse::<i64>() {
        if epoch < 0 {
            return Err(Error::PickupTime(input.to_string()));
        }
        return Ok(epoch);
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Ok(date.timestamp());
    }

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|date| date.timestamp())
        .ok_or_else(|| Error::PickupTime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_bookings() {
        assert_eq!(pickup_epoch("").unwrap(), IMMEDIATE);
        assert_eq!(pickup_epoch("  ").unwrap(), IMMEDIATE);
        assert_eq!(pickup_epoch("now").unwrap(), IMMEDIATE);
        assert_eq!(pickup_epoch("NOW").unwrap(), IMMEDIATE);
    }

    #[test]
    fn epoch_passes_through() {
        assert_eq!(pickup_epoch("1700000000").unwrap(), 1_700_000_000);
        assert!(pickup_epoch("-5").is_err());
    }

    #[test]
    fn rfc3339_uses_its_own_offset() {
        assert_eq!(
            pickup_epoch("2023-11-14T22:13:20+00:00").unwrap(),
            1_700_000_000
        );
        assert_eq!(
            pickup_epoch("2023-11-15T11:13:20+13:00").unwrap(),
            1_700_000_000
        );
    }

    #[test]
    fn wall_clock_times_use_the_given_zone() {
        let nzdt = FixedOffset::east_opt(13 * 3600).unwrap();
        assert_eq!(
            pickup_epoch_in("2023-11-15 11:13:20", &nzdt).unwrap(),
            1_700_000_000
        );
        assert_eq!(
            pickup_epoch_in("2023-11-14 22:13", &Utc).unwrap(),
            1_700_000_000 - 20
        );
    }

    #[test]
    fn rejects_garbage() {
        match pickup_epoch("next tuesday") {
            Err(Error::PickupTime(input)) => assert_eq!(input, "next tuesday"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
