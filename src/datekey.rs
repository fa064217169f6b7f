use time::{format_description::FormatItem, macros::format_description, Date};

/// Format of the keys in the annotation data file, which is also the format
/// accepted for dates on the command line
static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) fn to_key(date: Date) -> String {
    // Formatting a Date with only date components cannot fail; fall back to
    // manual padding just in case.
    date.format(&YMD_FMT).unwrap_or_else(|_| {
        format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    })
}

pub(crate) fn from_key(key: &str) -> Result<Date, time::error::Parse> {
    Date::parse(key, &YMD_FMT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use time::macros::date;

    fn looks_like_key(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 10
            && b[4] == b'-'
            && b[7] == b'-'
            && b.iter()
                .enumerate()
                .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
    }

    #[test]
    fn test_to_key_pads() {
        assert_eq!(to_key(date!(2025 - 08 - 10)), "2025-08-10");
        assert_eq!(to_key(date!(2025 - 01 - 01)), "2025-01-01");
        assert_eq!(to_key(date!(2024 - 12 - 31)), "2024-12-31");
        let early = Date::from_calendar_date(987, time::Month::March, 4).unwrap();
        assert_eq!(to_key(early), "0987-03-04");
    }

    #[test]
    fn test_from_key() {
        assert_eq!(from_key("2024-02-29").unwrap(), date!(2024 - 02 - 29));
        assert!(from_key("2025-02-29").is_err());
        assert!(from_key("2025-2-3").is_err());
        assert!(from_key("").is_err());
    }

    #[test]
    fn test_keys_round_trip_and_are_distinct() {
        let mut seen = HashSet::new();
        let mut d = date!(2023 - 12 - 01);
        while d <= date!(2026 - 02 - 01) {
            let key = to_key(d);
            assert!(looks_like_key(&key), "bad key {key:?}");
            assert_eq!(from_key(&key).unwrap(), d);
            assert!(seen.insert(key), "duplicate key for {d}");
            d = d.next_day().unwrap();
        }
    }
}
