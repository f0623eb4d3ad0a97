use chrono::{Datelike, NaiveDate};

pub(crate) const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Parses a `YYYYMMDD` date. Anything other than exactly eight ASCII digits
/// forming a valid calendar date is rejected.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, COMPACT_DATE_FORMAT).ok()
}

pub fn format_compact_date(date: NaiveDate) -> String {
    date.format(COMPACT_DATE_FORMAT).to_string()
}

/// Rounds to `decimals` places, ties to even: `0.125` becomes `0.12`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Angle of a date on the polar plot: `day_of_year * 360 / 365` degrees, in radians.
pub fn day_of_year_angle(date: NaiveDate) -> f64 {
    (f64::from(date.ordinal()) * 360.0 / 365.0).to_radians()
}

pub(crate) fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(chrono::Duration::days(days.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_date_round_trips() {
        for input in ["20000101", "20000229", "20091231", "19991130"] {
            let parsed = parse_compact_date(input).expect("valid date");
            assert_eq!(format_compact_date(parsed), input);
        }
    }

    #[test]
    fn compact_date_rejects_malformed_input() {
        for input in ["2000011", "200001011", "2000-01-01", "20001301", "20010229", "", "2000O101"] {
            assert_eq!(parse_compact_date(input), None, "{input} should not parse");
        }
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(17.004, 2), 17.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.126, 2), -0.13);
    }

    #[test]
    fn round_to_breaks_ties_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-2.5, 0), -2.0);
    }

    #[test]
    fn day_of_year_angle_matches_degree_mapping() {
        let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!((day_of_year_angle(first) - (360.0f64 / 365.0).to_radians()).abs() < 1e-12);

        let mid = NaiveDate::from_ymd_opt(2009, 7, 2).unwrap(); // ordinal 183
        assert!((day_of_year_angle(mid) - (183.0f64 * 360.0 / 365.0).to_radians()).abs() < 1e-12);
    }

    #[test]
    fn epoch_days_convert_to_dates() {
        assert_eq!(date_from_epoch_days(0), NaiveDate::from_ymd_opt(1970, 1, 1));
        assert_eq!(date_from_epoch_days(10957), NaiveDate::from_ymd_opt(2000, 1, 1));
    }
}
