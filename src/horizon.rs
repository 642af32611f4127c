//! The rolling time window a task list covers

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// The format of the `date` query parameter sent to the server
pub const MAX_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The task lists an agenda offers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizon {
    Today,
    Tomorrow,
    Week,
    Month,
}

impl Horizon {
    /// Any amount of days that is not a known horizon is shown as the month list
    pub fn from_days(days_ahead: u32) -> Self {
        match days_ahead {
            0 => Horizon::Today,
            1 => Horizon::Tomorrow,
            7 => Horizon::Week,
            _ => Horizon::Month,
        }
    }

    pub fn days_ahead(&self) -> u32 {
        match self {
            Horizon::Today => 0,
            Horizon::Tomorrow => 1,
            Horizon::Week => 7,
            Horizon::Month => 30,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Horizon::Today => "Today",
            Horizon::Tomorrow => "Tomorrow",
            Horizon::Week => "Week",
            Horizon::Month => "Month",
        }
    }
}

impl Display for Horizon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl std::str::FromStr for Horizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(Horizon::Today),
            "tomorrow" => Ok(Horizon::Tomorrow),
            "week" => Ok(Horizon::Week),
            "month" => Ok(Horizon::Month),
            other => Err(format!("Unknown horizon {:?}", other)),
        }
    }
}


/// The (inclusive) upper bound of a task list: the last minute of the day that is `days_ahead` days after `now`
///
/// Bounds past the last representable date are clamped to it.
pub fn max_date(days_ahead: u32, now: DateTime<Local>) -> NaiveDateTime {
    let day = now.date_naive()
        .checked_add_signed(Duration::days(i64::from(days_ahead)))
        .unwrap_or(NaiveDate::MAX);
    day.and_time(NaiveTime::from_hms(23, 59, 0))
}

/// Render a bound the way the server expects it in a query string
pub fn format_max_date(max_date: &NaiveDateTime) -> String {
    max_date.format(MAX_DATE_FORMAT).to_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.ymd(y, m, d).and_hms(12, 0, 0)
    }

    #[test]
    fn bounds_are_pinned_to_end_of_day() {
        let now = noon(2024, 3, 10);

        assert_eq!(max_date(0, now), NaiveDate::from_ymd(2024, 3, 10).and_hms(23, 59, 0));
        assert_eq!(max_date(1, now), NaiveDate::from_ymd(2024, 3, 11).and_hms(23, 59, 0));
        assert_eq!(max_date(7, now), NaiveDate::from_ymd(2024, 3, 17).and_hms(23, 59, 0));
    }

    #[test]
    fn bounds_cross_months_and_years() {
        assert_eq!(max_date(1, noon(2024, 2, 29)), NaiveDate::from_ymd(2024, 3, 1).and_hms(23, 59, 0));
        assert_eq!(max_date(30, noon(2024, 12, 15)), NaiveDate::from_ymd(2025, 1, 14).and_hms(23, 59, 0));
    }

    #[test]
    fn far_bounds_are_clamped() {
        let now = noon(2024, 3, 10);
        let last_minute = NaiveDate::MAX.and_hms(23, 59, 0);

        assert_eq!(max_date(u32::MAX, now), last_minute);
        assert!(max_date(1_000_000, now) < last_minute);
        assert!(format_max_date(&max_date(u32::MAX, now)).ends_with("-12-31 23:59"));
    }

    #[test]
    fn wire_format() {
        let bound = max_date(0, noon(2024, 3, 9));
        assert_eq!(format_max_date(&bound), "2024-03-09 23:59");
    }

    #[test]
    fn horizons() {
        assert_eq!(Horizon::from_days(0), Horizon::Today);
        assert_eq!(Horizon::from_days(1), Horizon::Tomorrow);
        assert_eq!(Horizon::from_days(7), Horizon::Week);
        assert_eq!(Horizon::from_days(3), Horizon::Month);
        assert_eq!(Horizon::from_days(30), Horizon::Month);

        for h in &[Horizon::Today, Horizon::Tomorrow, Horizon::Week, Horizon::Month] {
            assert_eq!(Horizon::from_days(h.days_ahead()), *h);
            assert_eq!(h.title().parse::<Horizon>(), Ok(*h));
        }
        assert!("yesterday".parse::<Horizon>().is_err());
    }
}
