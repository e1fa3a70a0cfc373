//! Store calendar
//!
//! Orders are stamped with absolute instants; reports and listings select them
//! by calendar day in the shop's zone.

use jiff::{
    Timestamp,
    civil::{Date, Time},
    tz::TimeZone,
};

/// The half-open instant range `[start, end)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DayWindow {
    /// The window for `date` in `time_zone`.
    ///
    /// Days are measured from local midnight to the next local midnight, so a
    /// window can be 23 or 25 hours long across a DST transition.
    ///
    /// # Errors
    ///
    /// Returns an error if `date` is at the edge of the supported range.
    pub fn for_date(date: Date, time_zone: &TimeZone) -> Result<Self, jiff::Error> {
        let start = midnight(date, time_zone)?;
        let end = midnight(date.tomorrow()?, time_zone)?;

        Ok(Self { start, end })
    }

    /// Whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn midnight(date: Date, time_zone: &TimeZone) -> Result<Timestamp, jiff::Error> {
    Ok(date
        .to_datetime(Time::midnight())
        .to_zoned(time_zone.clone())?
        .timestamp())
}

/// Today's date in `time_zone`.
#[must_use]
pub fn today(time_zone: &TimeZone) -> Date {
    Timestamp::now().to_zoned(time_zone.clone()).date()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn utc_window_is_one_day() -> TestResult {
        let window = DayWindow::for_date(date(2025, 3, 14), &TimeZone::UTC)?;

        assert_eq!(window.start, "2025-03-14T00:00:00Z".parse::<Timestamp>()?);
        assert_eq!(window.end, "2025-03-15T00:00:00Z".parse::<Timestamp>()?);

        Ok(())
    }

    #[test]
    fn window_is_half_open() -> TestResult {
        let window = DayWindow::for_date(date(2025, 3, 14), &TimeZone::UTC)?;

        assert!(window.contains(window.start));
        assert!(!window.contains(window.end));

        Ok(())
    }

    #[test]
    fn window_follows_store_zone() -> TestResult {
        let chicago = TimeZone::get("America/Chicago")?;
        let window = DayWindow::for_date(date(2025, 1, 10), &chicago)?;

        assert_eq!(window.start, "2025-01-10T06:00:00Z".parse::<Timestamp>()?);

        // 23:30 local on the 10th is already the 11th in UTC.
        let late_evening = "2025-01-11T05:30:00Z".parse::<Timestamp>()?;

        assert!(window.contains(late_evening));

        Ok(())
    }

    #[test]
    fn spring_forward_day_is_short() -> TestResult {
        let chicago = TimeZone::get("America/Chicago")?;
        let window = DayWindow::for_date(date(2025, 3, 9), &chicago)?;
        let hours = window.end.duration_since(window.start).as_secs() / 3_600;

        assert_eq!(hours, 23);

        Ok(())
    }
}
