//! Time windows used for period bucketing.
//!
//! All windows are half-open `[start, end)` in UTC. Calendar boundaries (midnight,
//! first of month) are taken in a fixed reference offset and then converted to UTC.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::error::{PortalError, Result};

/// Half-open UTC time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    /// Exclusive upper bound
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// UTC instant of local midnight at the start of `date`.
///
/// Fails when the instant falls outside the representable range.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<Utc>> {
    date.and_time(NaiveTime::MIN)
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .map(|utc| utc.and_utc())
        .ok_or_else(|| {
            PortalError::validation(format!("{} at {} is out of range", date, offset))
        })
}

/// Range covering every moment of the calendar days `start_date..=end_date`.
///
/// The upper bound is midnight after `end_date`, so a sale at `end_date 23:59:59.999` is
/// inside and one at the next midnight is not.
pub fn statement_range(
    start_date: NaiveDate,
    end_date: NaiveDate,
    offset: FixedOffset,
) -> Result<TimeRange> {
    if end_date < start_date {
        return Err(PortalError::validation(format!(
            "end_date ({}) must not be before start_date ({})",
            end_date, start_date
        )));
    }
    let after_end = end_date
        .succ_opt()
        .ok_or_else(|| PortalError::validation(format!("end_date {} is out of range", end_date)))?;

    Ok(TimeRange {
        start: local_midnight(start_date, offset)?,
        end: local_midnight(after_end, offset)?,
    })
}

/// Lower bounds of the "today" and "month to date" windows for a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesWindows {
    pub today_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl SalesWindows {
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Result<Self> {
        let local_today = now.with_timezone(&offset).date_naive();
        let first_of_month = local_today - Days::new(u64::from(local_today.day0()));

        Ok(Self {
            today_start: local_midnight(local_today, offset)?,
            month_start: local_midnight(first_of_month, offset)?,
            now,
        })
    }

    pub fn is_today(&self, at: DateTime<Utc>) -> bool {
        at >= self.today_start && at <= self.now
    }

    pub fn is_month_to_date(&self, at: DateTime<Utc>) -> bool {
        at >= self.month_start && at <= self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_statement_range_includes_whole_end_day() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let range = statement_range(date(2024, 3, 1), date(2024, 3, 31), utc).unwrap();

        let last_moment = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()
            + TimeDelta::milliseconds(999);
        let next_midnight = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        assert!(range.contains(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
        assert!(range.contains(last_moment));
        assert!(!range.contains(next_midnight));
    }

    #[test]
    fn test_statement_range_single_day() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let range = statement_range(date(2024, 2, 29), date(2024, 2, 29), utc).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_statement_range_rejects_inverted_dates() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let result = statement_range(date(2024, 3, 2), date(2024, 3, 1), utc);
        assert!(matches!(result, Err(PortalError::Validation(_))));
    }

    #[test]
    fn test_statement_range_respects_offset() {
        // UTC+2: local midnight is 22:00 UTC on the previous day
        let sast = FixedOffset::east_opt(2 * 3600).unwrap();
        let range = statement_range(date(2024, 3, 1), date(2024, 3, 1), sast).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 2, 29, 22, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_sales_windows() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap();
        let windows = SalesWindows::at(now, utc).unwrap();

        assert_eq!(windows.today_start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(windows.month_start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert!(windows.is_today(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()));
        assert!(!windows.is_today(Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap()));
        assert!(windows.is_month_to_date(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
        assert!(!windows.is_month_to_date(Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap()));
    }

    #[test]
    fn test_sales_windows_local_day_differs_from_utc_day() {
        // 23:30 UTC on the 31st is already the 1st of April in UTC+2
        let sast = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 23, 30, 0).unwrap();
        let windows = SalesWindows::at(now, sast).unwrap();

        assert_eq!(windows.today_start, Utc.with_ymd_and_hms(2024, 3, 31, 22, 0, 0).unwrap());
        assert_eq!(windows.month_start, Utc.with_ymd_and_hms(2024, 3, 31, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_statement_range_out_of_calendar_is_rejected() {
        let sast = FixedOffset::east_opt(2 * 3600).unwrap();
        let result = statement_range(NaiveDate::MIN, NaiveDate::MIN, sast);
        assert!(matches!(result, Err(PortalError::Validation(_))));

        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        let result = statement_range(NaiveDate::MAX, NaiveDate::MAX, west);
        assert!(matches!(result, Err(PortalError::Validation(_))));
    }
}
