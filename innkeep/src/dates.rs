//! Stay intervals and calendar ranges.
//!
//! A stay is half-open: the guest occupies the room on every night from
//! check-in up to, but not including, check-out. Back-to-back bookings that
//! share a turnover day therefore never collide.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A validated `[check_in, check_out)` interval.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayDates;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
/// let first = StayDates::new(d(1), d(5)).unwrap();
/// let second = StayDates::new(d(5), d(8)).unwrap();
///
/// assert_eq!(first.nights(), 4);
/// assert!(!first.overlaps(&second));
/// assert!(first.contains(d(4)));
/// assert!(!first.contains(d(5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// Creates a stay interval.
    ///
    /// # Errors
    ///
    /// Returns an error unless `check_out` is strictly after `check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidStayError> {
        if check_out <= check_in {
            return Err(InvalidStayError {
                field: "check_out".into(),
                message: format!("check-out {check_out} must be after check-in {check_in}"),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// First night of the stay.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Departure day (not occupied).
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights.
    #[must_use]
    pub fn nights(&self) -> u32 {
        u32::try_from(nights_between(self.check_in, self.check_out)).unwrap_or(u32::MAX)
    }

    /// Returns `true` if the guest occupies the room on `date`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Returns `true` if both stays share at least one night.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

impl fmt::Display for StayDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

/// Signed day difference `check_out - check_in`.
#[must_use]
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Error returned for an unusable stay or date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStayError {
    /// The offending field.
    pub field: String,
    /// Why it was rejected.
    pub message: String,
}

impl fmt::Display for InvalidStayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for InvalidStayError {}

/// An inclusive run of calendar days, the columns of a tape chart.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let range = DateRange::starting(start, 3).unwrap();
/// assert_eq!(range.len(), 3);
/// assert_eq!(range.into_iter().last(), NaiveDate::from_ymd_opt(2024, 6, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidStayError> {
        if end < start {
            return Err(InvalidStayError {
                field: "end".into(),
                message: format!("range end {end} is before start {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a range of `days` consecutive days from `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is zero or the range would run past the
    /// last representable date.
    pub fn starting(start: NaiveDate, days: u32) -> Result<Self, InvalidStayError> {
        if days == 0 {
            return Err(InvalidStayError {
                field: "days".into(),
                message: "a chart needs at least one day".into(),
            });
        }
        let end = start
            .checked_add_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| InvalidStayError {
                field: "days".into(),
                message: format!("{days} days from {start} is out of range"),
            })?;
        Self::new(start, end)
    }

    /// First day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(nights_between(self.start, self.end) + 1).unwrap_or(0)
    }

    /// Always `false`; a range holds at least one day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if the stay touches any day in this range.
    #[must_use]
    pub fn intersects(&self, stay: &StayDates) -> bool {
        stay.check_in() <= self.end && self.start < stay.check_out()
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = std::iter::Take<chrono::naive::NaiveDateDaysIterator>;

    fn into_iter(self) -> Self::IntoIter {
        self.start.iter_days().take(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn test_stay_requires_checkout_after_checkin() {
        assert!(StayDates::new(d(6, 5), d(6, 5)).is_err());
        assert!(StayDates::new(d(6, 5), d(6, 4)).is_err());
        let err = StayDates::new(d(6, 5), d(6, 1)).unwrap_err();
        assert_eq!(err.field, "check_out");
    }

    #[test]
    fn test_nights() {
        let stay = StayDates::new(d(5, 10), d(5, 15)).unwrap();
        assert_eq!(stay.nights(), 5);
        assert_eq!(nights_between(d(5, 15), d(5, 10)), -5);
    }

    #[test]
    fn test_overlap_half_open() {
        let a = StayDates::new(d(6, 1), d(6, 5)).unwrap();
        let adjacent = StayDates::new(d(6, 5), d(6, 8)).unwrap();
        let straddle = StayDates::new(d(6, 4), d(6, 6)).unwrap();
        let inside = StayDates::new(d(6, 2), d(6, 3)).unwrap();

        assert!(!a.overlaps(&adjacent));
        assert!(!adjacent.overlaps(&a));
        assert!(a.overlaps(&straddle));
        assert!(straddle.overlaps(&adjacent));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_range_iteration() {
        let range = DateRange::new(d(2, 28), d(3, 2)).unwrap();
        let days: Vec<_> = range.into_iter().collect();
        assert_eq!(days, vec![d(2, 28), d(2, 29), d(3, 1), d(3, 2)]);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_range_rejects_inverted_and_empty() {
        assert!(DateRange::new(d(3, 2), d(3, 1)).is_err());
        assert!(DateRange::starting(d(3, 1), 0).is_err());
        assert_eq!(DateRange::starting(d(3, 1), 1).unwrap().len(), 1);
    }

    #[test]
    fn test_range_rejects_unrepresentable_end() {
        let err = DateRange::starting(d(6, 1), u32::MAX).unwrap_err();
        assert_eq!(err.field, "days");
        assert!(DateRange::starting(NaiveDate::MAX, 2).is_err());
        assert_eq!(DateRange::starting(NaiveDate::MAX, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_range_intersects_stay() {
        let range = DateRange::new(d(6, 10), d(6, 12)).unwrap();
        let ends_on_start = StayDates::new(d(6, 8), d(6, 10)).unwrap();
        let starts_on_end = StayDates::new(d(6, 12), d(6, 14)).unwrap();
        assert!(!range.intersects(&ends_on_start));
        assert!(range.intersects(&starts_on_end));
    }
}
