//! Fixed trip date range and date formatting.
//!
//! Dates are plain calendar days (`NaiveDate`); no time zone is involved.

use crate::domain::DomainError;
use chrono::NaiveDate;

/// Key format used for storage and exports.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Default trip range: March 6 ..= March 22, 2026.
pub const DEFAULT_RANGE_START: &str = "2026-03-06";
pub const DEFAULT_RANGE_END: &str = "2026-03-22";

/// Inclusive, contiguous range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::Config(format!(
                "date range end {} is before start {}",
                date_key(end),
                date_key(start)
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from `YYYY-MM-DD` keys.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        let start = parse_date_key(start).map_err(|e| DomainError::Config(e.to_string()))?;
        let end = parse_date_key(end).map_err(|e| DomainError::Config(e.to_string()))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// All days in order, both ends included.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .collect()
    }

    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Always false: `new` rejects `end < start`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// e.g. "March 6 – March 22, 2026"
    pub fn describe(&self) -> String {
        format!(
            "{} – {}",
            self.start.format("%B %-d"),
            self.end.format("%B %-d, %Y")
        )
    }
}

impl Default for DateRange {
    fn default() -> Self {
        // 2026-03-06 ..= 2026-03-22
        Self {
            start: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2026, 3, 22).unwrap_or(NaiveDate::MIN),
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|e| DomainError::Validation(format!("invalid date '{}': {}", key, e)))
}

/// Long form, e.g. "Friday, March 6".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Column header form, e.g. "Fri 3/6".
pub fn short_label(date: NaiveDate) -> String {
    date.format("%a %-m/%-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_has_seventeen_days() {
        let range = DateRange::default();
        let days = range.days();
        assert_eq!(days.len(), 17);
        assert_eq!(range.len(), 17);
        assert_eq!(date_key(days[0]), "2026-03-06");
        assert_eq!(date_key(days[16]), "2026-03-22");
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::parse("2026-03-06", "2026-03-06").unwrap();
        assert_eq!(range.days().len(), 1);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = DateRange::parse("2026-03-22", "2026-03-06").unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn range_crosses_month_boundary() {
        let range = DateRange::parse("2026-02-27", "2026-03-02").unwrap();
        let keys: Vec<String> = range.days().into_iter().map(date_key).collect();
        assert_eq!(
            keys,
            vec!["2026-02-27", "2026-02-28", "2026-03-01", "2026-03-02"]
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::default();
        assert!(range.contains(range.start()));
        assert!(range.contains(range.end()));
        assert!(!range.contains(parse_date_key("2026-03-23").unwrap()));
    }

    #[test]
    fn formatting() {
        let d = parse_date_key("2026-03-06").unwrap();
        assert_eq!(display_date(d), "Friday, March 6");
        assert_eq!(short_label(d), "Fri 3/6");
        assert!(parse_date_key("March 6").is_err());
    }
}
