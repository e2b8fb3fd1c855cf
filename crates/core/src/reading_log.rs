//! Append-only log of readings.
//!
//! The log is owned by whoever holds it (a store, a request, a test) and
//! passed by reference; there is no ambient session state. Entries are only
//! ever appended. The single destructive operation is [`ReadingLog::clear`].

use crate::reading::Reading;

#[derive(Debug, Clone, Default)]
pub struct ReadingLog {
    entries: Vec<Reading>,
}

impl ReadingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading to the end of the log.
    pub fn append(&mut self, reading: Reading) {
        self.entries.push(reading);
    }

    /// All readings, oldest first.
    pub fn as_slice(&self) -> &[Reading] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.entries.iter()
    }

    /// All readings, newest first (history order).
    pub fn newest_first(&self) -> impl Iterator<Item = &Reading> {
        self.entries.iter().rev()
    }

    /// The last `n` readings, oldest first.
    pub fn recent(&self, n: usize) -> &[Reading] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every reading, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}

impl<'a> IntoIterator for &'a ReadingLog {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Reading> for ReadingLog {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::context::MeasurementContext;

    fn reading(value: i32, minute: u32) -> Reading {
        let at = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(8, minute, 0)
            .unwrap();
        Reading::record(value, MeasurementContext::Random, at, None)
    }

    #[test]
    fn preserves_append_order() {
        let mut log = ReadingLog::new();
        log.append(reading(100, 0));
        log.append(reading(110, 1));
        log.append(reading(120, 2));

        let values: Vec<i32> = log.iter().map(Reading::value).collect();
        assert_eq!(values, vec![100, 110, 120]);

        let newest: Vec<i32> = log.newest_first().map(Reading::value).collect();
        assert_eq!(newest, vec![120, 110, 100]);
    }

    #[test]
    fn recent_returns_tail() {
        let log: ReadingLog = (0..7).map(|i| reading(100 + i, i as u32)).collect();
        let values: Vec<i32> = log.recent(5).iter().map(Reading::value).collect();
        assert_eq!(values, vec![102, 103, 104, 105, 106]);
        assert_eq!(log.recent(50).len(), 7);
        assert!(ReadingLog::new().recent(5).is_empty());
    }

    #[test]
    fn clear_reports_removed_count() {
        let mut log: ReadingLog = (0..3).map(|i| reading(90, i)).collect();
        assert_eq!(log.len(), 3);
        assert_eq!(log.clear(), 3);
        assert!(log.is_empty());
        assert_eq!(log.clear(), 0);
    }
}
