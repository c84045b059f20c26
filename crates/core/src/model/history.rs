use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::model::{JuzId, Stage};

/// Maximum number of history entries retained.
pub const HISTORY_CAPACITY: usize = 20;

/// Record of a single stage update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    recorded_at: DateTime<Utc>,
    juz: JuzId,
    stage: Stage,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(juz: JuzId, stage: Stage, recorded_at: DateTime<Utc>) -> Self {
        Self {
            recorded_at,
            juz,
            stage,
        }
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    #[must_use]
    pub fn juz(&self) -> JuzId {
        self.juz
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Most-recent-first log of stage updates, never longer than `HISTORY_CAPACITY`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries in any order.
    ///
    /// Entries are sorted most-recent-first (ties keep their given order),
    /// then anything past the capacity is dropped from the old end.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        let mut entries: Vec<HistoryEntry> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.recorded_at().cmp(&a.recorded_at()));
        entries.truncate(HISTORY_CAPACITY);
        Self {
            entries: entries.into(),
        }
    }

    /// Prepend an entry, evicting the oldest once over capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Entries in most-recent-first order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn entry(n: u8, minutes: i64) -> HistoryEntry {
        HistoryEntry::new(
            JuzId::new(n).unwrap(),
            Stage::Started,
            fixed_now() + Duration::minutes(minutes),
        )
    }

    #[test]
    fn push_keeps_most_recent_first() {
        let mut history = History::new();
        history.push(entry(1, 0));
        history.push(entry(2, 1));

        let ids: Vec<u8> = history.iter().map(|e| e.juz().value()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(history.latest().unwrap().juz().value(), 2);
    }

    #[test]
    fn push_evicts_oldest_past_capacity() {
        let mut history = History::new();
        for i in 0..=20_i64 {
            let n = u8::try_from(i % 30 + 1).unwrap();
            history.push(entry(n, i));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        // The very first push (juz 1 at minute 0) is gone; minute 1 is now the oldest.
        let oldest = history.iter().last().unwrap();
        assert_eq!(oldest.recorded_at(), fixed_now() + Duration::minutes(1));
        assert_eq!(
            history.latest().unwrap().recorded_at(),
            fixed_now() + Duration::minutes(20)
        );
    }

    #[test]
    fn from_entries_truncates_to_capacity() {
        let entries: Vec<HistoryEntry> = (0..25_i64).map(|i| entry(3, -i)).collect();
        let history = History::from_entries(entries);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().recorded_at(), fixed_now());
    }

    #[test]
    fn from_entries_sorts_unordered_snapshots() {
        let entries: Vec<HistoryEntry> = (0..22_i64).map(|i| entry(5, i)).collect();
        let history = History::from_entries(entries);

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(
            history.latest().unwrap().recorded_at(),
            fixed_now() + Duration::minutes(21)
        );
        assert_eq!(
            history.iter().last().unwrap().recorded_at(),
            fixed_now() + Duration::minutes(2)
        );
        let times: Vec<_> = history.iter().map(HistoryEntry::recorded_at).collect();
        assert!(times.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
