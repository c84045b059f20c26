use hafiz_core::model::{HistoryEntry, ProgressState, juz};

use crate::vm::time_fmt::format_datetime;

/// One line of the history view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub juz_number: u8,
    pub juz_name: &'static str,
    pub stage_urdu: &'static str,
    pub stage_english: &'static str,
    pub recorded_at_str: String,
}

impl From<&HistoryEntry> for HistoryRowVm {
    fn from(entry: &HistoryEntry) -> Self {
        let stage = entry.stage();
        Self {
            juz_number: entry.juz().value(),
            juz_name: juz(entry.juz()).name_english(),
            stage_urdu: stage.urdu_label(),
            stage_english: stage.english_label(),
            recorded_at_str: format_datetime(entry.recorded_at()),
        }
    }
}

/// History rows, most recent first.
#[must_use]
pub fn map_history_rows(state: &ProgressState) -> Vec<HistoryRowVm> {
    state.history().iter().map(HistoryRowVm::from).collect()
}
