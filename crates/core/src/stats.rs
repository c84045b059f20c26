//! Aggregate figures derived from a `ProgressState`.
//!
//! Everything here is a pure function of the per-Juz stage map. History is
//! never consulted: it is a bounded log, not the source of truth.

use crate::model::{JUZ_COUNT, JuzId, ProgressState, Stage};

/// Completion percentage for a stage.
#[must_use]
pub fn stage_percent(stage: Stage) -> u8 {
    stage.percent()
}

/// Number of Juz whose current stage is `Complete`.
#[must_use]
pub fn completed_count(state: &ProgressState) -> usize {
    state
        .recorded_stages()
        .filter(|(_, stage)| stage.is_complete())
        .count()
}

/// Share of the catalog completed, rounded half-up to a whole percent.
#[must_use]
pub fn overall_percent(state: &ProgressState) -> u8 {
    percent_of_catalog(completed_count(state))
}

/// Number of Juz not yet complete.
#[must_use]
pub fn remaining_count(state: &ProgressState) -> usize {
    usize::from(JUZ_COUNT).saturating_sub(completed_count(state))
}

/// Stage of a Juz, defaulting to `NotStarted`.
#[must_use]
pub fn active_unit_stage(state: &ProgressState, juz: JuzId) -> Stage {
    state.stage_of(juz)
}

/// `round(completed / 30 * 100)` with halves rounded up, in integer arithmetic.
fn percent_of_catalog(completed: usize) -> u8 {
    let total = usize::from(JUZ_COUNT);
    let completed = completed.min(total);
    let rounded = (completed * 200 + total) / (total * 2);
    // Bounded by 100 because `completed <= total`.
    u8::try_from(rounded).unwrap_or(100)
}

/// Snapshot of the stats view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub overall_percent: u8,
}

impl ProgressStats {
    #[must_use]
    pub fn from_state(state: &ProgressState) -> Self {
        let completed = completed_count(state);
        let total = usize::from(JUZ_COUNT);
        Self {
            total,
            completed,
            remaining: total.saturating_sub(completed),
            overall_percent: percent_of_catalog(completed),
        }
    }
}
