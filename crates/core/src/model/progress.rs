use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::model::history::{History, HistoryEntry};
use crate::model::{JuzId, Stage};

/// Reading progress across the whole catalog.
///
/// The only mutation path is [`ProgressState::record_progress`]; the per-Juz
/// map is read through [`ProgressState::stage_of`], which treats a missing
/// entry as `Stage::NotStarted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    last_active: JuzId,
    last_active_stage: Stage,
    stages: BTreeMap<JuzId, Stage>,
    history: History,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::zero()
    }
}

impl ProgressState {
    /// Fresh state: Juz 1, not started, nothing recorded.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            last_active: JuzId::FIRST,
            last_active_stage: Stage::NotStarted,
            stages: BTreeMap::new(),
            history: History::new(),
        }
    }

    /// Rehydrate a state from persisted storage.
    #[must_use]
    pub fn from_persisted(
        last_active: JuzId,
        last_active_stage: Stage,
        stages: impl IntoIterator<Item = (JuzId, Stage)>,
        history: History,
    ) -> Self {
        Self {
            last_active,
            last_active_stage,
            stages: stages.into_iter().collect(),
            history,
        }
    }

    /// Record a stage for a Juz.
    ///
    /// Stage 0 is stored explicitly and still logged, so clearing a Juz is
    /// distinguishable from never having touched it.
    pub fn record_progress(&mut self, juz: JuzId, stage: Stage, at: DateTime<Utc>) -> HistoryEntry {
        let entry = HistoryEntry::new(juz, stage, at);

        self.stages.insert(juz, stage);
        self.history.push(entry);
        self.last_active = juz;
        self.last_active_stage = stage;

        entry
    }

    #[must_use]
    pub fn last_active(&self) -> JuzId {
        self.last_active
    }

    #[must_use]
    pub fn last_active_stage(&self) -> Stage {
        self.last_active_stage
    }

    /// Current stage of a Juz, `NotStarted` when never recorded.
    #[must_use]
    pub fn stage_of(&self, juz: JuzId) -> Stage {
        self.stages.get(&juz).copied().unwrap_or_default()
    }

    /// Whether a stage has ever been recorded for this Juz (including an explicit 0).
    #[must_use]
    pub fn is_recorded(&self, juz: JuzId) -> bool {
        self.stages.contains_key(&juz)
    }

    /// Explicitly recorded stages in Juz order.
    pub fn recorded_stages(&self) -> impl Iterator<Item = (JuzId, Stage)> + '_ {
        self.stages.iter().map(|(juz, stage)| (*juz, *stage))
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
