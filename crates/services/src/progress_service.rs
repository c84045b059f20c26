use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hafiz_core::{
    model::{HistoryEntry, JuzId, ProgressState, Stage},
    stats::ProgressStats,
    time::Clock,
};
use storage::repository::{BlobStore, ProgressRepository, StorageError};
use tokio::sync::Mutex as AsyncMutex;

use crate::error::ProgressServiceError;

//
// ─── RECORD RESULT ─────────────────────────────────────────────────────────────
//

/// Outcome of `ProgressService::record_progress`.
///
/// `state` is the committed in-memory state. `persisted` is `false` when the
/// follow-up save failed; the in-memory update stands either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedProgress {
    pub state: ProgressState,
    pub entry: HistoryEntry,
    pub persisted: bool,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Single owner of the reading progress.
///
/// All mutations go through `record_progress` (or `clear_progress`) and
/// `reset`. Each one commits to memory first, then saves the whole state.
///
/// Saves and purges run one at a time under `save_gate`, and each save
/// writes the state as it is when the gate is acquired, so the last write
/// always matches memory.
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
    blobs: Arc<dyn BlobStore>,
    state: Mutex<ProgressState>,
    save_gate: AsyncMutex<()>,
}

impl ProgressService {
    /// Load the persisted snapshot, falling back to the zero-state.
    ///
    /// Missing, unreadable and corrupt snapshots all start from zero.
    pub async fn load(
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let state = match progress.load_progress().await {
            Ok(Some(state)) => state,
            Ok(None) => ProgressState::zero(),
            Err(err) => {
                log::warn!("discarding unreadable progress snapshot: {err}");
                ProgressState::zero()
            }
        };
        log::debug!(
            "progress loaded: last active juz {} ({} history entries)",
            state.last_active(),
            state.history().len()
        );

        Self::with_state(clock, progress, blobs, state)
    }

    /// Build a service around an already-loaded state without touching storage.
    #[must_use]
    pub fn with_state(
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
        blobs: Arc<dyn BlobStore>,
        state: ProgressState,
    ) -> Self {
        Self {
            clock,
            progress,
            blobs,
            state: Mutex::new(state),
            save_gate: AsyncMutex::new(()),
        }
    }

    // The state is only ever replaced wholesale, so a poisoned lock still holds a valid value.
    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressState {
        self.lock().clone()
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        ProgressStats::from_state(&self.lock())
    }

    #[must_use]
    pub fn stage_of(&self, juz: JuzId) -> Stage {
        self.lock().stage_of(juz)
    }

    /// Last touched Juz and the stage recorded for it.
    #[must_use]
    pub fn last_active(&self) -> (JuzId, Stage) {
        let state = self.lock();
        (state.last_active(), state.last_active_stage())
    }

    /// Record a stage for a Juz and persist the result.
    pub async fn record_progress(&self, juz: JuzId, stage: Stage) -> RecordedProgress {
        let now = self.clock.now();
        let (state, entry) = {
            let mut guard = self.lock();
            let entry = guard.record_progress(juz, stage, now);
            (guard.clone(), entry)
        };
        log::debug!("recorded juz {juz} at stage {}", stage.as_u8());

        let persisted = self.persist_latest().await.is_ok();
        RecordedProgress {
            state,
            entry,
            persisted,
        }
    }

    /// Record `Stage::NotStarted` for a Juz.
    pub async fn clear_progress(&self, juz: JuzId) -> RecordedProgress {
        self.record_progress(juz, Stage::NotStarted).await
    }

    /// Purge every persisted blob and return to the zero-state.
    ///
    /// The in-memory reset happens even if the purge fails.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Purge` if the persisted data could not be removed.
    pub async fn reset(&self) -> Result<(), ProgressServiceError> {
        let _gate = self.save_gate.lock().await;
        *self.lock() = ProgressState::zero();
        log::debug!("progress reset to zero-state");

        self.blobs
            .clear_blobs()
            .await
            .map_err(ProgressServiceError::Purge)
    }

    async fn persist_latest(&self) -> Result<(), StorageError> {
        let _gate = self.save_gate.lock().await;
        let latest = self.snapshot();
        self.progress.save_progress(&latest).await.inspect_err(|err| {
            log::warn!("failed to save progress, keeping in-memory state: {err}");
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
