//! JSON layout of the persisted blobs.
//!
//! The progress blob keeps the field names of the browser build's
//! local-storage snapshot so existing exports load unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use hafiz_core::model::{History, HistoryEntry, JuzId, ProgressState, Stage, ThemeMode};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Persisted shape of a `ProgressState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub last_read_juz: i64,
    pub last_read_step: i64,
    #[serde(default)]
    pub juz_progress: BTreeMap<i64, i64>,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

/// Persisted shape of a `HistoryEntry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub juz: i64,
    pub step: i64,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(state: &ProgressState) -> Self {
        Self {
            last_read_juz: i64::from(state.last_active().value()),
            last_read_step: i64::from(state.last_active_stage().as_u8()),
            juz_progress: state
                .recorded_stages()
                .map(|(juz, stage)| (i64::from(juz.value()), i64::from(stage.as_u8())))
                .collect(),
            history: state.history().iter().map(HistoryRecord::from_entry).collect(),
        }
    }

    /// Convert the record back into a domain `ProgressState`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for out-of-range Juz numbers,
    /// unknown stage values, or malformed timestamps.
    pub fn into_state(self) -> Result<ProgressState, StorageError> {
        let last_active = JuzId::try_from(self.last_read_juz).map_err(ser)?;
        let last_active_stage = stage_from_i64(self.last_read_step)?;

        let stages = self
            .juz_progress
            .into_iter()
            .map(|(juz, step)| -> Result<(JuzId, Stage), StorageError> {
                Ok((JuzId::try_from(juz).map_err(ser)?, stage_from_i64(step)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let entries = self
            .history
            .into_iter()
            .map(HistoryRecord::into_entry)
            .collect::<Result<Vec<_>, StorageError>>()?;

        Ok(ProgressState::from_persisted(
            last_active,
            last_active_stage,
            stages,
            History::from_entries(entries),
        ))
    }
}

impl HistoryRecord {
    #[must_use]
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            date: entry
                .recorded_at()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            juz: i64::from(entry.juz().value()),
            step: i64::from(entry.stage().as_u8()),
        }
    }

    /// Convert back into a domain `HistoryEntry`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if any field is invalid.
    pub fn into_entry(self) -> Result<HistoryEntry, StorageError> {
        let recorded_at = DateTime::parse_from_rfc3339(&self.date)
            .map_err(ser)?
            .with_timezone(&Utc);
        let juz = JuzId::try_from(self.juz).map_err(ser)?;
        let stage = stage_from_i64(self.step)?;
        Ok(HistoryEntry::new(juz, stage, recorded_at))
    }
}

fn stage_from_i64(value: i64) -> Result<Stage, StorageError> {
    let raw = u8::try_from(value).map_err(|_| ser(format!("stage {value} out of range")))?;
    Stage::from_u8(raw).map_err(ser)
}

/// Encode the progress blob.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_progress(state: &ProgressState) -> Result<String, StorageError> {
    serde_json::to_string(&ProgressRecord::from_state(state)).map_err(ser)
}

/// Decode the progress blob.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the JSON is malformed or holds invalid values.
pub fn decode_progress(raw: &str) -> Result<ProgressState, StorageError> {
    let record: ProgressRecord = serde_json::from_str(raw).map_err(ser)?;
    record.into_state()
}

/// Decode the theme blob.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for anything but `light` or `dark`.
pub fn decode_theme(raw: &str) -> Result<ThemeMode, StorageError> {
    raw.parse::<ThemeMode>().map_err(ser)
}
