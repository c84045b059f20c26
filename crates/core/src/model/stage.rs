use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur when converting into a `Stage`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StageError {
    #[error("invalid stage value: {0}")]
    InvalidValue(i64),

    #[error("unknown stage name: {0:?}")]
    UnknownName(String),
}

//
// ─── STAGE ────────────────────────────────────────────────────────────────────
//

/// Discrete reading checkpoint within a single Juz.
///
/// Stages are integer-coded `0..=5` on the wire:
/// - `NotStarted`: nothing read yet
/// - `Started`: Al-Juz, the opening of the Juz
/// - `Quarter`: Rub', a quarter read
/// - `Half`: Nisf, half read
/// - `ThreeQuarters`: Salasa, three quarters read
/// - `Complete`: the whole Juz has been read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    NotStarted,
    Started,
    Quarter,
    Half,
    ThreeQuarters,
    Complete,
}

/// Display labels and completion percentage for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageInfo {
    pub stage: Stage,
    pub urdu: &'static str,
    pub english: &'static str,
    pub percent: u8,
}

/// The fixed stage table, indexed by stage value.
pub const STAGE_TABLE: [StageInfo; 6] = [
    StageInfo {
        stage: Stage::NotStarted,
        urdu: "شروع نہیں کیا",
        english: "Not Started",
        percent: 0,
    },
    StageInfo {
        stage: Stage::Started,
        urdu: "الجز",
        english: "Al-Juz (Start)",
        percent: 5,
    },
    StageInfo {
        stage: Stage::Quarter,
        urdu: "ربع",
        english: "Rub' (1/4)",
        percent: 25,
    },
    StageInfo {
        stage: Stage::Half,
        urdu: "نصف",
        english: "Nisf (1/2)",
        percent: 50,
    },
    StageInfo {
        stage: Stage::ThreeQuarters,
        urdu: "ثلاثة",
        english: "Salasa (3/4)",
        percent: 75,
    },
    StageInfo {
        stage: Stage::Complete,
        urdu: "مکمل",
        english: "Complete",
        percent: 100,
    },
];

impl Stage {
    /// All stages in ascending order.
    pub const ALL: [Stage; 6] = [
        Stage::NotStarted,
        Stage::Started,
        Stage::Quarter,
        Stage::Half,
        Stage::ThreeQuarters,
        Stage::Complete,
    ];

    /// Converts a numeric stage (0-5) to a `Stage`.
    ///
    /// # Errors
    ///
    /// Returns `StageError::InvalidValue` if the value is not in the range 0-5.
    pub fn from_u8(value: u8) -> Result<Self, StageError> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(StageError::InvalidValue(i64::from(value)))
    }

    /// Numeric code used in persisted snapshots.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Stage::NotStarted => 0,
            Stage::Started => 1,
            Stage::Quarter => 2,
            Stage::Half => 3,
            Stage::ThreeQuarters => 4,
            Stage::Complete => 5,
        }
    }

    #[must_use]
    pub fn info(self) -> &'static StageInfo {
        &STAGE_TABLE[usize::from(self.as_u8())]
    }

    /// Completion percentage for this stage.
    #[must_use]
    pub fn percent(self) -> u8 {
        self.info().percent
    }

    #[must_use]
    pub fn urdu_label(self) -> &'static str {
        self.info().urdu
    }

    #[must_use]
    pub fn english_label(self) -> &'static str {
        self.info().english
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self == Stage::Complete
    }
}

impl TryFrom<u8> for Stage {
    type Error = StageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.as_u8()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_label())
    }
}

/// Accepts either the numeric code or a short name (`start`, `rub`, `nisf`, ...).
impl FromStr for Stage {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(value) = raw.parse::<i64>() {
            return u8::try_from(value)
                .map_err(|_| StageError::InvalidValue(value))
                .and_then(Self::from_u8);
        }

        match raw.to_ascii_lowercase().as_str() {
            "none" | "not-started" | "clear" => Ok(Stage::NotStarted),
            "start" | "started" | "al-juz" => Ok(Stage::Started),
            "quarter" | "rub" => Ok(Stage::Quarter),
            "half" | "nisf" => Ok(Stage::Half),
            "three-quarters" | "salasa" => Ok(Stage::ThreeQuarters),
            "complete" | "done" => Ok(Stage::Complete),
            _ => Err(StageError::UnknownName(raw.to_string())),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_stage_conversion_works() {
        assert_eq!(Stage::from_u8(0).unwrap(), Stage::NotStarted);
        assert_eq!(Stage::from_u8(5).unwrap(), Stage::Complete);
        let err = Stage::from_u8(6).unwrap_err();
        assert!(matches!(err, StageError::InvalidValue(6)));
    }

    #[test]
    fn percent_table_is_fixed() {
        let percents: Vec<u8> = Stage::ALL.iter().map(|s| s.percent()).collect();
        assert_eq!(percents, vec![0, 5, 25, 50, 75, 100]);
    }

    #[test]
    fn percent_is_monotonic() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0].percent() < pair[1].percent());
        }
    }

    #[test]
    fn table_rows_match_their_index() {
        for (idx, info) in STAGE_TABLE.iter().enumerate() {
            assert_eq!(usize::from(info.stage.as_u8()), idx);
        }
    }

    #[test]
    fn parses_numbers_and_names() {
        assert_eq!("3".parse::<Stage>().unwrap(), Stage::Half);
        assert_eq!("Nisf".parse::<Stage>().unwrap(), Stage::Half);
        assert_eq!("done".parse::<Stage>().unwrap(), Stage::Complete);
        assert!(matches!(
            "-1".parse::<Stage>(),
            Err(StageError::InvalidValue(-1))
        ));
        assert!(matches!(
            "later".parse::<Stage>(),
            Err(StageError::UnknownName(_))
        ));
    }
}
