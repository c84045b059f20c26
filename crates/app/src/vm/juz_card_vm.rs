use hafiz_core::model::{Juz, JuzId, ProgressState, Stage, catalog, juz};

/// One tile of the 30-unit grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JuzCardVm {
    pub number: u8,
    pub name_arabic: &'static str,
    pub name_english: &'static str,
    pub start_surah: &'static str,
    pub stage_urdu: &'static str,
    pub stage_english: &'static str,
    pub percent: u8,
    pub is_complete: bool,
    pub is_active: bool,
}

impl JuzCardVm {
    #[must_use]
    pub fn new(entry: &Juz, stage: Stage, is_active: bool) -> Self {
        Self {
            number: entry.id().value(),
            name_arabic: entry.name_arabic(),
            name_english: entry.name_english(),
            start_surah: entry.start_surah(),
            stage_urdu: stage.urdu_label(),
            stage_english: stage.english_label(),
            percent: stage.percent(),
            is_complete: stage.is_complete(),
            is_active,
        }
    }

    #[must_use]
    pub fn for_juz(state: &ProgressState, id: JuzId) -> Self {
        Self::new(juz(id), state.stage_of(id), state.last_active() == id)
    }
}

#[must_use]
pub fn map_juz_cards(state: &ProgressState) -> Vec<JuzCardVm> {
    catalog()
        .iter()
        .map(|entry| JuzCardVm::for_juz(state, entry.id()))
        .collect()
}

/// The home card: where the reader left off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinueCardVm {
    pub card: JuzCardVm,
    pub is_fresh_start: bool,
}

/// Shows the stage of the last recorded update, not the map entry.
impl From<&ProgressState> for ContinueCardVm {
    fn from(state: &ProgressState) -> Self {
        Self {
            card: JuzCardVm::new(juz(state.last_active()), state.last_active_stage(), true),
            is_fresh_start: state.is_zero(),
        }
    }
}

/// A selectable stage in the update picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageOptionVm {
    pub value: u8,
    pub label: String,
    pub selected: bool,
}

impl StageOptionVm {
    #[must_use]
    pub fn new(stage: Stage, current: Stage) -> Self {
        Self {
            value: stage.as_u8(),
            label: format!(
                "{} {} ({})",
                stage.urdu_label(),
                stage.english_label(),
                stage.percent()
            ),
            selected: stage == current,
        }
    }
}

#[must_use]
pub fn map_stage_options(current: Stage) -> Vec<StageOptionVm> {
    Stage::ALL
        .iter()
        .map(|stage| StageOptionVm::new(*stage, current))
        .collect()
}
