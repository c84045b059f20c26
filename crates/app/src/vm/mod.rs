mod history_vm;
mod juz_card_vm;
mod stats_vm;
mod time_fmt;

pub use history_vm::{HistoryRowVm, map_history_rows};
pub use juz_card_vm::{ContinueCardVm, JuzCardVm, StageOptionVm, map_juz_cards, map_stage_options};
pub use stats_vm::StatsVm;
