mod catalog;
mod history;
mod ids;
mod progress;
mod reflection;
mod stage;
mod theme;

pub use catalog::{Juz, catalog, juz};
pub use history::{HISTORY_CAPACITY, History, HistoryEntry};
pub use ids::{JUZ_COUNT, JuzId, JuzIdError};
pub use progress::ProgressState;
pub use reflection::{ReflectionSlot, ReflectionTicket, ReflectionView};
pub use stage::{STAGE_TABLE, Stage, StageError, StageInfo};
pub use theme::{ThemeMode, ThemeParseError};
