use hafiz_core::stats::ProgressStats;

/// Figures shown on the stats view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub overall_percent_str: String,
    pub completed: usize,
    pub remaining: usize,
    pub total: usize,
    pub bar: String,
}

impl From<ProgressStats> for StatsVm {
    fn from(stats: ProgressStats) -> Self {
        Self {
            overall_percent_str: format!("{}%", stats.overall_percent),
            completed: stats.completed,
            remaining: stats.remaining,
            total: stats.total,
            bar: progress_bar(stats.overall_percent, 30),
        }
    }
}

/// Fixed-width text bar for a percentage.
#[must_use]
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
