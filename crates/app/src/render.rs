//! Terminal output for the view models, colored per theme.

use colored::{ColoredString, Colorize};
use hafiz_core::model::{ReflectionView, ThemeMode};

use crate::vm::{ContinueCardVm, HistoryRowVm, JuzCardVm, StageOptionVm, StatsVm};

/// Colors for one theme.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    mode: ThemeMode,
}

impl Palette {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    fn heading(self, text: &str) -> ColoredString {
        match self.mode {
            ThemeMode::Light => text.green().bold(),
            ThemeMode::Dark => text.bright_green().bold(),
        }
    }

    fn accent(self, text: &str) -> ColoredString {
        match self.mode {
            ThemeMode::Light => text.yellow(),
            ThemeMode::Dark => text.bright_yellow(),
        }
    }

    fn muted(self, text: &str) -> ColoredString {
        match self.mode {
            ThemeMode::Light => text.bright_black(),
            ThemeMode::Dark => text.white().dimmed(),
        }
    }

    fn done(self, text: &str) -> ColoredString {
        match self.mode {
            ThemeMode::Light => text.blue().bold(),
            ThemeMode::Dark => text.bright_cyan().bold(),
        }
    }
}

pub fn continue_card(palette: Palette, vm: &ContinueCardVm) {
    let title = if vm.is_fresh_start {
        "Begin your journey"
    } else {
        "Continue reading"
    };
    println!("{}", palette.heading(title));
    juz_detail(palette, &vm.card);
}

pub fn juz_detail(palette: Palette, card: &JuzCardVm) {
    println!(
        "  {} {}  {}",
        palette.accent(&format!("Juz {}", card.number)),
        card.name_arabic,
        card.name_english
    );
    println!(
        "  {}",
        palette.muted(&format!("Starts at {}", card.start_surah))
    );
    let stage = format!(
        "{} {} ({}%)",
        card.stage_urdu, card.stage_english, card.percent
    );
    if card.is_complete {
        println!("  {}", palette.done(&stage));
    } else {
        println!("  {stage}");
    }
}

pub fn stage_options(palette: Palette, options: &[StageOptionVm]) {
    for option in options {
        let marker = if option.selected { "*" } else { " " };
        let line = format!("{marker} {} {}", option.value, option.label);
        if option.selected {
            println!("  {}", palette.accent(&line));
        } else {
            println!("  {}", palette.muted(&line));
        }
    }
}

pub fn juz_grid(palette: Palette, cards: &[JuzCardVm]) {
    println!("{}", palette.heading("All Juz"));
    for card in cards {
        let marker = if card.is_active { ">" } else { " " };
        let line = format!(
            "{marker} {:>2}  {:<24} {:>3}%  {}",
            card.number, card.name_english, card.percent, card.stage_english
        );
        if card.is_complete {
            println!("{}", palette.done(&line));
        } else if card.percent == 0 {
            println!("{}", palette.muted(&line));
        } else {
            println!("{line}");
        }
    }
}

pub fn history(palette: Palette, rows: &[HistoryRowVm]) {
    println!("{}", palette.heading("Recent activity"));
    if rows.is_empty() {
        println!("  {}", palette.muted("Nothing recorded yet."));
        return;
    }
    for row in rows {
        println!(
            "  {}  Juz {:>2} {:<24} {} {}",
            palette.muted(&row.recorded_at_str),
            row.juz_number,
            row.juz_name,
            row.stage_urdu,
            row.stage_english
        );
    }
}

pub fn stats(palette: Palette, vm: &StatsVm) {
    println!("{}", palette.heading("Progress"));
    println!(
        "  {} {}",
        palette.accent(&vm.bar),
        palette.accent(&vm.overall_percent_str)
    );
    println!(
        "  Completed {} of {}, {} remaining",
        vm.completed, vm.total, vm.remaining
    );
}

pub fn reflection(palette: Palette, view: &ReflectionView) {
    match view {
        ReflectionView::Idle => {}
        ReflectionView::Loading { .. } => {
            println!("{}", palette.muted("Fetching reflection..."));
        }
        ReflectionView::Ready { juz, text } => {
            println!("{}", palette.heading(&format!("Reflection for Juz {juz}")));
            println!("  {text}");
        }
    }
}

pub fn theme(palette: Palette, mode: ThemeMode) {
    println!("Theme: {}", palette.accent(mode.as_str()));
}

pub fn notice(palette: Palette, text: &str) {
    println!("{}", palette.muted(text));
}

pub fn warning(text: &str) {
    eprintln!("{}", text.red());
}
