use std::env;
use std::sync::Arc;

use hafiz_core::model::ThemeMode;
use storage::repository::ThemeRepository;

/// Loads and stores the light/dark flag.
#[derive(Clone)]
pub struct ThemeService {
    repo: Arc<dyn ThemeRepository>,
    ambient: ThemeMode,
}

impl ThemeService {
    /// `ambient` is used whenever no valid flag has been stored.
    #[must_use]
    pub fn new(repo: Arc<dyn ThemeRepository>, ambient: ThemeMode) -> Self {
        Self { repo, ambient }
    }

    #[must_use]
    pub fn ambient(&self) -> ThemeMode {
        self.ambient
    }

    /// Persisted theme, or the ambient preference if absent or unreadable.
    pub async fn load(&self) -> ThemeMode {
        match self.repo.load_theme().await {
            Ok(Some(mode)) => mode,
            Ok(None) => self.ambient,
            Err(err) => {
                log::warn!("ignoring stored theme flag: {err}");
                self.ambient
            }
        }
    }

    /// Store a theme. A failed save is logged; the requested mode is returned regardless.
    pub async fn set(&self, mode: ThemeMode) -> ThemeMode {
        if let Err(err) = self.repo.save_theme(mode).await {
            log::warn!("failed to save theme flag: {err}");
        }
        mode
    }

    /// Flip the current theme and store it.
    pub async fn toggle(&self) -> ThemeMode {
        let next = self.load().await.toggled();
        self.set(next).await
    }
}

/// Ambient color-scheme preference of the host terminal.
///
/// `HAFIZ_COLOR_SCHEME` (`light`/`dark`) wins; otherwise the background
/// slot of `COLORFGBG` is inspected; otherwise light.
#[must_use]
pub fn ambient_theme_from_env() -> ThemeMode {
    ambient_theme_from_vars(
        env::var("HAFIZ_COLOR_SCHEME").ok().as_deref(),
        env::var("COLORFGBG").ok().as_deref(),
    )
}

fn ambient_theme_from_vars(scheme: Option<&str>, colorfgbg: Option<&str>) -> ThemeMode {
    if let Some(mode) = scheme.and_then(|raw| raw.parse::<ThemeMode>().ok()) {
        return mode;
    }

    // COLORFGBG is "fg;bg" or "fg;default;bg"; ANSI backgrounds 0-6 and 8 are dark.
    let background = colorfgbg
        .and_then(|raw| raw.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(bg) if bg <= 6 || bg == 8 => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::{BlobStore, InMemoryRepository, THEME_KEY};

    fn service(repo: &InMemoryRepository, ambient: ThemeMode) -> ThemeService {
        ThemeService::new(Arc::new(repo.clone()), ambient)
    }

    #[tokio::test]
    async fn absent_flag_uses_ambient() {
        let repo = InMemoryRepository::new();
        assert_eq!(service(&repo, ThemeMode::Dark).load().await, ThemeMode::Dark);
        assert_eq!(service(&repo, ThemeMode::Light).load().await, ThemeMode::Light);
    }

    #[tokio::test]
    async fn stored_flag_wins_over_ambient() {
        let repo = InMemoryRepository::new();
        let themes = service(&repo, ThemeMode::Light);
        themes.set(ThemeMode::Dark).await;
        assert_eq!(themes.load().await, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn corrupt_flag_falls_back_to_ambient() {
        let repo = InMemoryRepository::new();
        repo.put_blob(THEME_KEY, "solarized").await.unwrap();
        assert_eq!(service(&repo, ThemeMode::Dark).load().await, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn toggle_persists_the_flipped_value() {
        let repo = InMemoryRepository::new();
        let themes = service(&repo, ThemeMode::Light);

        assert_eq!(themes.toggle().await, ThemeMode::Dark);
        assert_eq!(repo.get_blob(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
        assert_eq!(themes.toggle().await, ThemeMode::Light);
    }

    #[test]
    fn ambient_detection() {
        assert_eq!(ambient_theme_from_vars(Some("dark"), None), ThemeMode::Dark);
        assert_eq!(ambient_theme_from_vars(Some("light"), Some("15;0")), ThemeMode::Light);
        assert_eq!(ambient_theme_from_vars(None, Some("15;0")), ThemeMode::Dark);
        assert_eq!(ambient_theme_from_vars(None, Some("0;default;15")), ThemeMode::Light);
        assert_eq!(ambient_theme_from_vars(Some("auto"), None), ThemeMode::Light);
        assert_eq!(ambient_theme_from_vars(None, None), ThemeMode::Light);
    }
}
