use std::sync::Arc;

use hafiz_core::model::ThemeMode;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::reflection_service::{
    ChatCompletionsClient, ReflectionClient, ReflectionConfig, ReflectionService,
};
use crate::theme_service::ThemeService;
use crate::Clock;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
    theme: Arc<ThemeService>,
    reflection: Arc<ReflectionService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, reading the reflection
    /// client configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// reflection configuration is invalid.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        ambient: ThemeMode,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let config = ReflectionConfig::from_env()?;
        if config.is_none() {
            log::info!("HAFIZ_AI_API_KEY not set; reflections will use the fallback text");
        }
        let client: Arc<dyn ReflectionClient> = Arc::new(ChatCompletionsClient::new(config));
        Ok(Self::from_storage(&storage, clock, ambient, client).await)
    }

    /// Build services over an existing storage and reflection client.
    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        ambient: ThemeMode,
        client: Arc<dyn ReflectionClient>,
    ) -> Self {
        let progress = Arc::new(
            ProgressService::load(
                clock,
                Arc::clone(&storage.progress),
                Arc::clone(&storage.blobs),
            )
            .await,
        );
        let theme = Arc::new(ThemeService::new(Arc::clone(&storage.theme), ambient));
        let reflection = Arc::new(ReflectionService::new(client));

        Self {
            progress,
            theme,
            reflection,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme)
    }

    #[must_use]
    pub fn reflection(&self) -> Arc<ReflectionService> {
        Arc::clone(&self.reflection)
    }
}
