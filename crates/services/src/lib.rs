#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod reflection_service;
pub mod theme_service;

pub use hafiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressServiceError, ReflectionError};
pub use progress_service::{ProgressService, RecordedProgress};
pub use reflection_service::{
    ChatCompletionsClient, EMPTY_RESPONSE_FALLBACK, FAILURE_FALLBACK, ReflectionClient,
    ReflectionConfig, ReflectionService,
};
pub use theme_service::{ThemeService, ambient_theme_from_env};
