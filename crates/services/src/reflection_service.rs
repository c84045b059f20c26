use std::env;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use hafiz_core::model::{JuzId, ReflectionSlot, ReflectionView, juz};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ReflectionError;

/// Shown when the service answers with no text.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "قرآن پاک کی تلاوت دلوں کا سکون ہے۔ Reading Quran is the peace of hearts.";

/// Shown when the request fails for any reason.
pub const FAILURE_FALLBACK: &str = "تم میں سے بہترین وہ ہے جو قرآن سیکھے اور سکھائے۔ The best of you are those who learn the Quran and teach it.";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct ReflectionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl ReflectionConfig {
    /// Validate and normalize a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ReflectionError::InvalidBaseUrl` if the base URL does not parse.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ReflectionError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if Url::parse(&base_url).is_err() {
            return Err(ReflectionError::InvalidBaseUrl(base_url));
        }
        Ok(Self {
            base_url,
            api_key: api_key.into().trim().to_string(),
            model: model.into().trim().to_string(),
        })
    }

    /// Read `HAFIZ_AI_API_KEY`, `HAFIZ_AI_BASE_URL` and `HAFIZ_AI_MODEL`.
    ///
    /// Returns `Ok(None)` when no API key is set.
    ///
    /// # Errors
    ///
    /// Returns `ReflectionError::InvalidBaseUrl` for an unparseable base URL.
    pub fn from_env() -> Result<Option<Self>, ReflectionError> {
        let Some(api_key) = env::var("HAFIZ_AI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
        else {
            return Ok(None);
        };
        let base_url = env::var("HAFIZ_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("HAFIZ_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Self::new(base_url, api_key, model).map(Some)
    }
}

//
// ─── CLIENT ────────────────────────────────────────────────────────────────────
//

/// Opaque text generator behind the reflection card.
#[async_trait]
pub trait ReflectionClient: Send + Sync {
    /// Generate text for a prompt.
    ///
    /// # Errors
    ///
    /// Returns `ReflectionError` on any failure; callers substitute a fallback.
    async fn generate(&self, prompt: &str) -> Result<String, ReflectionError>;
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    config: Option<ReflectionConfig>,
}

impl ChatCompletionsClient {
    #[must_use]
    pub fn new(config: Option<ReflectionConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl ReflectionClient for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, ReflectionError> {
        let config = self.config.as_ref().ok_or(ReflectionError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url);
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReflectionError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        body.first_content().ok_or(ReflectionError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

impl ChatResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Prompt sent for the active Juz.
#[must_use]
pub fn reflection_prompt(active: JuzId) -> String {
    let entry = juz(active);
    format!(
        "Provide a short, 1-sentence inspirational spiritual reflection from the Holy Quran \
         to encourage someone who is reading Juz {active} ({}). Make it warm and encouraging. \
         Respond in Urdu with English translation.",
        entry.name_english()
    )
}

/// Fetches the reflection text for the active Juz and keeps only the newest answer.
pub struct ReflectionService {
    client: Arc<dyn ReflectionClient>,
    slot: Mutex<ReflectionSlot>,
}

impl ReflectionService {
    #[must_use]
    pub fn new(client: Arc<dyn ReflectionClient>) -> Self {
        Self {
            client,
            slot: Mutex::new(ReflectionSlot::new()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, ReflectionSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reflection text for a Juz. Never fails: errors become a fallback string.
    pub async fn fetch_reflection(&self, active: JuzId) -> String {
        match self.client.generate(&reflection_prompt(active)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) | Err(ReflectionError::EmptyResponse) => {
                log::warn!("reflection for juz {active} came back empty");
                EMPTY_RESPONSE_FALLBACK.to_string()
            }
            Err(err) => {
                log::warn!("reflection for juz {active} failed: {err}");
                FAILURE_FALLBACK.to_string()
            }
        }
    }

    /// Start a fetch for the active Juz and store its text unless a newer
    /// `refresh` started meanwhile. Returns whether the text was applied.
    pub async fn refresh(&self, active: JuzId) -> bool {
        let ticket = self.slot().begin(active);
        let text = self.fetch_reflection(active).await;

        let applied = self.slot().complete(ticket, text);
        if !applied {
            log::debug!("dropping stale reflection for juz {active}");
        }
        applied
    }

    /// Current display state.
    #[must_use]
    pub fn current(&self) -> ReflectionView {
        self.slot().view().clone()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<&'static str, fn() -> ReflectionError>);

    #[async_trait]
    impl ReflectionClient for Fixed {
        async fn generate(&self, _prompt: &str) -> Result<String, ReflectionError> {
            match &self.0 {
                Ok(text) => Ok((*text).to_string()),
                Err(make) => Err(make()),
            }
        }
    }

    fn service(client: Fixed) -> ReflectionService {
        ReflectionService::new(Arc::new(client))
    }

    fn id(n: u8) -> JuzId {
        JuzId::new(n).unwrap()
    }

    #[tokio::test]
    async fn returns_trimmed_text() {
        let svc = service(Fixed(Ok("  Be patient.  ")));
        assert_eq!(svc.fetch_reflection(id(3)).await, "Be patient.");
    }

    #[tokio::test]
    async fn empty_text_uses_empty_fallback() {
        let svc = service(Fixed(Ok("   ")));
        assert_eq!(svc.fetch_reflection(id(3)).await, EMPTY_RESPONSE_FALLBACK);

        let svc = service(Fixed(Err(|| ReflectionError::EmptyResponse)));
        assert_eq!(svc.fetch_reflection(id(3)).await, EMPTY_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn errors_use_failure_fallback() {
        let svc = service(Fixed(Err(|| ReflectionError::Disabled)));
        assert_eq!(svc.fetch_reflection(id(3)).await, FAILURE_FALLBACK);
    }

    #[tokio::test]
    async fn disabled_client_falls_back() {
        let svc = ReflectionService::new(Arc::new(ChatCompletionsClient::new(None)));
        assert!(svc.refresh(id(1)).await);
        assert_eq!(svc.current().text(), Some(FAILURE_FALLBACK));
    }

    #[tokio::test]
    async fn refresh_stores_ready_view() {
        let svc = service(Fixed(Ok("Keep going.")));
        assert!(svc.refresh(id(12)).await);
        assert_eq!(
            svc.current(),
            ReflectionView::Ready {
                juz: id(12),
                text: "Keep going.".into()
            }
        );
    }

    #[test]
    fn prompt_names_the_juz() {
        let prompt = reflection_prompt(id(30));
        assert!(prompt.contains("Juz 30"));
        assert!(prompt.contains("Amma Yatasa'aloon"));
    }

    #[test]
    fn config_validates_base_url() {
        let config = ReflectionConfig::new("https://example.test/v1/", "key", "model").unwrap();
        assert_eq!(config.base_url, "https://example.test/v1");
        assert!(matches!(
            ReflectionConfig::new("not a url", "key", "model"),
            Err(ReflectionError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn parses_chat_response() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Salaam"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.first_content().as_deref(), Some("Salaam"));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(empty.first_content().is_none());
    }
}
