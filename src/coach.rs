//! AI trading coach. The one fallible external collaborator in the system:
//! it receives a bounded slice of recent history and returns free-text
//! advice. Failures surface as [`JournalError::Coach`] and never touch
//! stored state.
//!
//! [`JournalError::Coach`]: crate::error::JournalError::Coach

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};
use crate::models::{PsychologyEntry, Trade};

/// Most recent trades included in the prompt.
pub const PROMPT_TRADE_WINDOW: usize = 20;
/// Most recent psychology entries included in the prompt.
pub const PROMPT_PSYCH_WINDOW: usize = 10;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Text-generation backend the coach talks to.
#[async_trait]
pub trait CoachModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Builds the coaching prompt from a bounded recent window of history,
/// never the full collections.
pub fn build_prompt(trades: &[Trade], psych: &[PsychologyEntry]) -> Result<String> {
    let trade_window = &trades[trades.len().saturating_sub(PROMPT_TRADE_WINDOW)..];
    let psych_window = &psych[psych.len().saturating_sub(PROMPT_PSYCH_WINDOW)..];

    Ok(format!(
        "Analyze my recent trading performance and emotional state as a trading coach.\n\n\
         TRADES DATA: {}\n\
         PSYCHOLOGY DATA: {}\n\n\
         Provide:\n\
         1. A summary of my current performance.\n\
         2. Identification of any behavioral patterns (good or bad).\n\
         3. 3 actionable tips to improve my trading next week.\n\n\
         Keep it professional, encouraging, and concise. Use Markdown formatting.",
        serde_json::to_string(trade_window)?,
        serde_json::to_string(psych_window)?,
    ))
}

/// Asks the model for advice over the bounded recent window.
pub async fn generate_advice<M: CoachModel + ?Sized>(
    model: &M,
    trades: &[Trade],
    psych: &[PsychologyEntry],
) -> Result<String> {
    let prompt = build_prompt(trades, psych)?;
    log::info!(
        "requesting coach advice over {} trades / {} psychology entries",
        trades.len().min(PROMPT_TRADE_WINDOW),
        psych.len().min(PROMPT_PSYCH_WINDOW)
    );
    model.generate(&prompt).await
}

// -- Gemini REST backend --

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    parts: Vec<GeminiPart>,
}

pub struct GeminiClient {
    client: reqwest::Client,
    config: CoachConfig,
}

impl GeminiClient {
    pub fn new(config: CoachConfig) -> Self {
        GeminiClient {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CoachModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        );
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(JournalError::Coach(format!(
                "model returned HTTP {}",
                response.status()
            )));
        }

        let parsed: GeminiResponse = response.json().await?;
        parsed
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| JournalError::Coach("empty model response".to_string()))
    }
}
