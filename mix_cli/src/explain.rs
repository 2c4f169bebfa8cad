//! Step explanations from a generative language model.
//!
//! The calculator never depends on this module. Any failure here (missing
//! key, network, timeout, bad status, empty reply) degrades to
//! [`EXPLANATION_UNAVAILABLE`].

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use mix_core::{MixInputs, MixStep};
use serde::{Deserialize, Serialize};

/// Application version (from Cargo.toml)
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const EXPLANATION_UNAVAILABLE: &str =
    "Explanation unavailable. Check the API key and network connectivity.";

/// Produces a short narrative for one calculation step.
#[allow(async_fn_in_trait)]
pub trait ExplanationService {
    async fn explain(&self, step: &MixStep, inputs: &MixInputs) -> Result<String>;
}

/// Build the prompt sent to the model.
pub fn build_prompt(step: &MixStep, inputs: &MixInputs) -> String {
    format!(
        "You are a senior Civil Engineering materials expert.\n\
         Explain Step {id}: \"{title}\" in an ACI 211.1 Concrete Mix Design.\n\
         \n\
         Current Mix Design context:\n\
         - Target Strength: {strength} psi\n\
         - Concrete Type: {concrete_type}\n\
         - Exposure: {exposure}\n\
         - Step Result Value: {value}\n\
         - Step Calculation: {calculation}\n\
         \n\
         Rules:\n\
         1. Reference ACI 211.1 principles clearly.\n\
         2. Use professional yet educational language suitable for engineering students.\n\
         3. Explain the \"Why\" behind this specific value (e.g., how w/c impacts strength or how FM impacts workability).\n\
         4. Keep the explanation concise (max 3-4 sentences).\n\
         5. Be precise about terminology.\n",
        id = step.id,
        title = step.title,
        strength = inputs.strength_psi,
        concrete_type = inputs.concrete_type,
        exposure = inputs.exposure,
        value = step.value,
        calculation = step.calculation,
    )
}

/// Ask `service` for an explanation, falling back to a static message.
pub async fn explain_or_fallback<S: ExplanationService>(service: &S, step: &MixStep, inputs: &MixInputs) -> String {
    match service.explain(step, inputs).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            tracing::warn!(step = step.id, "explanation service returned empty text");
            EXPLANATION_UNAVAILABLE.to_string()
        }
        Err(e) => {
            tracing::warn!(step = step.id, error = %e, "explanation request failed");
            EXPLANATION_UNAVAILABLE.to_string()
        }
    }
}

// ============================================================================
// Gemini generateContent client
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

/// Gemini-backed explanation service
#[derive(Debug, Clone)]
pub struct GeminiExplainer {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiExplainer {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("MixDesign/{}", CURRENT_VERSION))
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        })
    }

    /// Configure from `GEMINI_API_KEY` (or `API_KEY`) and `MIX_EXPLAIN_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok();
        let model = std::env::var("MIX_EXPLAIN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }
}

impl ExplanationService for GeminiExplainer {
    async fn explain(&self, step: &MixStep, inputs: &MixInputs) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no API key configured (set GEMINI_API_KEY)"))?;

        let prompt = build_prompt(step, inputs);
        let body = GenerateRequest {
            contents: vec![Content { parts: vec![RequestPart { text: &prompt }] }],
        };

        tracing::debug!(step = step.id, model = %self.model, "requesting explanation");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .context("Network error")?;

        if !response.status().is_success() {
            bail!("Explanation API returned {}", response.status());
        }

        let parsed: GenerateResponse = response.json().await.context("Failed to parse response")?;
        parsed.first_text().ok_or_else(|| anyhow!("response contained no text"))
    }
}
