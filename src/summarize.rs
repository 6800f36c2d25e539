use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::debug;

use crate::error::{NotesError, Result};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Whitespace-token budget for pasted transcripts
pub const MAX_TOKENS: usize = 1000;

/// Inline uploads only; larger files are rejected before any request
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Count tokens the way the budget defines them: whitespace-separated runs
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Budget left for a pasted transcript; negative once the text is over
pub fn remaining_tokens(text: &str) -> i64 {
    MAX_TOKENS as i64 - token_count(text) as i64
}

/// Client for the Gemini generateContent endpoint
pub struct Summarizer {
    base_url: String,
    api_key: String,
    model: String,
}

impl Summarizer {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a client from the GEMINI_API_KEY environment variable
    pub fn from_env(model: &str) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| NotesError::MissingApiKey { env_var: API_KEY_ENV })?;
        Ok(Self::new(api_key, model))
    }

    /// Point the client at a different endpoint (primarily for tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Generate notes from transcript text
    pub async fn notes_from_transcript(&self, client: &reqwest::Client, text: &str) -> Result<String> {
        let prompt = format!("Please generate notes from the following transcript:\n\n{text}");
        self.generate(client, vec![serde_json::json!({ "text": prompt })]).await
    }

    /// Generate notes from pasted text, enforcing the token budget first
    pub async fn notes_from_text(&self, client: &reqwest::Client, text: &str) -> Result<String> {
        let tokens = token_count(text);
        if tokens > MAX_TOKENS {
            return Err(NotesError::BudgetExceeded {
                tokens,
                limit: MAX_TOKENS,
            });
        }
        self.notes_from_transcript(client, text).await
    }

    /// Generate notes from a local video file, sent inline as base64.
    /// The file is validated before anything goes over the wire.
    pub async fn notes_from_video(&self, client: &reqwest::Client, path: &Path) -> Result<String> {
        let Some(mime) = video_mime(path) else {
            return Err(NotesError::UnsupportedVideo {
                path: path.to_path_buf(),
            });
        };

        let size = std::fs::metadata(path)?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(NotesError::VideoTooLarge {
                path: path.to_path_buf(),
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let prompt = format!("Please generate notes from the following video file: {file_name}");

        debug!("Encoding {} ({size} bytes) for inline upload", path.display());
        let bytes = tokio::fs::read(path).await?;
        let data = BASE64.encode(&bytes);

        let parts = vec![
            serde_json::json!({ "text": prompt }),
            serde_json::json!({
                "inlineData": {
                    "mimeType": mime,
                    "data": data
                }
            }),
        ];
        self.generate(client, parts).await
    }

    async fn generate(&self, client: &reqwest::Client, parts: Vec<serde_json::Value>) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Generating notes with model {}", self.model);

        let body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": parts
                }
            ]
        });

        let resp = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotesError::Status {
                service: "Gemini API",
                status,
                body,
            });
        }

        let payload = resp.text().await?;
        let json: serde_json::Value = serde_json::from_str(&payload)?;
        extract_notes(&json)
    }
}

fn extract_notes(json: &serde_json::Value) -> Result<String> {
    if let Some(parts) = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("");
        if !text.trim().is_empty() {
            return Ok(text.trim().to_string());
        }
    }
    Err(NotesError::MissingField {
        service: "Gemini API",
        what: "candidate text",
    })
}

fn video_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mkv" => Some("video/x-matroska"),
        "mov" => Some("video/quicktime"),
        "avi" => Some("video/x-msvideo"),
        _ => None,
    }
}
