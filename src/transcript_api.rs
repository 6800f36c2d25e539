use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::error::{NotesError, Result};
use crate::{Segment, Transcript, TranscriptSource};

pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

const DEFAULT_HOST: &str = "youtubetranscriptdownloader.p.rapidapi.com";

/// The downloader wraps its payload in a single string field
#[derive(Debug, Deserialize)]
struct ApiResponse {
    body: String,
}

/// Client for the hosted transcript-downloader API.
///
/// The API answers a POSTed video link with a response whose `body` embeds
/// a `"Transcript URL: …"` string; the transcript text itself comes from a
/// follow-up GET to that URL. Exactly two requests per fetch, no retry.
pub struct TranscriptApi {
    base_url: String,
    host: String,
    api_key: String,
}

impl TranscriptApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: format!("https://{DEFAULT_HOST}"),
            host: DEFAULT_HOST.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from the RAPIDAPI_KEY environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| NotesError::MissingApiKey { env_var: API_KEY_ENV })?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different endpoint (primarily for tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.host = self
            .base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string();
        self
    }

    pub async fn fetch(&self, client: &reqwest::Client, video_id: &str, lang: &str) -> Result<Transcript> {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        let endpoint = format!("{}/dev", self.base_url);
        debug!("Requesting transcript location: {endpoint}");

        let resp = client
            .post(&endpoint)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "url": watch_url }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotesError::Status {
                service: "transcript API",
                status,
                body,
            });
        }

        let payload = resp.text().await?;
        let parsed: ApiResponse = serde_json::from_str(&payload)?;
        let transcript_url = extract_transcript_url(&parsed.body)?;
        debug!("Fetching transcript text: {transcript_url}");

        let resp = client.get(&transcript_url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotesError::Status {
                service: "transcript API",
                status,
                body,
            });
        }

        let text = resp.text().await?;

        Ok(Transcript {
            video_id: video_id.to_string(),
            title: String::new(),
            language: lang.to_string(),
            source: TranscriptSource::Api,
            segments: vec![Segment {
                text: text.trim().to_string(),
                start: 0.0,
                duration: 0.0,
            }],
        })
    }
}

fn extract_transcript_url(body: &str) -> Result<String> {
    let re = Regex::new(r#""Transcript URL: (.*?)""#).unwrap();
    re.captures(body)
        .map(|caps| caps[1].to_string())
        .ok_or(NotesError::MissingField {
            service: "transcript API",
            what: "transcript URL",
        })
}
