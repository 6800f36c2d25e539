pub mod cache;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod summarize;
pub mod transcript_api;
pub mod youtube;

use serde::{Deserialize, Serialize};

pub use error::{ErrorKind, NotesError, Result};

/// A single captioned segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Source of the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptSource {
    Captions,
    Api,
}

/// Complete transcript for a video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub title: String,
    pub language: String,
    pub source: TranscriptSource,
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Concatenated transcript text, segments separated by single spaces
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptSource::Captions => write!(f, "captions"),
            TranscriptSource::Api => write!(f, "api"),
        }
    }
}

/// Extract the 11-character video ID from the recognized YouTube URL shapes
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    // Bare 11-character video ID
    if regex::Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap().is_match(input) {
        return Some(input.to_string());
    }

    // watch?v= (query parameter), youtu.be (short link), embed, /v/ (legacy), shorts.
    // The trailing guard pins the token at exactly 11 characters, so a decoy
    // like `&cv=ab` is skipped in favor of an earlier `v=` with a real ID.
    let patterns = [
        r"youtube\.com/watch\?.*v=([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"youtu\.be/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"youtube\.com/embed/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"youtube\.com/v/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
    ];

    for pattern in patterns {
        if let Some(caps) = regex::Regex::new(pattern).unwrap().captures(input) {
            return Some(caps[1].to_string());
        }
    }

    None
}
