use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{NotesError, Result};

/// The one input a request operates on
#[derive(Debug, Clone)]
pub enum InputSource {
    /// A YouTube URL or bare video ID
    Link(String),
    /// A local video file sent to the generation endpoint as-is
    VideoFile(PathBuf),
    /// Raw transcript text, pasted via stdin or read from a file
    Text(String),
}

impl InputSource {
    pub fn label(&self) -> &'static str {
        match self {
            InputSource::Link(_) => "link",
            InputSource::VideoFile(_) => "video",
            InputSource::Text(_) => "text",
        }
    }
}

/// Resolve the request input from the CLI surface.
///
/// Exactly one source wins: an explicit video file, an explicit transcript
/// file, the positional link, or pasted stdin text, in that order. Anything
/// empty is a validation failure, reported before any network call.
pub fn resolve(
    link: Option<&str>,
    video: Option<&Path>,
    transcript: Option<&Path>,
    stdin_text: Option<String>,
) -> Result<InputSource> {
    if let Some(path) = video {
        debug!("Input: video file {}", path.display());
        return Ok(InputSource::VideoFile(path.to_path_buf()));
    }

    if let Some(path) = transcript {
        debug!("Input: transcript file {}", path.display());
        let text = std::fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Err(NotesError::NoInput);
        }
        return Ok(InputSource::Text(text));
    }

    if let Some(link) = link {
        let link = link.trim();
        if link.is_empty() {
            return Err(NotesError::NoInput);
        }
        debug!("Input: link {link}");
        return Ok(InputSource::Link(link.to_string()));
    }

    match stdin_text {
        Some(text) if !text.trim().is_empty() => {
            debug!("Input: {} bytes of pasted text", text.len());
            Ok(InputSource::Text(text))
        }
        _ => Err(NotesError::NoInput),
    }
}
