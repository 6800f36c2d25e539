use std::path::{Path, PathBuf};

use log::debug;

use crate::Transcript;
use crate::error::Result;

/// Where cached transcripts live by default
pub fn default_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("vidnotes")
        .join("transcripts")
}

/// Entries are keyed by the requested language, not the language the
/// fetch resolved to, so a re-run with the same flags finds them.
fn file_name(video_id: &str, lang: &str) -> String {
    format!("{video_id}-{lang}.json")
}

/// Load a cached transcript, if a readable one exists.
///
/// A corrupt entry counts as a miss; the next fetch overwrites it.
pub fn load(dir: &Path, video_id: &str, lang: &str) -> Option<Transcript> {
    let path = dir.join(file_name(video_id, lang));
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<Transcript>(&data) {
        Ok(transcript) => {
            debug!("Cache hit: {}", path.display());
            Some(transcript)
        }
        Err(e) => {
            debug!("Ignoring corrupt cache entry {}: {e}", path.display());
            None
        }
    }
}

/// Save a transcript for later runs.
pub fn save(dir: &Path, transcript: &Transcript, lang: &str) -> Result<()> {
    let path = dir.join(file_name(&transcript.video_id, lang));
    std::fs::create_dir_all(dir)?;
    let data = serde_json::to_string_pretty(transcript)?;
    std::fs::write(&path, data)?;
    debug!("Cached transcript: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Segment, TranscriptSource};

    fn transcript(video_id: &str, language: &str) -> Transcript {
        Transcript {
            video_id: video_id.to_string(),
            title: "Test Video".to_string(),
            language: language.to_string(),
            source: TranscriptSource::Captions,
            segments: vec![Segment {
                text: "Hello world".to_string(),
                start: 0.0,
                duration: 1.5,
            }],
        }
    }

    #[test]
    fn test_file_name_keyed_by_id_and_lang() {
        assert_eq!(file_name("dQw4w9WgXcQ", "en"), "dQw4w9WgXcQ-en.json");
        assert_eq!(file_name("dQw4w9WgXcQ", "en-US"), "dQw4w9WgXcQ-en-US.json");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), &transcript("dQw4w9WgXcQ", "en"), "en").unwrap();

        let loaded = load(dir.path(), "dQw4w9WgXcQ", "en").unwrap();
        assert_eq!(loaded.video_id, "dQw4w9WgXcQ");
        assert_eq!(loaded.text(), "Hello world");
    }

    #[test]
    fn test_missing_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path(), "dQw4w9WgXcQ", "en").is_none());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dQw4w9WgXcQ-en.json"), "{not json").unwrap();
        assert!(load(dir.path(), "dQw4w9WgXcQ", "en").is_none());
    }

    #[test]
    fn test_keyed_by_requested_lang() {
        // The caption fetch may resolve en to en-US; the entry must still be
        // found under the lang the user asked for
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), &transcript("dQw4w9WgXcQ", "en-US"), "en").unwrap();

        let loaded = load(dir.path(), "dQw4w9WgXcQ", "en").unwrap();
        assert_eq!(loaded.language, "en-US");
    }
}
