use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Ansi,
    Markdown,
    Json,
}

#[derive(Parser)]
#[command(
    name = "vidnotes",
    about = "Turn YouTube links, video files, or pasted transcripts into AI-generated notes",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL or video ID (reads pasted transcript text from stdin if omitted)
    pub url: Option<String>,

    /// Generate notes from a local video file
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub video: Option<PathBuf>,

    /// Read transcript text from a file instead of fetching it
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["url", "video"])]
    pub transcript: Option<PathBuf>,

    /// Output format: ansi (default), markdown, json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Preferred caption language (defaults to en)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Gemini model for note generation (defaults to gemini-1.5-flash)
    #[arg(long)]
    pub model: Option<String>,

    /// Write notes to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip caption extraction, always use the transcript API
    #[arg(long)]
    pub api_only: bool,

    /// Don't fall back to the transcript API if captions unavailable
    #[arg(long)]
    pub no_fallback: bool,

    /// Re-fetch the transcript even when a cached copy exists
    #[arg(long)]
    pub force: bool,

    /// Copy the generated notes to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Show fetch metadata and file paths
    #[arg(short, long)]
    pub verbose: bool,
}
