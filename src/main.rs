use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};

mod cli;

use cli::{Cli, OutputFormat};
use vidnotes::Transcript;
use vidnotes::config::Config;
use vidnotes::error::{ErrorKind, NotesError};
use vidnotes::input::InputSource;
use vidnotes::output::NotesReport;
use vidnotes::progress::{Progress, State};
use vidnotes::summarize::Summarizer;
use vidnotes::transcript_api::TranscriptApi;
use vidnotes::youtube::Youtube;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("vidnotes.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidnotes")
        .join("logs")
}

fn key_status(name: &str, purpose: &str) -> String {
    match std::env::var(name) {
        Ok(_) => format!("  \x1b[32m✅\x1b[0m {name:<16} set"),
        Err(_) => format!("  \x1b[31m❌\x1b[0m {name:<16} (not set — {purpose})"),
    }
}

fn build_after_help() -> String {
    let gemini = key_status(vidnotes::summarize::API_KEY_ENV, "needed for note generation");
    let rapid = key_status(vidnotes::transcript_api::API_KEY_ENV, "needed for the transcript API fallback");

    let log_path = log_dir().join("vidnotes.log");

    format!(
        "\nCREDENTIALS:\n{gemini}\n{rapid}\n\nLogs are written to: {}",
        log_path.display()
    )
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner labeled with whatever stage the progress model says is running
fn stage_spinner(progress: &Progress) -> ProgressBar {
    create_spinner(progress.stage().unwrap_or_default())
}

fn progress_line(progress: &Progress) -> String {
    match progress.state() {
        State::Done => "[100%] done".to_string(),
        _ => format!("[{}%] {}", progress.percent(), progress.stage().unwrap_or("idle")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = vidnotes::config::Config::load().unwrap_or_default();

    if cli.verbose {
        let config_path = vidnotes::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    if let Err(e) = run(&cli, &config).await {
        let kind = e.kind();
        error!("{kind} failure: {e}");
        eprintln!("{} {e}", style(format!("{kind} error:")).red().bold());
        if matches!(e, NotesError::UnrecognizedLink { .. }) {
            eprintln!(
                "\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/shorts/ID\n  <11-character video ID>"
            );
        }
        std::process::exit(match kind {
            ErrorKind::Validation => 2,
            _ => 1,
        });
    }

    Ok(())
}

async fn run(cli: &Cli, config: &Config) -> vidnotes::Result<()> {
    // CLI flags take priority over config defaults
    let lang = cli
        .lang
        .clone()
        .or_else(|| config.default_lang.clone())
        .unwrap_or_else(|| "en".to_string());
    let model = cli
        .model
        .clone()
        .or_else(|| config.default_model.clone())
        .unwrap_or_else(|| vidnotes::summarize::DEFAULT_MODEL.to_string());
    let format = cli
        .format
        .or_else(|| {
            let name = config.default_format.as_deref()?;
            <OutputFormat as clap::ValueEnum>::from_str(name, true).ok()
        })
        .unwrap_or(OutputFormat::Ansi);

    // A pasted transcript arrives on stdin only when no other input is given
    let no_explicit_input = cli.url.is_none() && cli.video.is_none() && cli.transcript.is_none();
    let stdin_text = if no_explicit_input && !io::stdin().is_terminal() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Some(text)
    } else {
        None
    };

    let source = vidnotes::input::resolve(
        cli.url.as_deref(),
        cli.video.as_deref(),
        cli.transcript.as_deref(),
        stdin_text,
    )?;
    info!("Input source: {}", source.label());

    let client = reqwest::Client::new();
    let summarizer = Summarizer::from_env(&model)?;

    match source {
        InputSource::Link(link) => {
            let Some(video_id) = vidnotes::extract_video_id(&link) else {
                return Err(NotesError::UnrecognizedLink { input: link });
            };
            debug!("Resolved video ID: {video_id}");

            let youtube = Youtube::new();
            let api = TranscriptApi::from_env().ok();
            let cache_dir = vidnotes::cache::default_dir();

            let mut progress = Progress::new(2);
            progress.start("Fetching transcript...");
            let spinner = stage_spinner(&progress);

            let transcript = match cached_transcript(cli, &cache_dir, &video_id, &lang) {
                Some(t) => t,
                None => match fetch_transcript(&client, cli, &youtube, api.as_ref(), &video_id, &lang).await {
                    Ok(t) => {
                        // A cache failure never fails the request
                        if let Err(e) = vidnotes::cache::save(&cache_dir, &t, &lang) {
                            debug!("Failed to cache transcript: {e}");
                        }
                        t
                    }
                    Err(e) => {
                        spinner.finish_and_clear();
                        return Err(e);
                    }
                },
            };

            progress.stage_done();
            spinner.finish_with_message(format!(
                "{} Transcript ready: {} segments ({})",
                style("✓").green().bold(),
                transcript.segments.len(),
                transcript.source
            ));

            if cli.verbose {
                eprintln!("{}", progress_line(&progress));
                eprintln!(
                    "Video: {} ({})\nSource: {}\nLanguage: {}\nSegments: {}",
                    transcript.title,
                    transcript.video_id,
                    transcript.source,
                    transcript.language,
                    transcript.segments.len(),
                );
            }

            progress.next_stage("Generating notes...");
            let spinner = stage_spinner(&progress);
            let notes = match summarizer.notes_from_transcript(&client, &transcript.text()).await {
                Ok(n) => n,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            progress.stage_done();
            if progress.is_done() {
                spinner.finish_with_message(format!("{} Notes generated", style("✓").green().bold()));
            }
            if cli.verbose {
                eprintln!("{}", progress_line(&progress));
            }

            let report = NotesReport {
                source: "link".to_string(),
                video_id: Some(transcript.video_id.clone()),
                title: (!transcript.title.is_empty()).then(|| transcript.title.clone()),
                model: model.clone(),
                notes,
            };
            emit(cli, format, &report)?;
        }

        InputSource::VideoFile(path) => {
            let mut progress = Progress::new(1);
            progress.start("Generating notes from video...");
            let spinner = stage_spinner(&progress);
            let notes = match summarizer.notes_from_video(&client, &path).await {
                Ok(n) => n,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            progress.stage_done();
            if progress.is_done() {
                spinner.finish_with_message(format!("{} Notes generated", style("✓").green().bold()));
            }
            if cli.verbose {
                eprintln!("{}", progress_line(&progress));
            }

            let report = NotesReport {
                source: "video".to_string(),
                video_id: None,
                title: path.file_name().map(|n| n.to_string_lossy().into_owned()),
                model: model.clone(),
                notes,
            };
            emit(cli, format, &report)?;
        }

        InputSource::Text(text) => {
            debug!("Pasted transcript: {} tokens", vidnotes::summarize::token_count(&text));

            let mut progress = Progress::new(1);
            progress.start("Generating notes...");
            let spinner = stage_spinner(&progress);
            let notes = match summarizer.notes_from_text(&client, &text).await {
                Ok(n) => n,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            progress.stage_done();
            if progress.is_done() {
                spinner.finish_with_message(format!("{} Notes generated", style("✓").green().bold()));
            }
            if cli.verbose {
                eprintln!("{}", progress_line(&progress));
            }

            let report = NotesReport {
                source: "text".to_string(),
                video_id: None,
                title: None,
                model: model.clone(),
                notes,
            };
            emit(cli, format, &report)?;
        }
    }

    Ok(())
}

/// Look the transcript up in the on-disk cache, unless --force was given
fn cached_transcript(cli: &Cli, dir: &Path, video_id: &str, lang: &str) -> Option<Transcript> {
    if cli.force {
        debug!("--force set, skipping the transcript cache");
        return None;
    }
    let cached = vidnotes::cache::load(dir, video_id, lang)?;
    info!("Using cached transcript for {video_id}");
    Some(cached)
}

/// Fetch a transcript for a video ID: captions first, then the transcript
/// API when a key is available. Nothing is retried.
async fn fetch_transcript(
    client: &reqwest::Client,
    cli: &Cli,
    youtube: &Youtube,
    api: Option<&TranscriptApi>,
    video_id: &str,
    lang: &str,
) -> vidnotes::Result<Transcript> {
    if cli.api_only {
        let Some(api) = api else {
            return Err(NotesError::MissingApiKey {
                env_var: vidnotes::transcript_api::API_KEY_ENV,
            });
        };
        return api.fetch(client, video_id, lang).await;
    }

    match youtube.fetch_captions(client, video_id, lang).await {
        Ok(t) => Ok(t),
        Err(e) if cli.no_fallback => Err(e),
        Err(e) => match api {
            Some(api) => {
                warn!("Caption extraction failed: {e}; trying the transcript API");
                api.fetch(client, video_id, lang).await
            }
            None => Err(e),
        },
    }
}

fn emit(cli: &Cli, format: OutputFormat, report: &NotesReport) -> vidnotes::Result<()> {
    if let Some(ref path) = cli.output {
        // Escape styling is for terminals; a file gets the plain markdown
        let rendered = match format {
            OutputFormat::Ansi | OutputFormat::Markdown => vidnotes::output::render_markdown(&report.notes),
            OutputFormat::Json => vidnotes::output::render_json(report)?,
        };
        std::fs::write(path, &rendered)?;
        if cli.verbose {
            eprintln!("Notes written to: {}", path.display());
        }
    } else {
        let rendered = match format {
            OutputFormat::Ansi => vidnotes::output::render_ansi(&report.notes),
            OutputFormat::Markdown => vidnotes::output::render_markdown(&report.notes),
            OutputFormat::Json => vidnotes::output::render_json(report)?,
        };
        println!("{rendered}");
    }

    if cli.copy {
        match vidnotes::output::copy_to_clipboard(&report.notes) {
            Ok(()) => eprintln!("{} Copied to clipboard", style("✓").green().bold()),
            Err(e) => {
                warn!("Clipboard copy failed: {e}");
                eprintln!("{} clipboard copy failed: {e}", style("warning:").yellow().bold());
            }
        }
    }

    Ok(())
}
