use std::io::Write;
use std::process::{Command, Stdio};

use console::style;
use regex::Regex;
use serde::Serialize;

use crate::error::Result;

/// A finished run: the generated notes plus where they came from
#[derive(Debug, Serialize)]
pub struct NotesReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub model: String,
    pub notes: String,
}

/// Render the notes markdown for terminal display. Headings, bullets,
/// bold spans, and code spans get styled; styling drops away on its own
/// when stdout is not a terminal.
pub fn render_ansi(notes: &str) -> String {
    let bold_re = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    let code_re = Regex::new(r"`([^`]+)`").unwrap();

    let inline = |line: &str| -> String {
        let line = bold_re.replace_all(line, |caps: &regex::Captures| style(&caps[1]).bold().to_string());
        code_re
            .replace_all(&line, |caps: &regex::Captures| style(&caps[1]).yellow().to_string())
            .into_owned()
    };

    notes
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if let Some(heading) = line.strip_prefix("### ") {
                style(heading).bold().to_string()
            } else if let Some(heading) = line.strip_prefix("## ") {
                style(heading).bold().cyan().to_string()
            } else if let Some(heading) = line.strip_prefix("# ") {
                style(heading).bold().cyan().underlined().to_string()
            } else if let Some(rest) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
                let indent = &line[..line.len() - trimmed.len()];
                format!("{indent}{} {}", style("•").cyan(), inline(rest))
            } else {
                inline(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the notes verbatim as markdown
pub fn render_markdown(notes: &str) -> String {
    notes.to_string()
}

/// Render the full report as pretty-printed JSON
pub fn render_json(report: &NotesReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Pipe text to the platform clipboard utility
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let candidates: &[(&str, &[&str])] = if cfg!(target_os = "macos") {
        &[("pbcopy", &[])]
    } else {
        &[
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ]
    };

    for (cmd, args) in candidates {
        let spawned = Command::new(cmd)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let Ok(mut child) = spawned else {
            continue;
        };
        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(text.as_bytes())?;
        }
        if child.wait()?.success() {
            return Ok(());
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no clipboard utility found (pbcopy, wl-copy, xclip, xsel)",
    )
    .into())
}
