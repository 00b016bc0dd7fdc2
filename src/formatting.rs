use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use seolens_lib::config::DisplaySettings;
use seolens_lib::output::{ErrorOutput, ScoreCard, SeoOutput};
use seolens_lib::{EntryValue, KeyValueEntry, SeoError};

use crate::cli::OutputFormat;

/// Knobs for the human-readable renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub decimal_places: u32,
    pub bar_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        DisplaySettings::default().into()
    }
}

impl From<DisplaySettings> for RenderOptions {
    fn from(display: DisplaySettings) -> Self {
        Self {
            decimal_places: display.decimal_places,
            bar_width: display.bar_width,
        }
    }
}

pub fn write_output(
    body: &SeoOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
    options: RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref(), options)?,
    };
    Ok(())
}

pub fn render_error(
    err: SeoError,
    format: OutputFormat,
    output: Option<PathBuf>,
    options: RenderOptions,
) -> ExitCode {
    let payload = SeoOutput::Error(ErrorOutput::new(err.to_payload()));

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref(), options) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

pub fn exit_code_for(body: &SeoOutput) -> ExitCode {
    match body {
        SeoOutput::Analyze(_) => ExitCode::SUCCESS,
        SeoOutput::Error(_) => ExitCode::from(2),
    }
}

fn write_json_output(
    body: &SeoOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_pretty_output(
    body: &SeoOutput,
    output: Option<&Path>,
    options: RenderOptions,
) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true, options);
        println!("{content}");
        return Ok(());
    }

    // Files and pipes keep the JSON shape.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

pub fn format_pretty(body: &SeoOutput, colorize: bool, options: RenderOptions) -> String {
    match body {
        SeoOutput::Analyze(out) => {
            let mut buf = String::new();
            let header = color("[SEO]", "34", colorize);
            writeln!(buf, "{} {}", header, out.url).ok();
            if let Some(page_url) = &out.page_url {
                writeln!(buf, "Analysed page: {}", page_url).ok();
            }

            writeln!(buf, "Scores:").ok();
            for card in out.scores.cards() {
                writeln!(buf, "{}", format_card(card, colorize, options.bar_width)).ok();
            }

            if !out.on_page_results.is_empty() {
                writeln!(buf, "Onpage Results:").ok();
                let width = label_width(&out.on_page_results);
                for entry in &out.on_page_results {
                    writeln!(
                        buf,
                        "- {:<width$}  {}",
                        entry.title(),
                        entry.rounded_value(options.decimal_places)
                    )
                    .ok();
                }
            }

            if !out.checks.is_empty() {
                writeln!(buf, "Checks:").ok();
                let width = label_width(&out.checks);
                for entry in &out.checks {
                    writeln!(
                        buf,
                        "- {:<width$}  {}",
                        entry.title(),
                        format_check(&entry.value, colorize)
                    )
                    .ok();
                }
            }
            buf
        }
        SeoOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn format_card(card: &ScoreCard, colorize: bool, bar_width: usize) -> String {
    let code = score_color_code(card.percent);
    let bar = color(&render_bar(card.percent, bar_width), code, colorize);
    let value = color(&format!("{}%", card.value), code, colorize);
    format!("- {:<15} {} {}", card.title, bar, value)
}

/// Fill `width` cells in proportion to `percent` (already within [0, 100]).
fn render_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn format_check(value: &EntryValue, colorize: bool) -> String {
    match value.as_bool() {
        Some(true) => color("True", "32", colorize),
        Some(false) => color("False", "31", colorize),
        None => value.to_display_string(),
    }
}

fn label_width(entries: &[KeyValueEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.title().chars().count())
        .max()
        .unwrap_or(0)
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn score_color_code(percent: f64) -> &'static str {
    if percent >= 90.0 {
        "32" // green
    } else if percent >= 50.0 {
        "33" // yellow
    } else {
        "31" // red
    }
}
