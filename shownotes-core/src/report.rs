// Report generation from classified episodes

use crate::category::Category;
use crate::model::{ClassificationResult, EpisodeReport, RunOutcome};
use serde::{Deserialize, Serialize};
use shownotes_scanner::Link;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Csv,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "csv" => Some(ReportFormat::Csv),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

pub const CSV_HEADERS: [&str; 3] = ["Link", "Episode #", "Category"];

/// Links ordered by display text.
pub fn sorted_links(links: &[Link]) -> Vec<&Link> {
    let mut sorted: Vec<&Link> = links.iter().collect();
    sorted.sort_by(|a, b| a.text.cmp(&b.text));
    sorted
}

/// Categorized listing: a header per category, then `text [url]` lines sorted by text.
pub fn generate_text_report(result: &ClassificationResult) -> String {
    let mut report = String::new();

    for category in Category::ALL {
        report.push_str(&format!("* {}:\n", category.heading()));
        let links = result.get(category);
        if links.is_empty() {
            report.push_str("    - nothing found\n");
            continue;
        }
        for link in sorted_links(links) {
            report.push_str(&format!("     - {} [{}]\n", link.text, link.url));
        }
    }

    report
}

/// Text listing for a whole run, either one listing per episode or a single
/// combined one. Failed episodes are listed at the end.
pub fn generate_run_text_report(outcome: &RunOutcome, aggregate: bool) -> String {
    let mut report = String::new();

    if aggregate {
        report.push_str(&format!(
            "# All episodes ({})\n\n",
            outcome
                .episodes
                .iter()
                .map(|e| e.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        report.push_str(&generate_text_report(&outcome.aggregate()));
    } else {
        for (idx, episode) in outcome.episodes.iter().enumerate() {
            if idx > 0 {
                report.push('\n');
            }
            report.push_str(&format!("# Episode {} [{}]\n\n", episode.label, episode.url));
            report.push_str(&generate_text_report(&episode.result));
        }
    }

    if !outcome.failures.is_empty() {
        report.push_str("\n# Failed episodes\n\n");
        for failure in &outcome.failures {
            report.push_str(&format!(
                "  [!] {} [{}]: {}\n",
                failure.label, failure.url, failure.error
            ));
        }
    }

    report
}

/// Spreadsheet hyperlink formula. Quotes inside a formula string are doubled.
pub fn hyperlink(url: &str, text: &str) -> String {
    format!(
        "=HYPERLINK(\"{}\", \"{}\")",
        url.replace('"', "\"\""),
        text.replace('"', "\"\"")
    )
}

/// One CSV row per link: link, episode reference and category label.
pub fn generate_csv_report(episodes: &[EpisodeReport]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for episode in episodes {
        let episode_ref = hyperlink(&episode.url, &episode.label);
        for (category, links) in episode.result.iter() {
            let label = category.label();
            for link in sorted_links(links) {
                writer.write_record([
                    hyperlink(&link.url, &link.text).as_str(),
                    episode_ref.as_str(),
                    label.as_str(),
                ])?;
            }
        }
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn generate_json_report(outcome: &RunOutcome) -> Result<String, ReportError> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "shownotes",
                "version": env!("CARGO_PKG_VERSION"),
                "format": "json"
            },
            "summary": {
                "episodes": outcome.episodes.len(),
                "failed_episodes": outcome.failures.len(),
                "total_links": outcome.episodes.iter().map(|e| e.result.total()).sum::<usize>()
            },
            "episodes": outcome.episodes,
            "failures": outcome.failures,
            "aggregate": outcome.aggregate()
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

/// Render `outcome` in `format`.
pub fn render(outcome: &RunOutcome, format: ReportFormat, aggregate: bool) -> Result<String, ReportError> {
    match format {
        ReportFormat::Text => Ok(generate_run_text_report(outcome, aggregate)),
        ReportFormat::Csv => generate_csv_report(&outcome.episodes),
        ReportFormat::Json => generate_json_report(outcome),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
