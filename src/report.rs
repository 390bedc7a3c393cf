// Result reporting module
// Renders per-file digest rows and the final verdict

use std::path::Path;

use colored::Colorize;

use crate::algorithm::Algorithm;
use crate::engine::{ComparisonOutcome, FileEntry};

/// Prints per-file digest rows as the engine produces them.
///
/// The column header is printed exactly once per run, tracked by the
/// `header_printed` field; the flag is run-scoped, never process-wide.
pub struct Reporter {
    quiet: bool,
    header_printed: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            header_printed: false,
        }
    }

    /// Emit one digest row; suppressed entirely in quiet mode
    pub fn digest_row(&mut self, path: &Path, algorithm: Algorithm, digest: &str) {
        if self.quiet {
            return;
        }
        if !self.header_printed {
            println!("{:<9}  {:<128}  {}", "Algorithm", "Digest", "File");
            self.header_printed = true;
        }
        println!("{:<9}  {:<128}  {}", algorithm.name(), digest, path.display());
    }

    /// Print the final verdict line, colorized by result
    pub fn verdict(&self, outcome: &ComparisonOutcome) {
        let line = verdict_line(outcome);
        if outcome.matched {
            println!("{}", line.green().bold());
        } else {
            println!("{}", line.red().bold());
        }
    }
}

/// Render the verdict string for an outcome
pub fn verdict_line(outcome: &ComparisonOutcome) -> String {
    match (outcome.matched, &outcome.expected) {
        (true, Some(_)) => "MATCH EXPECTED".to_string(),
        (true, None) => "MATCH".to_string(),
        (false, Some(expected)) => format!("MISMATCH, expected {}", expected),
        (false, None) => "MISMATCH".to_string(),
    }
}

/// Format the run result as JSON
pub fn to_json(
    outcome: &ComparisonOutcome,
    entries: &[FileEntry],
) -> Result<String, serde_json::Error> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        metadata: Metadata,
        verdict: &'a str,
        matched: bool,
        stopped_at: Algorithm,
        expected: &'a Option<String>,
        files: Vec<FileJson<'a>>,
    }

    #[derive(serde::Serialize)]
    struct Metadata {
        timestamp: String,
    }

    #[derive(serde::Serialize)]
    struct FileJson<'a> {
        path: String,
        digests: Vec<DigestJson<'a>>,
    }

    #[derive(serde::Serialize)]
    struct DigestJson<'a> {
        algorithm: Algorithm,
        digest: &'a str,
    }

    let verdict = if outcome.matched { "MATCH" } else { "MISMATCH" };

    let files = entries
        .iter()
        .map(|entry| {
            // Report digests in canonical order so output is stable
            let digests = Algorithm::ALL
                .iter()
                .filter_map(|&algorithm| {
                    entry.digests.get(&algorithm).map(|digest| DigestJson {
                        algorithm,
                        digest: digest.as_str(),
                    })
                })
                .collect();
            FileJson {
                path: entry.path.display().to_string(),
                digests,
            }
        })
        .collect();

    let output = JsonOutput {
        metadata: Metadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
        verdict,
        matched: outcome.matched,
        stopped_at: outcome.stopped_at,
        expected: &outcome.expected,
        files,
    };

    serde_json::to_string_pretty(&output)
}
