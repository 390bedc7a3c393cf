// Comparison engine module
// Runs the algorithm-outer, file-inner digest loop with early-exit policies

use std::collections::HashMap;
use std::path::PathBuf;

use crate::algorithm::Algorithm;
use crate::error::CompareError;
use crate::hasher::HashComputer;
use crate::report::Reporter;
use crate::validate::RunConfiguration;

/// One input file and the digests computed for it so far.
/// An algorithm is absent from `digests` until its pass reaches the file;
/// algorithms skipped by an early exit never appear.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub digests: HashMap<Algorithm, String>,
}

impl FileEntry {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            digests: HashMap::new(),
        }
    }
}

/// Final result of a comparison run
#[derive(Debug, Clone, serde::Serialize)]
pub struct ComparisonOutcome {
    pub matched: bool,
    /// The algorithm whose pass decided the run: the first mismatching
    /// one, the first matching one under fast mode, or the last one.
    pub stopped_at: Algorithm,
    pub expected: Option<String>,
}

/// Engine for comparing file digests across one or more algorithms
pub struct ComparisonEngine {
    config: RunConfiguration,
    entries: Vec<FileEntry>,
    computer: HashComputer,
}

impl ComparisonEngine {
    pub fn new(config: RunConfiguration) -> Self {
        let entries = config.files.iter().cloned().map(FileEntry::new).collect();
        Self {
            config,
            entries,
            computer: HashComputer::new().show_progress(true),
        }
    }

    pub fn with_computer(config: RunConfiguration, computer: HashComputer) -> Self {
        let entries = config.files.iter().cloned().map(FileEntry::new).collect();
        Self {
            config,
            entries,
            computer,
        }
    }

    /// Per-file digest table, populated as passes complete
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Run the comparison.
    ///
    /// For each algorithm in resolved order, every file is hashed (rows are
    /// reported as digests are produced) and then the pass is judged as a
    /// whole. A mismatching pass stops the run; a matching pass stops it
    /// too when fast mode is set. An I/O failure while hashing is fatal and
    /// aborts without a verdict.
    pub fn run(&mut self, reporter: &mut Reporter) -> Result<ComparisonOutcome, CompareError> {
        let algorithms = self.config.algorithms.clone();
        for algorithm in algorithms {
            for entry in &mut self.entries {
                let digest = self.computer.compute(&entry.path, algorithm)?;
                reporter.digest_row(&entry.path, algorithm, &digest);
                entry.digests.insert(algorithm, digest);
            }

            let matched = match &self.config.expected {
                Some(expected) => self
                    .entries
                    .iter()
                    .all(|e| digests_match(&e.digests[&algorithm], expected)),
                None => {
                    let source = &self.entries[0].digests[&algorithm];
                    self.entries[1..]
                        .iter()
                        .all(|e| digests_match(&e.digests[&algorithm], source))
                }
            };

            if !matched || self.config.fast {
                return Ok(self.outcome(matched, algorithm));
            }
        }

        // Every algorithm matched and fast mode was off
        let last = *self
            .config
            .algorithms
            .last()
            .expect("validated configuration has at least one algorithm");
        Ok(self.outcome(true, last))
    }

    fn outcome(&self, matched: bool, stopped_at: Algorithm) -> ComparisonOutcome {
        ComparisonOutcome {
            matched,
            stopped_at,
            expected: self.config.expected.clone(),
        }
    }
}

/// Case-insensitive hex digest comparison.
///
/// Folds over every byte pair so the cost does not depend on where the
/// first difference occurs.
fn digests_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| {
            acc | (x.to_ascii_lowercase() ^ y.to_ascii_lowercase())
        })
        == 0
}

#[cfg(test)]
mod tests {
    use super::digests_match;

    #[test]
    fn digest_comparison_ignores_hex_case() {
        assert!(digests_match(
            "D41D8CD98F00B204E9800998ECF8427E",
            "d41d8cd98f00b204e9800998ecf8427e"
        ));
    }

    #[test]
    fn digest_comparison_rejects_length_mismatch() {
        assert!(!digests_match("abc", "abcd"));
    }

    #[test]
    fn digest_comparison_rejects_different_digests() {
        assert!(!digests_match(
            "d41d8cd98f00b204e9800998ecf8427e",
            "d41d8cd98f00b204e9800998ecf8427f"
        ));
    }
}
