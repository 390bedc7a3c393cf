// Input validation module
// Pre-flight checks on files, algorithm selection, and expected-digest mode

use std::path::PathBuf;

use crate::algorithm::{self, Algorithm, AlgorithmSelection};
use crate::error::{CompareError, PathIssue};

/// Immutable configuration for one comparison run.
/// Produced by [`validate`]; no hashing has happened yet when it exists.
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    /// Input order is preserved; the first file is the comparison source
    /// unless an expected digest is set.
    pub files: Vec<PathBuf>,
    /// Non-empty, duplicate-free, resolved order. Exactly one entry in
    /// expected-mode.
    pub algorithms: Vec<Algorithm>,
    pub expected: Option<String>,
    pub quiet: bool,
    pub fast: bool,
}

impl RunConfiguration {
    pub fn expected_mode(&self) -> bool {
        self.expected.is_some()
    }
}

/// Validate inputs and produce a [`RunConfiguration`].
///
/// Checks run in a fixed order: file cardinality for the selected mode,
/// then path existence/type (every offending path is collected before
/// failing), then the expected/explicit-algorithm conflict, then
/// expected-digest length inference.
pub fn validate(
    files: Vec<PathBuf>,
    selection: Option<Vec<AlgorithmSelection>>,
    expected: Option<String>,
    quiet: bool,
    fast: bool,
) -> Result<RunConfiguration, CompareError> {
    let required = if expected.is_some() { 1 } else { 2 };
    if files.len() < required {
        return Err(CompareError::InsufficientFiles {
            found: files.len(),
            required,
        });
    }

    let mut issues = Vec::new();
    for path in &files {
        if !path.exists() {
            issues.push(PathIssue::NotFound { path: path.clone() });
        } else if !path.is_file() {
            issues.push(PathIssue::IsDirectory { path: path.clone() });
        }
    }
    if !issues.is_empty() {
        return Err(CompareError::InvalidPaths { issues });
    }

    if expected.is_some() && selection.is_some() {
        return Err(CompareError::ConflictingModes);
    }

    let algorithms = match &expected {
        Some(digest) => vec![algorithm::infer_from_expected(digest)?],
        None => algorithm::resolve(selection.as_deref()),
    };

    Ok(RunConfiguration {
        files,
        algorithms,
        expected,
        quiet,
        fast,
    })
}
