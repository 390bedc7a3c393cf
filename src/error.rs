// Centralized error handling module
// Provides error types with context for validation and hashing failures

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::algorithm::Algorithm;

/// A single offending input path, collected during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathIssue {
    /// The path does not exist on the filesystem
    NotFound { path: PathBuf },
    /// The path exists but is a directory, not a regular file
    IsDirectory { path: PathBuf },
}

impl fmt::Display for PathIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathIssue::NotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            PathIssue::IsDirectory { path } => {
                write!(f, "Path is a directory, not a file: {}", path.display())
            }
        }
    }
}

/// Main error type for the comparison tool
/// Provides context-rich error messages with file paths and operations
#[derive(Debug)]
pub enum CompareError {
    /// Fewer files than the selected mode requires
    InsufficientFiles { found: usize, required: usize },

    /// One or more input paths are missing or not regular files.
    /// Every offending path is collected before validation aborts.
    InvalidPaths { issues: Vec<PathIssue> },

    /// An expected digest was combined with an explicit algorithm selection
    ConflictingModes,

    /// The expected digest's length matches no supported algorithm
    UnsupportedDigestLength { length: usize },

    /// I/O failure while hashing a file; fatal, aborts the run
    HashComputation {
        path: Option<PathBuf>,
        operation: String,
        source: io::Error,
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompareError::InsufficientFiles { found, required } => {
                write!(f, "Not enough files: got {}, need at least {}\n", found, required)?;
                write!(
                    f,
                    "Suggestion: Pass at least two files to compare against each other, \
                     or one file together with --expected"
                )
            }
            CompareError::InvalidPaths { issues } => {
                for issue in issues {
                    writeln!(f, "{}", issue)?;
                }
                write!(f, "Suggestion: Check that every path points to an existing regular file")
            }
            CompareError::ConflictingModes => {
                write!(f, "--expected cannot be combined with an explicit algorithm selection\n")?;
                write!(
                    f,
                    "Suggestion: The algorithm is inferred from the expected digest's length; \
                     drop --algorithms"
                )
            }
            CompareError::UnsupportedDigestLength { length } => {
                writeln!(f, "No supported algorithm produces a {}-character digest", length)?;
                writeln!(f, "Supported digest lengths:")?;
                for algorithm in Algorithm::ALL {
                    writeln!(f, "  {:<7} {}", algorithm.name(), algorithm.hex_len())?;
                }
                write!(f, "Suggestion: Check that the expected digest was copied in full")
            }
            CompareError::HashComputation { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} file {}: {}\n", operation, p.display(), source)?;
                } else {
                    write!(f, "I/O error while {}: {}\n", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and that the file still exists")
            }
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::HashComputation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl CompareError {
    /// Create a HashComputation error with context about the operation and path
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        CompareError::HashComputation {
            path,
            operation: operation.to_string(),
            source: err,
        }
    }
}
