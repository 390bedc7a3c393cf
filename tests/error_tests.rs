// Tests for error display and context

use std::path::PathBuf;

use hashmatch::error::{CompareError, PathIssue};

#[test]
fn test_insufficient_files_message() {
    let err = CompareError::InsufficientFiles {
        found: 1,
        required: 2,
    };
    let message = err.to_string();
    assert!(message.contains("got 1"));
    assert!(message.contains("need at least 2"));
    assert!(message.contains("Suggestion:"));
}

#[test]
fn test_invalid_paths_lists_every_issue() {
    let err = CompareError::InvalidPaths {
        issues: vec![
            PathIssue::NotFound {
                path: PathBuf::from("gone.txt"),
            },
            PathIssue::IsDirectory {
                path: PathBuf::from("some_dir"),
            },
        ],
    };
    let message = err.to_string();
    assert!(message.contains("File not found: gone.txt"));
    assert!(message.contains("Path is a directory, not a file: some_dir"));
}

#[test]
fn test_conflicting_modes_message() {
    let message = CompareError::ConflictingModes.to_string();
    assert!(message.contains("--expected"));
    assert!(message.contains("algorithm"));
}

#[test]
fn test_hash_computation_preserves_source() {
    use std::error::Error;

    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = CompareError::from_io_error(io_err, "reading", Some(PathBuf::from("a.txt")));

    assert!(err.source().is_some());
    let message = err.to_string();
    assert!(message.contains("reading"));
    assert!(message.contains("a.txt"));
}
