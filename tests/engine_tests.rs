// Tests for the comparison engine

use std::fs;
use std::path::PathBuf;

use hashmatch::algorithm::Algorithm;
use hashmatch::engine::ComparisonEngine;
use hashmatch::error::CompareError;
use hashmatch::hasher::HashComputer;
use hashmatch::report::Reporter;
use hashmatch::validate::RunConfiguration;
use tempfile::tempdir;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config(files: Vec<PathBuf>, algorithms: Vec<Algorithm>) -> RunConfiguration {
    RunConfiguration {
        files,
        algorithms,
        expected: None,
        quiet: true,
        fast: false,
    }
}

#[test]
fn test_identical_files_match_under_default() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"same bytes");
    let b = write_file(&dir, "b.txt", b"same bytes");

    let mut engine = ComparisonEngine::new(config(vec![a, b], vec![Algorithm::Sha512]));
    let outcome = engine.run(&mut Reporter::new(true)).unwrap();

    assert!(outcome.matched);
    assert_eq!(outcome.stopped_at, Algorithm::Sha512);

    // Exactly one digest per file, under SHA512 only
    for entry in engine.entries() {
        assert_eq!(entry.digests.len(), 1);
        assert!(entry.digests.contains_key(&Algorithm::Sha512));
    }
}

#[test]
fn test_identical_files_match_under_all_algorithms() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"payload");
    let b = write_file(&dir, "b.txt", b"payload");
    let c = write_file(&dir, "c.txt", b"payload");

    let mut engine = ComparisonEngine::new(config(vec![a, b, c], Algorithm::ALL.to_vec()));
    let outcome = engine.run(&mut Reporter::new(true)).unwrap();

    assert!(outcome.matched);
    // Non-fast run exhausts the list; stopped-at is the last algorithm
    assert_eq!(outcome.stopped_at, Algorithm::Md5);
    for entry in engine.entries() {
        assert_eq!(entry.digests.len(), Algorithm::ALL.len());
    }
}

#[test]
fn test_differing_files_mismatch_and_stop_at_first_algorithm() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"one");
    let b = write_file(&dir, "b.txt", b"two");

    let mut engine = ComparisonEngine::new(config(
        vec![a, b],
        vec![Algorithm::Sha256, Algorithm::Sha1],
    ));
    let outcome = engine.run(&mut Reporter::new(true)).unwrap();

    assert!(!outcome.matched);
    assert_eq!(outcome.stopped_at, Algorithm::Sha256);

    // No algorithm after the mismatching one was computed
    for entry in engine.entries() {
        assert!(entry.digests.contains_key(&Algorithm::Sha256));
        assert!(!entry.digests.contains_key(&Algorithm::Sha1));
    }
}

#[test]
fn test_fast_mode_stops_after_first_matching_algorithm() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"payload");
    let b = write_file(&dir, "b.txt", b"payload");

    let mut cfg = config(vec![a, b], vec![Algorithm::Sha512, Algorithm::Md5]);
    cfg.fast = true;

    let mut engine = ComparisonEngine::new(cfg);
    let outcome = engine.run(&mut Reporter::new(true)).unwrap();

    assert!(outcome.matched);
    assert_eq!(outcome.stopped_at, Algorithm::Sha512);
    for entry in engine.entries() {
        assert!(entry.digests.contains_key(&Algorithm::Sha512));
        assert!(!entry.digests.contains_key(&Algorithm::Md5));
    }
}

#[test]
fn test_expected_mode_match_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"");
    let b = write_file(&dir, "b.txt", b"");

    let mut cfg = config(vec![a, b], vec![Algorithm::Md5]);
    // Uppercase MD5 of the empty input
    cfg.expected = Some("D41D8CD98F00B204E9800998ECF8427E".to_string());

    let mut engine = ComparisonEngine::new(cfg);
    let outcome = engine.run(&mut Reporter::new(true)).unwrap();

    assert!(outcome.matched);
    assert_eq!(outcome.stopped_at, Algorithm::Md5);
}

#[test]
fn test_expected_mode_mismatch_still_hashes_every_file() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"not empty");
    let b = write_file(&dir, "b.txt", b"also not empty");

    let mut cfg = config(vec![a, b], vec![Algorithm::Md5]);
    cfg.expected = Some("d41d8cd98f00b204e9800998ecf8427e".to_string());

    let mut engine = ComparisonEngine::new(cfg);
    let outcome = engine.run(&mut Reporter::new(true)).unwrap();

    assert!(!outcome.matched);
    assert_eq!(
        outcome.expected.as_deref(),
        Some("d41d8cd98f00b204e9800998ecf8427e")
    );
    // The file loop does not short-circuit within an algorithm pass
    for entry in engine.entries() {
        assert!(entry.digests.contains_key(&Algorithm::Md5));
    }
}

#[test]
fn test_single_mismatching_file_fails_expected_mode() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"");
    let b = write_file(&dir, "b.txt", b"different");

    let mut cfg = config(vec![a, b], vec![Algorithm::Md5]);
    cfg.expected = Some("d41d8cd98f00b204e9800998ecf8427e".to_string());

    let mut engine = ComparisonEngine::new(cfg);
    let outcome = engine.run(&mut Reporter::new(true)).unwrap();

    assert!(!outcome.matched);
}

#[test]
fn test_repeated_runs_are_idempotent() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"stable content");
    let b = write_file(&dir, "b.txt", b"stable content");

    let cfg = config(vec![a, b], vec![Algorithm::Sha256]);

    let mut first = ComparisonEngine::new(cfg.clone());
    let first_outcome = first.run(&mut Reporter::new(true)).unwrap();

    let mut second = ComparisonEngine::with_computer(cfg, HashComputer::new());
    let second_outcome = second.run(&mut Reporter::new(true)).unwrap();

    assert_eq!(first_outcome.matched, second_outcome.matched);
    assert_eq!(first_outcome.stopped_at, second_outcome.stopped_at);
    for (x, y) in first.entries().iter().zip(second.entries()) {
        assert_eq!(x.digests, y.digests);
    }
}

#[test]
fn test_vanished_file_aborts_the_run() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", b"content");
    // Passed validation, then deleted before hashing (race)
    let ghost = dir.path().join("ghost.txt");

    let mut engine = ComparisonEngine::new(config(vec![a, ghost], vec![Algorithm::Sha256]));
    let err = engine.run(&mut Reporter::new(true)).unwrap_err();

    assert!(matches!(err, CompareError::HashComputation { .. }));
}
