// Library module for hashmatch
// Re-exports modules for use in integration tests and external crates

pub mod algorithm;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod report;
pub mod validate;

// Re-export commonly used types for convenience
pub use algorithm::{Algorithm, AlgorithmSelection};
pub use engine::{ComparisonEngine, ComparisonOutcome, FileEntry};
pub use error::{CompareError, PathIssue};
pub use hasher::{HashComputer, Hasher};
pub use report::Reporter;
pub use validate::{validate, RunConfiguration};
