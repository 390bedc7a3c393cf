// Algorithm set and resolver
// Expands user selections and infers algorithms from expected digest lengths

use std::fmt;

use crate::error::CompareError;

/// Supported hash algorithms. The set is closed: digest hex lengths are
/// pairwise distinct, which expected-mode inference relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// Canonical expansion order for the "all" selection, strongest first.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Sha512,
        Algorithm::Sha384,
        Algorithm::Sha256,
        Algorithm::Sha1,
        Algorithm::Md5,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha384 => "SHA384",
            Algorithm::Sha512 => "SHA512",
        }
    }

    /// Length of the hex-encoded digest this algorithm produces
    pub fn hex_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha256 => 64,
            Algorithm::Sha384 => 96,
            Algorithm::Sha512 => 128,
        }
    }

    /// Infer the algorithm from a hex digest's character length
    pub fn from_hex_len(length: usize) -> Option<Algorithm> {
        Algorithm::ALL.iter().copied().find(|a| a.hex_len() == length)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the user's `--algorithms` selection. `All` is a sentinel
/// that expands to the full set in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AlgorithmSelection {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    All,
}

impl AlgorithmSelection {
    fn as_algorithm(&self) -> Option<Algorithm> {
        match self {
            AlgorithmSelection::Md5 => Some(Algorithm::Md5),
            AlgorithmSelection::Sha1 => Some(Algorithm::Sha1),
            AlgorithmSelection::Sha256 => Some(Algorithm::Sha256),
            AlgorithmSelection::Sha384 => Some(Algorithm::Sha384),
            AlgorithmSelection::Sha512 => Some(Algorithm::Sha512),
            AlgorithmSelection::All => None,
        }
    }
}

/// Expand a user selection into an ordered, deduplicated algorithm list.
///
/// Nothing selected means `[SHA512]`. The `all` sentinel expands to the
/// full set strongest-first. Duplicates are dropped, first occurrence wins.
pub fn resolve(selection: Option<&[AlgorithmSelection]>) -> Vec<Algorithm> {
    let selection = match selection {
        Some(s) if !s.is_empty() => s,
        _ => return vec![Algorithm::Sha512],
    };

    let mut resolved = Vec::new();
    for entry in selection {
        match entry.as_algorithm() {
            Some(algorithm) => {
                if !resolved.contains(&algorithm) {
                    resolved.push(algorithm);
                }
            }
            None => {
                for algorithm in Algorithm::ALL {
                    if !resolved.contains(&algorithm) {
                        resolved.push(algorithm);
                    }
                }
            }
        }
    }
    resolved
}

/// Infer the single algorithm for expected-mode from the digest's length
pub fn infer_from_expected(expected: &str) -> Result<Algorithm, CompareError> {
    Algorithm::from_hex_len(expected.len())
        .ok_or(CompareError::UnsupportedDigestLength { length: expected.len() })
}
