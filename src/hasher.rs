// Digest computation module
// Streams a file through the selected hash algorithm and returns a hex digest

use std::fs::File;
use std::io::{IsTerminal, Read};
use std::path::Path;

use md5::{Digest as Md5Digest, Md5};
use memmap2::Mmap;
use sha1::{Digest as Sha1Digest, Sha1};
use sha2::{Digest as Sha2Digest, Sha256, Sha384, Sha512};

use crate::algorithm::Algorithm;
use crate::error::CompareError;

/// Trait for hash algorithm implementations
pub trait Hasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the result
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

struct Md5Wrapper(Md5);

impl Hasher for Md5Wrapper {
    fn update(&mut self, data: &[u8]) {
        Md5Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Md5Digest::finalize(self.0).to_vec()
    }
}

struct Sha1Wrapper(Sha1);

impl Hasher for Sha1Wrapper {
    fn update(&mut self, data: &[u8]) {
        Sha1Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Sha1Digest::finalize(self.0).to_vec()
    }
}

struct Sha256Wrapper(Sha256);

impl Hasher for Sha256Wrapper {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Sha2Digest::finalize(self.0).to_vec()
    }
}

struct Sha384Wrapper(Sha384);

impl Hasher for Sha384Wrapper {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Sha2Digest::finalize(self.0).to_vec()
    }
}

struct Sha512Wrapper(Sha512);

impl Hasher for Sha512Wrapper {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Sha2Digest::finalize(self.0).to_vec()
    }
}

/// Get a fresh hasher instance for the given algorithm
pub fn hasher_for(algorithm: Algorithm) -> Box<dyn Hasher> {
    match algorithm {
        Algorithm::Md5 => Box::new(Md5Wrapper(Md5Digest::new())),
        Algorithm::Sha1 => Box::new(Sha1Wrapper(Sha1Digest::new())),
        Algorithm::Sha256 => Box::new(Sha256Wrapper(Sha2Digest::new())),
        Algorithm::Sha384 => Box::new(Sha384Wrapper(Sha2Digest::new())),
        Algorithm::Sha512 => Box::new(Sha512Wrapper(Sha2Digest::new())),
    }
}

// Constants for memory mapping
const MMAP_THRESHOLD: u64 = 2 * 1024 * 1024 * 1024; // 2GB

// Constants for progress bar
const PROGRESS_BAR_THRESHOLD: u64 = 1024 * 1024 * 1024; // 1GB
const PROGRESS_UPDATE_INTERVAL_MS: u64 = 100; // 10 times per second

/// Hash computer with streaming I/O
///
/// Files smaller than 2GB are memory-mapped to avoid kernel-to-userspace
/// copy overhead; larger (or empty) files fall back to buffered reading.
pub struct HashComputer {
    buffer_size: usize,
    show_progress: bool,
}

impl HashComputer {
    /// Create a new HashComputer with default buffer size (1MB)
    pub fn new() -> Self {
        Self {
            buffer_size: 1024 * 1024,
            show_progress: false,
        }
    }

    /// Create a new HashComputer with custom buffer size
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size,
            show_progress: false,
        }
    }

    /// Enable a progress bar for files larger than 1GB when stdout is a TTY
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Compute the hex digest of a file under the given algorithm
    ///
    /// # Safety
    ///
    /// Memory mapping assumes the file is not modified by other processes
    /// during hashing; a concurrent write can make the digest inconsistent.
    pub fn compute(&self, path: &Path, algorithm: Algorithm) -> Result<String, CompareError> {
        let mut hasher = hasher_for(algorithm);

        let file = File::open(path)
            .map_err(|e| CompareError::from_io_error(e, "reading", Some(path.to_path_buf())))?;

        let file_size = file
            .metadata()
            .map_err(|e| {
                CompareError::from_io_error(e, "reading metadata", Some(path.to_path_buf()))
            })?
            .len();

        let should_show_progress = self.show_progress
            && file_size > PROGRESS_BAR_THRESHOLD
            && std::io::stdout().is_terminal();

        if file_size > 0 && file_size < MMAP_THRESHOLD {
            match unsafe { Mmap::map(&file) } {
                Ok(mmap) => {
                    // Progress bar not shown for mmap as it's very fast
                    hasher.update(&mmap[..]);
                }
                Err(_) => {
                    // Fall back to buffered reading if mmap fails
                    if should_show_progress {
                        self.hash_with_buffered_io_progress(&mut hasher, file, path, file_size)?;
                    } else {
                        self.hash_with_buffered_io(&mut hasher, file, path)?;
                    }
                }
            }
        } else if should_show_progress {
            self.hash_with_buffered_io_progress(&mut hasher, file, path, file_size)?;
        } else {
            self.hash_with_buffered_io(&mut hasher, file, path)?;
        }

        Ok(bytes_to_hex(&hasher.finalize()))
    }

    /// Helper method to hash a file using buffered I/O
    fn hash_with_buffered_io(
        &self,
        hasher: &mut Box<dyn Hasher>,
        mut file: File,
        path: &Path,
    ) -> Result<(), CompareError> {
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let bytes_read = file.read(&mut buffer).map_err(|e| {
                CompareError::from_io_error(e, "reading", Some(path.to_path_buf()))
            })?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(())
    }

    /// Helper method to hash a file using buffered I/O with progress bar
    fn hash_with_buffered_io_progress(
        &self,
        hasher: &mut Box<dyn Hasher>,
        mut file: File,
        path: &Path,
        file_size: u64,
    ) -> Result<(), CompareError> {
        use indicatif::{ProgressBar, ProgressStyle};
        use std::time::{Duration, Instant};

        let pb = ProgressBar::new(file_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(format!("Hashing: {}", path.display()));

        let mut buffer = vec![0u8; self.buffer_size];
        let mut bytes_processed = 0u64;
        let mut last_update = Instant::now();
        let update_interval = Duration::from_millis(PROGRESS_UPDATE_INTERVAL_MS);

        loop {
            let bytes_read = file.read(&mut buffer).map_err(|e| {
                pb.finish_and_clear();
                CompareError::from_io_error(e, "reading", Some(path.to_path_buf()))
            })?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
            bytes_processed += bytes_read as u64;

            let now = Instant::now();
            if now.duration_since(last_update) >= update_interval {
                pb.set_position(bytes_processed);
                last_update = now;
            }
        }

        pb.finish_and_clear();

        Ok(())
    }
}

impl Default for HashComputer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert bytes to hexadecimal string
fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
