//! File enumeration and directory fingerprinting.

mod fingerprint;
mod pattern;
mod scanner;

pub use fingerprint::{path_hash, query_directory, DirectoryFingerprint};
pub use pattern::{wildcard_match, FilePattern};
pub use scanner::{scan_directory, DirectoryScanner, FileInfo, ScannedFile};
