//! Directory scanning by extension glob.

use crate::domain::DirectoryReport;
use crate::error::Result;
use crate::tokenize::TokenCounter;
use std::path::Path;

pub mod scanner;

pub use scanner::DirectoryScanner;

/// Scan `root` with default settings.
pub fn scan_directory<P: AsRef<Path>>(root: P, counter: &dyn TokenCounter) -> Result<DirectoryReport> {
    DirectoryScanner::new(root.as_ref().to_path_buf()).scan(counter)
}
