pub mod compile;
pub mod init;
pub mod lint;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every file below `dir` with the given extension, in path order
pub fn find_documents(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(extension))
        .collect();
    files.sort();
    files
}
