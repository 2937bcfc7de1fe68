use std::path::{Path, PathBuf};

use crate::{error::Result, ingest::SourceKind};

/// Recursively walk a directory and discover resume files of a supported
/// kind (txt, pdf, csv).
///
/// Skips hidden files/directories (names starting with `.`). Results are
/// sorted by path so ingestion order is deterministic regardless of the
/// directory iteration order the OS hands back.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    let canonical_root = root.canonicalize()?;
    let mut results = Vec::new();
    walk_dir(&canonical_root, root, &mut results)?;
    results.sort();
    Ok(results)
}

fn walk_dir(root: &Path, current: &Path, results: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        // Skip hidden files and directories.
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dir(root, &entry.path(), results)?;
        } else if file_type.is_symlink() {
            let resolved = match entry.path().canonicalize() {
                Ok(p) => p,
                Err(_) => continue, // Skip broken symlinks
            };
            // Skip symlinks that point back into or above the root
            // (cycle prevention).
            if resolved.starts_with(root) && resolved.is_dir() {
                continue;
            }
            if resolved.is_file() && SourceKind::from_path(&resolved).is_some() {
                results.push(entry.path());
            }
        } else if file_type.is_file() && SourceKind::from_path(&entry.path()).is_some() {
            results.push(entry.path());
        }
    }

    Ok(())
}
