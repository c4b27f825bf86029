/// Folder scanning
///
/// Lists the immediate children of a folder and keeps the regular files
/// whose extension is in the configured allow-list. Subfolders are not
/// entered.
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{ScanOptions, SortOrder};
use crate::error::ScanError;

/// Scan `folder` for images, returning absolute paths in display order
pub fn scan(folder: &Path, options: &ScanOptions) -> Result<Vec<String>, ScanError> {
    if !folder.exists() {
        return Err(ScanError::NotFound(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(ScanError::NotADirectory(folder.to_path_buf()));
    }

    let folder = std::path::absolute(folder).map_err(|source| ScanError::Io {
        path: folder.to_path_buf(),
        source,
    })?;

    tracing::debug!("Scanning folder: {}", folder.display());

    let mut images: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(&folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // The folder itself failing is fatal, a single entry is not
                if err.depth() == 0 {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    return Err(ScanError::Io {
                        path: folder.clone(),
                        source,
                    });
                }
                tracing::warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if options.extensions.matches(path) {
            images.push(path.to_path_buf());
        }
    }

    if options.sort == SortOrder::Name {
        images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    tracing::info!("Found {} images in {}", images.len(), folder.display());

    Ok(images
        .into_iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect())
}

/// File name of an identifier, for display
pub fn display_name(identifier: &str) -> String {
    Path::new(identifier)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| identifier.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtensionSet;
    use std::fs;
    use tempfile::tempdir;

    fn names(paths: &[String]) -> Vec<String> {
        paths.iter().map(|p| display_name(p)).collect()
    }

    #[test]
    fn test_filters_by_extension_case_insensitively() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.txt", "c.jpg", "d.GIF"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let images = scan(dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(names(&images), vec!["a.png", "c.jpg", "d.GIF"]);
        assert!(images.iter().all(|p| Path::new(p).is_absolute()));
    }

    #[test]
    fn test_sorts_by_file_name() {
        let dir = tempdir().unwrap();
        for name in ["zebra.bmp", "apple.jpeg", "mango.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let images = scan(dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(names(&images), vec!["apple.jpeg", "mango.png", "zebra.bmp"]);
    }

    #[test]
    fn test_unsorted_keeps_every_match() {
        let dir = tempdir().unwrap();
        for name in ["b.png", "a.png", "notes.md"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let options = ScanOptions {
            sort: SortOrder::Unsorted,
            ..ScanOptions::default()
        };

        let mut found = names(&scan(dir.path(), &options).unwrap());
        found.sort();

        assert_eq!(found, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_does_not_recurse_or_list_folders() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("inner.png"), b"x").unwrap();
        fs::write(dir.path().join("top.png"), b"x").unwrap();

        let images = scan(dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(names(&images), vec!["top.png"]);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.webp"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let options = ScanOptions {
            extensions: ExtensionSet::new(["webp"]),
            ..ScanOptions::default()
        };

        let images = scan(dir.path(), &options).unwrap();

        assert_eq!(names(&images), vec!["b.webp"]);
    }

    #[test]
    fn test_missing_folder_and_plain_file_are_errors() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.png");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            scan(&dir.path().join("missing"), &ScanOptions::default()),
            Err(ScanError::NotFound(_))
        ));
        assert!(matches!(
            scan(&file, &ScanOptions::default()),
            Err(ScanError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_empty_folder_yields_nothing() {
        let dir = tempdir().unwrap();
        assert!(scan(dir.path(), &ScanOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("/photos/cat.png"), "cat.png");
    }
}
