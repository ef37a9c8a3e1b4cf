use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::PersistError;

/// Read a whole JSON document.
///
/// - Missing file → `Ok(None)`
/// - Empty or whitespace-only file → `Ok(None)`
/// - Unreadable or malformed → `Err`
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No file found");
            return Ok(None);
        }
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| PersistError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a whole JSON document, replacing any previous contents.
///
/// Parent directories are created as needed. The document goes to a
/// temporary sibling first and is renamed over the destination, so readers
/// never observe a half-written file.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let body = serde_json::to_vec_pretty(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = temp_sibling(path);
    let write_temp = || -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        file.write_all(&body)?;
        file.sync_all()
    };

    if let Err(e) = write_temp() {
        let _ = std::fs::remove_file(&temp_path);
        return Err(io_err(e));
    }

    // On Windows, rename fails if destination exists
    #[cfg(windows)]
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(io_err(e));
        }
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(io_err(e));
    }

    tracing::debug!(path = %path.display(), bytes = body.len(), "Saved JSON document");
    Ok(())
}

/// Unpredictable temp name next to `path` (same filesystem, so rename is atomic).
fn temp_sibling(path: &Path) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".tmp.{:016x}.{}", suffix, std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<Doc> = load_json(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("doc.json");
        let doc = Doc {
            items: vec!["a".into(), "b".into()],
        };

        save_json(&path, &doc).unwrap();
        let loaded: Option<Doc> = load_json(&path).unwrap();

        assert_eq!(loaded, Some(doc));
    }

    #[test]
    fn test_save_replaces_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        save_json(&path, &Doc { items: vec!["old".into()] }).unwrap();
        save_json(&path, &Doc { items: vec!["new".into()] }).unwrap();

        let loaded: Doc = load_json(&path).unwrap().unwrap();
        assert_eq!(loaded.items, vec!["new".to_string()]);

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Option<Doc>, _> = load_json(&path);
        assert!(matches!(result, Err(PersistError::Json { .. })));
    }

    #[test]
    fn test_blank_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "  \n").unwrap();

        let loaded: Option<Doc> = load_json(&path).unwrap();
        assert!(loaded.is_none());
    }
}
