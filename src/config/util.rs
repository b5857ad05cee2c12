//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Parse an object store location as a remote URL.
///
/// Returns `Some` only for `http`/`https` URLs with a host; anything else is
/// treated as a local directory by the caller.
///
/// # Examples
/// ```ignore
/// remote_url("https://storage.example.com/blogs/") -> Some(..)
/// remote_url("content/storage")                    -> None
/// remote_url("file:///srv/blobs")                  -> None
/// ```
pub fn remote_url(location: &str) -> Option<url::Url> {
    let parsed = url::Url::parse(location).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    Some(parsed)
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/blog/content/blogs/  ← cwd
/// /home/user/blog/folio.toml      ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Lexically normalize a path (resolve `.` and `..` without touching disk).
pub fn normalize_path(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ============================================================================
// tests
// ============================================================================
