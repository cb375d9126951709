//! Utility functions and helpers

use std::path::{Component, Path};

use sha2::{Digest, Sha256};

/// Short hex digest of the given content
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    hex::encode(&result[..8])
}

/// Join the normal components of a relative path with `/`
pub fn module_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `to` relative to `from`, for display
pub fn relative_path(from: &Path, to: &Path) -> String {
    pathdiff::diff_paths(to, from)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| to.display().to_string())
}

/// Format duration as human-readable string
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();

    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u64;
        let remaining_secs = secs - (mins as f64 * 60.0);
        format!("{}m {:.2}s", mins, remaining_secs)
    } else if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.0}ms", secs * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint() {
        let hash = fingerprint(b"hello world");
        assert_eq!(hash.len(), 16);
        assert_eq!(hash, fingerprint(b"hello world"));
        assert_ne!(hash, fingerprint(b"hello world!"));
    }

    #[test]
    fn test_module_path() {
        assert_eq!(module_path(Path::new("a/b/index.js")), "a/b/index.js");
        assert_eq!(module_path(Path::new("./a/index.js")), "a/index.js");
        assert_eq!(module_path(Path::new("index.js")), "index.js");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/app"), Path::new("/app/src/pages")),
            "src/pages"
        );
    }

    #[test]
    fn test_format_duration() {
        use std::time::Duration;

        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs_f64(1.5)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5.00s");
    }
}
