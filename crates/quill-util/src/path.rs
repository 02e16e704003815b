//! Path utilities.
//!
//! Platform directories for quill and helpers for displaying search results
//! relative to the directory that was scanned.

use std::path::{Path, PathBuf};

/// Get the quill configuration directory.
///
/// On Unix, `~/.config/quill` is preferred when it exists; otherwise the
/// platform config directory is used.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        if let Some(home) = dirs::home_dir() {
            let xdg_config = home.join(".config").join("quill");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }
    }

    dirs::config_dir().map(|p| p.join("quill"))
}

/// Get the quill data directory.
///
/// This follows XDG conventions:
/// - `$XDG_DATA_HOME/quill` if set
/// - `~/.local/share/quill` otherwise
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("quill"))
}

/// Get the quill logs directory.
pub fn logs_dir() -> Option<PathBuf> {
    data_dir().map(|p| p.join("logs"))
}

/// Make a path relative to a base directory.
///
/// Returns `None` if the path is not within the base directory.
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Render `path` for display, relative to `base` when it lies underneath it.
pub fn display_relative(path: &Path, base: &Path) -> String {
    match relative_to(path, base) {
        Some(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Resolve `path` against `cwd` unless it is already absolute.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_is_namespaced() {
        if let Some(dir) = data_dir() {
            assert!(dir.ends_with("quill"));
        }
    }

    #[test]
    fn test_logs_dir_under_data_dir() {
        if let (Some(logs), Some(data)) = (logs_dir(), data_dir()) {
            assert!(logs.starts_with(data));
        }
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/home/user/notes");
        let path = Path::new("/home/user/notes/work/todo.txt");
        let relative = relative_to(path, base);
        assert_eq!(relative, Some(PathBuf::from("work/todo.txt")));
        assert_eq!(relative_to(Path::new("/tmp/a.txt"), base), None);
    }

    #[test]
    fn test_display_relative_falls_back_to_full_path() {
        let base = Path::new("/home/user/notes");
        assert_eq!(
            display_relative(Path::new("/home/user/notes/a.txt"), base),
            "a.txt"
        );
        assert_eq!(
            display_relative(Path::new("/srv/b.txt"), base),
            "/srv/b.txt"
        );
        assert_eq!(display_relative(base, base), "/home/user/notes");
    }

    #[test]
    fn test_absolutize() {
        let cwd = Path::new("/work");
        assert_eq!(
            absolutize(Path::new("notes/a.txt"), cwd),
            PathBuf::from("/work/notes/a.txt")
        );
        assert_eq!(absolutize(Path::new("/etc/x"), cwd), PathBuf::from("/etc/x"));
    }
}
