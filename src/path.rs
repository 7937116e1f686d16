//! Filesystem path helpers for user-supplied catalog and config locations.

use std::borrow::Cow;
use std::path::PathBuf;

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// [`expand_tilde`] for anything path-like, producing an owned `PathBuf`.
pub fn resolve(path: impl AsRef<std::path::Path>) -> PathBuf {
    let raw = path.as_ref().to_string_lossy();
    PathBuf::from(expand_tilde(&raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_plain_paths_are_borrowed() {
        check!(matches!(expand_tilde("/tmp/catalog.json"), Cow::Borrowed(_)));
        check!(expand_tilde("data/~/x") == "data/~/x");
    }

    #[test]
    fn test_tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            check!(resolve("~/catalog.json") == home.join("catalog.json"));
            check!(resolve("~") == home);
        }
    }
}
