//! Data directory layout for Parley.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PARLEY_DATA_DIR";

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "parley.db";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `PARLEY_DATA_DIR` environment variable
/// 2. `~/.parley` under the user's home directory
/// 3. `.parley` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".parley");
    }

    PathBuf::from(".parley")
}

/// Create the data directory if needed.
pub async fn ensure_data_dir(data_dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(data_dir).await
}

/// SQLite connection URL for the database in `data_dir`.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join(DATABASE_FILE_NAME).display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_ensure_data_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_data_dir(&nested).await.unwrap();
        assert!(nested.is_dir());

        // Second call on an existing directory is fine.
        ensure_data_dir(&nested).await.unwrap();
    }

    #[test]
    fn test_database_url() {
        let url = database_url(Path::new("/tmp/parley-test"));
        assert_eq!(url, "sqlite:///tmp/parley-test/parley.db?mode=rwc");
    }

    #[test]
    fn test_resolve_data_dir_is_not_empty() {
        assert!(!resolve_data_dir().as_os_str().is_empty());
    }
}
