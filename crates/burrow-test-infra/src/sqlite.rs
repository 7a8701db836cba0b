use crate::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use typed_builder::TypedBuilder;

#[derive(Debug, TypedBuilder)]
pub struct SqliteConfig {
    #[builder(default = "storage.db".to_string(), setter(into))]
    file_name: String,
    /// Nest the database file in a directory that does not exist yet.
    #[builder(default, setter(strip_option, into))]
    subdirectory: Option<String>,
}

/// Test fixture for a throwaway on-disk SQLite database.
///
/// Only the path is reserved; the file itself is created by whoever opens
/// it. The whole directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct SqliteDatabase {
    dir: TempDir,
    path: PathBuf,
}

impl SqliteDatabase {
    pub fn new(config: SqliteConfig) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("burrow-").tempdir()?;

        let mut path = dir.path().to_path_buf();
        if let Some(subdirectory) = &config.subdirectory {
            path.push(subdirectory);
        }
        path.push(&config.file_name);

        Ok(Self { dir, path })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temporary directory holding the database.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
