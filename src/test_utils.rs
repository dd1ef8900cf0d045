//! Utilities for tests and doctests.

use std::path::{Path, PathBuf};

use crate::writer::sibling_path;

/// A temporary directory holding the destination path for a shapefile.
pub struct TempFixture {
    _temp_dir: tempfile::TempDir,
    temp_path: PathBuf,
}

impl TempFixture {
    /// Creates a temporary directory and the path to a not-yet-existing
    /// shapefile base (no extension) inside it.
    ///
    /// Returns the struct `TempFixture` that contains the temp dir (for
    /// clean-up on `drop`) as well as the destination path.
    pub fn empty(name: &str) -> Self {
        let _temp_dir = tempfile::tempdir().unwrap();
        let temp_path = _temp_dir.path().join(name);
        Self {
            _temp_dir,
            temp_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// The destination path with `.ext` appended, e.g. the `.shp` file
    /// belonging to this fixture.
    pub fn path_with_extension(&self, ext: &str) -> PathBuf {
        sibling_path(self.path(), ext)
    }
}

impl AsRef<Path> for TempFixture {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}
