use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("document directory unusable ({path}): {reason}")]
    Directory { path: PathBuf, reason: String },
    #[error("document name {0:?} must be a plain file name")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` if needed and checks that a file can be written in it.
pub fn prepare_directory(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::Directory {
        path: dir.to_path_buf(),
        reason,
    };

    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return Err(unusable("not a directory".into())),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))?;
        }
        Err(err) => return Err(unusable(err.to_string())),
    }
    NamedTempFile::new_in(dir).map_err(|e| unusable(e.to_string()))?;
    Ok(())
}

/// Saves generated documents into one directory. Each save goes to a temp
/// file first and is renamed into place, so a reader never sees half a file.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `contents` as `file_name`, replacing any earlier copy.
    pub fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, PersistError> {
        let is_plain = Path::new(file_name)
            .file_name()
            .is_some_and(|name| name == file_name);
        if !is_plain {
            return Err(PersistError::InvalidName(file_name.to_string()));
        }
        prepare_directory(&self.dir)?;

        let target = self.dir.join(file_name);
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file_mut().sync_all()?;
        staged.persist(&target).map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
