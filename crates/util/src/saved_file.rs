//! Contains tools for reading and writing [serde_json] files (mainly by
//! providing the simpler [SavedFile] API). Settings files go through here.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use thiserror::Error;

/// Gives an object a nice API for saving to/reading from a file. This trait is
/// blanket implemented for all types that meet the requirements.
pub trait SavedFile: Serialize + DeserializeOwned {
    /// Save data to the file at `file_path`, replacing whatever was there.
    fn save_to_path<P: AsRef<Path>>(&self, file_path: P) -> Result<(), SavedFileError> {
        let file_path = file_path.as_ref();
        crate::debug_log_info!("Writing saved file {}.", file_path.display());

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(file_path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read data from the file at `file_path`.
    fn read_from_path<P: AsRef<Path>>(file_path: P) -> Result<Self, SavedFileError> {
        let file_path = file_path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .open(file_path)
            .inspect_err(|e| {
                crate::debug_log_error!("Failed to open {}: {e}", file_path.display())
            })?;

        serde_json::from_reader(BufReader::new(file))
            .inspect_err(|e| {
                crate::debug_log_error!("Failed to deserialize {}: {e}", file_path.display())
            })
            .map_err(Into::into)
    }

    /// Read a file from disk, saving the result of `f` to disk if the file does
    /// not exist yet.
    fn read_from_path_or_create<P, F>(file_path: P, f: F) -> Result<Self, SavedFileError>
    where
        P: AsRef<Path>,
        F: FnOnce() -> Self,
    {
        let file_path = file_path.as_ref();

        if file_path.exists() {
            return Self::read_from_path(file_path);
        }

        let data = f();
        data.save_to_path(file_path).inspect_err(|e| {
            crate::debug_log_error!("Failed to save to file: {e}");
        })?;
        Ok(data)
    }

    /// The same as [SavedFile::read_from_path_or_create], but
    /// [Default::default] is used in place of a provided callback function.
    fn read_from_path_or_default<P>(file_path: P) -> Result<Self, SavedFileError>
    where
        P: AsRef<Path>,
        Self: Default,
    {
        Self::read_from_path_or_create(file_path, Self::default)
    }
}

impl<T: Serialize + DeserializeOwned> SavedFile for T {}

/// Indicates that something went wrong trying to serialize or deserialize.
#[derive(Error, Debug)]
pub enum SavedFileError {
    #[error(transparent)]
    BadData(serde_json::Error),
    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl From<serde_json::Error> for SavedFileError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            SavedFileError::IoError(e.into())
        } else {
            SavedFileError::BadData(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    struct Settings {
        name: String,
        count: u32,
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings::read_from_path_or_default(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn existing_file_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let saved = Settings {
            name: "retro".to_string(),
            count: 3,
        };
        saved.save_to_path(&path).unwrap();

        let read = Settings::read_from_path_or_create(&path, || panic!("shouldn't be called"));
        assert_eq!(read.unwrap(), saved);
    }

    #[test]
    fn bad_json_is_bad_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Settings::read_from_path(&path),
            Err(SavedFileError::BadData(_))
        ));
    }
}
