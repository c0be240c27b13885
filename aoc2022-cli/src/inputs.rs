//! Local store of puzzle inputs

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// File-based store of puzzle inputs
///
/// Directory structure: `{input_dir}/{year}/day{day:02}.txt`
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Path of the input file for a specific year/day
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir
            .join(year.to_string())
            .join(format!("day{:02}.txt", day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Read the input, `None` when the file does not exist
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        let path = self.path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "loaded input");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the input, treating a missing file as an error
    pub fn load(&self, year: u16, day: u8) -> Result<String, InputError> {
        self.get(year, day)?
            .ok_or_else(|| InputError::Missing(self.path(year, day)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(store.path(2022, 1), PathBuf::from("inputs/2022/day01.txt"));
        assert_eq!(store.path(2022, 16), PathBuf::from("inputs/2022/day16.txt"));
    }

    #[test]
    fn test_get_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2022, 1));
        assert!(store.get(2022, 1).unwrap().is_none());
        assert!(matches!(store.load(2022, 1), Err(InputError::Missing(_))));

        let input = "1000\n2000\n\n3000\n";
        fs::create_dir_all(temp.path().join("2022")).unwrap();
        fs::write(store.path(2022, 1), input).unwrap();

        assert!(store.contains(2022, 1));
        assert_eq!(store.get(2022, 1).unwrap(), Some(input.to_string()));
        assert_eq!(store.load(2022, 1).unwrap(), input);
    }

    #[test]
    fn test_directory_in_place_of_file() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir_all(store.path(2022, 2)).unwrap();

        assert!(!store.contains(2022, 2));
        assert!(matches!(store.get(2022, 2), Err(InputError::Io(_))));
    }
}
