//! Puzzle input loading from a directory, a single file, or stdin

use crate::config::InputSource;
use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only view over the configured [`InputSource`]
///
/// Directory layout: `{dir}/{year}_day{day:02}.txt`
pub struct InputStore {
    source: InputSource,
}

impl InputStore {
    pub fn new(source: InputSource) -> Self {
        Self { source }
    }

    /// File name for a year/day inside an input directory
    pub fn file_name(year: u16, day: u8) -> String {
        format!("{}_day{:02}.txt", year, day)
    }

    /// Path the input for a year/day is read from, `None` for stdin
    pub fn path(&self, year: u16, day: u8) -> Option<PathBuf> {
        match &self.source {
            InputSource::Stdin => None,
            InputSource::File(path) => Some(path.clone()),
            InputSource::Directory(dir) => Some(dir.join(Self::file_name(year, day))),
        }
    }

    /// Whether an input is available without reading it
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_none_or(|path| path.is_file())
    }

    /// Load the input for a year/day
    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        let Some(path) = self.path(year, day) else {
            return std::io::read_to_string(std::io::stdin()).map_err(InputError::Stdin);
        };

        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing { year, day, path },
            _ => InputError::Read { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(InputSource::Directory(temp.path().to_path_buf()));

        assert_eq!(
            store.path(2025, 5),
            Some(temp.path().join("2025_day05.txt"))
        );
        assert_eq!(
            store.path(2023, 25),
            Some(temp.path().join("2023_day25.txt"))
        );
    }

    #[test]
    fn test_directory_lookup() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(InputSource::Directory(temp.path().to_path_buf()));

        assert!(!store.contains(2025, 1));
        assert!(matches!(
            store.get(2025, 1),
            Err(InputError::Missing { year: 2025, day: 1, .. })
        ));

        let input = "L68\nL30\n";
        fs::write(temp.path().join("2025_day01.txt"), input).unwrap();

        assert!(store.contains(2025, 1));
        assert_eq!(store.get(2025, 1).unwrap(), input);
    }

    #[test]
    fn test_single_file_ignores_year_day() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.txt");
        fs::write(&path, "3-5\n\n4\n").unwrap();

        let store = InputStore::new(InputSource::File(path.clone()));
        assert_eq!(store.path(2025, 5), Some(path));
        assert!(store.contains(2025, 5));
        assert_eq!(store.get(2025, 5).unwrap(), "3-5\n\n4\n");
    }

    #[test]
    fn test_directory_path_is_not_a_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2025_day02.txt")).unwrap();

        let store = InputStore::new(InputSource::Directory(temp.path().to_path_buf()));
        assert!(!store.contains(2025, 2));
        assert!(matches!(store.get(2025, 2), Err(InputError::Read { .. })));
    }

    #[test]
    fn test_stdin_has_no_path() {
        let store = InputStore::new(InputSource::Stdin);
        assert_eq!(store.path(2025, 5), None);
        assert!(store.contains(2025, 5));
    }
}
