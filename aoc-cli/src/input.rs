//! Local puzzle input lookup

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read-only view of the puzzle inputs on disk
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`. A single
/// year/day may be pointed at another file with [`InputStore::with_override`].
#[derive(Debug, Clone)]
pub struct InputStore {
    input_dir: PathBuf,
    override_path: Option<(u16, u8, PathBuf)>,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            override_path: None,
        }
    }

    /// Read `year`/`day` from `path` instead of the input directory
    pub fn with_override(mut self, year: u16, day: u8, path: PathBuf) -> Self {
        self.override_path = Some((year, day, path));
        self
    }

    /// Where the input for a specific year/day is expected
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.override_path {
            Some((y, d, path)) if (*y, *d) == (year, day) => path.clone(),
            _ => self.input_dir.join(format!("{}_day{:02}.txt", year, day)),
        }
    }

    /// Check if input is present
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        read_input(&self.input_path(year, day))
    }
}

fn read_input(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
