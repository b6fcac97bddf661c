//! Puzzle input lookup on the local filesystem

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only store of puzzle inputs
///
/// Looks for `{dir}/{year}_day{day:02}.txt` first and falls back to
/// `{dir}/day{day:02}/input.txt`.
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Primary path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    fn fallback_path(&self, day: u8) -> PathBuf {
        self.dir.join(format!("day{:02}", day)).join("input.txt")
    }

    /// The first existing candidate path, if any
    pub fn locate(&self, year: u16, day: u8) -> Option<PathBuf> {
        [self.input_path(year, day), self.fallback_path(day)]
            .into_iter()
            .find(|p| p.is_file())
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.locate(year, day).is_some()
    }

    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.locate(year, day).ok_or_else(|| InputError::Missing {
            year,
            day,
            path: self.input_path(year, day),
        })?;
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing { year, day, path },
            _ => InputError::Read { path, source },
        })
    }
}
