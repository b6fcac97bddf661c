//! Small helpers for pulling numbers out of puzzle lines

use anyhow::anyhow;
use aoc_solver::ParseError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").unwrap());

/// Every signed integer in `line`, in order of appearance
pub fn ints<T>(line: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    INTEGER
        .find_iter(line)
        .map(|m| m.as_str().parse::<T>().map_err(anyhow::Error::from))
        .collect()
}

/// Exactly `N` integers from `line`
pub fn ints_n<T, const N: usize>(line: &str) -> anyhow::Result<[T; N]>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let found = ints::<T>(line)?;
    let count = found.len();
    found
        .try_into()
        .map_err(|_| anyhow!("expected {N} numbers, found {count}"))
}

/// Parse every non-blank line with `f`, tagging failures with a 1-based line number
pub fn lines_with<T, F>(input: &str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| f(line.trim()).map_err(|e| invalid(idx + 1, e)))
        .collect()
}

/// `ParseError::InvalidFormat` carrying the offending line number
pub fn invalid(line: usize, err: impl std::fmt::Display) -> ParseError {
    ParseError::at_line(line, err)
}
