//! Failures while registering, parsing, and solving puzzles

use std::fmt::Display;
use thiserror::Error;

/// Puzzle input that could not be turned into shared data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// A line or token does not have the expected shape
    #[error("invalid input: {0}")]
    InvalidFormat(String),
    /// The input ends before something the puzzle needs, or is absent altogether
    #[error("missing input: {0}")]
    MissingData(String),
    #[error("parse failed: {0}")]
    Other(String),
}

impl ParseError {
    /// `InvalidFormat` pointing at a 1-based input line
    pub fn at_line(line: usize, err: impl Display) -> Self {
        Self::InvalidFormat(format!("(line {line}) {err}"))
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("part {0} has no solution yet")]
    PartNotImplemented(u8),
    /// Asked for a part past the solver's `PARTS`, or part 0
    #[error("part {0} does not exist for this day")]
    PartOutOfRange(u8),
    /// The input parsed but has no answer, or the search gave up
    #[error("no answer: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::SolveFailed(err.into())
    }
}

/// Anything that can go wrong between asking the registry for a day and
/// getting its answers back
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no solver registered for {0} day {1}")]
    NotFound(u16, u8),
    #[error("{0} day {1} is outside the supported calendar")]
    InvalidYearDay(u16, u8),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    SolveError(#[from] SolveError),
}

#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    #[error("{0} day {1} is registered twice")]
    DuplicateSolver(u16, u8),
    #[error("cannot register {0} day {1}: outside the supported calendar")]
    InvalidYearDay(u16, u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_errors() {
        let err = ParseError::at_line(3, "expected `#1 @ 1,3: 4x4`");
        assert!(matches!(err, ParseError::InvalidFormat(_)));
        assert_eq!(err.to_string(), "invalid input: (line 3) expected `#1 @ 1,3: 4x4`");
    }

    #[test]
    fn test_solver_error_is_transparent() {
        let err: SolverError = ParseError::MissingData("no guard on duty".into()).into();
        assert_eq!(err.to_string(), "missing input: no guard on duty");

        let err: SolverError = SolveError::failed("elves never win").into();
        assert_eq!(err.to_string(), "no answer: elves never win");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_calendar_messages() {
        assert_eq!(
            SolverError::NotFound(2018, 26).to_string(),
            "no solver registered for 2018 day 26"
        );
        assert_eq!(
            RegistrationError::DuplicateSolver(2018, 7).to_string(),
            "2018 day 7 is registered twice"
        );
    }
}
