//! Traits a puzzle day implements

use crate::error::{ParseError, SolveError};

/// Turns the raw puzzle input into the data every part works on
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// /// Frequency changes such as `+3` and `-2`, one per line
/// struct Chronal;
///
/// impl AocParser for Chronal {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(i, l)| l.trim().parse().map_err(|e| ParseError::at_line(i + 1, e)))
///             .collect()
///     }
/// }
///
/// assert_eq!(Chronal::parse("+1\n-2\n+3").unwrap(), vec![1, -2, 3]);
/// assert!(Chronal::parse("+1\nfour").is_err());
/// ```
pub trait AocParser {
    /// Owned data, borrowed slices of the input, or a mix. Parts get it by
    /// `&mut`, so part 1 may leave behind work for part 2.
    type SharedData<'a>: 'a;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Part `N` of a day
///
/// `#[derive(AocSolver)]` wires each `PartSolver<N>` into [`Solver::solve_part`],
/// so declaring more parts than are implemented fails to compile.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
/// use std::collections::HashSet;
///
/// struct Chronal;
///
/// impl AocParser for Chronal {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split(", ")
///             .map(|s| s.parse().map_err(|_| ParseError::InvalidFormat(s.into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<2> for Chronal {
///     fn solve(changes: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let mut seen = HashSet::from([0]);
///         let mut freq = 0;
///         for change in changes.iter().cycle().take(1_000) {
///             freq += change;
///             if !seen.insert(freq) {
///                 return Ok(freq.to_string());
///             }
///         }
///         Err(SolveError::failed("no frequency repeats"))
///     }
/// }
///
/// let mut changes = Chronal::parse("+3, +3, +4, -2, -4").unwrap();
/// assert_eq!(<Chronal as PartSolver<2>>::solve(&mut changes).unwrap(), "10");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A day with `PARTS` parts, normally derived
pub trait Solver: AocParser {
    const PARTS: u8;

    /// Answer `part`. Implementations may assume `1..=PARTS`; callers that
    /// cannot promise that go through [`SolverExt`].
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    /// `solve_part` for untrusted part numbers, such as those from the command line
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        match part {
            1.. if part <= Self::PARTS => Self::solve_part(shared, part),
            _ => Err(SolveError::PartOutOfRange(part)),
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
