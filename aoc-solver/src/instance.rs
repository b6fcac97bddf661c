//! Parsed puzzles and their timings

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::TimeDelta;
use std::time::Instant;

/// Time since `start` on the monotonic clock
fn elapsed_since(start: Instant) -> TimeDelta {
    TimeDelta::from_std(start.elapsed()).unwrap_or(TimeDelta::MAX)
}

/// An answer together with the part it answers and how long it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub part: u8,
    pub answer: String,
    pub elapsed: TimeDelta,
}

/// One year/day puzzle whose input has been parsed
///
/// The shared data lives as long as the input it may borrow from, and parts
/// are solved against it in whatever order the caller asks for. Time spent in
/// every successful solve is added to a running total.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let start = Instant::now();
        let shared = S::parse(input)?;
        Ok(Self {
            year,
            day,
            shared,
            parse_time: elapsed_since(start),
            solve_time: TimeDelta::zero(),
        })
    }
}

/// Object-safe handle on a [`SolverInstance`], as handed out by the registry
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(solver: &mut dyn DynSolver) {
///     for part in 1..=solver.parts() {
///         match solver.solve(part) {
///             Ok(r) => println!("{}/{:02} part {}: {} ({})", solver.year(), solver.day(), r.part, r.answer, r.elapsed),
///             Err(e) => eprintln!("part {part}: {e}"),
///         }
///     }
///     println!("parse {}, solve {}", solver.parse_duration(), solver.solve_duration());
/// }
/// ```
pub trait DynSolver {
    /// Solve `part`, rejecting parts outside `1..=parts()`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_duration(&self) -> TimeDelta;

    /// Total time of the successful solves so far
    fn solve_duration(&self) -> TimeDelta;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;
}

impl<'a, S: SolverExt> DynSolver for SolverInstance<'a, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let start = Instant::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let elapsed = elapsed_since(start);
        self.solve_time += elapsed;
        Ok(SolveResult {
            part,
            answer,
            elapsed,
        })
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parse_time
    }

    fn solve_duration(&self) -> TimeDelta {
        self.solve_time
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AocParser;

    /// Part 1 reacts a polymer and caches the result; part 2 reads the cache
    struct Polymer;

    impl AocParser for Polymer {
        type SharedData<'a> = (&'a str, Option<usize>);

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("empty polymer".into()));
            }
            Ok((input, None))
        }
    }

    impl Solver for Polymer {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            let (units, cache) = shared;
            let reacted = *cache.get_or_insert_with(|| {
                let mut stack: Vec<u8> = Vec::new();
                for b in units.bytes() {
                    match stack.last() {
                        Some(&top) if top != b && top.eq_ignore_ascii_case(&b) => {
                            stack.pop();
                        }
                        _ => stack.push(b),
                    }
                }
                stack.len()
            });
            match part {
                1 => Ok(reacted.to_string()),
                2 => Ok((units.len() - reacted).to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_parts_share_state() {
        let mut solver = SolverInstance::<Polymer>::new(2018, 5, "dabAcCaCBAcCcaDA").unwrap();
        assert_eq!((solver.year(), solver.day(), solver.parts()), (2018, 5, 2));

        let first = solver.solve(1).unwrap();
        assert_eq!((first.part, first.answer.as_str()), (1, "10"));
        assert_eq!(solver.solve(2).unwrap().answer, "6");
    }

    #[test]
    fn test_timings_accumulate() {
        let mut solver = SolverInstance::<Polymer>::new(2018, 5, "aA").unwrap();
        assert!(solver.parse_duration() >= TimeDelta::zero());
        assert_eq!(solver.solve_duration(), TimeDelta::zero());

        let a = solver.solve(1).unwrap().elapsed;
        let b = solver.solve(2).unwrap().elapsed;
        assert_eq!(solver.solve_duration(), a + b);

        // failed solves add nothing
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
        assert_eq!(solver.solve_duration(), a + b);
    }

    #[test]
    fn test_parse_failure() {
        assert!(matches!(
            SolverInstance::<Polymer>::new(2018, 5, ""),
            Err(ParseError::MissingData(_))
        ));
    }
}
