//! Property-based tests for the AocSolver derive macro

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

/// Frequency changes: part 1 sums them, part 2 finds the largest single jump
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Frequencies;

impl AocParser for Frequencies {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad change {l:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Frequencies {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i32>().to_string())
    }
}

impl PartSolver<2> for Frequencies {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|n| n.abs())
            .max()
            .map(|m| m.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no changes".into()))
    }
}

fn render(changes: &[i32]) -> String {
    changes
        .iter()
        .map(|n| format!("{n:+}"))
        .collect::<Vec<_>>()
        .join("\n")
}

mod part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// solve_part(N) matches PartSolver<N>::solve
        #[test]
        fn solve_part_dispatches_to_correct_part_solver(
            changes in prop::collection::vec(-50i32..50, 1..8),
            part in 1u8..=2
        ) {
            let input = render(&changes);
            let mut shared1 = <Frequencies as AocParser>::parse(&input).unwrap();
            let mut shared2 = <Frequencies as AocParser>::parse(&input).unwrap();

            let solver_result = <Frequencies as Solver>::solve_part(&mut shared1, part);
            let direct_result = match part {
                1 => <Frequencies as PartSolver<1>>::solve(&mut shared2),
                2 => <Frequencies as PartSolver<2>>::solve(&mut shared2),
                _ => unreachable!(),
            };

            prop_assert_eq!(solver_result.unwrap(), direct_result.unwrap());
        }

        /// Parts without an implementation are reported as not implemented
        #[test]
        fn invalid_part_returns_not_implemented(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
            let mut shared = <Frequencies as AocParser>::parse("+1\n-2").unwrap();

            match <Frequencies as Solver>::solve_part(&mut shared, invalid_part) {
                Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, invalid_part),
                _ => prop_assert!(false, "Expected PartNotImplemented for part {}", invalid_part),
            }
        }
    }

    #[test]
    fn parts_constant_matches_attribute() {
        assert_eq!(<Frequencies as Solver>::PARTS, 2);
    }
}

mod shared_state {
    use super::*;

    #[derive(Debug, Clone)]
    struct Polymer {
        units: Vec<u8>,
        reduced_len: Option<usize>,
    }

    /// Part 1 records a result that part 2 reuses
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct CachingSolver;

    impl AocParser for CachingSolver {
        type SharedData<'a> = Polymer;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(Polymer {
                units: input.trim().bytes().collect(),
                reduced_len: None,
            })
        }
    }

    impl PartSolver<1> for CachingSolver {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let mut stack: Vec<u8> = Vec::new();
            for &unit in &shared.units {
                match stack.last() {
                    Some(&top) if top ^ unit == 0x20 => {
                        stack.pop();
                    }
                    _ => stack.push(unit),
                }
            }
            shared.reduced_len = Some(stack.len());
            Ok(stack.len().to_string())
        }
    }

    impl PartSolver<2> for CachingSolver {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            shared
                .reduced_len
                .map(|len| (shared.units.len() - len).to_string())
                .ok_or_else(|| SolveError::SolveFailed("part 1 has not run".into()))
        }
    }

    #[test]
    fn part_two_sees_part_one_result() {
        let mut shared = <CachingSolver as AocParser>::parse("dabAcCaCBAcCcaDA").unwrap();

        assert_eq!(<CachingSolver as Solver>::solve_part(&mut shared, 1).unwrap(), "10");
        assert_eq!(shared.reduced_len, Some(10));
        assert_eq!(<CachingSolver as Solver>::solve_part(&mut shared, 2).unwrap(), "6");
    }

    #[test]
    fn part_two_alone_fails() {
        let mut shared = <CachingSolver as AocParser>::parse("aA").unwrap();
        assert!(matches!(
            <CachingSolver as Solver>::solve_part(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }
}

mod borrowed_data {
    use super::*;

    /// Shared data borrowing straight from the input
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 1)]
    struct LongestLine;

    impl AocParser for LongestLine {
        type SharedData<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(input.lines().collect())
        }
    }

    impl PartSolver<1> for LongestLine {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared
                .iter()
                .max_by_key(|l| l.len())
                .copied()
                .unwrap_or_default()
                .to_string())
        }
    }

    proptest! {
        #[test]
        fn longest_line_is_returned(lines in prop::collection::vec("[a-z]{0,12}", 1..6)) {
            let input = lines.join("\n");
            let mut shared = <LongestLine as AocParser>::parse(&input).unwrap();
            let answer = <LongestLine as Solver>::solve_part(&mut shared, 1).unwrap();
            let expected = lines.iter().map(|l| l.len()).max().unwrap_or(0);
            prop_assert_eq!(answer.len(), expected);
        }
    }
}
