//! Go With The Flow

use crate::utils::elfcode::{Machine, Program, Word};
use crate::utils::solve_failed;
use anyhow::{Context, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

/// Largest target factored by trial division (a million candidate divisors)
const MAX_TARGET: Word = 1_000_000_000_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 19, tags = ["2018", "elfcode"])]
pub struct Day19;

impl AocParser for Day19 {
    type SharedData<'a> = Program;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .parse()
            .map_err(|e: anyhow::Error| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// Register 0 once the program halts, by plain simulation
fn run_to_halt(program: &Program) -> anyhow::Result<Word> {
    let mut machine = Machine::new(program);
    machine.run()?;
    Ok(machine.registers[0])
}

/// The program computes the sum of the divisors of a number it builds in a
/// setup block, then jumps back to instruction 1 for the (slow) main loop.
/// Run the setup, take the largest register as that number and sum its
/// divisors directly. A program that halts without looping back is simply
/// run to completion.
pub fn divisor_sum(program: &Program, r0: Word) -> anyhow::Result<Word> {
    let mut machine = Machine::new(program);
    machine.registers[0] = r0;
    if !machine.run_until(1)? {
        return Ok(machine.registers[0]);
    }
    let target = machine
        .registers
        .iter()
        .copied()
        .max()
        .context("machine has no registers")?;
    sum_of_divisors(target)
}

fn sum_of_divisors(n: Word) -> anyhow::Result<Word> {
    ensure!(n <= MAX_TARGET, "target {n} is too large to factor");
    let mut sum: Word = 0;
    let mut d = 1;
    while d <= n / d {
        if n % d == 0 {
            sum += d;
            if d != n / d {
                sum += n / d;
            }
        }
        d += 1;
    }
    Ok(sum)
}

impl PartSolver<1> for Day19 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run_to_halt(shared).map(|r| r.to_string()).map_err(solve_failed)
    }
}

impl PartSolver<2> for Day19 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        divisor_sum(shared, 1)
            .map(|r| r.to_string())
            .map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: &str = "\
#ip 0
seti 5 0 1
seti 6 0 2
addi 0 1 0
addr 1 2 3
setr 1 0 0
seti 8 0 4
seti 9 0 5
";

    /// A full-size program of the kind the puzzle hands out
    const DIVISORS: &str = include_str!("day_19_example.txt");

    #[test]
    fn test_short_program() {
        let mut program = Day19::parse(SHORT).unwrap();
        assert_eq!(<Day19 as PartSolver<1>>::solve(&mut program).unwrap(), "6");
    }

    #[test]
    fn test_shortcut_agrees_with_simulation() {
        let program = Day19::parse(DIVISORS).unwrap();
        assert_eq!(run_to_halt(&program).unwrap(), 2072);
        assert_eq!(divisor_sum(&program, 0).unwrap(), 2072);
    }

    #[test]
    fn test_part_two() {
        let mut program = Day19::parse(DIVISORS).unwrap();
        assert_eq!(<Day19 as PartSolver<2>>::solve(&mut program).unwrap(), "27578880");
    }

    #[test]
    fn test_sum_of_divisors() {
        assert_eq!(sum_of_divisors(1).unwrap(), 1);
        assert_eq!(sum_of_divisors(12).unwrap(), 28);
        assert_eq!(sum_of_divisors(876).unwrap(), 2072);
        assert_eq!(sum_of_divisors(0).unwrap(), 0);
    }

    #[test]
    fn test_large_targets() {
        assert_eq!(sum_of_divisors(999_999_999_989).unwrap(), 999_999_999_990);
        assert_eq!(sum_of_divisors(MAX_TARGET).unwrap(), 2_499_694_822_171);
        assert!(sum_of_divisors(Word::MAX).is_err());
    }

    #[test]
    fn test_wrapped_target_fails_cleanly() {
        // setup leaves u64::MAX in r1 before jumping back to 1
        let program = Day19::parse("#ip 5\nseti 2 0 5\nseti 99 0 5\nseti 0 0 1\naddi 1 1 1\nmulr 1 1 1\naddi 1 18446744073709551614 1\nseti 0 0 5\n").unwrap();
        assert!(divisor_sum(&program, 1).is_err());
    }
}
