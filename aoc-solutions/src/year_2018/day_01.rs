//! Chronal Calibration

use crate::utils::{lines_with, solve_failed};
use anyhow::anyhow;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 1, tags = ["2018"])]
pub struct Day01;

impl AocParser for Day01 {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines_with(input, |line| Ok(line.parse::<i64>()?))
    }
}

impl PartSolver<1> for Day01 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Day01 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_repeat(shared)
            .map(|f| f.to_string())
            .ok_or_else(|| solve_failed(anyhow!("no frequency is ever reached twice")))
    }
}

/// First running total seen twice while cycling through `changes`.
///
/// After `k` passes every prefix total has shifted by `k * drift`, so once
/// that shift exceeds the spread of the first pass no new collision can
/// happen and the search stops.
fn first_repeat(changes: &[i64]) -> Option<i64> {
    if changes.is_empty() {
        return None;
    }
    let drift: i64 = changes.iter().sum();
    let (lo, hi) = changes
        .iter()
        .scan(0i64, |f, c| {
            *f += c;
            Some(*f)
        })
        .fold((0, 0), |(lo, hi), f| (lo.min(f), hi.max(f)));
    let passes = match drift.unsigned_abs() {
        0 => 1,
        d => (hi - lo).unsigned_abs() / d + 2,
    };

    let mut seen = HashSet::from([0i64]);
    let mut freq = 0i64;
    for _ in 0..passes {
        for c in changes {
            freq += c;
            if !seen.insert(freq) {
                return Some(freq);
            }
        }
    }
    None
}
