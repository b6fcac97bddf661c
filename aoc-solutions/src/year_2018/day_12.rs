//! Subterranean Sustainability

use crate::utils::{invalid, solve_failed};
use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 12, tags = ["2018"])]
pub struct Day12;

/// Give up on finding a steady drift after this many generations
const MAX_SIMULATED: u64 = 100_000;

/// Plants trimmed to the first and last pot that hold one
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    offset: i64,
    pots: Vec<bool>,
}

impl Row {
    fn trimmed(offset: i64, pots: Vec<bool>) -> Self {
        match (pots.iter().position(|&p| p), pots.iter().rposition(|&p| p)) {
            (Some(first), Some(last)) => Row {
                offset: offset + first as i64,
                pots: pots[first..=last].to_vec(),
            },
            _ => Row {
                offset: 0,
                pots: Vec::new(),
            },
        }
    }

    fn step(&self, rules: &[bool; 32]) -> Row {
        let len = self.pots.len();
        let mut next = Vec::with_capacity(len + 4);
        for j in 0..len + 4 {
            let key = (0..5).fold(0usize, |key, k| {
                let plant = (j + k)
                    .checked_sub(4)
                    .and_then(|i| self.pots.get(i))
                    .copied()
                    .unwrap_or(false);
                key << 1 | usize::from(plant)
            });
            next.push(rules[key]);
        }
        Row::trimmed(self.offset - 2, next)
    }

    fn count(&self) -> i64 {
        self.pots.iter().filter(|&&p| p).count() as i64
    }

    fn sum(&self) -> i64 {
        self.pots
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p)
            .map(|(i, _)| self.offset + i as i64)
            .sum()
    }
}

pub struct Pots {
    initial: Row,
    rules: [bool; 32],
}

fn pattern(text: &str) -> Vec<bool> {
    text.bytes().map(|b| b == b'#').collect()
}

impl AocParser for Day12 {
    type SharedData<'a> = Pots;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).enumerate().filter(|(_, l)| !l.is_empty());
        let (_, header) = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("initial state".into()))?;
        let state = header
            .strip_prefix("initial state: ")
            .ok_or_else(|| invalid(1, "expected `initial state: ...`"))?;

        let mut rules = [false; 32];
        for (idx, line) in lines {
            let (from, to) = line
                .split_once(" => ")
                .filter(|(from, _)| from.len() == 5)
                .ok_or_else(|| invalid(idx + 1, format!("bad rule {line:?}")))?;
            let key = pattern(from)
                .into_iter()
                .fold(0usize, |key, p| key << 1 | usize::from(p));
            rules[key] = to == "#";
        }
        if rules[0] {
            return Err(ParseError::InvalidFormat(
                "`..... => #` would fill the infinite row".into(),
            ));
        }

        Ok(Pots {
            initial: Row::trimmed(0, pattern(state)),
            rules,
        })
    }
}

/// Sum of the numbers of pots holding plants after `generations`.
///
/// Once a generation is the previous one shifted by a fixed amount, every
/// later generation shifts by that amount too, so the sum is extrapolated.
pub fn sum_after(pots: &Pots, generations: u64) -> anyhow::Result<i64> {
    let mut row = pots.initial.clone();
    for generation in 0..generations.min(MAX_SIMULATED) {
        let next = row.step(&pots.rules);
        if next.pots == row.pots {
            let remaining = (generations - generation - 1) as i64;
            let drift = next.offset - row.offset;
            return Ok(next.sum() + remaining * drift * next.count());
        }
        row = next;
    }
    if generations > MAX_SIMULATED {
        bail!("plants did not settle into a steady drift within {MAX_SIMULATED} generations");
    }
    Ok(row.sum())
}

impl PartSolver<1> for Day12 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_after(shared, 20).map(|s| s.to_string()).map_err(solve_failed)
    }
}

impl PartSolver<2> for Day12 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_after(shared, 50_000_000_000)
            .map(|s| s.to_string())
            .map_err(solve_failed)
    }
}
