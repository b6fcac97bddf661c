//! The Sum of Its Parts

use crate::utils::{lines_with, solve_failed};
use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{BTreeMap, BTreeSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 7, tags = ["2018"])]
pub struct Day07;

/// For every step, the steps that must finish before it can begin
pub type Requirements = BTreeMap<char, BTreeSet<char>>;

impl AocParser for Day07 {
    type SharedData<'a> = Requirements;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let edges = lines_with(input, |line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            let step = |i: usize| -> anyhow::Result<char> {
                let word = words.get(i).context("line too short")?;
                let mut chars = word.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_uppercase() => Ok(c),
                    _ => Err(anyhow!("expected a step letter, found {word:?}")),
                }
            };
            Ok((step(1)?, step(7)?))
        })?;

        let mut reqs = Requirements::new();
        for (before, after) in edges {
            reqs.entry(before).or_default();
            reqs.entry(after).or_default().insert(before);
        }
        Ok(reqs)
    }
}

/// Schedule all steps with `workers` workers, each step taking
/// `base + (letter index + 1)` seconds. Returns the completion order and
/// total time. Idle workers always take the alphabetically first ready step.
pub fn schedule(reqs: &Requirements, workers: usize, base: u32) -> anyhow::Result<(String, u32)> {
    let mut pending: BTreeMap<char, BTreeSet<char>> = reqs.clone();
    let mut in_progress: Vec<(u32, char)> = Vec::new();
    let mut order = String::with_capacity(reqs.len());
    let mut now = 0u32;

    while !pending.is_empty() || !in_progress.is_empty() {
        let ready: Vec<char> = pending
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(&step, _)| step)
            .take(workers.saturating_sub(in_progress.len()))
            .collect();
        for step in ready {
            pending.remove(&step);
            let cost = base + u32::from(step as u8 - b'A') + 1;
            in_progress.push((now + cost, step));
        }

        // Finish everything due at the earliest completion time, alphabetically
        let next = in_progress
            .iter()
            .map(|&(t, _)| t)
            .min()
            .context("dependency cycle between steps")?;
        now = next;
        let mut done: Vec<char> = in_progress
            .iter()
            .filter(|&&(t, _)| t == next)
            .map(|&(_, s)| s)
            .collect();
        done.sort_unstable();
        in_progress.retain(|&(t, _)| t != next);
        for step in done {
            order.push(step);
            for deps in pending.values_mut() {
                deps.remove(&step);
            }
        }
    }
    Ok((order, now))
}

impl PartSolver<1> for Day07 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        schedule(shared, 1, 0).map(|(order, _)| order).map_err(solve_failed)
    }
}

impl PartSolver<2> for Day07 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        schedule(shared, 5, 60)
            .map(|(_, time)| time.to_string())
            .map_err(solve_failed)
    }
}
