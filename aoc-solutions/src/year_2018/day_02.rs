//! Inventory Management System

use crate::utils::solve_failed;
use anyhow::anyhow;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 2, tags = ["2018"])]
pub struct Day02;

impl AocParser for Day02 {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let ids: Vec<&str> = input.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if let Some((idx, _)) = ids
            .iter()
            .enumerate()
            .find(|(_, id)| !id.bytes().all(|b| b.is_ascii_lowercase()))
        {
            return Err(crate::utils::invalid(idx + 1, "box ids are lowercase letters"));
        }
        Ok(ids)
    }
}

impl PartSolver<1> for Day02 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (twos, threes) = shared.iter().fold((0u32, 0u32), |(twos, threes), id| {
            let mut counts = [0u8; 26];
            for b in id.bytes() {
                counts[usize::from(b - b'a')] += 1;
            }
            (
                twos + u32::from(counts.contains(&2)),
                threes + u32::from(counts.contains(&3)),
            )
        });
        Ok((twos * threes).to_string())
    }
}

impl PartSolver<2> for Day02 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .tuple_combinations()
            .find_map(|(a, b)| common_if_one_apart(a, b))
            .ok_or_else(|| solve_failed(anyhow!("no two ids differ by exactly one letter")))
    }
}

fn common_if_one_apart(a: &str, b: &str) -> Option<String> {
    if a.len() != b.len() {
        return None;
    }
    let mismatches = a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count();
    (mismatches == 1).then(|| {
        a.chars()
            .zip(b.chars())
            .filter(|(x, y)| x == y)
            .map(|(x, _)| x)
            .collect()
    })
}
