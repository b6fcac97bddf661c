//! Experimental Emergency Teleportation

use crate::utils::{ints_n, lines_with};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 23, tags = ["2018"])]
pub struct Day23;

#[derive(Debug, Clone, Copy)]
pub struct Nanobot {
    pos: [i64; 3],
    radius: i64,
}

impl Nanobot {
    fn distance_to(&self, pos: [i64; 3]) -> i64 {
        self.pos.iter().zip(pos).map(|(a, b)| (a - b).abs()).sum()
    }
}

impl AocParser for Day23 {
    type SharedData<'a> = Vec<Nanobot>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bots = lines_with(input, |line| {
            let [x, y, z, radius] = ints_n::<i64, 4>(line)?;
            Ok(Nanobot {
                pos: [x, y, z],
                radius,
            })
        })?;
        if bots.is_empty() {
            return Err(ParseError::MissingData("no nanobots".into()));
        }
        Ok(bots)
    }
}

fn in_range_of_strongest(bots: &[Nanobot]) -> usize {
    let Some(strongest) = bots.iter().rev().max_by_key(|b| b.radius) else {
        return 0;
    };
    bots.iter()
        .filter(|b| strongest.distance_to(b.pos) <= strongest.radius)
        .count()
}

/// Distance from the origin to the closest point covered by the most bots.
///
/// Each bot covers the distances-from-origin interval
/// `[d - r, d + r]` where `d` is its own distance. Sweeping interval edges
/// in order finds the distance where the most intervals overlap. This only
/// looks at distances, not positions, so it is a heuristic: it is exact
/// when the overlapping ranges really do share a point at that distance,
/// which holds for puzzle inputs.
fn best_distance(bots: &[Nanobot]) -> i64 {
    let mut edges = BinaryHeap::new();
    for bot in bots {
        let d = bot.distance_to([0; 3]);
        edges.push(Reverse(((d - bot.radius).max(0), 1i32)));
        edges.push(Reverse((d + bot.radius + 1, -1)));
    }

    // Exits sort before entries at the same distance
    let (mut count, mut best_count, mut best) = (0, 0, 0);
    while let Some(Reverse((distance, delta))) = edges.pop() {
        count += delta;
        if count > best_count {
            best_count = count;
            best = distance;
        }
    }
    best
}

impl PartSolver<1> for Day23 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(in_range_of_strongest(shared).to_string())
    }
}

impl PartSolver<2> for Day23 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best_distance(shared).to_string())
    }
}
