//! No Matter How You Slice It

use crate::utils::{ints_n, lines_with, solve_failed};
use anyhow::anyhow;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 3, tags = ["2018"])]
pub struct Day03;

#[derive(Debug, Clone, Copy)]
pub struct Claim {
    id: u32,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
}

impl Claim {
    fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (self.y..self.y + self.h).flat_map(move |y| (self.x..self.x + self.w).map(move |x| (x, y)))
    }
}

pub struct Fabric {
    claims: Vec<Claim>,
    width: usize,
    /// How many claims cover each square inch
    coverage: Vec<u32>,
}

impl AocParser for Day03 {
    type SharedData<'a> = Fabric;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let claims = lines_with(input, |line| {
            let [id, x, y, w, h] = ints_n::<usize, 5>(line)?;
            Ok(Claim {
                id: u32::try_from(id)?,
                x,
                y,
                w,
                h,
            })
        })?;

        let width = claims.iter().map(|c| c.x + c.w).max().unwrap_or(0);
        let height = claims.iter().map(|c| c.y + c.h).max().unwrap_or(0);
        let mut coverage = vec![0u32; width * height];
        for claim in &claims {
            for (x, y) in claim.cells() {
                coverage[y * width + x] += 1;
            }
        }
        Ok(Fabric {
            claims,
            width,
            coverage,
        })
    }
}

impl PartSolver<1> for Day03 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.coverage.iter().filter(|&&n| n >= 2).count().to_string())
    }
}

impl PartSolver<2> for Day03 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .claims
            .iter()
            .find(|claim| {
                claim
                    .cells()
                    .all(|(x, y)| shared.coverage[y * shared.width + x] == 1)
            })
            .map(|claim| claim.id.to_string())
            .ok_or_else(|| solve_failed(anyhow!("every claim overlaps another")))
    }
}
