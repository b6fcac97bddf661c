//! The Stars Align

use crate::utils::{ints_n, lines_with, solve_failed};
use anyhow::anyhow;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 10, tags = ["2018"])]
pub struct Day10;

#[derive(Debug, Clone, Copy)]
struct Star {
    x: i64,
    y: i64,
    vx: i64,
    vy: i64,
}

impl Star {
    fn at(self, t: i64) -> (i64, i64) {
        (self.x + self.vx * t, self.y + self.vy * t)
    }
}

pub struct Sky {
    stars: Vec<Star>,
    message: Option<(i64, String)>,
}

impl AocParser for Day10 {
    type SharedData<'a> = Sky;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stars = lines_with(input, |line| {
            let [x, y, vx, vy] = ints_n::<i64, 4>(line)?;
            Ok(Star { x, y, vx, vy })
        })?;
        if stars.is_empty() {
            return Err(ParseError::MissingData("no stars".into()));
        }
        Ok(Sky {
            stars,
            message: None,
        })
    }
}

fn bounds(stars: &[Star], t: i64) -> (i64, i64, i64, i64) {
    stars.iter().map(|s| s.at(t)).fold(
        (i64::MAX, i64::MAX, i64::MIN, i64::MIN),
        |(x0, y0, x1, y1), (x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    )
}

fn area(stars: &[Star], t: i64) -> i128 {
    let (x0, y0, x1, y1) = bounds(stars, t);
    i128::from(x1 - x0 + 1) * i128::from(y1 - y0 + 1)
}

/// Average of the times at which pairs of stars meet exactly.
/// Stars that spell a message pass through each other around that moment.
fn estimate(stars: &[Star]) -> i64 {
    let (sum, count) = stars
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.vx != b.vx && a.vy != b.vy)
        .filter_map(|(a, b)| {
            let tx = (b.x - a.x) / (a.vx - b.vx);
            let ty = (b.y - a.y) / (a.vy - b.vy);
            (tx == ty).then_some(tx)
        })
        .fold((0i64, 0i64), |(sum, count), t| (sum + t, count + 1));
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).round().max(0.0) as i64
    }
}

/// The moment the stars are packed tightest, and the picture they draw then
fn find_message(stars: &[Star]) -> anyhow::Result<(i64, String)> {
    let mut t = estimate(stars);
    while area(stars, t + 1) < area(stars, t) {
        t += 1;
    }
    while t > 0 && area(stars, t - 1) < area(stars, t) {
        t -= 1;
    }

    let (x0, y0, x1, y1) = bounds(stars, t);
    if (x1 - x0) > 400 || (y1 - y0) > 100 {
        return Err(anyhow!("stars never converge into a readable message"));
    }
    let lit: HashSet<(i64, i64)> = stars.iter().map(|s| s.at(t)).collect();
    let mut picture = String::new();
    for y in y0..=y1 {
        picture.extend((x0..=x1).map(|x| if lit.contains(&(x, y)) { '#' } else { '.' }));
        picture.push('\n');
    }
    Ok((t, picture))
}

fn message(sky: &mut Sky) -> Result<&(i64, String), SolveError> {
    if sky.message.is_none() {
        sky.message = Some(find_message(&sky.stars).map_err(solve_failed)?);
    }
    sky.message
        .as_ref()
        .ok_or_else(|| solve_failed(anyhow!("message not computed")))
}

impl PartSolver<1> for Day10 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        message(shared).map(|(_, picture)| picture.clone())
    }
}

impl PartSolver<2> for Day10 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        message(shared).map(|(t, _)| t.to_string())
    }
}
