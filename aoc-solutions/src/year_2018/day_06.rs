//! Chronal Coordinates

use crate::utils::{ints_n, lines_with, solve_failed};
use anyhow::anyhow;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 6, tags = ["2018"])]
pub struct Day06;

const SAFE_TOTAL: i64 = 10_000;

impl AocParser for Day06 {
    type SharedData<'a> = Vec<(i64, i64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let coords = lines_with(input, |line| {
            let [x, y] = ints_n::<i64, 2>(line)?;
            Ok((x, y))
        })?;
        if coords.is_empty() {
            return Err(ParseError::MissingData("no coordinates".into()));
        }
        Ok(coords)
    }
}

fn distance((ax, ay): (i64, i64), (bx, by): (i64, i64)) -> i64 {
    (ax - bx).abs() + (ay - by).abs()
}

/// Inclusive bounding box `(min_x, min_y, max_x, max_y)`
fn bounds(coords: &[(i64, i64)]) -> (i64, i64, i64, i64) {
    coords.iter().fold(
        (i64::MAX, i64::MAX, i64::MIN, i64::MIN),
        |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    )
}

/// Size of the largest area owned by a single coordinate that does not
/// reach the bounding box edge (those areas extend forever)
fn largest_finite_area(coords: &[(i64, i64)]) -> Option<usize> {
    let (x0, y0, x1, y1) = bounds(coords);
    let mut area = vec![0usize; coords.len()];
    let mut infinite = vec![false; coords.len()];

    for y in y0..=y1 {
        for x in x0..=x1 {
            let mut best = i64::MAX;
            let mut owner = None;
            for (i, &c) in coords.iter().enumerate() {
                let d = distance(c, (x, y));
                if d < best {
                    best = d;
                    owner = Some(i);
                } else if d == best {
                    owner = None;
                }
            }
            if let Some(i) = owner {
                area[i] += 1;
                if x == x0 || x == x1 || y == y0 || y == y1 {
                    infinite[i] = true;
                }
            }
        }
    }

    area.iter()
        .zip(&infinite)
        .filter(|&(_, &inf)| !inf)
        .map(|(&a, _)| a)
        .max()
}

/// Number of locations whose total distance to every coordinate is below `limit`
pub fn safe_region_size(coords: &[(i64, i64)], limit: i64) -> usize {
    let (x0, y0, x1, y1) = bounds(coords);
    // A cell `m` steps outside the box is at least `m * n` from the coordinates
    let margin = limit / coords.len().max(1) as i64 + 1;
    let mut count = 0;
    for y in y0 - margin..=y1 + margin {
        for x in x0 - margin..=x1 + margin {
            let total: i64 = coords.iter().map(|&c| distance(c, (x, y))).sum();
            if total < limit {
                count += 1;
            }
        }
    }
    count
}

impl PartSolver<1> for Day06 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        largest_finite_area(shared)
            .map(|a| a.to_string())
            .ok_or_else(|| solve_failed(anyhow!("every area is infinite")))
    }
}

impl PartSolver<2> for Day06 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safe_region_size(shared, SAFE_TOTAL).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "1, 1\n1, 6\n8, 3\n3, 4\n5, 5\n8, 9\n";

    #[test]
    fn test_largest_area() {
        let coords = Day06::parse(EXAMPLE).unwrap();
        assert_eq!(largest_finite_area(&coords), Some(17));
    }

    #[test]
    fn test_safe_region() {
        let coords = Day06::parse(EXAMPLE).unwrap();
        assert_eq!(safe_region_size(&coords, 32), 16);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(Day06::parse("\n"), Err(ParseError::MissingData(_))));
    }
}
