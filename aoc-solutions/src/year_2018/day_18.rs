//! Settlers of The North Pole

use crate::utils::{Grid, Point, invalid};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 18, tags = ["2018", "grid"])]
pub struct Day18;

const OPEN: u8 = b'.';
const TREES: u8 = b'|';
const LUMBERYARD: u8 = b'#';

impl AocParser for Day18 {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, |p, b| match b {
            OPEN | TREES | LUMBERYARD => Ok(b),
            other => Err(invalid(
                p.y + 1,
                format!("unexpected acre {:?}", char::from(other)),
            )),
        })
    }
}

/// The up to eight acres around `p`
fn surrounding(area: &Grid<u8>, p: Point) -> impl Iterator<Item = u8> + '_ {
    (-1isize..=1)
        .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
        .filter(|&d| d != (0, 0))
        .filter_map(move |(dx, dy)| {
            let x = p.x.checked_add_signed(dx)?;
            let y = p.y.checked_add_signed(dy)?;
            area.get(Point::new(x, y)).copied()
        })
}

fn minute(area: &Grid<u8>) -> Grid<u8> {
    let mut next = area.clone();
    for (p, &acre) in area.enumerate() {
        let (trees, yards) = surrounding(area, p).fold((0, 0), |(t, l), a| match a {
            TREES => (t + 1, l),
            LUMBERYARD => (t, l + 1),
            _ => (t, l),
        });
        next[p] = match acre {
            OPEN if trees >= 3 => TREES,
            TREES if yards >= 3 => LUMBERYARD,
            LUMBERYARD if trees == 0 || yards == 0 => OPEN,
            unchanged => unchanged,
        };
    }
    next
}

fn resource_value(area: &Grid<u8>) -> usize {
    let trees = area.iter().filter(|&&a| a == TREES).count();
    let yards = area.iter().filter(|&&a| a == LUMBERYARD).count();
    trees * yards
}

/// Resource value after `minutes`, skipping ahead once a layout repeats
pub fn value_after(area: &Grid<u8>, minutes: usize) -> usize {
    let mut seen: HashMap<Grid<u8>, usize> = HashMap::new();
    let mut current = area.clone();
    let mut t = 0;
    while t < minutes {
        if let Some(&first) = seen.get(&current) {
            let period = t - first;
            let remaining = (minutes - t) % period;
            for _ in 0..remaining {
                current = minute(&current);
            }
            return resource_value(&current);
        }
        seen.insert(current.clone(), t);
        current = minute(&current);
        t += 1;
    }
    resource_value(&current)
}

impl PartSolver<1> for Day18 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(value_after(shared, 10).to_string())
    }
}

impl PartSolver<2> for Day18 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(value_after(shared, 1_000_000_000).to_string())
    }
}
