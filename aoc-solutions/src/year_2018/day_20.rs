//! A Regular Map
//!
//! The route regex is walked with a set of current positions: a branch
//! starts every alternative from the positions the group was entered with,
//! and leaves with the union of where the alternatives ended. The rooms and
//! doors seen on the way are drawn on a map at double resolution (rooms on
//! even coordinates, doors between them), so door counts are half the step
//! counts of a plain breadth-first search.

use crate::utils::{Grid, Point, invalid};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 20, tags = ["2018", "grid"])]
pub struct Day20;

const FAR_AWAY: u32 = 1000;

type Pos = (i64, i64);

/// Every room and door cell the regex can reach, in doubled coordinates
fn explore(regex: &str) -> anyhow::Result<HashSet<Pos>> {
    let body = regex
        .strip_prefix('^')
        .and_then(|r| r.strip_suffix('$'))
        .context("route must be wrapped in `^` and `$`")?;

    let mut open: HashSet<Pos> = HashSet::from([(0, 0)]);
    let mut current: HashSet<Pos> = HashSet::from([(0, 0)]);
    // (positions the group started from, positions finished alternatives reached)
    let mut groups: Vec<(HashSet<Pos>, HashSet<Pos>)> = Vec::new();

    for (i, c) in body.chars().enumerate() {
        match c {
            'N' | 'S' | 'E' | 'W' => {
                let (dx, dy) = match c {
                    'N' => (0, -1),
                    'S' => (0, 1),
                    'E' => (1, 0),
                    _ => (-1, 0),
                };
                current = current
                    .into_iter()
                    .map(|(x, y)| {
                        open.insert((x + dx, y + dy));
                        let room = (x + 2 * dx, y + 2 * dy);
                        open.insert(room);
                        room
                    })
                    .collect();
            }
            '(' => groups.push((current.clone(), HashSet::new())),
            '|' => {
                let (starts, ends) = groups
                    .last_mut()
                    .with_context(|| format!("`|` outside a group at {i}"))?;
                ends.extend(current.drain());
                current = starts.clone();
            }
            ')' => {
                let (_, mut ends) = groups
                    .pop()
                    .with_context(|| format!("unbalanced `)` at {i}"))?;
                ends.extend(current.drain());
                current = ends;
            }
            other => bail!("unexpected {other:?} at {i}"),
        }
    }
    if !groups.is_empty() {
        bail!("{} group(s) never closed", groups.len());
    }
    Ok(open)
}

/// Doors on the shortest path to every room, starting from the origin
pub struct Facility {
    doors: Vec<u32>,
}

impl Facility {
    fn map(regex: &str) -> anyhow::Result<Self> {
        let open = explore(regex)?;
        let min_x = open.iter().map(|p| p.0).min().unwrap_or(0);
        let min_y = open.iter().map(|p| p.1).min().unwrap_or(0);
        let max_x = open.iter().map(|p| p.0).max().unwrap_or(0);
        let max_y = open.iter().map(|p| p.1).max().unwrap_or(0);
        let to_point = |(x, y): Pos| Point::new((x - min_x) as usize, (y - min_y) as usize);

        let width = (max_x - min_x + 1) as usize;
        let height = (max_y - min_y + 1) as usize;
        let mut cells = Grid::new(width, height, false);
        for &p in &open {
            cells[to_point(p)] = true;
        }

        let origin = to_point((0, 0));
        let dist = cells.distances_from(origin, |_, &passable| passable);
        let doors = open
            .iter()
            .filter(|&&(x, y)| x % 2 == 0 && y % 2 == 0)
            .map(|&p| dist[to_point(p)].map(|d| d / 2))
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(|| anyhow!("room cut off from the origin"))?;
        Ok(Self { doors })
    }
}

impl AocParser for Day20 {
    type SharedData<'a> = Facility;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Facility::map(input.trim()).map_err(|e| invalid(1, e))
    }
}

impl PartSolver<1> for Day20 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.doors.iter().max().copied().unwrap_or(0).to_string())
    }
}

impl PartSolver<2> for Day20 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let far = shared.doors.iter().filter(|&&d| d >= FAR_AWAY).count();
        Ok(far.to_string())
    }
}
