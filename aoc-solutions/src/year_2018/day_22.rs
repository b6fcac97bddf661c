//! Mode Maze

use crate::utils::{Grid, Point, ints, solve_failed};
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 22, tags = ["2018", "grid"])]
pub struct Day22;

const EROSION_MODULUS: u64 = 20183;
const X_FACTOR: u64 = 16807;
const Y_FACTOR: u64 = 48271;
/// How far past the target the rescue path may wander
const MARGIN: usize = 200;
const SWITCH_MINUTES: u32 = 7;
/// Largest target coordinate accepted; puzzle targets are well under a thousand
const MAX_TARGET: usize = 2_000;

/// Tools are numbered so that tool `t` is unusable in region type `t`:
/// no tool in rocky (0), torch in wet (1), climbing gear in narrow (2)
const NEITHER: usize = 0;
const TORCH: usize = 1;

pub struct Cave {
    target: Point,
    /// Region type (erosion level mod 3) of every region in the searched area
    regions: Grid<u8>,
}

impl Cave {
    pub fn new(depth: u64, target: Point) -> Self {
        let depth = depth % EROSION_MODULUS;
        let width = target.x + MARGIN;
        let height = target.y + MARGIN;
        let mut erosion = Grid::new(width, height, 0u64);
        for p in erosion.points() {
            let index = if p == Point::default() || p == target {
                0
            } else if p.y == 0 {
                p.x as u64 * X_FACTOR
            } else if p.x == 0 {
                p.y as u64 * Y_FACTOR
            } else {
                erosion[Point::new(p.x - 1, p.y)] * erosion[Point::new(p.x, p.y - 1)]
            };
            erosion[p] = (index + depth) % EROSION_MODULUS;
        }

        let mut regions = Grid::new(width, height, 0u8);
        for (p, &e) in erosion.enumerate() {
            regions[p] = (e % 3) as u8;
        }
        Self { target, regions }
    }

    pub fn risk(&self) -> u64 {
        (0..=self.target.y)
            .flat_map(|y| (0..=self.target.x).map(move |x| Point::new(x, y)))
            .map(|p| u64::from(self.regions[p]))
            .sum()
    }

    fn allows(&self, p: Point, tool: usize) -> bool {
        usize::from(self.regions[p]) != tool
    }

    /// Fewest minutes from the mouth to the target, holding the torch at
    /// both ends. Dijkstra over (region, tool).
    pub fn rescue_time(&self) -> anyhow::Result<u32> {
        let mut best = Grid::new(self.regions.width(), self.regions.height(), [u32::MAX; 3]);
        let mut queue = BinaryHeap::from([Reverse((0u32, Point::default(), TORCH))]);
        best[Point::default()][TORCH] = 0;

        while let Some(Reverse((time, p, tool))) = queue.pop() {
            if (p, tool) == (self.target, TORCH) {
                return Ok(time);
            }
            if time > best[p][tool] {
                continue;
            }

            let switch = (NEITHER..3)
                .filter(|&t| t != tool && self.allows(p, t))
                .map(|t| (p, t, time + SWITCH_MINUTES));
            let step = self
                .regions
                .neighbours(p)
                .filter(|&n| self.allows(n, tool))
                .map(|n| (n, tool, time + 1));
            for (next, next_tool, next_time) in switch.chain(step) {
                if next_time < best[next][next_tool] {
                    best[next][next_tool] = next_time;
                    queue.push(Reverse((next_time, next, next_tool)));
                }
            }
        }
        Err(anyhow!("target is unreachable"))
    }
}

impl AocParser for Day22 {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let read = || -> anyhow::Result<Cave> {
            if !input.trim_start().starts_with("depth:") || !input.contains("target:") {
                bail!("expected `depth: D` and `target: X,Y`");
            }
            match ints::<u64>(input)?.as_slice() {
                &[depth, x, y] => {
                    let (x, y) = (usize::try_from(x)?, usize::try_from(y)?);
                    if x > MAX_TARGET || y > MAX_TARGET {
                        bail!("target {x},{y} is beyond {MAX_TARGET},{MAX_TARGET}");
                    }
                    Ok(Cave::new(depth, Point::new(x, y)))
                }
                other => bail!("expected three numbers, found {}", other.len()),
            }
        };
        read().map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Day22 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.risk().to_string())
    }
}

impl PartSolver<2> for Day22 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .rescue_time()
            .map(|t| t.to_string())
            .map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "depth: 510\ntarget: 10,10\n";

    #[test]
    fn test_region_types() {
        let cave = Cave::new(510, Point::new(10, 10));
        // rocky, wet, rocky, narrow for (0,0), (1,0), (0,1), (1,1)
        assert_eq!(cave.regions[Point::new(0, 0)], 0);
        assert_eq!(cave.regions[Point::new(1, 0)], 1);
        assert_eq!(cave.regions[Point::new(0, 1)], 0);
        assert_eq!(cave.regions[Point::new(1, 1)], 2);
        assert_eq!(cave.regions[Point::new(10, 10)], 0);
    }

    #[test]
    fn test_risk() {
        let mut cave = Day22::parse(EXAMPLE).unwrap();
        assert_eq!(<Day22 as PartSolver<1>>::solve(&mut cave).unwrap(), "114");
    }

    #[test]
    fn test_rescue() {
        let mut cave = Day22::parse(EXAMPLE).unwrap();
        assert_eq!(<Day22 as PartSolver<2>>::solve(&mut cave).unwrap(), "45");
    }

    #[test]
    fn test_target_and_depth_bounds() {
        assert!(Day22::parse("depth: 510\ntarget: 18446744073709551615,10\n").is_err());
        assert!(Day22::parse("depth: 510\ntarget: 10,2001\n").is_err());

        // depth only matters modulo the erosion modulus
        let mut huge = Day22::parse("depth: 18446744073709551615\ntarget: 10,10\n").unwrap();
        let reduced = Cave::new(u64::MAX % EROSION_MODULUS, Point::new(10, 10));
        assert_eq!(
            <Day22 as PartSolver<1>>::solve(&mut huge).unwrap(),
            reduced.risk().to_string()
        );
    }

    #[test]
    fn test_malformed() {
        assert!(Day22::parse("depth: 510\n").is_err());
        assert!(Day22::parse("510\n10,10").is_err());
    }
}
