//! Reservoir Research

use crate::utils::{Grid, Point, ints_n, lines_with};
use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 17, tags = ["2018", "grid"])]
pub struct Day17;

const SPRING_X: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Sand,
    Clay,
    /// Water that passed through and drained away
    Flowing,
    /// Water at rest on clay or other still water
    Still,
}

impl Tile {
    fn supports(self) -> bool {
        matches!(self, Tile::Clay | Tile::Still)
    }
}

/// The scanned slice of ground after water has filled it
pub struct Ground {
    tiles: Grid<Tile>,
    min_y: usize,
    max_y: usize,
}

impl Ground {
    fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles.get(Point::new(x, y)).copied().unwrap_or(Tile::Sand)
    }

    fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if let Some(t) = self.tiles.get_mut(Point::new(x, y)) {
            *t = tile;
        }
    }

    /// Water entering `(x, y)` from above falls until it lands on something,
    /// then fills upward row by row for as long as each row is walled in.
    fn fall(&mut self, x: usize, top: usize) {
        let mut y = top;
        loop {
            if y > self.max_y {
                return;
            }
            match self.tile(x, y) {
                Tile::Sand => self.set(x, y, Tile::Flowing),
                Tile::Flowing => return,
                Tile::Clay | Tile::Still => break,
            }
            y += 1;
        }

        // `y` is the supporting tile; fill the rows above it that this stream passed
        while y > top {
            y -= 1;
            let (left, left_wall) = self.spread(x, y, false);
            let (right, right_wall) = self.spread(x, y, true);
            let settled = left_wall && right_wall;
            let tile = if settled { Tile::Still } else { Tile::Flowing };
            for cx in left..=right {
                self.set(cx, y, tile);
            }
            if !settled {
                return;
            }
        }
    }

    /// Walk sideways from `(x, y)` while the row below holds water up.
    /// Returns the last tile reached and whether clay stopped the walk.
    fn spread(&mut self, x: usize, y: usize, rightward: bool) -> (usize, bool) {
        let mut cx = x;
        loop {
            if self.tile(cx, y + 1) == Tile::Sand {
                self.fall(cx, y + 1);
            }
            if !self.tile(cx, y + 1).supports() {
                return (cx, false);
            }
            let next = if rightward { cx.checked_add(1) } else { cx.checked_sub(1) };
            let Some(next) = next else {
                return (cx, false);
            };
            if self.tile(next, y) == Tile::Clay {
                return (cx, true);
            }
            cx = next;
        }
    }

    fn count(&self, pred: impl Fn(Tile) -> bool) -> usize {
        self.tiles
            .enumerate()
            .filter(|(p, t)| (self.min_y..=self.max_y).contains(&p.y) && pred(**t))
            .count()
    }
}

/// `x=495, y=2..7` or `y=7, x=495..501`, as `(x0, x1, y0, y1)` inclusive
fn vein(line: &str) -> anyhow::Result<(usize, usize, usize, usize)> {
    let [fixed, from, to] = ints_n::<usize, 3>(line)?;
    if from > to {
        bail!("range {from}..{to} runs backwards");
    }
    match line.as_bytes().first() {
        Some(b'x') => Ok((fixed, fixed, from, to)),
        Some(b'y') => Ok((from, to, fixed, fixed)),
        _ => bail!("expected a line starting with `x=` or `y=`"),
    }
}

impl AocParser for Day17 {
    type SharedData<'a> = Ground;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let veins = lines_with(input, vein)?;
        if veins.is_empty() {
            return Err(ParseError::MissingData("no clay veins".into()));
        }
        let min_x = veins.iter().map(|v| v.0).min().unwrap_or(0).min(SPRING_X);
        let max_x = veins.iter().map(|v| v.1).max().unwrap_or(0).max(SPRING_X);
        let min_y = veins.iter().map(|v| v.2).min().unwrap_or(0);
        let max_y = veins.iter().map(|v| v.3).max().unwrap_or(0);

        // One spare column either side lets water spill past the outermost clay
        let origin = min_x.saturating_sub(1);
        let mut tiles = Grid::new(max_x - origin + 2, max_y + 2, Tile::Sand);
        for &(x0, x1, y0, y1) in &veins {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    tiles[Point::new(x - origin, y)] = Tile::Clay;
                }
            }
        }

        let mut ground = Ground {
            tiles,
            min_y,
            max_y,
        };
        ground.fall(SPRING_X - origin, 1);
        Ok(ground)
    }
}

impl PartSolver<1> for Day17 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .count(|t| matches!(t, Tile::Flowing | Tile::Still))
            .to_string())
    }
}

impl PartSolver<2> for Day17 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count(|t| t == Tile::Still).to_string())
    }
}
