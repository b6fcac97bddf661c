//! Mine Cart Madness

use crate::utils::{Grid, Point, solve_failed};
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 13, tags = ["2018", "grid"])]
pub struct Day13;

/// Give up on a collision after this many ticks
const MAX_TICKS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    fn left(self) -> Self {
        match self {
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
            Heading::Right => Heading::Up,
        }
    }

    fn right(self) -> Self {
        self.left().left().left()
    }
}

#[derive(Debug, Clone, Copy)]
struct Cart {
    pos: Point,
    heading: Heading,
    /// Intersections passed so far; picks left, straight, right in turn
    turns: usize,
    crashed: bool,
}

impl Cart {
    fn advance(&mut self, tracks: &Grid<u8>) -> anyhow::Result<()> {
        let Point { x, y } = self.pos;
        let next = match self.heading {
            Heading::Up => y.checked_sub(1).map(|y| Point::new(x, y)),
            Heading::Left => x.checked_sub(1).map(|x| Point::new(x, y)),
            Heading::Right => Some(Point::new(x + 1, y)),
            Heading::Down => Some(Point::new(x, y + 1)),
        };
        let next = next.ok_or_else(|| anyhow!("cart at {} ran off the map", self.pos))?;
        self.heading = match (tracks.get(next).copied(), self.heading) {
            (Some(b'|' | b'-'), h) => h,
            (Some(b'/'), Heading::Up | Heading::Down) => self.heading.right(),
            (Some(b'/'), _) => self.heading.left(),
            (Some(b'\\'), Heading::Up | Heading::Down) => self.heading.left(),
            (Some(b'\\'), _) => self.heading.right(),
            (Some(b'+'), h) => {
                self.turns += 1;
                match self.turns % 3 {
                    1 => h.left(),
                    2 => h,
                    _ => h.right(),
                }
            }
            _ => bail!("cart at {} left the track", self.pos),
        };
        self.pos = next;
        Ok(())
    }
}

pub struct Tracks {
    grid: Grid<u8>,
    carts: Vec<Cart>,
}

impl AocParser for Day13 {
    type SharedData<'a> = Tracks;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut carts = Vec::new();
        let grid = Grid::parse(input, |pos, b| {
            let (track, heading) = match b {
                b'^' => (b'|', Some(Heading::Up)),
                b'v' => (b'|', Some(Heading::Down)),
                b'<' => (b'-', Some(Heading::Left)),
                b'>' => (b'-', Some(Heading::Right)),
                b'|' | b'-' | b'/' | b'\\' | b'+' | b' ' => (b, None),
                other => {
                    return Err(crate::utils::invalid(
                        pos.y + 1,
                        format!("unexpected {:?} at column {}", char::from(other), pos.x + 1),
                    ));
                }
            };
            if let Some(heading) = heading {
                carts.push(Cart {
                    pos,
                    heading,
                    turns: 0,
                    crashed: false,
                });
            }
            Ok(track)
        })?;
        if carts.is_empty() {
            return Err(ParseError::MissingData("no carts on the tracks".into()));
        }
        Ok(Tracks { grid, carts })
    }
}

/// Run the carts, which move one at a time in reading order. Returns the
/// first crash site when `until_first_crash`, otherwise the position of the
/// last cart standing once a tick ends with one cart left.
fn run(tracks: &Tracks, until_first_crash: bool) -> anyhow::Result<Point> {
    let mut carts = tracks.carts.clone();
    for _ in 0..MAX_TICKS {
        carts.sort_by_key(|c| c.pos);
        for i in 0..carts.len() {
            if carts[i].crashed {
                continue;
            }
            carts[i].advance(&tracks.grid)?;
            let pos = carts[i].pos;
            let hit = (0..carts.len()).find(|&j| j != i && !carts[j].crashed && carts[j].pos == pos);
            if let Some(j) = hit {
                if until_first_crash {
                    return Ok(pos);
                }
                carts[i].crashed = true;
                carts[j].crashed = true;
            }
        }
        carts.retain(|c| !c.crashed);
        match carts.as_slice() {
            [] => bail!("every cart crashed"),
            [last] if !until_first_crash => return Ok(last.pos),
            _ => {}
        }
    }
    Err(anyhow!("no outcome after {MAX_TICKS} ticks"))
}

impl PartSolver<1> for Day13 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run(shared, true).map(|p| p.to_string()).map_err(solve_failed)
    }
}

impl PartSolver<2> for Day13 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run(shared, false).map(|p| p.to_string()).map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST_CRASH: &str = r"/->-\
|   |  /----\
| /-+--+-\  |
| | |  | v  |
\-+-/  \-+--/
  \------/
";

    const LAST_CART: &str = r"/>-<\
|   |
| /<+-\
| | | v
\>+</ |
  |   ^
  \<->/
";

    #[test]
    fn test_first_crash() {
        let mut tracks = Day13::parse(FIRST_CRASH).unwrap();
        assert_eq!(<Day13 as PartSolver<1>>::solve(&mut tracks).unwrap(), "7,3");
    }

    #[test]
    fn test_last_cart() {
        let mut tracks = Day13::parse(LAST_CART).unwrap();
        assert_eq!(<Day13 as PartSolver<2>>::solve(&mut tracks).unwrap(), "6,4");
    }

    #[test]
    fn test_straight_collision() {
        let tracks = Day13::parse("->---<-\n").unwrap();
        assert_eq!(run(&tracks, true).unwrap(), Point::new(3, 0));
        assert!(run(&tracks, false).is_err());
    }

    #[test]
    fn test_unknown_glyph() {
        assert!(Day13::parse("->-x-").is_err());
    }
}
