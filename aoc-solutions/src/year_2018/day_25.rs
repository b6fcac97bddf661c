//! Four-Dimensional Adventure

use crate::utils::{ints_n, lines_with};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2018, day = 25, tags = ["2018"])]
pub struct Day25;

/// Points this close (or closer) belong to the same constellation
const LINK: i32 = 3;

type Point4 = [i32; 4];

impl AocParser for Day25 {
    type SharedData<'a> = Vec<Point4>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines_with(input, ints_n::<i32, 4>)
    }
}

fn distance(a: &Point4, b: &Point4) -> i32 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Disjoint sets over point indices
struct Constellations {
    parent: Vec<usize>,
}

impl Constellations {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn root(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn join(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.root(a), self.root(b));
        self.parent[ra] = rb;
    }

    fn count(&mut self) -> usize {
        (0..self.parent.len()).filter(|&i| self.root(i) == i).count()
    }
}

pub fn constellations(points: &[Point4]) -> usize {
    let mut sets = Constellations::new(points.len());
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().take(i) {
            if distance(a, b) <= LINK {
                sets.join(i, j);
            }
        }
    }
    sets.count()
}

impl PartSolver<1> for Day25 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(constellations(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(input: &str) -> usize {
        constellations(&Day25::parse(input).unwrap())
    }

    #[test]
    fn test_examples() {
        assert_eq!(
            count(" 0,0,0,0\n 3,0,0,0\n 0,3,0,0\n 0,0,3,0\n 0,0,0,3\n 0,0,0,6\n 9,0,0,0\n12,0,0,0\n"),
            2
        );
        assert_eq!(
            count(
                "-1,2,2,0\n0,0,2,-2\n0,0,0,-2\n-1,2,0,0\n-2,-2,-2,2\n\
                 3,0,2,-1\n-1,3,2,2\n-1,0,-1,0\n0,2,1,-2\n3,0,0,0\n"
            ),
            4
        );
        assert_eq!(
            count(
                "1,-1,0,1\n2,0,-1,0\n3,2,-1,0\n0,0,3,1\n0,0,-1,-1\n\
                 2,3,-2,0\n-2,2,0,0\n2,-2,0,-1\n1,-1,0,-1\n3,2,0,2\n"
            ),
            3
        );
        assert_eq!(
            count(
                "1,-1,-1,-2\n-2,-2,0,1\n0,2,1,3\n-2,3,-2,1\n0,2,3,-2\n\
                 -1,-1,1,-2\n0,-2,-1,0\n-2,2,3,-1\n1,2,2,0\n-1,-2,0,-2\n"
            ),
            8
        );
    }

    #[test]
    fn test_single_part() {
        use aoc_solver::{Solver, SolverExt};
        let mut points = Day25::parse("0,0,0,0\n").unwrap();
        assert_eq!(Day25::PARTS, 1);
        assert!(Day25::solve_part_checked_range(&mut points, 2).is_err());
    }
}
