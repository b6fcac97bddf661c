//! Chronal Charge

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 11, tags = ["2018"])]
pub struct Day11;

const SIZE: usize = 300;

/// Summed-area table over the 300x300 fuel grid, with a zero row and column
/// in front so `table[y][x]` is the total of cells `1..=x` by `1..=y`
pub struct PowerGrid {
    table: Vec<[i32; SIZE + 1]>,
}

impl PowerGrid {
    pub fn new(serial: i32) -> Self {
        let mut table = vec![[0i32; SIZE + 1]; SIZE + 1];
        for y in 1..=SIZE {
            for x in 1..=SIZE {
                table[y][x] = power_level(x as i32, y as i32, serial) + table[y - 1][x]
                    + table[y][x - 1]
                    - table[y - 1][x - 1];
            }
        }
        Self { table }
    }

    /// Total power of the `size` square whose top-left cell is `(x, y)`
    fn square(&self, x: usize, y: usize, size: usize) -> i32 {
        let (x0, y0, x1, y1) = (x - 1, y - 1, x + size - 1, y + size - 1);
        self.table[y1][x1] - self.table[y0][x1] - self.table[y1][x0] + self.table[y0][x0]
    }

    /// Best `(power, x, y)` among squares of one size
    fn best_of_size(&self, size: usize) -> (i32, usize, usize) {
        let mut best = (i32::MIN, 0, 0);
        for y in 1..=SIZE + 1 - size {
            for x in 1..=SIZE + 1 - size {
                let p = self.square(x, y, size);
                if p > best.0 {
                    best = (p, x, y);
                }
            }
        }
        best
    }

    pub fn best_square(&self) -> (usize, usize) {
        let (_, x, y) = self.best_of_size(3);
        (x, y)
    }

    pub fn best_any_size(&self) -> (usize, usize, usize) {
        let (_, x, y, size) = (1..=SIZE)
            .map(|size| {
                let (p, x, y) = self.best_of_size(size);
                (p, x, y, size)
            })
            .fold((i32::MIN, 0, 0, 0), |best, cand| if cand.0 > best.0 { cand } else { best });
        (x, y, size)
    }
}

/// Widened to i64 so any i32 serial stays in range
pub fn power_level(x: i32, y: i32, serial: i32) -> i32 {
    let rack = i64::from(x) + 10;
    let hundreds = ((rack * i64::from(y) + i64::from(serial)) * rack / 100) % 10;
    hundreds as i32 - 5
}

impl AocParser for Day11 {
    type SharedData<'a> = PowerGrid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let serial = input
            .trim()
            .parse()
            .map_err(|e| ParseError::InvalidFormat(format!("grid serial number: {e}")))?;
        Ok(PowerGrid::new(serial))
    }
}

impl PartSolver<1> for Day11 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (x, y) = shared.best_square();
        Ok(format!("{x},{y}"))
    }
}

impl PartSolver<2> for Day11 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (x, y, size) = shared.best_any_size();
        Ok(format!("{x},{y},{size}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_level() {
        assert_eq!(power_level(3, 5, 8), 4);
        assert_eq!(power_level(122, 79, 57), -5);
        assert_eq!(power_level(217, 196, 39), 0);
        assert_eq!(power_level(101, 153, 71), 4);
    }

    #[test]
    fn test_extreme_serials() {
        assert!(Day11::parse("2147483647").is_ok());
        assert!(Day11::parse("-2147483648").is_ok());
        assert!(Day11::parse("2147483648").is_err());
        assert!((-14..=4).contains(&power_level(300, 300, i32::MAX)));
    }

    #[test]
    fn test_best_square() {
        assert_eq!(PowerGrid::new(18).best_square(), (33, 45));
        assert_eq!(PowerGrid::new(42).best_square(), (21, 61));
    }

    #[test]
    fn test_best_any_size() {
        let mut grid = Day11::parse("18\n").unwrap();
        assert_eq!(<Day11 as PartSolver<2>>::solve(&mut grid).unwrap(), "90,269,16");
        assert_eq!(PowerGrid::new(42).best_any_size(), (232, 251, 12));
    }
}
