//! Chocolate Charts

use crate::utils::solve_failed;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 14, tags = ["2018", "slow"])]
pub struct Day14;

/// Scoreboard length limit for both parts
const MAX_RECIPES: usize = 200_000_000;

struct Scoreboard {
    scores: Vec<u8>,
    elves: [usize; 2],
}

impl Scoreboard {
    fn new() -> Self {
        Self {
            scores: vec![3, 7],
            elves: [0, 1],
        }
    }

    /// Combine the two current recipes; appends one or two scores
    fn round(&mut self) {
        let [a, b] = self.elves;
        let sum = self.scores[a] + self.scores[b];
        if sum >= 10 {
            self.scores.push(sum / 10);
        }
        self.scores.push(sum % 10);
        let len = self.scores.len();
        self.elves = [
            (a + 1 + usize::from(self.scores[a])) % len,
            (b + 1 + usize::from(self.scores[b])) % len,
        ];
    }
}

/// The ten scores right after the first `after` recipes
pub fn ten_after(after: usize) -> anyhow::Result<String> {
    let end = after
        .checked_add(10)
        .filter(|&end| end <= MAX_RECIPES)
        .ok_or_else(|| anyhow!("{after} recipes is past the {MAX_RECIPES} limit"))?;
    let mut board = Scoreboard::new();
    while board.scores.len() < end {
        board.round();
    }
    Ok(board.scores[after..end]
        .iter()
        .map(|&d| char::from(b'0' + d))
        .collect())
}

/// How many recipes appear before `digits` first shows up on the scoreboard
pub fn recipes_before(digits: &[u8]) -> anyhow::Result<usize> {
    if digits.is_empty() {
        bail!("empty score sequence");
    }
    let mut board = Scoreboard::new();
    let mut checked = 0;
    while board.scores.len() < MAX_RECIPES {
        board.round();
        // A round adds up to two scores, so test every new end position
        while checked + digits.len() <= board.scores.len() {
            if board.scores[checked..checked + digits.len()] == *digits {
                return Ok(checked);
            }
            checked += 1;
        }
    }
    Err(anyhow!("sequence not found within {MAX_RECIPES} recipes"))
}

impl AocParser for Day14 {
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let digits = input.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(format!(
                "expected a number, found {digits:?}"
            )));
        }
        Ok(digits)
    }
}

impl PartSolver<1> for Day14 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let after = shared
            .parse()
            .map_err(|e: std::num::ParseIntError| solve_failed(e.into()))?;
        ten_after(after).map_err(solve_failed)
    }
}

impl PartSolver<2> for Day14 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let digits: Vec<u8> = shared.bytes().map(|b| b - b'0').collect();
        recipes_before(&digits)
            .map(|n| n.to_string())
            .map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_after() {
        assert_eq!(ten_after(9).unwrap(), "5158916779");
        assert_eq!(ten_after(5).unwrap(), "0124515891");
        assert_eq!(ten_after(18).unwrap(), "9251071085");
        assert_eq!(ten_after(2018).unwrap(), "5941429882");
    }

    #[test]
    fn test_huge_recipe_count_is_rejected() {
        assert!(ten_after(usize::MAX).is_err());
        assert!(ten_after(MAX_RECIPES).is_err());

        let mut input = Day14::parse("18446744073709551615").unwrap();
        assert!(matches!(
            <Day14 as PartSolver<1>>::solve(&mut input),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_recipes_before() {
        assert_eq!(recipes_before(&[5, 1, 5, 8, 9]).unwrap(), 9);
        assert_eq!(recipes_before(&[0, 1, 2, 4, 5]).unwrap(), 5);
        assert_eq!(recipes_before(&[9, 2, 5, 1, 0]).unwrap(), 18);
        assert_eq!(recipes_before(&[5, 9, 4, 1, 4]).unwrap(), 2018);
    }

    #[test]
    fn test_part_two_keeps_leading_zeros() {
        let mut input = Day14::parse("01245\n").unwrap();
        assert_eq!(<Day14 as PartSolver<2>>::solve(&mut input).unwrap(), "5");
    }
}
