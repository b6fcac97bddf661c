//! Marble Mania

use crate::utils::ints_n;
use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 9, tags = ["2018"])]
pub struct Day09;

#[derive(Debug, Clone, Copy)]
pub struct Game {
    players: usize,
    last_marble: usize,
}

impl AocParser for Day09 {
    type SharedData<'a> = Game;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<Game> {
            let [players, last_marble] = ints_n::<usize, 2>(input.trim())?;
            if players == 0 {
                bail!("a game needs at least one player");
            }
            Ok(Game {
                players,
                last_marble,
            })
        };
        parse().map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// Winning score, with the circle kept as a doubly linked list over marble numbers
pub fn high_score(players: usize, last_marble: usize) -> u64 {
    let mut next = vec![0usize; last_marble + 1];
    let mut prev = vec![0usize; last_marble + 1];
    let mut scores = vec![0u64; players];
    let mut current = 0;

    for marble in 1..=last_marble {
        if marble % 23 == 0 {
            for _ in 0..7 {
                current = prev[current];
            }
            scores[(marble - 1) % players] += (marble + current) as u64;
            let (p, n) = (prev[current], next[current]);
            next[p] = n;
            prev[n] = p;
            current = n;
        } else {
            let a = next[current];
            let b = next[a];
            next[a] = marble;
            prev[marble] = a;
            next[marble] = b;
            prev[b] = marble;
            current = marble;
        }
    }
    scores.into_iter().max().unwrap_or(0)
}

impl PartSolver<1> for Day09 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(high_score(shared.players, shared.last_marble).to_string())
    }
}

impl PartSolver<2> for Day09 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(high_score(shared.players, shared.last_marble * 100).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples() {
        assert_eq!(high_score(9, 25), 32);
        assert_eq!(high_score(10, 1618), 8317);
        assert_eq!(high_score(13, 7999), 146373);
        assert_eq!(high_score(17, 1104), 2764);
        assert_eq!(high_score(21, 6111), 54718);
        assert_eq!(high_score(30, 5807), 37305);
    }

    #[test]
    fn test_parse() {
        let mut game = Day09::parse("10 players; last marble is worth 1618 points\n").unwrap();
        assert_eq!(<Day09 as PartSolver<1>>::solve(&mut game).unwrap(), "8317");
        assert!(Day09::parse("0 players; last marble is worth 25 points").is_err());
    }
}
