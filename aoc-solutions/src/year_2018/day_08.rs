//! Memory Maneuver

use crate::utils::ints;
use anyhow::Context;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 8, tags = ["2018"])]
pub struct Day08;

#[derive(Debug)]
pub struct Node {
    children: Vec<Node>,
    metadata: Vec<usize>,
}

impl Node {
    fn read(nums: &mut impl Iterator<Item = usize>) -> anyhow::Result<Node> {
        let child_count = nums.next().context("missing child count")?;
        let meta_count = nums.next().context("missing metadata count")?;
        let children = (0..child_count)
            .map(|_| Node::read(nums))
            .collect::<anyhow::Result<_>>()?;
        let metadata = (0..meta_count)
            .map(|_| nums.next().context("missing metadata entry"))
            .collect::<anyhow::Result<_>>()?;
        Ok(Node { children, metadata })
    }

    fn metadata_sum(&self) -> usize {
        self.metadata.iter().sum::<usize>()
            + self.children.iter().map(Node::metadata_sum).sum::<usize>()
    }

    fn value(&self) -> usize {
        if self.children.is_empty() {
            return self.metadata.iter().sum();
        }
        self.metadata
            .iter()
            .filter_map(|&i| self.children.get(i.checked_sub(1)?))
            .map(Node::value)
            .sum()
    }
}

impl AocParser for Day08 {
    type SharedData<'a> = Node;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let nums = ints::<usize>(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        let mut iter = nums.into_iter();
        let root = Node::read(&mut iter).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if iter.next().is_some() {
            return Err(ParseError::InvalidFormat("trailing numbers after the root node".into()));
        }
        Ok(root)
    }
}

impl PartSolver<1> for Day08 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.metadata_sum().to_string())
    }
}

impl PartSolver<2> for Day08 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2 3 0 3 10 11 12 1 1 0 1 99 2 1 1 2";

    #[test]
    fn test_metadata_sum() {
        let mut root = Day08::parse(EXAMPLE).unwrap();
        assert_eq!(<Day08 as PartSolver<1>>::solve(&mut root).unwrap(), "138");
    }

    #[test]
    fn test_root_value() {
        let mut root = Day08::parse(EXAMPLE).unwrap();
        assert_eq!(<Day08 as PartSolver<2>>::solve(&mut root).unwrap(), "66");
    }

    #[test]
    fn test_truncated_and_trailing() {
        assert!(Day08::parse("2 3 0 3 10 11").is_err());
        assert!(Day08::parse("0 1 5 7").is_err());
    }
}
