//! Alchemical Reduction

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 5, tags = ["2018"])]
pub struct Day05;

pub struct Polymer<'a> {
    units: &'a [u8],
    reacted: Option<Vec<u8>>,
}

impl AocParser for Day05 {
    type SharedData<'a> = Polymer<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let units = input.trim().as_bytes();
        if let Some(pos) = units.iter().position(|b| !b.is_ascii_alphabetic()) {
            return Err(ParseError::InvalidFormat(format!(
                "unit {} is not a letter",
                pos + 1
            )));
        }
        Ok(Polymer {
            units,
            reacted: None,
        })
    }
}

/// Collapse adjacent same-type, opposite-polarity units until none remain
fn react(units: impl IntoIterator<Item = u8>) -> Vec<u8> {
    let mut stack: Vec<u8> = Vec::new();
    for unit in units {
        match stack.last() {
            Some(&top) if top ^ unit == 0x20 => {
                stack.pop();
            }
            _ => stack.push(unit),
        }
    }
    stack
}

fn reacted<'s>(polymer: &'s mut Polymer<'_>) -> &'s [u8] {
    let units = polymer.units;
    polymer
        .reacted
        .get_or_insert_with(|| react(units.iter().copied()))
}

impl PartSolver<1> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reacted(shared).len().to_string())
    }
}

impl PartSolver<2> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Removing a type from the reacted polymer gives the same result as
        // removing it from the original, on a shorter input
        let base = reacted(shared);
        let shortest = (b'a'..=b'z')
            .map(|t| react(base.iter().copied().filter(|u| u.to_ascii_lowercase() != t)).len())
            .min()
            .unwrap_or(0);
        Ok(shortest.to_string())
    }
}
