//! Chronal Conversion

use crate::utils::elfcode::{Instruction, Machine, Opcode, Program, Word};
use crate::utils::solve_failed;
use anyhow::{Context, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 21, tags = ["2018", "elfcode"])]
pub struct Day21;

const MASK: Word = 0xFF_FFFF;

impl AocParser for Day21 {
    type SharedData<'a> = Program;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .parse()
            .map_err(|e: anyhow::Error| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// The only place register 0 is read: `eqrr X 0 _` (or `eqrr 0 X _`).
/// Returns its index and the register compared against r0.
fn halting_check(program: &Program) -> anyhow::Result<(usize, usize)> {
    program
        .instructions
        .iter()
        .enumerate()
        .find_map(|(i, ins)| match ins {
            Instruction {
                op: Opcode::Eqrr,
                a,
                b: 0,
                ..
            } => Some((i, *a)),
            Instruction {
                op: Opcode::Eqrr,
                a: 0,
                b,
                ..
            } => Some((i, *b)),
            _ => None,
        })
        .context("program never compares against register 0")
        .and_then(|(i, reg)| Ok((i, usize::try_from(reg)?)))
}

/// The value r0 must hold for the program to halt as soon as possible:
/// whatever the compared register holds the first time the check runs.
fn first_halting_value(program: &Program) -> anyhow::Result<Word> {
    let (check, reg) = halting_check(program)?;
    let mut machine = Machine::new(program);
    if !machine.run_until(check as Word)? {
        bail!("program halted before reaching its check");
    }
    machine
        .registers
        .get(reg)
        .copied()
        .context("check compares a missing register")
}

/// The hash loop the program runs between checks, with its two constants
/// lifted from the instructions.
struct Generator {
    seed: Word,
    multiplier: Word,
}

impl Generator {
    /// The seed is the `seti` right after the `bori _ 65536 _` that starts an
    /// iteration; the multiplier is the first `muli` after that.
    fn from_program(program: &Program) -> anyhow::Result<Self> {
        let ins = &program.instructions;
        let start = ins
            .iter()
            .position(|i| i.op == Opcode::Bori && i.b == 0x1_0000)
            .context("no `bori _ 65536 _` starting the hash loop")?;
        let seed = ins[start..]
            .iter()
            .find(|i| i.op == Opcode::Seti)
            .context("no seed after the loop start")?
            .a;
        let multiplier = ins[start..]
            .iter()
            .find(|i| i.op == Opcode::Muli)
            .context("no multiplier in the hash loop")?
            .b;
        Ok(Self { seed, multiplier })
    }

    /// The value compared against r0 after `previous`
    fn next(&self, previous: Word) -> Word {
        let mut bytes = previous | 0x1_0000;
        let mut value = self.seed;
        loop {
            value = (value.wrapping_add(bytes & 0xFF) & MASK).wrapping_mul(self.multiplier) & MASK;
            if bytes < 0x100 {
                return value;
            }
            bytes /= 0x100;
        }
    }
}

/// The r0 that halts after the most instructions while still halting: the
/// last new value the generator yields before it starts repeating
fn last_halting_value(program: &Program) -> anyhow::Result<Word> {
    let generator = Generator::from_program(program)?;
    let mut seen = HashSet::new();
    let mut last = None;
    let mut value = 0;
    loop {
        value = generator.next(value);
        if !seen.insert(value) {
            return last.context("generator repeated immediately");
        }
        last = Some(value);
    }
}

impl PartSolver<1> for Day21 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_halting_value(shared)
            .map(|r| r.to_string())
            .map_err(solve_failed)
    }
}

impl PartSolver<2> for Day21 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        last_halting_value(shared)
            .map(|r| r.to_string())
            .map_err(solve_failed)
    }
}
