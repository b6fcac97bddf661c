//! Chronal Classification

use crate::utils::elfcode::{Opcode, Word};
use crate::utils::{ints_n, invalid, solve_failed};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 16, tags = ["2018", "elfcode"])]
pub struct Day16;

type Registers = [Word; 4];
/// Opcode number followed by the operands `a`, `b`, `c`
type Encoded = [Word; 4];

#[derive(Debug, Clone)]
struct Sample {
    before: Registers,
    instruction: Encoded,
    after: Registers,
}

impl Sample {
    /// Bit `k` is set when `Opcode::ALL[k]` explains this sample
    fn candidates(&self) -> u16 {
        let [_, a, b, c] = self.instruction;
        Opcode::ALL
            .iter()
            .enumerate()
            .filter(|(_, op)| {
                let mut regs = self.before;
                op.apply(a, b, c, &mut regs).is_some() && regs == self.after
            })
            .fold(0, |mask, (k, _)| mask | 1 << k)
    }
}

pub struct Manual {
    samples: Vec<Sample>,
    program: Vec<Encoded>,
}

impl AocParser for Day16 {
    type SharedData<'a> = Manual;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut samples = Vec::new();
        let mut program = Vec::new();
        let mut lines = input.lines().map(str::trim).enumerate();

        while let Some((idx, line)) = lines.next() {
            if line.is_empty() {
                continue;
            }
            if line.starts_with("Before:") {
                let mut take = |what: &str| -> Result<Registers, ParseError> {
                    let (n, text) = lines
                        .next()
                        .ok_or_else(|| invalid(idx + 1, format!("sample without {what}")))?;
                    ints_n::<Word, 4>(text).map_err(|e| invalid(n + 1, e))
                };
                let before = ints_n::<Word, 4>(line).map_err(|e| invalid(idx + 1, e))?;
                let instruction = take("instruction")?;
                let after = take("`After:` line")?;
                samples.push(Sample {
                    before,
                    instruction,
                    after,
                });
            } else {
                program.push(ints_n::<Word, 4>(line).map_err(|e| invalid(idx + 1, e))?);
            }
        }
        Ok(Manual { samples, program })
    }
}

/// Work out which opcode each number stands for from the samples.
///
/// Each number starts with all sixteen candidates, narrowed by every sample
/// that uses it; numbers left with one candidate then rule that opcode out
/// everywhere else until nothing changes.
fn deduce(samples: &[Sample]) -> anyhow::Result<[Option<Opcode>; 16]> {
    let mut candidates = [u16::MAX; 16];
    for sample in samples {
        let number = usize::try_from(sample.instruction[0])
            .ok()
            .filter(|&n| n < 16)
            .with_context(|| format!("opcode number {} out of range", sample.instruction[0]))?;
        candidates[number] &= sample.candidates();
    }

    let mut settled = 0u16;
    loop {
        let newly: u16 = candidates
            .iter()
            .filter(|mask| mask.count_ones() == 1)
            .fold(0, |acc, mask| acc | mask)
            & !settled;
        if newly == 0 {
            break;
        }
        settled |= newly;
        for mask in candidates.iter_mut().filter(|m| m.count_ones() > 1) {
            *mask &= !settled;
        }
    }

    if let Some(number) = candidates.iter().position(|&m| m == 0) {
        bail!("no opcode fits every sample for number {number}");
    }
    Ok(candidates.map(|mask| {
        (mask.count_ones() == 1).then(|| Opcode::ALL[mask.trailing_zeros() as usize])
    }))
}

fn run(manual: &Manual) -> anyhow::Result<Word> {
    let table = deduce(&manual.samples)?;
    let mut regs: Registers = [0; 4];
    for (line, &[number, a, b, c]) in manual.program.iter().enumerate() {
        let op = usize::try_from(number)
            .ok()
            .and_then(|n| table.get(n).copied().flatten())
            .ok_or_else(|| anyhow!("opcode number {number} was not pinned down by the samples"))?;
        op.apply(a, b, c, &mut regs)
            .ok_or_else(|| anyhow!("instruction {} names a missing register", line + 1))?;
    }
    Ok(regs[0])
}

impl PartSolver<1> for Day16 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ambiguous = shared
            .samples
            .iter()
            .filter(|s| s.candidates().count_ones() >= 3)
            .count();
        Ok(ambiguous.to_string())
    }
}

impl PartSolver<2> for Day16 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run(shared).map(|r| r.to_string()).map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    const SAMPLE: &str = "\
Before: [3, 2, 1, 1]
9 2 1 2
After:  [3, 2, 2, 1]
";

    #[test]
    fn test_sample_behaves_like_three() {
        let mut manual = Day16::parse(SAMPLE).unwrap();
        assert_eq!(manual.samples.len(), 1);
        assert!(manual.program.is_empty());
        assert_eq!(<Day16 as PartSolver<1>>::solve(&mut manual).unwrap(), "1");
    }

    /// Opcode `k` in `Opcode::ALL` is encoded as `7k mod 16`
    fn number_of(op: Opcode) -> Word {
        let k = Opcode::ALL.iter().position(|&o| o == op).unwrap() as Word;
        k * 7 % 16
    }

    fn generated_manual() -> String {
        let befores: [Registers; 5] = [
            [3, 2, 1, 1],
            [0, 5, 9, 2],
            [7, 7, 1, 0],
            [12, 3, 6, 9],
            [1, 0, 2, 3],
        ];
        let operands = [(2, 1, 2), (0, 3, 1), (3, 3, 0), (1, 2, 3), (2, 0, 1)];
        let mut text = String::new();
        for op in Opcode::ALL {
            for before in befores {
                for (a, b, c) in operands {
                    let mut after = before;
                    op.apply(a, b, c, &mut after).unwrap();
                    writeln!(text, "Before: {before:?}").unwrap();
                    writeln!(text, "{} {a} {b} {c}", number_of(op)).unwrap();
                    writeln!(text, "After:  {after:?}\n").unwrap();
                }
            }
        }
        text.push_str("\n\n");
        writeln!(text, "{} 5 0 0", number_of(Opcode::Seti)).unwrap();
        writeln!(text, "{} 0 3 0", number_of(Opcode::Addi)).unwrap();
        writeln!(text, "{} 0 2 0", number_of(Opcode::Muli)).unwrap();
        text
    }

    #[test]
    fn test_deduce_every_opcode() {
        let manual = Day16::parse(&generated_manual()).unwrap();
        let table = deduce(&manual.samples).unwrap();
        for op in Opcode::ALL {
            assert_eq!(table[number_of(op) as usize], Some(op));
        }
    }

    #[test]
    fn test_run_program() {
        let mut manual = Day16::parse(&generated_manual()).unwrap();
        assert_eq!(manual.program.len(), 3);
        assert_eq!(<Day16 as PartSolver<2>>::solve(&mut manual).unwrap(), "16");
    }

    #[test]
    fn test_truncated_sample() {
        assert!(Day16::parse("Before: [3, 2, 1, 1]\n9 2 1 2\n").is_err());
    }
}
