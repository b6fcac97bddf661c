//! The six-register device language shared by days 16, 19 and 21

use anyhow::{Context, anyhow, bail};
use std::fmt;
use std::str::FromStr;

pub type Word = u64;

/// The sixteen device opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    Addr,
    Addi,
    Mulr,
    Muli,
    Banr,
    Bani,
    Borr,
    Bori,
    Setr,
    Seti,
    Gtir,
    Gtri,
    Gtrr,
    Eqir,
    Eqri,
    Eqrr,
}

impl Opcode {
    pub const ALL: [Opcode; 16] = [
        Opcode::Addr,
        Opcode::Addi,
        Opcode::Mulr,
        Opcode::Muli,
        Opcode::Banr,
        Opcode::Bani,
        Opcode::Borr,
        Opcode::Bori,
        Opcode::Setr,
        Opcode::Seti,
        Opcode::Gtir,
        Opcode::Gtri,
        Opcode::Gtrr,
        Opcode::Eqir,
        Opcode::Eqri,
        Opcode::Eqrr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Addr => "addr",
            Opcode::Addi => "addi",
            Opcode::Mulr => "mulr",
            Opcode::Muli => "muli",
            Opcode::Banr => "banr",
            Opcode::Bani => "bani",
            Opcode::Borr => "borr",
            Opcode::Bori => "bori",
            Opcode::Setr => "setr",
            Opcode::Seti => "seti",
            Opcode::Gtir => "gtir",
            Opcode::Gtri => "gtri",
            Opcode::Gtrr => "gtrr",
            Opcode::Eqir => "eqir",
            Opcode::Eqri => "eqri",
            Opcode::Eqrr => "eqrr",
        }
    }

    /// Execute on `regs`. Returns `None` when an operand names a register
    /// that does not exist, leaving `regs` untouched.
    pub fn apply(self, a: Word, b: Word, c: Word, regs: &mut [Word]) -> Option<()> {
        let reg = |i: Word| regs.get(usize::try_from(i).ok()?).copied();
        let value = match self {
            Opcode::Addr => reg(a)?.wrapping_add(reg(b)?),
            Opcode::Addi => reg(a)?.wrapping_add(b),
            Opcode::Mulr => reg(a)?.wrapping_mul(reg(b)?),
            Opcode::Muli => reg(a)?.wrapping_mul(b),
            Opcode::Banr => reg(a)? & reg(b)?,
            Opcode::Bani => reg(a)? & b,
            Opcode::Borr => reg(a)? | reg(b)?,
            Opcode::Bori => reg(a)? | b,
            Opcode::Setr => reg(a)?,
            Opcode::Seti => a,
            Opcode::Gtir => Word::from(a > reg(b)?),
            Opcode::Gtri => Word::from(reg(a)? > b),
            Opcode::Gtrr => Word::from(reg(a)? > reg(b)?),
            Opcode::Eqir => Word::from(a == reg(b)?),
            Opcode::Eqri => Word::from(reg(a)? == b),
            Opcode::Eqrr => Word::from(reg(a)? == reg(b)?),
        };
        *regs.get_mut(usize::try_from(c).ok()?)? = value;
        Some(())
    }
}

impl FromStr for Opcode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| anyhow!("unknown opcode {s:?}"))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Opcode,
    pub a: Word,
    pub b: Word,
    pub c: Word,
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let op = parts.next().context("empty instruction")?.parse()?;
        let mut operand = || -> anyhow::Result<Word> {
            let text = parts.next().context("missing operand")?;
            text.parse().with_context(|| format!("bad operand {text:?}"))
        };
        let (a, b, c) = (operand()?, operand()?, operand()?);
        Ok(Instruction { op, a, b, c })
    }
}

/// A program with its instruction pointer bound to a register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub ip_register: usize,
    pub instructions: Vec<Instruction>,
}

impl FromStr for Program {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());
        let header = lines.next().context("empty program")?;
        let ip_register: usize = header
            .strip_prefix("#ip ")
            .with_context(|| format!("expected `#ip N`, found {header:?}"))?
            .trim()
            .parse()?;
        if ip_register >= REGISTERS {
            bail!("ip bound to missing register {ip_register}");
        }
        let instructions = lines
            .enumerate()
            .map(|(i, line)| {
                line.parse()
                    .with_context(|| format!("instruction {i}: {line:?}"))
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(Program {
            ip_register,
            instructions,
        })
    }
}

pub const REGISTERS: usize = 6;

/// Execution state for a [`Program`]
///
/// The instruction pointer lives outside the registers: it is copied into
/// the bound register before each instruction and read back (plus one)
/// afterwards, so a halted machine's registers show the last write-back.
pub struct Machine<'p> {
    program: &'p Program,
    ip: Word,
    pub registers: [Word; REGISTERS],
}

impl<'p> Machine<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            ip: 0,
            registers: [0; REGISTERS],
        }
    }

    pub fn ip(&self) -> Word {
        self.ip
    }

    /// The instruction about to run, or `None` once the program has halted
    pub fn current(&self) -> Option<&'p Instruction> {
        let program: &'p Program = self.program;
        usize::try_from(self.ip)
            .ok()
            .and_then(|ip| program.instructions.get(ip))
    }

    /// Run one instruction. Returns `Ok(false)` when the program has halted.
    pub fn step(&mut self) -> anyhow::Result<bool> {
        let Some(instr) = self.current() else {
            return Ok(false);
        };
        let bound = self.program.ip_register;
        self.registers[bound] = self.ip;
        instr
            .op
            .apply(instr.a, instr.b, instr.c, &mut self.registers)
            .with_context(|| format!("bad register in {} at ip {}", instr.op, self.ip))?;
        self.ip = self.registers[bound].wrapping_add(1);
        Ok(true)
    }

    /// Run until the program halts
    pub fn run(&mut self) -> anyhow::Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Run until the instruction pointer reaches `target`. Returns `false`
    /// if the program halts first.
    pub fn run_until(&mut self, target: Word) -> anyhow::Result<bool> {
        loop {
            if self.ip() == target {
                return Ok(true);
            }
            if !self.step()? {
                return Ok(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_matches_three_opcodes() {
        // Before: [3, 2, 1, 1]; 9 2 1 2; After: [3, 2, 2, 1]
        let matching: Vec<_> = Opcode::ALL
            .into_iter()
            .filter(|op| {
                let mut regs = [3, 2, 1, 1];
                op.apply(2, 1, 2, &mut regs).is_some() && regs == [3, 2, 2, 1]
            })
            .collect();
        assert_eq!(matching, vec![Opcode::Addi, Opcode::Mulr, Opcode::Seti]);
    }

    #[test]
    fn test_bad_register_is_rejected() {
        let mut regs = [0; 4];
        assert!(Opcode::Addr.apply(7, 0, 0, &mut regs).is_none());
        assert!(Opcode::Seti.apply(7, 0, 4, &mut regs).is_none());
        assert!(Opcode::Seti.apply(7, 0, 3, &mut regs).is_some());
        assert_eq!(regs, [0, 0, 0, 7]);
    }

    #[test]
    fn test_program_runs_to_halt() {
        let program: Program = "#ip 0\nseti 5 0 1\nseti 6 0 2\naddi 0 1 0\naddr 1 2 3\nsetr 1 0 0\nseti 8 0 4\nseti 9 0 5"
            .parse()
            .unwrap();
        let mut machine = Machine::new(&program);
        machine.run().unwrap();
        assert_eq!(machine.registers, [6, 5, 6, 0, 0, 9]);
        assert_eq!(machine.ip(), 7);
    }

    #[test]
    fn test_parse_errors() {
        assert!("seti 1 2 3".parse::<Program>().is_err());
        assert!("#ip 0\nfoo 1 2 3".parse::<Program>().is_err());
        assert!("#ip 0\nseti 1 2".parse::<Program>().is_err());
        assert!("#ip 9\nseti 1 2 3".parse::<Program>().is_err());
    }
}
