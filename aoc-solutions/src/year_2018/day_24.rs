//! Immune System Simulator 20XX

use crate::utils::{invalid, solve_failed};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use regex::Regex;
use std::cmp::Reverse;
use std::sync::LazyLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 24, tags = ["2018", "simulation"])]
pub struct Day24;

static GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+) units each with (\d+) hit points (?:\(([^)]*)\) )?with an attack that does (\d+) (\w+) damage at initiative (\d+)$",
    )
    .unwrap()
});

/// Largest boost tried before giving up on the immune system
const MAX_BOOST: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Army {
    ImmuneSystem,
    Infection,
}

#[derive(Debug, Clone)]
pub struct Group<'a> {
    army: Army,
    units: u32,
    hit_points: u32,
    attack: u32,
    attack_type: &'a str,
    initiative: u32,
    weaknesses: Vec<&'a str>,
    immunities: Vec<&'a str>,
}

impl<'a> Group<'a> {
    fn parse(army: Army, line: &'a str) -> anyhow::Result<Self> {
        let caps = GROUP
            .captures(line)
            .ok_or_else(|| anyhow!("not a group description"))?;
        let num = |i: usize| -> anyhow::Result<u32> { Ok(caps[i].parse()?) };

        let mut group = Group {
            army,
            units: num(1)?,
            hit_points: num(2)?,
            attack: num(4)?,
            attack_type: caps.get(5).map_or("", |m| m.as_str()),
            initiative: num(6)?,
            weaknesses: Vec::new(),
            immunities: Vec::new(),
        };
        if group.hit_points == 0 {
            bail!("a group needs at least one hit point per unit");
        }
        if let Some(modifiers) = caps.get(3) {
            for clause in modifiers.as_str().split("; ") {
                let (kind, types) = clause
                    .split_once(" to ")
                    .with_context(|| format!("bad modifier {clause:?}"))?;
                let list = match kind {
                    "weak" => &mut group.weaknesses,
                    "immune" => &mut group.immunities,
                    _ => bail!("unknown modifier {kind:?}"),
                };
                list.extend(types.split(", "));
            }
        }
        Ok(group)
    }

    /// Exact in u64 for any u32 unit count and attack
    fn effective_power(&self) -> u64 {
        u64::from(self.units) * u64::from(self.attack)
    }

    /// Damage `self` would deal to `target` this instant
    fn damage_to(&self, target: &Group) -> u64 {
        if target.immunities.contains(&self.attack_type) {
            0
        } else if target.weaknesses.contains(&self.attack_type) {
            self.effective_power().saturating_mul(2)
        } else {
            self.effective_power()
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    /// `None` when the fight stalls with both armies alive
    pub winner: Option<Army>,
    pub units_left: u64,
}

fn units_left(groups: &[Group]) -> u64 {
    groups.iter().map(|g| u64::from(g.units)).sum()
}

fn select_targets(groups: &[Group]) -> Vec<Option<usize>> {
    let mut order: Vec<usize> = (0..groups.len()).filter(|&i| groups[i].units > 0).collect();
    order.sort_by_key(|&i| Reverse((groups[i].effective_power(), groups[i].initiative)));

    let mut targets = vec![None; groups.len()];
    let mut chosen = vec![false; groups.len()];
    for attacker in order {
        let a = &groups[attacker];
        let pick = (0..groups.len())
            .filter(|&d| !chosen[d] && groups[d].units > 0 && groups[d].army != a.army)
            .map(|d| {
                let key = (a.damage_to(&groups[d]), groups[d].effective_power(), groups[d].initiative);
                (key, d)
            })
            .filter(|&((damage, _, _), _)| damage > 0)
            .max();
        if let Some((_, d)) = pick {
            chosen[d] = true;
            targets[attacker] = Some(d);
        }
    }
    targets
}

/// Fight until one army is gone or a round kills nothing
pub fn battle(groups: &[Group], boost: u32) -> Outcome {
    let mut groups = groups.to_vec();
    for g in groups.iter_mut().filter(|g| g.army == Army::ImmuneSystem) {
        g.attack = g.attack.saturating_add(boost);
    }

    let mut by_initiative: Vec<usize> = (0..groups.len()).collect();
    by_initiative.sort_by_key(|&i| Reverse(groups[i].initiative));

    loop {
        let standing = |army| groups.iter().any(|g| g.army == army && g.units > 0);
        let winner = match (standing(Army::ImmuneSystem), standing(Army::Infection)) {
            (true, true) => None,
            (true, false) => Some(Army::ImmuneSystem),
            (false, _) => Some(Army::Infection),
        };
        if winner.is_some() {
            return Outcome {
                winner,
                units_left: units_left(&groups),
            };
        }

        let targets = select_targets(&groups);
        let mut killed = 0u64;
        for &attacker in &by_initiative {
            let Some(target) = targets[attacker] else {
                continue;
            };
            if groups[attacker].units == 0 {
                continue;
            }
            let damage = groups[attacker].damage_to(&groups[target]);
            let defender = &mut groups[target];
            let lost = (damage / u64::from(defender.hit_points)).min(u64::from(defender.units));
            // lost <= units, so it fits back in u32
            defender.units -= lost as u32;
            killed += lost;
        }

        if killed == 0 {
            return Outcome {
                winner: None,
                units_left: units_left(&groups),
            };
        }
    }
}

/// Smallest boost that lets the immune system win, with its surviving units
fn smallest_winning_boost(groups: &[Group]) -> anyhow::Result<(u32, u64)> {
    (1..=MAX_BOOST)
        .map(|boost| (boost, battle(groups, boost)))
        .find(|(_, outcome)| outcome.winner == Some(Army::ImmuneSystem))
        .map(|(boost, outcome)| (boost, outcome.units_left))
        .ok_or_else(|| anyhow!("no boost up to {MAX_BOOST} saves the reindeer"))
}

impl AocParser for Day24 {
    type SharedData<'a> = Vec<Group<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut army = None;
        let mut groups = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            match line {
                "" => {}
                "Immune System:" => army = Some(Army::ImmuneSystem),
                "Infection:" => army = Some(Army::Infection),
                _ => {
                    let army = army.ok_or_else(|| invalid(idx + 1, "group before army header"))?;
                    groups.push(Group::parse(army, line).map_err(|e| invalid(idx + 1, e))?);
                }
            }
        }
        if groups.is_empty() {
            return Err(ParseError::MissingData("no groups".into()));
        }
        Ok(groups)
    }
}

impl PartSolver<1> for Day24 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let outcome = battle(shared, 0);
        match outcome.winner {
            Some(_) => Ok(outcome.units_left.to_string()),
            None => Err(solve_failed(anyhow!("the battle stalls"))),
        }
    }
}

impl PartSolver<2> for Day24 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        smallest_winning_boost(shared)
            .map(|(_, units)| units.to_string())
            .map_err(solve_failed)
    }
}
