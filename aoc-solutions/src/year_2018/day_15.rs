//! Beverage Bandits
//!
//! Turn-based combat between elves and goblins in a cave. Units act in
//! reading order; each one walks one step along a shortest path toward the
//! nearest square in range of an enemy, then hits the weakest adjacent enemy.
//! Every tie (nearest square, first step, weakest enemy) is broken by reading
//! order, which is why positions are [`Point`]s.

use crate::utils::{Grid, Point, invalid, solve_failed};
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 15, tags = ["2018", "grid", "simulation"])]
pub struct Day15;

const HIT_POINTS: i32 = 200;
const GOBLIN_POWER: i32 = 3;
/// No single attack needs more than this to kill outright
const MAX_ELF_POWER: i32 = HIT_POINTS;
/// A battle still going after this many rounds cannot reach every enemy
const MAX_ROUNDS: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Race {
    Elf,
    Goblin,
}

#[derive(Debug, Clone)]
struct Unit {
    race: Race,
    pos: Point,
    hp: i32,
}

impl Unit {
    fn alive(&self) -> bool {
        self.hp > 0
    }
}

/// The cave as read from the input: walls plus the starting units
pub struct Cave {
    walls: Grid<bool>,
    units: Vec<Unit>,
}

impl AocParser for Day15 {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut units = Vec::new();
        let walls = Grid::parse(input, |pos, b| {
            let race = match b {
                b'#' | b' ' => return Ok(true),
                b'.' => return Ok(false),
                b'E' => Race::Elf,
                b'G' => Race::Goblin,
                other => {
                    return Err(invalid(
                        pos.y + 1,
                        format!("unexpected {:?} at column {}", char::from(other), pos.x + 1),
                    ));
                }
            };
            units.push(Unit {
                race,
                pos,
                hp: HIT_POINTS,
            });
            Ok(false)
        })?;
        Ok(Cave { walls, units })
    }
}

/// How a finished combat went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub full_rounds: u32,
    pub hp_left: i32,
    pub winner: Race,
}

impl Report {
    pub fn outcome(&self) -> i64 {
        i64::from(self.full_rounds) * i64::from(self.hp_left)
    }
}

enum RoundEnd {
    Full,
    CombatOver,
    ElfDied,
}

struct Battle<'c> {
    walls: &'c Grid<bool>,
    /// Index into `units` of the living unit standing on each square
    occupant: Grid<Option<usize>>,
    units: Vec<Unit>,
    elf_power: i32,
}

impl<'c> Battle<'c> {
    fn new(cave: &'c Cave, elf_power: i32) -> Self {
        let mut occupant = Grid::new(cave.walls.width(), cave.walls.height(), None);
        for (i, unit) in cave.units.iter().enumerate() {
            occupant[unit.pos] = Some(i);
        }
        Self {
            walls: &cave.walls,
            occupant,
            units: cave.units.clone(),
            elf_power,
        }
    }

    /// Step counts from `from` over squares that are neither wall nor unit
    fn distances(&self, from: Point) -> Grid<Option<u32>> {
        self.walls
            .distances_from(from, |p, &wall| !wall && self.occupant[p].is_none())
    }

    fn enemies_left(&self, race: Race) -> bool {
        self.units.iter().any(|u| u.alive() && u.race != race)
    }

    fn adjacent_enemies(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let Unit { race, pos, .. } = self.units[i];
        self.walls
            .neighbours(pos)
            .filter_map(move |n| self.occupant[n])
            .filter(move |&j| self.units[j].race != race)
    }

    /// The square unit `i` should step onto, if any enemy is reachable.
    ///
    /// The destination is the nearest reachable square next to an enemy,
    /// first in reading order on ties. The step is the first square in
    /// reading order, among the unit's neighbours, that starts a shortest
    /// path to it; found by measuring distances back from the destination.
    fn next_step(&self, i: usize) -> Option<Point> {
        let Unit { race, pos, .. } = self.units[i];
        let dist = self.distances(pos);

        let (steps, destination) = self
            .units
            .iter()
            .filter(|u| u.alive() && u.race != race)
            .flat_map(|u| self.walls.neighbours(u.pos))
            .filter_map(|p| dist[p].map(|d| (d, p)))
            .min()?;

        let back = self.distances(destination);
        self.walls
            .neighbours(pos)
            .find(|&n| back[n] == Some(steps - 1))
    }

    /// One unit's turn. Returns `true` when it killed an elf.
    fn take_turn(&mut self, i: usize) -> bool {
        if self.adjacent_enemies(i).next().is_none() {
            if let Some(step) = self.next_step(i) {
                let from = self.units[i].pos;
                self.occupant[from] = None;
                self.occupant[step] = Some(i);
                self.units[i].pos = step;
            }
        }

        // Neighbours come in reading order and `min_by_key` keeps the first
        // of equal keys
        let Some(j) = self.adjacent_enemies(i).min_by_key(|&j| self.units[j].hp) else {
            return false;
        };
        let power = match self.units[i].race {
            Race::Elf => self.elf_power,
            Race::Goblin => GOBLIN_POWER,
        };
        let target = &mut self.units[j];
        target.hp -= power;
        if target.alive() {
            return false;
        }
        self.occupant[target.pos] = None;
        target.race == Race::Elf
    }

    fn round(&mut self, spare_elves: bool) -> RoundEnd {
        let mut order: Vec<usize> = (0..self.units.len())
            .filter(|&i| self.units[i].alive())
            .collect();
        order.sort_by_key(|&i| self.units[i].pos);

        for i in order {
            // Killed earlier this round
            if !self.units[i].alive() {
                continue;
            }
            if !self.enemies_left(self.units[i].race) {
                return RoundEnd::CombatOver;
            }
            if self.take_turn(i) && spare_elves {
                return RoundEnd::ElfDied;
            }
        }
        RoundEnd::Full
    }

    fn report(&self, full_rounds: u32) -> anyhow::Result<Report> {
        let winner = self
            .units
            .iter()
            .find(|u| u.alive())
            .map(|u| u.race)
            .ok_or_else(|| anyhow!("no units left standing"))?;
        Ok(Report {
            full_rounds,
            hp_left: self.units.iter().filter(|u| u.alive()).map(|u| u.hp).sum(),
            winner,
        })
    }

    #[cfg(test)]
    fn render(&self) -> String {
        let mut picture = self.walls.render(|&wall| if wall { '#' } else { '.' });
        for unit in self.units.iter().filter(|u| u.alive()) {
            let offset = unit.pos.y * (self.walls.width() + 1) + unit.pos.x;
            let glyph = match unit.race {
                Race::Elf => "E",
                Race::Goblin => "G",
            };
            picture.replace_range(offset..offset + 1, glyph);
        }
        picture
    }
}

/// Fight to the end with elves hitting for `elf_power`.
///
/// With `spare_elves`, the fight is abandoned as soon as an elf dies and
/// `Ok(None)` is returned.
pub fn fight(cave: &Cave, elf_power: i32, spare_elves: bool) -> anyhow::Result<Option<Report>> {
    let mut battle = Battle::new(cave, elf_power);
    for full_rounds in 0..MAX_ROUNDS {
        match battle.round(spare_elves) {
            RoundEnd::Full => {}
            RoundEnd::CombatOver => return battle.report(full_rounds).map(Some),
            RoundEnd::ElfDied => return Ok(None),
        }
    }
    bail!("combat still undecided after {MAX_ROUNDS} rounds")
}

/// The first elf attack power, counting up from 4, at which no elf dies.
///
/// Searched linearly: the outcome is not monotonic in attack power, so a
/// bisection can skip over the smallest working value.
pub fn lossless_victory(cave: &Cave) -> anyhow::Result<(i32, Report)> {
    for power in GOBLIN_POWER + 1..=MAX_ELF_POWER {
        if let Some(report) = fight(cave, power, true)? {
            return Ok((power, report));
        }
    }
    bail!("elves lose someone even when every hit kills")
}

impl PartSolver<1> for Day15 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        fight(shared, GOBLIN_POWER, false)
            .and_then(|report| report.ok_or_else(|| anyhow!("combat ended early")))
            .map(|report| report.outcome().to_string())
            .map_err(solve_failed)
    }
}

impl PartSolver<2> for Day15 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        lossless_victory(shared)
            .map(|(_, report)| report.outcome().to_string())
            .map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(map: &str) -> i64 {
        let cave = Day15::parse(map).unwrap();
        fight(&cave, GOBLIN_POWER, false).unwrap().unwrap().outcome()
    }

    fn boosted(map: &str) -> (i32, i64) {
        let cave = Day15::parse(map).unwrap();
        let (power, report) = lossless_victory(&cave).unwrap();
        (power, report.outcome())
    }

    const FIRST: &str = "\
#######
#.G...#
#...EG#
#.#.#G#
#..G#E#
#.....#
#######
";

    const SECOND: &str = "\
#######
#G..#E#
#E#E.E#
#G.##.#
#...#E#
#...E.#
#######
";

    const THIRD: &str = "\
#######
#E..EG#
#.#G.E#
#E.##E#
#G..#.#
#..E#.#
#######
";

    const FOURTH: &str = "\
#######
#E.G#.#
#.#G..#
#G.#.G#
#G..#.#
#...E.#
#######
";

    const FIFTH: &str = "\
#######
#.E...#
#.#..G#
#.###.#
#E#G#G#
#...#G#
#######
";

    const SIXTH: &str = "\
#########
#G......#
#.E.#...#
#..##..G#
#...##..#
#...#...#
#.G...G.#
#.....G.#
#########
";

    #[test]
    fn test_movement_converges() {
        let cave = Day15::parse(
            "\
#########
#G..G..G#
#.......#
#.......#
#G..E..G#
#.......#
#.......#
#G..G..G#
#########
",
        )
        .unwrap();
        let mut battle = Battle::new(&cave, GOBLIN_POWER);
        for _ in 0..3 {
            assert!(matches!(battle.round(false), RoundEnd::Full));
        }
        assert_eq!(
            battle.render(),
            "\
#########
#.......#
#..GGG..#
#..GEG..#
#G..G...#
#......G#
#.......#
#.......#
#########
"
        );
    }

    #[test]
    fn test_first_example_report() {
        let cave = Day15::parse(FIRST).unwrap();
        let report = fight(&cave, GOBLIN_POWER, false).unwrap().unwrap();
        assert_eq!(
            report,
            Report {
                full_rounds: 47,
                hp_left: 590,
                winner: Race::Goblin,
            }
        );
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(outcome(FIRST), 27730);
        assert_eq!(outcome(SECOND), 36334);
        assert_eq!(outcome(THIRD), 39514);
        assert_eq!(outcome(FOURTH), 27755);
        assert_eq!(outcome(FIFTH), 28944);
        assert_eq!(outcome(SIXTH), 18740);
    }

    #[test]
    fn test_lossless_boost() {
        assert_eq!(boosted(FIRST), (15, 4988));
        assert_eq!(boosted(THIRD), (4, 31284));
        assert_eq!(boosted(FOURTH), (15, 3478));
        assert_eq!(boosted(FIFTH), (12, 6474));
        assert_eq!(boosted(SIXTH), (34, 1140));
    }

    #[test]
    fn test_solver_parts() {
        let mut cave = Day15::parse(FIRST).unwrap();
        assert_eq!(<Day15 as PartSolver<1>>::solve(&mut cave).unwrap(), "27730");
        assert_eq!(<Day15 as PartSolver<2>>::solve(&mut cave).unwrap(), "4988");
    }

    #[test]
    fn test_walled_off_units_stalemate() {
        let cave = Day15::parse("#####\n#E#G#\n#####\n").unwrap();
        assert!(fight(&cave, GOBLIN_POWER, false).is_err());
    }

    #[test]
    fn test_unknown_glyph() {
        assert!(Day15::parse("#E?G#").is_err());
    }
}
