//! Repose Record

use crate::utils::{invalid, solve_failed};
use anyhow::anyhow;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::BTreeMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 4, tags = ["2018"])]
pub struct Day04;

/// Per guard, how many nights they were asleep during each minute of the midnight hour
pub type SleepLog = BTreeMap<u32, [u32; 60]>;

impl AocParser for Day04 {
    type SharedData<'a> = SleepLog;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Timestamps are zero padded, so a plain sort is chronological
        let mut records: Vec<&str> = input.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        records.sort_unstable();

        let mut log = SleepLog::new();
        let mut guard: Option<u32> = None;
        let mut asleep_since: Option<usize> = None;
        for (idx, record) in records.iter().enumerate() {
            let minute: usize = record
                .get(15..17)
                .and_then(|m| m.parse().ok())
                .filter(|&m| m < 60)
                .ok_or_else(|| invalid(idx + 1, format!("bad timestamp in {record:?}")))?;
            let event = record
                .split_once("] ")
                .map(|(_, e)| e)
                .ok_or_else(|| invalid(idx + 1, format!("missing event in {record:?}")))?;

            if let Some(rest) = event.strip_prefix("Guard #") {
                let id = rest
                    .split_whitespace()
                    .next()
                    .and_then(|id| id.parse().ok())
                    .ok_or_else(|| invalid(idx + 1, "bad guard id"))?;
                guard = Some(id);
                asleep_since = None;
            } else if event == "falls asleep" {
                asleep_since = Some(minute);
            } else if event == "wakes up" {
                let id = guard.ok_or_else(|| invalid(idx + 1, "no guard on duty"))?;
                let start = asleep_since
                    .take()
                    .ok_or_else(|| invalid(idx + 1, "woke up without falling asleep"))?;
                let minutes = log.entry(id).or_insert([0; 60]);
                for m in &mut minutes[start..minute.max(start)] {
                    *m += 1;
                }
            } else {
                return Err(invalid(idx + 1, format!("unknown event {event:?}")));
            }
        }
        Ok(log)
    }
}

fn best_minute(minutes: &[u32; 60]) -> (usize, u32) {
    minutes
        .iter()
        .copied()
        .enumerate()
        .rev()
        .max_by_key(|&(_, count)| count)
        .unwrap_or((0, 0))
}

impl PartSolver<1> for Day04 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (id, minutes) = shared
            .iter()
            .max_by_key(|(_, minutes)| minutes.iter().sum::<u32>())
            .ok_or_else(|| solve_failed(anyhow!("no guard ever slept")))?;
        let (minute, _) = best_minute(minutes);
        Ok((*id as usize * minute).to_string())
    }
}

impl PartSolver<2> for Day04 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (id, (minute, _)) = shared
            .iter()
            .map(|(id, minutes)| (id, best_minute(minutes)))
            .max_by_key(|(_, (_, count))| *count)
            .ok_or_else(|| solve_failed(anyhow!("no guard ever slept")))?;
        Ok((*id as usize * minute).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shuffled to check that records are sorted before replay
    const EXAMPLE: &str = "\
[1518-11-01 00:05] falls asleep
[1518-11-01 00:00] Guard #10 begins shift
[1518-11-01 00:25] wakes up
[1518-11-01 00:30] falls asleep
[1518-11-01 00:55] wakes up
[1518-11-01 23:58] Guard #99 begins shift
[1518-11-02 00:40] falls asleep
[1518-11-02 00:50] wakes up
[1518-11-03 00:05] Guard #10 begins shift
[1518-11-03 00:24] falls asleep
[1518-11-03 00:29] wakes up
[1518-11-04 00:02] Guard #99 begins shift
[1518-11-04 00:36] falls asleep
[1518-11-04 00:46] wakes up
[1518-11-05 00:03] Guard #99 begins shift
[1518-11-05 00:45] falls asleep
[1518-11-05 00:55] wakes up
";

    #[test]
    fn test_sleepiest_guard() {
        let mut log = Day04::parse(EXAMPLE).unwrap();
        assert_eq!(<Day04 as PartSolver<1>>::solve(&mut log).unwrap(), "240");
    }

    #[test]
    fn test_most_regular_minute() {
        let mut log = Day04::parse(EXAMPLE).unwrap();
        assert_eq!(<Day04 as PartSolver<2>>::solve(&mut log).unwrap(), "4455");
    }

    #[test]
    fn test_wake_without_guard() {
        assert!(Day04::parse("[1518-11-01 00:25] wakes up").is_err());
    }
}
