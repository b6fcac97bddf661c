//! Result aggregator for ordering parallel solver results
//!
//! Results stream in from worker threads in any order. Two min-heaps, one of
//! keys still expected and one of results already received, let each result
//! print as soon as everything before it has.

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Heap entry ordered by its result key
struct Pending(ResultKey, SolverResult);

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys not yet emitted, smallest on top
    expected: BinaryHeap<Reverse<ResultKey>>,
    /// Results that arrived ahead of their turn, smallest on top
    pending: BinaryHeap<Reverse<Pending>>,
}

impl ResultAggregator {
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending
            .push(Reverse(Pending(ResultKey::from(&result), result)));

        let mut ready = Vec::new();
        while let Some(Reverse(next)) = self.expected.peek()
            && self
                .pending
                .peek()
                .is_some_and(|Reverse(top)| top.0 == *next)
        {
            self.expected.pop();
            if let Some(Reverse(Pending(_, result))) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut pending: Vec<_> = self.pending.drain().map(|Reverse(p)| p).collect();
        pending.sort();
        pending.into_iter().map(|Pending(_, result)| result).collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn make_result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{}_{}_{}", year, day, part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    #[test]
    fn test_in_order_results() {
        let keys = vec![
            ResultKey {
                year: 2018,
                day: 1,
                part: 1,
            },
            ResultKey {
                year: 2018,
                day: 1,
                part: 2,
            },
        ];
        let mut agg = ResultAggregator::new(keys);

        // Add in order
        let ready = agg.add(make_result(2018, 1, 1));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(2018, 1, 2));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let keys = vec![
            ResultKey {
                year: 2018,
                day: 1,
                part: 1,
            },
            ResultKey {
                year: 2018,
                day: 1,
                part: 2,
            },
            ResultKey {
                year: 2018,
                day: 2,
                part: 1,
            },
        ];
        let mut agg = ResultAggregator::new(keys);

        // Add out of order - part 2 before part 1
        let ready = agg.add(make_result(2018, 1, 2));
        assert!(ready.is_empty()); // Waiting for part 1

        let ready = agg.add(make_result(2018, 2, 1));
        assert!(ready.is_empty()); // Still waiting for 2018/1/1

        // Now add the missing one
        let ready = agg.add(make_result(2018, 1, 1));
        assert_eq!(ready.len(), 3); // All three should be ready now
        assert_eq!(ready[0].part, 1);
        assert_eq!(ready[0].day, 1);
        assert_eq!(ready[1].part, 2);
        assert_eq!(ready[1].day, 1);
        assert_eq!(ready[2].part, 1);
        assert_eq!(ready[2].day, 2);
    }

    #[test]
    fn test_drain_remaining() {
        let keys = vec![
            ResultKey {
                year: 2018,
                day: 1,
                part: 1,
            },
            ResultKey {
                year: 2018,
                day: 1,
                part: 2,
            },
        ];
        let mut agg = ResultAggregator::new(keys);

        // Add only part 2 (out of order)
        agg.add(make_result(2018, 1, 2));

        // Drain should return it
        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
        assert!(!agg.is_complete());
    }

    #[test]
    fn test_interleaved_years() {
        let keys = [(2018, 25, 1), (2019, 1, 1), (2018, 3, 2)]
            .into_iter()
            .map(|(year, day, part)| ResultKey { year, day, part })
            .collect();
        let mut agg = ResultAggregator::new(keys);

        assert!(agg.add(make_result(2019, 1, 1)).is_empty());
        assert!(agg.add(make_result(2018, 25, 1)).is_empty());
        let ready = agg.add(make_result(2018, 3, 2));
        let order: Vec<_> = ready.iter().map(|r| (r.year, r.day)).collect();
        assert_eq!(order, vec![(2018, 3), (2018, 25), (2019, 1)]);
        assert!(agg.is_complete());
    }

    fn all_keys() -> Vec<ResultKey> {
        (2018..=2019)
            .flat_map(|year| (1..=25).flat_map(move |day| (1..=2).map(move |part| (year, day, part))))
            .map(|(year, day, part)| ResultKey { year, day, part })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Whatever order results arrive in, they leave in ascending key order
        /// and each leaves exactly once
        #[test]
        fn prop_any_arrival_order_is_sorted(
            arrival in Just(all_keys()).prop_shuffle(),
            take in 1usize..=100,
        ) {
            let arrival: Vec<ResultKey> = arrival.into_iter().take(take).collect();
            let mut expected = arrival.clone();
            expected.sort();

            let mut agg = ResultAggregator::new(arrival.clone());
            let emitted: Vec<ResultKey> = arrival
                .iter()
                .flat_map(|k| agg.add(make_result(k.year, k.day, k.part)))
                .map(|r| ResultKey::from(&r))
                .collect();

            prop_assert_eq!(emitted, expected);
            prop_assert!(agg.is_complete());
            prop_assert!(agg.drain().is_empty());
        }
    }
}
