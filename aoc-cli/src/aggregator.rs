//! Result aggregator for ordering parallel solver results
//!
//! Results arrive in whatever order workers finish. The aggregator holds them
//! back until every result sorting before them has been emitted.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, VecDeque};

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

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys not yet emitted, ascending
    expected: VecDeque<ResultKey>,
    /// Received results waiting for their turn
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        let mut expected: Vec<_> = expected_keys.into_iter().collect();
        expected.sort_unstable();
        expected.dedup();
        Self {
            expected: expected.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front()
            && let Some(result) = self.pending.remove(next)
        {
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let pending = std::mem::take(&mut self.pending);
        self.expected.retain(|key| !pending.contains_key(key));
        pending.into_values().collect()
    }

    /// Expected keys that have not been received
    pub fn missing(&self) -> impl Iterator<Item = &ResultKey> {
        self.expected
            .iter()
            .filter(|key| !self.pending.contains_key(*key))
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.missing().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

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

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new([key(2025, 1, 1), key(2025, 1, 2)]);

        let ready = agg.add(make_result(2025, 1, 1));
        assert_eq!(keys_of(&ready), [key(2025, 1, 1)]);

        let ready = agg.add(make_result(2025, 1, 2));
        assert_eq!(keys_of(&ready), [key(2025, 1, 2)]);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        // Deliberately unsorted expectations
        let mut agg =
            ResultAggregator::new([key(2025, 5, 1), key(2025, 1, 2), key(2025, 1, 1)]);

        assert!(agg.add(make_result(2025, 5, 1)).is_empty());
        assert!(agg.add(make_result(2025, 1, 2)).is_empty());

        let ready = agg.add(make_result(2025, 1, 1));
        assert_eq!(
            keys_of(&ready),
            [key(2025, 1, 1), key(2025, 1, 2), key(2025, 5, 1)]
        );
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_and_missing() {
        let mut agg =
            ResultAggregator::new([key(2025, 1, 1), key(2025, 1, 2), key(2025, 2, 1)]);

        agg.add(make_result(2025, 2, 1));
        assert!(!agg.is_complete());
        assert_eq!(
            agg.missing().copied().collect::<Vec<_>>(),
            [key(2025, 1, 1), key(2025, 1, 2)]
        );

        let remaining = agg.drain();
        assert_eq!(keys_of(&remaining), [key(2025, 2, 1)]);
        assert_eq!(agg.missing().count(), 2);
        assert!(agg.drain().is_empty());
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_emits_sorted(
            order in Just((1u8..=25).flat_map(|day| [(day, 1u8), (day, 2u8)]).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut agg = ResultAggregator::new(order.iter().map(|&(day, part)| key(2025, day, part)));
            let mut emitted = Vec::new();
            for &(day, part) in &order {
                emitted.extend(agg.add(make_result(2025, day, part)));
            }

            prop_assert!(agg.is_complete());
            prop_assert!(agg.drain().is_empty());
            let keys = keys_of(&emitted);
            prop_assert_eq!(keys.len(), 50);
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
