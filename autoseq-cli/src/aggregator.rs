//! Result aggregator for ordering parallel evaluation results
//!
//! Buffers and orders results for streaming output using two min-heaps:
//! - One for expected work indices (what we're waiting for)
//! - One for received results (buffered until their turn)

use crate::executor::SequenceResult;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Wrapper for min-heap ordering of SequenceResult by work index
struct OrderedResult(SequenceResult);

impl Ord for OrderedResult {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (smallest first)
        other.0.index.cmp(&self.0.index)
    }
}

impl PartialOrd for OrderedResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for OrderedResult {}

impl PartialEq for OrderedResult {
    fn eq(&self, other: &Self) -> bool {
        self.0.index == other.0.index
    }
}

/// Aggregator that buffers results and emits them in work order
pub struct ResultAggregator {
    /// Min-heap of expected indices (next to output is at top)
    expected: BinaryHeap<Reverse<usize>>,
    /// Min-heap of received results waiting to be output
    pending: BinaryHeap<OrderedResult>,
}

impl ResultAggregator {
    /// Create aggregator from the list of expected work indices
    pub fn new(expected: impl IntoIterator<Item = usize>) -> Self {
        Self {
            expected: expected.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SequenceResult) -> Vec<SequenceResult> {
        self.pending.push(OrderedResult(result));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top_pending)) =
            (self.expected.peek(), self.pending.peek())
        {
            if top_pending.0.index != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(OrderedResult(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SequenceResult> {
        let mut results: Vec<_> = self.pending.drain().map(|o| o.0).collect();
        results.sort_by_key(|r| r.index);
        results
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeDelta};
    use proptest::prelude::*;

    fn make_result(index: usize) -> SequenceResult {
        SequenceResult {
            index,
            name: "fibonacci",
            start: 0,
            values: Ok(vec![index as u128]),
            duration: TimeDelta::microseconds(10),
            finished_at: Local::now(),
        }
    }

    fn indices(results: &[SequenceResult]) -> Vec<usize> {
        results.iter().map(|r| r.index).collect()
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new(0..2);

        assert_eq!(indices(&agg.add(make_result(0))), vec![0]);
        assert_eq!(indices(&agg.add(make_result(1))), vec![1]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg = ResultAggregator::new(0..3);

        assert!(agg.add(make_result(1)).is_empty());
        assert!(agg.add(make_result(2)).is_empty());

        // The missing head releases everything buffered behind it
        assert_eq!(indices(&agg.add(make_result(0))), vec![0, 1, 2]);
        assert!(agg.is_complete());
    }

    proptest! {
        /// Any arrival order is emitted in work order, each result once
        #[test]
        fn prop_any_arrival_order_is_sorted(
            order in (1usize..40).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        ) {
            let mut agg = ResultAggregator::new(0..order.len());
            let mut emitted = Vec::new();
            for index in &order {
                emitted.extend(indices(&agg.add(make_result(*index))));
            }
            prop_assert_eq!(emitted, (0..order.len()).collect::<Vec<_>>());
            prop_assert!(agg.is_complete());
            prop_assert!(agg.drain().is_empty());
        }
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new(0..3);

        agg.add(make_result(2));
        agg.add(make_result(1));

        assert_eq!(indices(&agg.drain()), vec![1, 2]);
        assert!(!agg.is_complete());
    }
}
