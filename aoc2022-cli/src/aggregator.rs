//! Reorders results arriving from parallel workers
//!
//! Two min-heaps: the keys still expected, and the results received ahead
//! of their turn. A result is released as soon as every key before it has
//! been released.

use crate::executor::{SolverResult, WorkItem};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Position of a result in the output: (year, day, part) ascending
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

/// A buffered result, ordered by its key only
struct Pending {
    key: ResultKey,
    result: SolverResult,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Reverse<Pending>>,
}

impl ResultAggregator {
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Expect one result per selected part of every work item
    pub fn for_work_items(items: &[WorkItem]) -> Self {
        Self::new(
            items
                .iter()
                .flat_map(|w| {
                    w.parts.clone().map(move |part| ResultKey {
                        year: w.year,
                        day: w.day,
                        part,
                    })
                })
                .collect(),
        )
    }

    /// Buffer `result` and release every result that is now next in line
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Reverse(Pending {
            key: ResultKey::from(&result),
            result,
        }));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(Reverse(first_pending))) =
            (self.expected.peek(), self.pending.peek())
        {
            if first_pending.key != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(Reverse(Pending { result, .. })) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Remaining buffered results in order, for when some result never arrived
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut pending: Vec<Pending> = self.pending.drain().map(|Reverse(p)| p).collect();
        pending.sort();
        pending.into_iter().map(|p| p.result).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
