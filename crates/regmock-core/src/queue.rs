//! Ordered record of the register operations a test expects to observe.
//!
//! The queue is a strict FIFO: expectations are consumed in insertion order
//! with no reordering, no lookahead, and no partial matching. All matching
//! logic lives in the checked cell accessors; the queue only stores and
//! drains entries.

use std::collections::VecDeque;

use crate::{RegAddr, Violation, Word};

/// Direction of one expected register operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Direction {
    /// The code under test must read the cell; the queued value is returned.
    Read,
    /// The code under test must write the cell with the queued value.
    Write,
}

/// One predicted register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ExpectedOp {
    /// Whether the access must be a read or a write.
    pub direction: Direction,
    /// Identity of the target cell.
    pub addr: RegAddr,
    /// Value to require from a write, or to supply to a read.
    pub value: Word,
}

/// FIFO queue of expected operations for one test run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectationQueue {
    ops: VecDeque<ExpectedOp>,
}

impl ExpectationQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ops: VecDeque::new(),
        }
    }

    /// Appends one expectation; insertion order is the expected access order.
    pub fn push(&mut self, op: ExpectedOp) {
        self.ops.push_back(op);
    }

    /// Returns the expectation an access must match next, if any.
    #[must_use]
    pub fn front(&self) -> Option<&ExpectedOp> {
        self.ops.front()
    }

    /// Consumes and returns the front expectation.
    pub fn pop_front(&mut self) -> Option<ExpectedOp> {
        self.ops.pop_front()
    }

    /// Number of expectations still pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` when no expectation is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Discards all pending expectations.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Checkpoint assertion that every pushed expectation was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::Leftover`] with the pending count when the queue
    /// is non-empty. Succeeding has no side effect; the queue stays usable
    /// for a following test phase.
    pub fn assert_drained(&self) -> Result<(), Violation> {
        if self.ops.is_empty() {
            Ok(())
        } else {
            Err(Violation::Leftover {
                remaining: self.ops.len(),
            })
        }
    }
}
