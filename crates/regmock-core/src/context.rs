//! Per-test-run expectation state.

use crate::{Direction, ExpectationQueue, ExpectedOp, RegAddr, RegCell, Violation, Word};

/// Owned verification state for one test run.
///
/// The context holds the expectation queue plus a log of committed writes.
/// Each test case constructs its own context and threads it, by mutable
/// borrow, through both the `expect_*` declarations and the checked cell
/// accessors; nothing is process-global, so parallel test cases are isolated
/// by construction.
#[derive(Debug, Clone, Default)]
pub struct TestContext {
    queue: ExpectationQueue,
    write_log: Vec<(RegAddr, Word)>,
}

impl TestContext {
    /// Creates a context with an empty queue and write log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: ExpectationQueue::new(),
            write_log: Vec::new(),
        }
    }

    /// Declares that the next access must be a read of `cell`, and that the
    /// read observes `value`.
    pub fn expect_read(&mut self, cell: &RegCell, value: Word) {
        self.queue.push(ExpectedOp {
            direction: Direction::Read,
            addr: cell.addr(),
            value,
        });
    }

    /// Declares that the next access must write `value` to `cell`.
    pub fn expect_write(&mut self, cell: &RegCell, value: Word) {
        self.queue.push(ExpectedOp {
            direction: Direction::Write,
            addr: cell.addr(),
            value,
        });
    }

    /// Checkpoint asserting every declared expectation has been consumed.
    ///
    /// Usable mid-test between protocol phases as well as at the end of the
    /// run; success has no side effect.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::Leftover`] when expectations remain pending.
    pub fn expect_rest(&self) -> Result<(), Violation> {
        self.queue.assert_drained()
    }

    /// Number of expectations still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Discards all pending expectations, resetting the run state.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Read-only view of the expectation queue.
    #[must_use]
    pub const fn queue(&self) -> &ExpectationQueue {
        &self.queue
    }

    /// Writes committed so far, in commit order.
    ///
    /// Introspection only: checked reads never consult this log.
    #[must_use]
    pub fn write_log(&self) -> &[(RegAddr, Word)] {
        &self.write_log
    }

    /// Checked-read path used by [`RegCell::read`].
    ///
    /// Queue empty, wrong direction, and wrong address all report the same
    /// caller-side fault: the read that just happened was not the expected
    /// next operation.
    pub(crate) fn checked_read(&mut self, addr: RegAddr) -> Result<Word, Violation> {
        match self.queue.front().copied() {
            Some(op) if op.direction == Direction::Read && op.addr == addr => {
                let _ = self.queue.pop_front();
                Ok(op.value)
            }
            _ => Err(Violation::UnexpectedRead { addr }),
        }
    }

    /// Checked-write path used by [`RegCell::write`].
    pub(crate) fn checked_write(&mut self, addr: RegAddr, value: Word) -> Result<(), Violation> {
        let Some(op) = self.queue.front().copied() else {
            return Err(Violation::UnexpectedWrite { addr, value });
        };
        if op.direction != Direction::Write || op.addr != addr {
            return Err(Violation::UnexpectedWrite { addr, value });
        }
        // Sequencing matched, so the entry is consumed even when the value
        // check below fails: a wrong value is a value bug, not a leftover
        // expectation.
        let _ = self.queue.pop_front();
        if op.value != value {
            return Err(Violation::WrongWriteValue {
                addr,
                expected: op.value,
                actual: value,
            });
        }
        self.write_log.push((addr, value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TestContext;
    use crate::{BlockMapper, RegCell, Violation};

    fn two_cells() -> (RegCell, RegCell) {
        let mut map = BlockMapper::at(0x2000_0800);
        (map.cell(), map.cell())
    }

    #[test]
    fn matched_read_returns_queued_value_and_consumes() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_read(&cr, 0x55);

        assert_eq!(cr.read(&mut ctx), Ok(0x55));
        assert_eq!(ctx.pending(), 0);
    }

    #[test]
    fn read_with_empty_queue_is_unexpected() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();

        assert_eq!(
            cr.read(&mut ctx),
            Err(Violation::UnexpectedRead { addr: cr.addr() })
        );
    }

    #[test]
    fn read_against_expected_write_is_unexpected_read() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_write(&cr, 0x01);

        // Direction mismatch names the caller's access, and must not consume.
        assert_eq!(
            cr.read(&mut ctx),
            Err(Violation::UnexpectedRead { addr: cr.addr() })
        );
        assert_eq!(ctx.pending(), 1);
    }

    #[test]
    fn read_of_wrong_cell_is_unexpected_read() {
        let (cr, dr) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_read(&cr, 0x01);

        assert_eq!(
            dr.read(&mut ctx),
            Err(Violation::UnexpectedRead { addr: dr.addr() })
        );
        assert_eq!(ctx.pending(), 1);
    }

    #[test]
    fn matched_write_consumes_and_logs() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_write(&cr, 0x01);

        assert_eq!(cr.write(&mut ctx, 0x01), Ok(()));
        assert_eq!(ctx.pending(), 0);
        assert_eq!(ctx.write_log(), &[(cr.addr(), 0x01)]);
    }

    #[test]
    fn write_with_empty_queue_is_unexpected() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();

        assert_eq!(
            cr.write(&mut ctx, 0x01),
            Err(Violation::UnexpectedWrite {
                addr: cr.addr(),
                value: 0x01
            })
        );
    }

    #[test]
    fn write_against_expected_read_is_unexpected_write() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_read(&cr, 0x00);

        assert_eq!(
            cr.write(&mut ctx, 0x01),
            Err(Violation::UnexpectedWrite {
                addr: cr.addr(),
                value: 0x01
            })
        );
        assert_eq!(ctx.pending(), 1);
    }

    #[test]
    fn write_to_wrong_cell_is_unexpected_write() {
        let (cr, dr) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_write(&cr, 0x01);

        assert_eq!(
            dr.write(&mut ctx, 0x01),
            Err(Violation::UnexpectedWrite {
                addr: dr.addr(),
                value: 0x01
            })
        );
        assert_eq!(ctx.pending(), 1);
    }

    #[test]
    fn wrong_write_value_reports_both_values_and_still_consumes() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_write(&cr, 0x01);

        assert_eq!(
            cr.write(&mut ctx, 0x02),
            Err(Violation::WrongWriteValue {
                addr: cr.addr(),
                expected: 0x01,
                actual: 0x02
            })
        );
        assert_eq!(ctx.pending(), 0);
        assert_eq!(ctx.expect_rest(), Ok(()));
        assert!(ctx.write_log().is_empty());
    }

    #[test]
    fn read_value_is_supplied_by_the_test_not_by_prior_writes() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_write(&cr, 0xDEAD_BEEF);
        ctx.expect_read(&cr, 0x0000_0001);

        cr.write(&mut ctx, 0xDEAD_BEEF).unwrap();
        assert_eq!(cr.read(&mut ctx), Ok(0x0000_0001));
    }

    #[test]
    fn expect_rest_fails_while_any_expectation_is_pending() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_read(&cr, 0x00);
        ctx.expect_read(&cr, 0x01);

        let _ = cr.read(&mut ctx).unwrap();
        assert_eq!(
            ctx.expect_rest(),
            Err(Violation::Leftover { remaining: 1 })
        );

        let _ = cr.read(&mut ctx).unwrap();
        assert_eq!(ctx.expect_rest(), Ok(()));
    }

    #[test]
    fn clear_resets_the_run_state() {
        let (cr, _) = two_cells();
        let mut ctx = TestContext::new();
        ctx.expect_write(&cr, 0x01);
        ctx.clear();

        assert_eq!(ctx.pending(), 0);
        assert_eq!(ctx.expect_rest(), Ok(()));
    }
}
