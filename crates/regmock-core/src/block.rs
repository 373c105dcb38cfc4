//! Simulated register block primitives.
//!
//! A register block is a fixed-layout aggregate of [`RegCell`] values laid
//! out by a [`BlockMapper`] so field order and offsets mirror the real
//! peripheral's memory map. Cells hold no authoritative state: every read
//! and write routes through the owning [`TestContext`]'s expectation queue.

use core::cell::Cell;
use core::fmt;

use crate::{TestContext, Violation};

/// Canonical register width in bytes; every cell is one 32-bit word.
pub const WORD_BYTES: u32 = 4;

/// Fixed register width used by every cell and expected operation.
pub type Word = u32;

/// Opaque address identity of one register cell.
///
/// Compared by value, never dereferenced. The identity is stable for the
/// lifetime of the cell: reads and writes consume queue entries, not the
/// identity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegAddr(u32);

impl RegAddr {
    /// Creates an identity from an absolute byte address.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the absolute byte address behind the identity.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// One simulated hardware register.
///
/// The cell exposes exactly the operations that are meaningful on a device
/// register: a single-word checked read and a single-word checked write.
/// There is no cell-to-cell assignment and no `Clone`; a cell's identity is
/// fixed at layout time by the [`BlockMapper`].
///
/// The shadow word records the last committed write for introspection. It is
/// never consulted by reads: a checked read returns the value the test
/// queued, not anything previously written (the harness verifies protocol
/// shape, not device semantics).
#[derive(Debug)]
pub struct RegCell {
    addr: RegAddr,
    shadow: Cell<Option<Word>>,
}

impl RegCell {
    /// Creates a cell with the given address identity.
    #[must_use]
    pub const fn at(addr: RegAddr) -> Self {
        Self {
            addr,
            shadow: Cell::new(None),
        }
    }

    /// Returns the cell's stable address identity.
    #[must_use]
    pub const fn addr(&self) -> RegAddr {
        self.addr
    }

    /// Value committed by the most recent matched write, if any.
    #[must_use]
    pub fn last_written(&self) -> Option<Word> {
        self.shadow.get()
    }

    /// Checked read of the cell.
    ///
    /// Matches the front of the expectation queue and, on success, consumes
    /// it and returns the queued value.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::UnexpectedRead`] when the queue is empty, the
    /// front expectation is not a read, or it targets a different cell. The
    /// queue is left untouched on failure.
    pub fn read(&self, ctx: &mut TestContext) -> Result<Word, Violation> {
        ctx.checked_read(self.addr)
    }

    /// Checked write of `value` to the cell.
    ///
    /// Matches the front of the expectation queue and, on success, consumes
    /// it and records `value` in the shadow word and the context write log.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::UnexpectedWrite`] when the queue is empty, the
    /// front expectation is not a write, or it targets a different cell; the
    /// queue is left untouched. Returns [`Violation::WrongWriteValue`] when
    /// address and direction match but the value differs; the matched entry
    /// is still consumed, since the sequencing itself was correct.
    pub fn write(&self, ctx: &mut TestContext, value: Word) -> Result<(), Violation> {
        ctx.checked_write(self.addr, value)?;
        self.shadow.set(Some(value));
        Ok(())
    }
}

/// Word-stride layout helper for building register blocks.
///
/// Hands out contiguous cells from a base address so a block struct built
/// field-by-field matches the real peripheral's offsets:
///
/// ```
/// use regmock_core::{BlockMapper, RegCell};
///
/// struct Periph {
///     cr: RegCell,
///     dr: RegCell,
///     isr: RegCell,
///     icr: RegCell,
/// }
///
/// let mut map = BlockMapper::at(0x2000_0800);
/// let periph = Periph {
///     cr: map.cell(),
///     dr: map.cell(),
///     isr: map.cell(),
///     icr: map.cell(),
/// };
/// assert_eq!(periph.isr.addr().as_u32(), 0x2000_0808);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMapper {
    next: u32,
}

impl BlockMapper {
    /// Starts a layout at the peripheral's base address.
    #[must_use]
    pub const fn at(base: u32) -> Self {
        Self { next: base }
    }

    /// Returns the next contiguous cell and advances by one word.
    #[must_use]
    pub fn cell(&mut self) -> RegCell {
        let addr = RegAddr::new(self.next);
        self.next = self.next.wrapping_add(WORD_BYTES);
        RegCell::at(addr)
    }

    /// Skips `words` reserved words without producing cells.
    pub fn skip(&mut self, words: u32) {
        self.next = self.next.wrapping_add(words.wrapping_mul(WORD_BYTES));
    }
}
