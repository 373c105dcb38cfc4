//! Mock register harness for code that drives memory-mapped peripherals.
//!
//! A test declares, in program order, the exact sequence of register reads
//! and writes the code under test must perform. Every access to a simulated
//! register block is then checked against that sequence and fails fast on
//! the first divergence: an unexpected address, a wrong direction, a wrong
//! written value, or leftover expectations at a checkpoint.

/// Simulated register block primitives: address identity, cells, layout.
pub mod block;
pub use block::{BlockMapper, RegAddr, RegCell, Word, WORD_BYTES};

/// Ordered FIFO record of predicted register operations.
pub mod queue;
pub use queue::{Direction, ExpectationQueue, ExpectedOp};

/// Verification-failure taxonomy.
pub mod violation;
pub use violation::{Violation, ViolationClass};

/// Per-test ownership of the queue and the `expect_*` declaration surface.
pub mod context;
pub use context::TestContext;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
