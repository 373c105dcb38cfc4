use thiserror::Error;

use crate::{RegAddr, Word};

/// Violation classes used when reports aggregate failures by fault kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ViolationClass {
    /// An access occurred out of sequence: wrong address or wrong direction.
    Sequence,
    /// The access itself was expected but the written value was wrong.
    Value,
    /// Expectations remained unconsumed at a drain checkpoint.
    Drain,
}

/// Verification failure raised by a checked register access or a checkpoint.
///
/// Every variant is terminal for the test run: once the actual access stream
/// diverges from the expected sequence, the remainder of the queue is no
/// longer meaningful and the violation must be propagated, never suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Violation {
    /// A read occurred with no matching read expectation at the queue front.
    #[error("unexpected read at address {addr}")]
    UnexpectedRead {
        /// Identity of the cell that was read.
        addr: RegAddr,
    },
    /// A write occurred with no matching write expectation at the queue front.
    #[error("unexpected write of {value:#010x} to address {addr}")]
    UnexpectedWrite {
        /// Identity of the cell that was written.
        addr: RegAddr,
        /// Value the code under test supplied.
        value: Word,
    },
    /// The write's address and direction matched but the value differs.
    #[error("unexpected value {actual:#010x} of write to address {addr}, expected {expected:#010x}")]
    WrongWriteValue {
        /// Identity of the cell that was written.
        addr: RegAddr,
        /// Value the expectation required.
        expected: Word,
        /// Value the code under test supplied.
        actual: Word,
    },
    /// A drain checkpoint ran while expectations remained unconsumed.
    #[error("{remaining} expected register operation(s) did not occur")]
    Leftover {
        /// Number of expectations still pending in the queue.
        remaining: usize,
    },
}

impl Violation {
    /// Returns the aggregation class for this violation.
    #[must_use]
    pub const fn class(self) -> ViolationClass {
        match self {
            Self::UnexpectedRead { .. } | Self::UnexpectedWrite { .. } => ViolationClass::Sequence,
            Self::WrongWriteValue { .. } => ViolationClass::Value,
            Self::Leftover { .. } => ViolationClass::Drain,
        }
    }

    /// Identity of the offending cell, when the violation names one.
    #[must_use]
    pub const fn addr(self) -> Option<RegAddr> {
        match self {
            Self::UnexpectedRead { addr }
            | Self::UnexpectedWrite { addr, .. }
            | Self::WrongWriteValue { addr, .. } => Some(addr),
            Self::Leftover { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Violation, ViolationClass};
    use crate::RegAddr;

    const ADDR: RegAddr = RegAddr::new(0x2000_0800);

    #[test]
    fn class_mapping_matches_violation_taxonomy() {
        assert_eq!(
            Violation::UnexpectedRead { addr: ADDR }.class(),
            ViolationClass::Sequence
        );
        assert_eq!(
            Violation::UnexpectedWrite {
                addr: ADDR,
                value: 1
            }
            .class(),
            ViolationClass::Sequence
        );
        assert_eq!(
            Violation::WrongWriteValue {
                addr: ADDR,
                expected: 1,
                actual: 2
            }
            .class(),
            ViolationClass::Value
        );
        assert_eq!(
            Violation::Leftover { remaining: 3 }.class(),
            ViolationClass::Drain
        );
    }

    #[test]
    fn addr_is_reported_for_access_violations_only() {
        assert_eq!(Violation::UnexpectedRead { addr: ADDR }.addr(), Some(ADDR));
        assert_eq!(Violation::Leftover { remaining: 1 }.addr(), None);
    }

    #[test]
    fn display_reports_address_and_values_in_hex() {
        let report = Violation::WrongWriteValue {
            addr: ADDR,
            expected: 0x01,
            actual: 0x02,
        }
        .to_string();
        assert_eq!(
            report,
            "unexpected value 0x00000002 of write to address 0x20000800, expected 0x00000001"
        );

        let report = Violation::UnexpectedRead { addr: ADDR }.to_string();
        assert_eq!(report, "unexpected read at address 0x20000800");
    }
}
