//! Small wire scalar types shared by the message codecs.
use crate::bytes::ToFromBytesEndian;
use core::fmt::{Display, Error, Formatter};

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
/// 24-bit Unsigned Integer. Used for `SequenceNumber`.
pub struct U24(u32);
const U24_MAX: u32 = (1_u32 << 24) - 1;
impl Display for U24 {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "U24({})", self.0)
    }
}
impl U24 {
    /// # Panics
    /// Panics if `v > U24_MAX`.
    #[must_use]
    pub fn new(v: u32) -> U24 {
        if v > U24_MAX {
            panic!("number {} is bigger than max U24 {}", v, U24_MAX);
        } else {
            U24(v)
        }
    }
    /// Creates a U24 by masking the 4th byte of `v`.
    #[must_use]
    pub const fn new_masked(v: u32) -> U24 {
        U24(v & U24_MAX)
    }
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}
impl ToFromBytesEndian for U24 {
    type AsBytesType = [u8; 3];

    #[must_use]
    fn to_bytes_le(&self) -> Self::AsBytesType {
        let b = self.0.to_le_bytes();
        [b[0], b[1], b[2]]
    }

    #[must_use]
    fn to_bytes_be(&self) -> Self::AsBytesType {
        let b = self.0.to_be_bytes();
        [b[1], b[2], b[3]]
    }

    #[must_use]
    fn from_bytes_le(bytes: &[u8]) -> Option<Self> {
        if bytes.len() == 3 {
            Some(U24(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])))
        } else {
            None
        }
    }

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        if bytes.len() == 3 {
            Some(U24(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])))
        } else {
            None
        }
    }
}

/// 24-bit sequence number identifying an outgoing message from one source.
#[derive(Copy, Clone, Eq, Ord, PartialOrd, PartialEq, Debug, Default, Hash)]
pub struct SequenceNumber(pub U24);

impl Display for SequenceNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "SequenceNumber({})", (self.0).value())
    }
}
impl ToFromBytesEndian for SequenceNumber {
    type AsBytesType = [u8; 3];

    #[must_use]
    fn to_bytes_le(&self) -> Self::AsBytesType {
        (self.0).to_bytes_le()
    }

    #[must_use]
    fn to_bytes_be(&self) -> Self::AsBytesType {
        (self.0).to_bytes_be()
    }

    #[must_use]
    fn from_bytes_le(bytes: &[u8]) -> Option<Self> {
        Some(SequenceNumber(U24::from_bytes_le(bytes)?))
    }

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        Some(SequenceNumber(U24::from_bytes_be(bytes)?))
    }
}

/// Bluetooth SIG assigned Company Identifier. Little endian on the wire
/// (both in vendor opcodes and vendor message parameters).
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanyID(pub u16);
impl CompanyID {
    #[must_use]
    pub const fn byte_len() -> usize {
        2
    }
}
impl ToFromBytesEndian for CompanyID {
    type AsBytesType = [u8; 2];

    #[must_use]
    fn to_bytes_le(&self) -> Self::AsBytesType {
        (self.0).to_bytes_le()
    }

    #[must_use]
    fn to_bytes_be(&self) -> Self::AsBytesType {
        (self.0).to_bytes_be()
    }

    #[must_use]
    fn from_bytes_le(bytes: &[u8]) -> Option<Self> {
        Some(CompanyID(u16::from_bytes_le(bytes)?))
    }

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        Some(CompanyID(u16::from_bytes_be(bytes)?))
    }
}

/// Transaction Identifier distinguishing re-sent generic messages from new
/// ones. Free-running per client, wraps at 0xFF.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Default, Hash)]
pub struct TransactionID(pub u8);
impl TransactionID {
    #[must_use]
    pub const fn next(self) -> TransactionID {
        TransactionID(self.0.wrapping_add(1))
    }
}
impl From<TransactionID> for u8 {
    #[must_use]
    fn from(tid: TransactionID) -> Self {
        tid.0
    }
}

const TRANSMIT_COUNT_MAX: u8 = (1 << 3) - 1;
/// 3-bit network transmit count. Wire value is `transmissions - 1`.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct TransmitCount(u8);
impl TransmitCount {
    /// # Panics
    /// Panics if `count > 7`.
    #[must_use]
    pub fn new(count: u8) -> TransmitCount {
        assert!(
            count <= TRANSMIT_COUNT_MAX,
            "transmit count {} is bigger than max {}",
            count,
            TRANSMIT_COUNT_MAX
        );
        TransmitCount(count)
    }
    #[must_use]
    pub const fn new_masked(count: u8) -> TransmitCount {
        TransmitCount(count & TRANSMIT_COUNT_MAX)
    }
}
impl From<TransmitCount> for u8 {
    #[must_use]
    fn from(count: TransmitCount) -> Self {
        count.0
    }
}

const TRANSMIT_STEPS_MAX: u8 = (1 << 5) - 1;
/// 5-bit transmit interval steps. Interval is `(steps + 1) * 10ms`.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct TransmitIntervalSteps(u8);
impl TransmitIntervalSteps {
    /// # Panics
    /// Panics if `steps > 31`.
    #[must_use]
    pub fn new(steps: u8) -> TransmitIntervalSteps {
        assert!(
            steps <= TRANSMIT_STEPS_MAX,
            "transmit steps {} is bigger than max {}",
            steps,
            TRANSMIT_STEPS_MAX
        );
        TransmitIntervalSteps(steps)
    }
    #[must_use]
    pub const fn new_masked(steps: u8) -> TransmitIntervalSteps {
        TransmitIntervalSteps(steps & TRANSMIT_STEPS_MAX)
    }
}
impl From<TransmitIntervalSteps> for u8 {
    #[must_use]
    fn from(steps: TransmitIntervalSteps) -> Self {
        steps.0
    }
}

/// Network Transmit composite state. One byte on the wire: count in the low
/// 3 bits, interval steps in the high 5 bits.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct NetworkTransmit {
    pub count: TransmitCount,
    pub steps: TransmitIntervalSteps,
}
impl NetworkTransmit {
    #[must_use]
    pub const fn new(count: TransmitCount, steps: TransmitIntervalSteps) -> NetworkTransmit {
        NetworkTransmit { count, steps }
    }
    #[must_use]
    pub const fn packed(self) -> u8 {
        self.count.0 | (self.steps.0 << 3)
    }
    #[must_use]
    pub const fn unpack(byte: u8) -> NetworkTransmit {
        NetworkTransmit {
            count: TransmitCount::new_masked(byte),
            steps: TransmitIntervalSteps::new_masked(byte >> 3),
        }
    }
}
impl From<NetworkTransmit> for u8 {
    #[must_use]
    fn from(transmit: NetworkTransmit) -> Self {
        transmit.packed()
    }
}
impl From<u8> for NetworkTransmit {
    #[must_use]
    fn from(byte: u8) -> Self {
        NetworkTransmit::unpack(byte)
    }
}
