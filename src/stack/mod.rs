//! Per-message delivery on top of the codec layer. Commands flow out through
//! an `mpsc` transport boundary; statuses flow back in and get correlated to
//! the oldest compatible outstanding send.
use crate::access::{AccessPdu, Opcode};
use crate::address::{Address, UnicastAddress};
use crate::crypto::key::{AppKey, DevKey};
use crate::crypto::materials::SecurityMaterials;
use crate::crypto::AppKeyIndex;
use crate::mesh::{SequenceNumber, U24};
use crate::messages::MessagePackError;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicU32, Ordering};
use core::time::Duration;

pub mod messenger;

pub use messenger::{
    CancelHandle, Delivery, IncomingStatus, MessageKeys, Messenger, StatusStream,
};

/// Envelope handed to the transport collaborator. The PDU bytes inside are
/// what goes on the air; retries re-send this exact value.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OutgoingAccessMessage {
    pub pdu: AccessPdu,
    pub seq: SequenceNumber,
}

/// Envelope delivered by the transport's receive side.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IncomingAccessMessage {
    pub src: UnicastAddress,
    pub opcode: Opcode,
    pub parameters: Vec<u8>,
}

/// Identifies one in-flight message. Ordering is (destination, sequence,
/// source) so an in-order registry scan yields the oldest outstanding entry
/// per destination first.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct MessageId {
    pub dst: Address,
    pub seq: SequenceNumber,
    pub src: UnicastAddress,
}

/// Terminal delivery failures surfaced to whoever initiated the send.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum DeliveryError {
    /// No correlated response before the deadline, retry budget spent.
    Timeout,
    Cancelled,
    /// The transport hung up.
    ChannelClosed,
    /// No key under that index (or key class doesn't fit the command).
    InvalidKeyIndex,
    InvalidDestination,
    Encode(MessagePackError),
}
impl From<MessagePackError> for DeliveryError {
    #[must_use]
    fn from(e: MessagePackError) -> Self {
        DeliveryError::Encode(e)
    }
}

/// Number of re-sends after the initial transmission.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct RetryCount(pub u8);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DeliveryConfig {
    pub attempts: RetryCount,
    pub timeout: Duration,
    /// Transport bound on proxy filter list length, `None` for unbounded.
    pub max_filter_addresses: Option<NonZeroUsize>,
}
impl Default for DeliveryConfig {
    #[must_use]
    fn default() -> Self {
        DeliveryConfig {
            attempts: RetryCount(2),
            timeout: Duration::from_secs(10),
            max_filter_addresses: None,
        }
    }
}

/// Atomic `SequenceNumber` allocator, wraps at 24 bits.
#[derive(Default, Debug)]
pub struct SeqCounter(AtomicU32);
impl SeqCounter {
    #[must_use]
    pub const fn new(start: u32) -> SeqCounter {
        SeqCounter(AtomicU32::new(start))
    }
    pub fn next(&self) -> SequenceNumber {
        SequenceNumber(U24::new_masked(self.0.fetch_add(1, Ordering::Relaxed)))
    }
}

/// Read-only key lookup seam. Key rotation and persistence are the
/// implementer's concern.
pub trait KeyStore {
    fn app_key(&self, index: AppKeyIndex) -> Option<&AppKey>;
    fn device_key(&self, node: UnicastAddress) -> Option<&DevKey>;
}
impl KeyStore for SecurityMaterials {
    fn app_key(&self, index: AppKeyIndex) -> Option<&AppKey> {
        self.app_key_map.get_key(index).map(|m| &m.app_key)
    }
    fn device_key(&self, node: UnicastAddress) -> Option<&DevKey> {
        self.dev_key_map.get_key(node)
    }
}
