//! The per-message delivery machine. `Messenger::send` encodes a command and
//! registers it as pending; `Delivery::finish` hands the bytes to the
//! transport, arms the deadline and re-sends the stored bytes on expiry until
//! the retry budget is gone. One spawned dispatcher task consumes the
//! transport's receive side and completes pending entries over `oneshot`
//! channels, oldest entry first per destination.
use crate::address::{Address, UnicastAddress};
use crate::asyncs::time;
use crate::crypto::{AppKeyIndex, SZMIC};
use crate::messages;
use crate::messages::{MeshCommand, MeshStatus};
use crate::stack::{
    DeliveryConfig, DeliveryError, IncomingAccessMessage, KeyStore, MessageId,
    OutgoingAccessMessage, RetryCount, SeqCounter,
};
use alloc::collections::BTreeMap;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

const STATUS_CHANNEL_CAPACITY: usize = 16;

/// Which key class secures an outgoing message.
pub enum MessageKeys {
    Device,
    App(AppKeyIndex),
}

struct PendingEntry {
    expected_opcode: crate::access::Opcode,
    sender: oneshot::Sender<MeshStatus>,
}

type Registry = BTreeMap<MessageId, PendingEntry>;

fn lock(pending: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    match pending.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A decodable status that didn't correlate to any outstanding send, plus
/// anything undecodable (as `MeshStatus::Unrecognized`).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IncomingStatus {
    pub src: UnicastAddress,
    pub status: MeshStatus,
}

/// Uncorrelated status feed for the application layer.
pub struct StatusStream(mpsc::Receiver<IncomingStatus>);
impl futures_core::Stream for StatusStream {
    type Item = IncomingStatus;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.poll_recv(cx)
    }
}

pub struct Messenger<K: KeyStore> {
    element_address: UnicastAddress,
    key_store: K,
    config: DeliveryConfig,
    seq: SeqCounter,
    outgoing: mpsc::Sender<OutgoingAccessMessage>,
    pending: Arc<Mutex<Registry>>,
}

impl<K: KeyStore> Messenger<K> {
    /// Spawns the dispatcher task for `incoming`, so this must be called
    /// within a runtime. Returns the messenger and the uncorrelated status
    /// feed.
    #[must_use]
    pub fn new(
        element_address: UnicastAddress,
        key_store: K,
        config: DeliveryConfig,
        outgoing: mpsc::Sender<OutgoingAccessMessage>,
        incoming: mpsc::Receiver<IncomingAccessMessage>,
    ) -> (Messenger<K>, StatusStream) {
        let pending = Arc::new(Mutex::new(Registry::new()));
        let (status_tx, status_rx) = mpsc::channel(STATUS_CHANNEL_CAPACITY);
        tokio::spawn(dispatch(incoming, Arc::clone(&pending), status_tx));
        (
            Messenger {
                element_address,
                key_store,
                config,
                seq: SeqCounter::new(0),
                outgoing,
                pending,
            },
            StatusStream(status_rx),
        )
    }
    #[must_use]
    pub fn element_address(&self) -> UnicastAddress {
        self.element_address
    }
    /// Encodes `command` and registers it as pending (when acknowledged).
    /// Nothing is transmitted until the returned [`Delivery`] is driven with
    /// [`Delivery::finish`].
    pub fn send(
        &self,
        command: &MeshCommand,
        dst: Address,
        keys: &MessageKeys,
    ) -> Result<Delivery, DeliveryError> {
        if !dst.is_assigned() {
            return Err(DeliveryError::InvalidDestination);
        }
        let app_key = match (command.is_app_key_secured(), keys) {
            (true, MessageKeys::App(index)) => Some(
                self.key_store
                    .app_key(*index)
                    .ok_or(DeliveryError::InvalidKeyIndex)?,
            ),
            (false, MessageKeys::Device) => {
                let node = dst.unicast().ok_or(DeliveryError::InvalidDestination)?;
                self.key_store
                    .device_key(node)
                    .ok_or(DeliveryError::InvalidKeyIndex)?;
                None
            }
            // Key class doesn't fit the command's security class.
            _ => return Err(DeliveryError::InvalidKeyIndex),
        };
        let pdu = messages::encode(
            command,
            app_key,
            SZMIC::small(),
            self.element_address,
            dst,
            self.config.max_filter_addresses,
        )?;
        let seq = self.seq.next();
        let id = MessageId {
            dst,
            seq,
            src: self.element_address,
        };
        let receiver = match command.response_opcode() {
            Some(expected_opcode) => {
                let (sender, receiver) = oneshot::channel();
                lock(&self.pending).insert(
                    id,
                    PendingEntry {
                        expected_opcode,
                        sender,
                    },
                );
                Some(receiver)
            }
            None => None,
        };
        Ok(Delivery {
            id,
            message: OutgoingAccessMessage { pdu, seq },
            outgoing: self.outgoing.clone(),
            pending: Arc::clone(&self.pending),
            receiver,
            attempts: self.config.attempts,
            timeout: self.config.timeout,
        })
    }
}

async fn dispatch(
    mut incoming: mpsc::Receiver<IncomingAccessMessage>,
    pending: Arc<Mutex<Registry>>,
    mut statuses: mpsc::Sender<IncomingStatus>,
) {
    while let Some(message) = incoming.recv().await {
        let status = match MeshStatus::unpack(message.opcode, &message.parameters) {
            Ok(status) => status,
            // Malformed for its claimed opcode. Degrade to unrecognized and
            // keep the batch flowing.
            Err(_) => MeshStatus::Unrecognized {
                opcode: message.opcode,
                parameters: message.parameters.clone(),
            },
        };
        let correlated = if let MeshStatus::Unrecognized { .. } = status {
            None
        } else {
            let mut registry = lock(&pending);
            // In-order scan: smallest sequence for this destination first.
            let id = registry
                .iter()
                .find(|(id, entry)| {
                    id.dst == Address::Unicast(message.src)
                        && entry.expected_opcode == message.opcode
                })
                .map(|(&id, _)| id);
            id.and_then(|id| registry.remove(&id))
        };
        match correlated {
            // A dropped receiver means the delivery was cancelled between
            // the scan and here; the status is discarded, not delivered.
            Some(entry) => drop(entry.sender.send(status)),
            // A closed feed just means the application stopped listening;
            // correlation keeps running either way.
            None => {
                let _ = statuses
                    .send(IncomingStatus {
                        src: message.src,
                        status,
                    })
                    .await;
            }
        }
    }
}

/// One in-flight message. Dropping it (or [`Delivery::cancel`]) removes the
/// pending entry so a racing response is discarded, never delivered.
pub struct Delivery {
    id: MessageId,
    message: OutgoingAccessMessage,
    outgoing: mpsc::Sender<OutgoingAccessMessage>,
    pending: Arc<Mutex<Registry>>,
    receiver: Option<oneshot::Receiver<MeshStatus>>,
    attempts: RetryCount,
    timeout: Duration,
}

impl Delivery {
    #[must_use]
    pub fn message_id(&self) -> MessageId {
        self.id
    }
    /// Handle for cancelling this delivery from another task.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            id: self.id,
            pending: Arc::clone(&self.pending),
        }
    }
    /// Drives the delivery to a terminal result: hand the bytes to the
    /// transport, then await the correlated status, re-sending the identical
    /// bytes on each deadline expiry while retry budget remains.
    /// Unacknowledged messages resolve with `Ok(None)` on handoff.
    pub async fn finish(mut self) -> Result<Option<MeshStatus>, DeliveryError> {
        self.outgoing
            .send(self.message.clone())
            .await
            .map_err(|_| DeliveryError::ChannelClosed)?;
        let mut receiver = match self.receiver.take() {
            None => return Ok(None),
            Some(receiver) => receiver,
        };
        let mut retries_left = self.attempts.0;
        loop {
            match time::timeout(self.timeout, &mut receiver).await {
                Ok(Ok(status)) => return Ok(Some(status)),
                // Entry removed without a status: cancelled elsewhere.
                Ok(Err(_)) => return Err(DeliveryError::Cancelled),
                Err(time::TimeoutError(())) => {
                    if retries_left == 0 {
                        return Err(DeliveryError::Timeout);
                    }
                    retries_left -= 1;
                    self.outgoing
                        .send(self.message.clone())
                        .await
                        .map_err(|_| DeliveryError::ChannelClosed)?;
                }
            }
        }
    }
    /// Cancels without transmitting anything further.
    pub fn cancel(self) {
        drop(self);
    }
}
impl Drop for Delivery {
    fn drop(&mut self) {
        lock(&self.pending).remove(&self.id);
    }
}

pub struct CancelHandle {
    id: MessageId,
    pending: Arc<Mutex<Registry>>,
}
impl CancelHandle {
    /// Removes the pending entry; a `finish` in flight resolves with
    /// `DeliveryError::Cancelled` and stops retrying.
    pub fn cancel(self) {
        lock(&self.pending).remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key::{AppKey, DevKey};
    use crate::crypto::materials::SecurityMaterials;
    use crate::mesh::TransactionID;
    use crate::messages::MessageOpcode;
    use futures_util::StreamExt;

    const NODE: u16 = 0x0002;

    fn materials() -> SecurityMaterials {
        let mut materials = SecurityMaterials::new();
        materials.app_key_map.insert(
            AppKeyIndex::new(0),
            AppKey::from_hex("63964771734fbd76e3b40519d1d94a48").unwrap(),
        );
        materials
            .dev_key_map
            .insert(UnicastAddress::new(NODE), DevKey::random_secure());
        materials
    }

    fn messenger(
        config: DeliveryConfig,
    ) -> (
        Messenger<SecurityMaterials>,
        mpsc::Receiver<OutgoingAccessMessage>,
        mpsc::Sender<IncomingAccessMessage>,
        StatusStream,
    ) {
        let (outgoing_tx, outgoing_rx) = mpsc::channel(16);
        let (incoming_tx, incoming_rx) = mpsc::channel(16);
        let (messenger, statuses) = Messenger::new(
            UnicastAddress::new(0x0001),
            materials(),
            config,
            outgoing_tx,
            incoming_rx,
        );
        (messenger, outgoing_rx, incoming_tx, statuses)
    }

    fn on_off_status(present: bool) -> IncomingAccessMessage {
        IncomingAccessMessage {
            src: UnicastAddress::new(NODE),
            opcode: MessageOpcode::GenericOnOffStatus.into(),
            parameters: alloc::vec![u8::from(present)],
        }
    }

    #[tokio::test]
    async fn test_unacknowledged_resolves_on_handoff() {
        let (messenger, mut outgoing, _incoming, _statuses) =
            messenger(DeliveryConfig::default());
        let delivery = messenger
            .send(
                &MeshCommand::GenericOnOffSetUnacknowledged {
                    on_off: true,
                    tid: TransactionID(0),
                },
                Address::from(NODE),
                &MessageKeys::App(AppKeyIndex::new(0)),
            )
            .unwrap();
        assert_eq!(delivery.finish().await, Ok(None));
        let sent = outgoing.recv().await.unwrap();
        assert_eq!(sent.pdu.parameters, alloc::vec![0x01, 0x00]);
        assert!(outgoing.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_acknowledged_roundtrip() {
        let (messenger, mut outgoing, mut incoming, _statuses) =
            messenger(DeliveryConfig::default());
        let delivery = messenger
            .send(
                &MeshCommand::GenericOnOffGet,
                Address::from(NODE),
                &MessageKeys::App(AppKeyIndex::new(0)),
            )
            .unwrap();
        incoming.send(on_off_status(true)).await.unwrap();
        assert_eq!(
            delivery.finish().await,
            Ok(Some(MeshStatus::GenericOnOffStatus {
                present: true,
                target: None,
            }))
        );
        assert!(outgoing.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_retries_then_timeout() {
        tokio::time::pause();
        let config = DeliveryConfig {
            attempts: RetryCount(2),
            timeout: Duration::from_secs(10),
            max_filter_addresses: None,
        };
        let (messenger, mut outgoing, _incoming, _statuses) = messenger(config);
        let delivery = messenger
            .send(
                &MeshCommand::GenericOnOffGet,
                Address::from(NODE),
                &MessageKeys::App(AppKeyIndex::new(0)),
            )
            .unwrap();
        assert_eq!(delivery.finish().await, Err(DeliveryError::Timeout));
        // Initial send plus exactly two byte-identical retries, nothing after.
        let first = outgoing.recv().await.unwrap();
        let second = outgoing.recv().await.unwrap();
        let third = outgoing.recv().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second, third);
        assert!(outgoing.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_discards_racing_response() {
        let (messenger, _outgoing, mut incoming, mut statuses) =
            messenger(DeliveryConfig::default());
        let delivery = messenger
            .send(
                &MeshCommand::GenericOnOffGet,
                Address::from(NODE),
                &MessageKeys::App(AppKeyIndex::new(0)),
            )
            .unwrap();
        let handle = delivery.cancel_handle();
        let finishing = tokio::spawn(delivery.finish());
        handle.cancel();
        assert_eq!(finishing.await.unwrap(), Err(DeliveryError::Cancelled));
        // The late response is uncorrelated now and goes to the app feed.
        incoming.send(on_off_status(true)).await.unwrap();
        let uncorrelated = statuses.next().await.unwrap();
        assert_eq!(uncorrelated.src, UnicastAddress::new(NODE));
        assert_eq!(
            uncorrelated.status,
            MeshStatus::GenericOnOffStatus {
                present: true,
                target: None,
            }
        );
    }

    #[tokio::test]
    async fn test_oldest_outstanding_correlates_first() {
        let (messenger, _outgoing, mut incoming, _statuses) =
            messenger(DeliveryConfig::default());
        let keys = MessageKeys::App(AppKeyIndex::new(0));
        let first = messenger
            .send(&MeshCommand::GenericOnOffGet, Address::from(NODE), &keys)
            .unwrap();
        let second = messenger
            .send(&MeshCommand::GenericOnOffGet, Address::from(NODE), &keys)
            .unwrap();
        assert!(first.message_id() < second.message_id());
        incoming.send(on_off_status(true)).await.unwrap();
        incoming.send(on_off_status(false)).await.unwrap();
        assert_eq!(
            first.finish().await,
            Ok(Some(MeshStatus::GenericOnOffStatus {
                present: true,
                target: None,
            }))
        );
        assert_eq!(
            second.finish().await,
            Ok(Some(MeshStatus::GenericOnOffStatus {
                present: false,
                target: None,
            }))
        );
    }

    #[tokio::test]
    async fn test_device_key_commands() {
        let (messenger, mut outgoing, mut incoming, _statuses) =
            messenger(DeliveryConfig::default());
        let delivery = messenger
            .send(
                &MeshCommand::ConfigNodeReset,
                Address::from(NODE),
                &MessageKeys::Device,
            )
            .unwrap();
        incoming
            .send(IncomingAccessMessage {
                src: UnicastAddress::new(NODE),
                opcode: MessageOpcode::NodeResetStatus.into(),
                parameters: alloc::vec::Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(
            delivery.finish().await,
            Ok(Some(MeshStatus::ConfigNodeResetStatus))
        );
        let sent = outgoing.recv().await.unwrap();
        assert!(sent.pdu.parameters.is_empty());
        assert_eq!(sent.pdu.security.akf, crate::crypto::AKF(false));
    }

    #[tokio::test]
    async fn test_key_and_destination_validation() {
        let (messenger, _outgoing, _incoming, _statuses) =
            messenger(DeliveryConfig::default());
        // App secured command with a device key.
        assert_eq!(
            messenger
                .send(
                    &MeshCommand::GenericOnOffGet,
                    Address::from(NODE),
                    &MessageKeys::Device,
                )
                .err(),
            Some(DeliveryError::InvalidKeyIndex)
        );
        // Unknown app key index.
        assert_eq!(
            messenger
                .send(
                    &MeshCommand::GenericOnOffGet,
                    Address::from(NODE),
                    &MessageKeys::App(AppKeyIndex::new(1)),
                )
                .err(),
            Some(DeliveryError::InvalidKeyIndex)
        );
        // Unassigned destination.
        assert_eq!(
            messenger
                .send(
                    &MeshCommand::GenericOnOffGet,
                    Address::Unassigned,
                    &MessageKeys::App(AppKeyIndex::new(0)),
                )
                .err(),
            Some(DeliveryError::InvalidDestination)
        );
        // Device key command needs a unicast destination.
        assert_eq!(
            messenger
                .send(
                    &MeshCommand::ConfigNodeReset,
                    Address::from(0xC000_u16),
                    &MessageKeys::Device,
                )
                .err(),
            Some(DeliveryError::InvalidDestination)
        );
        // No device key stored for that node.
        assert_eq!(
            messenger
                .send(
                    &MeshCommand::ConfigNodeReset,
                    Address::from(0x0042_u16),
                    &MessageKeys::Device,
                )
                .err(),
            Some(DeliveryError::InvalidKeyIndex)
        );
    }

    #[tokio::test]
    async fn test_undecodable_status_degrades_to_unrecognized() {
        let (_messenger, _outgoing, mut incoming, mut statuses) =
            messenger(DeliveryConfig::default());
        // GATT proxy status with an out of range state byte.
        incoming
            .send(IncomingAccessMessage {
                src: UnicastAddress::new(NODE),
                opcode: MessageOpcode::GATTProxyStatus.into(),
                parameters: alloc::vec![0x07],
            })
            .await
            .unwrap();
        let incoming_status = statuses.next().await.unwrap();
        assert_eq!(
            incoming_status.status,
            MeshStatus::Unrecognized {
                opcode: MessageOpcode::GATTProxyStatus.into(),
                parameters: alloc::vec![0x07],
            }
        );
    }
}
