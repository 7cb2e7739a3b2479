//! Typed access messages. `MeshCommand` is the closed set of outgoing
//! messages, `MeshStatus` the closed set of decodable replies; the opcode
//! tables live here so adding a message kind is one variant plus one match
//! arm and the compiler checks the rest.
use crate::access::{
    AccessPdu, Opcode, OpcodeConversionError, SecurityDescriptor, SigOpcode, VendorOpcode,
};
use crate::address::{Address, UnicastAddress};
use crate::bytes::ToFromBytesEndian;
use crate::crypto::key::AppKey;
use crate::crypto::SZMIC;
use crate::foundation::{GATTProxyState, SceneStatusCode};
use crate::mesh::{CompanyID, NetworkTransmit, TransactionID};
use crate::proxy;
use crate::proxy::{FilterType, ProxyFilterError, ProxyOpcode};
use alloc::vec::Vec;
use core::convert::{TryFrom, TryInto};
use core::num::NonZeroUsize;

/// Error when trying to pack or unpack a message byte buffer.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub enum MessagePackError {
    /// Byte buffer too small to fit the whole message.
    SmallBuffer,
    /// Incoming byte buffer length doesn't make sense.
    BadLength,
    /// Incoming byte buffer creates an invalid message.
    BadBytes,
    /// Opcode can't be represented on the wire.
    BadOpcode,
    /// Message can't be packed because the object is in a bad state.
    BadState,
}
impl From<OpcodeConversionError> for MessagePackError {
    #[must_use]
    fn from(_: OpcodeConversionError) -> Self {
        MessagePackError::BadOpcode
    }
}
impl From<ProxyFilterError> for MessagePackError {
    #[must_use]
    fn from(e: ProxyFilterError) -> Self {
        match e {
            ProxyFilterError::EmptyAddressList => MessagePackError::BadState,
            ProxyFilterError::TooManyAddresses => MessagePackError::BadLength,
        }
    }
}

/// 16-bit scene number. Zero is prohibited on the wire.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneNumber(u16);
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct SceneNumberError(pub ());
impl SceneNumber {
    /// # Panics
    /// Panics if `scene == 0`.
    #[must_use]
    pub fn new(scene: u16) -> SceneNumber {
        assert_ne!(scene, 0, "scene number zero is prohibited");
        SceneNumber(scene)
    }
}
impl TryFrom<u16> for SceneNumber {
    type Error = SceneNumberError;

    fn try_from(scene: u16) -> Result<Self, Self::Error> {
        if scene == 0 {
            Err(SceneNumberError(()))
        } else {
            Ok(SceneNumber(scene))
        }
    }
}
impl From<SceneNumber> for u16 {
    #[must_use]
    fn from(scene: SceneNumber) -> Self {
        scene.0
    }
}

/// SIG model opcodes this crate speaks. All double octet.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(u16)]
pub enum MessageOpcode {
    GATTProxyGet = 0x8012,
    GATTProxySet = 0x8013,
    GATTProxyStatus = 0x8014,
    NetworkTransmitGet = 0x8023,
    NetworkTransmitSet = 0x8024,
    NetworkTransmitStatus = 0x8025,
    NodeReset = 0x8049,
    NodeResetStatus = 0x804A,
    GenericOnOffGet = 0x8201,
    GenericOnOffSet = 0x8202,
    GenericOnOffSetUnacknowledged = 0x8203,
    GenericOnOffStatus = 0x8204,
    GenericLevelGet = 0x8205,
    GenericLevelStatus = 0x8208,
    SceneRegisterStatus = 0x8245,
    SceneStore = 0x8246,
    SceneStoreUnacknowledged = 0x8247,
    SceneDelete = 0x829E,
    SceneDeleteUnacknowledged = 0x829F,
}
impl From<MessageOpcode> for Opcode {
    #[must_use]
    fn from(opcode: MessageOpcode) -> Self {
        Opcode::SIG(SigOpcode::DoubleOctet(opcode as u16))
    }
}
impl TryFrom<Opcode> for MessageOpcode {
    type Error = OpcodeConversionError;

    fn try_from(opcode: Opcode) -> Result<Self, Self::Error> {
        if let Opcode::SIG(SigOpcode::DoubleOctet(d)) = opcode {
            match d {
                0x8012 => Ok(MessageOpcode::GATTProxyGet),
                0x8013 => Ok(MessageOpcode::GATTProxySet),
                0x8014 => Ok(MessageOpcode::GATTProxyStatus),
                0x8023 => Ok(MessageOpcode::NetworkTransmitGet),
                0x8024 => Ok(MessageOpcode::NetworkTransmitSet),
                0x8025 => Ok(MessageOpcode::NetworkTransmitStatus),
                0x8049 => Ok(MessageOpcode::NodeReset),
                0x804A => Ok(MessageOpcode::NodeResetStatus),
                0x8201 => Ok(MessageOpcode::GenericOnOffGet),
                0x8202 => Ok(MessageOpcode::GenericOnOffSet),
                0x8203 => Ok(MessageOpcode::GenericOnOffSetUnacknowledged),
                0x8204 => Ok(MessageOpcode::GenericOnOffStatus),
                0x8205 => Ok(MessageOpcode::GenericLevelGet),
                0x8208 => Ok(MessageOpcode::GenericLevelStatus),
                0x8245 => Ok(MessageOpcode::SceneRegisterStatus),
                0x8246 => Ok(MessageOpcode::SceneStore),
                0x8247 => Ok(MessageOpcode::SceneStoreUnacknowledged),
                0x829E => Ok(MessageOpcode::SceneDelete),
                0x829F => Ok(MessageOpcode::SceneDeleteUnacknowledged),
                _ => Err(OpcodeConversionError(())),
            }
        } else {
            Err(OpcodeConversionError(()))
        }
    }
}

/// Every outgoing message this crate can build. Opcodes are intrinsic to the
/// variant, never computed.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum MeshCommand {
    GenericOnOffGet,
    GenericOnOffSet {
        on_off: bool,
        tid: TransactionID,
    },
    GenericOnOffSetUnacknowledged {
        on_off: bool,
        tid: TransactionID,
    },
    GenericLevelGet,
    SceneStore {
        scene: SceneNumber,
    },
    SceneStoreUnacknowledged {
        scene: SceneNumber,
    },
    SceneDelete {
        scene: SceneNumber,
    },
    SceneDeleteUnacknowledged {
        scene: SceneNumber,
    },
    ConfigNetworkTransmitGet,
    ConfigNetworkTransmitSet {
        transmit: NetworkTransmit,
    },
    ConfigGATTProxyGet,
    ConfigGATTProxySet {
        state: GATTProxyState,
    },
    ConfigNodeReset,
    SetProxyFilterType {
        filter_type: FilterType,
    },
    AddAddressesToProxyFilter {
        addresses: Vec<Address>,
    },
    RemoveAddressesFromProxyFilter {
        addresses: Vec<Address>,
    },
    Vendor {
        opcode: VendorOpcode,
        company_id: CompanyID,
        payload: Vec<u8>,
        /// Vendor models declare their own reply opcode, `None` for
        /// fire-and-forget messages.
        response: Option<Opcode>,
    },
}

impl MeshCommand {
    #[must_use]
    pub fn opcode(&self) -> Opcode {
        match self {
            MeshCommand::GenericOnOffGet => MessageOpcode::GenericOnOffGet.into(),
            MeshCommand::GenericOnOffSet { .. } => MessageOpcode::GenericOnOffSet.into(),
            MeshCommand::GenericOnOffSetUnacknowledged { .. } => {
                MessageOpcode::GenericOnOffSetUnacknowledged.into()
            }
            MeshCommand::GenericLevelGet => MessageOpcode::GenericLevelGet.into(),
            MeshCommand::SceneStore { .. } => MessageOpcode::SceneStore.into(),
            MeshCommand::SceneStoreUnacknowledged { .. } => {
                MessageOpcode::SceneStoreUnacknowledged.into()
            }
            MeshCommand::SceneDelete { .. } => MessageOpcode::SceneDelete.into(),
            MeshCommand::SceneDeleteUnacknowledged { .. } => {
                MessageOpcode::SceneDeleteUnacknowledged.into()
            }
            MeshCommand::ConfigNetworkTransmitGet => MessageOpcode::NetworkTransmitGet.into(),
            MeshCommand::ConfigNetworkTransmitSet { .. } => {
                MessageOpcode::NetworkTransmitSet.into()
            }
            MeshCommand::ConfigGATTProxyGet => MessageOpcode::GATTProxyGet.into(),
            MeshCommand::ConfigGATTProxySet { .. } => MessageOpcode::GATTProxySet.into(),
            MeshCommand::ConfigNodeReset => MessageOpcode::NodeReset.into(),
            MeshCommand::SetProxyFilterType { .. } => ProxyOpcode::SetFilterType.into(),
            MeshCommand::AddAddressesToProxyFilter { .. } => ProxyOpcode::AddAddresses.into(),
            MeshCommand::RemoveAddressesFromProxyFilter { .. } => {
                ProxyOpcode::RemoveAddresses.into()
            }
            MeshCommand::Vendor {
                opcode, company_id, ..
            } => Opcode::Vendor(*opcode, *company_id),
        }
    }
    /// The status opcode that acknowledges this command, `None` for
    /// unacknowledged messages.
    #[must_use]
    pub fn response_opcode(&self) -> Option<Opcode> {
        match self {
            MeshCommand::GenericOnOffGet | MeshCommand::GenericOnOffSet { .. } => {
                Some(MessageOpcode::GenericOnOffStatus.into())
            }
            MeshCommand::GenericOnOffSetUnacknowledged { .. }
            | MeshCommand::SceneStoreUnacknowledged { .. }
            | MeshCommand::SceneDeleteUnacknowledged { .. } => None,
            MeshCommand::GenericLevelGet => Some(MessageOpcode::GenericLevelStatus.into()),
            MeshCommand::SceneStore { .. } | MeshCommand::SceneDelete { .. } => {
                Some(MessageOpcode::SceneRegisterStatus.into())
            }
            MeshCommand::ConfigNetworkTransmitGet
            | MeshCommand::ConfigNetworkTransmitSet { .. } => {
                Some(MessageOpcode::NetworkTransmitStatus.into())
            }
            MeshCommand::ConfigGATTProxyGet | MeshCommand::ConfigGATTProxySet { .. } => {
                Some(MessageOpcode::GATTProxyStatus.into())
            }
            MeshCommand::ConfigNodeReset => Some(MessageOpcode::NodeResetStatus.into()),
            MeshCommand::SetProxyFilterType { .. }
            | MeshCommand::AddAddressesToProxyFilter { .. }
            | MeshCommand::RemoveAddressesFromProxyFilter { .. } => {
                Some(ProxyOpcode::FilterStatus.into())
            }
            MeshCommand::Vendor { response, .. } => *response,
        }
    }
    /// Application key secured (AKF == 1) vs device key secured messages.
    /// Configuration and proxy filter messages always use the device key.
    #[must_use]
    pub fn is_app_key_secured(&self) -> bool {
        match self {
            MeshCommand::GenericOnOffGet
            | MeshCommand::GenericOnOffSet { .. }
            | MeshCommand::GenericOnOffSetUnacknowledged { .. }
            | MeshCommand::GenericLevelGet
            | MeshCommand::SceneStore { .. }
            | MeshCommand::SceneStoreUnacknowledged { .. }
            | MeshCommand::SceneDelete { .. }
            | MeshCommand::SceneDeleteUnacknowledged { .. }
            | MeshCommand::Vendor { .. } => true,
            MeshCommand::ConfigNetworkTransmitGet
            | MeshCommand::ConfigNetworkTransmitSet { .. }
            | MeshCommand::ConfigGATTProxyGet
            | MeshCommand::ConfigGATTProxySet { .. }
            | MeshCommand::ConfigNodeReset
            | MeshCommand::SetProxyFilterType { .. }
            | MeshCommand::AddAddressesToProxyFilter { .. }
            | MeshCommand::RemoveAddressesFromProxyFilter { .. } => false,
        }
    }
    /// Serializes the variant fields into parameter bytes. Multi-byte scalar
    /// fields are little-endian; the proxy filter lists follow their own
    /// rules (see the `proxy` module). `max_filter_addresses` is the
    /// transport's bound on filter list length, `None` for unbounded.
    pub fn parameters(
        &self,
        max_filter_addresses: Option<NonZeroUsize>,
    ) -> Result<Vec<u8>, MessagePackError> {
        match self {
            MeshCommand::GenericOnOffGet
            | MeshCommand::GenericLevelGet
            | MeshCommand::ConfigNetworkTransmitGet
            | MeshCommand::ConfigGATTProxyGet
            | MeshCommand::ConfigNodeReset => Ok(Vec::new()),
            MeshCommand::GenericOnOffSet { on_off, tid }
            | MeshCommand::GenericOnOffSetUnacknowledged { on_off, tid } => {
                Ok(alloc::vec![u8::from(*on_off), tid.0])
            }
            MeshCommand::SceneStore { scene }
            | MeshCommand::SceneStoreUnacknowledged { scene }
            | MeshCommand::SceneDelete { scene }
            | MeshCommand::SceneDeleteUnacknowledged { scene } => {
                Ok(u16::from(*scene).to_bytes_le().to_vec())
            }
            MeshCommand::ConfigNetworkTransmitSet { transmit } => {
                Ok(alloc::vec![transmit.packed()])
            }
            MeshCommand::ConfigGATTProxySet { state } => Ok(alloc::vec![u8::from(*state)]),
            MeshCommand::SetProxyFilterType { filter_type } => {
                Ok(proxy::set_filter_type_parameters(*filter_type).to_vec())
            }
            MeshCommand::AddAddressesToProxyFilter { addresses } => {
                Ok(proxy::add_addresses_parameters(addresses, max_filter_addresses)?)
            }
            MeshCommand::RemoveAddressesFromProxyFilter { addresses } => Ok(
                proxy::remove_addresses_parameters(addresses, max_filter_addresses)?,
            ),
            MeshCommand::Vendor { payload, .. } => Ok(payload.clone()),
        }
    }
}

/// Encodes a command into a ready-to-send PDU. App key secured commands need
/// `app_key` to derive the AID; device key secured commands ignore it. Pure,
/// the command is never mutated.
pub fn encode(
    command: &MeshCommand,
    app_key: Option<&AppKey>,
    szmic: SZMIC,
    src: UnicastAddress,
    dst: Address,
    max_filter_addresses: Option<NonZeroUsize>,
) -> Result<AccessPdu, MessagePackError> {
    let security = if command.is_app_key_secured() {
        let key = app_key.ok_or(MessagePackError::BadState)?;
        SecurityDescriptor::with_app_key(key.aid(), szmic)
    } else {
        SecurityDescriptor::with_device_key(szmic)
    };
    Ok(AccessPdu {
        opcode: command.opcode(),
        parameters: command.parameters(max_filter_addresses)?,
        security,
        src,
        dst,
    })
}

/// Every status this crate can decode, plus `Unrecognized` for everything
/// else. Decoding yields a complete value or an error, never a partial one.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum MeshStatus {
    GenericOnOffStatus {
        present: bool,
        target: Option<(bool, u8)>,
    },
    GenericLevelStatus {
        present: i16,
        target: Option<(i16, u8)>,
    },
    SceneRegisterStatus {
        status: SceneStatusCode,
        current: Option<SceneNumber>,
        scenes: Vec<SceneNumber>,
    },
    ConfigNetworkTransmitStatus {
        transmit: NetworkTransmit,
    },
    ConfigGATTProxyStatus {
        state: GATTProxyState,
    },
    ConfigNodeResetStatus,
    ProxyFilterStatus {
        filter_type: FilterType,
        list_size: u16,
    },
    /// Opcode with no known status mapping. Not an error; the raw bytes are
    /// kept so an application layer can try its own decoding.
    Unrecognized {
        opcode: Opcode,
        parameters: Vec<u8>,
    },
}

fn unpack_on_off(value: u8) -> Result<bool, MessagePackError> {
    match value {
        0x00 => Ok(false),
        0x01 => Ok(true),
        _ => Err(MessagePackError::BadBytes),
    }
}

impl MeshStatus {
    /// Decodes a status off an incoming `(opcode, parameters)` pair. Unknown
    /// opcodes come back as `Unrecognized`; errors are reserved for known
    /// opcodes with malformed parameters.
    pub fn unpack(opcode: Opcode, parameters: &[u8]) -> Result<MeshStatus, MessagePackError> {
        if let Ok(proxy_opcode) = ProxyOpcode::try_from(opcode) {
            if proxy_opcode == ProxyOpcode::FilterStatus {
                let status = proxy::FilterStatus::unpack_from(parameters)?;
                return Ok(MeshStatus::ProxyFilterStatus {
                    filter_type: status.filter_type,
                    list_size: status.list_size,
                });
            }
        }
        let message_opcode = match MessageOpcode::try_from(opcode) {
            Ok(o) => o,
            Err(_) => {
                return Ok(MeshStatus::Unrecognized {
                    opcode,
                    parameters: parameters.to_vec(),
                })
            }
        };
        match message_opcode {
            MessageOpcode::GenericOnOffStatus => match parameters.len() {
                1 => Ok(MeshStatus::GenericOnOffStatus {
                    present: unpack_on_off(parameters[0])?,
                    target: None,
                }),
                3 => Ok(MeshStatus::GenericOnOffStatus {
                    present: unpack_on_off(parameters[0])?,
                    target: Some((unpack_on_off(parameters[1])?, parameters[2])),
                }),
                _ => Err(MessagePackError::BadLength),
            },
            MessageOpcode::GenericLevelStatus => match parameters.len() {
                2 => Ok(MeshStatus::GenericLevelStatus {
                    present: i16::from_bytes_le(&parameters[..2])
                        .ok_or(MessagePackError::BadBytes)?,
                    target: None,
                }),
                5 => Ok(MeshStatus::GenericLevelStatus {
                    present: i16::from_bytes_le(&parameters[..2])
                        .ok_or(MessagePackError::BadBytes)?,
                    target: Some((
                        i16::from_bytes_le(&parameters[2..4])
                            .ok_or(MessagePackError::BadBytes)?,
                        parameters[4],
                    )),
                }),
                _ => Err(MessagePackError::BadLength),
            },
            MessageOpcode::SceneRegisterStatus => {
                if parameters.len() < 3 || (parameters.len() - 3) % 2 != 0 {
                    return Err(MessagePackError::BadLength);
                }
                let status = parameters[0]
                    .try_into()
                    .map_err(|_| MessagePackError::BadBytes)?;
                let current_raw =
                    u16::from_bytes_le(&parameters[1..3]).ok_or(MessagePackError::BadBytes)?;
                let current = if current_raw == 0 {
                    None
                } else {
                    Some(SceneNumber(current_raw))
                };
                let mut scenes = Vec::with_capacity((parameters.len() - 3) / 2);
                for chunk in parameters[3..].chunks(2) {
                    let scene =
                        u16::from_bytes_le(chunk).ok_or(MessagePackError::BadBytes)?;
                    scenes.push(SceneNumber::try_from(scene).map_err(|_| {
                        MessagePackError::BadBytes
                    })?);
                }
                Ok(MeshStatus::SceneRegisterStatus {
                    status,
                    current,
                    scenes,
                })
            }
            MessageOpcode::NetworkTransmitStatus => {
                if parameters.len() != 1 {
                    Err(MessagePackError::BadLength)
                } else {
                    Ok(MeshStatus::ConfigNetworkTransmitStatus {
                        transmit: NetworkTransmit::unpack(parameters[0]),
                    })
                }
            }
            MessageOpcode::GATTProxyStatus => {
                if parameters.len() != 1 {
                    Err(MessagePackError::BadLength)
                } else {
                    Ok(MeshStatus::ConfigGATTProxyStatus {
                        state: parameters[0]
                            .try_into()
                            .map_err(|_| MessagePackError::BadBytes)?,
                    })
                }
            }
            MessageOpcode::NodeResetStatus => {
                if parameters.is_empty() {
                    Ok(MeshStatus::ConfigNodeResetStatus)
                } else {
                    Err(MessagePackError::BadLength)
                }
            }
            // Request opcodes aren't statuses; surface them as unrecognized
            // so a batch containing one keeps flowing.
            _ => Ok(MeshStatus::Unrecognized {
                opcode,
                parameters: parameters.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::AKF;
    use alloc::vec;

    fn src() -> UnicastAddress {
        UnicastAddress::new(0x0001)
    }
    fn dst() -> Address {
        Address::from(0x0002_u16)
    }
    fn app_key() -> AppKey {
        AppKey::from_hex("3216d1509884b533248541792b877f98").unwrap()
    }

    #[test]
    fn test_scene_number_little_endian() {
        let command = MeshCommand::SceneStore {
            scene: SceneNumber::new(0x1234),
        };
        assert_eq!(command.parameters(None).unwrap(), vec![0x34, 0x12]);
        let command = MeshCommand::SceneDelete {
            scene: SceneNumber::new(0x1234),
        };
        assert_eq!(command.parameters(None).unwrap(), vec![0x34, 0x12]);
    }

    #[test]
    fn test_node_reset_empty_parameters() {
        assert_eq!(
            MeshCommand::ConfigNodeReset.parameters(None).unwrap(),
            Vec::<u8>::new()
        );
    }

    #[test]
    #[should_panic]
    fn test_scene_number_zero() {
        let _ = SceneNumber::new(0);
    }

    #[test]
    fn test_encode_app_key_sets_akf_and_aid() {
        let pdu = encode(
            &MeshCommand::GenericOnOffGet,
            Some(&app_key()),
            SZMIC::small(),
            src(),
            dst(),
            None,
        )
        .unwrap();
        assert_eq!(pdu.security.akf, AKF(true));
        assert_eq!(pdu.security.aid, Some(app_key().aid()));
        assert_eq!(
            pdu.opcode,
            Opcode::SIG(SigOpcode::DoubleOctet(0x8201))
        );
        assert!(pdu.parameters.is_empty());
    }

    #[test]
    fn test_encode_device_key_clears_akf() {
        let pdu = encode(
            &MeshCommand::ConfigNodeReset,
            None,
            SZMIC::small(),
            src(),
            dst(),
            None,
        )
        .unwrap();
        assert_eq!(pdu.security.akf, AKF(false));
        assert_eq!(pdu.security.aid, None);
    }

    #[test]
    fn test_encode_app_command_without_key_fails() {
        assert_eq!(
            encode(
                &MeshCommand::GenericLevelGet,
                None,
                SZMIC::small(),
                src(),
                dst(),
                None,
            ),
            Err(MessagePackError::BadState)
        );
    }

    #[test]
    fn test_on_off_set_parameters() {
        let command = MeshCommand::GenericOnOffSet {
            on_off: true,
            tid: TransactionID(7),
        };
        assert_eq!(command.parameters(None).unwrap(), vec![0x01, 0x07]);
    }

    #[test]
    fn test_vendor_opcode_and_payload() {
        let command = MeshCommand::Vendor {
            opcode: VendorOpcode::new(0x15),
            company_id: CompanyID(0x05F1),
            payload: vec![0xDE, 0xAD],
            response: None,
        };
        assert_eq!(
            command.opcode(),
            Opcode::Vendor(VendorOpcode::new(0x15), CompanyID(0x05F1))
        );
        assert_eq!(command.parameters(None).unwrap(), vec![0xDE, 0xAD]);
        assert_eq!(command.response_opcode(), None);
    }

    #[test]
    fn test_unacknowledged_have_no_response() {
        assert_eq!(
            MeshCommand::GenericOnOffSetUnacknowledged {
                on_off: false,
                tid: TransactionID(0),
            }
            .response_opcode(),
            None
        );
        assert_eq!(
            MeshCommand::SceneStoreUnacknowledged {
                scene: SceneNumber::new(1),
            }
            .response_opcode(),
            None
        );
    }

    #[test]
    fn test_response_pairings() {
        assert_eq!(
            MeshCommand::GenericOnOffGet.response_opcode(),
            Some(MessageOpcode::GenericOnOffStatus.into())
        );
        assert_eq!(
            MeshCommand::SceneDelete {
                scene: SceneNumber::new(1)
            }
            .response_opcode(),
            Some(MessageOpcode::SceneRegisterStatus.into())
        );
        assert_eq!(
            MeshCommand::ConfigNodeReset.response_opcode(),
            Some(MessageOpcode::NodeResetStatus.into())
        );
        assert_eq!(
            MeshCommand::SetProxyFilterType {
                filter_type: FilterType::WhiteList
            }
            .response_opcode(),
            Some(ProxyOpcode::FilterStatus.into())
        );
    }

    #[test]
    fn test_unpack_on_off_status() {
        assert_eq!(
            MeshStatus::unpack(MessageOpcode::GenericOnOffStatus.into(), &[0x01]),
            Ok(MeshStatus::GenericOnOffStatus {
                present: true,
                target: None,
            })
        );
        assert_eq!(
            MeshStatus::unpack(MessageOpcode::GenericOnOffStatus.into(), &[0x00, 0x01, 0x2C]),
            Ok(MeshStatus::GenericOnOffStatus {
                present: false,
                target: Some((true, 0x2C)),
            })
        );
        assert_eq!(
            MeshStatus::unpack(MessageOpcode::GenericOnOffStatus.into(), &[0x01, 0x00]),
            Err(MessagePackError::BadLength)
        );
        assert_eq!(
            MeshStatus::unpack(MessageOpcode::GenericOnOffStatus.into(), &[0x02]),
            Err(MessagePackError::BadBytes)
        );
    }

    #[test]
    fn test_unpack_level_status() {
        assert_eq!(
            MeshStatus::unpack(MessageOpcode::GenericLevelStatus.into(), &[0x00, 0x80]),
            Ok(MeshStatus::GenericLevelStatus {
                present: i16::min_value(),
                target: None,
            })
        );
        assert_eq!(
            MeshStatus::unpack(
                MessageOpcode::GenericLevelStatus.into(),
                &[0xFF, 0x7F, 0x00, 0x00, 0x05]
            ),
            Ok(MeshStatus::GenericLevelStatus {
                present: i16::max_value(),
                target: Some((0, 5)),
            })
        );
    }

    #[test]
    fn test_unpack_scene_register_status() {
        assert_eq!(
            MeshStatus::unpack(
                MessageOpcode::SceneRegisterStatus.into(),
                &[0x00, 0x01, 0x00, 0x01, 0x00, 0x34, 0x12]
            ),
            Ok(MeshStatus::SceneRegisterStatus {
                status: SceneStatusCode::Success,
                current: Some(SceneNumber::new(1)),
                scenes: vec![SceneNumber::new(1), SceneNumber::new(0x1234)],
            })
        );
        assert_eq!(
            MeshStatus::unpack(MessageOpcode::SceneRegisterStatus.into(), &[0x00, 0x01]),
            Err(MessagePackError::BadLength)
        );
    }

    #[test]
    fn test_unpack_proxy_filter_status() {
        assert_eq!(
            MeshStatus::unpack(ProxyOpcode::FilterStatus.into(), &[0x00, 0x00, 0x05]),
            Ok(MeshStatus::ProxyFilterStatus {
                filter_type: FilterType::WhiteList,
                list_size: 5,
            })
        );
    }

    #[test]
    fn test_unpack_unrecognized() {
        let opcode = Opcode::SIG(SigOpcode::DoubleOctet(0x82FF));
        assert_eq!(
            MeshStatus::unpack(opcode, &[0x01, 0x02]),
            Ok(MeshStatus::Unrecognized {
                opcode,
                parameters: vec![0x01, 0x02],
            })
        );
    }
}
