//! GATT proxy configuration sub-protocol. Single octet control opcodes,
//! separate from the SIG model opcode space.
//!
//! The wire byte orders here are deliberately inconsistent: filter addresses
//! are written low byte first when adding but high byte first when removing,
//! and the address list size in a filter status is big-endian. Existing proxy
//! nodes depend on this exact layout, so it is preserved bit-for-bit.
use crate::access::{Opcode, OpcodeConversionError, SigOpcode};
use crate::address::{Address, ADDRESS_LEN};
use crate::bytes::ToFromBytesEndian;
use crate::messages::MessagePackError;
use alloc::vec::Vec;
use core::convert::{TryFrom, TryInto};
use core::num::NonZeroUsize;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ProxyOpcode {
    SetFilterType = 0x00,
    AddAddresses = 0x01,
    RemoveAddresses = 0x02,
    FilterStatus = 0x03,
}
impl From<ProxyOpcode> for Opcode {
    #[must_use]
    fn from(opcode: ProxyOpcode) -> Self {
        Opcode::SIG(SigOpcode::SingleOctet(opcode as u8))
    }
}
impl TryFrom<Opcode> for ProxyOpcode {
    type Error = OpcodeConversionError;

    fn try_from(opcode: Opcode) -> Result<Self, Self::Error> {
        match opcode {
            Opcode::SIG(SigOpcode::SingleOctet(0x00)) => Ok(ProxyOpcode::SetFilterType),
            Opcode::SIG(SigOpcode::SingleOctet(0x01)) => Ok(ProxyOpcode::AddAddresses),
            Opcode::SIG(SigOpcode::SingleOctet(0x02)) => Ok(ProxyOpcode::RemoveAddresses),
            Opcode::SIG(SigOpcode::SingleOctet(0x03)) => Ok(ProxyOpcode::FilterStatus),
            _ => Err(OpcodeConversionError(())),
        }
    }
}

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FilterType {
    WhiteList = 0x00,
    BlackList = 0x01,
}
impl From<FilterType> for u8 {
    #[must_use]
    fn from(filter_type: FilterType) -> Self {
        filter_type as u8
    }
}
impl TryFrom<u8> for FilterType {
    type Error = MessagePackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(FilterType::WhiteList),
            0x01 => Ok(FilterType::BlackList),
            _ => Err(MessagePackError::BadBytes),
        }
    }
}

/// Caller-side filter list errors. Surfaced before anything touches the wire.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub enum ProxyFilterError {
    EmptyAddressList,
    /// The list exceeds the configured transport bound.
    TooManyAddresses,
}

fn check_list(
    addresses: &[Address],
    max_addresses: Option<NonZeroUsize>,
) -> Result<(), ProxyFilterError> {
    if addresses.is_empty() {
        return Err(ProxyFilterError::EmptyAddressList);
    }
    if let Some(max) = max_addresses {
        if addresses.len() > max.get() {
            return Err(ProxyFilterError::TooManyAddresses);
        }
    }
    Ok(())
}

#[must_use]
pub fn set_filter_type_parameters(filter_type: FilterType) -> [u8; 1] {
    [filter_type.into()]
}
/// Addresses go out low byte first when adding to the filter.
pub fn add_addresses_parameters(
    addresses: &[Address],
    max_addresses: Option<NonZeroUsize>,
) -> Result<Vec<u8>, ProxyFilterError> {
    check_list(addresses, max_addresses)?;
    let mut out = Vec::with_capacity(addresses.len() * ADDRESS_LEN);
    for address in addresses {
        out.extend_from_slice(&address.to_bytes_le());
    }
    Ok(out)
}
/// Addresses go out high byte first when removing, the opposite of adding.
pub fn remove_addresses_parameters(
    addresses: &[Address],
    max_addresses: Option<NonZeroUsize>,
) -> Result<Vec<u8>, ProxyFilterError> {
    check_list(addresses, max_addresses)?;
    let mut out = Vec::with_capacity(addresses.len() * ADDRESS_LEN);
    for address in addresses {
        out.extend_from_slice(&address.to_bytes_be());
    }
    Ok(out)
}

/// Filter status reported by the proxy node. List size is big-endian on the
/// wire, unlike every other 16-bit field at this layer.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct FilterStatus {
    pub filter_type: FilterType,
    pub list_size: u16,
}
impl FilterStatus {
    pub const BYTE_LEN: usize = 3;
    pub fn unpack_from(buffer: &[u8]) -> Result<Self, MessagePackError> {
        if buffer.len() != Self::BYTE_LEN {
            return Err(MessagePackError::BadLength);
        }
        Ok(FilterStatus {
            filter_type: buffer[0].try_into()?,
            list_size: u16::from_be_bytes([buffer[1], buffer[2]]),
        })
    }
    pub fn pack_into(&self, buffer: &mut [u8]) -> Result<(), MessagePackError> {
        if buffer.len() < Self::BYTE_LEN {
            return Err(MessagePackError::SmallBuffer);
        }
        buffer[0] = self.filter_type.into();
        buffer[1..3].copy_from_slice(&self.list_size.to_be_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_add_swapped_remove_natural() {
        let addresses = vec![Address::from(0xAABB_u16)];
        assert_eq!(
            add_addresses_parameters(&addresses, None).unwrap(),
            vec![0xBB, 0xAA]
        );
        assert_eq!(
            remove_addresses_parameters(&addresses, None).unwrap(),
            vec![0xAA, 0xBB]
        );
    }

    #[test]
    fn test_list_bounds() {
        assert_eq!(
            add_addresses_parameters(&[], None),
            Err(ProxyFilterError::EmptyAddressList)
        );
        let addresses = vec![Address::from(0xC000_u16); 3];
        let max = NonZeroUsize::new(2);
        assert_eq!(
            add_addresses_parameters(&addresses, max),
            Err(ProxyFilterError::TooManyAddresses)
        );
        assert_eq!(
            remove_addresses_parameters(&addresses, max),
            Err(ProxyFilterError::TooManyAddresses)
        );
        assert!(add_addresses_parameters(&addresses[..2], max).is_ok());
    }

    #[test]
    fn test_filter_status_size_big_endian() {
        let status = FilterStatus::unpack_from(&[0x00, 0x00, 0x05]).unwrap();
        assert_eq!(status.filter_type, FilterType::WhiteList);
        assert_eq!(status.list_size, 5);
        let status = FilterStatus::unpack_from(&[0x01, 0x01, 0x00]).unwrap();
        assert_eq!(status.filter_type, FilterType::BlackList);
        assert_eq!(status.list_size, 256);
        assert!(FilterStatus::unpack_from(&[0x00, 0x05]).is_err());
        assert!(FilterStatus::unpack_from(&[0x02, 0x00, 0x05]).is_err());
    }

    #[test]
    fn test_set_filter_type() {
        assert_eq!(set_filter_type_parameters(FilterType::WhiteList), [0x00]);
        assert_eq!(set_filter_type_parameters(FilterType::BlackList), [0x01]);
    }

    #[test]
    fn test_proxy_opcodes() {
        for &opcode in &[
            ProxyOpcode::SetFilterType,
            ProxyOpcode::AddAddresses,
            ProxyOpcode::RemoveAddresses,
            ProxyOpcode::FilterStatus,
        ] {
            assert_eq!(ProxyOpcode::try_from(Opcode::from(opcode)), Ok(opcode));
        }
        assert!(ProxyOpcode::try_from(Opcode::SIG(SigOpcode::SingleOctet(0x04))).is_err());
    }
}
