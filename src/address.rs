//! Bluetooth Mesh Addresses.
//! All addresses are 16-bit. Virtual addresses are 128-bit UUIDs off the wire
//! but only the 14-bit hash of the UUID travels with a message, so only the
//! hash is modeled here.
//!
//! | Bits (16)             | Type          |
//! | --------------------- | ------------- |
//! | 0b0000 0000 0000 0000 | Unassigned    |
//! | 0b0xxx xxxx xxxx xxxx | Unicast       |
//! | 0b10xx xxxx xxxx xxxx | Virtual       |
//! | 0b11xx xxxx xxxx xxxx | Group         |
//!
//! Endian depends on sub-protocol!!
//! Little: Access/Foundation
//! Big (or swapped, see `proxy`): Proxy configuration
use crate::bytes::ToFromBytesEndian;
use core::convert::{TryFrom, TryInto};

pub const ADDRESS_LEN: usize = 2;

const UNICAST_BIT: u16 = 0x8000;
const UNICAST_MASK: u16 = !UNICAST_BIT;

const GROUP_BIT: u16 = 0xC000;
const GROUP_MASK: u16 = !GROUP_BIT;

const VIRTUAL_BIT: u16 = 0x8000;

/// Element Unicast Address. Each Element has one Unicast assigned to it.
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct UnicastAddress(u16);
impl UnicastAddress {
    /// Creates a new `UnicastAddress`.
    /// # Panics
    /// Panics if the `u16` is not a valid `UnicastAddress`. (`u16==0 || u16&UNICAST_BIT!=0`)
    #[must_use]
    pub fn new(v: u16) -> UnicastAddress {
        assert!(
            (v & UNICAST_BIT) == 0 && v != 0,
            "non unicast address '{}'",
            v
        );
        UnicastAddress(v)
    }
    /// Creates a Unicast address by masking any u16 into it.
    /// # Panics
    /// Panics if the `u16` masked equals `0`.
    #[must_use]
    pub fn from_mask_u16(v: u16) -> UnicastAddress {
        assert_ne!(v & UNICAST_MASK, 0, "unassigned unicast address");
        UnicastAddress(v & UNICAST_MASK)
    }
}

/// Group Address. Some Group Addresses are reserved.
///
/// | Values        | Group Name    |
/// | ------------- | ------------- |
/// | 0xFF00-0xFFFB | RFU           |
/// | 0xFFFC        | All Proxies   |
/// | 0xFFFD        | All Friends   |
/// | 0xFFFE        | All Relays    |
/// | 0xFFFF        | All Nodes     |
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct GroupAddress(u16);
impl GroupAddress {
    /// # Panics
    /// Panics if `group_address` isn't a valid group address.
    #[must_use]
    pub fn new(group_address: u16) -> Self {
        match Self::try_from(group_address) {
            Ok(g) => g,
            Err(_) => panic!("invalid group address given"),
        }
    }
    /// Group address corresponding to all proxy nodes.
    pub const fn all_proxies() -> GroupAddress {
        GroupAddress(0xFFFC)
    }
    /// Group address corresponding to all friend nodes.
    pub const fn all_friends() -> GroupAddress {
        GroupAddress(0xFFFD)
    }
    /// Group address corresponding to all relay nodes.
    pub const fn all_relays() -> GroupAddress {
        GroupAddress(0xFFFE)
    }
    /// Group address corresponding to all nodes.
    pub const fn all_nodes() -> GroupAddress {
        GroupAddress(0xFFFF)
    }
}

const VIRTUAL_ADDRESS_HASH_MAX: u16 = (1_u16 << 14) - 1;
/// 14-bit hash of a virtual address's 128-bit label UUID, `0b10` prefix on
/// the wire. The full UUID never reaches the access layer.
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct VirtualAddressHash(u16);
impl VirtualAddressHash {
    /// # Panics
    /// Panics if `address` doesn't carry the `0b10` virtual prefix.
    #[must_use]
    pub fn new(address: u16) -> VirtualAddressHash {
        assert_eq!(
            address & GROUP_BIT,
            VIRTUAL_BIT,
            "non virtual hash address '{}'",
            address
        );
        VirtualAddressHash(address)
    }
    /// Creates a 14-bit `VirtualAddressHash` by masking a u16 into it.
    #[must_use]
    pub const fn new_masked(address: u16) -> VirtualAddressHash {
        VirtualAddressHash((address & VIRTUAL_ADDRESS_HASH_MAX) | VIRTUAL_BIT)
    }
    #[must_use]
    pub const fn just_hash(self) -> u16 {
        self.0 & VIRTUAL_ADDRESS_HASH_MAX
    }
}

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct AddressError(());

impl TryFrom<u16> for UnicastAddress {
    type Error = AddressError;

    fn try_from(v: u16) -> Result<UnicastAddress, Self::Error> {
        if v == 0 {
            Err(AddressError(()))
        } else if v & UNICAST_BIT == 0 {
            Ok(UnicastAddress(v))
        } else {
            Err(AddressError(()))
        }
    }
}

impl TryFrom<u16> for GroupAddress {
    type Error = AddressError;

    fn try_from(v: u16) -> Result<GroupAddress, Self::Error> {
        if v & GROUP_BIT == GROUP_BIT {
            Ok(GroupAddress(v))
        } else {
            Err(AddressError(()))
        }
    }
}

impl TryFrom<u16> for VirtualAddressHash {
    type Error = AddressError;
    fn try_from(v: u16) -> Result<VirtualAddressHash, Self::Error> {
        if v & GROUP_BIT == VIRTUAL_BIT {
            Ok(VirtualAddressHash(v))
        } else {
            Err(AddressError(()))
        }
    }
}

impl From<UnicastAddress> for u16 {
    #[must_use]
    fn from(v: UnicastAddress) -> Self {
        v.0
    }
}
impl From<GroupAddress> for u16 {
    #[must_use]
    fn from(v: GroupAddress) -> Self {
        v.0
    }
}
impl From<VirtualAddressHash> for u16 {
    #[must_use]
    fn from(v: VirtualAddressHash) -> Self {
        v.0
    }
}

#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Address {
    Unassigned,
    Unicast(UnicastAddress),
    Group(GroupAddress),
    VirtualHash(VirtualAddressHash),
}

impl Address {
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        match self {
            Address::Unassigned => false,
            _ => true,
        }
    }
    #[must_use]
    pub fn is_unicast(&self) -> bool {
        match self {
            Address::Unicast(_) => true,
            _ => false,
        }
    }
    #[must_use]
    pub fn is_group(&self) -> bool {
        match self {
            Address::Group(_) => true,
            _ => false,
        }
    }
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        match self {
            Address::VirtualHash(_) => true,
            _ => false,
        }
    }
    #[must_use]
    pub fn unicast(&self) -> Option<UnicastAddress> {
        match self {
            Address::Unicast(u) => Some(*u),
            _ => None,
        }
    }
    #[must_use]
    pub fn group(&self) -> Option<GroupAddress> {
        match self {
            Address::Group(g) => Some(*g),
            _ => None,
        }
    }
    #[must_use]
    pub fn value(&self) -> u16 {
        self.into()
    }
}

impl Default for Address {
    #[must_use]
    fn default() -> Self {
        Address::Unassigned
    }
}

impl From<u16> for Address {
    #[must_use]
    fn from(v: u16) -> Address {
        if v == 0 {
            Address::Unassigned
        } else if v & UNICAST_BIT == 0 {
            Address::Unicast(UnicastAddress(v))
        } else if v & GROUP_BIT == GROUP_BIT {
            Address::Group(GroupAddress(v))
        } else {
            Address::VirtualHash(VirtualAddressHash(v))
        }
    }
}
impl From<UnicastAddress> for Address {
    #[must_use]
    fn from(v: UnicastAddress) -> Self {
        Address::Unicast(v)
    }
}
impl From<GroupAddress> for Address {
    #[must_use]
    fn from(v: GroupAddress) -> Self {
        Address::Group(v)
    }
}
impl From<VirtualAddressHash> for Address {
    #[must_use]
    fn from(v: VirtualAddressHash) -> Self {
        Address::VirtualHash(v)
    }
}

impl From<&Address> for u16 {
    #[must_use]
    fn from(v: &Address) -> Self {
        match v {
            Address::Unassigned => 0,
            Address::Unicast(u) => u.0,
            Address::Group(g) => g.0,
            Address::VirtualHash(vh) => vh.0,
        }
    }
}

impl TryFrom<&Address> for UnicastAddress {
    type Error = AddressError;

    fn try_from(value: &Address) -> Result<Self, Self::Error> {
        match value {
            Address::Unicast(u) => Ok(*u),
            _ => Err(AddressError(())),
        }
    }
}
impl TryFrom<&Address> for GroupAddress {
    type Error = AddressError;

    fn try_from(value: &Address) -> Result<Self, Self::Error> {
        match value {
            Address::Group(g) => Ok(*g),
            _ => Err(AddressError(())),
        }
    }
}
impl TryFrom<&Address> for VirtualAddressHash {
    type Error = AddressError;

    fn try_from(value: &Address) -> Result<Self, Self::Error> {
        match value {
            Address::VirtualHash(h) => Ok(*h),
            _ => Err(AddressError(())),
        }
    }
}

impl ToFromBytesEndian for Address {
    type AsBytesType = [u8; 2];

    #[must_use]
    fn to_bytes_le(&self) -> Self::AsBytesType {
        u16::from(self).to_bytes_le()
    }

    #[must_use]
    fn to_bytes_be(&self) -> Self::AsBytesType {
        u16::from(self).to_bytes_be()
    }

    #[must_use]
    fn from_bytes_le(bytes: &[u8]) -> Option<Self> {
        Some(u16::from_bytes_le(bytes)?.into())
    }

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        Some(u16::from_bytes_be(bytes)?.into())
    }
}

impl ToFromBytesEndian for UnicastAddress {
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
        u16::from_bytes_le(bytes)?.try_into().ok()
    }

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        u16::from_bytes_be(bytes)?.try_into().ok()
    }
}

impl ToFromBytesEndian for GroupAddress {
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
        u16::from_bytes_le(bytes)?.try_into().ok()
    }

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        u16::from_bytes_be(bytes)?.try_into().ok()
    }
}
