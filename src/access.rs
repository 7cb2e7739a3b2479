//! Access Layer opcodes and PDUs. The most surface layer of the stack; sits
//! between typed messages and the transport below.
use crate::address::{Address, UnicastAddress};
use crate::bytes::ToFromBytesEndian;
use crate::crypto::{AID, AKF, SZMIC};
use crate::mesh::CompanyID;
use alloc::vec::Vec;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum SigOpcode {
    SingleOctet(u8),
    DoubleOctet(u16),
}
impl SigOpcode {
    #[must_use]
    pub fn byte_len(&self) -> usize {
        match self {
            SigOpcode::SingleOctet(_) => 1,
            SigOpcode::DoubleOctet(_) => 2,
        }
    }
}
impl From<SigOpcode> for Opcode {
    #[must_use]
    fn from(opcode: SigOpcode) -> Self {
        Opcode::SIG(opcode)
    }
}
const VENDOR_OPCODE_MAX: u8 = (1_u8 << 6) - 1;
/// 6 bit Vendor Opcode.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorOpcode(u8);
impl VendorOpcode {
    /// # Panics
    /// Panics if `opcode > VENDOR_OPCODE_MAX` (63).
    #[must_use]
    pub fn new(opcode: u8) -> Self {
        assert!(opcode <= VENDOR_OPCODE_MAX);
        VendorOpcode(opcode)
    }
    #[must_use]
    pub const fn new_masked(opcode: u8) -> Self {
        VendorOpcode(opcode & VENDOR_OPCODE_MAX)
    }
}
impl From<VendorOpcode> for u8 {
    #[must_use]
    fn from(opcode: VendorOpcode) -> Self {
        opcode.0
    }
}
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct OpcodeConversionError(pub ());
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum Opcode {
    SIG(SigOpcode),
    Vendor(VendorOpcode, CompanyID),
}
impl Opcode {
    #[must_use]
    pub fn company_id(&self) -> Option<CompanyID> {
        match self {
            Opcode::Vendor(_, cid) => Some(*cid),
            Opcode::SIG(_) => None,
        }
    }
    #[must_use]
    pub fn is_sig(&self) -> bool {
        self.company_id().is_none()
    }
    #[must_use]
    pub fn is_vendor(&self) -> bool {
        !self.is_sig()
    }
    #[must_use]
    pub fn byte_len(&self) -> usize {
        match self {
            Opcode::SIG(o) => o.byte_len(),
            Opcode::Vendor(_, _) => 3,
        }
    }
    #[must_use]
    pub const fn max_byte_len() -> usize {
        3
    }
    /// Unpacks an opcode off the front of `bytes`. `0x7F` is RFU and single
    /// octet opcodes with the high bit set don't exist, so both are errors.
    pub fn unpack_from(bytes: &[u8]) -> Result<Self, OpcodeConversionError> {
        if bytes.is_empty() {
            Err(OpcodeConversionError(()))
        } else if bytes[0] == 0x7F {
            // RFU
            Err(OpcodeConversionError(()))
        } else if bytes[0] & 0x80 == 0 {
            Ok(Opcode::SIG(SigOpcode::SingleOctet(bytes[0])))
        } else if bytes[0] & 0xC0 == 0xC0 {
            if bytes.len() < 3 {
                return Err(OpcodeConversionError(()));
            }
            let vendor_opcode = VendorOpcode::new_masked(bytes[0]);
            let company_id = CompanyID(u16::from_le_bytes([bytes[1], bytes[2]]));
            Ok(Opcode::Vendor(vendor_opcode, company_id))
        } else {
            if bytes.len() < 2 {
                return Err(OpcodeConversionError(()));
            }
            Ok(Opcode::SIG(SigOpcode::DoubleOctet(u16::from_be_bytes([
                bytes[0], bytes[1],
            ]))))
        }
    }
    /// Packs the opcode into the front of `buffer`.
    pub fn pack_into(&self, buffer: &mut [u8]) -> Result<(), OpcodeConversionError> {
        match *self {
            Opcode::SIG(s) => match s {
                SigOpcode::SingleOctet(s) => {
                    if buffer.is_empty() {
                        return Err(OpcodeConversionError(()));
                    }
                    if s & 0x80 == 0 && s != 0x7F {
                        buffer[0] = s;
                        Ok(())
                    } else {
                        Err(OpcodeConversionError(()))
                    }
                }
                SigOpcode::DoubleOctet(d) => {
                    if buffer.len() < 2 {
                        return Err(OpcodeConversionError(()));
                    }
                    if d & 0xC000 == 0x8000 {
                        buffer[..2].copy_from_slice(&d.to_be_bytes()[..]);
                        Ok(())
                    } else {
                        Err(OpcodeConversionError(()))
                    }
                }
            },
            Opcode::Vendor(opcode, company_id) => {
                if buffer.len() < 3 {
                    return Err(OpcodeConversionError(()));
                }
                buffer[0] = opcode.0 | 0xC0;
                buffer[1..3].copy_from_slice(&company_id.to_bytes_le()[..]);
                Ok(())
            }
        }
    }
}

/// Security parameters stamped onto an access PDU at encode time. Immutable
/// once computed; the AID only exists when the app key flag is set.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct SecurityDescriptor {
    pub akf: AKF,
    pub aid: Option<AID>,
    pub szmic: SZMIC,
}
impl SecurityDescriptor {
    #[must_use]
    pub const fn with_app_key(aid: AID, szmic: SZMIC) -> Self {
        Self {
            akf: AKF(true),
            aid: Some(aid),
            szmic,
        }
    }
    #[must_use]
    pub const fn with_device_key(szmic: SZMIC) -> Self {
        Self {
            akf: AKF(false),
            aid: None,
            szmic,
        }
    }
}

/// Fully encoded access message ready for the transport.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct AccessPdu {
    pub opcode: Opcode,
    pub parameters: Vec<u8>,
    pub security: SecurityDescriptor,
    pub src: UnicastAddress,
    pub dst: Address,
}
impl AccessPdu {
    /// Total on-the-wire length (opcode + parameters).
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.opcode.byte_len() + self.parameters.len()
    }
    /// Packs opcode then parameters into one payload buffer.
    pub fn payload(&self) -> Result<Vec<u8>, OpcodeConversionError> {
        let mut out = alloc::vec![0_u8; self.byte_len()];
        self.opcode.pack_into(&mut out)?;
        out[self.opcode.byte_len()..].copy_from_slice(&self.parameters);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_lens() {
        assert_eq!(Opcode::SIG(SigOpcode::SingleOctet(0x04)).byte_len(), 1);
        assert_eq!(Opcode::SIG(SigOpcode::DoubleOctet(0x8201)).byte_len(), 2);
        assert_eq!(
            Opcode::Vendor(VendorOpcode::new(0x15), CompanyID(0x05F1)).byte_len(),
            3
        );
    }

    #[test]
    fn test_opcode_pack() {
        let mut buf = [0_u8; 3];
        Opcode::SIG(SigOpcode::SingleOctet(0x04))
            .pack_into(&mut buf[..1])
            .unwrap();
        assert_eq!(buf[0], 0x04);
        Opcode::SIG(SigOpcode::DoubleOctet(0x8201))
            .pack_into(&mut buf[..2])
            .unwrap();
        assert_eq!(&buf[..2], &[0x82, 0x01]);
        Opcode::Vendor(VendorOpcode::new(0x15), CompanyID(0x05F1))
            .pack_into(&mut buf)
            .unwrap();
        assert_eq!(&buf, &[0xD5, 0xF1, 0x05]);
    }

    #[test]
    fn test_opcode_unpack() {
        assert_eq!(
            Opcode::unpack_from(&[0x04]),
            Ok(Opcode::SIG(SigOpcode::SingleOctet(0x04)))
        );
        assert_eq!(
            Opcode::unpack_from(&[0x82, 0x01]),
            Ok(Opcode::SIG(SigOpcode::DoubleOctet(0x8201)))
        );
        assert_eq!(
            Opcode::unpack_from(&[0xD5, 0xF1, 0x05]),
            Ok(Opcode::Vendor(VendorOpcode::new(0x15), CompanyID(0x05F1)))
        );
    }

    #[test]
    fn test_opcode_rfu_rejected() {
        assert!(Opcode::unpack_from(&[0x7F]).is_err());
        let mut buf = [0_u8; 1];
        assert!(Opcode::SIG(SigOpcode::SingleOctet(0x7F))
            .pack_into(&mut buf)
            .is_err());
        assert!(Opcode::SIG(SigOpcode::SingleOctet(0x80))
            .pack_into(&mut buf)
            .is_err());
    }

    #[test]
    fn test_opcode_truncated() {
        assert!(Opcode::unpack_from(&[]).is_err());
        assert!(Opcode::unpack_from(&[0x82]).is_err());
        assert!(Opcode::unpack_from(&[0xD5, 0xF1]).is_err());
    }

    #[test]
    fn test_double_octet_range_checked() {
        let mut buf = [0_u8; 2];
        assert!(Opcode::SIG(SigOpcode::DoubleOctet(0x0201))
            .pack_into(&mut buf)
            .is_err());
        assert!(Opcode::SIG(SigOpcode::DoubleOctet(0xC201))
            .pack_into(&mut buf)
            .is_err());
    }
}
