//! Explicit-endian byte conversions. Every multi-byte wire field in this crate
//! goes through [`ToFromBytesEndian`] so the byte order is visible at the call
//! site; the access layer and the proxy configuration sub-protocol disagree on
//! endianness for otherwise-similar fields.
use core::convert::TryInto;

pub trait ToFromBytesEndian: Sized {
    type AsBytesType: AsRef<[u8]>;

    #[must_use]
    fn byte_size() -> usize {
        core::mem::size_of::<Self::AsBytesType>()
    }

    #[must_use]
    fn to_bytes_le(&self) -> Self::AsBytesType;

    #[must_use]
    fn to_bytes_be(&self) -> Self::AsBytesType;

    #[must_use]
    fn from_bytes_le(bytes: &[u8]) -> Option<Self>;

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self>;
}

/// Implement `ToFromBytesEndian` for primitive integer types.
macro_rules! implement_to_from_bytes {
    ( $( $t:ty ), *) => {
        $(
            impl ToFromBytesEndian for $t {
                type AsBytesType = [u8; core::mem::size_of::<Self>()];

                #[must_use]
                fn byte_size() -> usize {
                    core::mem::size_of::<Self>()
                }

                #[must_use]
                fn to_bytes_le(&self) -> Self::AsBytesType {
                    self.to_le_bytes()
                }

                #[must_use]
                fn to_bytes_be(&self) -> Self::AsBytesType {
                    self.to_be_bytes()
                }

                #[must_use]
                fn from_bytes_le(bytes: &[u8]) -> Option<Self> {
                    Some(Self::from_le_bytes(bytes.try_into().ok()?))
                }

                #[must_use]
                fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
                    Some(Self::from_be_bytes(bytes.try_into().ok()?))
                }
            }
        )*
    }
}
implement_to_from_bytes!(u8, i8, u16, i16, u32, i32, u64, i64);

impl ToFromBytesEndian for bool {
    type AsBytesType = [u8; 1];

    #[must_use]
    fn to_bytes_le(&self) -> Self::AsBytesType {
        [u8::from(*self)]
    }

    #[must_use]
    fn to_bytes_be(&self) -> Self::AsBytesType {
        [u8::from(*self)]
    }

    #[must_use]
    fn from_bytes_le(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0] => Some(false),
            [1] => Some(true),
            _ => None,
        }
    }

    #[must_use]
    fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes_le(bytes)
    }
}
