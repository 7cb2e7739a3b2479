//! Crypto keys used for Mesh access security. Opaque 16-byte secret material;
//! length is checked at construction so a bad key is a constructor error, not
//! something discovered at encode time.
use crate::crypto::{hex_16_to_array, AID, AKF};
use crate::random;
use core::convert::{TryFrom, TryInto};
use core::fmt::{Error, Formatter, LowerHex, UpperHex};
use core::str::FromStr;

pub const KEY_LEN: usize = 16;

/// 128-bit AES Key.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialOrd, PartialEq, Ord)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct Key([u8; KEY_LEN]);
pub const ZERO_KEY: Key = Key([0_u8; KEY_LEN]);

impl Key {
    #[must_use]
    pub const fn new(key_bytes: [u8; KEY_LEN]) -> Key {
        Key(key_bytes)
    }
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Key> {
        Some(Key::new(hex_16_to_array(hex)?))
    }
    #[must_use]
    pub fn random_secure() -> Key {
        Key::new(random::rand_16_bytes())
    }
    #[must_use]
    pub fn as_salt(&self) -> super::Salt {
        super::Salt::new(self.0)
    }
}
impl TryFrom<&[u8]> for Key {
    type Error = core::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Key::new(value.try_into()?))
    }
}

impl AsRef<[u8]> for Key {
    #[must_use]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl UpperHex for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for &b in &self.0 {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}
impl LowerHex for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for &b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct KeyError(());
impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::from_hex(s).ok_or(KeyError(()))
    }
}

/// Application Key. Secures application messages (AKF == 1); the 6-bit AID
/// derived from it travels on the wire.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialOrd, PartialEq, Ord)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct AppKey(Key);

impl AppKey {
    #[must_use]
    pub const fn new_bytes(key_bytes: [u8; KEY_LEN]) -> Self {
        Self::new(Key(key_bytes))
    }
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self(key)
    }
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        Some(Self::new_bytes(hex_16_to_array(hex)?))
    }
    #[must_use]
    pub fn random_secure() -> Self {
        Self(Key::random_secure())
    }
    /// Derives the `AID` from `self` by using `crypto::k4`.
    #[must_use]
    pub fn aid(&self) -> AID {
        super::k4(self)
    }
    #[must_use]
    pub const fn key(&self) -> Key {
        self.0
    }
    #[must_use]
    pub const fn akf() -> AKF {
        AKF(true)
    }
}

impl TryFrom<&[u8]> for AppKey {
    type Error = core::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(AppKey::new(value.try_into()?))
    }
}
impl From<Key> for AppKey {
    #[must_use]
    fn from(k: Key) -> Self {
        Self(k)
    }
}
impl AsRef<Key> for AppKey {
    #[must_use]
    fn as_ref(&self) -> &Key {
        &self.0
    }
}

/// Device Key. Secures node configuration messages (AKF == 0); never carries
/// an AID on the wire.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialOrd, PartialEq, Ord)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct DevKey(Key);

impl DevKey {
    #[must_use]
    pub const fn new_bytes(key_bytes: [u8; KEY_LEN]) -> Self {
        Self::new(Key(key_bytes))
    }
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self(key)
    }
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        Some(Self::new_bytes(hex_16_to_array(hex)?))
    }
    #[must_use]
    pub fn random_secure() -> Self {
        Self(Key::random_secure())
    }
    #[must_use]
    pub const fn key(&self) -> Key {
        self.0
    }
    #[must_use]
    pub const fn akf() -> AKF {
        AKF(false)
    }
}
impl TryFrom<&[u8]> for DevKey {
    type Error = core::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(DevKey::new(value.try_into()?))
    }
}
impl From<Key> for DevKey {
    #[must_use]
    fn from(k: Key) -> Self {
        Self(k)
    }
}
impl AsRef<Key> for DevKey {
    #[must_use]
    fn as_ref(&self) -> &Key {
        &self.0
    }
}

impl From<AppKey> for Key {
    #[must_use]
    fn from(k: AppKey) -> Self {
        k.key()
    }
}
impl From<DevKey> for Key {
    #[must_use]
    fn from(k: DevKey) -> Self {
        k.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_len_checked() {
        assert!(Key::try_from(&[0_u8; 16][..]).is_ok());
        assert!(Key::try_from(&[0_u8; 15][..]).is_err());
        assert!(Key::try_from(&[0_u8; 17][..]).is_err());
        assert!(AppKey::try_from(&[0_u8; 5][..]).is_err());
    }

    #[test]
    fn test_key_hex() {
        let key = Key::from_hex("3216d1509884b533248541792b877f98").unwrap();
        assert_eq!(key.as_ref()[0], 0x32);
        assert_eq!(key.as_ref()[15], 0x98);
        assert!(Key::from_hex("3216").is_none());
        assert_eq!(Key::from_str("bad hex").ok(), None);
    }
}
