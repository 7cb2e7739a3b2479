//! Crypto primitives the access layer needs: AES-CMAC and the `s1`/`k4`
//! derivation functions. `k4` turns a 128-bit application key into the 6-bit
//! AID carried on the wire so a receiver can pick the right key without key
//! material leaking. Payload encryption (CCM) belongs to the network layer
//! and lives outside this crate.
use core::convert::TryFrom;
use core::fmt::{Display, Error, Formatter};

/// Helper function to convert a 16 byte (32 character) hex string to a 16 byte array.
/// Returns `None` if `hex.len() != 32` or if `hex` contains non-hex characters.
pub fn hex_16_to_array(hex: &str) -> Option<[u8; 16]> {
    if hex.len() != 32 {
        None
    } else {
        let mut out = [0_u8; 16];
        for (pos, c) in hex.chars().enumerate() {
            let value = u8::try_from(c.to_digit(16)?).ok()?;
            let byte_pos = pos / 2;
            if pos % 2 == 1 {
                out[byte_pos] |= value;
            } else {
                out[byte_pos] |= value << 4;
            }
        }
        Some(out)
    }
}

pub mod aes;
mod aes_cmac;
pub mod k_funcs;
pub mod key;
pub mod materials;

pub use k_funcs::{k4, s1};

/// 6 bit Application Key ID. Derived from an `AppKey` via `k4`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialOrd, PartialEq, Ord)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct AID(pub(crate) u8);
const AID_MAX: u8 = (1 << 6) - 1;

impl AID {
    /// Creates a new 6 bit `AID`.
    /// # Panics
    /// Panics if `aid > AID_MAX` (63).
    #[must_use]
    pub fn new(aid: u8) -> AID {
        assert!(aid <= AID_MAX, "aid {} is bigger than max {}", aid, AID_MAX);
        AID(aid)
    }
    /// Creates an AID by masking `aid` to just the 6 lower bits.
    #[must_use]
    pub const fn new_masked(aid: u8) -> AID {
        AID(aid & AID_MAX)
    }
}
impl From<AID> for u8 {
    #[must_use]
    fn from(a: AID) -> Self {
        a.0
    }
}
impl Display for AID {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "AID({})", self.0)
    }
}

/// Application Key Flag. Selects device key (false) vs application key (true)
/// security for an access message.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialOrd, PartialEq, Ord)]
pub struct AKF(pub bool);
impl From<bool> for AKF {
    #[must_use]
    fn from(b: bool) -> Self {
        AKF(b)
    }
}
impl From<AKF> for bool {
    #[must_use]
    fn from(a: AKF) -> Self {
        a.0
    }
}

/// Message-integrity-check size selector. `false` selects the 32-bit MIC,
/// `true` the 64-bit MIC. The MIC itself is computed by the network layer;
/// the codec only records the choice.
#[derive(Copy, Clone, Hash, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct SZMIC(pub bool);
impl SZMIC {
    #[must_use]
    pub const fn small() -> SZMIC {
        SZMIC(false)
    }
    #[must_use]
    pub const fn big() -> SZMIC {
        SZMIC(true)
    }
    #[must_use]
    pub const fn is_big(self) -> bool {
        self.0
    }
}
impl From<bool> for SZMIC {
    #[must_use]
    fn from(b: bool) -> Self {
        SZMIC(b)
    }
}
impl From<SZMIC> for bool {
    #[must_use]
    fn from(s: SZMIC) -> Self {
        s.0
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TryFromBlockError(());

const SALT_LEN: usize = 16;
#[derive(Clone, Copy, Debug, Hash, Eq, PartialOrd, PartialEq, Ord)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    #[must_use]
    pub const fn new(salt: [u8; SALT_LEN]) -> Salt {
        Salt(salt)
    }
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Salt> {
        Some(Salt::new(hex_16_to_array(hex)?))
    }
    #[must_use]
    pub fn as_key(&self) -> key::Key {
        key::Key::new(self.0)
    }
}

impl TryFrom<&[u8]> for Salt {
    type Error = TryFromBlockError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != SALT_LEN {
            Err(TryFromBlockError(()))
        } else {
            let mut buf = Salt([0_u8; SALT_LEN]);
            buf.0.copy_from_slice(value);
            Ok(buf)
        }
    }
}
impl AsRef<[u8]> for Salt {
    #[must_use]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// 12-bit global Application Key Index referencing a key owned by the key
/// store collaborator.
#[derive(Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct AppKeyIndex(u16);
const APP_KEY_INDEX_MAX: u16 = (1 << 12) - 1;
impl AppKeyIndex {
    /// # Panics
    /// Panics if `index` doesn't fit in 12 bits.
    #[must_use]
    pub fn new(index: u16) -> AppKeyIndex {
        assert!(
            index <= APP_KEY_INDEX_MAX,
            "app key index {} is bigger than max {}",
            index,
            APP_KEY_INDEX_MAX
        );
        AppKeyIndex(index)
    }
    #[must_use]
    pub const fn new_masked(index: u16) -> AppKeyIndex {
        AppKeyIndex(index & APP_KEY_INDEX_MAX)
    }
}
impl From<AppKeyIndex> for u16 {
    #[must_use]
    fn from(index: AppKeyIndex) -> Self {
        index.0
    }
}
