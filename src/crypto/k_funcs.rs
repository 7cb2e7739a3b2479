use crate::crypto::aes::AESCipher;
use crate::crypto::key::{AppKey, ZERO_KEY};
use crate::crypto::{Salt, AID};

/// k4 function from Mesh Core v1.0. Derives the 6-bit `AID` advertised on the
/// wire from a 128-bit application key.
#[must_use]
pub fn k4(key: &AppKey) -> AID {
    let salt = s1("smk4");
    let t = AESCipher::from(salt).cmac(key.key().as_ref());
    AID(AESCipher::from(t).cmac(b"id6\x01").as_ref()[15] & 0x3F)
}
#[must_use]
pub fn s1(m: impl AsRef<[u8]>) -> Salt {
    s1_bytes(m.as_ref())
}
#[must_use]
pub fn s1_bytes(m: &[u8]) -> Salt {
    AESCipher::new(ZERO_KEY).cmac(m).as_salt()
}
