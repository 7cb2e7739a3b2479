//! Thin wrapper around a 3rd party AES crypto lib (`aes` in this case) so the
//! rest of the crate has no hard dependence on it. Bluetooth Mesh uses 128-bit
//! exclusively as its key bit size. Only CMAC is needed at the access layer;
//! CCM payload encryption is the network layer's job.
use crate::crypto::aes_cmac::Cmac;
use crate::crypto::key::Key;
use crate::crypto::Salt;
use aes::cipher::{generic_array::GenericArray, NewBlockCipher};
use aes::Aes128;
use core::convert::TryInto;

pub struct AESCipher(Aes128);
impl AESCipher {
    #[must_use]
    pub fn new(key: Key) -> AESCipher {
        AESCipher(Aes128::new(GenericArray::from_slice(key.as_ref())))
    }
    #[must_use]
    fn cipher(&self) -> &Aes128 {
        &self.0
    }
    #[must_use]
    fn cmac_cipher(&self) -> Cmac<Aes128> {
        Cmac::from_cipher(self.cipher().clone())
    }
    #[must_use]
    pub fn cmac(&self, m: &[u8]) -> Key {
        self.cmac_slice(&[m])
    }
    #[must_use]
    pub fn cmac_slice(&self, ms: &[&[u8]]) -> Key {
        let mut cmac_context = self.cmac_cipher();
        for m in ms {
            if !m.is_empty() {
                cmac_context.input(m);
            }
        }
        cmac_context
            .result()
            .code()
            .as_slice()
            .try_into()
            .expect("cmac code is always 16 bytes")
    }
}

impl From<Key> for AESCipher {
    #[must_use]
    fn from(k: Key) -> Self {
        Self::new(k)
    }
}
impl From<Salt> for AESCipher {
    #[must_use]
    fn from(s: Salt) -> Self {
        s.as_key().into()
    }
}
