use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::big_number::BigNumber;

pub const SHA256_LENGTH: usize = 32;
pub const SHA512_LENGTH: usize = 64;

/// the configurable hash knob from the protocol's configuration surface;
/// selects the digest used both by `hash_in_group` and by the session MAC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::Sha256
    }
}

impl HashAlgorithm {
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => SHA256_LENGTH,
            HashAlgorithm::Sha512 => SHA512_LENGTH,
        }
    }

    /// digests the concatenation of every chunk, big-endian
    pub fn digest(&self, chunks: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => {
                let mut h = Sha256::new();
                for c in chunks {
                    h.update(c);
                }
                h.finalize().to_vec()
            }
            HashAlgorithm::Sha512 => {
                let mut h = Sha512::new();
                for c in chunks {
                    h.update(c);
                }
                h.finalize().to_vec()
            }
        }
    }

    /// H(a, b) folded back into the group as a [`BigNumber`], used by
    /// `group_math::hash_in_group`
    pub fn hash_big_numbers(&self, a: &BigNumber, b: &BigNumber) -> BigNumber {
        let bytes = self.digest(&[&a.to_bytes_be(), &b.to_bytes_be()]);
        BigNumber::from_bytes_be(&bytes)
    }

    /// MAC over arbitrary chunks keyed by `key`, used for `ski`-derivation
    /// and every MAC-authenticated operation
    pub fn hmac(&self, key: &[u8], chunks: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
                for c in chunks {
                    mac.update(c);
                }
                mac.finalize().into_bytes().to_vec()
            }
            HashAlgorithm::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
                for c in chunks {
                    mac.update(c);
                }
                mac.finalize().into_bytes().to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_hash_2_big_numbers_deterministically() {
        let a = BigNumber::from(11u32);
        let b = BigNumber::from(13u32);
        let h1 = HashAlgorithm::Sha256.hash_big_numbers(&a, &b);
        let h2 = HashAlgorithm::Sha256.hash_big_numbers(&a, &b);
        assert_eq!(h1, h2);
    }

    #[test]
    fn should_differ_by_algorithm() {
        let a = BigNumber::from(11u32);
        let b = BigNumber::from(13u32);
        let h256 = HashAlgorithm::Sha256.hash_big_numbers(&a, &b);
        let h512 = HashAlgorithm::Sha512.hash_big_numbers(&a, &b);
        assert_ne!(h256, h512);
    }

    #[test]
    fn should_hmac_deterministically() {
        let key = b"session-key";
        let m1 = HashAlgorithm::Sha256.hmac(key, &[b"cid", b"sid", b"nonce"]);
        let m2 = HashAlgorithm::Sha256.hmac(key, &[b"cid", b"sid", b"nonce"]);
        assert_eq!(m1, m2);
        assert_eq!(m1.len(), SHA256_LENGTH);
    }

    #[test]
    fn should_hmac_differ_by_key() {
        let m1 = HashAlgorithm::Sha256.hmac(b"key-a", &[b"x"]);
        let m2 = HashAlgorithm::Sha256.hmac(b"key-b", &[b"x"]);
        assert_ne!(m1, m2);
    }
}
