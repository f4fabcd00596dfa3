//! Password-sealed payloads.
//!
//! ```text
//! [16 bytes] salt        random per seal
//! [12 bytes] nonce       random per seal
//! [N + 16  ] ciphertext  AES-256-GCM output, tag appended, no associated data
//! ```
//!
//! The key is derived with scrypt (N = 2^15, r = 8, p = 1) from the password and
//! the salt. The cost parameters are compiled in and never transmitted, so both
//! sides must use the same values; a mismatch looks exactly like a wrong password.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::common::error::{Result, StegError};

/// KDF salt length in bytes.
pub const SALT_LEN: usize = 16;
/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;
/// Bytes in front of the ciphertext.
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// scrypt cost as log2(N).
pub const KDF_LOG_N: u8 = 15;
/// scrypt block size.
pub const KDF_BLOCK_SIZE: u32 = 8;
/// scrypt parallelism.
pub const KDF_PARALLELISM: u32 = 1;

/// Bytes a sealed envelope adds on top of the plaintext.
pub const fn overhead() -> usize {
    HEADER_LEN + TAG_LEN
}

/// Borrowed view of a sealed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealedEnvelope<'a> {
    pub salt: &'a [u8],
    pub nonce: &'a [u8],
    /// Ciphertext with the tag still attached.
    pub ciphertext: &'a [u8],
}

impl<'a> SealedEnvelope<'a> {
    /// Split `bytes` into salt, nonce and ciphertext.
    ///
    /// # Errors
    /// [`StegError::Format`] `"payload too short"` below 28 bytes.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(StegError::Format("payload too short"));
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }
}

/// Derive the AES-256 key from password + salt with the fixed scrypt parameters.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = scrypt::Params::new(KDF_LOG_N, KDF_BLOCK_SIZE, KDF_PARALLELISM, KEY_LEN)
        .map_err(|e| StegError::KeyDerivation(e.to_string()))?;

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut key[..])
        .map_err(|e| StegError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

/// Encrypt `plaintext` under `password` with a fresh random salt and nonce.
///
/// Returns `salt ‖ nonce ‖ ciphertext+tag`, ready to hand to the codec.
pub fn seal(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    seal_with(plaintext, password, &salt, &nonce)
}

/// [`seal`] with caller-chosen salt and nonce.
pub(crate) fn seal_with(
    plaintext: &[u8],
    password: &str,
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>> {
    let key = derive_key(password, salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| StegError::Encryption)?;

    let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    out.extend_from_slice(salt);
    out.extend_from_slice(nonce);
    out.extend_from_slice(&ciphertext);

    debug!(
        "sealed {} plaintext bytes into {} envelope bytes",
        plaintext.len(),
        out.len()
    );
    Ok(out)
}

/// Decrypt an envelope produced by [`seal`].
///
/// # Errors
/// - [`StegError::Format`] `"payload too short"` if there is no room for salt and nonce
/// - [`StegError::Authentication`] on a wrong password or any modification of the
///   envelope; no plaintext is returned in that case
pub fn open(envelope: &[u8], password: &str) -> Result<Vec<u8>> {
    let parts = SealedEnvelope::parse(envelope)?;

    let key = derive_key(password, parts.salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));

    cipher
        .decrypt(Nonce::from_slice(parts.nonce), parts.ciphertext)
        .map_err(|_| StegError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_roundtrip() {
        let msg = b"Hello, steganography!";
        let sealed = seal(msg, "secret123").unwrap();
        assert_eq!(open(&sealed, "secret123").unwrap(), msg);
    }

    #[test]
    fn test_empty_plaintext() {
        let sealed = seal(b"", "pass").unwrap();
        assert_eq!(sealed.len(), overhead());
        assert!(open(&sealed, "pass").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_password_fails() {
        let sealed = seal(b"secret message", "correct").unwrap();
        assert!(matches!(
            open(&sealed, "wrong"),
            Err(StegError::Authentication)
        ));
    }

    #[test]
    fn test_layout_salt_nonce_ciphertext() {
        let salt = [7u8; SALT_LEN];
        let nonce = [9u8; NONCE_LEN];
        let sealed = seal_with(b"abc", "pw", &salt, &nonce).unwrap();

        assert_eq!(sealed.len(), HEADER_LEN + 3 + TAG_LEN);
        let parts = SealedEnvelope::parse(&sealed).unwrap();
        assert_eq!(parts.salt, &salt);
        assert_eq!(parts.nonce, &nonce);
        assert_eq!(parts.ciphertext.len(), 3 + TAG_LEN);
        assert_eq!(open(&sealed, "pw").unwrap(), b"abc");
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_seal() {
        let a = seal(b"same message", "pass").unwrap();
        let b = seal(b"same message", "pass").unwrap();
        assert_ne!(a[..SALT_LEN], b[..SALT_LEN]);
        assert_ne!(a[SALT_LEN..HEADER_LEN], b[SALT_LEN..HEADER_LEN]);
        assert_ne!(a[HEADER_LEN..], b[HEADER_LEN..]);
    }

    #[test]
    fn test_tampered_ciphertext_and_tag_fail() {
        let sealed = seal(b"tamper evident payload", "pw").unwrap();
        let last = sealed.len() - 1;
        let tag_start = sealed.len() - TAG_LEN;

        for (index, bit) in [(HEADER_LEN, 0), (HEADER_LEN + 5, 7), (tag_start, 3), (last, 0)] {
            let mut tampered = sealed.clone();
            tampered[index] ^= 1 << bit;
            assert!(
                matches!(open(&tampered, "pw"), Err(StegError::Authentication)),
                "flip at byte {index} bit {bit} was not detected"
            );
        }
    }

    #[test]
    fn test_tampered_salt_fails() {
        let mut sealed = seal(b"payload", "pw").unwrap();
        sealed[0] ^= 0x80;
        assert!(matches!(open(&sealed, "pw"), Err(StegError::Authentication)));
    }

    #[test]
    fn test_too_short_is_format_error() {
        assert!(matches!(
            open(&[0u8; HEADER_LEN - 1], "pw"),
            Err(StegError::Format("payload too short"))
        ));
        assert!(matches!(open(&[], "pw"), Err(StegError::Format(_))));
    }

    #[test]
    fn test_header_without_tag_fails_authentication() {
        let sealed = seal(b"x", "pw").unwrap();
        assert!(matches!(
            open(&sealed[..HEADER_LEN + 4], "pw"),
            Err(StegError::Authentication)
        ));
    }

    const KNOWN_SALT: [u8; SALT_LEN] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
        0x0e, 0x0f,
    ];
    const KNOWN_NONCE: [u8; NONCE_LEN] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b,
    ];
    // scrypt("hunter2", KNOWN_SALT, N=2^15, r=8, p=1, 32)
    const KNOWN_KEY: [u8; KEY_LEN] = [
        0x0f, 0xc4, 0xc0, 0xa0, 0x2c, 0x6b, 0x52, 0x6b, 0x34, 0x4f, 0x28, 0xb0, 0xad, 0x20,
        0xdb, 0xdb, 0xde, 0x76, 0x36, 0x56, 0x4e, 0x6e, 0x0f, 0x62, 0xe2, 0xc5, 0x8c, 0x8f,
        0x25, 0xe1, 0xe1, 0xa3,
    ];
    // AES-256-GCM(KNOWN_KEY, KNOWN_NONCE, "from the go service"), tag appended
    const KNOWN_CIPHERTEXT: [u8; 35] = [
        0x41, 0x8c, 0x57, 0x90, 0x87, 0x11, 0x64, 0xcb, 0x09, 0x31, 0x11, 0xef, 0xbf, 0x59,
        0x73, 0xe1, 0xbc, 0x7b, 0x8f, 0x30, 0x52, 0x34, 0xcb, 0x5c, 0x70, 0xc5, 0xad, 0x93,
        0x33, 0x38, 0x28, 0x91, 0xa8, 0xf5, 0x62,
    ];

    fn known_envelope() -> Vec<u8> {
        [&KNOWN_SALT[..], &KNOWN_NONCE[..], &KNOWN_CIPHERTEXT[..]].concat()
    }

    #[test]
    fn test_derive_key_known_answer() {
        let key = derive_key("hunter2", &KNOWN_SALT).unwrap();
        assert_eq!(*key, KNOWN_KEY);
    }

    #[test]
    fn test_open_known_envelope() {
        let envelope = known_envelope();
        assert_eq!(open(&envelope, "hunter2").unwrap(), b"from the go service");
        assert!(matches!(
            open(&envelope, "hunter3"),
            Err(StegError::Authentication)
        ));
    }

    #[test]
    fn test_seal_with_known_salt_and_nonce_matches_vector() {
        let sealed =
            seal_with(b"from the go service", "hunter2", &KNOWN_SALT, &KNOWN_NONCE).unwrap();
        assert_eq!(sealed, known_envelope());
    }

    #[test]
    fn test_derive_key_deterministic_and_salted() {
        let a = derive_key("mypass", &[1u8; SALT_LEN]).unwrap();
        let b = derive_key("mypass", &[1u8; SALT_LEN]).unwrap();
        let c = derive_key("mypass", &[2u8; SALT_LEN]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
