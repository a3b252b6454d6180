//! On-disk encoding of stored assignments.

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::Rng;
use secret_santa_core::Assignment;
use tracing::debug;

use crate::StoreError;

/// Converts an assignment to and from its stored bytes.
///
/// Stores call this for every read and write, so an implementation that
/// encrypts or compresses can be swapped in without touching the store.
pub trait HistoryCodec: Send + Sync {
    fn encode(&self, assignment: &Assignment) -> Result<Vec<u8>, StoreError>;

    fn decode(&self, bytes: &[u8]) -> Result<Assignment, StoreError>;
}

impl<C: HistoryCodec + ?Sized> HistoryCodec for Box<C> {
    fn encode(&self, assignment: &Assignment) -> Result<Vec<u8>, StoreError> {
        (**self).encode(assignment)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Assignment, StoreError> {
        (**self).decode(bytes)
    }
}

/// Plain JSON: a list of `[gifter, giftee]` pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl HistoryCodec for JsonCodec {
    fn encode(&self, assignment: &Assignment) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(assignment)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Assignment, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

const MAGIC: &[u8; 4] = b"SSE1";
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
// magic, three u32 cost parameters, salt
const HEADER_LEN: usize = MAGIC.len() + 12 + SALT_LEN;

/// JSON records sealed with ChaCha20-Poly1305 under a passphrase.
///
/// Each record gets a fresh salt and nonce. The key is derived from the
/// passphrase and salt with Argon2id, and the cost parameters are stored in
/// the record header so records stay readable if the defaults change.
///
/// Layout: `SSE1 | m_cost | t_cost | p_cost | salt[16] | nonce[12] | ciphertext`,
/// with the header authenticated as associated data.
///
/// Records without the `SSE1` prefix are read as plain JSON, so a history
/// written before encryption was enabled still loads.
#[derive(Clone)]
pub struct EncryptedCodec {
    passphrase: Vec<u8>,
    params: Params,
}

impl fmt::Debug for EncryptedCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedCodec")
            .field("passphrase", &"<redacted>")
            .field("params", &self.params)
            .finish()
    }
}

impl EncryptedCodec {
    /// Uses the Argon2 default cost parameters.
    pub fn new(passphrase: impl AsRef<[u8]>) -> Self {
        Self::with_params(passphrase, Params::default())
    }

    /// Uses explicit Argon2 cost parameters for new records.
    pub fn with_params(passphrase: impl AsRef<[u8]>, params: Params) -> Self {
        Self {
            passphrase: passphrase.as_ref().to_vec(),
            params,
        }
    }

    fn cipher(&self, params: Params, salt: &[u8]) -> Result<ChaCha20Poly1305, StoreError> {
        let mut key = [0u8; KEY_LEN];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(&self.passphrase, salt, &mut key)
            .map_err(|e| StoreError::Codec(format!("key derivation failed: {e}")))?;
        Ok(ChaCha20Poly1305::new(Key::from_slice(&key)))
    }
}

impl HistoryCodec for EncryptedCodec {
    fn encode(&self, assignment: &Assignment) -> Result<Vec<u8>, StoreError> {
        let plaintext = JsonCodec.encode(assignment)?;

        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        let mut rng = rand::rng();
        rng.fill(&mut salt);
        rng.fill(&mut nonce);

        let mut record = Vec::with_capacity(HEADER_LEN + NONCE_LEN + plaintext.len() + 16);
        record.extend_from_slice(MAGIC);
        record.extend_from_slice(&self.params.m_cost().to_le_bytes());
        record.extend_from_slice(&self.params.t_cost().to_le_bytes());
        record.extend_from_slice(&self.params.p_cost().to_le_bytes());
        record.extend_from_slice(&salt);

        let ciphertext = self
            .cipher(self.params.clone(), &salt)?
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &plaintext,
                    aad: &record,
                },
            )
            .map_err(|_| StoreError::Codec("encryption failed".to_string()))?;

        record.extend_from_slice(&nonce);
        record.extend_from_slice(&ciphertext);
        Ok(record)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Assignment, StoreError> {
        if !bytes.starts_with(MAGIC) {
            debug!(event = "plain_record_read", bytes = bytes.len());
            return JsonCodec.decode(bytes);
        }
        if bytes.len() < HEADER_LEN + NONCE_LEN {
            return Err(StoreError::Codec("encrypted record is truncated".to_string()));
        }

        let (header, rest) = bytes.split_at(HEADER_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        let cost = |i: usize| {
            let at = MAGIC.len() + 4 * i;
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        let params = Params::new(cost(0), cost(1), cost(2), None)
            .map_err(|e| StoreError::Codec(format!("bad key derivation parameters: {e}")))?;
        let salt = &header[HEADER_LEN - SALT_LEN..];

        let plaintext = self
            .cipher(params, salt)?
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: header,
                },
            )
            .map_err(|_| {
                StoreError::Codec(
                    "could not decrypt record: wrong passphrase or corrupted file".to_string(),
                )
            })?;
        JsonCodec.decode(&plaintext)
    }
}

#[cfg(test)]
mod tests {
    use secret_santa_core::Pairing;

    use super::*;

    fn ring() -> Assignment {
        [
            Pairing::new("ann", "ben"),
            Pairing::new("ben", "cat"),
            Pairing::new("cat", "ann"),
        ]
        .into_iter()
        .collect()
    }

    // Cheap parameters keep the tests fast.
    fn codec(passphrase: &str) -> EncryptedCodec {
        let params = Params::new(64, 1, 1, None).unwrap();
        EncryptedCodec::with_params(passphrase, params)
    }

    #[test]
    fn test_json_layout() {
        let assignment: Assignment = [Pairing::new("ann", "ben"), Pairing::new("ben", "cat")]
            .into_iter()
            .collect();

        let bytes = JsonCodec.encode(&assignment).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[["ann","ben"],["ben","cat"]]"#
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = JsonCodec.decode(b"{not json").unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn test_decode_reads_existing_records() {
        let assignment = JsonCodec
            .decode(br#"[["dana", "eli"], ["eli", "dana"]]"#)
            .unwrap();
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.giftee_of("eli"), Some("dana"));
    }

    #[test]
    fn test_encrypted_round_trip_hides_names() {
        let codec = codec("mistletoe");
        let bytes = codec.encode(&ring()).unwrap();

        assert!(bytes.starts_with(MAGIC));
        assert!(!bytes.windows(3).any(|w| w == b"ann"));
        assert_eq!(codec.decode(&bytes).unwrap(), ring());

        // Fresh salt and nonce per record.
        assert_ne!(codec.encode(&ring()).unwrap(), bytes);
    }

    #[test]
    fn test_wrong_passphrase_is_codec_error() {
        let bytes = codec("mistletoe").encode(&ring()).unwrap();

        let err = codec("holly").decode(&bytes).unwrap_err();
        assert!(matches!(err, StoreError::Codec(ref msg) if msg.contains("wrong passphrase")));
    }

    #[test]
    fn test_tampered_record_is_rejected() {
        let codec = codec("mistletoe");
        let mut bytes = codec.encode(&ring()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert!(matches!(codec.decode(&bytes), Err(StoreError::Codec(_))));

        let truncated = &codec.encode(&ring()).unwrap()[..HEADER_LEN + 3];
        assert!(matches!(codec.decode(truncated), Err(StoreError::Codec(_))));
    }

    #[test]
    fn test_encrypted_codec_reads_plain_records() {
        let plain = JsonCodec.encode(&ring()).unwrap();
        assert_eq!(codec("mistletoe").decode(&plain).unwrap(), ring());
    }

    #[test]
    fn test_debug_hides_passphrase() {
        let printed = format!("{:?}", codec("mistletoe"));
        assert!(!printed.contains("mistletoe"));
    }
}
