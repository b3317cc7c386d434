//! Symmetric encryption for API keys stored in configuration.
//!
//! Keys are AES-128 in ECB mode with PKCS#7 padding, base64 encoded. The AES
//! key is the UTF-8 encryption secret truncated or zero-padded to 16 bytes.

use aes::Aes128;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ecb::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

const BLOCK_SIZE: usize = 16;

fn derive_key(secret: &str) -> [u8; BLOCK_SIZE] {
    let mut key = [0u8; BLOCK_SIZE];
    let bytes = secret.as_bytes();
    let len = bytes.len().min(BLOCK_SIZE);
    key[..len].copy_from_slice(&bytes[..len]);
    key
}

/// Encrypt a plain API key into the base64 form accepted by [`decrypt_api_key`].
pub fn encrypt_api_key(plain: &str, secret: &str) -> String {
    let data = Aes128EcbEnc::new(&derive_key(secret).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plain.as_bytes());
    STANDARD.encode(data)
}

/// AES decryption only, no fallbacks.
fn aes_decrypt(encoded: &str, secret: &str) -> Result<String, String> {
    let data = STANDARD.decode(encoded).map_err(|e| format!("invalid base64: {}", e))?;
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(format!("ciphertext length {} is not a multiple of 16", data.len()));
    }

    let plain = Aes128EcbDec::new(&derive_key(secret).into())
        .decrypt_padded_vec_mut::<Pkcs7>(&data)
        .map_err(|_| "bad padding".to_string())?;

    String::from_utf8(plain).map_err(|_| "decrypted bytes are not UTF-8".to_string())
}

/// Decrypt a configured API key.
///
/// When AES decryption fails the value is treated as plain base64 and decoded
/// to UTF-8 instead. The caller still validates the result.
pub fn decrypt_api_key(encoded: &str, secret: &str) -> Result<String, String> {
    match aes_decrypt(encoded, secret) {
        Ok(plain) => Ok(plain),
        Err(aes_err) => {
            let decoded = STANDARD.decode(encoded).map_err(|_| aes_err.clone())?;
            let text = String::from_utf8(decoded)
                .map_err(|_| format!("{}; base64 payload is not UTF-8", aes_err))?;
            tracing::debug!("Used plain base64 decode for API key");
            Ok(text)
        }
    }
}
