//! Opaque credential generation.

use rand::{rngs::OsRng, RngCore};

/// Length in bytes of a generated token before hex encoding.
pub const TOKEN_BYTES: usize = 20;

/// Generate a random opaque token key: 40 lowercase hex characters.
pub fn generate_token_key() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{:02x}", b)).collect()
}
