use sha2::{Digest, Sha256};

/// Double SHA-256, the digest used for txids, Merkle nodes and block header
/// hashes on this chain.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

/// Parse a 256-bit hash written in display order (the way RPC and explorers
/// print it) into internal byte order.
///
/// Panics on a malformed literal; callers only ever pass compiled-in
/// constants, so a bad string is a build defect, not a runtime condition.
pub fn hash_from_display_hex(hash_hex: &str) -> [u8; 32] {
    let mut bytes = hex::decode(hash_hex).expect("valid hash literal");
    assert_eq!(bytes.len(), 32, "hash literal must be 32 bytes");
    bytes.reverse();
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    out
}

/// Render an internal-order hash in display order.
pub fn display_hex(hash: &[u8; 32]) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256d_known_vector() {
        assert_eq!(
            hex::encode(sha256d(b"hello")),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn display_order_is_byte_reversed() {
        let hash_hex = "50996d33e77ebdaa246e5668bf0f2076ae680ae28f7e9109d9cd2e0e0be27d15";
        let internal = hash_from_display_hex(hash_hex);
        assert_eq!(internal[31], 0x50);
        assert_eq!(internal[0], 0x15);
        assert_eq!(display_hex(&internal), hash_hex);
    }
}
