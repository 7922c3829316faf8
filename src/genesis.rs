//! Construction and verification of the canonical first block.
//!
//! Every network profile rebuilds its genesis from compiled-in inputs at
//! startup and checks the result against hardcoded constants. A mismatch
//! means the binary cannot safely talk to any peer, so the caller treats
//! the returned error as fatal.

use thiserror::Error;

use crate::hashes::display_hex;
use crate::primitives::{Block, BlockHeader, Transaction, TxIn, TxOut};

/// Headline embedded in the coinbase unlocking script, shared by all three
/// networks.
pub const GENESIS_TIMESTAMP_TEXT: &str =
    "MagikPOS Malware Terrorizes Point of Sale Terminals Across the US and Canada - by JP Buntinx - March 19 2017";

/// Transaction timestamp of the coinbase. Fixed even on regtest, which only
/// moves the header timestamp; that is why all networks share one Merkle
/// root.
pub const GENESIS_TX_TIME: u32 = 1_489_956_950;

const COINBASE_EXTRA_NONCE: u8 = 42;
const OP_PUSHDATA1: u8 = 0x4c;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("genesis merkle root mismatch: computed {computed}, expected {expected}")]
    MerkleRootMismatch { computed: String, expected: String },
    #[error("genesis block hash mismatch: computed {computed}, expected {expected}")]
    BlockHashMismatch { computed: String, expected: String },
}

/// `OP_0 <42> <timestamp text>`, the unlocking script of the genesis
/// coinbase. The text is longer than 75 bytes so it needs OP_PUSHDATA1.
fn coinbase_script_sig() -> Vec<u8> {
    let text = GENESIS_TIMESTAMP_TEXT.as_bytes();
    let mut script = Vec::with_capacity(text.len() + 5);
    script.push(0x00);
    script.push(0x01);
    script.push(COINBASE_EXTRA_NONCE);
    script.push(OP_PUSHDATA1);
    script.push(text.len() as u8);
    script.extend_from_slice(text);
    script
}

/// Build the single-transaction genesis block for the given header inputs.
pub fn build_genesis_block(header_time: u32, bits: u32, nonce: u32) -> Block {
    let coinbase = Transaction {
        version: 1,
        time: GENESIS_TX_TIME,
        vin: vec![TxIn::coinbase(coinbase_script_sig())],
        vout: vec![TxOut::empty()],
        lock_time: 0,
    };
    let merkle_root = coinbase.txid();
    let header = BlockHeader {
        version: 1,
        prev_block_hash: [0u8; 32],
        merkle_root,
        time: header_time,
        bits,
        nonce,
    };
    Block {
        header,
        transactions: vec![coinbase],
    }
}

/// Build the genesis block and check it against the expected constants.
/// Both hashes must match; anything else is a configuration defect the
/// process must not start with.
pub fn build_and_verify(
    header_time: u32,
    bits: u32,
    nonce: u32,
    expected_hash: &[u8; 32],
    expected_merkle_root: &[u8; 32],
) -> Result<Block, GenesisError> {
    let block = build_genesis_block(header_time, bits, nonce);
    if block.header.merkle_root != *expected_merkle_root {
        return Err(GenesisError::MerkleRootMismatch {
            computed: display_hex(&block.header.merkle_root),
            expected: display_hex(expected_merkle_root),
        });
    }
    let hash = block.header.hash();
    if hash != *expected_hash {
        return Err(GenesisError::BlockHashMismatch {
            computed: display_hex(&hash),
            expected: display_hex(expected_hash),
        });
    }
    Ok(block)
}
