// Consensus value types. Only the encoding side is needed here: everything
// this subsystem hashes is built in-process, never parsed off the wire.

use byteorder::{LittleEndian, WriteBytesExt};
use serde::Serialize;
use std::io::{Error as IoError, Write};

use crate::hashes::sha256d;
use crate::serialize::{write_var_bytes, write_var_int, Encodable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxIn {
    pub prev_out_hash: [u8; 32],
    pub prev_out_n: u32,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

impl TxIn {
    /// Input spending nothing: a null previous outpoint, as used by
    /// coinbase transactions.
    pub fn coinbase(script_sig: Vec<u8>) -> Self {
        TxIn {
            prev_out_hash: [0u8; 32],
            prev_out_n: 0xffff_ffff,
            script_sig,
            sequence: 0xffff_ffff,
        }
    }
}

impl Encodable for TxIn {
    fn consensus_encode<W: Write + WriteBytesExt>(&self, writer: &mut W) -> Result<usize, IoError> {
        let mut written = 0;
        writer.write_all(&self.prev_out_hash)?;
        written += 32;
        writer.write_u32::<LittleEndian>(self.prev_out_n)?;
        written += 4;
        written += write_var_bytes(writer, &self.script_sig)?;
        writer.write_u32::<LittleEndian>(self.sequence)?;
        written += 4;
        Ok(written)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOut {
    pub value: i64,
    pub script_pubkey: Vec<u8>,
}

impl TxOut {
    /// Output carrying no value and no claimable script.
    pub fn empty() -> Self {
        TxOut {
            value: 0,
            script_pubkey: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

impl Encodable for TxOut {
    fn consensus_encode<W: Write + WriteBytesExt>(&self, writer: &mut W) -> Result<usize, IoError> {
        let mut written = 0;
        writer.write_i64::<LittleEndian>(self.value)?;
        written += 8;
        written += write_var_bytes(writer, &self.script_pubkey)?;
        Ok(written)
    }
}

/// A transaction in this chain's timestamped format: `time` sits between
/// the version and the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: i32,
    pub time: u32,
    pub vin: Vec<TxIn>,
    pub vout: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn txid(&self) -> [u8; 32] {
        let mut buf = Vec::new();
        self.consensus_encode(&mut buf)
            .expect("in-memory tx encoding cannot fail");
        sha256d(&buf)
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: Write + WriteBytesExt>(&self, writer: &mut W) -> Result<usize, IoError> {
        let mut written = 0;
        writer.write_i32::<LittleEndian>(self.version)?;
        written += 4;
        writer.write_u32::<LittleEndian>(self.time)?;
        written += 4;
        written += write_var_int(writer, self.vin.len() as u64)?;
        for txin in &self.vin {
            written += txin.consensus_encode(writer)?;
        }
        written += write_var_int(writer, self.vout.len() as u64)?;
        for txout in &self.vout {
            written += txout.consensus_encode(writer)?;
        }
        writer.write_u32::<LittleEndian>(self.lock_time)?;
        written += 4;
        Ok(written)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: [u8; 32],
    pub merkle_root: [u8; 32],
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub const SIZE: usize = 80;

    pub fn hash(&self) -> [u8; 32] {
        let mut buf = Vec::with_capacity(Self::SIZE);
        self.consensus_encode(&mut buf)
            .expect("in-memory header encoding cannot fail");
        sha256d(&buf)
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode<W: Write + WriteBytesExt>(&self, writer: &mut W) -> Result<usize, IoError> {
        writer.write_i32::<LittleEndian>(self.version)?;
        writer.write_all(&self.prev_block_hash)?;
        writer.write_all(&self.merkle_root)?;
        writer.write_u32::<LittleEndian>(self.time)?;
        writer.write_u32::<LittleEndian>(self.bits)?;
        writer.write_u32::<LittleEndian>(self.nonce)?;
        Ok(Self::SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn merkle_root(&self) -> [u8; 32] {
        let txids: Vec<[u8; 32]> = self.transactions.iter().map(Transaction::txid).collect();
        merkle_root(txids)
    }
}

/// Merkle root over a list of txids, pairing with sha256d and duplicating
/// the last node on odd levels. A one-element tree is the txid itself.
pub fn merkle_root(mut level: Vec<[u8; 32]>) -> [u8; 32] {
    if level.is_empty() {
        return [0u8; 32];
    }
    while level.len() > 1 {
        if level.len() % 2 != 0 {
            let last = level[level.len() - 1];
            level.push(last);
        }
        level = level
            .chunks_exact(2)
            .map(|pair| {
                let mut concat = [0u8; 64];
                concat[..32].copy_from_slice(&pair[0]);
                concat[32..].copy_from_slice(&pair[1]);
                sha256d(&concat)
            })
            .collect();
    }
    level[0]
}
