//! Bootstrap peer seeds compiled into the binary.

use chrono::Utc;
use rand::{thread_rng, Rng};
use serde::Serialize;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

pub const ONE_WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Fixed-seed record: 16-byte address (IPv4 stored in IPv6-mapped form)
/// plus port, the flat layout the seed tables are generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed6 {
    pub addr: [u8; 16],
    pub port: u16,
}

impl Seed6 {
    pub const fn ipv4(a: u8, b: u8, c: u8, d: u8, port: u16) -> Self {
        Seed6 {
            addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
            port,
        }
    }
}

pub static MAINNET_SEEDS: &[Seed6] = &[Seed6::ipv4(91, 134, 120, 210, 6909)];
pub static TESTNET_SEEDS: &[Seed6] = &[];

/// A bootstrap peer address with an artificially aged last-seen timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    pub ip: [u8; 16],
    pub port: u16,
    pub last_seen: i64,
}

impl SeedAddress {
    pub fn socket_addr(&self) -> SocketAddr {
        let v6 = Ipv6Addr::from(self.ip);
        match v6.to_ipv4_mapped() {
            Some(v4) => SocketAddr::new(IpAddr::V4(v4), self.port),
            None => SocketAddr::new(IpAddr::V6(v6), self.port),
        }
    }
}

/// Convert a seed table into peer addresses. Each seed gets a random
/// last-seen time of one to two weeks ago, so the node only leans on it
/// until any live peer supplies fresher addresses.
pub fn convert_seed6_at<R: Rng>(records: &[Seed6], now: i64, rng: &mut R) -> Vec<SeedAddress> {
    records
        .iter()
        .map(|seed| SeedAddress {
            ip: seed.addr,
            port: seed.port,
            last_seen: now - rng.gen_range(0..ONE_WEEK_SECS) - ONE_WEEK_SECS,
        })
        .collect()
}

pub fn convert_seed6(records: &[Seed6]) -> Vec<SeedAddress> {
    convert_seed6_at(records, Utc::now().timestamp(), &mut thread_rng())
}
