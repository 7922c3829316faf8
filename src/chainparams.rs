//! Per-network consensus and identity parameters.
//!
//! Three profiles exist: mainnet, testnet and regtest. Each is built by
//! explicit composition — the testnet builder starts from the mainnet value
//! and overrides fields, regtest starts from testnet — so every field's
//! provenance is visible in one place. Construction always ends with the
//! genesis check; a profile that fails it is never observable.

use log::info;
use primitive_types::U256;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

use crate::compact::to_compact;
use crate::genesis::{self, GenesisError, GENESIS_TX_TIME};
use crate::hashes::hash_from_display_hex;
use crate::primitives::Block;
use crate::seeds::{convert_seed6, SeedAddress, MAINNET_SEEDS, TESTNET_SEEDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "main",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

/// Version bytes handed to the base58 encoder. Each role is 1-4 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

/// Immutable parameter set for one network. Built once at startup, already
/// genesis-verified by the time anyone can see it.
#[derive(Debug, Clone, Serialize)]
pub struct ChainParams {
    pub network: Network,
    pub message_start: [u8; 4],
    pub alert_pubkey: Vec<u8>,
    pub default_port: u16,
    pub rpc_port: u16,
    pub pow_limit: U256,
    pub pos_limit: U256,
    pub base58_prefixes: Base58Prefixes,
    pub genesis: Block,
    pub genesis_hash: [u8; 32],
    pub expected_genesis_hash: [u8; 32],
    pub expected_merkle_root: [u8; 32],
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<SeedAddress>,
    /// Base spacing fixed at construction; consensus code must go through
    /// `target_spacing_at` instead of reading this directly.
    pub target_spacing: i64,
    pub target_timespan: i64,
    pub last_pow_block: i32,
    pub pos_start_height: i32,
    /// Subdirectory for this network's persisted state; empty means the
    /// root data directory.
    pub data_dir: &'static str,
    pub require_rpc_password: bool,
}

impl ChainParams {
    /// Effective block spacing at a given chain height. Mainnet widens from
    /// 5 to 25 minutes once the PoW/PoS twin phase begins; the value is a
    /// function of height, never a constant captured at construction.
    pub fn target_spacing_at(&self, height: i32) -> i64 {
        if self.network == Network::Mainnet && height > self.pos_start_height {
            25 * 60
        } else {
            self.target_spacing
        }
    }
}

const MAIN_ALERT_PUBKEY: &str = "01a11447c27f9745bc6b132c04b94baafbba5d5257fe028e74682a62f7c2f81f85d113a216df3be197653f454852a2d08c6314aad5ca3cbe9977428ca9e1a4caab";
const TESTNET_ALERT_PUBKEY: &str = "01b11447c27f9745bc6b132c04b94baafbba5d5257fe028e74682a62f7c2f81f85d113a216df3be197653f454852a2d08c6314aad5ca3cbe9977428ca9e1a4caab";

const GENESIS_MERKLE_ROOT: &str =
    "50996d33e77ebdaa246e5668bf0f2076ae680ae28f7e9109d9cd2e0e0be27d15";
const MAIN_GENESIS_HASH: &str =
    "f90bba343bc53a96e6ea8e7e93f077c1561a15bd70d864844c2d797b05c50718";
const TESTNET_GENESIS_HASH: &str =
    "c04f4e08d0ba7821dfca42d778090551b0b1febd99028fdc4b02ff53849c9f20";
const REGTEST_GENESIS_HASH: &str =
    "d64f58e7f35d5741038db32a6ee3e02ff967c9815db7be6899fc26b6b4fe92c8";

const MAIN_GENESIS_NONCE: u32 = 59933;
const TESTNET_GENESIS_NONCE: u32 = 369_490;
const REGTEST_GENESIS_NONCE: u32 = 8;
const REGTEST_GENESIS_TIME: u32 = 1_489_956_960;

pub fn main_params() -> Result<ChainParams, GenesisError> {
    let pow_limit = U256::MAX >> 16;
    let pos_limit = U256::MAX >> 18;
    let expected_genesis_hash = hash_from_display_hex(MAIN_GENESIS_HASH);
    let expected_merkle_root = hash_from_display_hex(GENESIS_MERKLE_ROOT);
    let genesis = genesis::build_and_verify(
        GENESIS_TX_TIME,
        to_compact(pow_limit),
        MAIN_GENESIS_NONCE,
        &expected_genesis_hash,
        &expected_merkle_root,
    )?;
    let genesis_hash = genesis.header.hash();
    let target_spacing = 5 * 60;
    Ok(ChainParams {
        network: Network::Mainnet,
        message_start: [0xea, 0x92, 0x66, 0xe4],
        alert_pubkey: hex::decode(MAIN_ALERT_PUBKEY).expect("valid alert key literal"),
        default_port: 6909,
        rpc_port: 6908,
        pow_limit,
        pos_limit,
        base58_prefixes: Base58Prefixes {
            pubkey_address: vec![65],
            script_address: vec![97],
            secret_key: vec![42],
            ext_public_key: vec![0x04, 0x88, 0xb2, 0x1e],
            ext_secret_key: vec![0x04, 0x88, 0xad, 0xe4],
        },
        genesis,
        genesis_hash,
        expected_genesis_hash,
        expected_merkle_root,
        dns_seeds: vec![DnsSeed {
            name: "Seed01",
            host: "91.134.120.210",
        }],
        fixed_seeds: convert_seed6(MAINNET_SEEDS),
        target_spacing,
        target_timespan: 10 * target_spacing,
        // PoW never stops on mainnet.
        last_pow_block: 9_999_999,
        pos_start_height: 5000,
        data_dir: "",
        require_rpc_password: true,
    })
}

pub fn testnet_params() -> Result<ChainParams, GenesisError> {
    let mut params = main_params()?;
    params.network = Network::Testnet;
    params.message_start = [0x93, 0xe1, 0xaa, 0xb8];
    params.pow_limit = U256::MAX >> 18;
    params.pos_limit = U256::MAX >> 20;
    params.alert_pubkey = hex::decode(TESTNET_ALERT_PUBKEY).expect("valid alert key literal");
    params.default_port = 6808;
    params.rpc_port = 6807;
    params.data_dir = "testnet";
    params.expected_genesis_hash = hash_from_display_hex(TESTNET_GENESIS_HASH);
    params.genesis = genesis::build_and_verify(
        GENESIS_TX_TIME,
        to_compact(params.pow_limit),
        TESTNET_GENESIS_NONCE,
        &params.expected_genesis_hash,
        &params.expected_merkle_root,
    )?;
    params.genesis_hash = params.genesis.header.hash();
    params.dns_seeds.clear();
    params.fixed_seeds = convert_seed6(TESTNET_SEEDS);
    params.base58_prefixes.pubkey_address = vec![66];
    params.base58_prefixes.script_address = vec![41];
    params.base58_prefixes.secret_key = vec![33];
    // Extended-key prefixes deliberately stay identical to mainnet.
    params.last_pow_block = i32::MAX;
    params.pos_start_height = 500;
    Ok(params)
}

pub fn regtest_params() -> Result<ChainParams, GenesisError> {
    let mut params = testnet_params()?;
    params.network = Network::Regtest;
    params.message_start = [0x22, 0xfe, 0x98, 0xca];
    params.pow_limit = U256::MAX >> 1;
    params.expected_genesis_hash = hash_from_display_hex(REGTEST_GENESIS_HASH);
    params.genesis = genesis::build_and_verify(
        REGTEST_GENESIS_TIME,
        to_compact(params.pow_limit),
        REGTEST_GENESIS_NONCE,
        &params.expected_genesis_hash,
        &params.expected_merkle_root,
    )?;
    params.genesis_hash = params.genesis.header.hash();
    params.default_port = 6707;
    params.data_dir = "regtest";
    // Regtest mode has no DNS seeds and no authenticated RPC.
    params.dns_seeds.clear();
    params.require_rpc_password = false;
    Ok(params)
}

/// All three verified profiles, built exactly once at process start.
#[derive(Debug, Clone)]
pub struct ParamsRegistry {
    main: ChainParams,
    testnet: ChainParams,
    regtest: ChainParams,
}

impl ParamsRegistry {
    pub fn build() -> Result<Self, GenesisError> {
        let registry = ParamsRegistry {
            main: main_params()?,
            testnet: testnet_params()?,
            regtest: regtest_params()?,
        };
        info!("chain parameters built, all genesis blocks verified");
        Ok(registry)
    }

    pub fn get(&self, network: Network) -> &ChainParams {
        match network {
            Network::Mainnet => &self.main,
            Network::Testnet => &self.testnet,
            Network::Regtest => &self.regtest,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("-testnet and -regtest are mutually exclusive")]
    ConflictingNetworks,
}

/// The network selector: a verified registry plus the active network.
/// Mainnet is active until startup selects otherwise.
#[derive(Debug, Clone)]
pub struct ParamsStore {
    registry: ParamsRegistry,
    active: Network,
}

impl ParamsStore {
    pub fn new(registry: ParamsRegistry) -> Self {
        ParamsStore {
            registry,
            active: Network::Mainnet,
        }
    }

    pub fn active_network(&self) -> Network {
        self.active
    }

    /// The active network's parameter set.
    pub fn params(&self) -> &ChainParams {
        self.registry.get(self.active)
    }

    pub fn select_params(&mut self, network: Network) {
        self.active = network;
        info!("selected {} network parameters", network.name());
    }

    /// Resolve command-line intent. Both flags at once is an ordinary error
    /// the caller reports as a usage problem; the active network is left
    /// untouched. Precedence otherwise: regtest, then testnet, then main.
    pub fn select_params_from_flags(
        &mut self,
        testnet: bool,
        regtest: bool,
    ) -> Result<Network, SelectionError> {
        if testnet && regtest {
            return Err(SelectionError::ConflictingNetworks);
        }
        let network = if regtest {
            Network::Regtest
        } else if testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        };
        self.select_params(network);
        Ok(network)
    }
}

static ACTIVE_PARAMS: OnceLock<ParamsStore> = OnceLock::new();

/// Publish the selected store for process-wide read access. Called once at
/// the end of startup, before other threads exist; the store is read-only
/// from then on. Tests use local `ParamsStore` values instead.
pub fn publish(store: ParamsStore) -> Result<(), ParamsStore> {
    ACTIVE_PARAMS.set(store)
}

/// The active network's parameters. Panics if startup has not published a
/// selection yet; that is a wiring bug, not a runtime condition.
pub fn params() -> &'static ChainParams {
    ACTIVE_PARAMS
        .get()
        .expect("chain parameters read before startup selection")
        .params()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashes::display_hex;

    fn registry() -> ParamsRegistry {
        ParamsRegistry::build().expect("all genesis blocks verify")
    }

    #[test]
    fn every_profile_rebuilds_its_published_genesis() {
        let registry = registry();
        let cases = [
            (Network::Mainnet, MAIN_GENESIS_HASH),
            (Network::Testnet, TESTNET_GENESIS_HASH),
            (Network::Regtest, REGTEST_GENESIS_HASH),
        ];
        for (network, expected) in cases {
            let params = registry.get(network);
            assert_eq!(display_hex(&params.genesis_hash), expected);
            assert_eq!(params.genesis_hash, params.expected_genesis_hash);
            assert_eq!(
                display_hex(&params.genesis.header.merkle_root),
                GENESIS_MERKLE_ROOT
            );
        }
    }

    #[test]
    fn genesis_bits_encode_each_pow_limit() {
        let registry = registry();
        for network in [Network::Mainnet, Network::Testnet, Network::Regtest] {
            let params = registry.get(network);
            assert_eq!(
                params.genesis.header.bits,
                to_compact(params.pow_limit),
                "{} genesis bits",
                network.name()
            );
        }
    }

    #[test]
    fn conflicting_flags_leave_the_active_network_unchanged() {
        let mut store = ParamsStore::new(registry());
        store.select_params(Network::Testnet);
        assert_eq!(
            store.select_params_from_flags(true, true),
            Err(SelectionError::ConflictingNetworks)
        );
        assert_eq!(store.active_network(), Network::Testnet);
    }

    #[test]
    fn flag_precedence_regtest_then_testnet_then_main() {
        let mut store = ParamsStore::new(registry());
        assert_eq!(
            store.select_params_from_flags(false, false),
            Ok(Network::Mainnet)
        );
        assert_eq!(store.params().default_port, 6909);
        assert_eq!(
            store.select_params_from_flags(true, false),
            Ok(Network::Testnet)
        );
        assert_eq!(store.params().default_port, 6808);
        assert_eq!(
            store.select_params_from_flags(false, true),
            Ok(Network::Regtest)
        );
        assert_eq!(store.params().default_port, 6707);
    }

    #[test]
    fn extended_key_prefixes_are_shared_while_address_bytes_differ() {
        let registry = registry();
        let main = registry.get(Network::Mainnet);
        for network in [Network::Testnet, Network::Regtest] {
            let derived = registry.get(network);
            assert_eq!(
                derived.base58_prefixes.ext_public_key,
                main.base58_prefixes.ext_public_key
            );
            assert_eq!(
                derived.base58_prefixes.ext_secret_key,
                main.base58_prefixes.ext_secret_key
            );
            assert_ne!(
                derived.base58_prefixes.pubkey_address,
                main.base58_prefixes.pubkey_address
            );
            assert_ne!(
                derived.base58_prefixes.script_address,
                main.base58_prefixes.script_address
            );
            assert_ne!(
                derived.base58_prefixes.secret_key,
                main.base58_prefixes.secret_key
            );
        }
        assert_eq!(main.base58_prefixes.pubkey_address, vec![65]);
        assert_eq!(
            main.base58_prefixes.ext_public_key,
            vec![0x04, 0x88, 0xb2, 0x1e]
        );
    }

    #[test]
    fn only_regtest_relaxes_rpc_authentication() {
        let registry = registry();
        assert!(registry.get(Network::Mainnet).require_rpc_password);
        assert!(registry.get(Network::Testnet).require_rpc_password);
        assert!(!registry.get(Network::Regtest).require_rpc_password);
    }

    #[test]
    fn mainnet_spacing_widens_after_the_pos_start_height() {
        let registry = registry();
        let main = registry.get(Network::Mainnet);
        assert_eq!(main.target_spacing_at(0), 5 * 60);
        assert_eq!(main.target_spacing_at(5000), 5 * 60);
        assert_eq!(main.target_spacing_at(5001), 25 * 60);
        assert_eq!(main.target_timespan, 10 * 5 * 60);

        let testnet = registry.get(Network::Testnet);
        assert_eq!(testnet.target_spacing_at(501), 5 * 60);
        assert_eq!(testnet.target_spacing_at(1_000_000), 5 * 60);
    }

    #[test]
    fn wire_identity_is_distinct_per_network() {
        let registry = registry();
        let main = registry.get(Network::Mainnet);
        let testnet = registry.get(Network::Testnet);
        let regtest = registry.get(Network::Regtest);

        assert_eq!(main.message_start, [0xea, 0x92, 0x66, 0xe4]);
        assert_eq!(testnet.message_start, [0x93, 0xe1, 0xaa, 0xb8]);
        assert_eq!(regtest.message_start, [0x22, 0xfe, 0x98, 0xca]);

        assert_eq!((main.default_port, main.rpc_port), (6909, 6908));
        assert_eq!((testnet.default_port, testnet.rpc_port), (6808, 6807));
        // Regtest overrides only the peer port and inherits testnet's RPC port.
        assert_eq!((regtest.default_port, regtest.rpc_port), (6707, 6807));

        assert_eq!(main.data_dir, "");
        assert_eq!(testnet.data_dir, "testnet");
        assert_eq!(regtest.data_dir, "regtest");
    }

    #[test]
    fn derived_profiles_override_their_thresholds() {
        let registry = registry();
        assert_eq!(registry.get(Network::Mainnet).pos_start_height, 5000);
        assert_eq!(registry.get(Network::Mainnet).last_pow_block, 9_999_999);
        assert_eq!(registry.get(Network::Testnet).pos_start_height, 500);
        assert_eq!(registry.get(Network::Testnet).last_pow_block, i32::MAX);
        assert_eq!(registry.get(Network::Regtest).pos_start_height, 500);
    }

    #[test]
    fn seed_tables_follow_the_profile() {
        let registry = registry();
        let main = registry.get(Network::Mainnet);
        assert_eq!(main.dns_seeds.len(), 1);
        assert_eq!(main.dns_seeds[0].name, "Seed01");
        assert_eq!(main.dns_seeds[0].host, "91.134.120.210");
        assert_eq!(main.fixed_seeds.len(), MAINNET_SEEDS.len());
        assert!(registry.get(Network::Testnet).dns_seeds.is_empty());
        assert!(registry.get(Network::Testnet).fixed_seeds.is_empty());
        assert!(registry.get(Network::Regtest).dns_seeds.is_empty());
        assert!(registry.get(Network::Regtest).fixed_seeds.is_empty());
    }
}
