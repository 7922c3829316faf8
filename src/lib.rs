pub mod chainparams;
pub mod compact;
pub mod genesis;
pub mod hashes;
pub mod primitives;
pub mod seeds;
pub mod serialize;

pub use chainparams::{
    params, publish, ChainParams, Network, ParamsRegistry, ParamsStore, SelectionError,
};
pub use genesis::GenesisError;
