use log::{error, info};

use chainparams::hashes::display_hex;
use chainparams::{publish, ParamsRegistry, ParamsStore};

fn has_bool_arg(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let testnet = has_bool_arg(&args, "-testnet");
    let regtest = has_bool_arg(&args, "-regtest");

    // A genesis that does not verify means this binary cannot interoperate
    // with any peer; refuse to start.
    let registry = match ParamsRegistry::build() {
        Ok(registry) => registry,
        Err(err) => {
            error!("chain parameter construction failed: {err}");
            std::process::exit(1);
        }
    };

    let mut store = ParamsStore::new(registry);
    if let Err(err) = store.select_params_from_flags(testnet, regtest) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    if publish(store).is_err() {
        error!("chain parameters already published");
        std::process::exit(1);
    }

    let params = chainparams::params();
    info!("network: {}", params.network.name());
    info!("message start: {}", hex::encode(params.message_start));
    info!(
        "ports: p2p {} rpc {}",
        params.default_port, params.rpc_port
    );
    info!("genesis: {}", display_hex(&params.genesis_hash));
    info!(
        "data dir: {:?}, dns seeds: {}, fixed seeds: {}",
        params.data_dir,
        params.dns_seeds.len(),
        params.fixed_seeds.len()
    );
}
