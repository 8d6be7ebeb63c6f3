use std::path::PathBuf;

use clap::Parser;

use bankboot_rs::deploy::{plan, Deployer, Manifest};
use bankboot_rs::error::BootResult;
use bankboot_rs::market::{runlog, RunLog, Sequencer, ServiceAddresses};
use bankboot_rs::netenv::{self, DeployEnv};
use bankboot_rs::rpc::{NodeClient, RemoteContract};
use bankboot_rs::telemetry;

/// Bootstraps the pawn-bank protocol: deploys the contract stack in link
/// order, writes the address manifest, then configures every collateral
/// market for the chosen network.
#[derive(Debug, Parser)]
#[command(name = "bankboot", version)]
struct Args {
    /// Target network; fork suffixes are accepted (mainnet, mainnet-fork, test)
    network: String,

    /// Per-network environment file
    #[arg(long, default_value = "deployenv.json")]
    env_file: PathBuf,

    /// Node RPC endpoint
    #[arg(long, env = "BANKBOOT_RPC_URL", default_value = "http://127.0.0.1:7545")]
    rpc_url: String,

    /// Directory for the manifest and run log artifacts
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env
    telemetry::init_tracing("info");

    let args = Args::parse();
    if let Err(e) = run(&args).await {
        tracing::error!(error = %e, "bootstrap failed");
        return Err(e.into());
    }
    Ok(())
}

async fn run(args: &Args) -> BootResult<()> {
    let client = NodeClient::new(&args.rpc_url);
    deploy_stack(args, &client).await?;
    init_markets(args, &client).await?;
    Ok(())
}

/// Phase 1: resolve the network, deploy and link the whole stack, and persist
/// the manifest. The manifest is only written after every component deployed.
async fn deploy_stack(args: &Args, client: &NodeClient) -> BootResult<()> {
    let network = netenv::resolve_network(&args.network)?;
    tracing::info!(raw = %args.network, network, "phase 1: deploying contract stack");

    // The environment must exist before we spend a single deployment call.
    DeployEnv::load(&args.env_file)?.for_network(network)?;

    let manifest = Deployer::new(client).run(plan::BANK_PLAN).await?;
    let path = manifest.write(&args.out_dir, network)?;
    tracing::info!(manifest = %path.display(), components = manifest.len(), "manifest written");
    Ok(())
}

/// Phase 2: resolve the network again, load phase 1's manifest, and run the
/// market initialization sequence.
async fn init_markets(args: &Args, client: &NodeClient) -> BootResult<()> {
    let network = netenv::resolve_network(&args.network)?;
    tracing::info!(network, "phase 2: initializing collateral markets");

    let envs = DeployEnv::load(&args.env_file)?;
    let env = envs.for_network(network)?;
    let manifest = Manifest::read(&args.out_dir, network)?;

    let addrs = ServiceAddresses {
        interest_rate_model: manifest
            .require(plan::INTEREST_RATE_MODEL, "market init")?
            .to_string(),
        price_oracles: manifest.require(plan::PRICE_ORACLES, "market init")?.to_string(),
        pool_pawn: manifest.require(plan::POOL_PAWN, "market init")?.to_string(),
    };
    let rate = RemoteContract::new(client, &addrs.interest_rate_model);
    let oracle = RemoteContract::new(client, &addrs.price_oracles);
    let registry = RemoteContract::new(client, &addrs.pool_pawn);

    let mut log = RunLog::create(&args.out_dir.join(runlog::RUN_LOG_FILE))?;
    Sequencer::new(&rate, &oracle, &registry, addrs)
        .run(network, env, &mut log)
        .await?;

    tracing::info!(tokens = env.tokens.len(), "all collateral markets initialized");
    Ok(())
}
