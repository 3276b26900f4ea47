// CLI for minting NFTs from a handle's image posts

use anyhow::{Context, Result};
use clap::Parser;
use nft_sdk::RpcHelper;
use solana_sdk::signature::Signer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tweet_minter::{report, MinterConfig, NftStorageClient, Pipeline, UreqHttp};

#[derive(Parser, Debug)]
#[command(name = "tweet-minter")]
#[command(about = "Mint one-of-one NFTs from a handle's image posts", long_about = None)]
#[command(version)]
struct Cli {
    /// X username to scrape image posts from
    #[arg(long)]
    user: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // Fails before any network access when the environment is incomplete
    let config = MinterConfig::from_env().context("Failed to load configuration")?;

    info!(rpc_url = %config.rpc_url, payer = %config.payer.pubkey(), "configuration loaded");

    let http = UreqHttp::new();
    let store = NftStorageClient::new(&config.nft_storage_key);
    let rpc = RpcHelper::new(&config.rpc_url);

    report::info(&format!("Scraping image posts from @{}", cli.user));

    let minted = Pipeline::new(&config, &http, &http, &store, &rpc)
        .run(&cli.user)
        .with_context(|| format!("Minting posts of @{} failed", cli.user))?;

    info!(count = minted.len(), "run complete");
    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tweet_minter=info,nft_sdk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
