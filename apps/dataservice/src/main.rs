use anyhow::Context;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use waves_dataservice::aliases::{AliasParams, AliasesParams};
use waves_dataservice::assets::AssetsParams;
use waves_dataservice::candles::CandlesParams;
use waves_dataservice::pairs::{DEFAULT_PAIRS_LIMIT, PairParams, PairsSearchParams};
use waves_dataservice::transactions::ExchangeTransactionsParams;
use waves_dataservice::{DataServiceClient, DataServiceConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Query the Waves data service", long_about = None)]
struct Args {
    /// Service root, overrides $WAVES_DATA_SERVICE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds, overrides $WAVES_DATA_SERVICE_TIMEOUT_SECS
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Address bound to an alias
    Alias { alias: String },

    /// Aliases of an address
    Aliases { address: String },

    /// Asset metadata by id
    Assets {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Stats of a single pair
    Pair {
        amount_asset: String,
        price_asset: String,
    },

    /// Search pairs
    Pairs {
        /// Serialized pair list, e.g. WAVES/BTC
        #[arg(long)]
        pairs: Option<String>,
        #[arg(long)]
        search_by_asset: Option<String>,
        #[arg(long, num_args = 1..)]
        search_by_assets: Option<Vec<String>>,
        #[arg(long)]
        match_exactly: Option<bool>,
        #[arg(long, default_value_t = DEFAULT_PAIRS_LIMIT)]
        limit: u32,
    },

    /// Latest exchange transactions of a pair
    Trades {
        amount_asset: String,
        price_asset: String,
        #[arg(long, default_value = "10")]
        limit: u32,
    },

    /// Candles of a pair, the last 24 hours by default
    Candles {
        amount_asset: String,
        price_asset: String,
        #[arg(long, default_value = "1h")]
        interval: String,
        /// Epoch milliseconds
        #[arg(long)]
        time_start: Option<i64>,
        /// Epoch milliseconds
        #[arg(long)]
        time_end: Option<i64>,
        /// Fetch windows longer than one response allows as several requests
        #[arg(long)]
        split: bool,
    },
}

fn config_from(args: &Args) -> anyhow::Result<DataServiceConfig> {
    let mut config = DataServiceConfig::from_env().context("Failed to read configuration")?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(client: DataServiceClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Alias { alias } => {
            let response = client
                .alias(AliasParams::builder().alias(alias).build())
                .await
                .context("Failed to fetch alias")?;
            print_json(&response)
        }

        Command::Aliases { address } => {
            let response = client
                .aliases(AliasesParams::builder().address(address).build())
                .await
                .context("Failed to fetch aliases")?;
            print_json(&response)
        }

        Command::Assets { ids } => {
            let response = client
                .assets(AssetsParams::new(ids))
                .await
                .context("Failed to fetch assets")?;
            print_json(&response)
        }

        Command::Pair {
            amount_asset,
            price_asset,
        } => {
            let response = client
                .pair(
                    PairParams::builder()
                        .amount_asset(amount_asset)
                        .price_asset(price_asset)
                        .build(),
                )
                .await
                .context("Failed to fetch pair")?;
            print_json(&response)
        }

        Command::Pairs {
            pairs,
            search_by_asset,
            search_by_assets,
            match_exactly,
            limit,
        } => {
            let params = PairsSearchParams::builder()
                .maybe_pairs(pairs)
                .maybe_search_by_asset(search_by_asset)
                .maybe_search_by_assets(search_by_assets)
                .maybe_match_exactly(match_exactly)
                .limit(limit)
                .build();
            let response = client
                .pairs_search(params)
                .await
                .context("Failed to search pairs")?;
            print_json(&response)
        }

        Command::Trades {
            amount_asset,
            price_asset,
            limit,
        } => {
            let response = client
                .transactions_exchange(
                    ExchangeTransactionsParams::builder()
                        .amount_asset(amount_asset)
                        .price_asset(price_asset)
                        .limit(limit)
                        .build(),
                )
                .await
                .context("Failed to fetch exchange transactions")?;
            print_json(&response)
        }

        Command::Candles {
            amount_asset,
            price_asset,
            interval,
            time_start,
            time_end,
            split,
        } => {
            let time_end = time_end.unwrap_or_else(|| Utc::now().timestamp_millis());
            let time_start =
                time_start.unwrap_or_else(|| time_end - Duration::hours(24).num_milliseconds());

            let params = CandlesParams::builder()
                .amount_asset(amount_asset)
                .price_asset(price_asset)
                .interval(interval)
                .time_start(time_start)
                .time_end(time_end)
                .build();

            let response = if split {
                client.candles_window(params).await
            } else {
                client.candles(params).await
            }
            .context("Failed to fetch candles")?;

            info!("Fetched {} candles", response.len());
            print_json(&response)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = config_from(&args)?;
    info!(base_url = %config.base_url, "Using data service");

    let client = DataServiceClient::new(&config).context("Failed to build data service client")?;
    run(client, args.command).await
}
