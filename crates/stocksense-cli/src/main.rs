mod market;
mod watchlist;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use stocksense_advisor::{Advisor, AdvisorSettings, Generator};
use stocksense_core::AppConfig;
use stocksense_market::{MarketData, ProviderConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_NEWS_LIMIT: usize = 5;
const DEFAULT_MARKET_NEWS_LIMIT: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "stocksense-cli")]
#[command(about = "StockSense command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full analysis pipeline for one symbol
    Analyze {
        symbol: String,

        /// Print the analysis as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show merged recent news for one symbol
    News {
        symbol: String,

        #[arg(long, default_value_t = DEFAULT_NEWS_LIMIT)]
        limit: usize,
    },
    /// Show general market news from the last 24 hours
    MarketNews {
        #[arg(long, default_value_t = DEFAULT_MARKET_NEWS_LIMIT)]
        limit: usize,
    },
    /// Show current price and daily change for one or more symbols
    Price {
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Ask the educational chatbot a question
    Chat { message: String },
    /// Manage starred stocks
    Watchlist {
        #[command(subcommand)]
        command: WatchlistCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum WatchlistCommands {
    /// List starred stocks, newest first
    List,
    /// Star a symbol
    Add { symbol: String },
    /// Unstar a symbol
    Remove { symbol: String },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

fn build_advisor(config: &AppConfig) -> anyhow::Result<Advisor> {
    let market = MarketData::new(&ProviderConfig::from_app_config(config))?;
    let generator = Generator::from_app_config(config)?;
    Ok(Advisor::new(
        Arc::new(market),
        Arc::new(generator),
        AdvisorSettings::from_app_config(config),
    ))
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool_config = stocksense_db::PoolConfig::from_app_config(config);
    let pool = stocksense_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = stocksense_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze { symbol, json }) => {
            let advisor = build_advisor(&config)?;
            market::run_analyze(&advisor, &symbol, json).await?;
        }
        Some(Commands::News { symbol, limit }) => {
            let advisor = build_advisor(&config)?;
            market::run_news(advisor.feed().as_ref(), &symbol, limit).await?;
        }
        Some(Commands::MarketNews { limit }) => {
            let advisor = build_advisor(&config)?;
            market::run_market_news(advisor.feed().as_ref(), limit).await?;
        }
        Some(Commands::Price { symbols }) => {
            let advisor = build_advisor(&config)?;
            market::run_prices(advisor.feed().as_ref(), &symbols).await?;
        }
        Some(Commands::Chat { message }) => {
            let advisor = build_advisor(&config)?;
            market::run_chat(&advisor, &message).await?;
        }
        Some(Commands::Watchlist { command }) => {
            let pool = connect(&config).await?;
            stocksense_db::run_migrations(&pool).await?;
            match command {
                WatchlistCommands::List => watchlist::run_watchlist_list(&pool).await?,
                WatchlistCommands::Add { symbol } => {
                    watchlist::run_watchlist_add(&pool, &symbol).await?;
                }
                WatchlistCommands::Remove { symbol } => {
                    watchlist::run_watchlist_remove(&pool, &symbol).await?;
                }
            }
        }
        Some(Commands::Db { command }) => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    stocksense_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = stocksense_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("stocksense-cli ready; run with --help for commands"),
    }

    Ok(())
}
