use clap::{Parser, Subcommand};

use fitcomp_aggregator::{Aggregator, CompareRequest};

#[derive(Debug, Parser)]
#[command(name = "fitcomp-cli")]
#[command(about = "fitcomp command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every enabled provider and print the merged product list.
    Search {
        query: String,
        #[arg(long, default_value_t = 24)]
        limit: usize,
    },
    /// Aggregate offers for one product and print the comparison payload.
    Compare {
        query: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = fitcomp_core::load_app_config()?;
    let aggregator = Aggregator::from_settings(&config.provider_settings());

    match cli.command {
        Commands::Search { query, limit } => {
            let products = aggregator.search_products(&query, limit).await?;
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
        Commands::Compare {
            query,
            image,
            brand,
            url,
        } => {
            let comparison = aggregator
                .compare(&CompareRequest {
                    query,
                    image,
                    brand,
                    product_url: url,
                })
                .await;
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
    }

    Ok(())
}
