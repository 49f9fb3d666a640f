use anyhow::Result;
use clap::Parser;
use food_classifier::client::{RelayClient, Session, encode_image_file};
use std::{path::PathBuf, time::Duration};

/// Classify a food photo through a running relay and print per-100g values.
#[derive(Parser, Debug)]
#[command(name = "food-classify", version)]
struct Args {
    /// Image file to classify (jpeg, png, webp, gif)
    image: PathBuf,

    /// Price per kilogram, used to estimate the cost of 100 g
    #[arg(long, default_value = "")]
    price: String,

    /// Base URL of the relay
    #[arg(long, env = "RELAY_URL", default_value = "http://localhost:5001")]
    relay: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 90)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let image = encode_image_file(&args.image).await?;
    let client = RelayClient::new(&args.relay, Duration::from_secs(args.timeout))?;

    let mut session = Session::new();
    session.set_price(args.price);
    session.record(client.classify(image).await);

    print!("{}", session.render());

    if session.failure().is_some() {
        std::process::exit(2);
    }
    Ok(())
}
