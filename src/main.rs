//! Binary entrypoint for the bot.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = reddigram_bot::run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
