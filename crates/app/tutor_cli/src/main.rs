// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::time::Duration;

use clap::Parser;
use cli::{Cli, Commands};
use tutor_client::{ClientConfig, TutorClient};

mod chat;
mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let _logger = logging::init()?;

    let args = Cli::parse();

    let client = TutorClient::new(ClientConfig {
        base_url: args.base_url,
        reveal_delay: Duration::from_millis(args.delay_ms),
    });

    match args.command {
        Some(Commands::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Ask { question, json }) => chat::ask_once(&client, question, json).await?,
        Some(Commands::Chat) | None => chat::interactive(&client).await?,
    }

    Ok(())
}
