use clap::Parser;
use log::info;
use server::config::{ServerConfig, MAX_GUESSES};
use server::network::Server;
use shared::DEFAULT_PORT;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Word list with one candidate word per line
    dictionary: PathBuf,

    /// Address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Guesses allowed per round
    #[arg(short, long, default_value_t = MAX_GUESSES)]
    guesses: u32,
}

/// Parses arguments, loads the word list and serves until interrupted.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        max_guesses: args.guesses.max(1),
        dictionary: args.dictionary,
    };

    let server = Server::from_config(&config).await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
