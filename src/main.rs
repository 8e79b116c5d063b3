use dotenv::dotenv;
use sonarbot::Game;
use sonarbot::infra::{BotConfig, DefaultObserver, RefereeConnection, ReplayFile};
use std::env;
use tokio::io::{self, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sonarbot=debug,info"));

    // stdout carries the referee protocol, so logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = BotConfig::from_env()?;
    let replays_folder = env::var("SONAR_REPLAYS_FOLDER").ok();

    let replay_file = match replays_folder {
        Some(folder) => match ReplayFile::new(&folder) {
            Ok(file) => {
                tracing::info!("Recording transcript to {}", file.path().display());
                Some(file)
            }
            Err(e) => {
                tracing::warn!("Cannot record transcript in {}: {}", folder, e);
                None
            }
        },
        None => None,
    };

    let connection = RefereeConnection::new(BufReader::new(io::stdin()), io::stdout(), replay_file);
    let mut game = Game::new(connection, DefaultObserver, config);

    if let Err(e) = game.run().await {
        tracing::error!("Game aborted: {}", e);
        return Err(e);
    }

    Ok(())
}
