use clap::Parser;
use irc_logger::{IrcConfig, LoggerBot};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "irc-logger")]
#[command(about = "Log public messages from an IRC channel")]
struct Cli {
    #[command(flatten)]
    config: IrcConfig,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut backoff = cli.config.backoff();
    let mut bot = LoggerBot::new(cli.config);

    loop {
        match bot.connect_and_run().await {
            Ok(()) => backoff.reset(),
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Giving up");
                println!("An error occurred: {e}");
                std::process::exit(1);
            }
            Err(e) => {
                warn!(error = %e, "Connection failed");
                println!("An error occurred: {e}");
            }
        }

        let delay = backoff.next_delay();
        info!(delay_secs = delay.as_secs(), "Reconnecting");
        tokio::time::sleep(delay).await;
    }
}
