mod config;
mod error;
mod notification;
mod poller;
mod practicum_client;
mod status;
#[cfg(test)]
mod test_support;
mod validation;

use crate::config::ApplicationConfig;
use crate::error::Result;
use crate::notification::TelegramClient;
use crate::poller::Poller;
use crate::practicum_client::PracticumClient;
use clap::{Arg, ArgAction, Command};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("homework_notifier=info")),
        )
        .init();
}

async fn start(app_config: ApplicationConfig, once: bool) -> Result<()> {
    let credentials = app_config.check_tokens()?;
    let timeout = Duration::from_secs(app_config.request_timeout_secs);
    let api = PracticumClient::new(
        app_config.endpoint,
        credentials.practicum_token,
        timeout,
    )?;
    let notifier = TelegramClient::new(
        &app_config.telegram_api_url,
        &credentials.telegram_token,
        timeout,
    )?;
    let mut poller = Poller::new(
        api,
        notifier,
        credentials.telegram_chat_id,
        Duration::from_secs(app_config.retry_secs),
    );

    if once {
        let outcome = poller.run_cycle().await;
        info!("single cycle finished: {:?}", outcome);
    } else {
        poller.run().await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = Command::new("Homework Status Notifier")
        .about("Forwards homework review status changes to a Telegram chat")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file"),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .action(ArgAction::SetTrue)
                .help("Runs a single polling cycle and exits"),
        )
        .get_matches();

    dotenvy::dotenv().ok();
    init_logging();
    info!("homework notifier starting");

    let config_path = matches.get_one::<String>("config").map(Path::new);
    let result = match config::load_config(config_path) {
        Ok(app_config) => start(app_config, matches.get_flag("once")).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
