//! Handlers for the long-running `run`, `serve` and `bot` commands.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::output;
use crate::adapter::inbound::http;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::{build_bot_control, build_tracker};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::race::RaceTracker;

/// Start the API and/or the bot and run until Ctrl-C.
///
/// A missing bot token disables the bot under `run`; under `bot` it is an
/// error since nothing would be left running.
///
/// # Errors
/// Returns an error if the API would be served over the remote store, the
/// store cannot be built or the API cannot bind.
pub async fn execute(config: &Config, api: bool, bot: bool) -> Result<()> {
    if api {
        config.check_api_backend()?;
    }
    let bot = bot && bot_available(config, api)?;
    let tracker = build_tracker(config)?;

    if !output::is_quiet() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Store", tracker.store_name());
        if api {
            output::field("API", output::highlight(config.server.socket_addr()?));
        }
        output::field("Bot", if bot { "enabled" } else { "disabled" });
        println!();
    }

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
        let _ = stop_tx.send(true);
    });

    let api_task = async {
        if api {
            http::serve(&config.server, tracker.clone(), stopped(stop_rx.clone())).await
        } else {
            Ok(())
        }
    };
    let bot_task = async {
        if bot {
            run_bot(config, tracker.clone(), stopped(stop_rx.clone())).await
        } else {
            Ok(())
        }
    };

    tokio::try_join!(api_task, bot_task)?;
    info!("ultratrack stopped");
    Ok(())
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

#[allow(clippy::result_large_err)]
fn bot_available(config: &Config, api: bool) -> Result<bool> {
    if !cfg!(feature = "telegram") {
        if !api {
            return Err(ConfigError::InvalidValue {
                field: "telegram",
                reason: "built without the `telegram` feature".to_string(),
            }
            .into());
        }
        warn!("Built without the `telegram` feature; bot disabled");
        return Ok(false);
    }
    if config.telegram.token.is_some() {
        return Ok(true);
    }
    if !api {
        return Err(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN",
        }
        .into());
    }
    warn!("TELEGRAM_BOT_TOKEN not set; bot disabled");
    output::warning("TELEGRAM_BOT_TOKEN not set, running the API only");
    Ok(false)
}

#[cfg(feature = "telegram")]
async fn run_bot(
    config: &Config,
    tracker: Arc<dyn RaceTracker>,
    shutdown: impl std::future::Future<Output = ()> + Send,
) -> Result<()> {
    use crate::adapter::inbound::telegram::runner;

    let Some(token) = config.telegram.token.as_deref() else {
        return Ok(());
    };
    let control = Arc::new(build_bot_control(config, tracker)?);
    runner::run_bot(
        token,
        control,
        config.telegram.drop_pending_updates,
        shutdown,
    )
    .await;
    Ok(())
}

#[cfg(not(feature = "telegram"))]
async fn run_bot(
    config: &Config,
    tracker: Arc<dyn RaceTracker>,
    shutdown: impl std::future::Future<Output = ()> + Send,
) -> Result<()> {
    let _ = build_bot_control(config, tracker)?;
    shutdown.await;
    Ok(())
}
