use clap::Parser;
use ultratrack::adapter::inbound::cli::command::{Cli, Commands};
use ultratrack::adapter::inbound::cli::{output, run, status};
use ultratrack::error::Result;
use ultratrack::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(output::OutputConfig::new(cli.json, cli.quiet), cli.color);

    if let Err(e) = dispatch(&cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(cli: &Cli) -> Result<()> {
    let config = Config::resolve(&cli.config)?;

    match cli.command.components() {
        Some((api, bot)) => {
            config.init_logging();
            config.warn_on_open_defaults();
            run::execute(&config, api, bot).await
        }
        None => status::execute(&config).await,
    }
}
