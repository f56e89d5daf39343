use clap::Parser;
use dunetool::apis::dune::{self, ApiKey, DuneConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod execute;
mod usage;

#[derive(Parser, Debug)]
struct CliArgs {
    /// The command to perform.
    #[command(subcommand)]
    command: Subcommand,
}

/// Connection settings shared by every subcommand.
#[derive(clap::Args, Debug)]
pub struct DuneArgs {
    /// The Dune API key. If missing, requests are still sent, with an empty
    /// key.
    #[arg(long, env = dune::API_KEY_ENV_VAR, hide_env_values = true)]
    api_key: Option<String>,

    /// The base URL of the Dune API.
    #[arg(long, env = "DUNE_API_BASE_URL", default_value = dune::DEFAULT_BASE_URL)]
    base_url: String,
}

impl DuneArgs {
    pub fn into_config(self) -> DuneConfig {
        let DuneArgs { api_key, base_url } = self;
        DuneConfig::new(ApiKey::new(api_key), base_url)
    }
}

fn main() {
    // pick up the API key from a local .env file, if there is one
    dotenvy::dotenv().ok();

    // set up tracing; stdout is reserved for the report itself
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let CliArgs { command } = CliArgs::parse();

    let result = match command {
        Subcommand::Execute(execute_args) => execute::main(execute_args),
        Subcommand::Usage(usage_args) => usage::main(usage_args),
    };
    if let Err(err) = result {
        error!("error during execution: {:#}", err);
        std::process::exit(1);
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Subcommand {
    /// Trigger execution of every tracked Dune query.
    Execute(execute::Args),
    /// Report API usage from the fixed start date to a chosen end date.
    Usage(usage::Args),
}
