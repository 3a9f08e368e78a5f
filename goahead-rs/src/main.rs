//! goahead - ask the go-ahead service whether this node may restart
//!
//! Prints `true` or `false` and exits 0 when a restart is permitted, 1 when
//! it is not, and 2 when the arguments or configuration are unusable.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::error;

use goahead::{
    parse_duration, DecisionCombiner, Diagnostics, GoAheadConfig, Identity, LogDiagnostics,
    PollConfig, Poller,
};

#[derive(Parser, Debug)]
#[command(name = "goahead")]
#[command(about = "Ask the go-ahead service whether this node may restart", long_about = None)]
#[command(version)]
struct Cli {
    /// Fully qualified domain name of the node asking
    #[arg(long)]
    fqdn: String,

    /// Uptime of the node, forwarded to the service as given
    #[arg(long)]
    uptime: String,

    /// Base URL of the go-ahead service; without it all settings come from GOAHEAD_*
    #[arg(long)]
    url: Option<String>,

    /// PEM bundle with the CA certificates used to verify the service
    #[arg(long = "ca-file", env = "GOAHEAD_URL_CA_FILE")]
    ca_file: Option<PathBuf>,

    /// Request timeout (e.g. 30, 30s, 500ms)
    #[arg(long, env = "GOAHEAD_TIMEOUT", value_parser = duration_arg)]
    timeout: Option<Duration>,

    /// Extra attempts when the restart is not permitted yet
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Wait between attempts; the service's ask_again_in hint can stretch it
    #[arg(long, default_value = "60s", value_parser = duration_arg)]
    delay: Duration,
}

impl Cli {
    fn config(&self) -> Result<GoAheadConfig> {
        let mut config = match &self.url {
            Some(url) => GoAheadConfig::new(url.clone()),
            None => GoAheadConfig::from_env().context("No --url given")?,
        };

        if self.ca_file.is_some() {
            config = config.with_ca_file(self.ca_file.clone());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    fn poll_config(&self) -> PollConfig {
        PollConfig {
            max_retries: self.retries,
            delay: self.delay,
            ..PollConfig::default()
        }
    }
}

fn duration_arg(raw: &str) -> std::result::Result<Duration, String> {
    parse_duration(raw).ok_or_else(|| format!("invalid duration: {}", raw))
}

async fn run(cli: Cli) -> Result<bool> {
    if cli.fqdn.trim().is_empty() {
        bail!("--fqdn must not be empty");
    }

    let config = cli.config()?;
    let diagnostics: Arc<dyn Diagnostics> = Arc::new(LogDiagnostics);
    let combiner = DecisionCombiner::from_config(&config, diagnostics)
        .context("Failed to set up the go-ahead client")?;

    let identity = Identity::new(cli.fqdn.clone(), cli.uptime.clone());
    let poller = Poller::new(cli.poll_config());

    let verdict = poller.poll(|| combiner.evaluate(&identity)).await;
    Ok(verdict.granted)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {
            println!("true");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("false");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
