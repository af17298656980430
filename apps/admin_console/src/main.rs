use std::{path::PathBuf, sync::Arc};

use admin_core::{
    DirectoryError, HttpDirectory, RemoteDirectory, UnavailableDirectory, WorkflowCoordinator,
};
use anyhow::{anyhow, bail, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod command;
mod config;
mod console;
mod render;
mod repl;

use config::load_settings;
use console::Console;
use repl::Repl;

#[derive(Parser, Debug)]
#[command(about = "Administrator console for the project-tracking service")]
struct Args {
    /// Base URL of the project-tracking facade.
    #[arg(long)]
    service_url: Option<String>,
    /// Config file; defaults to ./admin_console.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(service_url) = args.service_url {
        settings.service_url = service_url;
    }

    let options = settings.directory_options();
    let directory: Arc<dyn RemoteDirectory> = match HttpDirectory::connect(&options).await {
        Ok(directory) => {
            info!(service_url = directory.service_url(), "console: session ready");
            Arc::new(directory)
        }
        Err(DirectoryError::InvalidEndpoint(reason)) => bail!("invalid service url: {reason}"),
        Err(err) => {
            warn!(service_url = %options.service_url, %err, "console: facade unavailable");
            println!("Service unavailable: {err}");
            Arc::new(UnavailableDirectory::new(err.to_string()))
        }
    };

    let console = Console::new(WorkflowCoordinator::new(directory));
    let mut repl = Repl::new(console, settings.history_file.clone())
        .map_err(|err| anyhow!("failed to start line editor: {err}"))?;
    repl.run()
        .await
        .map_err(|err| anyhow!("line editor failed: {err}"))?;

    info!("console: exiting");
    Ok(())
}
