mod config;
mod engine;
mod loader;
mod module;
mod render;
mod report;
mod util;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::EngineConfig;
use engine::Engine;
use loader::HttpFetcher;
use module::ModuleRegistry;
use report::{LogReporter, Reporter};

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
struct CLIArguments {
    /// Engine configuration file.
    #[arg(short, long, default_value = "./engine.toml")]
    config: String,

    /// Override the content root.
    #[arg(short, long)]
    root: Option<String>,

    /// Override the frame output path.
    #[arg(short, long)]
    output: Option<String>,

    /// Log debug detail.
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CLIArguments::parse();

    let mut config = EngineConfig::load(Path::new(&args.config)).await?;

    if let Some(root) = args.root {
        config.root = PathBuf::from(root);
    }
    if let Some(output) = args.output {
        config.output = PathBuf::from(output);
    }
    config.debug = config.debug || args.debug;

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(
        "Booting engine from `{}`, writing frame to `{}`.",
        config.root.display(),
        config.output.display()
    );

    let registry = crate::fatal_if_err!(ModuleRegistry::with_builtins();
        "Failed to register builtin engine modules.");
    let fetcher = HttpFetcher::new(config.root.clone());
    let reporter: Reporter = Arc::new(LogReporter);

    let mut engine = Engine::new(config, registry, fetcher, reporter);

    if let Err(err) = engine.boot().await {
        crate::fatal!("Engine boot failed: {:#}", err);
    }

    engine.tick(0.0);

    Ok(())
}
