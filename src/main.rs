use clap::Parser;
use tracing_subscriber::EnvFilter;

mod analysis;
mod cli;
mod config;
mod core;
mod folding;
mod parsing;
mod pipeline;
mod topology;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("knotfold=debug,info")
    } else {
        EnvFilter::new("knotfold=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Fold(args) => {
            cli::fold::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Predict(args) => {
            cli::predict::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Scan(args) => {
            cli::scan::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
