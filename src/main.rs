use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod parsing;
mod pipeline;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("rgsam=debug,info")
    } else {
        EnvFilter::new("rgsam=warn")
    };

    // stdout may carry SAM output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Collect(args) => {
            cli::collect::run(args, cli.verbose)?;
        }
        cli::Commands::Tag(args) => {
            cli::tag::run(args, cli.verbose)?;
        }
        cli::Commands::Qnames => {
            cli::qnames::run()?;
        }
        cli::Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
