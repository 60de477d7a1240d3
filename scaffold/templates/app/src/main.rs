//! <Package Name> entry point.

use clap::Parser;

#[derive(Parser)]
#[command(name = "<package-name>", about = "<Package Name>")]
struct Cli {
    /// Increase output verbosity.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)))
        .init();

    tracing::info!("<package_name> starting");
    Ok(())
}
