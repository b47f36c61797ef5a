// ---------------------------------------------------------------------
// name: Token
// type: Command line application.
// desc: Requests a bearer token from the dispatch api and prints it,
//       handy for poking at the order endpoint by hand.
// ---------------------------------------------------------------------

use anyhow::Context;
use booking_assistant::{token, Config};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "token", about = "Print a dispatch api bearer token")]
struct Args {
    /// Token lifetime in seconds, overrides DISPATCH_TOKEN_TTL
    #[arg(long)]
    ttl: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if args.ttl.is_some() {
        config.token_ttl = args.ttl;
    }

    let client = booking_assistant::client(config.timeout)?;
    let token = token::acquire(&client, &config).context("Unable to get a token")?;
    println!("{}", token);
    Ok(())
}
