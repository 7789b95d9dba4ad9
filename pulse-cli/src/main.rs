use std::io::Write;

use pulse_cli::{CliError, parse_args, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_cli().await {
        eprintln!("pulse error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), CliError> {
    let invocation = parse_args(std::env::args().skip(1))?;
    let mut out = run(invocation, std::io::stdout()).await?;
    out.flush()?;
    Ok(())
}
