use ezyvet::{cli::execute_command, commands::create_cli_commands, param_utils::GlobalOptions};
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands();
    let options = GlobalOptions::from_matches(&matches);

    // Initialize the logging subsystem; RUST_LOG overrides the flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("error,{}={}", env!("CARGO_CRATE_NAME"), options.log_level()))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(&matches).await {
        eprintln!("ERROR: {}", e);
        ::std::process::exit(e.exit_code().code());
    }
}
