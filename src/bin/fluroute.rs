use clap::Parser;
use fluroute::cli::{run_cli, Cli};
use fluroute::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config.log_level = "debug".to_string();
    }
    let _log_guard = init_logging_with_config(&log_config)?;

    run_cli(cli)
}
