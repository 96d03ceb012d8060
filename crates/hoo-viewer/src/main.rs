mod clear;
mod cli;

use anyhow::Result;
use clap::Parser;

use hoo_host::HostConfig;
use hoo_host::logging::{LoggingConfig, init_logging};
use hoo_host::window::Runtime;

use crate::clear::ClearModule;
use crate::cli::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    init_logging(LoggingConfig {
        env_filter: args.log_level.clone(),
        ..Default::default()
    });

    let mut config = HostConfig::default();
    args.apply_cli_overrides(&mut config);

    log::info!(
        "binding `{}` ({}, {:?} construction)",
        config.bootstrap.surface_id,
        config.bootstrap.context_type,
        config.bootstrap.construction
    );

    Runtime::run(config, ClearModule::new(args.clear_settings()))
}
