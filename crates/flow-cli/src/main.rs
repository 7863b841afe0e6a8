//! FlowDistributor CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use flow_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use flow_cli::commands::{run_cut, run_ledger, run_query, run_split};
use flow_cli::logging::{LogConfig, LogFormat, init_logging};
use flow_cli::summary::{print_cut, print_ledger, print_query, print_query_json, print_split};
use flow_core::FlowConfig;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = match FlowConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    let color = cli.color.color;
    let result = match &cli.command {
        Command::Query(args) => run_query(args, &config).and_then(|report| {
            if args.json {
                print_query_json(&report)
            } else {
                print_query(&report, color);
                Ok(())
            }
        }),
        Command::Split(args) => run_split(args, &config).map(|report| print_split(&report, color)),
        Command::Cut(args) => run_cut(args).map(|cut| print_cut(&cut, color)),
        Command::Ledger(args) => run_ledger(args).map(|report| print_ledger(&report, color)),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
