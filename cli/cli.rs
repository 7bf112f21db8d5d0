mod cli_args;
mod commands;
mod output;
mod watch;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use std::path::Path;
use std::process;

use cli_args::{Cli, Commands, GenerationOpts, ProjectConfigOpts};
use routegen_core::{AppError, Config};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;
    let verbose = cli_args.verbose;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet, verbose) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let core_err = e.downcast_ref::<AppError>();
            let exit_code = match core_err {
                Some(AppError::Config(_)) => 1,
                Some(AppError::TomlParse(_)) => 1,
                Some(AppError::NotFound { .. }) => 2,
                Some(AppError::Io(_)) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::DirCreation { .. }) => 2,
                Some(AppError::DirRead { .. }) => 2,
                Some(AppError::Emit(_)) => 3,
                Some(AppError::InvalidArgument(_)) => 5,
                Some(AppError::DurationParse(_)) => 5,
                Some(_) => 1,
                None => 1,
            };

            if !quiet || exit_code == 1 || exit_code == 5 {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            } else {
                log::error!("Application failed: {:#}", e);
            }

            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool, verbose: u8) -> Result<()> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
        }
        Some(command) => match command {
            Commands::Generate(args) => {
                log::debug!("Executing 'generate' command...");
                commands::generate::handle_generate_command(args, quiet, verbose)?;
            }
            Commands::Init(args) => {
                log::debug!("Executing 'init' command...");
                commands::init::handle_init_command(&args, quiet)?;
            }
            Commands::Inspect(args) => {
                log::debug!("Executing 'inspect' command...");
                commands::inspect::handle_inspect_command(&args)?;
            }
            Commands::List(args) => {
                log::debug!("Executing 'list' command...");
                commands::list::handle_list_command(&args, quiet)?;
            }
            Commands::Completion(args) => {
                log::debug!("Executing 'completion' command...");
                commands::completion::handle_completion_command(&args, quiet)?;
            }
        },
    }
    Ok(())
}

/// Load the effective configuration for a command.
///
/// A missing default config is normal; a malformed or unreadable one is
/// reported as a warning and the defaults are used instead — config
/// problems never abort a run, CLI overrides still apply on top.
pub fn load_config_for_command(
    project_root: &Path,
    project_opts: &ProjectConfigOpts,
    generation_opts: Option<&GenerationOpts>,
    watch_delay: Option<&String>,
) -> Config {
    let loaded = Config::resolve_config_path(
        project_root,
        project_opts.config_file.as_ref(),
        project_opts.disable_config_file,
    )
    .and_then(|path| match path {
        Some(path) => Config::load_from_path(&path).map(Some),
        None => Ok(None),
    });

    let mut config = match loaded {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("Could not load config file, using defaults: {e}");
            Config::default()
        }
    };

    if let Some(generation) = generation_opts {
        config = merge_config_with_cli_overrides(config, generation);
    }
    if let Some(delay) = watch_delay {
        config.watch.delay = delay.clone();
    }
    config
}

fn merge_config_with_cli_overrides(mut config: Config, opts: &GenerationOpts) -> Config {
    log::trace!("Applying CLI overrides to config...");
    if let Some(input) = &opts.input {
        config.input = input.clone();
    }
    if let Some(output) = &opts.output {
        config.output = output.clone();
    }
    if let Some(prefix) = &opts.prefix {
        config.base_prefix = prefix.clone();
    }
    if let Some(name) = &opts.routes_name {
        config.routes_name = name.clone();
    }
    log::trace!("Config after CLI overrides: {:?}", config);
    config
}
