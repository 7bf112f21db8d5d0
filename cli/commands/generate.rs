use anyhow::{Context, Result};
use std::path::Path;

use crate::cli_args::GenerateArgs;
use crate::load_config_for_command;
use crate::output;
use crate::watch;
use routegen_core::{self as core, Config};

pub fn handle_generate_command(args: GenerateArgs, quiet: bool, verbose: u8) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(
        &project_root,
        &args.project_config,
        Some(&args.generation),
        args.watch_delay.as_ref(),
    );

    if args.watch {
        return watch::run_watch_mode(&project_root, config, &args, quiet, verbose);
    }

    trigger_generation(&project_root, &config, args.stdout, quiet, verbose)
}

/// One full scan -> emit -> write cycle.
///
/// Called by both the one-shot command and the watch loop; any failure
/// aborts the cycle without leaving a partial output file behind.
pub fn trigger_generation(
    project_root: &Path,
    config: &Config,
    to_stdout: bool,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let input = config.resolved_input(project_root);
    log::info!("Starting route generation for: {}", input.display());

    let report = core::build_routes_module(project_root, config)
        .context("Failed to generate routes module")?;

    if to_stdout {
        output::write_to_stdout(&report.code)?;
        return Ok(());
    }

    let output_path = config.resolved_output(project_root);
    output::write_generated_file(&output_path, &report.code)?;
    if !quiet {
        output::print_generation_success(&report, &input, &output_path, verbose);
    }
    Ok(())
}
