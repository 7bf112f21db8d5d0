use anyhow::{Context, Result};

use crate::cli_args::InspectArgs;
use crate::load_config_for_command;
use crate::output;
use routegen_core::{self as core, Config};

/// Scan the configured route directory and print the tree model as JSON,
/// using the same `$route`/`$param` metadata keys the structure literals
/// carry.
pub fn handle_inspect_command(args: &InspectArgs) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;

    let config = load_config_for_command(
        &project_root,
        &args.project_config,
        Some(&args.generation),
        None,
    );

    let input = config.resolved_input(&project_root);
    let tree = core::scan_route_tree(&input)
        .with_context(|| format!("Failed to scan {}", input.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    }
    .context("Failed to serialize route tree")?;

    output::write_to_stdout(&json)
}
