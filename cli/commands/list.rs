use anyhow::{Context, Result};
use colored::*;

use crate::cli_args::ListArgs;
use crate::load_config_for_command;
use crate::output::{self, RouteRow};
use routegen_core::{self as core, Config, RouteNode, join_segment, normalize_prefix};

pub fn handle_list_command(args: &ListArgs, quiet: bool) -> Result<()> {
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

    let rows = collect_route_rows(&tree, &config.base_prefix);
    if rows.is_empty() {
        if !quiet {
            println!("No routes found under {}.", input.display());
        }
        return Ok(());
    }

    output::print_routes_table(&rows);
    if !quiet {
        println!(
            "{} route(s), {} parameter(s).",
            rows.len().to_string().cyan(),
            tree.param_count().to_string().cyan()
        );
    }
    Ok(())
}

/// Flatten the tree into displayable rows, dynamic segments shown in their
/// `[name]` input convention.
fn collect_route_rows(tree: &RouteNode, prefix: &str) -> Vec<RouteRow> {
    let mut rows = Vec::new();
    let base = normalize_prefix(prefix);
    walk(tree, &base, &[], &mut rows);
    rows
}

fn walk(node: &RouteNode, path: &str, params: &[&str], rows: &mut Vec<RouteRow>) {
    if node.route {
        rows.push(RouteRow {
            path: if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            },
            params: params.join(", "),
        });
    }

    for (raw_key, child) in &node.children {
        let mut child_params: Vec<&str> = params.to_vec();
        let segment = match child.param.as_deref() {
            Some(param) => {
                child_params.push(param);
                format!("[{param}]")
            }
            None => raw_key.clone(),
        };
        walk(child, &join_segment(path, &segment), &child_params, rows);
    }
}
