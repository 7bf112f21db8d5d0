use anyhow::{Context, Result};
use colored::*;
use notify::RecursiveMode;
use notify_debouncer_mini::{DebouncedEvent, new_debouncer};
use std::path::Path;
use std::sync::mpsc;

use crate::cli_args::GenerateArgs;
use crate::commands::generate;
use routegen_core::Config;
use routegen_core::scanner::{ROUTE_FILE_EXTENSIONS, ROUTE_FILE_NAMES};

/// Watch the input directory and regenerate after each debounced burst of
/// relevant changes.
///
/// Regenerations run sequentially on this thread: a burst that arrives while
/// one is in flight is picked up on the next channel receive. A failed cycle
/// is reported and the watcher keeps listening.
pub fn run_watch_mode(
    project_root: &Path,
    config: Config,
    args: &GenerateArgs,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let input = config.resolved_input(project_root);
    if !quiet {
        println!(
            "👀 Watching for changes in: {}. Press Ctrl+C to exit.",
            input.display()
        );
    }

    report_generation(
        generate::trigger_generation(project_root, &config, false, quiet, verbose),
        quiet,
        verbose,
        "initial generation",
    );

    let (tx, rx) = mpsc::channel();
    let delay = config
        .get_watch_delay()
        .context("Invalid watch delay duration")?;
    let mut debouncer =
        new_debouncer(delay, tx).map_err(|e| anyhow::anyhow!("Failed to create debouncer: {e}"))?;
    debouncer
        .watcher()
        .watch(&input, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", input.display()))?;

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<&DebouncedEvent> =
                    events.iter().filter(|e| is_relevant(&e.path)).collect();
                if relevant.is_empty() {
                    log::trace!("Debounced burst contained no relevant events.");
                    continue;
                }

                if args.clear {
                    let _ = clearscreen::clear();
                }
                if !quiet && verbose > 0 {
                    eprintln!(
                        "\n{} {} relevant change(s) detected:",
                        "🔄".blue(),
                        relevant.len()
                    );
                    for event in &relevant {
                        let shown = pathdiff::diff_paths(&event.path, &input)
                            .unwrap_or_else(|| event.path.clone());
                        eprintln!("   {}", shown.display());
                    }
                } else if !quiet {
                    eprintln!("\n{} Changes detected, regenerating routes...", "🔄".blue());
                }

                report_generation(
                    generate::trigger_generation(project_root, &config, false, quiet, verbose),
                    quiet,
                    verbose,
                    "regeneration",
                );
            }
            Ok(Err(error)) => {
                if !quiet {
                    eprintln!("{} {:#}", "⚠️ Watch error:".yellow(), error);
                }
                log::error!("Notify error received: {:?}", error);
            }
            Err(e) => {
                eprintln!("{} {:#}", "⛔ Watcher channel error:".red(), e);
                break Ok(());
            }
        }
    }
}

fn report_generation(result: Result<()>, quiet: bool, verbose: u8, what: &str) {
    match result {
        Ok(_) => {
            if !quiet && verbose > 0 {
                println!("{} {}\n", "✅".green(), format!("{what} complete.").green());
            }
        }
        Err(e) => {
            if !quiet {
                eprintln!("{} {:#}\n", format!("⚠️ Error during {what}:").yellow(), e);
            }
        }
    }
}

/// A change matters when it touches a route marker file or looks like a
/// directory add/remove. Everything hidden is ignored, matching the scanner.
fn is_relevant(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            ROUTE_FILE_NAMES.contains(&stem) && ROUTE_FILE_EXTENSIONS.contains(&ext)
        }
        // no extension: directory-shaped; the path may already be gone, so
        // this cannot be checked against the filesystem
        None => true,
    }
}
