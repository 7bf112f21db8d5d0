use anyhow::{Context, Result};
use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use routegen_core::GenerationReport;

/// Write the generated module, creating parent directories as needed.
pub fn write_generated_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to file {}", path.display()))?;
    Ok(())
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

pub fn print_generation_success(
    report: &GenerationReport,
    input: &Path,
    output: &Path,
    verbose: u8,
) {
    println!(
        "{} Routes generated: {} routes, {} parameters.",
        "✅".green(),
        report.routes.to_string().cyan(),
        report.params.to_string().cyan()
    );
    if verbose > 0 {
        println!("   📁 Input:  {}", input.display().to_string().blue());
        println!("   📄 Output: {}", output.display().to_string().blue());
    }
}

/// One row of the `list` command output.
pub struct RouteRow {
    pub path: String,
    pub params: String,
}

pub fn print_routes_table(rows: &[RouteRow]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Route").fg(Color::Green),
        Cell::new("Parameters").fg(Color::Green),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.path).fg(Color::Cyan),
            Cell::new(&row.params).fg(Color::DarkGrey),
        ]);
    }
    println!("{table}");
}
