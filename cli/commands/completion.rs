use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use colored::*;
use std::fs::{self, File};
use std::io;

use crate::cli_args::{Cli, CompletionArgs};
use routegen_core::AppError;

pub fn handle_completion_command(args: &CompletionArgs, quiet: bool) -> Result<()> {
    let shell_str = args.shell.as_deref().unwrap_or("fish");
    let shell_enum: Shell = match shell_str.to_lowercase().as_str() {
        "fish" => Shell::Fish,
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        _ => {
            anyhow::bail!(AppError::InvalidArgument(format!(
                "Unsupported shell for completion: {shell_str}"
            )));
        }
    };

    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    if !args.save {
        generate(shell_enum, &mut command, bin_name, &mut io::stdout());
        return Ok(());
    }

    let save_dir = match shell_enum {
        Shell::Fish => dirs::config_dir().map(|p| p.join("fish").join("completions")),
        Shell::Bash => dirs::config_dir().map(|p| p.join("bash_completion.d")),
        Shell::Zsh => dirs::data_local_dir().map(|p| p.join("zsh").join("site-functions")),
        _ => unreachable!(),
    }
    .ok_or_else(|| anyhow::anyhow!("Could not determine standard completion directory."))?;

    let filename = match shell_enum {
        Shell::Fish => format!("{bin_name}.fish"),
        Shell::Bash => format!("{bin_name}.bash"),
        Shell::Zsh => format!("_{bin_name}"),
        _ => unreachable!(),
    };
    let save_path = save_dir.join(&filename);

    if save_path.exists() && !args.force {
        anyhow::bail!(
            "Completion file already exists at '{}' (use --force to overwrite).",
            save_path.display()
        );
    }

    fs::create_dir_all(&save_dir)
        .with_context(|| format!("Failed to create directory {}", save_dir.display()))?;
    let mut file = File::create(&save_path)
        .with_context(|| format!("Failed to create file {}", save_path.display()))?;
    generate(shell_enum, &mut command, bin_name, &mut file);

    if !quiet {
        println!(
            "{} {} completions saved to: {}",
            "✅".green(),
            shell_str.cyan(),
            save_path.display().to_string().blue()
        );
    }
    Ok(())
}
