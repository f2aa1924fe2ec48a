//! Miscellaneous commands: sections, config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};

use ctascope::cli::{Cli, CompletionShell};
use ctascope::config::AnalyzerConfig;
use ctascope::error::{CtaError, Result};
use ctascope::report;

fn resolve_config_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(p) => Ok(p.to_path_buf()),
        None => AnalyzerConfig::config_path(),
    }
}

/// Print the section table
pub fn cmd_sections(config_path: Option<&Path>, page_height: f64, json: bool) -> Result<()> {
    let config = AnalyzerConfig::load(config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config.sections)?);
        return Ok(());
    }
    print!("{}", report::render_sections(&config.sections, page_height));
    println!("\n  Evaluated top to bottom; the first matching row wins.\n");
    Ok(())
}

/// Print the effective configuration
pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = AnalyzerConfig::load(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(config_path)?;
    let status = if path.exists() { "exists".green() } else { "not created".dimmed() };
    println!("{} ({})", path.display(), status);
    Ok(())
}

/// Write the default configuration
pub fn cmd_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_config_path(config_path)?;
    if path.exists() && !force {
        return Err(CtaError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    AnalyzerConfig::default().save(&path)?;
    println!("{} {}", "Wrote".green().bold(), path.display());
    println!("  Edit the word lists and thresholds there, then check with: ctascope config show");
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "ctascope", &mut io::stdout());
    Ok(())
}
