use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "ctascope")]
#[command(author, version, about = "Find the primary call-to-action on a captured web page", long_about = None)]
#[command(after_help = r#"Examples:
  ctascope analyze page.json                       Primary CTA with score breakdown
  ctascope analyze page.json --json                Same, as JSON
  ctascope match page.json --text "Start trial"    Anchor a guessed CTA to an element
  ctascope sections --page-height 4000             Show the section table
  ctascope config init                             Write the default config

Snapshots are JSON files produced by the capture step: viewport, page_height,
buttons, links, forms and text_blocks with scroll-adjusted coordinates.
"#)]
pub struct Cli {
    /// Config file (defaults to $CTASCOPE_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log scoring decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the primary CTA of a page snapshot
    #[command(after_help = r#"Examples:
  ctascope analyze page.json
  ctascope analyze page.json --json | jq .selection.primary
  RUST_LOG=ctascope=debug ctascope analyze page.json   # per-candidate scores
"#)]
    Analyze {
        /// Snapshot JSON file
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Match a free-text CTA guess against the page's elements
    #[command(after_help = r#"Examples:
  ctascope match page.json --text "Sign up"
  ctascope match page.json --text "Start free trial" --alt "Try it free" --alt "Get started"
  ctascope match page.json --text "Subscribe" --form      # merge with a nearby form
"#)]
    Match {
        /// Snapshot JSON file
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Guessed CTA text
        #[arg(long)]
        text: String,

        /// Alternative wordings of the guess (repeatable)
        #[arg(long = "alt", value_name = "TEXT")]
        alternatives: Vec<String>,

        /// The guessed CTA submits a form
        #[arg(long)]
        form: bool,

        /// Confidence reported with the guess
        #[arg(long, default_value = "0.0")]
        confidence: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the section table in evaluation order
    #[command(after_help = r#"Examples:
  ctascope sections
  ctascope sections --page-height 2400    # resolve the footer for a short page
"#)]
    Sections {
        /// Page height used to resolve the footer
        #[arg(long, default_value = "3000")]
        page_height: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  ctascope completions bash > ~/.local/share/bash-completion/completions/ctascope
  ctascope completions zsh > ~/.zfunc/_ctascope
  ctascope completions fish > ~/.config/fish/completions/ctascope.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
