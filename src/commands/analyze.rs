//! Page commands: analyze, match

use std::path::Path;

use ctascope::analysis::{analyze_page, match_guess};
use ctascope::config::AnalyzerConfig;
use ctascope::error::Result;
use ctascope::matcher::CtaGuess;
use ctascope::report;
use ctascope::snapshot::PageSnapshot;

/// Find the primary CTA of a snapshot
pub fn cmd_analyze(snapshot_path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = AnalyzerConfig::load(config_path)?;
    let snapshot = PageSnapshot::load(snapshot_path)?;
    let analysis = analyze_page(&snapshot, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", report::render_analysis(&analysis));
        println!();
    }
    Ok(())
}

/// Anchor a guessed CTA to a snapshot element
pub fn cmd_match(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    text: String,
    alternatives: Vec<String>,
    form: bool,
    confidence: f64,
    json: bool,
) -> Result<()> {
    let config = AnalyzerConfig::load(config_path)?;
    let snapshot = PageSnapshot::load(snapshot_path)?;
    let guess = CtaGuess {
        primary_text: text,
        alternatives,
        confidence,
        form_associated: form,
    };
    let outcome = match_guess(&snapshot, &guess, &config);

    if json {
        let output = serde_json::json!({
            "guess": guess,
            "outcome": outcome,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::render_match(&outcome));
        println!();
    }
    Ok(())
}
