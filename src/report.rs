//! Human-readable rendering of analysis and match results

use colored::Colorize;
use std::fmt::Write;

use crate::analysis::PageAnalysis;
use crate::matcher::MatchOutcome;
use crate::scorer::{Rejection, ScoredCandidate};
use crate::section::{SectionSpan, SectionTable};

fn rule_line(out: &mut String, name: &str, score: i32, max: i32, note: &str) {
    let value = format!("{:>2}/{}", score, max);
    let value = if score < 0 {
        value.red()
    } else if score == max {
        value.green()
    } else {
        value.normal()
    };
    let _ = writeln!(out, "    {:<20} {}  {}", name, value, note.dimmed());
}

fn render_breakdown(out: &mut String, scored: &ScoredCandidate) {
    let b = &scored.breakdown;
    rule_line(out, "location", b.location, 2, b.location_band.as_str());
    rule_line(out, "text intent", b.text_intent, 3, b.text_intent_class.as_str());
    rule_line(
        out,
        "visual prominence",
        b.visual_prominence,
        3,
        &format!("size ratio {:.2}", b.size_ratio),
    );
    rule_line(
        out,
        "singularity",
        b.singularity,
        2,
        &format!("{} in section", b.section_size),
    );
    rule_line(out, "context alignment", b.context_alignment, 2, "");

    if b.adjustments.is_empty() {
        let _ = writeln!(out, "    {:<20} {}", "adjustments", "none".dimmed());
    } else {
        let names: Vec<&str> = b.adjustments.iter().map(|a| a.as_str()).collect();
        let _ = writeln!(
            out,
            "    {:<20} +{}  {}",
            "adjustments",
            b.adjustment_total,
            names.join(", ").dimmed()
        );
    }
}

pub fn render_analysis(analysis: &PageAnalysis) -> String {
    let mut out = String::new();
    let selection = &analysis.selection;

    if let Some(url) = &analysis.url {
        let _ = writeln!(out, "\n{} {}", "Page".cyan().bold(), url);
    }
    let ctx = &analysis.context;
    let _ = writeln!(
        out,
        "  height {}px, {} candidates, value proposition: {}, urgency: {}",
        ctx.page_height,
        ctx.total_candidates,
        if ctx.has_value_proposition { "yes".green() } else { "no".dimmed() },
        if ctx.has_urgency_text { "yes".green() } else { "no".dimmed() },
    );

    match (&selection.primary, &selection.rejection) {
        (Some(primary), _) => {
            let _ = writeln!(
                out,
                "\n{} \"{}\" ({}, {} section) score {} (base {})",
                "Primary CTA:".green().bold(),
                primary.candidate.text,
                primary.candidate.kind.as_str(),
                primary.section,
                primary.adjusted_score.to_string().bold(),
                primary.base_score,
            );
            render_breakdown(&mut out, primary);
        }
        (None, Some(rejection @ Rejection::BelowThreshold { best_score, min_score })) => {
            let _ = writeln!(
                out,
                "\n{} best score {} is below the minimum of {} ({})",
                "No primary CTA:".yellow().bold(),
                best_score,
                min_score,
                rejection.as_str().dimmed()
            );
        }
        (None, _) => {
            let _ = writeln!(
                out,
                "\n{} no candidates on the page ({})",
                "No primary CTA:".yellow().bold(),
                Rejection::NoCandidates.as_str().dimmed()
            );
        }
    }

    if !selection.section_champions.is_empty() {
        let _ = writeln!(out, "\n  {}:", "Section champions".bold());
        for champion in &selection.section_champions {
            let _ = writeln!(
                out,
                "    {:<14} {:>3}  {}",
                champion.section.as_str(),
                champion.adjusted_score,
                champion.candidate.text
            );
        }
    }
    out
}

pub fn render_match(outcome: &MatchOutcome) -> String {
    let mut out = String::new();

    match &outcome.matched {
        Some(m) => {
            let _ = writeln!(
                out,
                "\n{} \"{}\" ({}, {} tier) confidence {:.2}",
                "Matched:".green().bold(),
                m.text,
                m.kind,
                m.tier,
                m.confidence
            );
            let c = &m.coordinates;
            let _ = writeln!(
                out,
                "  at ({:.0}, {:.0}) {:.0}x{:.0}, priority {:.2}",
                c.x, c.y, c.width, c.height, m.priority_score
            );
            if let Some(bucket) = outcome.trace.bucket {
                let _ = writeln!(out, "  picked from: {}", bucket.as_str());
            }
            if outcome.trace.form_merged {
                let _ = writeln!(out, "  {}", "merged with nearby form".dimmed());
            }
        }
        None => {
            let _ = writeln!(out, "\n{}", "No matching element".yellow().bold());
        }
    }

    if outcome.trace.entries.is_empty() {
        let _ = writeln!(out, "  {}", "(no visible buttons or links)".dimmed());
        return out;
    }

    let _ = writeln!(out, "\n  {}:", "Trace".bold());
    let _ = writeln!(
        out,
        "    {:<28} {:<6} {:>5} {:<10} {:>8} {:>6}",
        "text", "kind", "sim", "tier", "score", "conf"
    );
    for entry in &outcome.trace.entries {
        let mark = if entry.admitted { "+".green() } else { "-".dimmed() };
        let _ = writeln!(
            out,
            "  {} {:<28} {:<6} {:>5.2} {:<10} {:>8.2} {:>6.2}",
            mark,
            truncate(&entry.text, 28),
            entry.kind.as_str(),
            entry.similarity,
            entry.tier.as_str(),
            entry.enhanced_score,
            entry.confidence
        );
    }
    out
}

/// The section table in evaluation order, resolved for `page_height`
pub fn render_sections(table: &SectionTable, page_height: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{} (page height {}px)\n",
        "Sections".cyan().bold(),
        page_height
    );
    for range in &table.sections {
        let (min, max) = range.span.resolve(page_height);
        let span = match max {
            Some(max) => format!("[{}, {})", min, max),
            None => format!("[{}, ∞)", min),
        };
        let note = match range.span {
            SectionSpan::Tail { depth } => format!("last {}px", depth),
            SectionSpan::CatchAll => "anything else".to_string(),
            SectionSpan::Band { .. } => String::new(),
        };
        let _ = writeln!(
            out,
            "  {:<14} {:<18} priority {:>2}  {}",
            range.kind.as_str(),
            span,
            range.priority,
            note.dimmed()
        );
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
