// linkrank/src/ui/ranking_table.rs
//! Renders an [`EnhancementReport`] as one table row per (mention, candidate).

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use linkrank_core::EnhancementReport;

fn score(value: f64) -> Cell {
    Cell::new(format!("{:.4}", value)).set_alignment(CellAlignment::Right)
}

/// Builds the ranking table of `report`. Mentions without surviving
/// candidates get a single row with empty score columns.
pub fn build_ranking_table(report: &EnhancementReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Mention",
            "Rank",
            "Entity",
            "Label",
            "Original",
            "Name match",
            "Relatedness",
            "Final",
        ]);

    for mention in &report.outcome.mentions {
        let ranking = report.outcome.ranking_for(&mention.mention_id);
        if ranking.is_empty() {
            table.add_row(vec![Cell::new(&mention.mention_id), Cell::new("-")]);
            continue;
        }
        for (rank, candidate) in ranking.iter().enumerate() {
            table.add_row(vec![
                Cell::new(&mention.mention_id),
                Cell::new(rank + 1).set_alignment(CellAlignment::Right),
                Cell::new(candidate.entity_id()),
                Cell::new(candidate.display_label().unwrap_or("")),
                score(candidate.original_confidence),
                score(candidate.name_match_confidence),
                score(candidate.relatedness_confidence),
                score(candidate.final_confidence.unwrap_or(candidate.original_confidence)),
            ]);
        }
    }
    table
}

/// The table plus a one-line header naming the document.
pub fn render_report(report: &EnhancementReport) -> String {
    let mut rendered = format!(
        "{} ({} mention(s), {} link(s) updated)\n{}",
        report.content_uri,
        report.mention_count,
        report.links_written,
        build_ranking_table(report)
    );
    for failure in report.failures() {
        rendered.push_str(&format!(
            "\n  dropped {} ({}): {}",
            failure.link_id, failure.entity_id, failure.reason
        ));
    }
    rendered
}
