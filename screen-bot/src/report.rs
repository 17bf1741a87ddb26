//! Read-only rendering of completed screenings for administrators.

use anyhow::Result;
use serde::Serialize;
use storage::ScreeningRecord;

#[derive(Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    user_id: &'a str,
    completed_at: String,
    answers: &'a [u8],
    risk_count: u32,
}

/// Plain-text table: one line per record in insertion order, answers as `Q1..QN` columns.
pub fn render_table(records: &[ScreeningRecord]) -> String {
    if records.is_empty() {
        return "No completed screenings.\n".to_string();
    }

    let questions = records.iter().map(|r| r.answers.len()).max().unwrap_or(0);
    let user_width = records
        .iter()
        .map(|r| r.user_id.chars().count())
        .chain(std::iter::once("user".len()))
        .max()
        .unwrap_or(4);

    let mut out = format!("{:<user_width$}  {:<20}", "user", "completed at");
    for q in 1..=questions {
        out.push_str(&format!("  Q{}", q));
    }
    out.push_str("  risk\n");

    for record in records {
        out.push_str(&format!(
            "{:<user_width$}  {:<20}",
            record.user_id,
            record.completed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ));
        for q in 0..questions {
            let cell = record
                .answer(q)
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("  {:<2}", cell));
        }
        out.push_str(&format!("  {}\n", record.risk_count()));
    }
    out.push_str(&format!("{} screening(s)\n", records.len()));
    out
}

/// Pretty-printed JSON array of records, in insertion order.
pub fn render_json(records: &[ScreeningRecord]) -> Result<String> {
    let rows: Vec<ReportRow<'_>> = records
        .iter()
        .map(|r| ReportRow {
            id: &r.id,
            user_id: &r.user_id,
            completed_at: r.completed_at.to_rfc3339(),
            answers: &r.answers,
            risk_count: r.risk_count(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
