//! Browser-less "ask" command

use std::error::Error;
use std::sync::Arc;

use unicode_width::UnicodeWidthStr;

use crate::api::HttpBackend;
use crate::core::classify::{cell_text, Classified, JsonView, Table};
use crate::core::config::Config;
use crate::core::dispatch::Dispatcher;
use crate::core::session::Session;
use crate::utils::logging::TranscriptLog;

pub async fn run_ask(
    question: Vec<String>,
    config: &Config,
    transcript: TranscriptLog,
) -> Result<(), Box<dyn Error>> {
    let question = question.join(" ");
    if question.trim().is_empty() {
        eprintln!("Usage: notebook-chat ask <question>");
        std::process::exit(1);
    }

    let backend = HttpBackend::new(config.effective_backend_url());
    let dispatcher = Dispatcher::new(Arc::new(backend), transcript);
    let mut session = Session::new();

    let outcome = dispatcher.submit(&mut session, &question).await;
    if let Some(notice) = outcome.notice {
        eprintln!("❌ {}", notice.message());
        std::process::exit(1);
    }
    if let Some(answer) = outcome.answer {
        println!("{}", format_answer(&answer));
    }
    Ok(())
}

/// Plain-text rendition of an answer for a terminal.
pub fn format_answer(answer: &Classified) -> String {
    match answer {
        Classified::Text(text) => text.clone(),
        Classified::Image(payload) => format!(
            "[{} image, {} bytes]",
            payload.format.as_str(),
            payload.bytes.len()
        ),
        Classified::Table(table) => format_table(table),
        Classified::Json(JsonView::Tree(value)) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        Classified::Json(JsonView::Raw(raw)) => raw.clone(),
    }
}

/// Lay out a table as aligned columns, index first.
pub fn format_table(table: &Table) -> String {
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.row_count() + 1);
    let mut header = vec![String::new()];
    header.extend(table.columns.iter().cloned());
    grid.push(header);
    for (label, row) in table.index.iter().zip(&table.rows) {
        let mut line = vec![label.clone()];
        line.extend(row.iter().map(cell_text));
        grid.push(line);
    }

    let column_count = table.column_count() + 1;
    let mut widths = vec![0usize; column_count];
    for row in &grid {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut lines = Vec::with_capacity(grid.len() + 1);
    for (position, row) in grid.iter().enumerate() {
        let mut line = String::new();
        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            let pad = widths[col].saturating_sub(UnicodeWidthStr::width(cell.as_str()));
            line.push_str(&" ".repeat(pad));
        }
        lines.push(line.trim_end().to_string());

        if position == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            lines.push(rule.join("  ").trim_end().to_string());
        }
    }
    lines.join("\n")
}
