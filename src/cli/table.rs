use colored::Colorize;

use crate::forecast::engine::{EntryKind, ForecastEntry};

const HEADERS: [&str; 4] = ["When", "Summary", "Amount", "Balance"];
const GAP: &str = "  ";

/// Describes how a column aligns its contents.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Right,
}

const ALIGNMENTS: [Alignment; 4] = [
    Alignment::Left,
    Alignment::Left,
    Alignment::Right,
    Alignment::Right,
];

/// Renders forecast rows as an aligned text table with colored money columns.
///
/// Widths are computed from the plain cell text; colors are applied after
/// padding so ANSI codes never skew the alignment.
pub fn render_forecast_table(entries: &[ForecastEntry]) -> String {
    let rows: Vec<[String; 4]> = entries.iter().map(row_cells).collect();

    let mut widths: [usize; 4] = [0; 4];
    for (index, header) in HEADERS.iter().enumerate() {
        widths[index] = header.len();
    }
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header_line = HEADERS
        .iter()
        .enumerate()
        .map(|(index, header)| pad(header, widths[index], ALIGNMENTS[index]))
        .collect::<Vec<_>>()
        .join(GAP);
    lines.push(header_line.trim_end().to_string());
    lines.push("-".repeat(widths.iter().sum::<usize>() + GAP.len() * (widths.len() - 1)));

    for (entry, row) in entries.iter().zip(&rows) {
        let line = row
            .iter()
            .enumerate()
            .map(|(index, cell)| colorize(pad(cell, widths[index], ALIGNMENTS[index]), index, entry))
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn row_cells(entry: &ForecastEntry) -> [String; 4] {
    let sign = if entry.kind == EntryKind::Debit { '-' } else { '+' };
    [
        entry.when.format("%b %d, %Y").to_string(),
        entry.summary.clone(),
        format!("{sign}${:.2}", entry.display_amount),
        format!("${:.2}", entry.balance),
    ]
}

fn pad(cell: &str, width: usize, alignment: Alignment) -> String {
    match alignment {
        Alignment::Left => format!("{cell:<width$}"),
        Alignment::Right => format!("{cell:>width$}"),
    }
}

fn colorize(text: String, column: usize, entry: &ForecastEntry) -> String {
    match column {
        2 => match entry.kind {
            EntryKind::Debit => text.red().to_string(),
            EntryKind::Credit => text.green().to_string(),
            EntryKind::Initial => text,
        },
        3 => {
            if entry.balance <= 0.0 {
                text.red().to_string()
            } else {
                text.green().to_string()
            }
        }
        _ => text,
    }
}
