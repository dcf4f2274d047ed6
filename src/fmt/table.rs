use console::{Alignment, measure_text_width, pad_str, style};

use crate::domain::ntp::ResultRow;

/// Column titles, in display order.
pub const HEADERS: [&str; 7] = [
    "Remote",
    "Refid",
    "Stratum",
    "Delay",
    "Offset",
    "TX Time",
    "Adjusted Time",
];

const ALIGN: [Alignment; 7] = [
    Alignment::Left,
    Alignment::Center,
    Alignment::Center,
    Alignment::Left,
    Alignment::Left,
    Alignment::Left,
    Alignment::Left,
];

/// Format used for the TX Time and Adjusted Time columns (local time).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

type Cells = [String; 7];

fn row_cells(row: &ResultRow) -> Cells {
    match &row.stats {
        Ok(s) => [
            row.server.clone(),
            s.ref_id.clone(),
            s.stratum.to_string(),
            s.delay.to_string(),
            s.offset.to_string(),
            s.tx_time.format(TIME_FORMAT).to_string(),
            s.adjusted_time.format(TIME_FORMAT).to_string(),
        ],
        Err(msg) => [
            style(&row.server).red().to_string(),
            "-".into(),
            "-".into(),
            "-".into(),
            "-".into(),
            "-".into(),
            style(format!("error: {msg}")).red().to_string(),
        ],
    }
}

fn border(widths: &[usize; 7]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn line(cells: &Cells, widths: &[usize; 7]) -> String {
    let mut out = String::from("|");
    for ((cell, w), align) in cells.iter().zip(widths).zip(ALIGN) {
        out.push(' ');
        out.push_str(&pad_str(cell, *w, align, None));
        out.push_str(" |");
    }
    out
}

/// Render rows as a boxed text table, one line per row, in row order.
///
/// Width is measured on visible characters, so styled cells line up.
pub fn render(rows: &[ResultRow]) -> String {
    let header: Cells = HEADERS.map(|h| style(h).cyan().bold().to_string());
    let body: Vec<Cells> = rows.iter().map(row_cells).collect();

    let mut widths = [0usize; 7];
    for cells in std::iter::once(&header).chain(&body) {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(measure_text_width(cell));
        }
    }

    let sep = border(&widths);
    let mut out = vec![sep.clone(), line(&header, &widths), sep.clone()];
    out.extend(body.iter().map(|cells| line(cells, &widths)));
    out.push(sep);
    out.join("\n")
}
