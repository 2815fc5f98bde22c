use chrono::{Duration, NaiveDate};
use polars::prelude::{AnyValue, DataFrame};

use crate::metadata::SchemeMetadata;
use crate::row::{HEADER, Row};

fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn separator(widths: &[usize]) -> String {
    let mut sep = String::from("+");
    for w in widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }
    sep
}

fn push_cells(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(width.saturating_sub(width_of(cell))));
        out.push_str(" |");
    }
    out.push('\n');
}

fn centered(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(width_of(text));
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// Plain-text document: title block, then the scheme table with break rows
/// spanning every column.
pub fn render_preview(metadata: &SchemeMetadata, rows: &[Row]) -> String {
    let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
    let mut widths: Vec<usize> = header.iter().map(|h| width_of(h)).collect();
    let body: Vec<Vec<String>> = rows.iter().map(Row::cells).collect();

    for cells in body.iter().filter(|c| c.len() == HEADER.len()) {
        for (idx, cell) in cells.iter().enumerate() {
            widths[idx] = widths[idx].max(width_of(cell));
        }
    }

    // Widen the last column if a break label would not fit.
    let inner_width = |widths: &[usize]| widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    let longest_label = rows
        .iter()
        .filter_map(Row::break_label)
        .map(|l| width_of(&l))
        .max()
        .unwrap_or(0);
    let shortfall = longest_label.saturating_sub(inner_width(&widths));
    if let Some(last) = widths.last_mut() {
        *last += shortfall;
    }
    let span = inner_width(&widths);
    let sep = separator(&widths);

    let mut out = String::new();
    let mut title_lines: Vec<String> = metadata
        .title_lines()
        .into_iter()
        .map(ToOwned::to_owned)
        .collect();
    if let Some(start) = metadata.term_start {
        title_lines.push(format!("Term starts {}", format_date(start)));
    }
    for line in &title_lines {
        out.push_str(centered(line, sep.len()).trim_end());
        out.push('\n');
    }
    if !title_lines.is_empty() {
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    push_cells(&mut out, &header, &widths);
    out.push_str(&sep);
    out.push('\n');

    for (row, cells) in rows.iter().zip(&body) {
        if row.is_break() {
            out.push_str("| ");
            out.push_str(&centered(&cells[0], span));
            out.push_str(" |\n");
        } else {
            push_cells(&mut out, cells, &widths);
        }
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn date_from_i32(days: i32) -> String {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(i64::from(days))))
        .map(format_date)
        .unwrap_or_default()
}

fn any_value_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Date(days) => date_from_i32(*days),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        _ => av.to_string(),
    }
}

/// Bordered text table of a DataFrame, one line per row.
pub fn render_dataframe(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut table: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let cells = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|av| any_value_text(&av))
                    .unwrap_or_default()
            })
            .collect();
        table.push(cells);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| width_of(n)).collect();
    for cells in &table {
        for (ci, cell) in cells.iter().enumerate() {
            widths[ci] = widths[ci].max(width_of(cell));
        }
    }

    let sep = separator(&widths);
    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_cells(&mut out, &col_names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for cells in &table {
        push_cells(&mut out, cells, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
