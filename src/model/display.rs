// File: ./src/model/display.rs
// Plain-text tables for the terminal. Column widths are measured in display
// cells so company names with wide characters still line up.
use crate::model::field::{format_date, format_datetime};
use crate::model::{Event, Internship};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NOTES_MAX_WIDTH: usize = 40;

pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Internship {
    fn headers() -> &'static [&'static str] {
        &["#", "Company", "Role", "Status", "Applied", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.company().to_string(),
            self.role().to_string(),
            self.status().to_string(),
            format_date(self.applied()),
            truncate(self.notes(), NOTES_MAX_WIDTH),
        ]
    }
}

impl TableRow for Event {
    fn headers() -> &'static [&'static str] {
        &["#", "Event", "From", "To"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name().to_string(),
            format_datetime(self.start()),
            format_datetime(self.end()),
        ]
    }
}

/// Cuts `s` to at most `max` display cells, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| pad(c, *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Renders `rows` as a numbered table. The first column is the 1-based index
/// commands refer to.
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    let header: Vec<String> = T::headers().iter().map(|h| h.to_string()).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = vec![(i + 1).to_string()];
            cells.extend(row.cells());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = table_line(&header, &widths);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for cells in &body {
        out.push('\n');
        out.push_str(&table_line(cells, &widths));
    }
    out
}
