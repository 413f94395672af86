//! Grid table rendering.
//!
//! A table is rendered as a leading border, then each row's lines followed by
//! a border. The border under the first row uses `=` unless the title row is
//! not to be distinguished:
//!
//! ```text
//! +---+--+
//! |a  |bb|
//! +===+==+
//! |ccc|d |
//! +---+--+
//! ```
//!
//! Cells are word-wrapped to their column width. Each cell line starts with
//! `|`; only the last column also closes with `|`, since the next column's
//! leading `|` closes the previous one.

use std::io::Write;

use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use tracing::trace;

use crate::options::LayoutOptions;
use crate::table::Table;
use crate::widths::{text_width, ColumnWidths};
use crate::Result;

/// Character used for regular row borders.
pub const BORDER_LINE: char = '-';
/// Character used for the border under the title row.
pub const TITLE_LINE: char = '=';
/// Character placed at every column boundary of a border.
pub const BORDER_CORNER: char = '+';
/// Character placed at every column boundary of a cell line.
pub const CELL_EDGE: char = '|';

/// Build one border line: a corner before each column and one trailing
/// corner, with `width` copies of `line` in between.
pub fn border_line(widths: &ColumnWidths, line: char, corner: char) -> Result<String> {
    let mut border = String::with_capacity(widths.line_width()?);
    border.push(corner);
    for width in widths.iter() {
        border.extend(std::iter::repeat(line).take(width));
        border.push(corner);
    }
    Ok(border)
}

/// A word plus the spaces that follow it, measured in chars like every
/// other width in the crate.
#[derive(Debug)]
struct CellWord<'a> {
    word: &'a str,
    whitespace: &'a str,
}

impl Fragment for CellWord<'_> {
    fn width(&self) -> f64 {
        text_width(self.word) as f64
    }

    fn whitespace_width(&self) -> f64 {
        text_width(self.whitespace) as f64
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Split space-separated text into words. Leading spaces become an empty
/// first word so they stay on the first line.
fn split_words(text: &str) -> Vec<CellWord<'_>> {
    let mut words = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (word, after) = rest.split_at(rest.find(' ').unwrap_or(rest.len()));
        let (whitespace, next) =
            after.split_at(after.find(|c: char| c != ' ').unwrap_or(after.len()));
        words.push(CellWord { word, whitespace });
        rest = next;
    }
    words
}

/// Join a wrapped line back together, dropping its trailing spaces.
fn join_words(words: &[CellWord<'_>]) -> String {
    let mut line = String::new();
    for (i, word) in words.iter().enumerate() {
        line.push_str(word.word);
        if i + 1 < words.len() {
            line.push_str(word.whitespace);
        }
    }
    line
}

/// Word-wrap `text` at `width` on whitespace, without borders or padding.
///
/// Wrapping is greedy and never splits a word, so a word longer than `width`
/// ends up alone on a line that is too long. All whitespace counts as a plain
/// space. Empty or blank text wraps to no lines at all. Every char counts as
/// one column, control characters and escape sequences included.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let flattened: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flattened.trim().is_empty() {
        return Vec::new();
    }
    if width == 0 {
        return vec![flattened.trim().to_string()];
    }

    let words = split_words(&flattened);
    wrap_first_fit(&words, &[width as f64])
        .into_iter()
        .map(join_words)
        .collect()
}

/// Pad `line` with spaces to exactly `width`, or cut it down to `width`.
fn fit_line(line: &str, width: usize) -> String {
    let len = text_width(line);
    if len < width {
        let mut fitted = String::with_capacity(line.len() + width - len);
        fitted.push_str(line);
        fitted.extend(std::iter::repeat(' ').take(width - len));
        fitted
    } else {
        line.chars().take(width).collect()
    }
}

fn bordered(content: &str, last: bool) -> String {
    let mut line = String::with_capacity(content.len() + 2);
    line.push(CELL_EDGE);
    line.push_str(content);
    if last {
        line.push(CELL_EDGE);
    }
    line
}

/// A cell line with no content, used where a column ran out of wrapped lines.
pub fn blank_cell(width: usize, last: bool) -> String {
    bordered(&" ".repeat(width), last)
}

/// Wrap a cell into fixed-width, bordered lines.
///
/// Every line is exactly `width` chars between its borders. Empty text yields
/// no lines.
pub fn wrap_cell(text: &str, width: usize, last: bool) -> Vec<String> {
    wrap_text(text, width)
        .iter()
        .map(|line| bordered(&fit_line(line, width), last))
        .collect()
}

/// Render one row into one or more physical lines (without newlines).
///
/// Cells missing from a short row are drawn blank so every line spans all
/// columns. A row whose cells are all empty still takes one line.
pub fn render_row(row: &[String], widths: &ColumnWidths) -> Vec<String> {
    let column_count = widths.len();
    let wrapped: Vec<Vec<String>> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| match row.get(i) {
            Some(cell) => wrap_cell(cell, width, i + 1 == column_count),
            None => Vec::new(),
        })
        .collect();

    let wrap_lines_max = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
    trace!(cells = row.len(), wrap_lines_max, "rendering row");

    (0..wrap_lines_max)
        .map(|line_index| {
            widths
                .iter()
                .enumerate()
                .map(|(i, width)| match wrapped[i].get(line_index) {
                    Some(line) => line.clone(),
                    None => blank_cell(width, i + 1 == column_count),
                })
                .collect::<String>()
        })
        .collect()
}

/// Feed every line of the table, in order and without newlines, to `emit`.
fn emit_table<F>(
    table: &Table,
    widths: &ColumnWidths,
    skip_title: bool,
    mut emit: F,
) -> Result<()>
where
    F: FnMut(&str) -> Result<()>,
{
    let row_border = border_line(widths, BORDER_LINE, BORDER_CORNER)?;
    let title_border = border_line(widths, TITLE_LINE, BORDER_CORNER)?;

    emit(&row_border)?;
    for (index, row) in table.iter().enumerate() {
        for line in render_row(row, widths) {
            emit(&line)?;
        }
        if index == 0 && !skip_title {
            emit(&title_border)?;
        } else {
            emit(&row_border)?;
        }
    }
    Ok(())
}

/// Write the whole table to `out`, one row at a time.
///
/// With `skip_title` set, the first row is followed by a regular border like
/// every other row.
pub fn write_table<W: Write + ?Sized>(
    table: &Table,
    widths: &ColumnWidths,
    skip_title: bool,
    out: &mut W,
) -> Result<()> {
    emit_table(table, widths, skip_title, |line| {
        writeln!(out, "{line}")?;
        Ok(())
    })
}

/// Compute widths for `table` and render it to a string.
pub fn render_table(table: &Table, options: &LayoutOptions) -> Result<String> {
    let widths = ColumnWidths::natural(table).adjusted(options)?;
    let mut rendered = String::new();
    emit_table(table, &widths, options.skip_title, |line| {
        rendered.push_str(line);
        rendered.push('\n');
        Ok(())
    })?;
    Ok(rendered)
}
